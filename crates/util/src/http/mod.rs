pub mod client;
pub mod parser;

pub use client::*;
pub use parser::*;
