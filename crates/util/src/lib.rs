pub mod config;
pub mod http;
pub mod text;

pub use config::*;
pub use text::*;
