//! Layout, widgets, and the terminal runtime.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod utils;
