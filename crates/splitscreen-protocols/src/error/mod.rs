//! Error types shared across extensions.

mod extension;
mod tool;

pub use extension::*;
pub use tool::*;
