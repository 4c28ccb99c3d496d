//! Extension protocol definitions.
//!
//! An extension owns a group of related tools and registers them at startup.

mod traits;
mod manifest;
mod context;

pub use traits::*;
pub use manifest::*;
pub use context::*;
