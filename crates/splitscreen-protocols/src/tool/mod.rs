//! Tool protocol definitions.
//!
//! Tools are what an MCP client sees and calls.

mod traits;
mod definition;
mod context;
mod result;

pub use traits::*;
pub use definition::*;
pub use context::*;
pub use result::*;
