//! # splitscreen protocols
//!
//! Interface definitions shared by every splitscreen crate.
//! Traits and plain data types, plus the shared AppleScript quoting.
//!
//! ## Core Traits
//!
//! - [`Extension`] - Bundles a group of tools and registers them at startup
//! - [`Tool`] - A single callable exposed over MCP

pub mod error;
pub mod extension;
pub mod script;
pub mod tool;
pub mod types;

pub use extension::{Extension, ExtensionContext, ExtensionManifest, ToolRegistryAccess};
pub use tool::{Tool, ToolContext, ToolDefinition, ToolResult};
pub use error::{ExtensionError, ToolError};
pub use types::*;
