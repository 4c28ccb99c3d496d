//! # splitscreen core
//!
//! Extension host for the splitscreen MCP server.
//!
//! ## Components
//!
//! - [`Kernel`] - Loads extensions, owns the tool registry, dispatches calls
//! - [`ToolRegistry`] - Thread-safe map of tool id to tool

pub mod kernel;
pub mod registry;

pub use kernel::Kernel;
pub use registry::ToolRegistry;
