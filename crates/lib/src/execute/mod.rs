//! External tool execution.
//!
//! Every external collaborator (compiler environment loader, installer, wheel
//! builder, repair tool) is reached through [`ToolRunner`], so the pipeline can
//! be driven by a fake in tests.

pub mod runner;
pub mod types;

pub use runner::{SystemRunner, ToolRunner};
pub use types::{ExecuteError, Invocation, ToolOutput};
