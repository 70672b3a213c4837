//! simdwheel-lib: build a self-contained pillow-simd wheel on Windows.
//!
//! This crate holds the whole pipeline:
//! - `toolchain`: locate and activate the compiler environment
//! - `env`: the immutable build environment and library path export
//! - `mode`: uv/pip installer selection
//! - `install`, `artifact`: the external build steps
//! - `pipeline`: runs the steps in order, stopping at the first failure
//!
//! External tools are reached through [`execute::ToolRunner`] so every step
//! can be exercised with a fake.

pub mod artifact;
pub mod config;
pub mod consts;
pub mod env;
pub mod error;
pub mod execute;
pub mod install;
pub mod mode;
pub mod pipeline;
pub mod platform;
pub mod toolchain;
pub mod util;

pub use config::BuildConfig;
pub use error::{PipelineError, Step};
pub use mode::BuildMode;
pub use pipeline::{Pipeline, PipelineReport};
pub use toolchain::ToolchainConfig;
