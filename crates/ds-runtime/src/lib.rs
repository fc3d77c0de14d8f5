//! # Doc-Seal Runtime
//!
//! Library half of the `docseal` binary.
//!
//! - `container/` - configuration and the service container
//! - `commands/` - one function per CLI command, each returning a JSON outcome
//! - `logging` - tracing subscriber setup

pub mod commands;
pub mod container;
pub mod logging;

pub use commands::CommandOutput;
pub use container::{ConfigError, RuntimeConfig, ServiceContainer};
