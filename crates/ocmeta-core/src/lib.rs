//! Launcher core for the OpenCode metadata manager.
//!
//! Locates the Bun runtime, builds the fixed `bun run tui -- --root <path>`
//! invocation, and runs it as a child process whose exit code becomes the
//! launcher's own.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod command;
pub mod config;
pub mod error;
pub mod paths;
pub mod runtime;

pub use command::LaunchCommand;
pub use config::Config;
pub use error::{Error, Result};
pub use runtime::{resolve_runtime, RUNTIME_NAME};
