use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The runtime executable is neither configured nor on the search path.
    #[error("{name} executable not found. Please install Bun to run the TUI.")]
    RuntimeNotFound { name: &'static str },

    #[error("cannot expand '~': home directory could not be determined")]
    NoHomeDir,

    #[error("cannot resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("cannot determine install location: {0}")]
    InstallDir(#[source] std::io::Error),

    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
