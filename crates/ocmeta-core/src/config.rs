use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths;

/// Configuration for ocmeta.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (OCMETA_* prefix)
/// 3. Config file (~/.config/ocmeta/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata root handed to the TUI.
    ///
    /// Can be set via:
    /// - CLI: --root /path/to/root
    /// - ENV: OCMETA_ROOT
    /// - Config: root = "/path/to/root"
    /// - Default: ~/.local/share/opencode
    pub root: Option<PathBuf>,

    /// Path to the bun executable, if it is not on PATH.
    ///
    /// Can be set via:
    /// - CLI: --bun /path/to/bun
    /// - ENV: OCMETA_BUN
    /// - Config: bun = "/path/to/bun"
    pub bun: Option<PathBuf>,

    /// Directory holding the TUI project; the child runs there.
    ///
    /// Can be set via:
    /// - CLI: --project-dir /path/to/project
    /// - ENV: OCMETA_PROJECT_DIR
    /// - Config: project_dir = "/path/to/project"
    /// - Default: directory of the ocmeta executable
    pub project_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` and environment variables.
    ///
    /// A missing file is skipped; a file that exists but cannot be parsed
    /// is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().map_err(config_error)?;

        if config_path.exists() {
            log::debug!("Loading config file {}", config_path.display());
            let path_str = config_path
                .to_str()
                .ok_or_else(|| Error::Config(String::from("config path contains invalid UTF-8")))?;
            builder.add_file(path_str).map_err(config_error)?;
        }

        let env_opts = env::Options::with_top_level("ocmeta");
        builder.add_env(env_opts).map_err(config_error)?;

        builder.build().map_err(config_error)
    }

    /// Apply command-line values on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(
        mut self,
        root: Option<PathBuf>,
        bun: Option<PathBuf>,
        project_dir: Option<PathBuf>,
    ) -> Self {
        if root.is_some() {
            self.root = root;
        }
        if bun.is_some() {
            self.bun = bun;
        }
        if project_dir.is_some() {
            self.project_dir = project_dir;
        }
        self
    }

    /// The metadata root, falling back to the default location.
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(paths::default_root)
    }

    /// The child's working directory, falling back to the install location.
    pub fn project_dir(&self) -> Result<PathBuf> {
        match &self.project_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_project_dir(),
        }
    }

    /// Render the effective configuration, defaults filled in, as TOML.
    pub fn to_toml(&self) -> Result<String> {
        let effective = Self {
            root: Some(self.root()),
            bun: self.bun.clone(),
            project_dir: Some(self.project_dir()?),
        };
        toml::to_string_pretty(&effective).map_err(config_error)
    }
}

fn config_error(e: impl std::fmt::Display) -> Error {
    Error::Config(e.to_string())
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/ocmeta/config.toml
/// - macOS: ~/Library/Application Support/ocmeta/config.toml
/// - Windows: %APPDATA%\ocmeta\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ocmeta")
        .join("config.toml")
}
