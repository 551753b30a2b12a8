//! Default locations and path normalization for the launcher.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Get the default metadata root.
///
/// Returns: ~/.local/share/opencode on every platform, since that is where
/// OpenCode itself keeps its storage.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("opencode")
}

/// Get the default project directory: the directory holding the running
/// executable.
pub fn default_project_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(Error::InstallDir)?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::InstallDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })
}

/// Expand a leading `~` and make the path absolute against the process's
/// current directory.
pub fn absolute_root(path: &Path) -> Result<PathBuf> {
    let home = dirs::home_dir();
    let expanded = expand_home(path, home.as_deref())?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
    Ok(cwd.join(expanded))
}

/// Replace a leading `~` component with `home`.
///
/// Only the bare `~` form is expanded; `~user` is left untouched.
pub fn expand_home(path: &Path, home: Option<&Path>) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = home.ok_or(Error::NoHomeDir)?;
            if rest.as_os_str().is_empty() {
                Ok(home.to_path_buf())
            } else {
                Ok(home.join(rest))
            }
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_ends_with_opencode() {
        let root = default_root();
        assert!(root.ends_with(".local/share/opencode"));
    }

    #[test]
    fn test_expand_home_bare_tilde() {
        let home = Path::new("/home/ada");
        let expanded = expand_home(Path::new("~"), Some(home)).unwrap();
        assert_eq!(expanded, PathBuf::from("/home/ada"));
    }

    #[test]
    fn test_expand_home_nested() {
        let home = Path::new("/home/ada");
        let expanded = expand_home(Path::new("~/.local/share/opencode"), Some(home)).unwrap();
        assert_eq!(expanded, PathBuf::from("/home/ada/.local/share/opencode"));
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        let home = Path::new("/home/ada");
        assert_eq!(
            expand_home(Path::new("/tmp/opencode"), Some(home)).unwrap(),
            PathBuf::from("/tmp/opencode")
        );
        assert_eq!(
            expand_home(Path::new("~bob/data"), Some(home)).unwrap(),
            PathBuf::from("~bob/data")
        );
        assert_eq!(
            expand_home(Path::new("data/~"), Some(home)).unwrap(),
            PathBuf::from("data/~")
        );
    }

    #[test]
    fn test_expand_home_without_home_dir() {
        let result = expand_home(Path::new("~/data"), None);
        assert!(matches!(result, Err(Error::NoHomeDir)));
    }

    #[test]
    fn test_absolute_root_relative_path() {
        let root = absolute_root(Path::new("meta")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("meta"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_root_keeps_absolute_path() {
        let root = absolute_root(Path::new("/tmp/opencode")).unwrap();
        assert_eq!(root, PathBuf::from("/tmp/opencode"));
    }

    #[test]
    fn test_default_project_dir_exists() {
        let dir = default_project_dir().unwrap();
        assert!(dir.is_dir());
    }
}
