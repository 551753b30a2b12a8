//! Locating the Bun runtime.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Executable name searched for on `PATH` when no override is given.
pub const RUNTIME_NAME: &str = "bun";

/// Resolve the runtime executable.
///
/// An explicit path is returned verbatim, without checking that it exists.
/// Otherwise `PATH` is searched for [`RUNTIME_NAME`].
pub fn resolve_runtime(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
    resolve_runtime_in(explicit, std::env::var_os("PATH"), &cwd)
}

/// Resolve the runtime executable against an explicit search path.
///
/// Lookup follows the host platform's conventions: the first match wins
/// and, on Windows, `PATHEXT` extensions are tried.
pub fn resolve_runtime_in<P: AsRef<OsStr>>(
    explicit: Option<&Path>,
    search_path: Option<P>,
    cwd: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        log::debug!("Using explicit runtime {}", path.display());
        return Ok(path.to_path_buf());
    }

    match which::which_in(RUNTIME_NAME, search_path, cwd) {
        Ok(path) => {
            log::debug!("Found {} at {}", RUNTIME_NAME, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} lookup failed: {}", RUNTIME_NAME, e);
            Err(Error::RuntimeNotFound { name: RUNTIME_NAME })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_is_verbatim() {
        let temp = TempDir::new().unwrap();
        let explicit = PathBuf::from("relative/not-there/bun");
        let resolved = resolve_runtime_in(
            Some(explicit.as_path()),
            Some(temp.path().as_os_str()),
            temp.path(),
        )
        .unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn test_not_found_on_empty_search_path() {
        let temp = TempDir::new().unwrap();
        let result = resolve_runtime_in(None, Some(temp.path().as_os_str()), temp.path());
        assert!(matches!(result, Err(Error::RuntimeNotFound { name: "bun" })));
    }

    #[cfg(unix)]
    #[test]
    fn test_first_match_wins() {
        use std::os::unix::fs::PermissionsExt;

        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for dir in [&first, &second] {
            let bin = dir.path().join(RUNTIME_NAME);
            std::fs::write(&bin, "#!/bin/sh\nexit 0\n").unwrap();
            std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let search: OsString =
            std::env::join_paths([first.path(), second.path()]).unwrap();
        let resolved = resolve_runtime_in(None, Some(search), first.path()).unwrap();
        assert_eq!(resolved, first.path().join(RUNTIME_NAME));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(RUNTIME_NAME), "not a program").unwrap();
        let result = resolve_runtime_in(None, Some(temp.path().as_os_str()), temp.path());
        assert!(matches!(result, Err(Error::RuntimeNotFound { .. })));
    }
}
