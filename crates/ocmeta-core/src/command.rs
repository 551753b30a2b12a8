//! Building and running the child invocation.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::paths;
use crate::runtime;

/// Fixed arguments placed between the runtime and `--root`.
pub const RUN_ARGS: [&str; 3] = ["run", "tui", "--"];

/// Exit code reported when the child's status carries no code at all.
const FALLBACK_EXIT_CODE: i32 = 1;

/// A fully resolved child-process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl LaunchCommand {
    /// Build the invocation `<program> run tui -- --root <abs-root> <extra...>`.
    ///
    /// `root` has `~` expanded and is made absolute. A single leading `--`
    /// in `extra` is dropped; anything after it is forwarded as-is.
    pub fn build(
        program: PathBuf,
        root: &Path,
        extra: Vec<OsString>,
        cwd: PathBuf,
    ) -> Result<Self> {
        let root = paths::absolute_root(root)?;

        let mut args: Vec<OsString> = RUN_ARGS.iter().map(OsString::from).collect();
        args.push(OsString::from("--root"));
        args.push(root.into_os_string());
        args.extend(strip_separator(extra));

        Ok(Self { program, args, cwd })
    }

    /// Resolve the runtime and project directory from `config` and build
    /// the invocation.
    pub fn from_config(config: &Config, extra: Vec<OsString>) -> Result<Self> {
        let program = runtime::resolve_runtime(config.bun.as_deref())?;
        let cwd = config.project_dir()?;
        Self::build(program, &config.root(), extra, cwd)
    }

    /// The program followed by its arguments.
    pub fn argv(&self) -> Vec<&OsStr> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .collect()
    }

    /// Arguments after `--root <path>`.
    pub fn trailing_args(&self) -> &[OsString] {
        let fixed = RUN_ARGS.len() + 2;
        self.args.get(fixed..).unwrap_or_default()
    }

    /// Run the child with inherited stdio and wait for it to exit.
    ///
    /// Returns the child's exit code unchanged.
    pub fn run(&self) -> Result<i32> {
        log::info!("Launching {} in {}", self, self.cwd.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        log::debug!("Child exited with {}", status);
        Ok(exit_code(status))
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write_quoted(f, &arg.to_string_lossy())?;
        }
        Ok(())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, arg: &str) -> fmt::Result {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@+%".contains(c));
    if plain {
        f.write_str(arg)
    } else {
        write!(f, "'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Drop one leading bare `--` from the pass-through arguments.
pub fn strip_separator(mut extra: Vec<OsString>) -> Vec<OsString> {
    if extra.first().is_some_and(|first| first == "--") {
        extra.remove(0);
    }
    extra
}

/// Map a child's exit status to this process's exit code.
///
/// A child killed by a signal on Unix reports `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    FALLBACK_EXIT_CODE
}
