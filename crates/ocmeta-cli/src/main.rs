use anyhow::{Context, Result};
use clap::Parser;
use ocmeta_core::{config, Config, LaunchCommand};
use std::ffi::OsString;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  ocmeta
    Launch the TUI using the default metadata root.

  ocmeta --root /tmp/opencode
    Launch the TUI against a different storage directory.

  ocmeta -- --help
    Show the TUI's built-in CLI help output.
";

/// Open the interactive OpenCode metadata manager TUI
#[derive(Debug, Parser)]
#[command(name = "ocmeta", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Metadata root to inspect (default: ~/.local/share/opencode)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Path to the bun executable if it's not on PATH
    #[arg(long)]
    bun: Option<PathBuf>,

    /// Directory holding the TUI project (default: directory of this executable)
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Config file to read (default: ~/.config/ocmeta/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the command that would be run instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long, conflicts_with = "dry_run")]
    print_config: bool,

    /// Additional arguments forwarded to the TUI after '--'
    ///
    /// For example: ocmeta -- --help
    #[arg(trailing_var_arg = true, value_name = "TUI_ARGS")]
    tui_args: Vec<OsString>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = parse_command_line(std::env::args_os().collect()).unwrap_or_else(|e| e.exit());
    let code = run(cli)?;
    log::debug!("Exiting with {}", code);
    std::process::exit(code);
}

/// Parse the raw argv, keeping the first bare `--` and everything after it
/// out of clap's hands so the separator reaches the pass-through list intact.
fn parse_command_line(raw: Vec<OsString>) -> Result<Cli, clap::Error> {
    let (head, remainder) = split_remainder(raw);
    let mut cli = Cli::try_parse_from(head)?;
    cli.tui_args.extend(remainder);
    Ok(cli)
}

/// Split at the first bare `--`; the separator stays with the remainder.
fn split_remainder(mut args: Vec<OsString>) -> (Vec<OsString>, Vec<OsString>) {
    match args.iter().skip(1).position(|a| a == "--") {
        Some(pos) => {
            let remainder = args.split_off(pos + 1);
            (args, remainder)
        }
        None => (args, Vec::new()),
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config.unwrap_or_else(config::config_file_path);
    log::debug!("Using config file {}", config_path.display());
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?
        .with_overrides(cli.root, cli.bun, cli.project_dir);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(0);
    }

    let command = LaunchCommand::from_config(&config, cli.tui_args)?;

    if cli.dry_run {
        println!("{}", command);
        return Ok(0);
    }

    Ok(command.run()?)
}
