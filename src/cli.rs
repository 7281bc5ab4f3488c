//! Command-line interface for callmap.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::report;
use crate::scan::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Map every function call in a C tree and classify it as internal or
/// external.
///
/// A call is internal when some file in the tree defines a function of the
/// same name, and external otherwise (libc, other libraries, macros).
#[derive(Parser, Debug)]
#[command(name = "callmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover in PATH)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Additional directory name to skip (repeatable)
    #[arg(short, long = "ignore", value_name = "DIR")]
    pub ignore: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over
/// `-v`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the explicit config, a discovered one, or the defaults.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => Config::discover(&cli.path),
    };

    let config = match path {
        Some(p) => {
            tracing::debug!(config = %p.display(), "loading config");
            Config::parse_file(&p)?
        }
        None => Config::default(),
    };

    Ok(config.with_ignored_dirs(cli.ignore.iter().cloned()))
}

/// Run a scan.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    // Validate format
    if cli.format != "pretty" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Check path exists
    if let Err(e) = std::fs::metadata(&cli.path) {
        eprintln!("Error: cannot access path {:?}: {}", cli.path, e);
        return Ok(EXIT_ERROR);
    }

    let config = load_config(cli)?;
    config.validate()?;

    let report = Runner::with_config(&cli.path, &config).run()?;

    let path_str = cli.path.to_string_lossy().to_string();
    match cli.format.as_str() {
        "json" => report::write_json(&path_str, &report)?,
        _ => report::write_pretty(&report)?,
    }

    Ok(EXIT_SUCCESS)
}
