//! cssmap - lists stylesheets whose renamed counterpart is missing
//!
//! Thin CLI over the cssmap-core library: resolves the roots from flags,
//! environment, config file and defaults, runs the audit, and prints the
//! report on stdout. Logs and errors go to stderr.

use std::{
    io,
    path::PathBuf,
    process,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use colored::Colorize;
use cssmap_core::{
    AuditConfig,
    OutputFormat,
    run_audit,
    write_report,
};
use tracing::{
    Level,
    debug,
};
use tracing_subscriber::{
    EnvFilter,
    FmtSubscriber,
};

/// Report stylesheets from a source tree that have no renamed counterpart in a target tree
#[derive(Parser, Debug)]
#[command(name = "cssmap")]
#[command(
    version,
    about = "Report stylesheets whose renamed counterpart is missing from a target tree",
    long_about = "
Report stylesheets whose renamed counterpart is missing from a target tree

Every file ending in .css (any case) under the source root has its relative
path rewritten with the rename rules, in order:

  ArguAdmin -> DebateAdmin
  ArguUser  -> DebateUser
  argu      -> debate
  Argu      -> Debate

and is reported when the rewritten path does not exist under the target root.

Examples:
  cssmap --source ./Argu --target ./Debate
  CSSMAP_SOURCE=./Argu CSSMAP_TARGET=./Debate cssmap
  cssmap --config cssmap.toml --output json
"
)]
struct Cli {
    /// Source root to walk [default: D:/vs/Argu]
    #[arg(long, short, env = "CSSMAP_SOURCE")]
    source: Option<PathBuf>,

    /// Target root the renamed paths are checked against [default: D:/vs/Debate]
    #[arg(long, short, env = "CSSMAP_TARGET")]
    target: Option<PathBuf>,

    /// TOML config file (source_root, target_root, extension, [[rules]])
    #[arg(long, short, env = "CSSMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Output format for the report
    #[arg(long, value_enum, default_value = "human")]
    output: OutputFormatArg,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,

    /// Logging level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(
        long,
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormatArg {
    /// Missing count followed by one `source -> candidate` line per file
    Human,
    /// JSON object for tooling
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        cli.log_level
            .parse::<Level>()
            .with_context(|| format!("Invalid log level '{}'", cli.log_level))?
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global default tracing subscriber")
}

fn run(cli: &Cli) -> Result<()> {
    let config = AuditConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_source_root(cli.source.clone())
        .with_target_root(cli.target.clone());
    debug!(?config, "Resolved configuration");

    let report = run_audit(&config).context("Audit failed")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, &report, cli.output.into()).context("Failed to write report")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        process::exit(1);
    }
}
