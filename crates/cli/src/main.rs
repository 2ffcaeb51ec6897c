// ltocheck CLI - verify a master media catalog against an LTO archive catalog

mod check;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use exit_codes::{check_exit_code, EXIT_INTERRUPTED, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "ltocheck")]
#[command(about = "Compare a master media catalog CSV with an LTO catalog CSV")]
#[command(version)]
#[command(long_version = long_version())]
#[command(after_help = "\
Examples:
  ltocheck master.csv lto.csv
  ltocheck master.csv lto.csv -v
  ltocheck master.csv lto.csv -d reports -o day01.csv
  ltocheck master.csv lto.csv --json --no-report
  ltocheck master.csv lto.csv --config columns.toml --strict")]
pub struct Cli {
    /// Master catalog CSV (Name, Frames, File Size, MD5)
    pub master: PathBuf,

    /// LTO catalog CSV (Name, Frames, Size, MD5, Path, Media)
    pub lto: PathBuf,

    /// Output directory for the CSV report
    #[arg(long, short = 'd', default_value = ".")]
    pub out_path: PathBuf,

    /// Output filename [default: lto_check_report_<YYYY-MM-DD_HHMM>.csv]
    #[arg(long, short = 'o')]
    pub out_name: Option<String>,

    /// Print the per-file table (-v), plus diagnostics (-vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// TOML file overriding column names, path marker and frame filter
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Print the full result as JSON on stdout (summary goes to stderr)
    #[arg(long)]
    pub json: bool,

    /// Do not write the CSV report
    #[arg(long)]
    pub no_report: bool,

    /// Exit 1 when any file is mismatched or missing from tape
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ltocheck_recon::CheckError> for CliError {
    fn from(err: ltocheck_recon::CheckError) -> Self {
        use ltocheck_recon::CheckError;

        let hint = match &err {
            CheckError::MissingColumn { .. } => {
                Some("check the CSV header row, or map column names with --config".to_string())
            }
            CheckError::Io { .. } => Some("check that the output directory exists and is writable".to_string()),
            _ => None,
        };
        Self { code: check_exit_code(&err), message: err.to_string(), hint }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  ltocheck-recon ", env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(verbose: u8) {
    let level = if verbose >= 2 { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Ctrl-C aborts the whole run; the writer flushes after every batch.
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        eprintln!("Exiting...");
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    });
    if let Err(e) = installed {
        log::warn!("cannot install Ctrl-C handler: {e}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    install_interrupt_handler();
    log::debug!("Starting LTO check (verbosity {})", cli.verbose);

    match check::cmd_check(&cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
