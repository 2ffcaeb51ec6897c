//! `ltocheck` — load both catalogs, compare, print, write the report.

use std::path::Path;

use ltocheck_recon::writer::default_report_name;
use ltocheck_recon::{CheckConfig, CheckOutcome, ReportBuilder, ReportWriter};

use crate::exit_codes::{EXIT_CHECK_MISMATCH, EXIT_IO};
use crate::{Cli, CliError};

pub fn cmd_check(cli: &Cli) -> Result<(), CliError> {
    log::debug!(
        "Args detected: master={} lto={} out_path={} out_name={:?} verbose={}",
        cli.master.display(),
        cli.lto.display(),
        cli.out_path.display(),
        cli.out_name,
        cli.verbose,
    );

    let config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => CheckConfig::default(),
    };

    let outcome = ltocheck_recon::check(&cli.master, &cli.lto, &config)?;

    // Table goes to stdout, so keep it out of --json output
    if cli.verbose >= 1 && !cli.json {
        let mut table = ReportBuilder::new();
        for result in &outcome.results {
            println!("{}", table.render_row(result));
        }
    }

    if !cli.no_report {
        let name = cli
            .out_name
            .clone()
            .unwrap_or_else(|| default_report_name(&chrono::Local::now()));
        let path = cli.out_path.join(name);
        let mut writer = ReportWriter::append(&path)?;
        let written = writer.write(&outcome.results)?;
        eprintln!("wrote {} rows to {}", written, path.display());
    }

    print_outcome(&outcome, cli.json)?;

    if cli.strict && !outcome.summary.is_clean() {
        return Err(CliError::new(EXIT_CHECK_MISMATCH, "mismatches found"));
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<CheckConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| {
            CliError::args(format!("cannot read config {}: {e}", path.display()))
                .with_hint("--config expects a TOML file with [master.columns] / [lto.columns] tables")
        })?;
    let config = CheckConfig::from_toml(&config_str)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn print_outcome(outcome: &CheckOutcome, json: bool) -> Result<(), CliError> {
    if json {
        let json_str = serde_json::to_string_pretty(outcome)
            .map_err(|e| CliError::new(EXIT_IO, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        eprintln!("{}", outcome.summary_text());
    } else {
        println!("\n{}", outcome.summary_text());
    }
    Ok(())
}
