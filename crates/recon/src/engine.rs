use std::path::Path;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::loader::{load_lto, load_master};
use crate::matcher::compare;
use crate::model::{Catalog, CheckOutcome, RunSummary};

/// Load both catalogs and compare them.
pub fn check(master_path: &Path, lto_path: &Path, config: &CheckConfig) -> Result<CheckOutcome, CheckError> {
    let master = load_master(master_path, config)?;
    let lto = load_lto(lto_path, config)?;
    Ok(run(&master, &lto))
}

/// Compare two already-loaded catalogs.
pub fn run(master: &Catalog, lto: &Catalog) -> CheckOutcome {
    log::debug!(
        "Comparing {} master files against {} LTO files",
        master.count(),
        lto.count()
    );
    let output = compare(&master.records, &lto.records);
    let summary = RunSummary::new(master.count(), lto.count(), output.counts);
    log::debug!(
        "{} matched, {} mismatch reasons, {} not found",
        summary.matched,
        summary.non_matched,
        summary.not_found
    );

    CheckOutcome { summary, results: output.results }
}
