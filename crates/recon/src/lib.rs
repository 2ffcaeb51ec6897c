//! `ltocheck-recon` — master vs. LTO catalog reconciliation engine.
//!
//! Loads the two CSV inventories, matches master files against tape
//! entries by name, and renders the summary and detail report.
//! No CLI dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod report;
pub mod writer;

pub use config::CheckConfig;
pub use engine::{check, run};
pub use error::CheckError;
pub use model::{
    Catalog, CatalogSide, CheckOutcome, ErrorReason, MatchCounts, MatchResult, MatchStatus,
    MediaRecord, RunSummary,
};
pub use report::{summarize, ReportBuilder};
pub use writer::{read_report, write_report, ReportRow, ReportWriter};
