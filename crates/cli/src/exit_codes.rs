//! CLI Exit Code Registry
//!
//! Single source of truth for `ltocheck` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success (or mismatches found without `--strict`)         |
//! | 1    | Mismatches or missing files found (`--strict` only)      |
//! | 2    | Usage / config error                                     |
//! | 3    | Input CSV not found                                      |
//! | 4    | Input CSV unreadable as a catalog (missing column, bad CSV) |
//! | 5    | IO error (report destination not writable, read failure) |
//! | 130  | Interrupted (SIGINT); report rows already flushed stay   |

use ltocheck_recon::CheckError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Catalogs differ. Only returned under `--strict`.
pub const EXIT_CHECK_MISMATCH: u8 = 1;

/// Usage error - bad arguments, invalid `--config`.
pub const EXIT_USAGE: u8 = 2;

/// An input CSV path does not exist.
pub const EXIT_INPUT_NOT_FOUND: u8 = 3;

/// Required column absent, or malformed CSV.
pub const EXIT_SCHEMA: u8 = 4;

/// Read/write failure.
pub const EXIT_IO: u8 = 5;

/// Run aborted by the user (128 + SIGINT).
pub const EXIT_INTERRUPTED: u8 = 130;

/// Map an engine error to its exit code.
pub fn check_exit_code(err: &CheckError) -> u8 {
    match err {
        CheckError::NotFound { .. } => EXIT_INPUT_NOT_FOUND,
        CheckError::MissingColumn { .. } | CheckError::Csv { .. } => EXIT_SCHEMA,
        CheckError::Io { .. } => EXIT_IO,
        CheckError::ConfigParse(_) | CheckError::ConfigValidation(_) => EXIT_USAGE,
    }
}
