use std::fmt;

use crate::model::CatalogSide;

#[derive(Debug)]
pub enum CheckError {
    /// Input CSV path does not exist.
    NotFound { path: String },
    /// Required column absent from a catalog's header row.
    MissingColumn { catalog: CatalogSide, column: String },
    /// Malformed CSV (unbalanced quotes, invalid UTF-8, ...).
    Csv { path: String, message: String },
    /// Read or write failure on a path that exists.
    Io { path: String, message: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty column name, empty marker, ...).
    ConfigValidation(String),
}

impl CheckError {
    pub(crate) fn io(path: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::Io { path: path.to_string(), message: err.to_string() }
    }

    pub(crate) fn csv(path: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::Csv { path: path.to_string(), message: err.to_string() }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "File not found: {path}"),
            Self::MissingColumn { catalog, column } => {
                write!(f, "Failed to find column: '{column}' ({catalog} csv)")
            }
            Self::Csv { path, message } => write!(f, "cannot parse {path}: {message}"),
            Self::Io { path, message } => write!(f, "IO error on {path}: {message}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for CheckError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = CheckError::NotFound { path: "/tmp/master.csv".into() };
        assert_eq!(err.to_string(), "File not found: /tmp/master.csv");

        let err = CheckError::MissingColumn { catalog: CatalogSide::Lto, column: "Media".into() };
        assert_eq!(err.to_string(), "Failed to find column: 'Media' (lto csv)");
    }
}
