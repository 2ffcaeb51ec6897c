use serde::Deserialize;

use crate::error::CheckError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Column names, filters and markers used to read both catalogs.
///
/// Every field has a default matching the stock master / LTO exports, so an
/// empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckConfig {
    #[serde(default)]
    pub master: MasterConfig,
    #[serde(default)]
    pub lto: LtoConfig,
    #[serde(default)]
    pub filter: FrameFilter,
}

// ---------------------------------------------------------------------------
// Master catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MasterConfig {
    #[serde(default)]
    pub columns: MasterColumns,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MasterColumns {
    pub name: String,
    pub frames: String,
    pub size: String,
    pub md5: String,
}

impl Default for MasterColumns {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            frames: "Frames".into(),
            size: "File Size".into(),
            md5: "MD5".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LTO catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LtoConfig {
    #[serde(default)]
    pub columns: LtoColumns,
    /// Substring a row's path must contain to count as camera original.
    #[serde(default = "default_path_marker")]
    pub path_marker: String,
}

impl Default for LtoConfig {
    fn default() -> Self {
        Self {
            columns: LtoColumns::default(),
            path_marker: default_path_marker(),
        }
    }
}

fn default_path_marker() -> String {
    "CAMERA_MASTER".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LtoColumns {
    pub name: String,
    pub frames: String,
    pub size: String,
    pub md5: String,
    pub path: String,
    pub media: String,
}

impl Default for LtoColumns {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            frames: "Frames".into(),
            size: "Size".into(),
            md5: "MD5".into(),
            path: "Path".into(),
            media: "Media".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Rows whose frame cell equals one of these values are not video and are
/// dropped from both catalogs. Comparison is exact and untrimmed.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameFilter {
    #[serde(default = "default_excluded_frames")]
    pub excluded_frames: Vec<String>,
}

impl Default for FrameFilter {
    fn default() -> Self {
        Self { excluded_frames: default_excluded_frames() }
    }
}

fn default_excluded_frames() -> Vec<String> {
    vec![String::new(), "1".into()]
}

impl FrameFilter {
    pub fn excludes(&self, frames: &str) -> bool {
        self.excluded_frames.iter().any(|v| v == frames)
    }
}

// ---------------------------------------------------------------------------
// Parsing + validation
// ---------------------------------------------------------------------------

impl CheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, CheckError> {
        let config: CheckConfig =
            toml::from_str(input).map_err(|e| CheckError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        let m = &self.master.columns;
        let l = &self.lto.columns;
        let columns = [
            ("master.columns.name", &m.name),
            ("master.columns.frames", &m.frames),
            ("master.columns.size", &m.size),
            ("master.columns.md5", &m.md5),
            ("lto.columns.name", &l.name),
            ("lto.columns.frames", &l.frames),
            ("lto.columns.size", &l.size),
            ("lto.columns.md5", &l.md5),
            ("lto.columns.path", &l.path),
            ("lto.columns.media", &l.media),
        ];
        for (key, value) in columns {
            if value.trim().is_empty() {
                return Err(CheckError::ConfigValidation(format!("{key} must not be empty")));
            }
        }

        if self.lto.path_marker.is_empty() {
            return Err(CheckError::ConfigValidation(
                "lto.path_marker must not be empty".into(),
            ));
        }

        Ok(())
    }
}
