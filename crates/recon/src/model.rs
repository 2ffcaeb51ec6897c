use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which catalog a record or error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSide {
    Master,
    Lto,
}

impl std::fmt::Display for CatalogSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Master => write!(f, "master"),
            Self::Lto => write!(f, "lto"),
        }
    }
}

/// A single normalized video asset from either catalog.
///
/// `frames` and `size` keep the exact text of the source cell so comparison
/// stays format-sensitive ("100" and "0100" differ).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    pub name: String,
    pub frames: String,
    pub size: String,
    pub md5: String,
    /// Tape / cartridge identifier. Only present on LTO records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl MediaRecord {
    pub fn md5_eq(&self, other: &MediaRecord) -> bool {
        self.md5.eq_ignore_ascii_case(&other.md5)
    }
}

/// Filtered, sorted records loaded from one CSV.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub side: CatalogSide,
    pub records: Vec<MediaRecord>,
    /// Data rows in the source file before filtering.
    pub rows_read: usize,
}

impl Catalog {
    /// Number of video files kept after filtering.
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Match,
    Error,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "MATCH"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    FrameCountMismatch,
    SizeMismatch,
    Md5Mismatch,
    FileNotFound,
}

impl ErrorReason {
    /// Label used in reports and the console table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrameCountMismatch => "FRAME COUNT MISMATCH",
            Self::SizeMismatch => "SIZE MISMATCH",
            Self::Md5Mismatch => "MD5 MISMATCH",
            Self::FileNotFound => "FILE NOT FOUND",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "FRAME COUNT MISMATCH" => Some(Self::FrameCountMismatch),
            "SIZE MISMATCH" => Some(Self::SizeMismatch),
            "MD5 MISMATCH" => Some(Self::Md5Mismatch),
            "FILE NOT FOUND" => Some(Self::FileNotFound),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one master record against one LTO record (or against none).
///
/// Fields are private so `status` is always `Error` exactly when `reasons`
/// is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    status: MatchStatus,
    reasons: Vec<ErrorReason>,
    master: MediaRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    lto: Option<MediaRecord>,
}

impl MatchResult {
    /// Compare a master record with a same-named LTO record.
    pub fn classify(master: &MediaRecord, lto: &MediaRecord) -> Self {
        let mut reasons = Vec::new();
        if master.frames != lto.frames {
            reasons.push(ErrorReason::FrameCountMismatch);
        }
        if master.size != lto.size {
            reasons.push(ErrorReason::SizeMismatch);
        }
        if !master.md5_eq(lto) {
            reasons.push(ErrorReason::Md5Mismatch);
        }
        let status = if reasons.is_empty() { MatchStatus::Match } else { MatchStatus::Error };
        Self { status, reasons, master: master.clone(), lto: Some(lto.clone()) }
    }

    /// A master record with no counterpart on tape.
    pub fn not_found(master: &MediaRecord) -> Self {
        Self {
            status: MatchStatus::Error,
            reasons: vec![ErrorReason::FileNotFound],
            master: master.clone(),
            lto: None,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn reasons(&self) -> &[ErrorReason] {
        &self.reasons
    }

    pub fn master(&self) -> &MediaRecord {
        &self.master
    }

    pub fn lto(&self) -> Option<&MediaRecord> {
        self.lto.as_ref()
    }

    pub fn is_match(&self) -> bool {
        self.status == MatchStatus::Match
    }

    /// `ERROR MESSAGES` cell text: each label followed by a space, tab-separated.
    pub fn error_messages(&self) -> String {
        self.reasons
            .iter()
            .map(|r| format!("{} ", r.label()))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    /// Fully matching pairings.
    pub matched: usize,
    /// Individual mismatch reasons, not rows.
    pub non_matched: usize,
    /// Master records with no same-named LTO record.
    pub not_found: usize,
}

#[derive(Debug, Clone)]
pub struct MatchOutput {
    pub counts: MatchCounts,
    pub results: Vec<MatchResult>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_master: usize,
    pub total_lto: usize,
    pub matched: usize,
    pub non_matched: usize,
    pub not_found: usize,
}

impl RunSummary {
    pub fn new(total_master: usize, total_lto: usize, counts: MatchCounts) -> Self {
        Self {
            total_master,
            total_lto,
            matched: counts.matched,
            non_matched: counts.non_matched,
            not_found: counts.not_found,
        }
    }

    /// True when every master file was found on tape with no mismatches.
    pub fn is_clean(&self) -> bool {
        self.non_matched == 0 && self.not_found == 0
    }
}

/// Everything a front end needs from one comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub summary: RunSummary,
    pub results: Vec<MatchResult>,
}

impl CheckOutcome {
    pub fn summary_text(&self) -> String {
        crate::report::summarize(&self.summary)
    }
}
