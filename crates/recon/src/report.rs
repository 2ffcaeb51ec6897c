use crate::model::{MatchResult, RunSummary};

/// Five-line human summary, in fixed order, no trailing newline.
pub fn summarize(summary: &RunSummary) -> String {
    format!(
        "Total Video Files on Master: {}\n\
         Total Video Files on LTO: {}\n\
         Matches: {}\n\
         Non-Matches: {}\n\
         Not Found: {}",
        summary.total_master,
        summary.total_lto,
        summary.matched,
        summary.non_matched,
        summary.not_found,
    )
}

const RULE_WIDTH: usize = 98;

/// Console table for verbose runs.
///
/// The header block is emitted with the first row of a session only; a new
/// builder starts a new table.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    header_emitted: bool,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_emitted(&self) -> bool {
        self.header_emitted
    }

    /// Render one result, prefixed by the table header on first use.
    pub fn render_row(&mut self, result: &MatchResult) -> String {
        let mut out = String::new();
        if !self.header_emitted {
            out.push_str(&Self::header());
            out.push('\n');
            self.header_emitted = true;
        }

        let master = result.master();
        let (frames_lto, size_lto, tape) = match result.lto() {
            Some(lto) => (lto.frames.as_str(), lto.size.as_str(), lto.media.as_deref().unwrap_or("")),
            None => ("", "", ""),
        };

        out.push_str(&format!(
            "\t{:^6} | {:^24} {:^15} {:^15} {:^14} {:^14} {:^8}  |\t {}\n\t       |{:^w$}|",
            result.status().to_string(),
            master.name,
            master.frames,
            frames_lto,
            master.size,
            size_lto,
            tape,
            result.error_messages(),
            "",
            w = RULE_WIDTH,
        ));
        out
    }

    /// Render a whole result set as one table.
    pub fn render_all(&mut self, results: &[MatchResult]) -> String {
        results
            .iter()
            .map(|r| self.render_row(r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header() -> String {
        format!(
            "\n\t{:^6} | {:^24} {:^15} {:^15} {:^14} {:^14} {:^8}  |\n\t       |{:^w$}|",
            "STATUS",
            "FILENAME",
            "FRAMES_MASTER",
            "FRAMES_LTO",
            "SIZE_MASTER",
            "SIZE_LTO",
            "LTO_TAPE",
            "",
            w = RULE_WIDTH,
        )
    }
}
