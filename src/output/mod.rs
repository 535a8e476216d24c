//! Plain-text report builders.
//!
//! Both reports are pure functions of an [`Aggregation`](crate::aggregation::Aggregation)
//! and a [`ReportContext`]; writing them out is the caller's job. Line layout
//! is kept stable because other tools parse these logs.

pub mod conflicts;
pub mod inventory;

pub use conflicts::build_conflict_report;
pub use inventory::build_inventory_report;

use chrono::{DateTime, Local};

/// Default file name of the inventory report.
pub const INVENTORY_FILE_NAME: &str = "AllHarmonyPatches.txt";
/// Default file name of the conflict report.
pub const CONFLICTS_FILE_NAME: &str = "DuplicateHarmonyPatches.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILTER_NOTE: &str = "Note: Common lifecycle method patches are excluded from this scan.";

/// Scan-wide facts printed in report headers.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub scan_time: DateTime<Local>,
    pub filter_enabled: bool,
}

impl ReportContext {
    pub fn new(scan_time: DateTime<Local>, filter_enabled: bool) -> Self {
        Self {
            scan_time,
            filter_enabled,
        }
    }

    /// Context stamped with the current local time.
    pub fn now(filter_enabled: bool) -> Self {
        Self::new(Local::now(), filter_enabled)
    }

    pub fn formatted_time(&self) -> String {
        self.scan_time.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Line-oriented text accumulator.
#[derive(Debug, Default)]
pub(crate) struct TextReport {
    buffer: String,
}

impl TextReport {
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Shared header: title, scan time, optional filter note.
    pub(crate) fn header(&mut self, title: &str, context: &ReportContext, notes: &[&str]) {
        self.line(title)
            .line(format!("Scan Time: {}", context.formatted_time()))
            .blank();
        if !notes.is_empty() {
            for note in notes {
                self.line(note);
            }
            self.blank();
        }
        if context.filter_enabled {
            self.line(FILTER_NOTE).blank();
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_with_filter_note() {
        let time = Local.with_ymd_and_hms(2026, 10, 19, 14, 5, 9).unwrap();
        let mut report = TextReport::default();
        report.header("=== Title ===", &ReportContext::new(time, true), &[]);
        assert_eq!(
            report.finish(),
            "=== Title ===\nScan Time: 2026-10-19 14:05:09\n\n\
             Note: Common lifecycle method patches are excluded from this scan.\n\n"
        );
    }

    #[test]
    fn test_header_with_notes_and_no_filter() {
        let time = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let mut report = TextReport::default();
        report.header("T", &ReportContext::new(time, false), &["a", "b"]);
        assert_eq!(report.finish(), "T\nScan Time: 2026-01-02 03:04:05\n\na\nb\n\n");
    }
}
