use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::detect::ColumnMap;
use crate::row::Row;

/// Reason recorded in the rejection log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMessage {
    /// The input had no parsable header row.
    EmptyInput,
    /// The row had no value for the name column. The row was rejected.
    MissingName,
    /// The row had a non-empty, malformed email. The row was rejected.
    InvalidEmail,
    /// A URL-like column held an invalid value that was cleared.
    BadUrlCleaned(String),
}

impl LogMessage {
    /// Returns true if the row was excluded from the output.
    pub fn is_rejection(&self) -> bool {
        matches!(self, LogMessage::MissingName | LogMessage::InvalidEmail)
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::EmptyInput => write!(f, "Empty or invalid CSV"),
            LogMessage::MissingName => write!(f, "missing name"),
            LogMessage::InvalidEmail => write!(f, "invalid email"),
            LogMessage::BadUrlCleaned(header) => write!(f, "bad url cleaned ({header})"),
        }
    }
}

/// One line of the rejection log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// 1-indexed data row, or `None` for dataset-level messages.
    pub row: Option<usize>,
    /// What happened.
    pub message: LogMessage,
}

impl LogEntry {
    /// Create a row-level entry.
    pub const fn row(row: usize, message: LogMessage) -> Self {
        Self {
            row: Some(row),
            message,
        }
    }

    /// Create a dataset-level entry.
    pub const fn dataset(message: LogMessage) -> Self {
        Self { row: None, message }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "Row {row}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Row counts for a cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Data rows read.
    pub total: usize,
    /// Rows written to the output.
    pub kept: usize,
    /// Rows rejected for a missing name or invalid email.
    pub rejected: usize,
    /// Rows silently dropped as duplicates.
    pub duplicates: usize,
    /// URL-like cells cleared.
    pub urls_cleared: usize,
}

/// Result of cleaning one dataset.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    /// Kept rows in input order.
    pub rows: Vec<Row>,
    /// Union of input headers and normalized columns, sorted ascending.
    pub headers: Vec<String>,
    /// Rejection and warning log in encounter order.
    pub logs: Vec<LogEntry>,
    /// Column bindings used for this dataset.
    pub columns: ColumnMap,
    /// Row counts.
    pub stats: CleanStats,
}

impl CleanReport {
    /// Report for input without a usable header row.
    pub fn empty_input() -> Self {
        Self {
            logs: vec![LogEntry::dataset(LogMessage::EmptyInput)],
            ..Default::default()
        }
    }

    /// Log lines as displayed in the log file.
    pub fn log_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.logs.iter().map(ToString::to_string)
    }

    /// Returns true if no rows were kept.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the sorted output header list.
pub(crate) fn sorted_headers<'a, I>(input: I, extra: &[&'a str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    input
        .into_iter()
        .filter(|h| !h.is_empty())
        .chain(extra.iter().copied())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
