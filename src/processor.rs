//! Per-row validation, normalization and deduplication.

use std::ops::RangeInclusive;

use foldhash::{HashSet, HashSetExt};

use crate::detect::ColumnMap;
use crate::field::Field;
use crate::report::{CleanStats, LogEntry, LogMessage};
use crate::row::Row;
use crate::validate::{is_valid_email, is_valid_url, normalize_date, normalize_phone_within};

/// Header substrings that mark a column as URL-like.
pub const DEFAULT_URL_KEYWORDS: [&str; 5] = ["url", "link", "website", "photo", "profile"];

/// Composite identity used to suppress duplicate records.
///
/// Lowercased name plus the lowercased email, or the normalized phone when
/// the email is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    name: String,
    contact: String,
}

impl DedupKey {
    /// Build the key from a trimmed name, trimmed email and normalized phone.
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        let contact = if email.is_empty() {
            phone.to_string()
        } else {
            email.to_lowercase()
        };
        Self {
            name: name.to_lowercase(),
            contact,
        }
    }
}

/// Why a row was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The name column was empty or absent.
    MissingName,
    /// The email was non-empty and malformed.
    InvalidEmail,
}

impl From<Rejection> for LogMessage {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MissingName => LogMessage::MissingName,
            Rejection::InvalidEmail => LogMessage::InvalidEmail,
        }
    }
}

/// Outcome of processing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row passed every gate and carries its normalized fields.
    Kept(Row),
    /// The row was rejected and logged.
    Rejected(Rejection),
    /// The row repeated an earlier dedup key and was dropped without a log entry.
    Duplicate,
}

/// Mutable state shared by every row of one dataset.
#[derive(Debug, Default)]
pub struct CleanState {
    seen: HashSet<DedupKey>,
    /// Log entries in encounter order.
    pub logs: Vec<LogEntry>,
    /// Running counts.
    pub stats: CleanStats,
}

impl CleanState {
    /// Create empty state for a new dataset.
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            logs: Vec::new(),
            stats: CleanStats::default(),
        }
    }

    /// Number of distinct keys seen so far.
    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    fn log(&mut self, index: usize, message: LogMessage) {
        tracing::trace!(row = index, %message, "row logged");
        if message.is_rejection() {
            self.stats.rejected += 1;
        }
        self.logs.push(LogEntry::row(index, message));
    }
}

/// Applies the validation pipeline to individual rows.
#[derive(Debug, Clone)]
pub struct RowProcessor<'a> {
    columns: &'a ColumnMap,
    url_keywords: &'a [String],
    phone_digits: RangeInclusive<usize>,
}

impl<'a> RowProcessor<'a> {
    /// Create a processor for a dataset's column map.
    pub fn new(
        columns: &'a ColumnMap,
        url_keywords: &'a [String],
        phone_digits: RangeInclusive<usize>,
    ) -> Self {
        Self {
            columns,
            url_keywords,
            phone_digits,
        }
    }

    fn extract<'r>(&self, row: &'r Row, field: Field) -> &'r str {
        self.columns
            .get(field)
            .map_or("", |header| row.get_or_empty(header))
    }

    fn is_url_column(&self, header: &str) -> bool {
        let lower = header.to_lowercase();
        self.url_keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Process one row. `index` is the 1-indexed data row number.
    ///
    /// Gates run in order: missing name, invalid email, URL cleanup
    /// (non-fatal), duplicate suppression. Rejections and cleared URLs are
    /// appended to `state.logs`; duplicates are not logged.
    pub fn process(&self, mut row: Row, index: usize, state: &mut CleanState) -> RowOutcome {
        state.stats.total += 1;

        let name = self.extract(&row, Field::Name).trim().to_string();
        if name.is_empty() {
            return reject(state, index, Rejection::MissingName);
        }

        let email = self.extract(&row, Field::Email).trim().to_string();
        if !email.is_empty() && !is_valid_email(&email) {
            return reject(state, index, Rejection::InvalidEmail);
        }

        let phone = normalize_phone_within(self.extract(&row, Field::Phone), &self.phone_digits);
        let title = self.extract(&row, Field::Title).to_string();
        let date = normalize_date(self.extract(&row, Field::Date));

        let mut cleared = Vec::new();
        for (header, value) in row.iter_mut() {
            if self.is_url_column(header) && !is_valid_url(value) {
                value.clear();
                cleared.push(header.to_string());
            }
        }
        for header in cleared {
            state.stats.urls_cleared += 1;
            state.log(index, LogMessage::BadUrlCleaned(header));
        }

        if !state.seen.insert(DedupKey::new(&name, &email, &phone)) {
            tracing::trace!(row = index, "duplicate dropped");
            state.stats.duplicates += 1;
            return RowOutcome::Duplicate;
        }

        row.set(Field::Name.normalized_key(), name);
        row.set(Field::Email.normalized_key(), email);
        row.set(Field::Phone.normalized_key(), phone);
        row.set(Field::Title.normalized_key(), title);
        row.set(Field::Date.normalized_key(), date);

        state.stats.kept += 1;
        RowOutcome::Kept(row)
    }
}

fn reject(state: &mut CleanState, index: usize, rejection: Rejection) -> RowOutcome {
    state.log(index, rejection.into());
    RowOutcome::Rejected(rejection)
}
