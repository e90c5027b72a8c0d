//! Main Cleaner builder and dataset driver.

use std::fs::File;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::Path;

use rayon::prelude::*;

use crate::alias::AliasTable;
use crate::detect::{ColumnMap, detect_columns};
use crate::encoding::decode_input;
use crate::error::{CleanError, Result};
use crate::field::NORMALIZED_KEYS;
use crate::processor::{CleanState, DEFAULT_URL_KEYWORDS, RowOutcome, RowProcessor};
use crate::report::{CleanReport, sorted_headers};
use crate::row::Row;
use crate::validate::PHONE_DIGITS;

/// Schema-agnostic CSV cleaner.
///
/// # Example
///
/// ```no_run
/// use csv_cleanse::Cleaner;
///
/// let mut cleaner = Cleaner::new();
/// cleaner.delimiter(b';');
///
/// let report = cleaner.clean_path("students.csv").unwrap();
/// println!("Kept: {}", report.rows.len());
/// for line in report.log_lines() {
///     println!("{line}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Cleaner {
    /// Header aliases used for column detection.
    aliases: AliasTable,
    /// Lowercased header substrings marking URL-like columns.
    url_keywords: Vec<String>,
    /// Field delimiter of the input.
    delimiter: u8,
    /// Accepted phone digit count.
    phone_digits: RangeInclusive<usize>,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner {
    /// Create a new Cleaner with the built-in alias table and rules.
    pub fn new() -> Self {
        Self {
            aliases: AliasTable::default(),
            url_keywords: DEFAULT_URL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            delimiter: b',',
            phone_digits: PHONE_DIGITS,
        }
    }

    /// Replace the alias table.
    pub fn alias_table(&mut self, aliases: AliasTable) -> &mut Self {
        self.aliases = aliases;
        self
    }

    /// Replace the header substrings that mark URL-like columns.
    pub fn url_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.url_keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    /// Set the input field delimiter.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the accepted phone digit count (inclusive).
    pub fn phone_digits(&mut self, min: usize, max: usize) -> &mut Self {
        self.phone_digits = min..=max;
        self
    }

    /// Check the configuration before reading any input.
    pub fn validate(&self) -> Result<()> {
        if self.phone_digits.is_empty() {
            return Err(CleanError::InvalidConfig(format!(
                "phone digit range {}..={} is empty",
                self.phone_digits.start(),
                self.phone_digits.end()
            )));
        }
        if !self.delimiter.is_ascii() || self.delimiter == b'"' || self.delimiter == b'\n' {
            return Err(CleanError::InvalidConfig(format!(
                "unsupported delimiter {:?}",
                self.delimiter as char
            )));
        }
        Ok(())
    }

    /// Clean a CSV file at the given path.
    pub fn clean_path<P: AsRef<Path>>(&self, path: P) -> Result<CleanReport> {
        let file = File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        self.clean_reader(reader)
    }

    /// Clean several files independently, in parallel.
    ///
    /// Results are returned in the same order as `paths`.
    pub fn clean_paths<P>(&self, paths: &[P]) -> Vec<Result<CleanReport>>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|p| self.clean_path(p)).collect()
    }

    /// Clean CSV data from a reader. The whole input is read into memory.
    pub fn clean_reader<R: Read>(&self, mut reader: R) -> Result<CleanReport> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.clean_bytes(&data)
    }

    /// Clean CSV data from bytes.
    ///
    /// The first record is the header row. Input without a header row yields
    /// an empty report whose only log entry is `Empty or invalid CSV`.
    pub fn clean_bytes(&self, data: &[u8]) -> Result<CleanReport> {
        self.validate()?;

        let decoded = decode_input(data);
        tracing::debug!(
            encoding = decoded.encoding,
            transcoded = decoded.was_transcoded(),
            "input decoded"
        );
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(decoded.text.as_bytes());

        let headers: Vec<String> = match reader.headers() {
            Ok(record) if !record.is_empty() => record.iter().map(str::to_string).collect(),
            Ok(_) => return Ok(CleanReport::empty_input()),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable header row");
                return Ok(CleanReport::empty_input());
            }
        };

        let mut dataset = DatasetCleaner::new(self, &headers);
        for record in reader.records() {
            let record = record?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.as_str(), v))
                .collect();
            dataset.push(row);
        }

        Ok(dataset.finish())
    }

    /// Clean already-parsed rows.
    ///
    /// An empty `headers` slice means the input had no field names.
    pub fn clean_rows<S, I>(&self, headers: &[S], rows: I) -> CleanReport
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Row>,
    {
        if headers.is_empty() {
            return CleanReport::empty_input();
        }

        let mut dataset = DatasetCleaner::new(self, headers);
        for row in rows {
            dataset.push(row);
        }
        dataset.finish()
    }
}

/// Drives row processing over one dataset.
///
/// Owns the column map, the seen-key set and the log for a single input, so
/// separate datasets never share state. Rows must be pushed in input order.
#[derive(Debug)]
pub struct DatasetCleaner<'c> {
    cleaner: &'c Cleaner,
    columns: ColumnMap,
    headers: Vec<String>,
    state: CleanState,
    rows: Vec<Row>,
}

impl<'c> DatasetCleaner<'c> {
    /// Start a dataset with its header row.
    pub fn new<S: AsRef<str>>(cleaner: &'c Cleaner, headers: &[S]) -> Self {
        let columns = detect_columns(headers, &cleaner.aliases);
        tracing::debug!(bound = columns.len(), headers = headers.len(), "columns detected");

        Self {
            cleaner,
            columns,
            headers: sorted_headers(headers.iter().map(|h| h.as_ref()), &NORMALIZED_KEYS),
            state: CleanState::new(),
            rows: Vec::new(),
        }
    }

    /// Column bindings for this dataset.
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Process the next row. Returns true if it was kept.
    pub fn push(&mut self, row: Row) -> bool {
        let index = self.state.stats.total + 1;
        let processor = RowProcessor::new(
            &self.columns,
            &self.cleaner.url_keywords,
            self.cleaner.phone_digits.clone(),
        );

        match processor.process(row, index, &mut self.state) {
            RowOutcome::Kept(row) => {
                self.rows.push(row);
                true
            }
            RowOutcome::Rejected(_) | RowOutcome::Duplicate => false,
        }
    }

    /// Finish the dataset and produce the report.
    pub fn finish(self) -> CleanReport {
        let stats = self.state.stats;
        tracing::debug!(
            total = stats.total,
            kept = stats.kept,
            rejected = stats.rejected,
            duplicates = stats.duplicates,
            "dataset cleaned"
        );

        CleanReport {
            rows: self.rows,
            headers: self.headers,
            logs: self.state.logs,
            columns: self.columns,
            stats,
        }
    }
}
