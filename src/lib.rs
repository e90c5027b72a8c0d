//! csv-cleanse: schema-agnostic cleaner for loosely structured CSV exports
//!
//! Exports from different sources rarely agree on column names. This crate
//! infers which columns carry a person's name, email, phone, title and date,
//! validates and normalizes those fields, drops duplicate records and keeps a
//! log of every row it rejected or repaired.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_cleanse::Cleaner;
//!
//! let cleaner = Cleaner::new();
//! let report = cleaner.clean_path("students.csv").unwrap();
//!
//! println!("Columns: {:?}", report.headers);
//! println!("Kept {} of {} rows", report.stats.kept, report.stats.total);
//! for line in report.log_lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! # Custom aliases
//!
//! ```
//! use csv_cleanse::{AliasTable, Cleaner, Field};
//!
//! let mut cleaner = Cleaner::new();
//! cleaner.alias_table(
//!     AliasTable::default().with_aliases(Field::Name, ["ad", "isim"]),
//! );
//!
//! let report = cleaner.clean_bytes(b"Isim,Eposta\nAli,ali@test.com\n").unwrap();
//! assert_eq!(report.rows[0].get("normalized_name"), Some("Ali"));
//! ```
//!
//! # Pipeline
//!
//! 1. The header row is matched against the [`AliasTable`] to build a [`ColumnMap`]
//! 2. Each row is checked for a name, then for a well-formed email; failures are logged
//! 3. Phone and date are normalized; invalid values degrade to empty strings
//! 4. URL-like columns holding malformed values are cleared and logged
//! 5. Rows whose (name, email-or-phone) key was already seen are dropped silently

mod alias;
mod cleaner;
mod detect;
mod encoding;
mod error;
mod field;
pub mod output;
mod processor;
mod report;
mod row;
pub mod validate;

pub use alias::{AliasTable, FieldRules};
pub use cleaner::{Cleaner, DatasetCleaner};
pub use detect::{ColumnMap, detect_columns};
pub use error::{CleanError, Result};
pub use field::{Field, NORMALIZED_KEYS};
pub use processor::{CleanState, DEFAULT_URL_KEYWORDS, DedupKey, Rejection, RowOutcome, RowProcessor};
pub use report::{CleanReport, CleanStats, LogEntry, LogMessage};
pub use row::Row;

// Re-export for advanced usage
pub use encoding::{DecodedInput, decode_input, is_utf8};
