//! Writers for cleaned datasets: delimited text, JSON, a spreadsheet and the
//! plain-text log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use serde::Serialize;

use crate::error::Result;
use crate::report::CleanReport;

/// Output file locations for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Cleaned rows as CSV.
    pub csv: PathBuf,
    /// Cleaned rows as a JSON array.
    pub json: Option<PathBuf>,
    /// Cleaned rows as a spreadsheet.
    pub xlsx: Option<PathBuf>,
    /// Rejection log.
    pub log: Option<PathBuf>,
}

/// Worksheet name used by [`write_xlsx`].
pub const SHEET_NAME: &str = "Cleaned Data";

impl OutputPaths {
    /// Derive `<stem>_clean.{csv,json,xlsx,log}` for `input` inside `out_dir`.
    pub fn for_input(input: &Path, out_dir: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());

        Self {
            csv: out_dir.join(format!("{stem}_clean.csv")),
            json: Some(out_dir.join(format!("{stem}_clean.json"))),
            xlsx: Some(out_dir.join(format!("{stem}_clean.xlsx"))),
            log: Some(out_dir.join(format!("{stem}_clean.log"))),
        }
    }

    /// Skip the JSON output.
    #[must_use]
    pub fn without_json(mut self) -> Self {
        self.json = None;
        self
    }

    /// Skip the spreadsheet output.
    #[must_use]
    pub fn without_xlsx(mut self) -> Self {
        self.xlsx = None;
        self
    }

    /// Skip the log output.
    #[must_use]
    pub fn without_log(mut self) -> Self {
        self.log = None;
        self
    }
}

/// Write rows as CSV using `report.headers` as the column order.
///
/// Headers absent from a row are written as empty cells.
pub fn write_csv<W: Write>(writer: W, report: &CleanReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&report.headers)?;
    for row in &report.rows {
        wtr.write_record(report.headers.iter().map(|h| row.get_or_empty(h)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON array, keeping column order.
pub fn write_json<W: Write>(writer: W, report: &CleanReport) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    report.rows.serialize(&mut ser)?;
    Ok(())
}

/// Write rows to a single-sheet workbook at `path`.
///
/// The first row holds `report.headers`; each cleaned row follows in the
/// same column order. Absent and empty values are left as blank cells.
pub fn write_xlsx(path: &Path, report: &CleanReport) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    for (col, header) in report.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_num(col)?, header, &header_format)?;
    }
    for (i, row) in report.rows.iter().enumerate() {
        let sheet_row = row_num(i + 1)?;
        for (col, header) in report.headers.iter().enumerate() {
            let value = row.get_or_empty(header);
            if !value.is_empty() {
                sheet.write_string(sheet_row, col_num(col)?, value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError.into())
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError.into())
}

/// Write the log entries joined by newlines, without a trailing newline.
pub fn write_log<W: Write>(mut writer: W, report: &CleanReport) -> Result<()> {
    let text = report.log_lines().collect::<Vec<_>>().join("\n");
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write every enabled output file for a report.
pub fn write_outputs(report: &CleanReport, paths: &OutputPaths) -> Result<()> {
    write_csv(BufWriter::new(File::create(&paths.csv)?), report)?;

    if let Some(path) = &paths.json {
        let mut file = BufWriter::new(File::create(path)?);
        write_json(&mut file, report)?;
        file.flush()?;
    }
    if let Some(path) = &paths.xlsx {
        write_xlsx(path, report)?;
    }
    if let Some(path) = &paths.log {
        write_log(BufWriter::new(File::create(path)?), report)?;
    }

    tracing::debug!(csv = %paths.csv.display(), "outputs written");
    Ok(())
}
