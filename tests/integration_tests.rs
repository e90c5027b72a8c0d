//! Integration tests for csv-cleanse

use calamine::{Data, Reader, Xlsx, open_workbook};
use csv_cleanse::output::{OutputPaths, write_outputs};
use csv_cleanse::{AliasTable, Cleaner, Field, LogMessage, Row};
use std::io::Cursor;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_detects_columns_and_ignores_father_name() {
    let data = b"FullName,UserEmail,Cell_No,FatherName\nAli,ali@test.com,0300-1234567,Ahmed\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.columns.get(Field::Name), Some("FullName"));
    assert_eq!(report.columns.get(Field::Email), Some("UserEmail"));
    assert_eq!(report.columns.get(Field::Phone), Some("Cell_No"));
    assert!(report.columns.iter().all(|(_, h)| h != "FatherName"));

    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.get("normalized_name"), Some("Ali"));
    assert_eq!(row.get("normalized_phone"), Some("03001234567"));
    assert_eq!(row.get("FatherName"), Some("Ahmed"));
}

#[test]
fn test_case_insensitive_duplicate_is_silent() {
    let data = b"name,email\nAli,ali@test.com\nali,ALI@TEST.COM\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert!(report.logs.is_empty());
    assert_eq!(report.stats.duplicates, 1);
    assert_eq!(report.rows[0].get("email"), Some("ali@test.com"));
}

#[test]
fn test_missing_name_logged() {
    let data = b"name,email\nAli,ali@test.com\n,nobody@test.com\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.logs.len(), 1);
    assert_eq!(report.logs[0].to_string(), "Row 2: missing name");
}

#[test]
fn test_invalid_email_logged() {
    let data = b"name,email\nAli,not-an-email\nVeli,veli@test.com\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].get("name"), Some("Veli"));
    assert_eq!(report.logs[0].message, LogMessage::InvalidEmail);
    assert_eq!(report.logs[0].row, Some(1));
}

#[test]
fn test_header_only_input() {
    let data = b"Name,Email\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert!(report.rows.is_empty());
    assert!(report.logs.is_empty());
    assert_eq!(
        report.headers,
        vec![
            "Email",
            "Name",
            "normalized_date",
            "normalized_email",
            "normalized_name",
            "normalized_phone",
            "normalized_title",
        ]
    );
}

#[test]
fn test_empty_input() {
    let report = Cleaner::new().clean_bytes(b"").unwrap();

    assert!(report.rows.is_empty());
    assert!(report.headers.is_empty());
    assert_eq!(report.logs.len(), 1);
    assert_eq!(report.logs[0].message, LogMessage::EmptyInput);
}

#[test]
fn test_profile_url_cleared() {
    let data = b"Name,ProfileUrl\nAli,ht!tp://bad\nVeli,https://example.com/veli\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].get("ProfileUrl"), Some(""));
    assert_eq!(
        report.rows[1].get("ProfileUrl"),
        Some("https://example.com/veli")
    );
    assert_eq!(report.logs.len(), 1);
    assert_eq!(report.logs[0].to_string(), "Row 1: bad url cleaned (ProfileUrl)");
}

#[test]
fn test_url_logged_even_for_duplicate() {
    let data = b"name,photo\nAli,\nAli,bad value\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.logs.len(), 1);
    assert_eq!(report.logs[0].to_string(), "Row 2: bad url cleaned (photo)");
}

#[test]
fn test_dates_normalized() {
    let data = b"name,created\nA,2023-05-01\nB,01/05/2023\nC,2024\nD,20230501120000\nE,not-a-date\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    let dates: Vec<&str> = report
        .rows
        .iter()
        .map(|r| r.get_or_empty("normalized_date"))
        .collect();
    assert_eq!(
        dates,
        vec!["2023-05-01", "2023-05-01", "2024-01-01", "2023-05-01", ""]
    );
}

#[test]
fn test_invalid_phone_degrades() {
    let data = b"name,mobile\nAli,12345\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].get("normalized_phone"), Some(""));
    assert_eq!(report.rows[0].get("mobile"), Some("12345"));
    assert!(report.logs.is_empty());
}

#[test]
fn test_output_order_is_input_order() {
    let data = b"name\nC\nA\nB\na\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    let names: Vec<&str> = report
        .rows
        .iter()
        .map(|r| r.get_or_empty("name"))
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn test_every_kept_row_has_name_and_unique_key() {
    let data = b"name,email,phone\n\
        Ali,ali@test.com,\n\
        ,x@test.com,\n\
        Ali,,03001234567\n\
        ali,,0300 1234567\n\
        Ayse,bad@,\n\
        Ayse,ayse@test.com,\n\
        AYSE,Ayse@Test.com,05551112233\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert!(
        report
            .rows
            .iter()
            .all(|r| !r.get_or_empty("normalized_name").is_empty())
    );

    let mut keys: Vec<(String, String)> = report
        .rows
        .iter()
        .map(|r| {
            let email = r.get_or_empty("normalized_email").to_lowercase();
            let contact = if email.is_empty() {
                r.get_or_empty("normalized_phone").to_string()
            } else {
                email
            };
            (r.get_or_empty("normalized_name").to_lowercase(), contact)
        })
        .collect();
    let before = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), before);

    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.stats.rejected, 2);
    assert_eq!(report.stats.duplicates, 2);
}

#[test]
fn test_flexible_rows() {
    let data = b"name,email\nAli\nVeli,veli@test.com,extra,cells\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert!(report.rows[0].get("email").is_none());
    assert_eq!(report.rows[1].get("normalized_email"), Some("veli@test.com"));
}

#[test]
fn test_empty_header_column_dropped() {
    let data = b"name,,email\nAli,junk,ali@test.com\n";
    let report = Cleaner::new().clean_bytes(data).unwrap();

    assert!(!report.headers.iter().any(String::is_empty));
    assert_eq!(report.rows[0].len(), 2 + 5);
}

#[test]
fn test_semicolon_delimiter() {
    let data = b"Ad;Eposta\nAli;ali@test.com\n";
    let mut cleaner = Cleaner::new();
    cleaner.delimiter(b';').alias_table(
        AliasTable::default()
            .with_aliases(Field::Name, ["ad"])
            .with_aliases(Field::Email, ["eposta"]),
    );

    let report = cleaner.clean_bytes(data).unwrap();

    assert_eq!(report.columns.get(Field::Name), Some("Ad"));
    assert_eq!(report.rows[0].get("normalized_email"), Some("ali@test.com"));
}

#[test]
fn test_windows1254_input() {
    // "Ayşe" in Windows-1254 (Turkish): ş = 0xFE
    let mut data = b"name,email\nAy".to_vec();
    data.push(0xFE);
    data.extend_from_slice(b"e,ayse@test.com\n");

    let report = Cleaner::new().clean_bytes(&data).unwrap();

    // The exact code page guess may vary; the row must still decode and survive.
    assert_eq!(report.rows.len(), 1);
    assert!(report.rows[0].get_or_empty("normalized_name").starts_with("Ay"));
}

#[test]
fn test_stray_byte_in_utf8_input() {
    let data = b"name,email\nAy\xC5\x9Fe,ayse@test.com\nBob,b@test.com\nZed\xFF,z@test.com\n";

    let report = Cleaner::new().clean_bytes(data).unwrap();

    let names: Vec<&str> = report
        .rows
        .iter()
        .map(|r| r.get_or_empty("normalized_name"))
        .collect();
    assert_eq!(names, vec!["Ayşe", "Bob", "Zed"]);
    assert_eq!(report.rows[0].get("normalized_email"), Some("ayse@test.com"));
}

#[test]
fn test_utf8_bom_header() {
    let mut data = vec![0xEF, 0xBB, 0xBF];
    data.extend_from_slice(b"name,email\nAli,ali@test.com\n");

    let report = Cleaner::new().clean_bytes(&data).unwrap();

    assert_eq!(report.columns.get(Field::Name), Some("name"));
    assert!(report.headers.contains(&"name".to_string()));
}

#[test]
fn test_clean_rows_directly() {
    let headers = ["Student Name", "Program"];
    let rows: Vec<Row> = vec![
        [("Student Name", "Ali"), ("Program", "BSCS")].into_iter().collect(),
        [("Student Name", "  "), ("Program", "BBA")].into_iter().collect(),
    ];

    let report = Cleaner::new().clean_rows(&headers, rows);

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].get("normalized_title"), Some("BSCS"));
    assert_eq!(report.log_lines().collect::<Vec<_>>(), vec!["Row 2: missing name"]);
}

#[test]
fn test_clean_from_reader() {
    let cursor = Cursor::new(b"name\nAli\n".to_vec());
    let report = Cleaner::new().clean_reader(cursor).unwrap();

    assert_eq!(report.rows.len(), 1);
}

#[test]
fn test_clean_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "UserName,Mail").unwrap();
    writeln!(temp_file, "Ali,ali@test.com").unwrap();
    writeln!(temp_file, "Veli,veli@test.com").unwrap();
    temp_file.flush().unwrap();

    let report = Cleaner::new().clean_path(temp_file.path()).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.columns.get(Field::Email), Some("Mail"));
}

#[test]
fn test_clean_paths_independent_and_ordered() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    std::fs::write(&a, "name,email\nAli,ali@test.com\nAli,ali@test.com\n").unwrap();
    std::fs::write(&b, "name,email\nAli,ali@test.com\n,x@test.com\n").unwrap();
    let missing = dir.path().join("missing.csv");

    let results = Cleaner::new().clean_paths(&[a, b, missing]);

    assert_eq!(results.len(), 3);
    let ra = results[0].as_ref().unwrap();
    let rb = results[1].as_ref().unwrap();
    // Dedup state is per file: Ali is kept in both.
    assert_eq!(ra.rows.len(), 1);
    assert_eq!(rb.rows.len(), 1);
    assert!(ra.logs.is_empty());
    assert_eq!(rb.logs.len(), 1);
    assert!(results[2].is_err());
}

#[test]
fn test_write_outputs_to_disk() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("students.csv");
    std::fs::write(
        &input,
        "name,email,website\nAli,ali@test.com,bad url\n,missing@test.com,\n",
    )
    .unwrap();

    let report = Cleaner::new().clean_path(&input).unwrap();
    let paths = OutputPaths::for_input(&input, dir.path());
    write_outputs(&report, &paths).unwrap();

    let csv_text = std::fs::read_to_string(dir.path().join("students_clean.csv")).unwrap();
    assert!(csv_text.starts_with("email,name,normalized_date,"));
    assert_eq!(csv_text.lines().count(), 2);

    let json_text = std::fs::read_to_string(dir.path().join("students_clean.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    assert_eq!(parsed[0]["normalized_name"], "Ali");
    assert_eq!(parsed[0]["website"], "");

    let log_text = std::fs::read_to_string(dir.path().join("students_clean.log")).unwrap();
    assert_eq!(
        log_text,
        "Row 1: bad url cleaned (website)\nRow 2: missing name"
    );

    let mut workbook: Xlsx<_> = open_workbook(dir.path().join("students_clean.xlsx")).unwrap();
    let range = workbook.worksheet_range("Cleaned Data").unwrap();
    assert_eq!(range.height(), 2);
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("email".to_string())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Ali".to_string())));
}

#[test]
fn test_write_outputs_skips_disabled() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("x.csv");
    std::fs::write(&input, "name\nAli\n").unwrap();

    let report = Cleaner::new().clean_path(&input).unwrap();
    let paths = OutputPaths::for_input(&input, dir.path())
        .without_json()
        .without_xlsx()
        .without_log();
    write_outputs(&report, &paths).unwrap();

    assert!(dir.path().join("x_clean.csv").exists());
    assert!(!dir.path().join("x_clean.json").exists());
    assert!(!dir.path().join("x_clean.xlsx").exists());
    assert!(!dir.path().join("x_clean.log").exists());
}
