//! Workbook export.
//!
//! Each run appends one sheet to a persistent multi-sheet `.xlsx` workbook,
//! creating the file on first use. The sheet carries a header row and one row
//! per record, every field except `figure_url` — the URL is stripped from the
//! in-memory records right before export and is gone for good after that.

use crate::error::{HarvestError, Result};
use crate::models::ArticleRecord;
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::info;
use umya_spreadsheet::{reader, writer, Spreadsheet};

const HEADER: [&str; 6] = [
    "title",
    "date",
    "description",
    "figure_name",
    "title_phrase_count",
    "money",
];

/// Sheet name for one run. Second-resolution timestamps keep names unique
/// across runs within the same workbook.
pub fn run_sheet_name(phrase: &str, category: &str, now: NaiveDateTime) -> String {
    format!("{}_{}_{}", phrase, category, now.format("%Y-%m-%d_%H-%M-%S"))
}

fn open_or_create(path: &str) -> Result<Spreadsheet> {
    if Path::new(path).exists() {
        reader::xlsx::read(path).map_err(|e| HarvestError::Workbook(e.to_string()))
    } else {
        Ok(umya_spreadsheet::new_file_empty_worksheet())
    }
}

/// Append the record set as a new named sheet and save the workbook.
///
/// Strips `figure_url` from every record in place. The write happens only
/// after the full record set is assembled, so a failed run never leaves a
/// half-written sheet behind.
pub fn append_run_sheet(
    path: &str,
    sheet_name: &str,
    records: &mut [ArticleRecord],
) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    for record in records.iter_mut() {
        record.figure_url = None;
    }

    let mut book = open_or_create(path)?;
    let sheet = book
        .new_sheet(sheet_name)
        .map_err(|e| HarvestError::Workbook(e.to_string()))?;

    for (col, name) in HEADER.iter().enumerate() {
        sheet.get_cell_mut((col as u32 + 1, 1)).set_value(*name);
    }
    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 2;
        sheet.get_cell_mut((1, row)).set_value(record.title.clone());
        sheet.get_cell_mut((2, row)).set_value(record.date.clone());
        sheet
            .get_cell_mut((3, row))
            .set_value(record.description.clone().unwrap_or_default());
        sheet
            .get_cell_mut((4, row))
            .set_value(record.figure_name.clone().unwrap_or_default());
        sheet
            .get_cell_mut((5, row))
            .set_value(record.title_phrase_count.to_string());
        sheet
            .get_cell_mut((6, row))
            .set_value_string(record.money.to_string());
    }

    writer::xlsx::write(&book, path).map_err(|e| HarvestError::Workbook(e.to_string()))?;
    info!(%path, sheet = %sheet_name, rows = records.len(), "Appended run sheet to workbook");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(title: &str, count: usize, money: bool) -> ArticleRecord {
        ArticleRecord {
            title: title.into(),
            date: "June 1".into(),
            description: Some(format!("{title} description")),
            figure_name: Some("figure".into()),
            figure_url: Some("https://example.com/f.jpg".into()),
            title_phrase_count: count,
            money,
        }
    }

    #[test]
    fn test_run_sheet_name_has_second_resolution() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 5)
            .unwrap();
        assert_eq!(
            run_sheet_name("climate", "Business", now),
            "climate_Business_2024-06-15_10-30-05"
        );
    }

    #[test]
    fn test_creates_workbook_and_round_trips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.xlsx");
        let path = path.to_str().unwrap();

        let mut records = vec![record("First", 2, true), record("Second", 0, false)];
        append_run_sheet(path, "climate_Business_2024", &mut records).unwrap();

        let book = reader::xlsx::read(path).unwrap();
        let sheet = book.get_sheet_by_name("climate_Business_2024").unwrap();

        assert_eq!(sheet.get_value((1u32, 1u32)), "title");
        assert_eq!(sheet.get_value((6u32, 1u32)), "money");

        // Rows in original insertion order, figure_url nowhere in the sheet.
        assert_eq!(sheet.get_value((1u32, 2u32)), "First");
        assert_eq!(sheet.get_value((2u32, 2u32)), "June 1");
        assert_eq!(sheet.get_value((3u32, 2u32)), "First description");
        assert_eq!(sheet.get_value((4u32, 2u32)), "figure");
        assert_eq!(sheet.get_value((5u32, 2u32)), "2");
        assert_eq!(sheet.get_value((6u32, 2u32)), "true");
        assert_eq!(sheet.get_value((1u32, 3u32)), "Second");
        assert_eq!(sheet.get_value((5u32, 3u32)), "0");
        assert_eq!(sheet.get_value((6u32, 3u32)), "false");
    }

    #[test]
    fn test_strips_figure_url_from_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.xlsx");

        let mut records = vec![record("Only", 0, false)];
        append_run_sheet(path.to_str().unwrap(), "run_1", &mut records).unwrap();
        assert_eq!(records[0].figure_url, None);
    }

    #[test]
    fn test_second_run_appends_and_preserves_prior_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.xlsx");
        let path = path.to_str().unwrap();

        let mut first = vec![record("From run one", 0, false)];
        append_run_sheet(path, "run_1", &mut first).unwrap();
        let mut second = vec![record("From run two", 1, true)];
        append_run_sheet(path, "run_2", &mut second).unwrap();

        let book = reader::xlsx::read(path).unwrap();
        let one = book.get_sheet_by_name("run_1").unwrap();
        let two = book.get_sheet_by_name("run_2").unwrap();
        assert_eq!(one.get_value((1u32, 2u32)), "From run one");
        assert_eq!(two.get_value((1u32, 2u32)), "From run two");
    }

    #[test]
    fn test_empty_record_set_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.xlsx");
        let path = path.to_str().unwrap();

        append_run_sheet(path, "empty_run", &mut []).unwrap();

        let book = reader::xlsx::read(path).unwrap();
        let sheet = book.get_sheet_by_name("empty_run").unwrap();
        assert_eq!(sheet.get_value((1u32, 1u32)), "title");
        assert_eq!(sheet.get_value((1u32, 2u32)), "");
    }
}
