//! Turning external row sources into rows
//!
//! Sources are clipboard text (tab-separated lines) and records already
//! parsed from a spreadsheet file. Every row produced here gets a fresh
//! identity.

use crate::config::TableConfig;
use crate::errors::{Result, TableError};
use crate::model::{CellValue, Row, Snapshot};

/// One parsed spreadsheet record, columns in file order
pub type Record = Vec<(String, CellValue)>;

/// Parse pasted text into rows
///
/// Each non-blank line is split on TAB; the first cell becomes the content
/// column, the second the label column (when one is configured). Extra
/// cells are ignored and every cell is trimmed.
///
/// # Errors
///
/// `EmptyPaste` if no non-blank line remains.
pub fn parse_paste(
    text: &str,
    content_column: &str,
    label_column: Option<&str>,
) -> Result<Vec<Row>> {
    let rows: Vec<Row> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut cells = line.split('\t').map(str::trim);
            let content = cells.next().unwrap_or_default();
            let label = cells.next().unwrap_or_default();

            let mut pairs = vec![(content_column.to_string(), CellValue::from(content))];
            if let Some(label_column) = label_column {
                pairs.push((label_column.to_string(), CellValue::from(label)));
            }
            Row::with_fresh_id(pairs.into_iter().collect())
        })
        .collect();

    if rows.is_empty() {
        return Err(TableError::EmptyPaste);
    }
    Ok(rows)
}

/// Rows for file-parsed records
///
/// # Errors
///
/// `Parse` if there are no records.
pub fn rows_from_records(records: Vec<Record>) -> Result<Vec<Row>> {
    if records.is_empty() {
        return Err(TableError::Parse {
            message: "file contains no data rows".to_string(),
        });
    }
    Ok(records
        .into_iter()
        .map(|record| Row::with_fresh_id(record.into_iter().collect()))
        .collect())
}

/// Column names of the first record, in file order
pub fn columns_of(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|record| record.iter().map(|(column, _)| column.clone()).collect())
        .unwrap_or_default()
}

/// The single empty row a manual-entry table starts with
pub fn placeholder_rows(config: &TableConfig) -> Vec<Row> {
    let cells = std::iter::once(config.content_column.as_str())
        .chain(config.label_column.as_deref())
        .filter(|column| !column.is_empty())
        .map(|column| (column.to_string(), CellValue::from("")))
        .collect();
    vec![Row::with_fresh_id(cells)]
}

/// Whether the table holds nothing but empty rows
pub fn is_blank(rows: &Snapshot) -> bool {
    rows.iter()
        .all(|row| row.cells().values().all(|v| v.as_text().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paste_splits_tabs_and_trims() {
        let rows = parse_paste(
            "http://a\tAlpha\r\n\n  \nhttp://b \r\nhttp://c\tC\textra\n",
            "content",
            Some("label"),
        )
        .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text("content"), "http://a");
        assert_eq!(rows[0].text("label"), "Alpha");
        assert_eq!(rows[1].text("content"), "http://b");
        assert_eq!(rows[1].text("label"), "");
        assert_eq!(rows[2].text("label"), "C");
        assert_ne!(rows[0].id(), rows[1].id());
    }

    #[test]
    fn test_parse_paste_without_label_column() {
        let rows = parse_paste("x\ty", "url", None).unwrap();
        assert_eq!(rows[0].cells().len(), 1);
        assert_eq!(rows[0].text("url"), "x");
    }

    #[test]
    fn test_blank_paste_rejected() {
        assert_eq!(
            parse_paste(" \n\t\n", "content", Some("label")),
            Err(TableError::EmptyPaste)
        );
    }

    #[test]
    fn test_records_keep_column_order() {
        let records: Vec<Record> = vec![
            vec![
                ("url".to_string(), CellValue::from("http://a")),
                ("qty".to_string(), CellValue::from(3_i64)),
            ],
            vec![("url".to_string(), CellValue::from("http://b"))],
        ];
        assert_eq!(columns_of(&records), vec!["url", "qty"]);

        let rows = rows_from_records(records).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("qty"), "3");
        assert_eq!(rows[1].text("qty"), "");
    }

    #[test]
    fn test_no_records_is_parse_error() {
        assert!(matches!(
            rows_from_records(Vec::new()),
            Err(TableError::Parse { .. })
        ));
        assert!(columns_of(&[]).is_empty());
    }

    #[test]
    fn test_placeholder_is_blank() {
        let rows = placeholder_rows(&TableConfig::default());
        assert_eq!(rows.len(), 1);
        let snap = Snapshot::from_rows(rows).unwrap();
        assert!(is_blank(&snap));
    }
}
