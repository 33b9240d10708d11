//! Sink operations: persist extraction results as CSV or JSON
//!
//! The `save_to_*` functions log success or failure and never propagate;
//! the underlying `write_*` functions return the error for callers (and
//! tests) that want it.

use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Save a sequence of records to a CSV file, logging the outcome
pub fn save_to_csv<T: Serialize, P: AsRef<Path>>(records: &[T], path: P) {
    match write_csv(records, path.as_ref()) {
        Ok(()) => log::info!("Data saved to {}", path.as_ref().display()),
        Err(e) => log::error!("Error saving to CSV {}: {}", path.as_ref().display(), e),
    }
}

/// Save any serializable value to a pretty-printed JSON file, logging the
/// outcome
pub fn save_to_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) {
    match write_json(value, path.as_ref()) {
        Ok(()) => log::info!("Data saved to {}", path.as_ref().display()),
        Err(e) => log::error!("Error saving to JSON {}: {}", path.as_ref().display(), e),
    }
}

/// Write records as rows of a UTF-8 CSV file. The column set is the first
/// record's keys in declaration order; later records with differing keys
/// are not reconciled (missing keys become empty cells, extra keys are
/// dropped). String values are written raw, everything else as compact
/// JSON.
pub fn write_csv<T: Serialize>(records: &[T], path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;

    let values: Vec<Value> = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;

    let columns: Vec<String> = match values.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };

    if columns.is_empty() {
        // Nothing to lay out without a leading record
        writer.flush()?;
        return Ok(());
    }

    writer.write_record(&columns)?;

    let empty = serde_json::Map::new();
    for value in &values {
        let record = value.as_object().unwrap_or(&empty);
        let row: Vec<String> = columns.iter().map(|c| cell_text(record.get(c))).collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a value as pretty-printed JSON (2-space indent, non-ASCII kept
/// literal)
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quote, TableData};

    fn sample_quotes() -> Vec<Quote> {
        vec![
            Quote {
                text: "“Código es poesía.”".to_string(),
                author: "Anónimo".to_string(),
                tags: vec!["código".to_string(), "poesía".to_string()],
            },
            Quote {
                text: "Keep it simple.".to_string(),
                author: "Kelly Johnson".to_string(),
                tags: vec![],
            },
        ]
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        let quotes = sample_quotes();

        write_csv(&quotes, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["text", "author", "tags"])
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "“Código es poesía.”");
        assert_eq!(&rows[0][1], "Anónimo");
        // Non-string values are stored as compact JSON
        assert_eq!(&rows[0][2], r#"["código","poesía"]"#);
        assert_eq!(&rows[1][2], "[]");
    }

    #[test]
    fn test_csv_empty_records_give_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv::<Quote>(&[], &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let quotes = sample_quotes();

        write_json(&quotes, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        // Pretty-printed with non-ASCII kept literal, not escaped
        assert!(contents.contains("  \"text\""));
        assert!(contents.contains("Código"));

        let parsed: Vec<Quote> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, quotes);
    }

    #[test]
    fn test_json_round_trip_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        let tables = vec![TableData {
            table_index: 0,
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into(), "2".into()]],
        }];

        write_json(&tables, &path).unwrap();

        let parsed: Vec<TableData> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_save_to_csv_swallows_errors() {
        // Unwritable path: logs instead of panicking or propagating
        save_to_csv(&sample_quotes(), "/no-such-dir/out.csv");
        save_to_json(&sample_quotes(), "/no-such-dir/out.json");
    }
}
