use crate::data::cell_value::CellValue;
use crate::data::record::Record;
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Rows loaded from a file plus the column names in source order
#[derive(Debug, Clone, Default)]
pub struct LoadedRows {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

/// Load rows from a `.json` or `.csv` file, chosen by extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<LoadedRows> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => load_json_records(path),
        Some("csv") => load_csv_records(path),
        _ => bail!("Unsupported file type: {:?} (expected .csv or .json)", path),
    }
}

/// Load a CSV file, inferring a type for each cell
pub fn load_csv_records<P: AsRef<Path>>(path: P) -> Result<LoadedRows> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    csv_records_from_reader(file)
}

pub fn csv_records_from_reader<R: Read>(reader: R) -> Result<LoadedRows> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for (position, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("Malformed CSV record {}", position + 1))?;
        let fields = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = row.get(idx).map(CellValue::infer).unwrap_or(CellValue::Null);
                (name.clone(), value)
            })
            .collect();
        records.push(Record::new(position, fields));
    }

    debug!(target: "loader", "Loaded {} CSV rows with {} columns", records.len(), columns.len());

    Ok(LoadedRows { columns, records })
}

/// Load a JSON file holding an array of objects
pub fn load_json_records<P: AsRef<Path>>(path: P) -> Result<LoadedRows> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    let json_data: Vec<JsonValue> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| "Failed to parse JSON file")?;
    records_from_json(&json_data)
}

/// Convert JSON objects to records. Columns are the union of keys, in first-seen order.
pub fn records_from_json(json_data: &[JsonValue]) -> Result<LoadedRows> {
    let mut columns: Vec<String> = Vec::new();
    for item in json_data {
        let obj = item
            .as_object()
            .context("JSON data must be an array of objects")?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let records: Vec<Record> = json_data
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let obj = item.as_object()?;
            let fields = columns
                .iter()
                .map(|name| {
                    let value = obj
                        .get(name)
                        .map(CellValue::from_json)
                        .unwrap_or(CellValue::Null);
                    (name.clone(), value)
                })
                .collect();
            Some(Record::new(position, fields))
        })
        .collect();

    debug!(target: "loader", "Loaded {} JSON rows with {} columns", records.len(), columns.len());

    Ok(LoadedRows { columns, records })
}
