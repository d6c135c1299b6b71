use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float64Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::dates::parse_date_input;
use super::model::{CellValue, Dataset, Row};

const MILLIS_PER_DAY: i64 = 86_400_000;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a result table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one row per record, any scalar column types (recommended)
/// * `.json`    – `[{ "id": "...", "gc_content": 0.52, ... }, ...]`
/// * `.csv`     – header row with column names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Type a textual cell: dates become [`CellValue::Date`], the rest stays text.
fn text_cell(s: &str) -> CellValue {
    match parse_date_input(s) {
        Some(ms) => CellValue::Date(ms),
        None => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "id": "oligo_0001", "gc_content": 0.52, "created_at": "2025-01-10T09:30" },
///   ...
/// ]
/// ```
///
/// `null` fields are treated as missing cells.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

fn parse_json_records(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = Row::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            if let Some(cell) = json_to_cell(val) {
                row.insert(key.clone(), cell);
            }
        }
        rows.push(row);
    }

    Ok(Dataset::new(rows, column_names))
}

fn json_to_cell(val: &JsonValue) -> Option<CellValue> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(text_cell(s)),
        JsonValue::Number(n) => Some(match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Unknown(n.to_string()),
        }),
        other => Some(CellValue::Unknown(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Empty fields are treated as missing cells.
fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut row = Row::new();
        for (col_idx, value) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no}: more fields than header columns");
            };
            if let Some(cell) = guess_cell_type(value) {
                row.insert(col_name.clone(), cell);
            }
        }
        rows.push(row);
    }

    Ok(Dataset::new(rows, headers))
}

fn guess_cell_type(s: &str) -> Option<CellValue> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return Some(CellValue::Number(f));
        }
    }
    if s == "true" || s == "false" {
        return Some(CellValue::Unknown(s.to_string()));
    }
    Some(text_cell(s))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a result table.
///
/// Strings, integers, floats, dates and timestamps map to typed cells;
/// anything else is kept as its Arrow display text.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut batch_rows = vec![Row::new(); batch.num_rows()];
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let cells = column_cells(batch.column(col_idx))
                .with_context(|| format!("column '{}'", field.name()))?;
            for (row, cell) in batch_rows.iter_mut().zip(cells) {
                if let Some(cell) = cell {
                    row.insert(field.name().clone(), cell);
                }
            }
        }
        rows.extend(batch_rows);
    }

    Ok(Dataset::new(rows, column_names))
}

// -- Parquet / Arrow helpers --

/// `None` when the timestamp is outside the millisecond range.
fn seconds_to_millis(secs: i64) -> Option<i64> {
    secs.checked_mul(1000)
}

/// Convert a whole Arrow column to cells; nulls become `None`.
fn column_cells(col: &ArrayRef) -> Result<Vec<Option<CellValue>>> {
    let n = col.len();
    let cells: Vec<Option<CellValue>> = match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_string::<i32>();
            (0..n)
                .map(|i| (!arr.is_null(i)).then(|| text_cell(arr.value(i))))
                .collect()
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            (0..n)
                .map(|i| (!arr.is_null(i)).then(|| text_cell(arr.value(i))))
                .collect()
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float16
        | DataType::Float32
        | DataType::Float64 => {
            let cast = arrow::compute::cast(col, &DataType::Float64)
                .context("casting numeric column to Float64")?;
            let arr = cast.as_primitive::<Float64Type>();
            arr.iter().map(|v| v.map(CellValue::Number)).collect()
        }
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .iter()
            .map(|v| v.map(|days| CellValue::Date(days as i64 * MILLIS_PER_DAY)))
            .collect(),
        DataType::Date64 => col
            .as_primitive::<Date64Type>()
            .iter()
            .map(|v| v.map(CellValue::Date))
            .collect(),
        DataType::Timestamp(unit, _) => {
            let millis: Vec<Option<i64>> = match unit {
                TimeUnit::Second => col
                    .as_primitive::<TimestampSecondType>()
                    .iter()
                    .map(|v| v.and_then(seconds_to_millis))
                    .collect(),
                TimeUnit::Millisecond => {
                    col.as_primitive::<TimestampMillisecondType>().iter().collect()
                }
                TimeUnit::Microsecond => col
                    .as_primitive::<TimestampMicrosecondType>()
                    .iter()
                    .map(|v| v.map(|us| us / 1000))
                    .collect(),
                TimeUnit::Nanosecond => col
                    .as_primitive::<TimestampNanosecondType>()
                    .iter()
                    .map(|v| v.map(|ns| ns / 1_000_000))
                    .collect(),
            };
            millis.into_iter().map(|v| v.map(CellValue::Date)).collect()
        }
        _ => (0..n)
            .map(|i| {
                if col.is_null(i) {
                    return Ok(None);
                }
                let raw = array_value_to_string(col, i).context("formatting cell")?;
                Ok(Some(CellValue::Unknown(raw)))
            })
            .collect::<Result<Vec<_>>>()?,
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_cells_are_typed() {
        let ds = parse_json_records(
            r#"[
                {"id": "oligo_1", "gc_content": 0.5, "created_at": "2025-01-10T09:30", "valid": true},
                {"id": "oligo_2", "gc_content": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(ds.column_names, vec!["id", "gc_content", "created_at", "valid"]);
        let first = &ds.rows[0];
        assert_eq!(first["id"], CellValue::Text("oligo_1".into()));
        assert_eq!(first["gc_content"], CellValue::Number(0.5));
        assert!(matches!(first["created_at"], CellValue::Date(_)));
        assert_eq!(first["valid"], CellValue::Unknown("true".into()));
        assert!(!ds.rows[1].contains_key("gc_content"));
    }

    #[test]
    fn json_rejects_non_array_root() {
        assert!(parse_json_records(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn csv_cells_are_typed_and_blanks_skipped() {
        let data = "id,binding_energy,region,created_at\nA1,-12.5,loop,2025-02-01\nA2,,stem,\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let ds = read_csv(reader).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0]["binding_energy"], CellValue::Number(-12.5));
        assert_eq!(ds.rows[0]["region"], CellValue::Text("loop".into()));
        assert!(matches!(ds.rows[0]["created_at"], CellValue::Date(_)));
        assert!(!ds.rows[1].contains_key("binding_energy"));
        assert!(!ds.rows[1].contains_key("created_at"));
    }

    #[test]
    fn out_of_range_second_timestamps_become_missing() {
        assert_eq!(seconds_to_millis(1_700_000_000), Some(1_700_000_000_000));
        assert_eq!(seconds_to_millis(i64::MAX), None);
        assert_eq!(seconds_to_millis(i64::MIN), None);
    }

    #[test]
    fn load_file_rejects_unknown_extension() {
        let err = load_file(Path::new("results.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn load_file_reads_json_from_disk() {
        let path = std::env::temp_dir().join("oligo_viewer_loader_test.json");
        std::fs::write(&path, r#"[{"id": "x", "site_position": 42}]"#).unwrap();
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.rows[0]["site_position"], CellValue::Number(42.0));
    }
}
