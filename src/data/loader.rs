use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int8Array, Int16Array,
    Int32Array, Int64Array, StringArray, StringViewArray, UInt8Array, UInt16Array,
    UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use calamine::{Data, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::Grid;
use crate::config::TimetableConfig;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a timetable grid and normalize it for the merge engine: the
/// configured group columns must exist and, unless disabled, are
/// forward-filled.
pub fn load_grid(path: &Path, cfg: &TimetableConfig) -> Result<Grid> {
    let mut grid = load_file(path)?;
    for name in cfg.group_columns() {
        let col = grid
            .require_column(name)
            .with_context(|| format!("validating {}", path.display()))?;
        if cfg.forward_fill {
            grid.forward_fill(col);
        }
    }
    Ok(grid)
}

/// Load a raw grid from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.xlsb` / `.ods` – first worksheet, first row is the header
/// * `.csv`     – header row, UTF-8 (a leading BOM is ignored)
/// * `.json`    – `[{ "term": "...", "Mon1": "...", ... }, ...]`
/// * `.parquet` – any flat schema; cells are stringified
pub fn load_file(path: &Path) -> Result<Grid> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let grid = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => load_spreadsheet(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    log::info!(
        "loaded {} ({ext}): {} rows × {} columns",
        path.display(),
        grid.len(),
        grid.columns().len()
    );
    Ok(grid)
}

/// Load header-less rows from a CSV file (e.g. a scraped HTML table).
/// Rows may have different lengths.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    reader
        .records()
        .enumerate()
        .map(|(row_no, result)| {
            let record = result.with_context(|| format!("CSV row {row_no}"))?;
            Ok(record.iter().map(|c| c.to_string()).collect())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Workbook has no worksheets")?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading worksheet '{sheet}'"))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Grid::default());
    };
    let columns = unique_headers(header.iter().map(cell_text).collect());
    let body = rows
        .map(|row| fit_row(row.iter().map(cell_text).collect(), columns.len()))
        .collect::<Result<Vec<_>>>()?;

    Ok(Grid::new(columns, body)?)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Integral floats print without a fractional part: 301.0 → "301"
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{e:?}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one timetable row per record.
/// Short records are padded with empty cells.
fn load_csv(path: &Path) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let columns = unique_headers(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect(),
    );

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = fit_row(record.iter().map(|c| c.to_string()).collect(), columns.len())
            .with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }

    Ok(Grid::new(columns, rows)?)
}

/// Name blank header cells `Unnamed: {i}` and suffix repeats `.1`, `.2`, ...
/// so every column is distinct after trimming. Neither form can look like a
/// slot header, so such columns drop out of the merge.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut k = 1;
            while !seen.insert(candidate.trim().to_string()) {
                candidate = format!("{}.{k}", base.trim());
                k += 1;
            }
            if candidate != base {
                log::debug!("header '{base}' at column {i} renamed to '{candidate}'");
            }
            candidate
        })
        .collect()
}

/// Pad a short row with empty cells; a row longer than the header is an error.
fn fit_row(mut row: Vec<String>, width: usize) -> Result<Vec<String>> {
    if row.len() > width {
        // Trailing empty cells past the header are harmless spreadsheet noise.
        while row.len() > width && row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
        if row.len() > width {
            bail!("row has {} cells but the header has {width} columns", row.len());
        }
    }
    row.resize(width, String::new());
    Ok(row)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "term": "2025-2", "department": "CS", "grade": "1", "section": "A",
///     "Mon1": "Algorithms", "Mon2": "Algorithms" },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; absent keys read as
/// empty cells.
fn load_json(path: &Path) -> Result<Grid> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows: Vec<Vec<String>> = objects
        .into_iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Grid::new(columns, rows)?)
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns are the grid columns.
///
/// String, integer (signed and unsigned), float and boolean columns are stringified; nulls become
/// empty cells. Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Grid> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns = unique_headers(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect(),
    );
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let first_row = rows.len();
        rows.extend(batch_rows(&batch, first_row)?);
    }

    Ok(Grid::new(columns, rows)?)
}

/// Stringify one record batch; `first_row` numbers its rows within the file.
fn batch_rows(batch: &RecordBatch, first_row: usize) -> Result<Vec<Vec<String>>> {
    (0..batch.num_rows())
        .map(|row| {
            (0..batch.num_columns())
                .map(|col| extract_cell(batch.column(col), row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Row {}", first_row + row))
        })
        .collect()
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => downcast::<StringArray>(col)?.value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Utf8View => downcast::<StringViewArray>(col)?.value(row).to_string(),
        DataType::Int8 => downcast::<Int8Array>(col)?.value(row).to_string(),
        DataType::Int16 => downcast::<Int16Array>(col)?.value(row).to_string(),
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row).to_string(),
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row).to_string(),
        DataType::UInt8 => downcast::<UInt8Array>(col)?.value(row).to_string(),
        DataType::UInt16 => downcast::<UInt16Array>(col)?.value(row).to_string(),
        DataType::UInt32 => downcast::<UInt32Array>(col)?.value(row).to_string(),
        DataType::UInt64 => downcast::<UInt64Array>(col)?.value(row).to_string(),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row).to_string(),
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row).to_string(),
        DataType::Boolean => downcast::<BooleanArray>(col)?.value(row).to_string(),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(text)
}

fn downcast<T: Array + 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}
