use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::Record;

/// Positional CSV layout: column 0 holds the listing id, which is ignored.
const CSV_LOCATION: usize = 1;
const CSV_PROPERTY_TYPE: usize = 2;
const CSV_PRICE: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load listing records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, then `id,location,property_type,price,...`
/// * `.json`    – `[{ "location": ..., "property_type": ..., "price": ... }, ...]`
/// * `.parquet` – columns `location`, `property_type` and `price`
///
/// Any row that fails to parse fails the whole load; nothing partial is
/// returned.
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse positional CSV rows from any reader. The first row is a header and
/// is skipped. Rows may carry extra trailing columns; only the first four
/// are read.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let field = |idx: usize, name: &'static str| {
            row.get(idx)
                .with_context(|| format!("CSV row {row_no}: missing '{name}' column"))
        };

        let location = field(CSV_LOCATION, "location")?;
        let property_type = field(CSV_PROPERTY_TYPE, "property_type")?;
        let price_text = field(CSV_PRICE, "price")?;
        let price = parse_price(price_text)
            .with_context(|| format!("CSV row {row_no}: '{price_text}' is not a whole price"))?;

        records.push(Record::new(location, property_type, price));
    }

    Ok(records)
}

fn parse_price(s: &str) -> Result<u64> {
    Ok(s.trim().parse::<u64>()?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "location": "Bronx", "property_type": "Private room", "price": 45 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON listings")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings.
///
/// Expected schema:
/// - `location`, `property_type`: Utf8 or LargeUtf8
/// - `price`: Int32, Int64, UInt32 or UInt64, non-negative
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let location_col = column("location")?;
        let type_col = column("property_type")?;
        let price_col = column("price")?;

        for row in 0..batch.num_rows() {
            let abs = row_base + row;
            let location = extract_string(location_col, row)
                .with_context(|| format!("Row {abs}: failed to read 'location'"))?;
            let property_type = extract_string(type_col, row)
                .with_context(|| format!("Row {abs}: failed to read 'property_type'"))?;
            let price = extract_price(price_col, row)
                .with_context(|| format!("Row {abs}: failed to read 'price'"))?;

            records.push(Record {
                location,
                property_type,
                price,
            });
        }
        row_base += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in text column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}

fn extract_price(col: &Arc<dyn Array>, row: usize) -> Result<u64> {
    if col.is_null(row) {
        bail!("null price");
    }
    let signed = match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            i64::from(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            arr.value(row)
        }
        DataType::UInt32 => {
            let arr = col
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("expected UInt32Array")?;
            return Ok(u64::from(arr.value(row)));
        }
        DataType::UInt64 => {
            let arr = col
                .as_any()
                .downcast_ref::<UInt64Array>()
                .context("expected UInt64Array")?;
            return Ok(arr.value(row));
        }
        other => bail!("Expected an integer price column, got {other:?}"),
    };
    u64::try_from(signed).with_context(|| format!("negative price {signed}"))
}
