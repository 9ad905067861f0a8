use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Every format must provide the `Launch Site`, `Payload Mass (kg)`,
/// `class` and `Booster Version Category` columns; anything else
/// (flight number, booster version, a pandas index column) is ignored.
///
/// Supported formats:
/// * `.csv`     – header row plus one launch per line
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – one column per field, numeric columns may be int or float
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = LaunchDataset::from_records(records)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {} launches across {} sites from {} (payload {}..={} kg)",
        dataset.len(),
        dataset.sites().len(),
        path.display(),
        dataset.payload_min(),
        dataset.payload_max()
    );
    Ok(dataset)
}

/// Validate one row's raw values and build the record.
fn build_record(
    row: usize,
    launch_site: String,
    payload_mass_kg: f64,
    class: f64,
    booster_version_category: String,
) -> Result<LaunchRecord> {
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        bail!("Row {row}: payload mass {payload_mass_kg} is not a non-negative number");
    }
    let outcome = Outcome::from_class(class)
        .with_context(|| format!("Row {row}: class {class} is neither 0 nor 1"))?;
    Ok(LaunchRecord {
        launch_site,
        payload_mass_kg,
        outcome,
        booster_version_category,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<LaunchRecord>> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };

    let site_idx = column(COL_LAUNCH_SITE)?;
    let payload_idx = column(COL_PAYLOAD_MASS)?;
    let class_idx = column(COL_CLASS)?;
    let booster_idx = column(COL_BOOSTER_CATEGORY)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload = parse_number(field(payload_idx), row_no, COL_PAYLOAD_MASS)?;
        let class = parse_number(field(class_idx), row_no, COL_CLASS)?;

        records.push(build_record(
            row_no,
            field(site_idx).to_string(),
            payload,
            class,
            field(booster_idx).to_string(),
        )?);
    }

    Ok(records)
}

fn parse_number(s: &str, row: usize, col: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One element of a records-oriented JSON export
/// (`df.to_json(orient='records')`).
#[derive(Debug, Deserialize)]
struct JsonLaunch {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<LaunchRecord>> {
    let rows: Vec<JsonLaunch> = serde_json::from_str(text).context("parsing JSON")?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            build_record(
                i,
                row.launch_site,
                row.payload_mass_kg,
                row.class,
                row.booster_version_category,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch attribute. Works with
/// files written by Pandas (`df.to_parquet()`) and Polars.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = batch_column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = batch_column(&batch, COL_PAYLOAD_MASS)?;
        let class_col = batch_column(&batch, COL_CLASS)?;
        let booster_col = batch_column(&batch, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let site = string_at(site_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_LAUNCH_SITE}'"))?;
            let payload = number_at(payload_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_PAYLOAD_MASS}'"))?;
            let class = number_at(class_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_CLASS}'"))?;
            let booster = string_at(booster_col, row).with_context(|| {
                format!("Row {row_no}: failed to read '{COL_BOOSTER_CATEGORY}'")
            })?;

            records.push(build_record(row_no, site, payload, class, booster)?);
        }
    }

    Ok(records)
}

// -- Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}

fn number_at(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(row)),
        other => bail!("Expected an integer or float column, got {other:?}"),
    }
}
