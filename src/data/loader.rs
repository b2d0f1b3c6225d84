use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{PassType, Season, SkiPassDataset, SkiPassRecord};

/// Dataset compiled into the binary, used when no file is given.
const BUNDLED_JSON: &str = include_str!("../../assets/ski_passes.json");

/// Schema problems the loaders detect themselves (as opposed to I/O or
/// serde failures, which are passed through with context).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: &'static str },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset shipped with the application.
pub fn load_bundled() -> Result<SkiPassDataset> {
    let records = parse_json(BUNDLED_JSON).context("parsing bundled dataset")?;
    Ok(SkiPassDataset::from_records(records, "bundled"))
}

/// Load a ski pass dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "id": 1, "saison": "hiver", "prix": 42.0, ... }, ...]`
/// * `.csv`     – one record per row, header row with the field names
/// * `.parquet` – one record per row, flat scalar columns
///
/// Both English (`season`, `price`, `level`, `accounted`, `passType`) and
/// French (`saison`, `prix`, `niveau`, `compte`, `passe`) field names work.
pub fn load_file(path: &Path) -> Result<SkiPassDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(SkiPassDataset::from_records(records, path.display().to_string()))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<SkiPassRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<SkiPassRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            SkiPassRecord::deserialize(row)
                .with_context(|| format!("Row {i}: invalid ski pass record"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV line. Every field is already text, so `level` is kept exactly as
/// written (`01` stays `01`).
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: u64,
    #[serde(alias = "saison")]
    season: Season,
    #[serde(alias = "prix")]
    price: f64,
    age: u32,
    #[serde(alias = "niveau")]
    level: String,
    #[serde(alias = "compte", default)]
    accounted: bool,
    #[serde(rename = "passType", alias = "passe", alias = "pass_type")]
    pass_type: PassType,
}

impl From<CsvRow> for SkiPassRecord {
    fn from(row: CsvRow) -> Self {
        SkiPassRecord {
            id: row.id,
            season: row.season,
            price: row.price,
            age: row.age,
            level: row.level,
            accounted: row.accounted,
            pass_type: row.pass_type,
        }
    }
}

/// CSV layout: header row with field names, one record per line.
/// `accounted` / `compte` may be omitted and defaults to `false`.
fn load_csv(path: &Path) -> Result<Vec<SkiPassRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(row_no, result)| {
            result
                .map(SkiPassRecord::from)
                .with_context(|| format!("CSV row {row_no}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of ski pass records.
///
/// Columns are looked up by English name first, then French. Each column is
/// cast to the type the record needs, so integer prices or numeric levels
/// written by Pandas / Polars are accepted.
fn load_parquet(path: &Path) -> Result<Vec<SkiPassRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(records_from_batch(&batch)?);
    }
    Ok(records)
}

fn records_from_batch(batch: &RecordBatch) -> Result<Vec<SkiPassRecord>> {
    let id_col = required_column(batch, "id", &["id"], &DataType::Int64)?;
    let season_col = required_column(batch, "season", &["season", "saison"], &DataType::Utf8)?;
    let price_col = required_column(batch, "price", &["price", "prix"], &DataType::Float64)?;
    let age_col = required_column(batch, "age", &["age"], &DataType::Int64)?;
    let level_col = required_column(batch, "level", &["level", "niveau"], &DataType::Utf8)?;
    let pass_names = ["passType", "pass_type", "passe"];
    let pass_col = required_column(batch, "passType", &pass_names, &DataType::Utf8)?;
    let accounted_col = find_column(batch, &["accounted", "compte"], &DataType::Boolean)?;

    let ids = id_col.as_primitive::<Int64Type>();
    let seasons = season_col.as_string::<i32>();
    let prices = price_col.as_primitive::<Float64Type>();
    let ages = age_col.as_primitive::<Int64Type>();
    let levels = level_col.as_string::<i32>();
    let passes = pass_col.as_string::<i32>();
    let accounted = accounted_col.as_ref().map(|col| col.as_boolean());

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        for (column, array) in [
            ("id", &id_col),
            ("season", &season_col),
            ("price", &price_col),
            ("age", &age_col),
            ("level", &level_col),
            ("passType", &pass_col),
        ] {
            if array.is_null(row) {
                return Err(LoadError::NullValue { row, column }.into());
            }
        }

        let id = u64::try_from(ids.value(row)).with_context(|| format!("Row {row}: negative id"))?;
        let age = u32::try_from(ages.value(row))
            .with_context(|| format!("Row {row}: age out of range"))?;

        records.push(SkiPassRecord {
            id,
            season: Season::from(seasons.value(row)),
            price: prices.value(row),
            age,
            level: levels.value(row).to_string(),
            accounted: accounted
                .map(|col| !col.is_null(row) && col.value(row))
                .unwrap_or(false),
            pass_type: PassType::from(passes.value(row)),
        });
    }
    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Find the first of `names` present in the batch and cast it to `to`.
fn find_column(batch: &RecordBatch, names: &[&str], to: &DataType) -> Result<Option<ArrayRef>> {
    let schema = batch.schema();
    let Some(idx) = names.iter().find_map(|name| schema.index_of(name).ok()) else {
        return Ok(None);
    };
    let casted = cast(batch.column(idx).as_ref(), to)
        .with_context(|| format!("casting column '{}' to {to:?}", schema.field(idx).name()))?;
    Ok(Some(casted))
}

fn required_column(
    batch: &RecordBatch,
    field: &'static str,
    names: &[&str],
    to: &DataType,
) -> Result<ArrayRef> {
    find_column(batch, names, to)?.ok_or_else(|| LoadError::MissingColumn(field).into())
}
