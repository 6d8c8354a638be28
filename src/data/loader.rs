use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{LaunchRecord, LaunchTable, OutcomeClass};

/// Column names every input file must carry.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType {
        column: &'static str,
        data_type: DataType,
    },

    #[error("expected a top-level JSON array of records")]
    NotRecordArray,

    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (others ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let table = LaunchTable::from_records(records).ok_or(LoadError::Empty)?;
    log::info!(
        "Loaded {} launch records across {} sites from {}",
        table.len(),
        table.sites().len(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        records.push(LaunchRecord::new(
            cell(site_idx),
            parse_payload(cell(payload_idx), row)?,
            OutcomeClass::parse(cell(class_idx))
                .ok_or_else(|| invalid(row, CLASS_COLUMN, cell(class_idx)))?,
            cell(booster_idx),
        ));
    }
    Ok(records)
}

fn parse_payload(s: &str, row: usize) -> Result<f64, LoadError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, s))
}

fn invalid(row: usize, column: &'static str, value: impl ToString) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = root
        .as_array()
        .ok_or(LoadError::NotRecordArray)?;

    rows.iter()
        .enumerate()
        .map(|(row, value)| -> Result<LaunchRecord, LoadError> {
            let obj = value.as_object().ok_or(LoadError::NotAnObject(row))?;

            let payload_mass_kg = json_field(obj, PAYLOAD_COLUMN)?
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, &obj[PAYLOAD_COLUMN]))?;
            let class = json_field(obj, CLASS_COLUMN)?
                .as_f64()
                .and_then(OutcomeClass::from_f64)
                .ok_or_else(|| invalid(row, CLASS_COLUMN, &obj[CLASS_COLUMN]))?;

            Ok(LaunchRecord::new(
                json_string(obj, SITE_COLUMN, row)?,
                payload_mass_kg,
                class,
                json_string(obj, BOOSTER_COLUMN, row)?,
            ))
        })
        .collect()
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue, LoadError> {
    obj.get(column).ok_or(LoadError::MissingColumn(column))
}

fn json_string(
    obj: &Map<String, JsonValue>,
    column: &'static str,
    row: usize,
) -> Result<String, LoadError> {
    match json_field(obj, column)? {
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(invalid(row, column, other)),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): numeric columns of any width are cast
/// to `Float64`, string columns may be `Utf8` or `LargeUtf8`.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let column = |name: &'static str| -> Result<ArrayRef, LoadError> {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };

        let sites = string_column(column(SITE_COLUMN)?, SITE_COLUMN)?;
        let boosters = string_column(column(BOOSTER_COLUMN)?, BOOSTER_COLUMN)?;
        let payloads = numeric_column(column(PAYLOAD_COLUMN)?, PAYLOAD_COLUMN)?;
        let classes = numeric_column(column(CLASS_COLUMN)?, CLASS_COLUMN)?;

        let sites = sites.as_string::<i32>();
        let boosters = boosters.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();

        for i in 0..batch.num_rows() {
            let row = records.len();
            if sites.is_null(i) {
                return Err(invalid(row, SITE_COLUMN, "null"));
            }
            if boosters.is_null(i) {
                return Err(invalid(row, BOOSTER_COLUMN, "null"));
            }
            let payload = float_cell(payloads, i);
            let payload_mass_kg = payload
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, describe(payload)))?;
            let class_value = float_cell(classes, i);
            let class = class_value
                .and_then(OutcomeClass::from_f64)
                .ok_or_else(|| invalid(row, CLASS_COLUMN, describe(class_value)))?;

            records.push(LaunchRecord::new(
                sites.value(i),
                payload_mass_kg,
                class,
                boosters.value(i),
            ));
        }
    }

    Ok(records)
}

// -- Arrow helpers --

fn float_cell(arr: &Float64Array, i: usize) -> Option<f64> {
    (!arr.is_null(i)).then(|| arr.value(i))
}

fn describe(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Normalise a string column to `Utf8`.
fn string_column(col: ArrayRef, column: &'static str) -> Result<ArrayRef, LoadError> {
    match col.data_type().clone() {
        DataType::Utf8 => Ok(col),
        DataType::LargeUtf8 | DataType::Utf8View => Ok(cast(col.as_ref(), &DataType::Utf8)?),
        data_type => Err(LoadError::UnsupportedType { column, data_type }),
    }
}

/// Normalise a numeric or boolean column to `Float64`.
fn numeric_column(col: ArrayRef, column: &'static str) -> Result<ArrayRef, LoadError> {
    let data_type = col.data_type();
    if data_type.is_numeric() || *data_type == DataType::Boolean {
        Ok(cast(col.as_ref(), &DataType::Float64)?)
    } else {
        Err(LoadError::UnsupportedType {
            column,
            data_type: data_type.clone(),
        })
    }
}
