use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while loading inputs, compiling, or writing a point table.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("cannot decode '{}' as UTF-8 or GBK", path.display())]
    Decode { path: PathBuf },
    #[error("missing column '{column}' in '{}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("invalid address for device '{device}', template entry '{entry}': {field} '{value}' is not an integer")]
    InvalidAddress {
        device: String,
        entry: String,
        field: &'static str,
        value: String,
    },
    #[error("no addressing rule for device type '{device_type}'")]
    UndefinedAddressing { device_type: String },
    #[error("{0} is empty")]
    EmptyInput(&'static str),
    #[error("template error: {0}")]
    Template(String),
    #[error("cannot encode output as {encoding}: unmappable character in '{text}'")]
    Encode { encoding: &'static str, text: String },
    #[error(transparent)]
    Core(#[from] pointgen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
