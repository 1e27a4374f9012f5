use thiserror::Error;

/// Core error type shared across pointgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The device type tag is blank or is not a single file name component.
    #[error("invalid device type: '{0}'")]
    InvalidDeviceType(String),
    /// A row does not have one field per header column.
    #[error("row has {actual} fields, expected {expected}")]
    RowWidth { expected: usize, actual: usize },
}

/// Convenience alias for results returned by pointgen crates.
pub type Result<T> = std::result::Result<T, Error>;
