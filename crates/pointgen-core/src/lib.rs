//! Core contracts for pointgen.
//!
//! This crate defines the device/template records, generation inputs, and the
//! fixed column layout of the point table shared by the generator and the CLI.

pub mod error;
pub mod layout;
pub mod model;
pub mod types;

pub use error::{Error, Result};
pub use layout::{
    Address, COLUMN_COUNT, HEADER, Identity, OutputRow, Section, column_index, datatype_block,
};
pub use model::{DeviceRecord, TemplateEntry};
pub use types::{DeviceType, GenerationInputs, PointKind, is_file_component};
