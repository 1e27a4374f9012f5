//! Point-table generation for pointgen.
//!
//! Loads a device inventory, pairs every device with the entries of a
//! device-type template, and writes the resulting rows as a timestamped CSV
//! file in the layout defined by `pointgen-core`.

pub mod compiler;
pub mod context;
pub mod encoding;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod model;
pub mod output;
pub mod templates;

pub use compiler::{compile, resolve_address};
pub use context::GenerationContext;
pub use encoding::OutputEncoding;
pub use engine::PointTableEngine;
pub use errors::GenerationError;
pub use loader::load_devices;
pub use model::{
    CompileOptions, CompiledTable, GenerateOptions, GenerationResult, UnaddressedPolicy,
    WriteOptions, WriteOutcome,
};
pub use output::write_point_table;
pub use templates::{StaticTemplates, TemplateDir, TemplateProvider};
