use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use pointgen_core::OutputRow;

use crate::encoding::OutputEncoding;

/// What to do with device types that have no addressing rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaddressedPolicy {
    /// Leave `n[1]`..`n[4]` empty.
    #[default]
    Blank,
    /// Fail with `UndefinedAddressing`.
    Reject,
}

/// Options for compiling a point table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileOptions {
    pub unaddressed: UnaddressedPolicy,
}

/// Options for writing a point table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteOptions {
    pub encoding: OutputEncoding,
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory whose `output/` sub-directory receives the point table.
    pub base_dir: PathBuf,
    /// Proceed with an empty device list or template (writes a header-only file).
    pub allow_empty: bool,
    pub compile: CompileOptions,
    pub write: WriteOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            allow_empty: true,
            compile: CompileOptions::default(),
            write: WriteOptions::default(),
        }
    }
}

/// Rows produced by the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTable {
    pub rows: Vec<OutputRow>,
    pub count: usize,
}

/// Outcome of writing a point table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub rows: usize,
    pub message: String,
}

/// Result of a full generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output_path: PathBuf,
    pub devices: usize,
    pub template_entries: usize,
    pub rows: usize,
    pub message: String,
}
