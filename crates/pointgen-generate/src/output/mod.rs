pub mod atomic;
pub mod csv;

use std::path::{Path, PathBuf};

use tracing::info;

use pointgen_core::DeviceType;

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::model::{CompiledTable, WriteOptions, WriteOutcome};

/// Sub-directory of the base directory that receives point tables.
pub const OUTPUT_DIR: &str = "output";

/// `{base_dir}/output/{device_type}_{YYYYMMDDHHMMSS}.csv`
pub fn output_path(base_dir: &Path, device_type: &DeviceType, ctx: &GenerationContext) -> PathBuf {
    base_dir
        .join(OUTPUT_DIR)
        .join(format!("{}_{}.csv", device_type, ctx.file_stamp()))
}

/// Write a compiled table under `base_dir` and report where it went.
///
/// `output/` is created when missing. Device type tags that are not a single
/// file name component are rejected before anything touches the disk.
pub fn write_point_table(
    table: &CompiledTable,
    device_type: &DeviceType,
    base_dir: &Path,
    options: &WriteOptions,
    ctx: &GenerationContext,
) -> Result<WriteOutcome, GenerationError> {
    let _entered = ctx.span().enter();

    device_type.validate()?;
    let path = output_path(base_dir, device_type, ctx);
    let bytes = self::csv::write_point_table_csv(&path, &table.rows, options.encoding)?;
    let rows = table.rows.len();
    let message = format!("成功生成点表文件：{}（共 {} 行）", path.display(), rows);

    info!(
        path = %path.display(),
        rows,
        bytes,
        encoding = %options.encoding,
        "{message}"
    );

    Ok(WriteOutcome {
        path,
        rows,
        message,
    })
}
