use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use pointgen_core::DeviceRecord;

use crate::context::GenerationContext;
use crate::encoding::read_text;
use crate::errors::GenerationError;

/// Device code column of the inventory.
pub const CODE_COLUMN: &str = "设备代号";
/// Device description column of the inventory.
pub const DESCRIPTION_COLUMN: &str = "设备描述";
/// Base address column of the inventory.
pub const OFFSET_COLUMN: &str = "拼接地址";

/// Load the device inventory from a CSV file.
///
/// The file may be UTF-8 (with or without BOM) or GBK. Columns are matched by
/// header name. A file without data rows yields an empty list and a warning.
pub fn load_devices(
    path: &Path,
    ctx: &GenerationContext,
) -> Result<Vec<DeviceRecord>, GenerationError> {
    let _entered = ctx.span().enter();
    let text = read_text(path)?;
    let devices = parse_devices(&text, path)?;

    if devices.is_empty() {
        warn!(path = %path.display(), "device list is empty or malformed");
    } else {
        info!(path = %path.display(), devices = devices.len(), "device list loaded");
    }

    Ok(devices)
}

fn parse_devices(text: &str, path: &Path) -> Result<Vec<DeviceRecord>, GenerationError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    // No header row at all: nothing to look columns up in.
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let code = column_position(&headers, CODE_COLUMN, path)?;
    let description = column_position(&headers, DESCRIPTION_COLUMN, path)?;
    let offset = column_position(&headers, OFFSET_COLUMN, path)?;

    let mut devices = Vec::new();
    for record in reader.records() {
        let record = record?;
        devices.push(DeviceRecord {
            code: field(&record, code),
            description: field(&record, description),
            base_offset: field(&record, offset),
        });
    }
    Ok(devices)
}

pub(crate) fn column_position(
    headers: &StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, GenerationError> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| GenerationError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

pub(crate) fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}
