use tracing::{debug, info, warn};

use pointgen_core::{
    Address, DeviceRecord, DeviceType, GenerationInputs, Identity, OutputRow, PointKind,
    TemplateEntry,
};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::model::{CompileOptions, CompiledTable, UnaddressedPolicy};

/// `n[3]` value for digital points.
const DIGITAL_AREA: &str = "0";
/// `n[3]` value for every other point.
const WORD_AREA: &str = "7";

/// Cross-join devices with template entries into point-table rows.
///
/// Rows are ordered device-major, template-minor. The first invalid address
/// aborts the whole table.
pub fn compile(
    devices: &[DeviceRecord],
    entries: &[TemplateEntry],
    inputs: &GenerationInputs,
    options: &CompileOptions,
    ctx: &GenerationContext,
) -> Result<CompiledTable, GenerationError> {
    let _entered = ctx.span().enter();

    if !inputs.device_type.is_addressed() {
        match options.unaddressed {
            UnaddressedPolicy::Reject => {
                return Err(GenerationError::UndefinedAddressing {
                    device_type: inputs.device_type.to_string(),
                });
            }
            UnaddressedPolicy::Blank => {
                warn!(
                    device_type = %inputs.device_type,
                    "no addressing rule for device type, address columns left blank"
                );
            }
        }
    }

    let mut table = CompiledTable {
        rows: Vec::with_capacity(devices.len() * entries.len()),
        count: 0,
    };

    for device in devices {
        for entry in entries {
            let kind = entry.kind();
            let identity = Identity {
                channel: inputs.channel.clone(),
                drive: inputs.drive.clone(),
                device_name: inputs.device_name.clone(),
                point_type: entry.point_type.clone(),
                tag_name: format!("{}{}", device.code, entry.name),
                description: format!("{}{}", device.description, entry.desc),
            };
            let address = resolve_address(device, entry, kind, inputs)?;

            table.rows.push(OutputRow::assemble(identity, address, kind));
            table.count += 1;
        }
        debug!(device = %device.code, points = entries.len(), "device compiled");
    }

    info!(
        devices = devices.len(),
        template_entries = entries.len(),
        rows = table.count,
        "point table compiled"
    );

    Ok(table)
}

/// Compute `n[1]`..`n[4]` for one device/entry pair.
pub fn resolve_address(
    device: &DeviceRecord,
    entry: &TemplateEntry,
    kind: PointKind,
    inputs: &GenerationInputs,
) -> Result<Address, GenerationError> {
    let digital = kind == PointKind::Digital;
    let (area, bit) = match inputs.device_type {
        DeviceType::Siemens if digital => (DIGITAL_AREA, entry.add_bit.as_str()),
        DeviceType::Siemens => (WORD_AREA, "0"),
        // AB keeps the template bit for word points too.
        DeviceType::Ab if digital => (DIGITAL_AREA, entry.add_bit.as_str()),
        DeviceType::Ab => (WORD_AREA, entry.add_bit.as_str()),
        DeviceType::Other(_) => return Ok(Address::blank()),
    };

    let base = parse_int(&device.base_offset, "base offset", device, entry)?;
    let offset = parse_int(&entry.add_byte, "addbyte", device, entry)?;
    let n1 = base
        .checked_add(offset)
        .ok_or_else(|| invalid_address(device, entry, "addbyte", &entry.add_byte))?;

    Ok(Address {
        n1: n1.to_string(),
        n2: inputs.db_num.clone(),
        n3: area.to_string(),
        n4: bit.to_string(),
    })
}

fn parse_int(
    value: &str,
    field: &'static str,
    device: &DeviceRecord,
    entry: &TemplateEntry,
) -> Result<i64, GenerationError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_address(device, entry, field, value))
}

fn invalid_address(
    device: &DeviceRecord,
    entry: &TemplateEntry,
    field: &'static str,
    value: &str,
) -> GenerationError {
    GenerationError::InvalidAddress {
        device: device.code.clone(),
        entry: entry.name.clone(),
        field,
        value: value.to_string(),
    }
}
