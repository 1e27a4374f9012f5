use serde::{Deserialize, Serialize};

use crate::types::PointKind;

/// One row of the device inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device identifier (`设备代号`), used as the tag prefix.
    pub code: String,
    /// Device description (`设备描述`), used as the description prefix.
    pub description: String,
    /// Base address (`拼接地址`). Only parsed for addressed device types.
    pub base_offset: String,
}

/// A reusable point definition applied to every device of a type.
///
/// Field names on the wire follow the template files: `name`, `desc`, `type`,
/// `addbyte`, `addbit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Tag suffix.
    pub name: String,
    /// Description suffix.
    pub desc: String,
    #[serde(rename = "type")]
    pub point_type: String,
    #[serde(rename = "addbyte")]
    pub add_byte: String,
    #[serde(rename = "addbit")]
    pub add_bit: String,
}

impl TemplateEntry {
    pub fn kind(&self) -> PointKind {
        PointKind::from_code(&self.point_type)
    }
}
