use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Controller family a point table is generated for.
///
/// The tag doubles as the template directory name and the output file prefix,
/// so `Other` keeps the tag exactly as it was given and must be a single file
/// name component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceType {
    Siemens,
    Ab,
    Other(String),
}

impl DeviceType {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceType::Siemens => "SIEMENS",
            DeviceType::Ab => "AB",
            DeviceType::Other(tag) => tag,
        }
    }

    /// Reject tags that cannot be used as one file name component.
    pub fn validate(&self) -> Result<()> {
        if is_file_component(self.as_str()) {
            Ok(())
        } else {
            Err(Error::InvalidDeviceType(self.as_str().to_string()))
        }
    }

    /// Whether the compiler has an addressing rule for this family.
    pub fn is_addressed(&self) -> bool {
        !matches!(self, DeviceType::Other(_))
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "SIEMENS" => Ok(DeviceType::Siemens),
            "AB" => Ok(DeviceType::Ab),
            other => {
                let device_type = DeviceType::Other(other.to_string());
                device_type.validate()?;
                Ok(device_type)
            }
        }
    }
}

/// Whether `value` names exactly one entry inside a directory: not blank, no
/// path separators, no drive prefix, no `..`.
pub fn is_file_component(value: &str) -> bool {
    !value.trim().is_empty()
        && !value.contains(['/', '\\', ':', '\0'])
        && !value.contains("..")
}

impl TryFrom<String> for DeviceType {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceType> for String {
    fn from(value: DeviceType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a template entry's type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Code `"1"`.
    Analog,
    /// Code `"2"`.
    Digital,
    Other,
}

impl PointKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => PointKind::Analog,
            "2" => PointKind::Digital,
            _ => PointKind::Other,
        }
    }
}

/// Caller-supplied labels for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationInputs {
    /// Channel the points belong to (`所属通道`).
    pub channel: String,
    /// Owning device label (`所属设备`).
    pub device_name: String,
    /// Driver name (`驱动`).
    pub drive: String,
    /// DB block number, written verbatim as `n[2]`.
    pub db_num: String,
    pub device_type: DeviceType,
}
