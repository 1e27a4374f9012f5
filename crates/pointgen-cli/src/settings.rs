use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pointgen_core::DeviceType;
use pointgen_generate::{OutputEncoding, UnaddressedPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "pointgen.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Defaults for generation requests; command line flags take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the `<DEVICE_TYPE>/<template>` tree.
    pub templates_dir: PathBuf,
    /// Directory that receives `output/`.
    pub base_dir: PathBuf,
    pub encoding: OutputEncoding,
    pub channel: String,
    pub device_name: String,
    pub db_num: String,
    pub unaddressed: UnaddressedPolicy,
    /// Driver name per device type tag.
    pub drives: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        let drives = BTreeMap::from([
            ("AB".to_string(), "AB-ControlLogixTCP".to_string()),
            ("SIEMENS".to_string(), "PLC_SIEMENS_S7_1200_TCP".to_string()),
        ]);
        Self {
            templates_dir: PathBuf::from("templates"),
            base_dir: PathBuf::from("."),
            encoding: OutputEncoding::Gbk,
            channel: "S127".to_string(),
            device_name: "PLC1".to_string(),
            db_num: "3".to_string(),
            unaddressed: UnaddressedPolicy::Blank,
            drives,
        }
    }
}

impl Settings {
    /// Driver configured for `device_type`, or an empty string.
    pub fn drive_for(&self, device_type: &DeviceType) -> String {
        self.drives
            .get(device_type.as_str())
            .cloned()
            .unwrap_or_default()
    }
}

/// Load settings from `path`, or the default file when `path` is `None`.
///
/// A missing default file yields built-in defaults; a missing explicit file is
/// an error.
pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    if !path.exists() {
        if explicit {
            return Err(SettingsError::NotFound(path));
        }
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
encoding = "utf8"
channel = "S200"

[drives]
SIEMENS = "S7_1500"
"#,
        )
        .unwrap();

        assert_eq!(settings.encoding, OutputEncoding::Utf8);
        assert_eq!(settings.channel, "S200");
        assert_eq!(settings.db_num, "3");
        assert_eq!(settings.unaddressed, UnaddressedPolicy::Blank);
        assert_eq!(settings.drive_for(&DeviceType::Siemens), "S7_1500");
        assert_eq!(settings.drive_for(&DeviceType::Ab), "");
    }

    #[test]
    fn default_drives_cover_addressed_types() {
        let settings = Settings::default();
        assert_eq!(settings.drive_for(&DeviceType::Ab), "AB-ControlLogixTCP");
        assert_eq!(
            settings.drive_for(&DeviceType::Siemens),
            "PLC_SIEMENS_S7_1200_TCP"
        );
        assert_eq!(settings.drive_for(&DeviceType::Other("MODBUS".into())), "");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("pointgen-missing-settings.toml");
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound(_)));
    }
}
