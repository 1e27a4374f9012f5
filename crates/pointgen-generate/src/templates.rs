use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use pointgen_core::{DeviceType, TemplateEntry, is_file_component};

use crate::encoding::read_text;
use crate::errors::GenerationError;
use crate::loader::column_position;

/// Header keys of a CSV template file.
pub const TEMPLATE_COLUMNS: [&str; 5] = ["name", "desc", "type", "addbyte", "addbit"];

/// Source of template entries for a device type.
pub trait TemplateProvider {
    /// Ordered template entries for `device_type`. Entries are not validated.
    fn get_template(
        &self,
        device_type: &DeviceType,
    ) -> Result<Vec<TemplateEntry>, GenerationError>;
}

/// In-memory templates keyed by device type.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    entries: HashMap<DeviceType, Vec<TemplateEntry>>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, device_type: DeviceType, entries: Vec<TemplateEntry>) -> Self {
        self.insert(device_type, entries);
        self
    }

    pub fn insert(&mut self, device_type: DeviceType, entries: Vec<TemplateEntry>) {
        self.entries.insert(device_type, entries);
    }
}

impl TemplateProvider for StaticTemplates {
    fn get_template(
        &self,
        device_type: &DeviceType,
    ) -> Result<Vec<TemplateEntry>, GenerationError> {
        self.entries.get(device_type).cloned().ok_or_else(|| {
            GenerationError::Template(format!("no template registered for '{device_type}'"))
        })
    }
}

/// Templates stored as `<root>/<DEVICE_TYPE>/<name>.csv` or `<name>.json`.
#[derive(Debug, Clone)]
pub struct TemplateDir {
    root: PathBuf,
    selected: Option<String>,
}

impl TemplateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            selected: None,
        }
    }

    /// Use the named template instead of the single template in the directory.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.selected = Some(name.into());
        self
    }

    /// Device type tags that have a template directory, sorted.
    pub fn device_types(&self) -> Result<Vec<String>, GenerationError> {
        let mut tags = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                tags.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        tags.sort();
        Ok(tags)
    }

    /// Template names available for a device type, sorted.
    pub fn template_names(&self, device_type: &DeviceType) -> Result<Vec<String>, GenerationError> {
        let dir = self.device_dir(device_type)?;
        if !dir.is_dir() {
            return Err(GenerationError::Template(format!(
                "no template directory for '{device_type}' under '{}'",
                self.root.display()
            )));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file()
                && template_format(&path).is_some()
                && let Some(stem) = path.file_stem()
            {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Load a template by name (with or without extension).
    pub fn load(
        &self,
        device_type: &DeviceType,
        name: &str,
    ) -> Result<Vec<TemplateEntry>, GenerationError> {
        let path = self.resolve(device_type, name)?;
        let entries = match template_format(&path) {
            Some(TemplateFormat::Json) => serde_json::from_str(&read_text(&path)?)?,
            _ => parse_csv_template(&read_text(&path)?, &path)?,
        };
        debug!(
            path = %path.display(),
            entries = entries.len(),
            "template loaded"
        );
        Ok(entries)
    }

    fn device_dir(&self, device_type: &DeviceType) -> Result<PathBuf, GenerationError> {
        device_type.validate()?;
        Ok(self.root.join(device_type.as_str()))
    }

    fn resolve(&self, device_type: &DeviceType, name: &str) -> Result<PathBuf, GenerationError> {
        if !is_file_component(name) {
            return Err(GenerationError::Template(format!(
                "invalid template name '{name}'"
            )));
        }
        let dir = self.device_dir(device_type)?;
        let direct = dir.join(name);
        if direct.is_file() && template_format(&direct).is_some() {
            return Ok(direct);
        }
        ["csv", "json"]
            .iter()
            .map(|ext| dir.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                GenerationError::Template(format!(
                    "template '{name}' not found for '{device_type}' in '{}'",
                    dir.display()
                ))
            })
    }
}

impl TemplateProvider for TemplateDir {
    fn get_template(
        &self,
        device_type: &DeviceType,
    ) -> Result<Vec<TemplateEntry>, GenerationError> {
        if let Some(name) = &self.selected {
            return self.load(device_type, name);
        }

        let names = self.template_names(device_type)?;
        match names.as_slice() {
            [only] => self.load(device_type, only),
            [] => Err(GenerationError::Template(format!(
                "no templates for '{device_type}'"
            ))),
            _ => Err(GenerationError::Template(format!(
                "several templates for '{device_type}' ({}); select one",
                names.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateFormat {
    Csv,
    Json,
}

fn template_format(path: &Path) -> Option<TemplateFormat> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Some(TemplateFormat::Csv),
        "json" => Some(TemplateFormat::Json),
        _ => None,
    }
}

fn parse_csv_template(text: &str, path: &Path) -> Result<Vec<TemplateEntry>, GenerationError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    for column in TEMPLATE_COLUMNS {
        column_position(&headers, column, path)?;
    }

    let mut entries = Vec::new();
    for entry in reader.deserialize::<TemplateEntry>() {
        entries.push(entry?);
    }
    Ok(entries)
}
