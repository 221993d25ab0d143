//! Reading schema and record files from disk.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::actions::ActionSpec;
use crate::core::error::{RecordViewError, Result};
use crate::core::record::Record;
use crate::core::schema::{ColumnConfig, validate_columns};

/// On-disk description of a details view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct SchemaFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub columns: Vec<ColumnConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Json5,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("json5") => Ok(Self::Json5),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(RecordViewError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Json5 => json5::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

fn read_as<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = FileFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    format.parse(&text)
}

/// Load a schema file, logging any column warnings
pub fn load_schema(path: &Path) -> Result<SchemaFile> {
    let schema: SchemaFile = read_as(path)?;
    debug!(
        "Loaded schema {} ({} columns, {} actions)",
        path.display(),
        schema.columns.len(),
        schema.actions.len()
    );
    for warning in validate_columns(&schema.columns) {
        warn!("{}: {warning}", path.display());
    }
    Ok(schema)
}

/// Load a record file; the top-level value must be a mapping
pub fn load_record(path: &Path) -> Result<Record> {
    let value: Value = read_as(path)?;
    Record::from_value(value)
}
