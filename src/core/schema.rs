//! Column descriptors: the schema that drives grouping and formatting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use strum::{Display, EnumString};

use crate::core::record::Record;
use crate::render::node::Node;

/// Declared value type of a column
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnType {
    Date,
    Url,
    Select,
    Image,
    Textarea,
    #[default]
    Default,
}

/// A single choice of a `select` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: None,
            icon: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

type RenderFn = dyn Fn(&Value, &Record) -> Node + Send + Sync;

/// Caller-supplied rendering that replaces all built-in formatting for a
/// column. Plain data: a shared function reference.
#[derive(Clone)]
pub struct CustomRender(Arc<RenderFn>);

impl CustomRender {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Record) -> Node + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: &Value, record: &Record) -> Node {
        (self.0)(value, record)
    }
}

impl fmt::Debug for CustomRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRender(..)")
    }
}

/// Static descriptor of one displayable field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct ColumnConfig {
    pub key: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip)]
    pub render: Option<CustomRender>,
}

impl ColumnConfig {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type: ColumnType::Default,
            options: Vec::new(),
            render: None,
        }
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Record) -> Node + Send + Sync + 'static,
    {
        self.render = Some(CustomRender::new(f));
        self
    }

    /// Exact string match of `value` against the declared options
    pub fn find_option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Check a column list and return warnings. Never fails: duplicate keys are
/// allowed, just suspicious.
pub fn validate_columns(columns: &[ColumnConfig]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for column in columns {
        if !seen.insert(column.key.as_str()) {
            warnings.push(format!("Duplicate column key '{}'", column.key));
        }
        if column.column_type == ColumnType::Select && column.options.is_empty() {
            warnings.push(format!(
                "Select column '{}' declares no options; values will render as generic badges",
                column.key
            ));
        }
    }

    warnings
}
