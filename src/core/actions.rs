//! Action bar descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use strum::Display;

use crate::core::record::Record;

/// Visual weight of an action button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionVariant {
    #[default]
    Default,
    Primary,
    Secondary,
    Destructive,
    Outline,
    Ghost,
}

type ClickFn = dyn Fn(&Record) + Send + Sync;
type ConditionFn = dyn Fn(&Record) -> bool + Send + Sync;

/// A button in the dialog's action bar.
#[derive(Clone)]
pub struct ActionConfig {
    pub key: String,
    pub label: String,
    pub variant: ActionVariant,
    pub icon: Option<String>,
    on_click: Arc<ClickFn>,
    condition: Option<Arc<ConditionFn>>,
}

impl ActionConfig {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, on_click: F) -> Self
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            variant: ActionVariant::Default,
            icon: None,
            on_click: Arc::new(on_click),
            condition: None,
        }
    }

    pub fn with_variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Shown when there is no condition or the condition holds
    pub fn is_visible(&self, record: &Record) -> bool {
        self.condition.as_ref().is_none_or(|c| c(record))
    }

    pub(crate) fn fire(&self, record: &Record) {
        (self.on_click)(record)
    }
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("icon", &self.icon)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

/// Visibility rule of a declarative action: `record[field] == equals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct ActionWhen {
    pub field: String,
    pub equals: Value,
}

/// Declarative form of an action, as read from a schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct ActionSpec {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub variant: ActionVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<ActionWhen>,
}

impl ActionSpec {
    /// Attach a callback to make a live action
    pub fn into_action<F>(self, on_click: F) -> ActionConfig
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        let mut action = ActionConfig::new(self.key, self.label, on_click).with_variant(self.variant);
        if let Some(icon) = self.icon {
            action = action.with_icon(icon);
        }
        if let Some(ActionWhen { field, equals }) = self.when {
            action = action.with_condition(move |record| record.get(&field) == Some(&equals));
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_action_without_condition_is_visible() {
        let action = ActionConfig::new("edit", "Edit", |_| {});
        assert!(action.is_visible(&Record::new()));
    }

    #[test]
    fn test_condition_gates_visibility() {
        let action = ActionConfig::new("archive", "Archive", |_| {})
            .with_condition(|r| r.get("status") == Some(&json!("active")));
        assert!(action.is_visible(&Record::new().with("status", "active")));
        assert!(!action.is_visible(&Record::new().with("status", "archived")));
        assert!(!action.is_visible(&Record::new()));
    }

    #[test]
    fn test_fire_passes_record() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let action = ActionConfig::new("count", "Count", move |r| {
            if r.contains_key("id") {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        action.fire(&Record::new().with("id", 7));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_action_spec_when_compiles_to_condition() {
        let spec: ActionSpec = serde_yaml::from_str(
            r#"
key: archive
label: Archive
variant: destructive
icon: "🗄"
when:
  field: status
  equals: active
"#,
        )
        .unwrap();
        let action = spec.into_action(|_| {});
        assert_eq!(action.variant, ActionVariant::Destructive);
        assert_eq!(action.icon.as_deref(), Some("🗄"));
        assert!(action.is_visible(&Record::new().with("status", "active")));
        assert!(!action.is_visible(&Record::new().with("status", "done")));
    }

    #[test]
    fn test_action_spec_variant_defaults() {
        let spec: ActionSpec = serde_json::from_str(r#"{"key": "k", "label": "L"}"#).unwrap();
        assert_eq!(spec.variant, ActionVariant::Default);
        assert!(spec.when.is_none());
    }
}
