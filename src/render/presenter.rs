//! Modal presenter: record + columns + actions -> dialog view.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::core::actions::{ActionConfig, ActionVariant};
use crate::core::error::{RecordViewError, Result};
use crate::core::record::Record;
use crate::core::schema::ColumnConfig;
use crate::render::formatter::ValueFormatter;
use crate::render::grouper::{Section, group_columns};
use crate::render::node::Node;

pub const DEFAULT_TITLE: &str = "Details";

/// Caller-owned open/close state of the dialog.
///
/// The presenter never stores an open flag of its own; it only asks the
/// host to close after an action runs.
pub trait DialogHost {
    fn is_open(&self) -> bool;
    fn request_close(&mut self);
}

/// Shared open flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct OpenFlag(Rc<Cell<bool>>);

impl OpenFlag {
    pub fn new(open: bool) -> Self {
        Self(Rc::new(Cell::new(open)))
    }

    pub fn open(&self) {
        self.0.set(true);
    }
}

impl DialogHost for OpenFlag {
    fn is_open(&self) -> bool {
        self.0.get()
    }

    fn request_close(&mut self) {
        self.0.set(false);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub node: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub section: Section,
    pub heading: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyBlock {
    Separator,
    Section(SectionView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub key: String,
    pub label: String,
    pub variant: ActionVariant,
    pub icon: Option<String>,
}

/// Everything a host needs to draw the dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogView {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Vec<BodyBlock>,
    pub actions: Vec<ActionButton>,
}

impl DialogView {
    pub fn sections(&self) -> impl Iterator<Item = &SectionView> {
        self.body.iter().filter_map(|block| match block {
            BodyBlock::Section(section) => Some(section),
            BodyBlock::Separator => None,
        })
    }

    pub fn section(&self, section: Section) -> Option<&SectionView> {
        self.sections().find(|s| s.section == section)
    }

    pub fn separator_count(&self) -> usize {
        self.body
            .iter()
            .filter(|b| matches!(b, BodyBlock::Separator))
            .count()
    }

    /// Plain-text rendering, one line per row
    pub fn to_text(&self) -> String {
        let mut out = vec![self.title.clone()];
        if let Some(subtitle) = &self.subtitle {
            out.push(subtitle.clone());
        }
        for block in &self.body {
            match block {
                BodyBlock::Separator => out.push("-".repeat(40)),
                BodyBlock::Section(section) => {
                    out.push(String::new());
                    out.push(format!("[{}]", section.heading));
                    for field in &section.fields {
                        out.push(format!("{}: {}", field.label, field.node.plain_text()));
                    }
                }
            }
        }
        if !self.actions.is_empty() {
            out.push(String::new());
            out.push(
                self.actions
                    .iter()
                    .map(|a| format!("[{}]", a.label))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        out.join("\n")
    }
}

/// Composes a record, its columns and actions into a [`DialogView`] and
/// runs actions against the record.
#[derive(Debug, Clone)]
pub struct DetailsPresenter {
    record: Record,
    columns: Vec<ColumnConfig>,
    title: Option<String>,
    actions: Vec<ActionConfig>,
    formatter: ValueFormatter,
}

impl DetailsPresenter {
    pub fn new(record: Record, columns: Vec<ColumnConfig>) -> Self {
        Self {
            record,
            columns,
            title: None,
            actions: Vec::new(),
            formatter: ValueFormatter::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionConfig>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    /// Explicit title, else the first column's formatted value, else "Details"
    pub fn title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        self.columns
            .first()
            .filter(|column| self.record.present(&column.key).is_some())
            .map(|column| self.formatter.format_field(column, &self.record).plain_text())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn visible_actions(&self) -> impl Iterator<Item = &ActionConfig> {
        self.actions.iter().filter(|a| a.is_visible(&self.record))
    }

    pub fn view(&self) -> DialogView {
        let groups = group_columns(&self.columns);
        let mut body = Vec::new();
        for (section, columns) in groups.non_empty() {
            if !body.is_empty() {
                body.push(BodyBlock::Separator);
            }
            let fields = columns
                .iter()
                .map(|column| FieldView {
                    key: column.key.clone(),
                    label: column.label.clone(),
                    node: self.formatter.format_field(column, &self.record),
                })
                .collect();
            body.push(BodyBlock::Section(SectionView {
                section,
                heading: section.to_string(),
                fields,
            }));
        }

        let actions: Vec<ActionButton> = self
            .visible_actions()
            .map(|a| ActionButton {
                key: a.key.clone(),
                label: a.label.clone(),
                variant: a.variant,
                icon: a.icon.clone(),
            })
            .collect();

        debug!(
            "Presented {} columns in {} blocks with {} of {} actions",
            self.columns.len(),
            body.len(),
            actions.len(),
            self.actions.len()
        );

        DialogView {
            title: self.title(),
            subtitle: self.record.subtitle_text(),
            body,
            actions,
        }
    }

    /// Run the action's callback with the record, then close the dialog.
    ///
    /// Hidden and unknown actions are refused without running anything.
    pub fn invoke(&self, key: &str, host: &mut dyn DialogHost) -> Result<()> {
        let Some(action) = self.visible_actions().find(|a| a.key == key) else {
            warn!("Refusing unavailable action '{key}'");
            return Err(RecordViewError::ActionUnavailable {
                key: key.to_string(),
            });
        };
        info!("Invoking action '{key}'");
        action.fire(&self.record);
        host.request_close();
        Ok(())
    }
}

/// One-shot composition with default formatting
pub fn present(
    record: &Record,
    columns: &[ColumnConfig],
    title: Option<&str>,
    actions: &[ActionConfig],
) -> DialogView {
    let mut presenter =
        DetailsPresenter::new(record.clone(), columns.to_vec()).with_actions(actions.to_vec());
    if let Some(title) = title {
        presenter = presenter.with_title(title);
    }
    presenter.view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ColumnType;
    use crate::render::node::Sentinel;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingHost {
        open: bool,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl DialogHost for RecordingHost {
        fn is_open(&self) -> bool {
            self.open
        }

        fn request_close(&mut self) {
            self.log.borrow_mut().push("close");
            self.open = false;
        }
    }

    #[test]
    fn test_title_precedence() {
        let columns = vec![ColumnConfig::new("name", "Name")];
        let record = Record::new().with("name", "Ada");

        let explicit = DetailsPresenter::new(record.clone(), columns.clone()).with_title("Profile");
        assert_eq!(explicit.title(), "Profile");

        let derived = DetailsPresenter::new(record, columns.clone());
        assert_eq!(derived.title(), "Ada");

        let fallback = DetailsPresenter::new(Record::new(), columns);
        assert_eq!(fallback.title(), DEFAULT_TITLE);

        let no_columns = DetailsPresenter::new(Record::new().with("name", "x"), vec![]);
        assert_eq!(no_columns.title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_title_uses_first_column_type() {
        let columns = vec![ColumnConfig::new("due", "Due").with_type(ColumnType::Date)];
        let presenter = DetailsPresenter::new(Record::new().with("due", "2024-05-06"), columns);
        assert_eq!(presenter.title(), "5/6/2024");
    }

    #[test]
    fn test_only_basic_and_meta_gives_one_separator() {
        let columns = vec![
            ColumnConfig::new("title", "Title"),
            ColumnConfig::new("status", "Status"),
        ];
        let view = present(
            &Record::new().with("title", "T").with("status", "open"),
            &columns,
            None,
            &[],
        );
        assert_eq!(view.separator_count(), 1);
        assert!(matches!(&view.body[0], BodyBlock::Section(s) if s.section == Section::Basic));
        assert!(matches!(view.body[1], BodyBlock::Separator));
        assert!(matches!(&view.body[2], BodyBlock::Section(s) if s.section == Section::Meta));
    }

    #[test]
    fn test_no_columns_no_body() {
        let view = present(&Record::new(), &[], None, &[]);
        assert!(view.body.is_empty());
        assert_eq!(view.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_missing_values_render_not_provided() {
        let columns = vec![ColumnConfig::new("phone", "Phone")];
        let view = present(&Record::new(), &columns, None, &[]);
        let basic = view.section(Section::Basic).unwrap();
        assert_eq!(basic.fields[0].node, Node::placeholder(Sentinel::NotProvided));
    }

    #[test]
    fn test_conditional_action_hidden_and_not_invocable() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let action = ActionConfig::new("archive", "Archive", move |_| {
            *counter.lock().unwrap() += 1;
        })
        .with_condition(|r| r.get("status") == Some(&json!("active")));

        let presenter = DetailsPresenter::new(Record::new().with("status", "archived"), vec![])
            .with_actions(vec![action]);
        assert!(presenter.view().actions.is_empty());

        let mut host = RecordingHost {
            open: true,
            ..Default::default()
        };
        let err = presenter.invoke("archive", &mut host).unwrap_err();
        assert!(matches!(err, RecordViewError::ActionUnavailable { .. }));
        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(host.is_open());
    }

    #[test]
    fn test_invoke_runs_callback_then_closes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let seen = Arc::new(Mutex::new(None));
        let seen_in_cb = seen.clone();
        let action = ActionConfig::new("edit", "Edit", move |r| {
            *seen_in_cb.lock().unwrap() = r.get("id").cloned();
        });
        let presenter = DetailsPresenter::new(Record::new().with("id", 9), vec![])
            .with_actions(vec![action]);

        let mut host = RecordingHost {
            open: true,
            log: log.clone(),
        };
        presenter.invoke("edit", &mut host).unwrap();

        assert_eq!(*seen.lock().unwrap(), Some(json!(9)));
        assert_eq!(*log.borrow(), vec!["close"]);
        assert!(!host.is_open());
    }

    #[test]
    fn test_invoke_order_callback_before_close() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let order_cb = order.clone();
        let action = ActionConfig::new("go", "Go", move |_| order_cb.lock().unwrap().push("callback"));
        let presenter = DetailsPresenter::new(Record::new(), vec![]).with_actions(vec![action]);

        struct OrderHost(Arc<Mutex<Vec<&'static str>>>);
        impl DialogHost for OrderHost {
            fn is_open(&self) -> bool {
                true
            }
            fn request_close(&mut self) {
                self.0.lock().unwrap().push("close");
            }
        }

        let mut host = OrderHost(order.clone());
        presenter.invoke("go", &mut host).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["callback", "close"]);
    }

    #[test]
    fn test_open_flag_is_shared() {
        let flag = OpenFlag::new(true);
        let mut handle = flag.clone();
        handle.request_close();
        assert!(!flag.is_open());
        flag.open();
        assert!(handle.is_open());
    }

    #[test]
    fn test_to_text() {
        let columns = vec![
            ColumnConfig::new("title", "Title"),
            ColumnConfig::new("views", "Views"),
        ];
        let record = Record::new().with("title", "Widget").with("views", 1500);
        let action = ActionConfig::new("edit", "Edit", |_| {});
        let text = present(&record, &columns, None, &[action]).to_text();
        assert_eq!(
            text,
            "Widget\n\n[Basic Information]\nTitle: Widget\n----------------------------------------\n\n[Meta Information]\nViews: 1,500\n\n[Edit]"
        );
    }
}
