use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;

use recordview::core::{ActionConfig, ColumnConfig, ColumnType, Record, load_record, load_schema};
use recordview::render::{
    BadgeStyle, BodyBlock, DetailsPresenter, DialogHost, Node, OpenFlag, Section, Sentinel,
    present,
};

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("sample-data")
        .join(name)
}

fn widget_presenter() -> (DetailsPresenter, Arc<Mutex<Vec<String>>>) {
    let schema = load_schema(&sample("widget-schema.yml")).expect("sample schema should load");
    let record = load_record(&sample("widget.json")).expect("sample record should load");
    let fired = Arc::new(Mutex::new(Vec::new()));
    let actions = schema
        .actions
        .iter()
        .cloned()
        .map(|spec| {
            let fired = fired.clone();
            let key = spec.key.clone();
            spec.into_action(move |_| fired.lock().unwrap().push(key.clone()))
        })
        .collect();
    let presenter = DetailsPresenter::new(record, schema.columns).with_actions(actions);
    (presenter, fired)
}

#[test]
fn widget_end_to_end() {
    let columns = vec![
        ColumnConfig::new("title", "Title"),
        ColumnConfig::new("subtitle", "Subtitle"),
        ColumnConfig::new("tags", "Tags"),
        ColumnConfig::new("createdAt", "Created").with_type(ColumnType::Date),
    ];
    let record = Record::from_value(json!({
        "title": "Widget",
        "subtitle": 42,
        "tags": ["a", "b"],
        "createdAt": "2024-01-01"
    }))
    .unwrap();

    let view = present(&record, &columns, None, &[]);

    assert_eq!(view.title, "Widget");
    assert_eq!(view.subtitle.as_deref(), Some("42"));

    let basic = view.section(Section::Basic).expect("title and subtitle land in basic");
    let basic_keys: Vec<&str> = basic.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(basic_keys, vec!["title", "subtitle"]);
    assert_eq!(basic.fields[0].node, Node::text("Widget"));
    assert_eq!(basic.fields[1].node.plain_text(), "42");
    assert_eq!(view.separator_count(), 2);

    let other = view.section(Section::Other).expect("tags land in other");
    assert_eq!(
        other.fields[0].node,
        Node::TagList {
            tags: vec![Node::badge("a"), Node::badge("b")]
        }
    );

    let meta = view.section(Section::Meta).expect("createdAt lands in meta");
    assert_eq!(meta.heading, "Meta Information");
    assert_eq!(
        meta.fields[0].node,
        Node::Date {
            text: "1/1/2024".into()
        }
    );
}

#[test]
fn sample_schema_groups_every_section() {
    let (presenter, _) = widget_presenter();
    let view = presenter.view();

    let order: Vec<Section> = view.sections().map(|s| s.section).collect();
    assert_eq!(
        order,
        vec![Section::Basic, Section::Media, Section::Other, Section::Meta]
    );
    assert_eq!(view.separator_count(), 3);
    assert!(matches!(view.body.first(), Some(BodyBlock::Section(_))));
    assert!(matches!(view.body.last(), Some(BodyBlock::Section(_))));

    let keys = |section: Section| -> Vec<String> {
        view.section(section)
            .map(|s| s.fields.iter().map(|f| f.key.clone()).collect())
            .unwrap_or_default()
    };
    assert_eq!(keys(Section::Basic), vec!["title", "subtitle", "email"]);
    assert_eq!(keys(Section::Media), vec!["thumbnail_image"]);
    assert_eq!(keys(Section::Meta), vec!["status", "createdAt", "views"]);
    assert_eq!(
        keys(Section::Other),
        vec!["homepage", "notes", "tags", "dimensions", "in_stock"]
    );
}

#[test]
fn sample_values_render_by_type() {
    let (presenter, _) = widget_presenter();
    let view = presenter.view();
    let node = |section: Section, key: &str| -> Node {
        view.section(section)
            .and_then(|s| s.fields.iter().find(|f| f.key == key))
            .map(|f| f.node.clone())
            .unwrap_or_else(|| panic!("missing field {key}"))
    };

    assert_eq!(view.title, "Widget");
    assert_eq!(
        node(Section::Meta, "status"),
        Node::Badge {
            text: "Active".into(),
            color: Some("green".into()),
            icon: Some("●".into()),
            style: BadgeStyle::Tinted,
        }
    );
    assert_eq!(node(Section::Meta, "views").plain_text(), "1,500");
    assert_eq!(node(Section::Other, "in_stock"), Node::YesNo { value: true });
    assert_eq!(
        node(Section::Other, "notes"),
        Node::Preformatted {
            lines: vec!["Ships in two boxes.".into(), "Assembly required.".into()]
        }
    );

    match node(Section::Media, "thumbnail_image") {
        Node::ImageGrid { images, caption } => {
            assert_eq!(images.len(), 2);
            assert_eq!(caption, "2 images");
        }
        other => panic!("expected image grid, got {other:?}"),
    }

    match node(Section::Other, "dimensions") {
        Node::KeyValue { rows } => {
            let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
            assert_eq!(keys, vec!["width", "manual"]);
            assert!(matches!(rows[1].1, Node::Link { .. }));
        }
        other => panic!("expected key/value rows, got {other:?}"),
    }
}

#[test]
fn conditional_action_follows_record() {
    let (presenter, fired) = widget_presenter();
    let labels: Vec<String> = presenter
        .view()
        .actions
        .iter()
        .map(|a| a.label.clone())
        .collect();
    assert_eq!(labels, vec!["Edit", "Archive"]);

    let mut host = OpenFlag::new(true);
    presenter.invoke("archive", &mut host).unwrap();
    assert_eq!(*fired.lock().unwrap(), vec!["archive".to_string()]);
    assert!(!host.is_open());

    let archived = DetailsPresenter::new(
        presenter.record().clone().with("status", "archived"),
        presenter.columns().to_vec(),
    )
    .with_actions(
        load_schema(&sample("widget-schema.yml"))
            .unwrap()
            .actions
            .into_iter()
            .map(|spec| spec.into_action(|_| {}))
            .collect(),
    );
    let keys: Vec<String> = archived.view().actions.into_iter().map(|a| a.key).collect();
    assert_eq!(keys, vec!["edit"]);

    let mut host = OpenFlag::new(true);
    assert!(archived.invoke("archive", &mut host).is_err());
    assert!(host.is_open());
}

#[test]
fn select_without_match_keeps_raw_value() {
    let columns = vec![
        ColumnConfig::new("status", "Status")
            .with_type(ColumnType::Select)
            .with_options(vec![recordview::core::SelectOption::new("active", "Active")]),
    ];
    let record = Record::new().with("status", "pending_review");
    let view = present(&record, &columns, None, &[]);
    let field = &view.section(Section::Meta).unwrap().fields[0];
    assert_eq!(field.node.plain_text(), "pending_review");
}

#[test]
fn absent_values_are_not_provided_for_every_type() {
    let columns: Vec<ColumnConfig> = [
        ColumnType::Date,
        ColumnType::Url,
        ColumnType::Select,
        ColumnType::Image,
        ColumnType::Textarea,
        ColumnType::Default,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, t)| ColumnConfig::new(format!("field{i}"), format!("Field {i}")).with_type(t))
    .collect();
    let record = Record::new().with("field0", serde_json::Value::Null);

    let view = present(&record, &columns, Some("Empty"), &[]);
    assert_eq!(view.title, "Empty");
    for section in view.sections() {
        for field in &section.fields {
            assert_eq!(field.node, Node::placeholder(Sentinel::NotProvided), "{}", field.key);
        }
    }
}

#[test]
fn callback_sees_record_before_close() {
    let seen = Arc::new(Mutex::new(None));
    let seen_cb = seen.clone();
    let action = ActionConfig::new("edit", "Edit", move |record| {
        *seen_cb.lock().unwrap() = record.get("id").cloned();
    });
    let presenter =
        DetailsPresenter::new(Record::new().with("id", 3), vec![]).with_actions(vec![action]);

    let flag = OpenFlag::new(true);
    let mut host = flag.clone();
    presenter.invoke("edit", &mut host).unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(json!(3)));
    assert!(!flag.is_open());
}

#[test]
fn view_serializes_with_kind_tags() {
    let columns = vec![ColumnConfig::new("email", "Email")];
    let view = present(&Record::new().with("email", "a@b.c"), &columns, None, &[]);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["body"][0]["kind"], "section");
    assert_eq!(json["body"][0]["fields"][0]["node"]["kind"], "text");
    assert_eq!(json["title"], "a@b.c");
}
