//! Value formatter: (raw value, column, record) -> presentation node.
//!
//! Formatting is total. Every input shape produces a node; malformed dates
//! and URLs degrade to literal text instead of failing.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use std::fmt::Write;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::record::Record;
use crate::core::schema::{ColumnConfig, ColumnType};
use crate::render::node::{BadgeStyle, ImageRef, Node, Sentinel};

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const INVALID_DATE: &str = "Invalid Date";

lazy_static! {
    static ref URL_LIKE: Regex = Regex::new(r"^https?://").unwrap();
}

/// Display constants for the formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// strftime pattern for `date` columns
    pub date_format: String,
    pub image_width: u16,
    pub image_height: u16,
    /// Square edge of a thumbnail in an image grid
    pub thumbnail_size: u16,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            image_width: 400,
            image_height: 300,
            thumbnail_size: 100,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValueFormatter {
    options: FormatOptions,
}

impl ValueFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format `value` for `column`.
    ///
    /// Absent and null values short-circuit to the "Not provided" sentinel
    /// before custom renderers or type dispatch run.
    pub fn format(&self, value: Option<&Value>, column: &ColumnConfig, record: &Record) -> Node {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Node::placeholder(Sentinel::NotProvided);
        };

        if let Some(render) = &column.render {
            return render.call(value, record);
        }

        match column.column_type {
            ColumnType::Date => Node::Date {
                text: self.format_date(value),
            },
            ColumnType::Url => {
                let href = value_text(value);
                Node::Link {
                    text: href.clone(),
                    href,
                    external: true,
                }
            }
            ColumnType::Select => format_select(value, column),
            ColumnType::Image => self.format_image(value),
            ColumnType::Textarea => Node::Preformatted {
                lines: value_text(value)
                    .replace("\r\n", "\n")
                    .split('\n')
                    .map(str::to_string)
                    .collect(),
            },
            ColumnType::Default => format_by_shape(value),
        }
    }

    /// Format a column's value straight from the record
    pub fn format_field(&self, column: &ColumnConfig, record: &Record) -> Node {
        self.format(record.get(&column.key), column, record)
    }

    fn format_date(&self, value: &Value) -> String {
        match parse_date(value) {
            Some(date) => render_date(date, &self.options.date_format),
            None => INVALID_DATE.to_string(),
        }
    }

    fn format_image(&self, value: &Value) -> Node {
        match value {
            Value::String(src) if !src.is_empty() => Node::Image {
                image: ImageRef::new(src.as_str(), self.options.image_width, self.options.image_height),
            },
            Value::Array(items) => {
                let size = self.options.thumbnail_size;
                let images: Vec<ImageRef> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(|src| ImageRef::new(src, size, size))
                    .collect();
                if images.is_empty() {
                    return Node::placeholder(Sentinel::NoImage);
                }
                let caption = match images.len() {
                    1 => "1 image".to_string(),
                    n => format!("{n} images"),
                };
                Node::ImageGrid { images, caption }
            }
            _ => Node::placeholder(Sentinel::NoImage),
        }
    }
}

/// Format with default options
pub fn format_value(value: Option<&Value>, column: &ColumnConfig, record: &Record) -> Node {
    ValueFormatter::default().format(value, column, record)
}

fn format_select(value: &Value, column: &ColumnConfig) -> Node {
    let raw = value_text(value);
    match column.find_option(&raw) {
        Some(option) => Node::Badge {
            text: option.label.clone(),
            color: option.color.clone(),
            icon: option.icon.clone(),
            style: if option.color.is_some() {
                BadgeStyle::Tinted
            } else {
                BadgeStyle::Solid
            },
        },
        None => Node::Badge {
            text: raw,
            color: None,
            icon: None,
            style: BadgeStyle::Outline,
        },
    }
}

/// Untyped columns: dispatch on the runtime shape, in order
/// array, mapping, boolean, number, string.
fn format_by_shape(value: &Value) -> Node {
    match value {
        Value::Array(items) if items.is_empty() => Node::placeholder(Sentinel::None),
        Value::Array(items) => Node::TagList {
            tags: items.iter().map(|item| Node::badge(value_text(item))).collect(),
        },
        Value::Object(map) => format_mapping(map),
        Value::Bool(b) => Node::YesNo { value: *b },
        Value::Number(n) => Node::Number {
            text: format_number(n),
        },
        Value::String(s) => Node::text(s.as_str()),
        Value::Null => Node::placeholder(Sentinel::NotProvided),
    }
}

fn format_mapping(map: &Map<String, Value>) -> Node {
    let rows = map
        .iter()
        .filter(|(_, v)| !is_falsy(v))
        .map(|(k, v)| {
            let node = match v {
                Value::String(s) if URL_LIKE.is_match(s) => Node::Link {
                    href: s.clone(),
                    text: s.clone(),
                    external: true,
                },
                other => Node::text(value_text(other)),
            };
            (k.clone(), node)
        })
        .collect();
    Node::KeyValue { rows }
}

/// null, false, 0 and "" are suppressed in mapping rows
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text form of a value as a label would show it
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Parse date-like values: RFC 3339, ISO dates and date-times, and numbers
/// as epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.date_naive());
            }
            if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(d);
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        }
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// Unparseable patterns and patterns asking for time or zone fields, which a
/// bare date cannot supply, fall back to the default pattern.
fn render_date(date: NaiveDate, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    if valid {
        let mut out = String::new();
        if write!(out, "{}", date.format(pattern)).is_ok() {
            return out;
        }
    }
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Locale-style number: thousands grouping, at most three fraction digits.
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return group_thousands(&i.unsigned_abs().to_string(), i < 0);
    }
    if let Some(u) = n.as_u64() {
        return group_thousands(&u.to_string(), false);
    }
    let f = n.as_f64().unwrap_or_default();
    let fixed = format!("{:.3}", f.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let negative = f < 0.0 && (int_part != "0" || !frac.is_empty());
    let grouped = group_thousands(int_part, negative);
    if frac.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac}")
    }
}

fn group_thousands(digits: &str, negative: bool) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
