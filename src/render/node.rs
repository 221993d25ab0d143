//! Presentation tree produced by the formatter and consumed by a host renderer.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Fixed placeholder renderings for absent or empty data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Sentinel {
    #[strum(to_string = "Not provided")]
    NotProvided,
    #[strum(to_string = "No image")]
    NoImage,
    #[strum(to_string = "None")]
    None,
}

/// How a badge is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    /// Default filled styling
    Solid,
    /// Tinted by the badge color
    Tinted,
    /// Generic outlined label, used for unmatched select values
    Outline,
}

/// A reference to an image with display bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub width: u16,
    pub height: u16,
    /// Embedded (`data:`) and ephemeral (`blob:`) sources bypass any remote
    /// fetch or resize path and must be drawn as-is.
    pub unoptimized: bool,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, width: u16, height: u16) -> Self {
        let src = src.into();
        let unoptimized = src.starts_with("data:") || src.starts_with("blob:");
        Self {
            src,
            width,
            height,
            unoptimized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Placeholder {
        sentinel: Sentinel,
    },
    Text {
        text: String,
    },
    Date {
        text: String,
    },
    Link {
        href: String,
        text: String,
        external: bool,
    },
    Badge {
        text: String,
        color: Option<String>,
        icon: Option<String>,
        style: BadgeStyle,
    },
    Image {
        image: ImageRef,
    },
    ImageGrid {
        images: Vec<ImageRef>,
        caption: String,
    },
    Preformatted {
        lines: Vec<String>,
    },
    TagList {
        tags: Vec<Node>,
    },
    KeyValue {
        rows: Vec<(String, Node)>,
    },
    YesNo {
        value: bool,
    },
    Number {
        text: String,
    },
    /// Inline sequence, for custom renderers composing several nodes
    Row {
        children: Vec<Node>,
    },
}

impl Node {
    pub fn placeholder(sentinel: Sentinel) -> Self {
        Node::Placeholder { sentinel }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn badge(text: impl Into<String>) -> Self {
        Node::Badge {
            text: text.into(),
            color: None,
            icon: None,
            style: BadgeStyle::Solid,
        }
    }

    /// Flatten the node into a single line of display text.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Placeholder { sentinel } => sentinel.to_string(),
            Node::Text { text } | Node::Date { text } | Node::Number { text } => text.clone(),
            Node::Link { text, .. } => text.clone(),
            Node::Badge { text, icon, .. } => match icon {
                Some(icon) => format!("{icon} {text}"),
                None => text.clone(),
            },
            Node::Image { image } => image.src.clone(),
            Node::ImageGrid { caption, .. } => caption.clone(),
            Node::Preformatted { lines } => lines.join("\n"),
            Node::TagList { tags } => join_plain(tags, ", "),
            Node::KeyValue { rows } => rows
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.plain_text()))
                .collect::<Vec<_>>()
                .join(", "),
            Node::YesNo { value } => if *value { "Yes" } else { "No" }.to_string(),
            Node::Row { children } => join_plain(children, " "),
        }
    }
}

fn join_plain(nodes: &[Node], sep: &str) -> String {
    nodes
        .iter()
        .map(Node::plain_text)
        .collect::<Vec<_>>()
        .join(sep)
}
