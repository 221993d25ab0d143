//! Terminal rendering of presentation nodes.

use ratatui::text::{Line, Span};

use crate::render::node::{ImageRef, Node};
use crate::tui::Theme;

const INDENT: &str = "  ";

/// Nodes that need their own lines below the field label
pub fn is_block(node: &Node) -> bool {
    matches!(
        node,
        Node::Preformatted { .. } | Node::ImageGrid { .. } | Node::KeyValue { .. }
    )
}

fn image_text(image: &ImageRef) -> String {
    let mut text = format!("[image] {} ({}x{})", image.src, image.width, image.height);
    if image.unoptimized {
        text.push_str(" embedded");
    }
    text
}

/// Inline rendering of a node as spans on a single line
pub fn node_spans(node: &Node, theme: &Theme) -> Vec<Span<'static>> {
    match node {
        Node::Placeholder { sentinel } => {
            vec![Span::styled(sentinel.to_string(), theme.placeholder_style())]
        }
        Node::Text { text } | Node::Number { text } => vec![Span::raw(text.clone())],
        Node::Date { text } => vec![Span::raw("📅 "), Span::raw(text.clone())],
        Node::Link { text, external, .. } => {
            let mut spans = vec![Span::styled(text.clone(), theme.link_style())];
            if *external {
                spans.push(Span::styled(" ↗", theme.muted_style()));
            }
            spans
        }
        Node::Badge {
            text,
            color,
            icon,
            style,
        } => {
            let label = match icon {
                Some(icon) => format!(" {icon} {text} "),
                None => format!(" {text} "),
            };
            vec![Span::styled(label, theme.badge_style(*style, color.as_deref()))]
        }
        Node::Image { image } => vec![Span::styled(image_text(image), theme.info_style())],
        Node::YesNo { value } => {
            let (text, style) = if *value {
                (" Yes ", theme.success_style())
            } else {
                (" No ", theme.error_style())
            };
            vec![Span::styled(text, style)]
        }
        Node::TagList { tags } | Node::Row { children: tags } => {
            let mut spans = Vec::new();
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.extend(node_spans(tag, theme));
            }
            spans
        }
        Node::Preformatted { .. } | Node::ImageGrid { .. } | Node::KeyValue { .. } => {
            vec![Span::raw(node.plain_text())]
        }
    }
}

/// Lines for a block node, indented under its label.
///
/// Pre-formatted text is wrapped to `width` but every source line break is
/// kept.
pub fn node_block_lines(node: &Node, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let width = width.saturating_sub(INDENT.len()).max(8);
    match node {
        Node::Preformatted { lines } => lines
            .iter()
            .flat_map(|line| {
                if line.is_empty() {
                    return vec![Line::raw(INDENT)];
                }
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(|part| Line::raw(format!("{INDENT}{part}")))
                    .collect()
            })
            .collect(),
        Node::ImageGrid { images, caption } => images
            .iter()
            .map(|image| {
                Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(image_text(image), theme.info_style()),
                ])
            })
            .chain(std::iter::once(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(caption.clone(), theme.muted_style()),
            ])))
            .collect(),
        Node::KeyValue { rows } if rows.is_empty() => vec![Line::from(vec![
            Span::raw(INDENT),
            Span::styled("(empty)", theme.placeholder_style()),
        ])],
        Node::KeyValue { rows } => rows
            .iter()
            .map(|(key, value)| {
                let mut spans = vec![
                    Span::raw(INDENT),
                    Span::styled(format!("{key}: "), theme.muted_style()),
                ];
                spans.extend(node_spans(value, theme));
                Line::from(spans)
            })
            .collect(),
        inline => vec![Line::from(
            std::iter::once(Span::raw(INDENT))
                .chain(node_spans(inline, theme))
                .collect::<Vec<_>>(),
        )],
    }
}

/// A `label: value` field as one or more lines
pub fn field_lines(label: &str, node: &Node, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let label_span = Span::styled(format!("{label}: "), theme.label_style());
    if is_block(node) {
        let mut lines = vec![Line::from(label_span)];
        lines.extend(node_block_lines(node, theme, width));
        lines
    } else {
        let mut spans = vec![label_span];
        spans.extend(node_spans(node, theme));
        vec![Line::from(spans)]
    }
}

/// Flatten a line back to text, for tests and logging
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::node::{BadgeStyle, Sentinel};
    use ratatui::style::Color;

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(line_text).collect()
    }

    #[test]
    fn test_inline_field() {
        let theme = Theme::default();
        let lines = field_lines("Email", &Node::text("a@b.c"), &theme, 40);
        assert_eq!(text_of(&lines), vec!["Email: a@b.c"]);
    }

    #[test]
    fn test_placeholder_is_styled() {
        let theme = Theme::default();
        let spans = node_spans(&Node::placeholder(Sentinel::NotProvided), &theme);
        assert_eq!(spans[0].content, "Not provided");
        assert_eq!(spans[0].style, theme.placeholder_style());
    }

    #[test]
    fn test_tinted_badge_uses_option_color() {
        let theme = Theme::default();
        let node = Node::Badge {
            text: "Active".into(),
            color: Some("green".into()),
            icon: Some("●".into()),
            style: BadgeStyle::Tinted,
        };
        let spans = node_spans(&node, &theme);
        assert_eq!(spans[0].content, " ● Active ");
        assert_eq!(spans[0].style.bg, Some(Color::Green));
    }

    #[test]
    fn test_preformatted_keeps_breaks_and_wraps() {
        let theme = Theme::default();
        let node = Node::Preformatted {
            lines: vec!["first".into(), "".into(), "a b c d e f g h i j".into()],
        };
        let lines = field_lines("Notes", &node, &theme, 12);
        let text = text_of(&lines);
        assert_eq!(text[0], "Notes: ");
        assert_eq!(text[1], "  first");
        assert_eq!(text[2], "  ");
        assert!(text.len() > 4, "long line should wrap: {text:?}");
    }

    #[test]
    fn test_image_grid_lines() {
        let theme = Theme::default();
        let node = Node::ImageGrid {
            images: vec![ImageRef::new("a.png", 100, 100), ImageRef::new("data:x", 100, 100)],
            caption: "2 images".into(),
        };
        let text = text_of(&node_block_lines(&node, &theme, 60));
        assert_eq!(
            text,
            vec![
                "  [image] a.png (100x100)",
                "  [image] data:x (100x100) embedded",
                "  2 images"
            ]
        );
    }

    #[test]
    fn test_tag_list_inline() {
        let theme = Theme::default();
        let node = Node::TagList {
            tags: vec![Node::badge("a"), Node::badge("b")],
        };
        let text = text_of(&field_lines("Tags", &node, &theme, 40));
        assert_eq!(text, vec!["Tags:  a   b "]);
    }
}
