use ratatui::style::{Color, Modifier, Style};

use crate::core::actions::ActionVariant;
use crate::render::node::BadgeStyle;

/// A theme defines the color scheme for the details modal
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Body colors
    pub heading_fg: Color,
    pub label_fg: Color,
    pub muted_fg: Color,
    pub link_fg: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,

    // Status/feedback colors
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    /// Default dark theme
    fn default() -> Self {
        Self {
            name: "Default Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            heading_fg: Color::Cyan,
            label_fg: Color::White,
            muted_fg: Color::DarkGray,
            link_fg: Color::LightBlue,
            badge_fg: Color::Black,
            badge_bg: Color::Gray,
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            info: Color::Blue,
        }
    }
}

impl Theme {
    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            border: Color::Gray,
            border_focused: Color::Blue,
            heading_fg: Color::Blue,
            label_fg: Color::Black,
            muted_fg: Color::Gray,
            link_fg: Color::Blue,
            badge_fg: Color::White,
            badge_bg: Color::DarkGray,
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            info: Color::Blue,
        }
    }

    /// Theme by config name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::default(),
        }
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.label_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn label_style(&self) -> Style {
        Style::default()
            .fg(self.label_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    /// Sentinels such as "Not provided"
    pub fn placeholder_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::ITALIC)
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link_fg)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn badge_style(&self, style: BadgeStyle, color: Option<&str>) -> Style {
        match style {
            BadgeStyle::Solid => Style::default().fg(self.badge_fg).bg(self.badge_bg),
            BadgeStyle::Tinted => {
                let tint = color.and_then(parse_color).unwrap_or(self.badge_bg);
                Style::default().fg(Color::Black).bg(tint)
            }
            BadgeStyle::Outline => Style::default().fg(self.foreground),
        }
    }

    pub fn action_style(&self, variant: ActionVariant, selected: bool) -> Style {
        if selected {
            return Style::default()
                .fg(self.selected_fg)
                .bg(self.selected_bg)
                .add_modifier(Modifier::BOLD);
        }
        match variant {
            ActionVariant::Primary => Style::default().fg(self.info).add_modifier(Modifier::BOLD),
            ActionVariant::Destructive => Style::default().fg(self.error),
            ActionVariant::Ghost => self.muted_style(),
            ActionVariant::Default | ActionVariant::Secondary | ActionVariant::Outline => {
                Style::default().fg(self.foreground)
            }
        }
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }
}

/// Parse an option color: a named color or `#rrggbb`
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }
    let color = match s.replace("grey", "gray").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" => Color::Gray,
        "darkgray" | "dark gray" => Color::DarkGray,
        "orange" => Color::Rgb(255, 165, 0),
        "pink" => Color::Rgb(255, 105, 180),
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}
