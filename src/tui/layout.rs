use ratatui::layout::Rect;

/// Content area of a dialog plus an optional instructions strip below it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub content_area: Rect,
    pub instructions_area: Option<Rect>,
}

impl DialogLayout {
    pub fn total_area(&self) -> Rect {
        let mut total_area = self.content_area;
        if let Some(instructions_area) = self.instructions_area {
            total_area.height += instructions_area.height;
        }
        total_area
    }
}

/// Reserve room at the bottom of `area` for wrapped instructions text
pub fn split_dialog_area(area: Rect, show_instructions: bool, instructions: Option<&str>) -> DialogLayout {
    let instructions = instructions.filter(|s| !s.is_empty());
    let (true, Some(instructions)) = (show_instructions, instructions) else {
        return DialogLayout {
            content_area: area,
            instructions_area: None,
        };
    };

    let wrap_width = area.width.saturating_sub(4).max(10) as usize;
    let wrapped_lines = textwrap::wrap(instructions, wrap_width);
    let instructions_height = (wrapped_lines.len() as u16)
        .max(1)
        .saturating_add(2)
        .min(area.height);
    DialogLayout {
        content_area: Rect {
            height: area.height - instructions_height,
            ..area
        },
        instructions_area: Some(Rect {
            y: area.y + area.height - instructions_height,
            height: instructions_height,
            ..area
        }),
    }
}

/// Centered popup taking a share of `area`, never smaller than the minimums
/// unless `area` itself is smaller.
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16, min_width: u16, min_height: u16) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    let width = width.max(min_width).min(area.width);
    let height = height.max(min_height).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_instructions() {
        let area = Rect::new(0, 0, 40, 20);
        let layout = split_dialog_area(area, false, Some("Esc: Close"));
        assert_eq!(layout.content_area, area);
        assert!(layout.instructions_area.is_none());

        let layout = split_dialog_area(area, true, Some(""));
        assert!(layout.instructions_area.is_none());
    }

    #[test]
    fn test_instructions_take_bottom_rows() {
        let area = Rect::new(2, 3, 40, 20);
        let layout = split_dialog_area(area, true, Some("Esc: Close  Enter: Run"));
        let instructions = layout.instructions_area.unwrap();
        assert_eq!(instructions.height, 3);
        assert_eq!(instructions.y, 3 + 20 - 3);
        assert_eq!(layout.content_area.height, 17);
        assert_eq!(layout.total_area(), area);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(area, 80, 80, 20, 10);
        assert_eq!(popup, Rect::new(10, 5, 80, 40));

        let tiny = Rect::new(0, 0, 10, 4);
        let popup = centered_rect(tiny, 80, 80, 20, 10);
        assert_eq!(popup, tiny);
    }
}
