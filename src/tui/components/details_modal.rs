use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, warn};

use crate::render::presenter::{BodyBlock, DetailsPresenter, DialogHost, DialogView};
use crate::tui::components::node_view::field_lines;
use crate::tui::layout::{centered_rect, split_dialog_area};
use crate::tui::{Action, Component, Focusable, KeyBindings, Theme};

const SUPPORTED_ACTIONS: &[Action] = &[
    Action::MoveUp,
    Action::MoveDown,
    Action::PageUp,
    Action::PageDown,
    Action::GoToTop,
    Action::GoToBottom,
    Action::NextAction,
    Action::PrevAction,
    Action::Confirm,
    Action::Cancel,
    Action::ToggleHelp,
];

/// Row offset for ratatui, saturating at `u16::MAX`
fn scroll_offset(scroll: usize) -> u16 {
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

/// Modal showing one record's details with an action bar.
///
/// Open state lives in the shared [`DialogHost`]; once the host is closed the
/// modal draws nothing and lets every action propagate.
pub struct DetailsModal {
    presenter: DetailsPresenter,
    view: DialogView,
    host: Box<dyn DialogHost>,
    theme: Theme,
    keybindings: KeyBindings,
    scroll: usize,
    selected_action: usize,
    show_instructions: bool,
    focused: bool,
    last_error: Option<String>,
    viewport_height: usize,
    content_height: usize,
}

impl DetailsModal {
    pub fn new(presenter: DetailsPresenter, host: Box<dyn DialogHost>) -> Self {
        let view = presenter.view();
        Self {
            presenter,
            view,
            host,
            theme: Theme::default(),
            keybindings: KeyBindings::default(),
            scroll: 0,
            selected_action: 0,
            show_instructions: true,
            focused: true,
            last_error: None,
            viewport_height: 0,
            content_height: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_keybindings(mut self, keybindings: KeyBindings) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn with_instructions(mut self, show: bool) -> Self {
        self.show_instructions = show;
        self
    }

    pub fn view(&self) -> &DialogView {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        self.host.is_open()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn selected_action(&self) -> Option<&str> {
        self.view
            .actions
            .get(self.selected_action)
            .map(|a| a.key.as_str())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn show_instructions(&self) -> bool {
        self.show_instructions
    }

    /// Rebuild the view after the presenter's inputs changed
    pub fn refresh(&mut self) {
        self.view = self.presenter.view();
        if self.selected_action >= self.view.actions.len() {
            self.selected_action = 0;
        }
    }

    /// Map a key press through the keybindings.
    ///
    /// Returns the action when the modal did not consume it.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<Option<Action>> {
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        let Some(action) = self.keybindings.get_action(key) else {
            return Ok(None);
        };
        if self.handle_action(action)? {
            Ok(None)
        } else {
            Ok(Some(action))
        }
    }

    fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn page(&self) -> usize {
        self.viewport_height.max(1)
    }

    fn cycle_action(&mut self, forward: bool) {
        let count = self.view.actions.len();
        if count == 0 {
            return;
        }
        self.selected_action = if forward {
            (self.selected_action + 1) % count
        } else {
            (self.selected_action + count - 1) % count
        };
    }

    fn run_selected(&mut self) {
        let Some(key) = self.selected_action().map(str::to_string) else {
            return;
        };
        match self.presenter.invoke(&key, self.host.as_mut()) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!("Action '{key}' failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn instructions(&self) -> String {
        let mut shown = vec![Action::Cancel];
        if !self.view.actions.is_empty() {
            shown.extend([Action::Confirm, Action::NextAction]);
        }
        shown.extend([Action::MoveDown, Action::MoveUp, Action::ToggleHelp]);
        self.keybindings.instructions(&shown)
    }

    /// Body as styled lines at the given width
    pub fn body_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines = Vec::new();
        for block in &self.view.body {
            match block {
                BodyBlock::Separator => {
                    lines.push(Line::from(Span::styled(
                        "─".repeat(width),
                        self.theme.muted_style(),
                    )));
                }
                BodyBlock::Section(section) => {
                    lines.push(Line::from(Span::styled(
                        section.heading.clone(),
                        self.theme.section_heading_style(),
                    )));
                    for field in &section.fields {
                        lines.extend(field_lines(&field.label, &field.node, &self.theme, width));
                    }
                }
            }
        }
        lines
    }

    fn action_bar(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, action) in self.view.actions.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let label = match &action.icon {
                Some(icon) => format!("[ {icon} {} ]", action.label),
                None => format!("[ {} ]", action.label),
            };
            spans.push(Span::styled(
                label,
                self.theme
                    .action_style(action.variant, i == self.selected_action),
            ));
        }
        Line::from(spans)
    }
}

impl Component for DetailsModal {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if !self.host.is_open() {
            return Ok(false);
        }
        match action {
            Action::MoveUp => self.scroll = self.scroll.saturating_sub(1),
            Action::MoveDown => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page()),
            Action::PageDown => self.scroll = (self.scroll + self.page()).min(self.max_scroll()),
            Action::GoToTop => self.scroll = 0,
            Action::GoToBottom => self.scroll = self.max_scroll(),
            Action::NextAction => self.cycle_action(true),
            Action::PrevAction => self.cycle_action(false),
            Action::Confirm => self.run_selected(),
            Action::Cancel => {
                debug!("Details modal closed");
                self.host.request_close();
            }
            Action::ToggleHelp => self.show_instructions = !self.show_instructions,
            Action::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.host.is_open() {
            return;
        }

        let popup = centered_rect(area, 80, 80, 40, 12);
        frame.render_widget(Clear, popup);

        let instructions = self.instructions();
        let layout = split_dialog_area(popup, self.show_instructions, Some(&instructions));

        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.view.title),
                self.theme.title_style(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(border_style)
            .style(self.theme.normal_style());
        let inner = block.inner(layout.content_area);
        frame.render_widget(block, layout.content_area);

        let subtitle_height = u16::from(self.view.subtitle.is_some());
        let error_height = u16::from(self.last_error.is_some());
        let actions_height = if self.view.actions.is_empty() { 0 } else { 2 };
        let [subtitle_area, body_area, error_area, actions_area] = Layout::vertical([
            Constraint::Length(subtitle_height),
            Constraint::Min(1),
            Constraint::Length(error_height),
            Constraint::Length(actions_height),
        ])
        .areas(inner);

        if let Some(subtitle) = &self.view.subtitle {
            frame.render_widget(
                Paragraph::new(Span::styled(subtitle.clone(), self.theme.muted_style())),
                subtitle_area,
            );
        }

        let lines = self.body_lines(body_area.width);
        self.content_height = lines.len();
        self.viewport_height = body_area.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());
        frame.render_widget(
            Paragraph::new(lines).scroll((scroll_offset(self.scroll), 0)),
            body_area,
        );

        if let Some(error) = &self.last_error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), self.theme.error_style())),
                error_area,
            );
        }

        if !self.view.actions.is_empty() {
            let [_, bar_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(actions_area);
            frame.render_widget(Paragraph::new(self.action_bar()), bar_area);
        }

        if let Some(instructions_area) = layout.instructions_area {
            let instructions_block = Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(self.theme.border_style());
            frame.render_widget(
                Paragraph::new(instructions)
                    .style(self.theme.muted_style())
                    .block(instructions_block)
                    .wrap(Wrap { trim: true }),
                instructions_area,
            );
        }
    }

    fn supported_actions(&self) -> &[Action] {
        SUPPORTED_ACTIONS
    }

    fn name(&self) -> &str {
        "DetailsModal"
    }
}

impl Focusable for DetailsModal {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
