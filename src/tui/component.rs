use crate::tui::action::Action;
use color_eyre::Result;
use ratatui::{Frame, layout::Rect};

/// Base trait for TUI components
///
/// Components turn actions into state changes and draw themselves into the
/// area they are given.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was consumed, Ok(false) if it should
    /// propagate to the caller.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Draw the component within `area`
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Actions this component responds to, used for the instructions line
    fn supported_actions(&self) -> &[Action];

    /// Component name for logging
    fn name(&self) -> &str;

    /// Per-tick update. Default does nothing.
    fn update(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Components that can hold keyboard focus
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}
