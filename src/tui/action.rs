use serde::{Deserialize, Serialize};

/// All possible actions in the details modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Action bar
    NextAction,
    PrevAction,

    // View
    ToggleHelp,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Scroll up",
            Action::MoveDown => "Scroll down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to first line",
            Action::GoToBottom => "Go to last line",
            Action::NextAction => "Select next action",
            Action::PrevAction => "Select previous action",
            Action::ToggleHelp => "Toggle instructions",
            Action::Quit => "Quit application",
            Action::Confirm => "Run selected action",
            Action::Cancel => "Close dialog",
        }
    }

    /// Short label for the instructions line
    pub fn short_label(&self) -> &'static str {
        match self {
            Action::MoveUp => "Up",
            Action::MoveDown => "Down",
            Action::PageUp => "PgUp",
            Action::PageDown => "PgDn",
            Action::GoToTop => "Top",
            Action::GoToBottom => "Bottom",
            Action::NextAction => "Next Action",
            Action::PrevAction => "Prev Action",
            Action::ToggleHelp => "Toggle Instructions",
            Action::Quit => "Quit",
            Action::Confirm => "Run",
            Action::Cancel => "Close",
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::PageUp,
            Action::PageDown,
            Action::GoToTop,
            Action::GoToBottom,
            Action::NextAction,
            Action::PrevAction,
            Action::ToggleHelp,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}
