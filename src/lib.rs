pub mod config;
pub mod core;
pub mod logging;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use crate::core::{
    ActionConfig, ActionSpec, ColumnConfig, ColumnType, Record, RecordViewError, SchemaFile,
    SelectOption,
};
pub use crate::render::{DetailsPresenter, DialogHost, DialogView, Node, OpenFlag, ValueFormatter, present};
pub use crate::tui::{Action, DetailsModal};
