pub mod action;
pub mod component;
pub mod components;
pub mod keybindings;
pub mod layout;
pub mod theme;

pub use action::Action;
pub use component::{Component, Focusable};
pub use components::DetailsModal;
pub use keybindings::{KeyBinding, KeyBindings, KeyPattern};
pub use theme::{Theme, parse_color};
