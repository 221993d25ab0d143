pub mod formatter;
pub mod grouper;
pub mod node;
pub mod presenter;

pub use formatter::{FormatOptions, ValueFormatter, format_value};
pub use grouper::{FieldGroups, Section, group_columns};
pub use node::{BadgeStyle, ImageRef, Node, Sentinel};
pub use presenter::{
    ActionButton, BodyBlock, DetailsPresenter, DialogHost, DialogView, FieldView, OpenFlag,
    SectionView, present,
};
