pub mod details_modal;
pub mod node_view;

pub use details_modal::DetailsModal;
pub use node_view::{field_lines, node_block_lines, node_spans};
