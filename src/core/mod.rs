pub mod actions;
pub mod error;
pub mod loader;
pub mod record;
pub mod schema;

pub use actions::{ActionConfig, ActionSpec, ActionVariant, ActionWhen};
pub use error::{RecordViewError, Result};
pub use loader::{SchemaFile, load_record, load_schema};
pub use record::Record;
pub use schema::{ColumnConfig, ColumnType, CustomRender, SelectOption, validate_columns};
