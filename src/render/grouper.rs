//! Field grouper: partitions columns into the dialog's sections.
//!
//! Classification is strict priority with exclusion: basic, then media, then
//! meta, then other. A column lands in exactly one group.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::core::schema::{ColumnConfig, ColumnType};

pub const BASIC_KEYS: [&str; 5] = ["title", "subtitle", "name", "email", "phone"];
pub const META_KEYS: [&str; 6] = ["createdAt", "updatedAt", "author", "views", "priority", "status"];

/// Body sections, declared in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Section {
    #[strum(to_string = "Basic Information")]
    Basic,
    #[strum(to_string = "Media")]
    Media,
    #[strum(to_string = "Additional Information")]
    Other,
    #[strum(to_string = "Meta Information")]
    Meta,
}

impl Section {
    /// Bucket for a single column
    pub fn classify(column: &ColumnConfig) -> Self {
        let key = column.key.as_str();
        if BASIC_KEYS.contains(&key) {
            Section::Basic
        } else if column.column_type == ColumnType::Image || key.contains("image") {
            Section::Media
        } else if META_KEYS.contains(&key) {
            Section::Meta
        } else {
            Section::Other
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldGroups<'a> {
    pub basic: Vec<&'a ColumnConfig>,
    pub media: Vec<&'a ColumnConfig>,
    pub other: Vec<&'a ColumnConfig>,
    pub meta: Vec<&'a ColumnConfig>,
}

impl<'a> FieldGroups<'a> {
    pub fn get(&self, section: Section) -> &[&'a ColumnConfig] {
        match section {
            Section::Basic => &self.basic,
            Section::Media => &self.media,
            Section::Other => &self.other,
            Section::Meta => &self.meta,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut Vec<&'a ColumnConfig> {
        match section {
            Section::Basic => &mut self.basic,
            Section::Media => &mut self.media,
            Section::Other => &mut self.other,
            Section::Meta => &mut self.meta,
        }
    }

    /// Populated sections in display order
    pub fn non_empty(&self) -> impl Iterator<Item = (Section, &[&'a ColumnConfig])> + '_ {
        use strum::IntoEnumIterator;
        Section::iter()
            .map(|section| (section, self.get(section)))
            .filter(|(_, columns)| !columns.is_empty())
    }

    pub fn len(&self) -> usize {
        self.basic.len() + self.media.len() + self.other.len() + self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `columns`, keeping input order within each group
pub fn group_columns(columns: &[ColumnConfig]) -> FieldGroups<'_> {
    let mut groups = FieldGroups::default();
    for column in columns {
        groups.get_mut(Section::classify(column)).push(column);
    }
    groups
}
