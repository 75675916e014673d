use serde::{Deserialize, Serialize};

use super::column::Column;

/// A project as listed by the remote service: identity, display name, and
/// the column registry snapshot embedded in the listing.
///
/// Projects are created remotely and never mutated locally except for the
/// registry snapshot, which the column editor replaces on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Ordered column definitions; order is display order left-to-right.
    pub columns: Vec<Column>,
}

impl Project {
    pub fn column(&self, id: &super::column::ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }
}
