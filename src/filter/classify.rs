use std::collections::HashSet;

use crate::config::FilterConfig;

// ---------------------------------------------------------------------------
// FilterKind – which widget a column gets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    TextSearch,
    NumericRange,
    DateRange,
    Categorical,
}

/// A column id with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub id: String,
    pub kind: FilterKind,
    pub filterable: bool,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Maps column ids to a [`FilterKind`] by set membership.
///
/// Checks run date → search → numeric, so an id listed in several sets
/// takes the first match. Unknown ids are categorical.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    date: HashSet<String>,
    search: HashSet<String>,
    numeric: HashSet<String>,
    non_filterable: HashSet<String>,
}

impl Classifier {
    pub fn new(config: &FilterConfig) -> Self {
        fn set(ids: &[String]) -> HashSet<String> {
            ids.iter().cloned().collect()
        }
        Self {
            date: set(&config.date),
            search: set(&config.search),
            numeric: set(&config.numeric),
            non_filterable: set(&config.non_filterable),
        }
    }

    pub fn classify(&self, column_id: &str) -> FilterKind {
        if self.date.contains(column_id) {
            FilterKind::DateRange
        } else if self.search.contains(column_id) {
            FilterKind::TextSearch
        } else if self.numeric.contains(column_id) {
            FilterKind::NumericRange
        } else {
            FilterKind::Categorical
        }
    }

    pub fn describe_one(&self, column_id: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            id: column_id.to_string(),
            kind: self.classify(column_id),
            filterable: !self.non_filterable.contains(column_id),
        }
    }

    /// Descriptors for every column, in the given order.
    pub fn describe(&self, column_ids: &[String]) -> Vec<ColumnDescriptor> {
        column_ids.iter().map(|id| self.describe_one(id)).collect()
    }
}
