use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::data::dates::format_date_label;
use crate::data::model::{CellValue, Row};

/// One distinct value of a column with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub label: String,
    pub value: CellValue,
}

impl Facet {
    pub fn new(value: CellValue) -> Self {
        let label = match &value {
            CellValue::Date(ms) => format_date_label(*ms),
            other => other.to_string(),
        };
        Facet { label, value }
    }
}

/// Distinct values of `column_id` in first-seen order.
pub fn compute_facets(rows: &[Row], column_id: &str) -> Vec<Facet> {
    let mut seen: HashSet<&CellValue> = HashSet::new();
    rows.iter()
        .filter_map(|row| row.get(column_id))
        .filter(|value| seen.insert(*value))
        .map(|value| Facet::new(value.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// FacetCache – memoized facets keyed on dataset identity
// ---------------------------------------------------------------------------

/// Per-column facets for one dataset.
///
/// The cache holds a clone of the dataset's `Arc`; a call with a different
/// `Arc` (compared by pointer, not content) discards everything.
#[derive(Debug, Default)]
pub struct FacetCache {
    source: Option<Arc<Vec<Row>>>,
    by_column: HashMap<String, Vec<Facet>>,
}

impl FacetCache {
    pub fn facets(&mut self, rows: &Arc<Vec<Row>>, column_id: &str) -> &[Facet] {
        let same_source = self
            .source
            .as_ref()
            .is_some_and(|src| Arc::ptr_eq(src, rows));
        if !same_source {
            self.source = Some(Arc::clone(rows));
            self.by_column.clear();
        }

        self.by_column
            .entry(column_id.to_string())
            .or_insert_with(|| {
                log::debug!("Computing facets for column '{column_id}'");
                compute_facets(rows, column_id)
            })
    }

    /// Number of columns currently memoized.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_column.len()
    }
}
