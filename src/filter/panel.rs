use std::collections::HashMap;
use std::sync::Arc;

use super::classify::{ColumnDescriptor, FilterKind};
use super::facets::{Facet, FacetCache};
use super::store::Bound;
use crate::data::model::Row;

/// One widget of the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelColumn {
    pub id: String,
    pub kind: FilterKind,
    /// Checkbox options; only filled for categorical columns.
    pub options: Vec<Facet>,
}

/// Columns shown in the panel: filterable ones with at least one observed
/// value, in descriptor order.
pub fn panel_columns(
    columns: &[ColumnDescriptor],
    rows: &Arc<Vec<Row>>,
    cache: &mut FacetCache,
) -> Vec<PanelColumn> {
    columns
        .iter()
        .filter(|d| d.filterable)
        .filter_map(|d| {
            let facets = cache.facets(rows, &d.id);
            if facets.is_empty() {
                return None;
            }
            let options = match d.kind {
                FilterKind::Categorical => facets.to_vec(),
                _ => Vec::new(),
            };
            Some(PanelColumn {
                id: d.id.clone(),
                kind: d.kind,
                options,
            })
        })
        .collect()
}

/// Badge text for the "Filters" heading, `None` when nothing is active.
pub fn badge_text(active: usize) -> Option<String> {
    (active > 0).then(|| active.to_string())
}

// ---------------------------------------------------------------------------
// WidgetInputs – text buffers behind the panel's input boxes
// ---------------------------------------------------------------------------

/// egui is immediate mode, so the text typed into each box has to live
/// somewhere between frames.
#[derive(Debug, Default)]
pub struct WidgetInputs {
    search: HashMap<String, String>,
    lower: HashMap<String, String>,
    upper: HashMap<String, String>,
}

impl WidgetInputs {
    pub fn search(&mut self, column: &str) -> &mut String {
        self.search.entry(column.to_string()).or_default()
    }

    pub fn bound(&mut self, column: &str, bound: Bound) -> &mut String {
        let map = match bound {
            Bound::Lower => &mut self.lower,
            Bound::Upper => &mut self.upper,
        };
        map.entry(column.to_string()).or_default()
    }

    /// Forget the text of one column's boxes.
    pub fn reset_column(&mut self, column: &str) {
        self.search.remove(column);
        self.lower.remove(column);
        self.upper.remove(column);
    }

    pub fn reset(&mut self) {
        self.search.clear();
        self.lower.clear();
        self.upper.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::data::model::CellValue;
    use crate::filter::classify::Classifier;

    fn dataset() -> Arc<Vec<Row>> {
        let mut a = Row::new();
        a.insert("id".into(), CellValue::Text("o1".into()));
        a.insert("region".into(), CellValue::Text("loop".into()));
        a.insert("notes".into(), CellValue::Text("n".into()));
        let mut b = Row::new();
        b.insert("id".into(), CellValue::Text("o2".into()));
        b.insert("region".into(), CellValue::Text("stem".into()));
        Arc::new(vec![a, b])
    }

    fn descriptors() -> Vec<ColumnDescriptor> {
        let classifier = Classifier::new(&FilterConfig {
            search: vec!["id".into()],
            numeric: vec![],
            date: vec![],
            non_filterable: vec!["notes".into()],
        });
        classifier.describe(&["id".into(), "region".into(), "notes".into(), "empty".into()])
    }

    #[test]
    fn skips_non_filterable_and_valueless_columns() {
        let mut cache = FacetCache::default();
        let cols = panel_columns(&descriptors(), &dataset(), &mut cache);
        let ids: Vec<&str> = cols.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["id", "region"]);
    }

    #[test]
    fn only_categorical_columns_carry_options() {
        let mut cache = FacetCache::default();
        let cols = panel_columns(&descriptors(), &dataset(), &mut cache);
        assert_eq!(cols[0].kind, FilterKind::TextSearch);
        assert!(cols[0].options.is_empty());
        let labels: Vec<&str> = cols[1].options.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["loop", "stem"]);
    }

    #[test]
    fn empty_dataset_gives_empty_panel() {
        let mut cache = FacetCache::default();
        let cols = panel_columns(&descriptors(), &Arc::new(Vec::new()), &mut cache);
        assert!(cols.is_empty());
    }

    #[test]
    fn badge_only_when_active() {
        assert_eq!(badge_text(0), None);
        assert_eq!(badge_text(3), Some("3".to_string()));
    }

    #[test]
    fn reset_drops_buffers() {
        let mut inputs = WidgetInputs::default();
        inputs.search("id").push_str("abc");
        inputs.bound("age", Bound::Upper).push_str("9");
        inputs.reset();
        assert!(inputs.search("id").is_empty());
        assert!(inputs.bound("age", Bound::Upper).is_empty());
    }
}
