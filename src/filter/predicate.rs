use super::classify::ColumnDescriptor;
use super::store::{FilterStore, FilterValue};
use crate::data::model::{CellValue, Row};

/// Whether a single cell passes one filter value.
///
/// Search is a case-insensitive substring test on the display text.
/// Ranges only match cells of their own type; an empty categorical
/// selection passes everything.
pub fn matches(cell: Option<&CellValue>, filter: &FilterValue) -> bool {
    if let FilterValue::Categorical(selected) = filter {
        if selected.is_empty() {
            return true;
        }
    }
    let Some(cell) = cell else {
        return false;
    };

    match filter {
        FilterValue::Search(pattern) => cell
            .to_string()
            .to_lowercase()
            .contains(&pattern.to_lowercase()),
        FilterValue::NumericRange(bounds) => cell
            .as_f64()
            .is_some_and(|v| !v.is_nan() && bounds.contains(v)),
        FilterValue::DateRange(bounds) => cell
            .as_epoch_millis()
            .is_some_and(|ms| bounds.contains(ms)),
        FilterValue::Categorical(selected) => selected.contains(cell),
    }
}

/// A row is visible when every active filter on a filterable column passes.
pub fn is_visible(row: &Row, store: &FilterStore, columns: &[ColumnDescriptor]) -> bool {
    store.iter().all(|(column, filter)| {
        let filterable = columns
            .iter()
            .find(|d| &d.id == column)
            .map_or(true, |d| d.filterable);
        !filterable || matches(row.get(column), filter)
    })
}

/// Indices of the rows passing all active filters.
pub fn visible_indices(rows: &[Row], store: &FilterStore, columns: &[ColumnDescriptor]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| is_visible(row, store, columns))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::FilterConfig;
    use crate::data::dates::parse_date_input;
    use crate::filter::classify::{Classifier, FilterKind};
    use crate::filter::store::{Bound, Bounds};

    fn rows(col: &str, values: Vec<CellValue>) -> Vec<Row> {
        values
            .into_iter()
            .map(|v| {
                let mut r = Row::new();
                r.insert(col.to_string(), v);
                r
            })
            .collect()
    }

    fn classifier() -> Classifier {
        Classifier::new(&FilterConfig {
            search: vec!["name".into()],
            numeric: vec!["age".into()],
            date: vec!["created_at".into()],
            non_filterable: vec!["notes".into()],
        })
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn lower_bound_only_admits_values_at_or_above() {
        let data = rows("age", vec![5.0, 15.0, 25.0].into_iter().map(CellValue::Number).collect());
        let columns = classifier().describe(&["age".into()]);
        let mut store = FilterStore::new();
        store
            .update_bound("age", FilterKind::NumericRange, Bound::Lower, "10")
            .unwrap();

        assert_eq!(visible_indices(&data, &store, &columns), vec![1, 2]);
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let data = rows("age", vec![10.0, 20.0, 30.0].into_iter().map(CellValue::Number).collect());
        let mut store = FilterStore::new();
        store.set_filter(
            "age",
            FilterValue::NumericRange(Bounds::new(Some(10.0), Some(20.0))),
        );
        assert_eq!(visible_indices(&data, &store, &[]), vec![0, 1]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let data = rows("name", vec![text("Alice"), text("Bob")]);
        let columns = classifier().describe(&["name".into()]);
        let mut store = FilterStore::new();
        store.set_search("name", "ali");

        assert_eq!(visible_indices(&data, &store, &columns), vec![0]);
    }

    #[test]
    fn categorical_selection_hides_unselected_and_all_selected_shows_everything() {
        let data = rows("status", vec![text("open"), text("closed"), text("open")]);
        let columns = classifier().describe(&["status".into()]);
        let mut store = FilterStore::new();

        store.toggle_facet("status", &text("closed"));
        assert_eq!(visible_indices(&data, &store, &columns), vec![1]);

        store.toggle_facet("status", &text("open"));
        assert_eq!(visible_indices(&data, &store, &columns), vec![0, 1, 2]);
    }

    #[test]
    fn empty_categorical_selection_equals_no_filter() {
        let data = rows("status", vec![text("open"), text("closed")]);
        let mut with_empty = FilterStore::new();
        with_empty.set_filter("status", FilterValue::Categorical(BTreeSet::new()));
        let without = FilterStore::new();

        for row in &data {
            assert_eq!(is_visible(row, &with_empty, &[]), is_visible(row, &without, &[]));
        }
    }

    #[test]
    fn date_lower_bound_with_rejected_upper_input() {
        let jan = parse_date_input("2024-01-01").unwrap();
        let mar = parse_date_input("2024-03-01").unwrap();
        let may = parse_date_input("2024-05-01").unwrap();
        let data = rows("created_at", vec![CellValue::Date(jan), CellValue::Date(mar), CellValue::Date(may)]);
        let columns = classifier().describe(&["created_at".into()]);

        let mut store = FilterStore::new();
        store
            .update_bound("created_at", FilterKind::DateRange, Bound::Lower, "2024-02-15T00:00")
            .unwrap();
        assert!(store
            .update_bound("created_at", FilterKind::DateRange, Bound::Upper, "")
            .is_err());

        match store.get("created_at") {
            Some(FilterValue::DateRange(b)) => assert!(b.min.is_some() && b.max.is_none()),
            other => panic!("unexpected filter state: {other:?}"),
        }
        assert_eq!(visible_indices(&data, &store, &columns), vec![1, 2]);
    }

    #[test]
    fn clear_all_after_three_filters_shows_every_row() {
        let mut data = Vec::new();
        for (name, age, status) in [("Alice", 30.0, "open"), ("Bob", 12.0, "closed")] {
            let mut r = Row::new();
            r.insert("name".into(), text(name));
            r.insert("age".into(), CellValue::Number(age));
            r.insert("status".into(), text(status));
            data.push(r);
        }
        let columns = classifier().describe(&["name".into(), "age".into(), "status".into()]);

        let mut store = FilterStore::new();
        store.set_search("name", "zzz");
        store
            .update_bound("age", FilterKind::NumericRange, Bound::Upper, "1")
            .unwrap();
        store.toggle_facet("status", &text("open"));
        assert_eq!(store.active_count(), 3);
        assert!(visible_indices(&data, &store, &columns).is_empty());

        store.clear_all();
        assert_eq!(store.active_count(), 0);
        assert_eq!(visible_indices(&data, &store, &columns), vec![0, 1]);
    }

    #[test]
    fn mismatched_cell_types_do_not_match() {
        let mut store = FilterStore::new();
        store.set_filter("age", FilterValue::NumericRange(Bounds::new(Some(0.0), None)));
        store.set_filter("created_at", FilterValue::DateRange(Bounds::new(Some(0), None)));

        let mut row = Row::new();
        row.insert("age".into(), text("old"));
        row.insert("created_at".into(), CellValue::Number(5.0));
        assert!(!is_visible(&row, &store, &[]));

        assert!(!matches(None, &FilterValue::Search("a".into())));
    }

    #[test]
    fn filters_on_non_filterable_columns_are_ignored() {
        let data = rows("notes", vec![text("x")]);
        let columns = classifier().describe(&["notes".into()]);
        let mut store = FilterStore::new();
        store.set_search("notes", "nothing like it");
        assert_eq!(visible_indices(&data, &store, &columns), vec![0]);
    }

    #[test]
    fn search_matches_number_and_date_text() {
        let ms = parse_date_input("2025-06-30").unwrap();
        assert!(matches(Some(&CellValue::Number(1234.0)), &FilterValue::Search("23".into())));
        assert!(matches(Some(&CellValue::Date(ms)), &FilterValue::Search("2025-06".into())));
    }
}
