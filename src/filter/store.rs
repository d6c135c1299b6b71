use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::classify::FilterKind;
use crate::data::dates::parse_date_input;
use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Filter values
// ---------------------------------------------------------------------------

/// Which end of a range an input edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// Inclusive range; `None` means "no bound" on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Copy + PartialOrd> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Bounds { min, max }
    }

    /// Replace one side, keeping the other.
    pub fn with(self, bound: Bound, value: Option<T>) -> Self {
        match bound {
            Bound::Lower => Bounds { min: value, ..self },
            Bound::Upper => Bounds { max: value, ..self },
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// The active predicate value of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Search(String),
    NumericRange(Bounds<f64>),
    /// Epoch milliseconds.
    DateRange(Bounds<i64>),
    Categorical(BTreeSet<CellValue>),
}

/// Rejected widget input. The store is left unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("'{0}' is not a date")]
    InvalidDate(String),
    #[error("column '{column}' is a {kind:?} filter, not a range")]
    NotARange { column: String, kind: FilterKind },
}

// ---------------------------------------------------------------------------
// FilterStore
// ---------------------------------------------------------------------------

/// Column id → active filter. A missing entry means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the entry for `column`.
    pub fn set_filter(&mut self, column: &str, value: FilterValue) {
        self.entries.insert(column.to_string(), value);
    }

    /// Remove the entry for `column`.
    pub fn clear_filter(&mut self, column: &str) {
        self.entries.remove(column);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Number of columns with an entry.
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.entries.get(column)
    }

    pub fn is_active(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.entries.iter()
    }

    /// Set a search pattern; an empty pattern clears the column.
    pub fn set_search(&mut self, column: &str, pattern: &str) {
        if pattern.is_empty() {
            self.clear_filter(column);
        } else {
            self.set_filter(column, FilterValue::Search(pattern.to_string()));
        }
    }

    /// Currently selected facets of a categorical column (empty if none).
    pub fn selected_facets(&self, column: &str) -> BTreeSet<CellValue> {
        match self.get(column) {
            Some(FilterValue::Categorical(selected)) => selected.clone(),
            _ => BTreeSet::new(),
        }
    }

    /// Replace the selection; an empty selection clears the column.
    pub fn select_facets(&mut self, column: &str, selected: BTreeSet<CellValue>) {
        if selected.is_empty() {
            self.clear_filter(column);
        } else {
            self.set_filter(column, FilterValue::Categorical(selected));
        }
    }

    /// Add or remove one facet from the selection.
    pub fn toggle_facet(&mut self, column: &str, value: &CellValue) {
        let mut selected = self.selected_facets(column);
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.select_facets(column, selected);
    }

    /// Apply raw text to one side of a range filter.
    ///
    /// Empty or unparseable text is rejected without touching the entry.
    /// Otherwise the other side is kept; the column is cleared if neither
    /// side ends up bounded.
    pub fn update_bound(
        &mut self,
        column: &str,
        kind: FilterKind,
        bound: Bound,
        raw: &str,
    ) -> Result<(), InputError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(InputError::Empty);
        }

        match kind {
            FilterKind::NumericRange => {
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| InputError::InvalidNumber(text.to_string()))?;
                let current = match self.get(column) {
                    Some(FilterValue::NumericRange(b)) => *b,
                    _ => Bounds::default(),
                };
                self.commit_range(column, current.with(bound, Some(value)), FilterValue::NumericRange);
            }
            FilterKind::DateRange => {
                let value = parse_date_input(text)
                    .ok_or_else(|| InputError::InvalidDate(text.to_string()))?;
                let current = match self.get(column) {
                    Some(FilterValue::DateRange(b)) => *b,
                    _ => Bounds::default(),
                };
                self.commit_range(column, current.with(bound, Some(value)), FilterValue::DateRange);
            }
            other => {
                return Err(InputError::NotARange {
                    column: column.to_string(),
                    kind: other,
                });
            }
        }
        Ok(())
    }

    fn commit_range<T: Copy + PartialOrd>(
        &mut self,
        column: &str,
        bounds: Bounds<T>,
        wrap: fn(Bounds<T>) -> FilterValue,
    ) {
        if bounds.is_unbounded() {
            self.clear_filter(column);
        } else {
            self.set_filter(column, wrap(bounds));
        }
    }
}
