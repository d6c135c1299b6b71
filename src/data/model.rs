use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::dates::format_date_label;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a result column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as a member of `BTreeSet` (categorical selections) and `HashSet`
/// (facet dedup), so `CellValue` must be `Ord` and `Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Milliseconds since the Unix epoch (UTC).
    Date(i64),
    /// Anything else (bools, nulls, nested values), kept as its raw text.
    Unknown(String),
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --
// Equality follows `Ord` (bit identity for numbers), so NaN equals itself
// and the `Hash` impl below agrees with `==`.

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Unknown(_) => 0,
                Number(_) => 1,
                Date(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) | (Unknown(a), Unknown(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) | CellValue::Unknown(s) => s.hash(state),
            CellValue::Number(f) => f.to_bits().hash(state),
            CellValue::Date(ms) => ms.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Date(ms) => write!(f, "{}", format_date_label(*ms)),
            CellValue::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_epoch_millis(&self) -> Option<i64> {
        match self {
            CellValue::Date(ms) => Some(*ms),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the result table
// ---------------------------------------------------------------------------

/// Column id → value. Rows are never mutated after loading.
pub type Row = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded rows plus the column order they were read in.
///
/// `rows` is shared behind an `Arc`; its pointer is the dataset identity
/// used by the facet cache.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Arc<Vec<Row>>,
    /// Column ids in first-seen order.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, appending any column that occurs in `rows` but not
    /// in `column_names`.
    pub fn new(rows: Vec<Row>, mut column_names: Vec<String>) -> Self {
        for row in &rows {
            for col in row.keys() {
                if !column_names.contains(col) {
                    column_names.push(col.clone());
                }
            }
        }
        Dataset {
            rows: Arc::new(rows),
            column_names,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_drops_trailing_zero_on_whole_numbers() {
        assert_eq!(CellValue::Number(15.0).to_string(), "15");
        assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
    }

    #[test]
    fn ordering_groups_by_kind() {
        let mut values = vec![
            CellValue::Text("b".into()),
            CellValue::Number(2.0),
            CellValue::Unknown("null".into()),
            CellValue::Number(-1.0),
            CellValue::Text("a".into()),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Unknown("null".into()),
                CellValue::Number(-1.0),
                CellValue::Number(2.0),
                CellValue::Text("a".into()),
                CellValue::Text("b".into()),
            ]
        );
    }

    #[test]
    fn nan_equals_itself_and_signed_zeros_differ() {
        assert_eq!(CellValue::Number(f64::NAN), CellValue::Number(f64::NAN));
        assert_ne!(CellValue::Number(0.0), CellValue::Number(-0.0));
    }

    #[test]
    fn dataset_collects_columns_missing_from_header() {
        let mut row = Row::new();
        row.insert("extra".into(), CellValue::Number(1.0));
        row.insert("id".into(), CellValue::Text("x".into()));
        let ds = Dataset::new(vec![row], vec!["id".into()]);
        assert_eq!(ds.column_names, vec!["id".to_string(), "extra".to_string()]);
        assert_eq!(ds.len(), 1);
    }
}
