/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Arc<Vec<Row>>, column order
///   └──────────┘
///        │
///        ▼
///     crate::filter  (classify → facets → store → predicate)
/// ```

pub mod dates;
pub mod loader;
pub mod model;
