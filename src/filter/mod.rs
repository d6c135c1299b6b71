/// Filter engine: classification, facets, filter state and row predicates.
///
/// ```text
///   column ids ──► classify ──► ColumnDescriptor
///   rows ───────► facets ────► panel options
///   widget input ► store ─────► predicate ──► visible row indices
/// ```

pub mod classify;
pub mod facets;
pub mod panel;
pub mod predicate;
pub mod store;
