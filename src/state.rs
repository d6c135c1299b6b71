use crate::config::FilterConfig;
use crate::data::model::{CellValue, Dataset};
use crate::filter::classify::{Classifier, ColumnDescriptor, FilterKind};
use crate::filter::facets::FacetCache;
use crate::filter::panel::{PanelColumn, WidgetInputs, panel_columns};
use crate::filter::predicate::visible_indices;
use crate::filter::store::{Bound, FilterStore};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Column id → filter kind, built from the config.
    pub classifier: Classifier,

    /// Descriptors of the loaded dataset's columns.
    pub columns: Vec<ColumnDescriptor>,

    /// Active per-column filters.
    pub filters: FilterStore,

    /// Facets memoized per dataset.
    pub facets: FacetCache,

    /// Text typed into the panel's input boxes.
    pub inputs: WidgetInputs,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            dataset: None,
            classifier: Classifier::new(config),
            columns: Vec::new(),
            filters: FilterStore::new(),
            facets: FacetCache::default(),
            inputs: WidgetInputs::default(),
            visible_indices: Vec::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset. Filters start empty.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.columns = self.classifier.describe(&dataset.column_names);
        self.filters.clear_all();
        self.inputs.reset();
        self.visible_indices = (0..dataset.len()).collect();

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Take the outcome of a file load. On failure the current dataset and
    /// filters are kept and the error is shown in the top bar.
    pub fn apply_load_result(&mut self, result: anyhow::Result<Dataset>) {
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = visible_indices(&ds.rows, &self.filters, &self.columns);
            log::trace!(
                "{} of {} rows visible under {} filters",
                self.visible_indices.len(),
                ds.len(),
                self.filters.active_count()
            );
        }
    }

    /// Widgets to show in the filter panel.
    pub fn panel_columns(&mut self) -> Vec<PanelColumn> {
        match &self.dataset {
            Some(ds) => panel_columns(&self.columns, &ds.rows, &mut self.facets),
            None => Vec::new(),
        }
    }

    /// Search box edited.
    pub fn on_search_input(&mut self, column: &str) {
        let pattern = self.inputs.search(column).clone();
        self.filters.set_search(column, &pattern);
        self.refilter();
    }

    /// "Above" / "Below" box edited. Invalid text is ignored.
    pub fn on_bound_input(&mut self, column: &str, kind: FilterKind, bound: Bound) {
        let raw = self.inputs.bound(column, bound).clone();
        match self.filters.update_bound(column, kind, bound, &raw) {
            Ok(()) => self.refilter(),
            Err(e) => log::debug!("Ignoring input for '{column}': {e}"),
        }
    }

    /// Facet checkbox clicked.
    pub fn toggle_facet(&mut self, column: &str, value: &CellValue) {
        self.filters.toggle_facet(column, value);
        self.refilter();
    }

    /// Drop the filter on one column.
    pub fn clear_filter(&mut self, column: &str) {
        self.filters.clear_filter(column);
        self.inputs.reset_column(column);
        self.refilter();
    }

    /// "Clear" button.
    pub fn clear_all_filters(&mut self) {
        self.filters.clear_all();
        self.inputs.reset();
        self.refilter();
    }
}
