use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::filter::classify::FilterKind;
use crate::filter::panel::{PanelColumn, badge_text};
use crate::filter::store::Bound;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        if let Some(badge) = badge_text(state.filters.active_count()) {
            ui.label(
                RichText::new(badge)
                    .strong()
                    .background_color(ui.visuals().selection.bg_fill),
            );
        }
    });

    if state.filters.active_count() > 0
        && ui
            .button(RichText::new("Clear").color(Color32::RED))
            .clicked()
    {
        state.clear_all_filters();
    }
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let columns = state.panel_columns();
    if columns.is_empty() {
        ui.weak("No filterable columns available");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                column_filter(ui, state, col);
            }
        });
}

/// One collapsible widget per column, chosen by its filter kind.
fn column_filter(ui: &mut Ui, state: &mut AppState, col: &PanelColumn) {
    let active = state.filters.is_active(&col.id);
    let mut header = RichText::new(&col.id).strong();
    if active {
        header = header.color(ui.visuals().selection.stroke.color);
    }

    egui::CollapsingHeader::new(header)
        .id_salt(&col.id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            match col.kind {
                FilterKind::TextSearch => {
                    let edit = egui::TextEdit::singleline(state.inputs.search(&col.id))
                        .hint_text(format!("Search {}", col.id));
                    if ui.add(edit).changed() {
                        state.on_search_input(&col.id);
                    }
                }
                FilterKind::NumericRange | FilterKind::DateRange => {
                    let hint = if col.kind == FilterKind::DateRange {
                        "YYYY-MM-DDTHH:MM"
                    } else {
                        "number"
                    };
                    for (bound, label) in [(Bound::Lower, "Above"), (Bound::Upper, "Below")] {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label(label);
                            let edit =
                                egui::TextEdit::singleline(state.inputs.bound(&col.id, bound))
                                    .hint_text(hint);
                            if ui.add(edit).changed() {
                                state.on_bound_input(&col.id, col.kind, bound);
                            }
                        });
                    }
                }
                FilterKind::Categorical => {
                    let selected = state.filters.selected_facets(&col.id);
                    for facet in &col.options {
                        let mut checked = selected.contains(&facet.value);
                        if ui.checkbox(&mut checked, facet.label.as_str()).changed() {
                            state.toggle_facet(&col.id, &facet.value);
                        }
                    }
                }
            }

            if active && ui.small_button("Reset").clicked() {
                state.clear_filter(&col.id);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open result table")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.apply_load_result(crate::data::loader::load_file(&path));
    }
}
