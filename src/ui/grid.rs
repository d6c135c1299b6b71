use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::dates::format_date_time;
use crate::data::model::CellValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Result grid (central panel)
// ---------------------------------------------------------------------------

/// Render the visible rows as a table in the central panel.
pub fn result_grid(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view results  (File → Open…)");
            });
            return;
        }
    };

    if state.visible_indices.is_empty() {
        ui.label("No rows match the active filters.");
    }

    let row_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y);

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(
                Column::auto().at_least(60.0).clip(true),
                dataset.column_names.len(),
            )
            .min_scrolled_height(0.0)
            .header(row_height + 4.0, |mut header| {
                for col in &dataset.column_names {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, state.visible_indices.len(), |mut row| {
                    let Some(record) = state
                        .visible_indices
                        .get(row.index())
                        .and_then(|&i| dataset.rows.get(i))
                    else {
                        return;
                    };
                    for col in &dataset.column_names {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell_text(record.get(col)));
                        });
                    }
                });
            });
    });
}

/// Grid text of a cell; dates include the time of day.
fn cell_text(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Date(ms)) => format_date_time(*ms),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}
