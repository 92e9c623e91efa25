use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::{self, ChartPlan, ChartType};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – visualization settings
// ---------------------------------------------------------------------------

/// Render the options sidebar: chart-type selector plus the two axis-column
/// selectors, populated from the table's own column names.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Options");
    ui.separator();

    let table = match &state.table {
        Some(t) => t.clone(),
        None => {
            ui.label("No dataset loaded.");
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
            }
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Visualization Settings");
            ui.add_space(4.0);

            // ---- Chart type ----
            let current = state
                .chart_type
                .map(|c| c.label())
                .unwrap_or("Select a chart type");
            egui::ComboBox::from_label("Chart Type")
                .selected_text(current)
                .show_ui(ui, |ui: &mut Ui| {
                    for chart in ChartType::ALL {
                        if ui
                            .selectable_label(state.chart_type == Some(chart), chart.label())
                            .clicked()
                        {
                            state.chart_type = Some(chart);
                        }
                    }
                });

            // ---- Axis columns ----
            column_selector(ui, "X-axis", &table.column_names, &mut state.x_column);
            column_selector(ui, "Y-axis", &table.column_names, &mut state.y_column);

            ui.separator();

            // ---- Declarative spec, as it would go to a charting library ----
            if let ChartPlan::Spec(spec) = chart::plan_chart(&state.chart_request()) {
                egui::CollapsingHeader::new("Chart spec (Vega-Lite)")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        let json = serde_json::to_string_pretty(&spec.to_vega_lite(None))
                            .unwrap_or_default();
                        ui.monospace(json);
                    });
            }
        });
}

fn column_selector(ui: &mut Ui, label: &str, columns: &[String], selection: &mut Option<String>) {
    let current = selection.clone().unwrap_or_default();
    egui::ComboBox::from_label(label)
        .selected_text(current.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui.selectable_label(current == *col, col).clicked() {
                    *selection = Some(col.clone());
                }
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

        if let Some(table) = &state.table {
            let name = state.source_name.as_deref().unwrap_or("dataset");
            ui.label(format!(
                "{name}: {} rows × {} columns",
                table.n_rows(),
                table.n_cols()
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
        .set_title("Open dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match state.cache.load(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.column_names
                );
                state.set_table(table, &path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
