use eframe::egui;

use crate::state::AppState;
use crate::ui::{chart, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DataDashApp {
    pub state: AppState,
}

impl eframe::App for DataDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: visualization settings ----
        egui::SidePanel::left("options_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dataset table, then the chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(table) = self.state.table.clone() else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a CSV file to explore it  (File → Open…)");
                });
                return;
            };

            ui.heading("Dataset");
            let table_height = ui.available_height() * 0.4;
            egui::ScrollArea::horizontal()
                .id_salt("dataset_table")
                .max_height(table_height)
                .show(ui, |ui| {
                    table::table_view(ui, &table);
                });

            ui.separator();
            ui.heading("Visualization");
            chart::chart_view(ui, &table, &self.state.chart_request());
        });
    }
}
