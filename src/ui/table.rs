use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Dataset table (central panel, above the chart)
// ---------------------------------------------------------------------------

/// Render the loaded table as a scrollable grid. Rows are virtualized, so
/// large files stay cheap to draw.
pub fn table_view(ui: &mut Ui, table: &Table) {
    if table.n_cols() == 0 {
        ui.label("The file has no columns.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), table.n_cols())
        .header(20.0, |mut header| {
            for name in &table.column_names {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.n_rows(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
