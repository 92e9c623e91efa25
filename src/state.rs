use std::path::Path;
use std::sync::Arc;

use crate::chart::{ChartRequest, ChartType};
use crate::data::cache::LoaderCache;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until the user opens a file).
    pub table: Option<Arc<Table>>,

    /// Display name of the source file.
    pub source_name: Option<String>,

    /// Session-scoped loader cache keyed by file content.
    pub cache: LoaderCache,

    /// Current chart-type selection. The selector offers five fixed
    /// options; None renders the placeholder message instead of a chart.
    pub chart_type: Option<ChartType>,

    /// Selected axis columns, always drawn from the table's own columns.
    pub x_column: Option<String>,
    pub y_column: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source_name: None,
            cache: LoaderCache::new(),
            chart_type: Some(ChartType::Scatter),
            x_column: None,
            y_column: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table and reset the axis selectors to its
    /// first column, mirroring a freshly populated dropdown.
    pub fn set_table(&mut self, table: Arc<Table>, source_name: &Path) {
        let first = table.column_names.first().cloned();
        self.x_column = first.clone();
        self.y_column = first;
        self.source_name = source_name
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.table = Some(table);
        self.status_message = None;
    }

    /// Snapshot the current selections as one ChartRequest.
    pub fn chart_request(&self) -> ChartRequest {
        ChartRequest {
            chart: self.chart_type,
            x_column: self.x_column.clone().unwrap_or_default(),
            y_column: self.y_column.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    #[test]
    fn set_table_resets_axis_selectors_to_first_column() {
        let mut state = AppState::default();
        let table = Arc::new(parse_csv("x,y\n1,2\n".as_bytes()).unwrap());
        state.set_table(table, Path::new("/tmp/data.csv"));

        assert_eq!(state.x_column.as_deref(), Some("x"));
        assert_eq!(state.y_column.as_deref(), Some("x"));
        assert_eq!(state.source_name.as_deref(), Some("data.csv"));
        assert_eq!(state.chart_request().chart, Some(ChartType::Scatter));
    }
}
