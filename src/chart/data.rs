//! Prepare plot series from a [`Table`]: select x/y columns and convert to
//! the point/bin/box shapes the plot widget draws. All pure; rows with
//! missing or non-finite values are skipped.

use std::collections::BTreeMap;

use crate::data::model::{CellValue, ColumnKind, Table};

/// Bin count for histograms.
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// `[x, y]` pairs for rows where both cells are finite numbers.
pub fn scatter_points(table: &Table, x_column: &str, y_column: &str) -> Vec<[f64; 2]> {
    let xi = table.column_index(x_column);
    let yi = table.column_index(y_column);
    let (Some(xi), Some(yi)) = (xi, yi) else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .filter_map(|row| {
            let x = row.get(xi)?.as_f64()?;
            let y = row.get(yi)?.as_f64()?;
            (x.is_finite() && y.is_finite()).then_some([x, y])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Line / bar – x as index
// ---------------------------------------------------------------------------

/// A y-value series over an index axis built from the x column.
pub struct IndexedSeries {
    /// `[index position, y value]` pairs.
    pub points: Vec<[f64; 2]>,
    /// Tick labels per point when the index is not numeric.
    pub tick_labels: Option<Vec<String>>,
}

/// `set_index(x)[y]` semantics: a quantitative x column supplies the axis
/// positions directly; any other column yields row-ordinal positions with
/// the x values as tick labels.
pub fn indexed_series(table: &Table, x_column: &str, y_column: &str) -> IndexedSeries {
    if table.column_kind(x_column) == ColumnKind::Quantitative {
        return IndexedSeries {
            points: scatter_points(table, x_column, y_column),
            tick_labels: None,
        };
    }

    let xi = table.column_index(x_column);
    let yi = table.column_index(y_column);
    let (Some(xi), Some(yi)) = (xi, yi) else {
        return IndexedSeries {
            points: Vec::new(),
            tick_labels: None,
        };
    };

    let mut points = Vec::new();
    let mut labels = Vec::new();
    for row in &table.rows {
        let Some(y) = row.get(yi).and_then(CellValue::as_f64) else {
            continue;
        };
        if !y.is_finite() {
            continue;
        }
        points.push([points.len() as f64, y]);
        labels.push(row.get(xi).map(ToString::to_string).unwrap_or_default());
    }

    IndexedSeries {
        points,
        tick_labels: Some(labels),
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// The finite numeric values of a column, in row order.
pub fn numeric_column(table: &Table, name: &str) -> Vec<f64> {
    table
        .column(name)
        .filter_map(CellValue::as_f64)
        .filter(|v| v.is_finite())
        .collect()
}

/// Count values into `HISTOGRAM_BINS` equal-width bins over `[min, max]`.
/// A degenerate range (all values equal) collapses into a single bin.
pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for &v in values {
        let bin = (((v - min) / range) * HISTOGRAM_BINS as f64) as usize;
        counts[bin.min(HISTOGRAM_BINS - 1)] += 1;
    }

    let width = range / HISTOGRAM_BINS as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Five-number summary of the y values sharing one x cell value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Group the y column by the (nominal) x cell value and summarize each
/// group. Groups come back in `CellValue` order; rows with a non-numeric y
/// are skipped.
pub fn box_groups(table: &Table, x_column: &str, y_column: &str) -> Vec<BoxGroup> {
    let xi = table.column_index(x_column);
    let yi = table.column_index(y_column);
    let (Some(xi), Some(yi)) = (xi, yi) else {
        return Vec::new();
    };

    let mut groups: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        let Some(y) = row.get(yi).and_then(CellValue::as_f64) else {
            continue;
        };
        if !y.is_finite() {
            continue;
        }
        let Some(x) = row.get(xi) else { continue };
        groups.entry(x.clone()).or_default().push(y);
    }

    groups
        .into_iter()
        .map(|(label, mut values)| {
            values.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));
            BoxGroup {
                label: label.to_string(),
                min: values[0],
                q1: percentile(&values, 0.25),
                median: percentile(&values, 0.50),
                q3: percentile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}

/// Nearest-rank percentile over a sorted, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = (q * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn two_row_table() -> Table {
        parse_csv("a,b\n1,2\n3,4\n".as_bytes()).unwrap()
    }

    #[test]
    fn line_series_maps_index_values_to_positions() {
        // "a,b\n1,2\n3,4\n" as a Line Chart: index [1, 3], values [2, 4].
        let series = indexed_series(&two_row_table(), "a", "b");
        assert_eq!(series.points, vec![[1.0, 2.0], [3.0, 4.0]]);
        assert!(series.tick_labels.is_none());
    }

    #[test]
    fn nominal_index_uses_row_positions_and_labels() {
        let table = parse_csv("name,v\nalpha,10\nbeta,20\n".as_bytes()).unwrap();
        let series = indexed_series(&table, "name", "v");
        assert_eq!(series.points, vec![[0.0, 10.0], [1.0, 20.0]]);
        assert_eq!(
            series.tick_labels,
            Some(vec!["alpha".to_string(), "beta".to_string()])
        );
    }

    #[test]
    fn scatter_skips_non_numeric_rows() {
        let table = parse_csv("a,b\n1,2\nx,3\n4,\n5,6\n".as_bytes()).unwrap();
        let points = scatter_points(&table, "a", "b");
        assert_eq!(points, vec![[1.0, 2.0], [5.0, 6.0]]);
    }

    #[test]
    fn missing_column_yields_an_empty_series() {
        let table = two_row_table();
        assert!(scatter_points(&table, "nope", "b").is_empty());
        assert!(indexed_series(&table, "a", "nope").points.is_empty());
        assert!(box_groups(&table, "nope", "b").is_empty());
    }

    #[test]
    fn histogram_counts_column_values_into_bins() {
        // "a" holds 1 and 3: the extremes land in the first and last bins.
        let values = numeric_column(&two_row_table(), "a");
        let bins = histogram(&values);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[HISTOGRAM_BINS - 1].count, 1);
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[HISTOGRAM_BINS - 1].end, 3.0);
    }

    #[test]
    fn histogram_of_identical_values_is_one_bin() {
        let bins = histogram(&[5.0, 5.0, 5.0]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(histogram(&[]).is_empty());
    }

    #[test]
    fn box_groups_summarize_per_category() {
        let table = parse_csv(
            "grp,v\na,1\na,2\na,3\na,4\na,5\nb,10\n".as_bytes(),
        )
        .unwrap();
        let groups = box_groups(&table, "grp", "v");
        assert_eq!(groups.len(), 2);

        let a = &groups[0];
        assert_eq!(a.label, "a");
        assert_eq!(a.min, 1.0);
        assert_eq!(a.q1, 2.0);
        assert_eq!(a.median, 3.0);
        assert_eq!(a.q3, 4.0);
        assert_eq!(a.max, 5.0);

        let b = &groups[1];
        assert_eq!(b.label, "b");
        assert_eq!(b.min, 10.0);
        assert_eq!(b.max, 10.0);
    }
}
