use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoints, Points};

use crate::chart::{self, data, ChartPlan, ChartSpec, Mark};
use crate::color;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Chart view (central panel, below the table)
// ---------------------------------------------------------------------------

/// Render the chart for the current selections. The unrecognized /
/// unselected chart type is the defined placeholder branch, not an error.
pub fn chart_view(ui: &mut Ui, table: &Table, request: &chart::ChartRequest) {
    match chart::plan_chart(request) {
        ChartPlan::Placeholder(message) => {
            ui.label(message);
        }
        ChartPlan::Spec(spec) => {
            ui.heading(spec.title);
            draw_spec(ui, table, &spec);
        }
    }
}

fn draw_spec(ui: &mut Ui, table: &Table, spec: &ChartSpec) {
    let x_field = spec.x.field.clone().unwrap_or_default();
    let y_field = spec.y.field.clone().unwrap_or_default();
    let y_label = if y_field.is_empty() { "count".to_string() } else { y_field.clone() };

    let mut plot = Plot::new("chart_view")
        .x_axis_label(x_field.clone())
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    // Hover tooltip echoing the encoded fields.
    if let Mark::Point { tooltip: true } = spec.mark {
        let (tx, ty) = (x_field.clone(), y_field.clone());
        plot = plot.label_formatter(move |_name, value| {
            format!("{tx} = {:.3}\n{ty} = {:.3}", value.x, value.y)
        });
    }

    match spec.mark {
        Mark::Point { .. } => {
            let points: PlotPoints = data::scatter_points(table, &x_field, &y_field)
                .into_iter()
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points)
                        .radius(3.0)
                        .color(color::accent_color()),
                );
            });
        }
        Mark::Line => {
            let series = data::indexed_series(table, &x_field, &y_field);
            let plot = with_tick_labels(plot, series.tick_labels.clone());
            let points: PlotPoints = series.points.into_iter().collect();
            plot.show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .color(color::accent_color())
                        .width(1.5),
                );
            });
        }
        Mark::Bar if spec.x.bin => {
            let values = data::numeric_column(table, &x_field);
            let bins = data::histogram(&values);
            let bars: Vec<Bar> = bins
                .iter()
                .map(|bin| {
                    let width = if bin.width() > 0.0 { bin.width() } else { 1.0 };
                    Bar::new(bin.center(), bin.count as f64)
                        .width(width)
                        .fill(color::accent_color())
                })
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
        }
        Mark::Bar => {
            let series = data::indexed_series(table, &x_field, &y_field);
            let width = bar_width(&series.points);
            let plot = with_tick_labels(plot, series.tick_labels.clone());
            let bars: Vec<Bar> = series
                .points
                .iter()
                .map(|&[x, y]| Bar::new(x, y).width(width).fill(color::accent_color()))
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
        }
        Mark::Boxplot => {
            let groups = data::box_groups(table, &x_field, &y_field);
            let palette = color::generate_palette(groups.len());
            let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
            let plot = with_tick_labels(plot, Some(labels));
            let elems: Vec<BoxElem> = groups
                .iter()
                .zip(&palette)
                .enumerate()
                .map(|(i, (g, &c))| {
                    BoxElem::new(
                        i as f64,
                        BoxSpread::new(g.min, g.q1, g.median, g.q3, g.max),
                    )
                    .name(&g.label)
                    .fill(c.gamma_multiply(0.35))
                    .stroke(Stroke::new(1.5, c))
                })
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(elems));
            });
        }
    }
}

/// Replace numeric x ticks with the series' own labels (nominal index axis).
fn with_tick_labels(plot: Plot<'_>, labels: Option<Vec<String>>) -> Plot<'_> {
    let Some(labels) = labels else { return plot };
    plot.x_axis_formatter(move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    })
}

/// Bars over a numeric index: size to the smallest gap so bars never overlap.
fn bar_width(points: &[[f64; 2]]) -> f64 {
    let mut xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .fold(f64::INFINITY, f64::min)
        .min(1.0)
        .max(f64::MIN_POSITIVE)
        * 0.8
}
