/// Chart layer: the chart-type → encoding mapping and the series math
/// behind it.
///
/// `plan_chart` turns a [`ChartRequest`] into a declarative [`ChartSpec`]
/// (or the placeholder branch); `data` prepares the numeric series the
/// plot widget draws. Neither touches the table mutably — rendering is a
/// pure function of (Table, ChartRequest).
pub mod data;

use serde_json::{json, Value};

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// ChartType – the five fixed selector options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Scatter,
    Line,
    Bar,
    Histogram,
    Box,
}

impl ChartType {
    /// Selector options, in display order.
    pub const ALL: [ChartType; 5] = [
        ChartType::Scatter,
        ChartType::Line,
        ChartType::Bar,
        ChartType::Histogram,
        ChartType::Box,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Scatter => "Scatter Plot",
            ChartType::Line => "Line Chart",
            ChartType::Bar => "Bar Chart",
            ChartType::Histogram => "Histogram",
            ChartType::Box => "Box Plot",
        }
    }

    /// Inverse of [`label`](Self::label); anything outside the five fixed
    /// options is `None` and ends up on the placeholder branch.
    pub fn from_label(label: &str) -> Option<ChartType> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

// ---------------------------------------------------------------------------
// ChartRequest – one user interaction's worth of selections
// ---------------------------------------------------------------------------

/// The current selector state, rebuilt on every interaction and consumed
/// immediately. Column names are taken verbatim from the sidebar; nothing
/// checks them against the table here (the selectors are populated from the
/// table's own column list).
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub chart: Option<ChartType>,
    pub x_column: String,
    pub y_column: String,
}

// ---------------------------------------------------------------------------
// ChartSpec – declarative description of the figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Point { tooltip: bool },
    Line,
    Bar,
    Boxplot,
}

impl Mark {
    fn name(&self) -> &'static str {
        match self {
            Mark::Point { .. } => "point",
            Mark::Line => "line",
            Mark::Bar => "bar",
            Mark::Boxplot => "boxplot",
        }
    }
}

/// How a field maps onto an axis channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingRole {
    /// Continuous numeric axis.
    Quantitative,
    /// Discrete categories.
    Nominal,
    /// The column becomes the axis index (`set_index` semantics).
    Index,
    /// Plain value series over an index axis.
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Count,
}

/// One axis channel: which field feeds it and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// `None` when the channel is purely an aggregate (histogram count).
    pub field: Option<String>,
    pub role: EncodingRole,
    pub bin: bool,
    pub aggregate: Option<Aggregate>,
}

impl Encoding {
    fn field(name: &str, role: EncodingRole) -> Self {
        Encoding {
            field: Some(name.to_string()),
            role,
            bin: false,
            aggregate: None,
        }
    }

    fn binned(name: &str) -> Self {
        Encoding {
            field: Some(name.to_string()),
            role: EncodingRole::Quantitative,
            bin: true,
            aggregate: None,
        }
    }

    fn count() -> Self {
        Encoding {
            field: None,
            role: EncodingRole::Quantitative,
            bin: false,
            aggregate: Some(Aggregate::Count),
        }
    }
}

/// Declarative description of one chart: mark plus per-axis encodings.
/// Constructed, rendered, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub mark: Mark,
    pub x: Encoding,
    pub y: Encoding,
    /// Fields echoed in the hover tooltip, empty when tooltips are off.
    pub tooltip: Vec<String>,
}

/// Outcome of planning: a real spec, or the defined fallback branch for an
/// unrecognized / unselected chart type. The fallback is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartPlan {
    Spec(ChartSpec),
    Placeholder(&'static str),
}

pub const PLACEHOLDER_MESSAGE: &str = "Please select a chart type.";

/// Map a request onto its mark/encoding combination.
///
/// | chart     | mark            | x                       | y            |
/// |-----------|-----------------|-------------------------|--------------|
/// | Scatter   | point + tooltip | quantitative            | quantitative |
/// | Line      | line            | index                   | value        |
/// | Bar       | bar             | index                   | value        |
/// | Histogram | bar             | quantitative, binned    | count        |
/// | Box       | boxplot         | nominal                 | quantitative |
pub fn plan_chart(request: &ChartRequest) -> ChartPlan {
    let x = request.x_column.as_str();
    let y = request.y_column.as_str();

    let spec = match request.chart {
        None => return ChartPlan::Placeholder(PLACEHOLDER_MESSAGE),
        Some(ChartType::Scatter) => ChartSpec {
            title: ChartType::Scatter.label(),
            mark: Mark::Point { tooltip: true },
            x: Encoding::field(x, EncodingRole::Quantitative),
            y: Encoding::field(y, EncodingRole::Quantitative),
            tooltip: vec![x.to_string(), y.to_string()],
        },
        Some(ChartType::Line) => ChartSpec {
            title: ChartType::Line.label(),
            mark: Mark::Line,
            x: Encoding::field(x, EncodingRole::Index),
            y: Encoding::field(y, EncodingRole::Value),
            tooltip: Vec::new(),
        },
        Some(ChartType::Bar) => ChartSpec {
            title: ChartType::Bar.label(),
            mark: Mark::Bar,
            x: Encoding::field(x, EncodingRole::Index),
            y: Encoding::field(y, EncodingRole::Value),
            tooltip: Vec::new(),
        },
        Some(ChartType::Histogram) => ChartSpec {
            title: ChartType::Histogram.label(),
            mark: Mark::Bar,
            x: Encoding::binned(x),
            y: Encoding::count(),
            tooltip: vec![x.to_string()],
        },
        Some(ChartType::Box) => ChartSpec {
            title: ChartType::Box.label(),
            mark: Mark::Boxplot,
            x: Encoding::field(x, EncodingRole::Nominal),
            y: Encoding::field(y, EncodingRole::Quantitative),
            tooltip: vec![x.to_string(), y.to_string()],
        },
    };

    ChartPlan::Spec(spec)
}

// ---------------------------------------------------------------------------
// Vega-Lite shaped JSON view of a spec
// ---------------------------------------------------------------------------

impl ChartSpec {
    /// Render the spec as a vega-lite shaped JSON value, optionally with the
    /// table inlined as `data.values`.
    pub fn to_vega_lite(&self, data: Option<&Table>) -> Value {
        let mark = match self.mark {
            Mark::Point { tooltip } => json!({ "type": "point", "tooltip": tooltip }),
            other => json!(other.name()),
        };

        let mut tooltip: Vec<Value> = self
            .tooltip
            .iter()
            .map(|f| json!({ "field": f }))
            .collect();
        if self.y.aggregate == Some(Aggregate::Count) {
            tooltip.push(json!({ "aggregate": "count", "type": "quantitative" }));
        }

        let mut spec = json!({
            "mark": mark,
            "encoding": {
                "x": encoding_json(&self.x),
                "y": encoding_json(&self.y),
            },
        });
        if !tooltip.is_empty() {
            spec["encoding"]["tooltip"] = Value::Array(tooltip);
        }
        if let Some(table) = data {
            spec["data"] = json!({ "values": table_values(table) });
        }
        spec
    }
}

fn encoding_json(enc: &Encoding) -> Value {
    let mut v = serde_json::Map::new();
    if let Some(field) = &enc.field {
        v.insert("field".into(), json!(field));
    }
    let role = match enc.role {
        EncodingRole::Quantitative | EncodingRole::Value => "quantitative",
        EncodingRole::Nominal => "nominal",
        EncodingRole::Index => "ordinal",
    };
    v.insert("type".into(), json!(role));
    if enc.bin {
        v.insert("bin".into(), json!(true));
    }
    if enc.aggregate == Some(Aggregate::Count) {
        v.insert("aggregate".into(), json!("count"));
    }
    Value::Object(v)
}

fn table_values(table: &Table) -> Vec<Value> {
    table
        .rows
        .iter()
        .map(|row| {
            let obj: serde_json::Map<String, Value> = table
                .column_names
                .iter()
                .zip(row)
                .map(|(name, cell)| (name.clone(), json!(cell)))
                .collect();
            Value::Object(obj)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn request(chart: Option<ChartType>) -> ChartRequest {
        ChartRequest {
            chart,
            x_column: "a".into(),
            y_column: "b".into(),
        }
    }

    fn spec_for(chart: ChartType) -> ChartSpec {
        match plan_chart(&request(Some(chart))) {
            ChartPlan::Spec(spec) => spec,
            ChartPlan::Placeholder(_) => panic!("expected a spec"),
        }
    }

    #[test]
    fn scatter_is_point_with_tooltip_over_quantitative_axes() {
        let spec = spec_for(ChartType::Scatter);
        assert_eq!(spec.mark, Mark::Point { tooltip: true });
        assert_eq!(spec.x, Encoding::field("a", EncodingRole::Quantitative));
        assert_eq!(spec.y, Encoding::field("b", EncodingRole::Quantitative));
        assert_eq!(spec.tooltip, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn line_and_bar_use_x_as_index() {
        for (chart, mark) in [(ChartType::Line, Mark::Line), (ChartType::Bar, Mark::Bar)] {
            let spec = spec_for(chart);
            assert_eq!(spec.mark, mark);
            assert_eq!(spec.x, Encoding::field("a", EncodingRole::Index));
            assert_eq!(spec.y, Encoding::field("b", EncodingRole::Value));
        }
    }

    #[test]
    fn histogram_bins_x_and_counts() {
        let spec = spec_for(ChartType::Histogram);
        assert_eq!(spec.mark, Mark::Bar);
        assert!(spec.x.bin);
        assert_eq!(spec.x.field.as_deref(), Some("a"));
        assert_eq!(spec.y.field, None);
        assert_eq!(spec.y.aggregate, Some(Aggregate::Count));
    }

    #[test]
    fn box_plot_is_nominal_by_quantitative() {
        let spec = spec_for(ChartType::Box);
        assert_eq!(spec.mark, Mark::Boxplot);
        assert_eq!(spec.x, Encoding::field("a", EncodingRole::Nominal));
        assert_eq!(spec.y, Encoding::field("b", EncodingRole::Quantitative));
    }

    #[test]
    fn unrecognized_chart_type_falls_back_without_panicking() {
        assert_eq!(ChartType::from_label("Pie Chart"), None);
        let plan = plan_chart(&request(ChartType::from_label("Pie Chart")));
        assert_eq!(plan, ChartPlan::Placeholder(PLACEHOLDER_MESSAGE));
    }

    #[test]
    fn labels_round_trip_for_the_fixed_set() {
        for chart in ChartType::ALL {
            assert_eq!(ChartType::from_label(chart.label()), Some(chart));
        }
    }

    #[test]
    fn vega_lite_view_of_a_scatter_spec() {
        let spec = spec_for(ChartType::Scatter);
        let v = spec.to_vega_lite(None);
        assert_eq!(v["mark"]["type"], "point");
        assert_eq!(v["mark"]["tooltip"], true);
        assert_eq!(v["encoding"]["x"]["field"], "a");
        assert_eq!(v["encoding"]["x"]["type"], "quantitative");
        assert_eq!(v["encoding"]["y"]["field"], "b");
        assert_eq!(v["encoding"]["tooltip"][0]["field"], "a");
    }

    #[test]
    fn vega_lite_view_of_a_histogram_spec() {
        let spec = spec_for(ChartType::Histogram);
        let v = spec.to_vega_lite(None);
        assert_eq!(v["mark"], "bar");
        assert_eq!(v["encoding"]["x"]["bin"], true);
        assert_eq!(v["encoding"]["y"]["aggregate"], "count");
        assert_eq!(
            v["encoding"]["tooltip"][1]["aggregate"],
            "count"
        );
    }

    #[test]
    fn vega_lite_inlines_table_data() {
        let table = parse_csv("a,b\n1,2\n3,4\n".as_bytes()).unwrap();
        let spec = spec_for(ChartType::Scatter);
        let v = spec.to_vega_lite(Some(&table));
        assert_eq!(v["data"]["values"][0]["a"], 1);
        assert_eq!(v["data"]["values"][1]["b"], 4);
    }
}
