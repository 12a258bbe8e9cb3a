//! Chart rendering dispatch.
//!
//! [`render`] is a total function from a chart and a theme to a
//! [`RenderInstruction`] a drawing surface can follow without further
//! decisions. Mismatched lengths, zero denominators and non-finite numbers
//! are resolved here, never passed on.

use serde::Serialize;

use super::spec::{
    BarChart, ChartAttachment, ChartSpec, FunnelChart, GaugeChart, SeriesChart, SliceChart,
};
use super::theme::ChartTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartesianKind {
    Bar,
    Line,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialKind {
    Pie,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRender {
    pub label: String,
    /// One point per label, at most.
    pub points: Vec<f64>,
    pub color: String,
    pub axis: AxisSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartesianRender {
    pub kind: CartesianKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<SeriesRender>,
    /// True if any series uses the secondary axis.
    pub secondary_axis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceRender {
    pub label: Option<String>,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialRender {
    pub kind: RadialKind,
    pub title: String,
    pub slices: Vec<SliceRender>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStageRender {
    pub name: String,
    pub value: f64,
    /// Bar width relative to the widest stage, 0.0 to 1.0.
    pub width_ratio: f64,
    /// Share of the first stage in percent, if computable.
    pub percentage: Option<f64>,
    /// `percentage` formatted for display, or the unavailable token.
    pub percentage_label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelRender {
    pub title: String,
    pub stages: Vec<FunnelStageRender>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeRender {
    pub title: String,
    pub value: f64,
    pub max: f64,
    /// Filled portion of the dial, 0.0 to 1.0.
    pub fill_ratio: f64,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderRender {
    pub message: String,
}

/// A fully-resolved drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "render", rename_all = "snake_case")]
pub enum RenderInstruction {
    Cartesian(CartesianRender),
    Radial(RadialRender),
    Funnel(FunnelRender),
    Gauge(GaugeRender),
    Placeholder(PlaceholderRender),
}

/// Renders one chart. Never fails.
pub fn render(spec: &ChartSpec, theme: &ChartTheme) -> RenderInstruction {
    match spec {
        ChartSpec::Bar(chart) => RenderInstruction::Cartesian(render_bar(chart, theme)),
        ChartSpec::Line(chart) => {
            RenderInstruction::Cartesian(render_series(CartesianKind::Line, chart, theme))
        }
        ChartSpec::Area(chart) => {
            RenderInstruction::Cartesian(render_series(CartesianKind::Area, chart, theme))
        }
        ChartSpec::Pie(chart) => RenderInstruction::Radial(render_slices(RadialKind::Pie, chart, theme)),
        ChartSpec::Doughnut(chart) => {
            RenderInstruction::Radial(render_slices(RadialKind::Doughnut, chart, theme))
        }
        ChartSpec::Funnel(chart) => RenderInstruction::Funnel(render_funnel(chart, theme)),
        ChartSpec::Gauge(chart) => RenderInstruction::Gauge(render_gauge(chart, theme)),
        ChartSpec::Unsupported { chart_type } => RenderInstruction::Placeholder(PlaceholderRender {
            message: format!("unsupported chart type: {chart_type}"),
        }),
    }
}

/// Renders every chart of an attachment in display order.
pub fn render_attachment(attachment: &ChartAttachment, theme: &ChartTheme) -> Vec<RenderInstruction> {
    attachment
        .charts()
        .into_iter()
        .map(|chart| render(chart, theme))
        .collect()
}

fn render_bar(chart: &BarChart, theme: &ChartTheme) -> CartesianRender {
    let series = chart
        .datasets
        .iter()
        .enumerate()
        .map(|(index, dataset)| SeriesRender {
            label: dataset.label.clone(),
            points: overlapping_points(&dataset.data, chart.labels.len()),
            color: pick_color(dataset.color.as_deref(), theme, index),
            axis: AxisSide::Primary,
        })
        .collect();

    CartesianRender {
        kind: CartesianKind::Bar,
        title: chart.title.clone(),
        labels: chart.labels.clone(),
        series,
        secondary_axis: false,
    }
}

fn render_series(kind: CartesianKind, chart: &SeriesChart, theme: &ChartTheme) -> CartesianRender {
    let series: Vec<SeriesRender> = chart
        .datasets
        .iter()
        .enumerate()
        .map(|(index, dataset)| SeriesRender {
            label: dataset.label.clone(),
            points: overlapping_points(&dataset.data, chart.labels.len()),
            color: pick_color(dataset.color.as_deref(), theme, index),
            axis: if dataset.secondary_axis {
                AxisSide::Secondary
            } else {
                AxisSide::Primary
            },
        })
        .collect();

    let secondary_axis = series.iter().any(|s| s.axis == AxisSide::Secondary);
    CartesianRender {
        kind,
        title: chart.title.clone(),
        labels: chart.labels.clone(),
        series,
        secondary_axis,
    }
}

fn render_slices(kind: RadialKind, chart: &SliceChart, theme: &ChartTheme) -> RadialRender {
    let chart_colors = chart.colors.as_deref().unwrap_or_default();
    let slices: Vec<SliceRender> = chart
        .data
        .iter()
        .enumerate()
        .map(|(index, value)| SliceRender {
            label: chart.labels.get(index).cloned(),
            value: finite_or_zero(*value),
            color: pick_color(chart_colors.get(index).map(String::as_str), theme, index),
        })
        .collect();

    let legend = chart
        .labels
        .iter()
        .zip(&slices)
        .map(|(label, slice)| LegendEntry {
            label: label.clone(),
            color: slice.color.clone(),
        })
        .collect();

    RadialRender {
        kind,
        title: chart.title.clone(),
        slices,
        legend,
    }
}

fn render_funnel(chart: &FunnelChart, theme: &ChartTheme) -> FunnelRender {
    let values: Vec<f64> = chart
        .stages
        .iter()
        .map(|stage| finite_or_zero(stage.value).max(0.0))
        .collect();
    let widest = values.iter().copied().fold(0.0_f64, f64::max);
    let first = values.first().copied().unwrap_or(0.0);

    let stages = chart
        .stages
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(index, (stage, &value))| {
            let width_ratio = if widest > 0.0 { value / widest } else { 0.0 };
            let percentage = if first > 0.0 {
                Some(value / first * 100.0).filter(|pct| pct.is_finite())
            } else {
                None
            };
            let percentage_label = match percentage {
                Some(pct) => format!("{pct:.1}%"),
                None => theme.unavailable_token.clone(),
            };

            FunnelStageRender {
                name: stage.name.clone(),
                value,
                width_ratio,
                percentage,
                percentage_label,
                color: pick_color(stage.color.as_deref(), theme, index),
            }
        })
        .collect();

    FunnelRender {
        title: chart.title.clone(),
        stages,
    }
}

fn render_gauge(chart: &GaugeChart, theme: &ChartTheme) -> GaugeRender {
    let value = finite_or_zero(chart.value);
    let max = finite_or_zero(chart.max);
    let fill_ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut thresholds: Vec<_> = chart.thresholds.iter().collect();
    thresholds.sort_by(|a, b| finite_or_zero(b.value).total_cmp(&finite_or_zero(a.value)));

    let (color, label) = match thresholds
        .into_iter()
        .find(|threshold| finite_or_zero(threshold.value) <= value)
    {
        Some(threshold) => (
            threshold
                .color
                .clone()
                .unwrap_or_else(|| theme.gauge_fallback.color.clone()),
            threshold.label.clone(),
        ),
        None => (
            theme.gauge_fallback.color.clone(),
            theme.gauge_fallback.label.clone(),
        ),
    };

    GaugeRender {
        title: chart.title.clone(),
        value,
        max,
        fill_ratio,
        color,
        label,
    }
}

/// Data truncated to the label count, with non-finite values zeroed.
fn overlapping_points(data: &[f64], label_count: usize) -> Vec<f64> {
    data.iter()
        .take(label_count)
        .map(|value| finite_or_zero(*value))
        .collect()
}

fn pick_color(own: Option<&str>, theme: &ChartTheme, index: usize) -> String {
    match own {
        Some(color) if !color.trim().is_empty() => color.to_string(),
        _ => theme.palette.color(index).to_string(),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
