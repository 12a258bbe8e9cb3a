//! Chart specifications.
//!
//! A [`ChartSpec`] is a tagged union over the chart kinds the dashboard can
//! draw. Anything else decodes to [`ChartSpec::Unsupported`] so a single odd
//! chart never takes a whole message down.

use serde::{Deserialize, Serialize};

/// The chart kinds the dashboard knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Doughnut,
    Funnel,
    Gauge,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Funnel,
        ChartKind::Gauge,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Funnel => "funnel",
            ChartKind::Gauge => "gauge",
        }
    }

    /// Parses a wire name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

/// One bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One line or area series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Plot against a second y axis.
    #[serde(default)]
    pub secondary_axis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Line or area chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChart {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<SeriesDataset>,
}

/// Pie or doughnut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceChart {
    pub title: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelChart {
    pub title: String,
    pub stages: Vec<FunnelStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeThreshold {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeChart {
    pub title: String,
    pub value: f64,
    pub max: f64,
    pub thresholds: Vec<GaugeThreshold>,
}

/// A chart to draw, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChart),
    Line(SeriesChart),
    Area(SeriesChart),
    Pie(SliceChart),
    Doughnut(SliceChart),
    Funnel(FunnelChart),
    Gauge(GaugeChart),
    /// A chart whose type the dashboard cannot draw.
    Unsupported {
        #[serde(rename = "chartType")]
        chart_type: String,
    },
}

impl ChartSpec {
    /// Known kind, or `None` for unsupported charts.
    pub fn kind(&self) -> Option<ChartKind> {
        match self {
            ChartSpec::Bar(_) => Some(ChartKind::Bar),
            ChartSpec::Line(_) => Some(ChartKind::Line),
            ChartSpec::Area(_) => Some(ChartKind::Area),
            ChartSpec::Pie(_) => Some(ChartKind::Pie),
            ChartSpec::Doughnut(_) => Some(ChartKind::Doughnut),
            ChartSpec::Funnel(_) => Some(ChartKind::Funnel),
            ChartSpec::Gauge(_) => Some(ChartKind::Gauge),
            ChartSpec::Unsupported { .. } => None,
        }
    }

    /// Type name as it appeared on the wire.
    pub fn type_name(&self) -> &str {
        match self {
            ChartSpec::Unsupported { chart_type } => chart_type,
            other => other.kind().map(|kind| kind.as_str()).unwrap_or_default(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ChartSpec::Bar(chart) => Some(&chart.title),
            ChartSpec::Line(chart) | ChartSpec::Area(chart) => Some(&chart.title),
            ChartSpec::Pie(chart) | ChartSpec::Doughnut(chart) => Some(&chart.title),
            ChartSpec::Funnel(chart) => Some(&chart.title),
            ChartSpec::Gauge(chart) => Some(&chart.title),
            ChartSpec::Unsupported { .. } => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.kind().is_some()
    }

    pub fn unsupported(chart_type: impl Into<String>) -> Self {
        ChartSpec::Unsupported {
            chart_type: chart_type.into(),
        }
    }
}

/// A chart with a display name, as used by multi-chart attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedChart {
    pub name: String,
    pub chart: ChartSpec,
}

/// How charts attach to a bot message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ChartAttachment {
    Single {
        chart: ChartSpec,
    },
    /// A main chart with an optional companion, e.g. trend plus breakdown.
    Paired {
        primary: ChartSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        secondary: Option<ChartSpec>,
    },
    /// Geography breakdown with an optional device split.
    Breakdown {
        geography: ChartSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device: Option<ChartSpec>,
    },
    /// Several named charts in source order.
    Named {
        charts: Vec<NamedChart>,
    },
}

impl ChartAttachment {
    pub fn single(chart: ChartSpec) -> Self {
        ChartAttachment::Single { chart }
    }

    /// Every chart in display order.
    pub fn charts(&self) -> Vec<&ChartSpec> {
        match self {
            ChartAttachment::Single { chart } => vec![chart],
            ChartAttachment::Paired { primary, secondary } => {
                std::iter::once(primary).chain(secondary.as_ref()).collect()
            }
            ChartAttachment::Breakdown { geography, device } => {
                std::iter::once(geography).chain(device.as_ref()).collect()
            }
            ChartAttachment::Named { charts } => charts.iter().map(|named| &named.chart).collect(),
        }
    }
}
