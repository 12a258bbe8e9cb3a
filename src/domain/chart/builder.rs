//! Charts built client-side for metric responses that arrive without
//! `chart_data`.

use serde_json::{Map, Value};

use super::spec::{BarChart, ChartSpec, Dataset, FunnelChart, FunnelStage, GaugeChart, GaugeThreshold};

const LOW: &str = "#EA4335";
const MID: &str = "#FBBC04";
const HIGH: &str = "#34A853";

/// Picks a chart for a metric response.
///
/// In order: ROI/ROAS gauge, CTR gauge, impressions-clicks-conversions
/// funnel, single-bar chart of the numeric `value`.
pub fn chart_for_metric(metric: &str, fields: &Map<String, Value>) -> Option<ChartSpec> {
    let metric = metric.trim().to_ascii_lowercase();

    if metric == "roi" || metric == "roas" {
        if let Some(value) = numeric(fields, "value").or_else(|| numeric(fields, &metric)) {
            return Some(return_gauge(&metric, value));
        }
    }

    if let Some(ctr) = numeric(fields, "ctr") {
        return Some(ctr_gauge(ctr));
    }

    if let (Some(impressions), Some(clicks), Some(conversions)) = (
        numeric(fields, "impressions"),
        numeric(fields, "clicks"),
        numeric(fields, "conversions"),
    ) {
        return Some(campaign_funnel(impressions, clicks, conversions));
    }

    numeric(fields, "value").map(|value| single_metric_bar(&metric, value))
}

/// Gauge for a return multiple such as ROI or ROAS, on a 0-5 scale.
pub fn return_gauge(metric: &str, value: f64) -> ChartSpec {
    ChartSpec::Gauge(GaugeChart {
        title: metric.to_ascii_uppercase(),
        value,
        max: 5.0,
        thresholds: vec![
            threshold(1.0, LOW, "Low"),
            threshold(2.0, MID, "Moderate"),
            threshold(3.0, HIGH, "Strong"),
        ],
    })
}

/// Gauge for click-through rate. `ctr` is a fraction (0.05 is 5%).
pub fn ctr_gauge(ctr: f64) -> ChartSpec {
    ChartSpec::Gauge(GaugeChart {
        title: "CTR (%)".to_string(),
        value: ctr * 100.0,
        max: 10.0,
        thresholds: vec![
            threshold(1.0, LOW, "Low"),
            threshold(3.0, MID, "Average"),
            threshold(5.0, HIGH, "High"),
        ],
    })
}

pub fn campaign_funnel(impressions: f64, clicks: f64, conversions: f64) -> ChartSpec {
    let stage = |name: &str, value: f64| FunnelStage {
        name: name.to_string(),
        value: value.max(0.0),
        color: None,
    };
    ChartSpec::Funnel(FunnelChart {
        title: "Campaign Funnel".to_string(),
        stages: vec![
            stage("Impressions", impressions),
            stage("Clicks", clicks),
            stage("Conversions", conversions),
        ],
    })
}

pub fn single_metric_bar(metric: &str, value: f64) -> ChartSpec {
    let label = display_name(metric);
    ChartSpec::Bar(BarChart {
        title: label.clone(),
        labels: vec![label.clone()],
        datasets: vec![Dataset {
            label,
            data: vec![value],
            color: None,
        }],
    })
}

fn threshold(value: f64, color: &str, label: &str) -> GaugeThreshold {
    GaugeThreshold {
        value,
        color: Some(color.to_string()),
        label: label.to_string(),
    }
}

fn numeric(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|value| value.is_finite())
}

/// `ad_spend` becomes `Ad Spend`.
fn display_name(metric: &str) -> String {
    metric
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
