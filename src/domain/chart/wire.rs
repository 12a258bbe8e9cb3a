//! Decoding of upstream `chart_data` payloads.
//!
//! Upstream charts are Chart.js-flavoured: a bar chart may carry `datasets`
//! or a bare `data` array, colors live in `backgroundColor` or
//! `borderColor`, and a secondary axis is signalled by `yAxisID`. Decoding
//! folds those variants into [`ChartSpec`].

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::spec::{
    BarChart, ChartAttachment, ChartKind, ChartSpec, Dataset, FunnelChart, FunnelStage, GaugeChart,
    GaugeThreshold, NamedChart, SeriesChart, SeriesDataset, SliceChart,
};

/// Gauge maximum when the payload does not give one.
const DEFAULT_GAUGE_MAX: f64 = 100.0;

/// Errors that can occur while decoding a chart payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChartDecodeError {
    #[error("Chart payload must be an object")]
    NotAnObject,

    #[error("Chart payload has no 'type'")]
    MissingType,

    #[error("{kind} chart is missing '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ChartSpec {
    /// Decodes one chart object.
    ///
    /// Unknown `type` values decode to [`ChartSpec::Unsupported`]; only
    /// structurally broken payloads of a known kind are errors.
    pub fn from_value(value: &Value) -> Result<Self, ChartDecodeError> {
        let object = value.as_object().ok_or(ChartDecodeError::NotAnObject)?;
        let type_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ChartDecodeError::MissingType)?;

        let Some(kind) = ChartKind::parse(type_name) else {
            return Ok(ChartSpec::unsupported(type_name));
        };

        let title = text_field(object, "title").unwrap_or_default();
        let spec = match kind {
            ChartKind::Bar => ChartSpec::Bar(BarChart {
                title,
                labels: labels(object)?,
                datasets: bar_datasets(object)?,
            }),
            ChartKind::Line => ChartSpec::Line(SeriesChart {
                title,
                labels: labels(object)?,
                datasets: series_datasets(object, "line")?,
            }),
            ChartKind::Area => ChartSpec::Area(SeriesChart {
                title,
                labels: labels(object)?,
                datasets: series_datasets(object, "area")?,
            }),
            ChartKind::Pie => ChartSpec::Pie(slice_chart(object, title, "pie")?),
            ChartKind::Doughnut => ChartSpec::Doughnut(slice_chart(object, title, "doughnut")?),
            ChartKind::Funnel => ChartSpec::Funnel(FunnelChart {
                title,
                stages: funnel_stages(object)?,
            }),
            ChartKind::Gauge => ChartSpec::Gauge(gauge_chart(object, title)?),
        };
        Ok(spec)
    }

    /// Decodes a chart, degrading any decode failure to
    /// [`ChartSpec::Unsupported`].
    pub fn from_value_lossy(value: &Value) -> Self {
        match Self::from_value(value) {
            Ok(spec) => spec,
            Err(err) => {
                let chart_type = value
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                warn!(error = %err, chart_type = %chart_type, "Chart payload could not be decoded");
                ChartSpec::Unsupported { chart_type }
            }
        }
    }
}

impl ChartAttachment {
    /// Decodes an envelope's `chart_data`.
    ///
    /// Shapes, checked in order: a chart object with `type`; a
    /// `primary`/`secondary` pair; a `geography`/`device` breakdown; a map of
    /// named charts. Returns `None` for null or unrecognised shapes.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = match value {
            Value::Null => return None,
            Value::Object(object) if !object.is_empty() => object,
            other => {
                warn!(kind = json_kind(other), "Ignoring chart data that is not an object");
                return None;
            }
        };

        if object.contains_key("type") {
            return Some(ChartAttachment::Single {
                chart: ChartSpec::from_value_lossy(value),
            });
        }

        if let Some(primary) = present(object, "primary") {
            return Some(ChartAttachment::Paired {
                primary: ChartSpec::from_value_lossy(primary),
                secondary: present(object, "secondary").map(ChartSpec::from_value_lossy),
            });
        }

        if let Some(geography) = present(object, "geography") {
            if object.keys().all(|key| key == "geography" || key == "device") {
                return Some(ChartAttachment::Breakdown {
                    geography: ChartSpec::from_value_lossy(geography),
                    device: present(object, "device").map(ChartSpec::from_value_lossy),
                });
            }
        }

        if object.values().all(Value::is_object) {
            let charts = object
                .iter()
                .map(|(name, chart)| NamedChart {
                    name: name.clone(),
                    chart: ChartSpec::from_value_lossy(chart),
                })
                .collect();
            return Some(ChartAttachment::Named { charts });
        }

        warn!(keys = ?object.keys().collect::<Vec<_>>(), "Unrecognised chart data shape");
        None
    }
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn labels(object: &Map<String, Value>) -> Result<Vec<String>, ChartDecodeError> {
    match object.get("labels") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(label_text).collect()),
        Some(other) => Err(ChartDecodeError::InvalidField {
            field: "labels",
            reason: format!("expected array, got {}", json_kind(other)),
        }),
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Numeric array. Numeric strings are parsed; anything else counts as 0.
fn numbers(value: &Value, field: &'static str) -> Result<Vec<f64>, ChartDecodeError> {
    let items = value.as_array().ok_or_else(|| ChartDecodeError::InvalidField {
        field,
        reason: format!("expected array, got {}", json_kind(value)),
    })?;
    Ok(items.iter().map(number).collect())
}

fn number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<&'a Value, ChartDecodeError> {
    present(object, field).ok_or(ChartDecodeError::MissingField { kind, field })
}

/// First string among the given color keys. Per-point color arrays are
/// ignored for single-color series.
fn color(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn dataset_label(object: &Map<String, Value>, index: usize) -> String {
    text_field(object, "label").unwrap_or_else(|| format!("Series {}", index + 1))
}

fn dataset_objects<'a>(
    datasets: &'a Value,
) -> Result<impl Iterator<Item = (usize, &'a Map<String, Value>)>, ChartDecodeError> {
    let items = datasets.as_array().ok_or_else(|| ChartDecodeError::InvalidField {
        field: "datasets",
        reason: format!("expected array, got {}", json_kind(datasets)),
    })?;
    Ok(items.iter().filter_map(Value::as_object).enumerate())
}

fn bar_datasets(object: &Map<String, Value>) -> Result<Vec<Dataset>, ChartDecodeError> {
    const BAR_COLORS: &[&str] = &["color", "backgroundColor", "borderColor"];

    if let Some(datasets) = present(object, "datasets") {
        return dataset_objects(datasets)?
            .map(|(index, dataset)| -> Result<Dataset, ChartDecodeError> {
                Ok(Dataset {
                    label: dataset_label(dataset, index),
                    data: numbers(required(dataset, "bar", "data")?, "data")?,
                    color: color(dataset, BAR_COLORS),
                })
            })
            .collect();
    }

    let data = required(object, "bar", "data")?;
    Ok(vec![Dataset {
        label: text_field(object, "label")
            .or_else(|| text_field(object, "title"))
            .unwrap_or_else(|| "Series 1".to_string()),
        data: numbers(data, "data")?,
        color: color(object, BAR_COLORS),
    }])
}

fn series_datasets(
    object: &Map<String, Value>,
    kind: &'static str,
) -> Result<Vec<SeriesDataset>, ChartDecodeError> {
    const LINE_COLORS: &[&str] = &["color", "borderColor", "backgroundColor"];

    if let Some(datasets) = present(object, "datasets") {
        return dataset_objects(datasets)?
            .map(|(index, dataset)| -> Result<SeriesDataset, ChartDecodeError> {
                Ok(SeriesDataset {
                    label: dataset_label(dataset, index),
                    data: numbers(required(dataset, kind, "data")?, "data")?,
                    color: color(dataset, LINE_COLORS),
                    secondary_axis: is_secondary_axis(dataset),
                })
            })
            .collect();
    }

    let data = required(object, kind, "data")?;
    Ok(vec![SeriesDataset {
        label: text_field(object, "label")
            .or_else(|| text_field(object, "title"))
            .unwrap_or_else(|| "Series 1".to_string()),
        data: numbers(data, "data")?,
        color: color(object, LINE_COLORS),
        secondary_axis: false,
    }])
}

/// `secondaryAxis: true`, or a `yAxisID` other than the default `y`.
fn is_secondary_axis(dataset: &Map<String, Value>) -> bool {
    if let Some(flag) = dataset.get("secondaryAxis").and_then(Value::as_bool) {
        return flag;
    }
    dataset
        .get("yAxisID")
        .and_then(Value::as_str)
        .map(|axis| axis != "y")
        .unwrap_or(false)
}

fn slice_chart(
    object: &Map<String, Value>,
    title: String,
    kind: &'static str,
) -> Result<SliceChart, ChartDecodeError> {
    let colors = ["colors", "backgroundColor"].iter().find_map(|key| {
        object.get(*key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    });

    Ok(SliceChart {
        title,
        labels: labels(object)?,
        data: numbers(required(object, kind, "data")?, "data")?,
        colors: colors.filter(|colors| !colors.is_empty()),
    })
}

fn funnel_stages(object: &Map<String, Value>) -> Result<Vec<FunnelStage>, ChartDecodeError> {
    if let Some(stages) = present(object, "stages") {
        let items = stages.as_array().ok_or_else(|| ChartDecodeError::InvalidField {
            field: "stages",
            reason: format!("expected array, got {}", json_kind(stages)),
        })?;
        return Ok(items
            .iter()
            .filter_map(Value::as_object)
            .enumerate()
            .map(|(index, stage)| FunnelStage {
                name: text_field(stage, "name")
                    .or_else(|| text_field(stage, "label"))
                    .unwrap_or_else(|| format!("Stage {}", index + 1)),
                value: stage.get("value").map(number).unwrap_or(0.0).max(0.0),
                color: color(stage, &["color", "backgroundColor"]),
            })
            .collect());
    }

    let data = required(object, "funnel", "data")?;
    let names = labels(object)?;
    Ok(numbers(data, "data")?
        .into_iter()
        .enumerate()
        .map(|(index, value)| FunnelStage {
            name: names
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Stage {}", index + 1)),
            value: value.max(0.0),
            color: None,
        })
        .collect())
}

fn gauge_chart(object: &Map<String, Value>, title: String) -> Result<GaugeChart, ChartDecodeError> {
    let value = number(required(object, "gauge", "value")?);
    let max = present(object, "max").map(number).unwrap_or(DEFAULT_GAUGE_MAX);

    let thresholds = match present(object, "thresholds") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|threshold| GaugeThreshold {
                value: threshold.get("value").map(number).unwrap_or(0.0),
                color: color(threshold, &["color"]),
                label: text_field(threshold, "label").unwrap_or_default(),
            })
            .collect(),
        Some(other) => {
            return Err(ChartDecodeError::InvalidField {
                field: "thresholds",
                reason: format!("expected array, got {}", json_kind(other)),
            })
        }
    };

    Ok(GaugeChart {
        title,
        value,
        max,
        thresholds,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod chart_spec {
        use super::*;

        #[test]
        fn bar_with_bare_data_becomes_single_dataset() {
            let spec = ChartSpec::from_value(&json!({
                "type": "bar",
                "title": "Daily Impressions",
                "labels": ["Mon", "Tue"],
                "data": [9500, 9800],
                "backgroundColor": "#4285F4"
            }))
            .unwrap();

            assert_eq!(
                spec,
                ChartSpec::Bar(BarChart {
                    title: "Daily Impressions".to_string(),
                    labels: vec!["Mon".to_string(), "Tue".to_string()],
                    datasets: vec![Dataset {
                        label: "Daily Impressions".to_string(),
                        data: vec![9500.0, 9800.0],
                        color: Some("#4285F4".to_string()),
                    }],
                })
            );
        }

        #[test]
        fn bar_with_color_array_leaves_color_to_palette() {
            let spec = ChartSpec::from_value(&json!({
                "type": "bar",
                "labels": ["a"],
                "data": [1],
                "backgroundColor": ["#111111"]
            }))
            .unwrap();
            let ChartSpec::Bar(bar) = spec else { panic!("expected bar") };
            assert_eq!(bar.datasets[0].color, None);
        }

        #[test]
        fn line_y_axis_id_marks_secondary_axis() {
            let spec = ChartSpec::from_value(&json!({
                "type": "line",
                "labels": ["a", "b"],
                "datasets": [
                    { "label": "Clicks", "data": [1, 2], "borderColor": "#34A853", "yAxisID": "y" },
                    { "label": "CTR %", "data": [5.0, 5.0], "yAxisID": "y1" }
                ]
            }))
            .unwrap();

            let ChartSpec::Line(line) = spec else { panic!("expected line") };
            assert!(!line.datasets[0].secondary_axis);
            assert!(line.datasets[1].secondary_axis);
            assert_eq!(line.datasets[0].color.as_deref(), Some("#34A853"));
        }

        #[test]
        fn area_prefers_border_color() {
            let spec = ChartSpec::from_value(&json!({
                "type": "area",
                "data": [95, 98],
                "backgroundColor": "rgba(52, 168, 83, 0.2)",
                "borderColor": "#34A853"
            }))
            .unwrap();
            let ChartSpec::Area(area) = spec else { panic!("expected area") };
            assert_eq!(area.datasets[0].color.as_deref(), Some("#34A853"));
        }

        #[test]
        fn pie_reads_background_color_array() {
            let spec = ChartSpec::from_value(&json!({
                "type": "pie",
                "labels": ["US", "EU"],
                "data": [60, 40],
                "backgroundColor": ["#4285F4", "#34A853"]
            }))
            .unwrap();
            let ChartSpec::Pie(pie) = spec else { panic!("expected pie") };
            assert_eq!(
                pie.colors,
                Some(vec!["#4285F4".to_string(), "#34A853".to_string()])
            );
        }

        #[test]
        fn funnel_stages_clamp_negative_values() {
            let spec = ChartSpec::from_value(&json!({
                "type": "funnel",
                "stages": [{ "name": "Impressions", "value": 1000 }, { "label": "Clicks", "value": -5 }]
            }))
            .unwrap();
            let ChartSpec::Funnel(funnel) = spec else { panic!("expected funnel") };
            assert_eq!(funnel.stages[1].name, "Clicks");
            assert_eq!(funnel.stages[1].value, 0.0);
        }

        #[test]
        fn funnel_from_labels_and_data() {
            let spec = ChartSpec::from_value(&json!({
                "type": "funnel",
                "labels": ["Seen"],
                "data": [10, 4]
            }))
            .unwrap();
            let ChartSpec::Funnel(funnel) = spec else { panic!("expected funnel") };
            assert_eq!(funnel.stages[0].name, "Seen");
            assert_eq!(funnel.stages[1].name, "Stage 2");
        }

        #[test]
        fn gauge_defaults_max() {
            let spec = ChartSpec::from_value(&json!({ "type": "gauge", "value": "42" })).unwrap();
            let ChartSpec::Gauge(gauge) = spec else { panic!("expected gauge") };
            assert_eq!(gauge.value, 42.0);
            assert_eq!(gauge.max, 100.0);
            assert!(gauge.thresholds.is_empty());
        }

        #[test]
        fn unknown_type_is_unsupported() {
            let spec = ChartSpec::from_value(&json!({ "type": "radar", "labels": [] })).unwrap();
            assert_eq!(spec, ChartSpec::unsupported("radar"));
        }

        #[test]
        fn missing_type_is_error() {
            assert_eq!(
                ChartSpec::from_value(&json!({ "labels": [] })),
                Err(ChartDecodeError::MissingType)
            );
        }

        #[test]
        fn missing_data_is_error() {
            assert_eq!(
                ChartSpec::from_value(&json!({ "type": "pie", "labels": ["a"] })),
                Err(ChartDecodeError::MissingField {
                    kind: "pie",
                    field: "data"
                })
            );
        }

        #[test]
        fn lossy_decode_keeps_type_name() {
            let spec = ChartSpec::from_value_lossy(&json!({ "type": "gauge" }));
            assert_eq!(spec, ChartSpec::unsupported("gauge"));
        }
    }

    mod chart_attachment {
        use super::*;

        #[test]
        fn typed_object_is_single() {
            let attachment =
                ChartAttachment::from_value(&json!({ "type": "bar", "data": [1] })).unwrap();
            assert!(matches!(attachment, ChartAttachment::Single { .. }));
        }

        #[test]
        fn primary_secondary_is_paired() {
            let attachment = ChartAttachment::from_value(&json!({
                "primary": { "type": "area", "data": [1, 2] },
                "secondary": { "type": "bar", "data": [3] }
            }))
            .unwrap();
            let ChartAttachment::Paired { primary, secondary } = attachment else {
                panic!("expected paired")
            };
            assert_eq!(primary.type_name(), "area");
            assert_eq!(secondary.map(|s| s.type_name().to_string()).as_deref(), Some("bar"));
        }

        #[test]
        fn geography_device_is_breakdown() {
            let attachment = ChartAttachment::from_value(&json!({
                "geography": { "type": "pie", "data": [60, 40] },
                "device": { "type": "doughnut", "data": [70, 30] }
            }))
            .unwrap();
            assert!(matches!(attachment, ChartAttachment::Breakdown { device: Some(_), .. }));
        }

        #[test]
        fn other_maps_are_named_in_source_order() {
            let attachment = ChartAttachment::from_value(&json!({
                "impressions_revenue": { "type": "bar", "data": [1] },
                "geography": { "type": "pie", "data": [1] },
                "rpm_ctr": { "type": "radar", "data": [1] }
            }))
            .unwrap();
            let ChartAttachment::Named { charts } = attachment else {
                panic!("expected named")
            };
            let names: Vec<_> = charts.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["impressions_revenue", "geography", "rpm_ctr"]);
            assert!(!charts[2].chart.is_supported());
        }

        #[test]
        fn null_and_scalars_are_none() {
            assert_eq!(ChartAttachment::from_value(&Value::Null), None);
            assert_eq!(ChartAttachment::from_value(&json!("chart")), None);
            assert_eq!(ChartAttachment::from_value(&json!({})), None);
        }

        #[test]
        fn mixed_map_is_none() {
            assert_eq!(ChartAttachment::from_value(&json!({ "a": 1, "b": {} })), None);
        }
    }
}
