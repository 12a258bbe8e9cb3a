//! Property tests for the pure presentation core.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use medianet_presentation::domain::chart::{
    render, BarChart, ChartSpec, ChartTheme, Dataset, FunnelChart, FunnelStage, GaugeChart,
    GaugeThreshold, RenderInstruction, SeriesChart, SeriesDataset, SliceChart,
};
use medianet_presentation::domain::insight::{ExtractionStatus, InsightExtractor};
use medianet_presentation::domain::report::ReportNormalizer;

// =============================================================================
// Strategies
// =============================================================================

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn any_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1_000.0..1_000.0f64,
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn numbers() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(any_number(), 0..6)
}

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 0..6)
}

fn color() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![Just("#123456".to_string()), Just("  ".to_string())])
}

fn series_dataset() -> impl Strategy<Value = SeriesDataset> {
    (word(), numbers(), color(), any::<bool>()).prop_map(|(label, data, color, secondary_axis)| {
        SeriesDataset {
            label,
            data,
            color,
            secondary_axis,
        }
    })
}

fn chart_spec() -> impl Strategy<Value = ChartSpec> {
    let dataset = (word(), numbers(), color()).prop_map(|(label, data, color)| Dataset { label, data, color });
    let stage = (word(), any_number(), color()).prop_map(|(name, value, color)| FunnelStage { name, value, color });
    let threshold =
        (any_number(), color(), word()).prop_map(|(value, color, label)| GaugeThreshold { value, color, label });

    prop_oneof![
        (word(), words(), prop::collection::vec(dataset, 0..4))
            .prop_map(|(title, labels, datasets)| ChartSpec::Bar(BarChart { title, labels, datasets })),
        (word(), words(), prop::collection::vec(series_dataset(), 0..4))
            .prop_map(|(title, labels, datasets)| ChartSpec::Line(SeriesChart { title, labels, datasets })),
        (word(), words(), prop::collection::vec(series_dataset(), 0..4))
            .prop_map(|(title, labels, datasets)| ChartSpec::Area(SeriesChart { title, labels, datasets })),
        (word(), words(), numbers(), prop::option::of(words()))
            .prop_map(|(title, labels, data, colors)| ChartSpec::Pie(SliceChart { title, labels, data, colors })),
        (word(), words(), numbers(), prop::option::of(words())).prop_map(|(title, labels, data, colors)| {
            ChartSpec::Doughnut(SliceChart { title, labels, data, colors })
        }),
        (word(), prop::collection::vec(stage, 0..5))
            .prop_map(|(title, stages)| ChartSpec::Funnel(FunnelChart { title, stages })),
        (word(), any_number(), any_number(), prop::collection::vec(threshold, 0..5)).prop_map(
            |(title, value, max, thresholds)| ChartSpec::Gauge(GaugeChart { title, value, max, thresholds })
        ),
        word().prop_map(|chart_type| ChartSpec::Unsupported { chart_type }),
    ]
}

/// Loosely-shaped analysis payloads using the upstream alias keys.
fn raw_report() -> impl Strategy<Value = Value> {
    let finding = prop_oneof![
        word().prop_map(Value::String),
        (word(), prop::option::of(word())).prop_map(|(title, risk)| json!({ "title": title, "risk": risk })),
        Just(Value::Null),
    ];
    let alias = prop_oneof![
        Just("vulns"),
        Just("security_vulnerabilities"),
        Just("seo"),
        Just("ads"),
        Just("market_gaps"),
        Just("keyDifferentiators"),
        Just("unrelated"),
    ];
    let entry = (alias, prop::collection::vec(finding, 0..4));

    (
        prop::collection::vec(entry, 0..4),
        prop::option::of(-50.0..150.0f64),
        prop::option::of(word()),
        prop::option::of(word()),
    )
        .prop_map(|(entries, confidence, error, summary)| {
            let mut object = Map::new();
            for (key, items) in entries {
                object.insert(key.to_string(), Value::Array(items));
            }
            if let Some(confidence) = confidence {
                object.insert("confidence".to_string(), json!(confidence));
            }
            if let Some(error) = error {
                object.insert("error".to_string(), Value::String(error));
            }
            if let Some(summary) = summary {
                object.insert("executive_summary".to_string(), Value::String(summary));
            }
            Value::Object(object)
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn normalizer_is_idempotent(raw in raw_report()) {
        let normalizer = ReportNormalizer::new();
        let once = normalizer.normalize(&raw);
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalizer.normalize(&serialized);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_report_is_never_silently_empty(raw in raw_report()) {
        let report = ReportNormalizer::new().normalize(&raw);
        prop_assert!(
            !report.has_no_findings() || report.error.is_some() || report.raw_fallback_text.is_some()
        );
    }

    #[test]
    fn renderer_is_total(spec in chart_spec()) {
        let theme = ChartTheme::default();
        let rendered = render(&spec, &theme);

        match rendered {
            RenderInstruction::Cartesian(chart) => {
                for series in &chart.series {
                    prop_assert!(series.points.len() <= chart.labels.len());
                    prop_assert!(series.points.iter().all(|p| p.is_finite()));
                }
            }
            RenderInstruction::Radial(chart) => {
                prop_assert!(chart.legend.len() <= chart.slices.len());
            }
            RenderInstruction::Funnel(funnel) => {
                for stage in &funnel.stages {
                    prop_assert!((0.0..=1.0).contains(&stage.width_ratio));
                    prop_assert!(!stage.percentage_label.contains("NaN"));
                    prop_assert!(!stage.percentage_label.contains("inf"));
                }
            }
            RenderInstruction::Gauge(gauge) => {
                prop_assert!((0.0..=1.0).contains(&gauge.fill_ratio));
                prop_assert!(!gauge.label.is_empty());
            }
            RenderInstruction::Placeholder(placeholder) => {
                prop_assert!(placeholder.message.starts_with("unsupported chart type: "));
            }
        }
    }

    #[test]
    fn strict_json_insights_parse_ok(items in prop::collection::vec(word(), 0..5)) {
        let payload = json!({ "market_gaps": items });
        let outcome = InsightExtractor::new().extract_text(&payload.to_string());
        prop_assert_eq!(outcome.status(), ExtractionStatus::Ok);
        prop_assert_eq!(outcome.into_value(), payload);
    }

    #[test]
    fn bracketed_prose_stays_empty_with_original_text(
        before in word(),
        after in word(),
        n in 0u32..100,
    ) {
        let text = format!("{before} [{n}] {after}");
        let outcome = InsightExtractor::new().extract_text(&text);
        prop_assert_eq!(outcome.status(), ExtractionStatus::Empty);

        let report = ReportNormalizer::new().normalize(&outcome.into_value());
        prop_assert_eq!(report.raw_fallback_text, Some(text));
    }

    #[test]
    fn truncation_keeps_only_complete_elements(
        items in prop::collection::vec(word(), 2..6),
        cut in 1usize..4,
    ) {
        let complete = &items[..items.len() - 1];
        let dangling = &items[items.len() - 1];
        let mut text = String::from("{\"market_gaps\": [");
        for item in complete {
            text.push_str(&format!("\"{item}\", "));
        }
        let partial_item = format!("\"{dangling}");
        text.push_str(&partial_item[..cut.min(partial_item.len())]);

        let outcome = InsightExtractor::new().extract_text(&text);
        prop_assert_eq!(outcome.status(), ExtractionStatus::Partial);
        prop_assert_eq!(outcome.into_value()["market_gaps"].clone(), json!(complete));
    }
}

// =============================================================================
// Fixed cases
// =============================================================================

#[test]
fn gauge_picks_highest_threshold_not_above_value() {
    let spec = ChartSpec::Gauge(GaugeChart {
        title: "Score".to_string(),
        value: 3.5,
        max: 5.0,
        thresholds: vec![
            GaugeThreshold { value: 1.0, color: None, label: "Low".to_string() },
            GaugeThreshold { value: 3.0, color: None, label: "Mid".to_string() },
            GaugeThreshold { value: 4.5, color: None, label: "High".to_string() },
        ],
    });

    let RenderInstruction::Gauge(gauge) = render(&spec, &ChartTheme::default()) else {
        panic!("expected gauge");
    };
    assert_eq!(gauge.label, "Mid");
}

#[test]
fn funnel_with_zero_first_stage_uses_token() {
    let spec = ChartSpec::Funnel(FunnelChart {
        title: "Funnel".to_string(),
        stages: vec![
            FunnelStage { name: "A".to_string(), value: 0.0, color: None },
            FunnelStage { name: "B".to_string(), value: 50.0, color: None },
        ],
    });

    let RenderInstruction::Funnel(funnel) = render(&spec, &ChartTheme::default()) else {
        panic!("expected funnel");
    };
    assert_eq!(funnel.stages[1].percentage, None);
    assert_eq!(funnel.stages[1].percentage_label, "N/A");
    assert_eq!(funnel.stages[1].width_ratio, 1.0);
}

#[test]
fn empty_gauge_with_zero_max_renders_fallback_band() {
    let spec = ChartSpec::Gauge(GaugeChart {
        title: String::new(),
        value: 0.0,
        max: 0.0,
        thresholds: Vec::new(),
    });

    let RenderInstruction::Gauge(gauge) = render(&spec, &ChartTheme::default()) else {
        panic!("expected gauge");
    };
    assert_eq!(gauge.fill_ratio, 0.0);
    assert_eq!(gauge.label, "Below range");
}
