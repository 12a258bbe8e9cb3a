//! Chart module - chart specifications, decoding and render dispatch.

pub mod builder;
mod render;
mod spec;
mod theme;
mod wire;

pub use render::{
    render, render_attachment, AxisSide, CartesianKind, CartesianRender, FunnelRender,
    FunnelStageRender, GaugeRender, LegendEntry, PlaceholderRender, RadialKind, RadialRender,
    RenderInstruction, SeriesRender, SliceRender,
};
pub use spec::{
    BarChart, ChartAttachment, ChartKind, ChartSpec, Dataset, FunnelChart, FunnelStage, GaugeChart,
    GaugeThreshold, NamedChart, SeriesChart, SeriesDataset, SliceChart,
};
pub use theme::{ChartTheme, GaugeBand, Palette, DEFAULT_PALETTE, DEFAULT_UNAVAILABLE_TOKEN};
pub use wire::ChartDecodeError;
