//! typed records for each api domain

mod dashboard;
mod model;
mod monitor;
mod space;
mod trace;

pub use dashboard::{
    Dashboard, DashboardCreator, DashboardRef, LineChartPlot, LineChartWidgetInput, Widget,
};
pub use model::{Model, ModelRef};
pub use monitor::{
    DataQualityMonitorInput, DriftMonitorInput, Monitor, PerformanceMonitorInput, ThresholdUpdate,
};
pub use space::SpaceIds;
pub use trace::{Span, SpanSort};
