use crate::enums::ModelEnvironment;
use crate::error::{Error, Result};
use crate::record::{require_non_empty, Record, SparseRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// dashboard in a space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub creator: Option<DashboardCreator>,
}

impl Record for Dashboard {
    const NAME: &'static str = "Dashboard";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCreator {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// a dashboard addressed by id or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardRef {
    Id(String),
    Name(String),
}

impl DashboardRef {
    /// build from optional id and name arguments; exactly one must be set
    pub fn from_parts(id: Option<String>, name: Option<String>) -> Result<Self> {
        match (id, name) {
            (Some(id), None) if !id.trim().is_empty() => Ok(DashboardRef::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => Ok(DashboardRef::Name(name)),
            (Some(_), Some(_)) => Err(Error::Validation {
                record: "DashboardRef".to_string(),
                field: None,
                message: "pass either a dashboard id or a dashboard name, not both".to_string(),
            }),
            _ => Err(Error::Validation {
                record: "DashboardRef".to_string(),
                field: None,
                message: "a dashboard id or a dashboard name is required".to_string(),
            }),
        }
    }
}

impl fmt::Display for DashboardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardRef::Id(id) => write!(f, "dashboard id '{id}'"),
            DashboardRef::Name(name) => write!(f, "dashboard '{name}'"),
        }
    }
}

/// widget returned by widget mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl Record for Widget {
    const NAME: &'static str = "Widget";
}

/// input for a line chart widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineChartWidgetInput {
    pub dashboard_id: String,
    pub title: String,
    /// `[x, y, width, height]` on the dashboard grid
    #[serde(default)]
    pub grid_position: Vec<i32>,
    #[serde(default = "model_data_metric")]
    pub time_series_metric_type: String,
    #[serde(default)]
    pub plots: Vec<LineChartPlot>,
}

fn model_data_metric() -> String {
    "modelDataMetric".to_string()
}

impl LineChartWidgetInput {
    /// a count-over-time widget for one model, placed by index on a two
    /// column grid
    pub fn model_volume(
        dashboard_id: impl Into<String>,
        model_id: impl Into<String>,
        model_name: &str,
        index: usize,
    ) -> Self {
        let column = (index % 2) as i32;
        let row = (index / 2) as i32;
        Self {
            dashboard_id: dashboard_id.into(),
            title: format!("{model_name} volume"),
            grid_position: vec![column * 6, row * 4, 6, 4],
            time_series_metric_type: model_data_metric(),
            plots: vec![LineChartPlot {
                model_id: model_id.into(),
                title: model_name.to_string(),
                position: 0,
                model_environment_name: Some(ModelEnvironment::Production),
                metric: "count".to_string(),
                ..LineChartPlot::default()
            }],
        }
    }
}

impl Record for LineChartWidgetInput {
    const NAME: &'static str = "LineChartWidgetInput";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "dashboardId", &self.dashboard_id)?;
        require_non_empty(Self::NAME, "title", &self.title)?;
        if !self.grid_position.is_empty() && self.grid_position.len() != 4 {
            return Err(Error::invalid_field(
                Self::NAME,
                "gridPosition",
                "grid position needs exactly four values",
            ));
        }
        for plot in &self.plots {
            require_non_empty(Self::NAME, "plots.modelId", &plot.model_id)?;
            require_non_empty(Self::NAME, "plots.metric", &plot.metric)?;
        }
        Ok(())
    }
}

impl SparseRecord for LineChartWidgetInput {}

/// one plotted series in a line chart widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineChartPlot {
    pub model_id: String,
    pub title: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub model_version_ids: Vec<String>,
    #[serde(default)]
    pub model_environment_name: Option<ModelEnvironment>,
    pub metric: String,
    #[serde(default)]
    pub filters: Vec<serde_json::Value>,
}
