use crate::enums::{
    ComparisonOperator, DataQualityMetric, DriftMetric, ModelEnvironment, MonitorCategory,
    MonitorStatus, PerformanceMetric,
};
use crate::error::{Error, Result};
use crate::record::{require_non_empty, Record, SparseRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// monitor attached to a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub monitor_category: Option<MonitorCategory>,
    #[serde(default)]
    pub status: Option<MonitorStatus>,
    #[serde(default)]
    pub is_triggered: Option<bool>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub dynamic_auto_threshold_enabled: Option<bool>,
    #[serde(default)]
    pub evaluation_window_length_seconds: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

impl Record for Monitor {
    const NAME: &'static str = "Monitor";
}

/// checks shared by every monitor input
fn validate_monitor(
    record: &str,
    name: &str,
    model_name: &str,
    operator: Option<ComparisonOperator>,
    threshold: Option<f64>,
    dynamic_auto_threshold: Option<bool>,
) -> Result<()> {
    require_non_empty(record, "name", name)?;
    require_non_empty(record, "modelName", model_name)?;
    if operator.is_none() {
        return Err(Error::missing_field(record, "operator"));
    }
    match (threshold, dynamic_auto_threshold.unwrap_or(false)) {
        (Some(_), true) => Err(Error::invalid_field(
            record,
            "threshold",
            "a fixed threshold cannot be combined with a dynamic auto threshold",
        )),
        (None, false) => Err(Error::invalid_field(
            record,
            "threshold",
            "set a threshold or enable the dynamic auto threshold",
        )),
        _ => Ok(()),
    }
}

/// input for a performance monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PerformanceMonitorInput {
    /// filled from the session when empty
    #[serde(default)]
    pub space_id: String,
    pub model_name: String,
    pub name: String,
    #[serde(default)]
    pub performance_metric: Option<PerformanceMetric>,
    #[serde(default)]
    pub operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub dynamic_auto_threshold: Option<bool>,
    #[serde(default)]
    pub std_dev_multiplier: Option<f64>,
    #[serde(default)]
    pub evaluation_window_length_seconds: Option<i64>,
    #[serde(default)]
    pub delay_seconds: Option<i64>,
    #[serde(default)]
    pub model_environment_name: Option<ModelEnvironment>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl Record for PerformanceMonitorInput {
    const NAME: &'static str = "PerformanceMonitorInput";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "spaceId", &self.space_id)?;
        validate_monitor(
            Self::NAME,
            &self.name,
            &self.model_name,
            self.operator,
            self.threshold,
            self.dynamic_auto_threshold,
        )?;
        if self.performance_metric.is_none() {
            return Err(Error::missing_field(Self::NAME, "performanceMetric"));
        }
        Ok(())
    }
}

impl SparseRecord for PerformanceMonitorInput {}

/// input for a drift monitor on one feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DriftMonitorInput {
    #[serde(default)]
    pub space_id: String,
    pub model_name: String,
    pub name: String,
    #[serde(default)]
    pub drift_metric: Option<DriftMetric>,
    pub dimension_name: String,
    #[serde(default)]
    pub operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub dynamic_auto_threshold: Option<bool>,
    #[serde(default)]
    pub evaluation_window_length_seconds: Option<i64>,
    #[serde(default)]
    pub delay_seconds: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl Record for DriftMonitorInput {
    const NAME: &'static str = "DriftMonitorInput";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "spaceId", &self.space_id)?;
        validate_monitor(
            Self::NAME,
            &self.name,
            &self.model_name,
            self.operator,
            self.threshold,
            self.dynamic_auto_threshold,
        )?;
        require_non_empty(Self::NAME, "dimensionName", &self.dimension_name)?;
        if self.drift_metric.is_none() {
            return Err(Error::missing_field(Self::NAME, "driftMetric"));
        }
        Ok(())
    }
}

impl SparseRecord for DriftMonitorInput {}

/// input for a data quality monitor on one feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataQualityMonitorInput {
    #[serde(default)]
    pub space_id: String,
    pub model_name: String,
    pub name: String,
    #[serde(default)]
    pub data_quality_metric: Option<DataQualityMetric>,
    pub dimension_name: String,
    #[serde(default)]
    pub operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub dynamic_auto_threshold: Option<bool>,
    #[serde(default)]
    pub evaluation_window_length_seconds: Option<i64>,
    #[serde(default)]
    pub model_environment_name: Option<ModelEnvironment>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl Record for DataQualityMonitorInput {
    const NAME: &'static str = "DataQualityMonitorInput";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "spaceId", &self.space_id)?;
        validate_monitor(
            Self::NAME,
            &self.name,
            &self.model_name,
            self.operator,
            self.threshold,
            self.dynamic_auto_threshold,
        )?;
        require_non_empty(Self::NAME, "dimensionName", &self.dimension_name)?;
        if self.data_quality_metric.is_none() {
            return Err(Error::missing_field(Self::NAME, "dataQualityMetric"));
        }
        Ok(())
    }
}

impl SparseRecord for DataQualityMonitorInput {}

/// new threshold settings for an existing monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThresholdUpdate {
    pub monitor_id: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub dynamic_auto_threshold: Option<bool>,
}

impl Record for ThresholdUpdate {
    const NAME: &'static str = "ThresholdUpdate";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "monitorId", &self.monitor_id)?;
        if self.threshold.is_none() && self.dynamic_auto_threshold.is_none() {
            return Err(Error::invalid_field(
                Self::NAME,
                "threshold",
                "nothing to update: set a threshold or toggle the dynamic auto threshold",
            ));
        }
        if self.threshold.is_some() && self.dynamic_auto_threshold == Some(true) {
            return Err(Error::invalid_field(
                Self::NAME,
                "threshold",
                "a fixed threshold cannot be combined with a dynamic auto threshold",
            ));
        }
        Ok(())
    }
}

impl SparseRecord for ThresholdUpdate {}

#[cfg(test)]
mod tests {
    use super::*;

    fn performance() -> PerformanceMonitorInput {
        PerformanceMonitorInput {
            space_id: "s1".to_string(),
            model_name: "fraud".to_string(),
            name: "accuracy drop".to_string(),
            performance_metric: Some(PerformanceMetric::Accuracy),
            operator: Some(ComparisonOperator::LessThan),
            threshold: Some(0.9),
            ..Default::default()
        }
    }

    #[test]
    fn test_performance_monitor_validation() {
        assert!(performance().validate().is_ok());

        let mut input = performance();
        input.performance_metric = None;
        assert!(matches!(
            input.validate(),
            Err(Error::Validation { field: Some(ref f), .. }) if f == "performanceMetric"
        ));

        let mut input = performance();
        input.dynamic_auto_threshold = Some(true);
        assert!(input.validate().is_err());

        let mut input = performance();
        input.threshold = None;
        assert!(input.validate().is_err());
        input.dynamic_auto_threshold = Some(true);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_monitor_input_is_sparse_on_the_wire() {
        let sparse = performance().to_sparse_map().unwrap();
        let mut keys: Vec<&str> = sparse.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "modelName",
                "name",
                "operator",
                "performanceMetric",
                "spaceId",
                "threshold"
            ]
        );
        assert_eq!(sparse["operator"], "lessThan");
    }

    #[test]
    fn test_monitor_input_rejects_unknown_fields() {
        let json = serde_json::json!({
            "modelName": "fraud",
            "name": "psi",
            "dimensionName": "age",
            "driftMetrik": "psi"
        });
        let map = match json {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let err = DriftMonitorInput::from_map(map).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation { field: Some(ref f), .. } if f == "driftMetrik"
        ));
    }

    #[test]
    fn test_monitor_from_map_resolves_aliases() {
        let json = serde_json::json!({
            "id": "mon1",
            "name": "null rate",
            "monitorCategory": "data_quality",
            "operator": ">",
            "threshold": 0.2
        });
        let map = match json {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let monitor = Monitor::from_map(map).unwrap();
        assert_eq!(monitor.monitor_category, Some(MonitorCategory::DataQuality));
        assert_eq!(monitor.operator, Some(ComparisonOperator::GreaterThan));
        let wire = monitor.to_map().unwrap();
        assert_eq!(wire["monitorCategory"], "dataQuality");
    }

    #[test]
    fn test_threshold_update_validation() {
        let update = ThresholdUpdate {
            monitor_id: "mon1".to_string(),
            threshold: Some(0.5),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        let empty = ThresholdUpdate {
            monitor_id: "mon1".to_string(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }
}
