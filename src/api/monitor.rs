use crate::api::exact_match;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::operation::Operation;
use crate::queries::monitor::{
    CreateDataQualityMonitor, CreateDriftMonitor, CreatePerformanceMonitor, DeleteMonitor,
    GetAllModelMonitors, GetModelMonitorByName, GetMonitorById, UpdateMonitorThreshold,
};
use crate::queries::{DeleteInput, IdNode, NodeId, NodePage, NodeSearch};
use crate::record::InputVariables;
use crate::types::{
    DataQualityMonitorInput, DriftMonitorInput, ModelRef, Monitor, PerformanceMonitorInput,
    ThresholdUpdate,
};

impl Client {
    /// every monitor attached to a model
    pub async fn get_all_monitors(&self, model: &ModelRef) -> Result<Vec<Monitor>> {
        self.list_monitors(model, None).await
    }

    /// monitors of a model, stopping once `limit` are fetched
    pub async fn list_monitors(
        &self,
        model: &ModelRef,
        limit: Option<usize>,
    ) -> Result<Vec<Monitor>> {
        let model_id = self.get_model_id(model).await?;
        self.paginate::<GetAllModelMonitors>(NodePage::new(model_id), limit)
            .collect_all()
            .await
    }

    /// one monitor of a model by exact name
    pub async fn get_monitor(&self, model: &ModelRef, name: &str) -> Result<Monitor> {
        let model_id = self.get_model_id(model).await?;
        let page = self
            .execute_operation::<GetModelMonitorByName>(&NodeSearch::new(model_id, name))
            .await?;
        exact_match(page.items, name, |monitor| &monitor.name).ok_or_else(|| Error::NotFound {
            resource: "monitor",
            name: name.to_string(),
            domain: model.to_string(),
        })
    }

    pub async fn get_monitor_by_id(&self, monitor_id: &str) -> Result<Monitor> {
        self.execute_operation::<GetMonitorById>(&NodeId::new(monitor_id))
            .await?
            .into_first()
            .ok_or_else(|| Error::NotFound {
                resource: "monitor",
                name: monitor_id.to_string(),
                domain: self.space_label(),
            })
    }

    /// create a performance monitor and return its id
    pub async fn create_performance_monitor(
        &self,
        mut input: PerformanceMonitorInput,
    ) -> Result<String> {
        self.fill_space(&mut input.space_id);
        self.run_monitor_mutation::<CreatePerformanceMonitor>(&InputVariables::new(input))
            .await
    }

    /// create a drift monitor on one feature and return its id
    pub async fn create_drift_monitor(&self, mut input: DriftMonitorInput) -> Result<String> {
        self.fill_space(&mut input.space_id);
        self.run_monitor_mutation::<CreateDriftMonitor>(&InputVariables::new(input))
            .await
    }

    /// create a data quality monitor and return its id
    pub async fn create_data_quality_monitor(
        &self,
        mut input: DataQualityMonitorInput,
    ) -> Result<String> {
        self.fill_space(&mut input.space_id);
        self.run_monitor_mutation::<CreateDataQualityMonitor>(&InputVariables::new(input))
            .await
    }

    /// change the threshold or operator of an existing monitor
    pub async fn update_monitor_threshold(&self, update: ThresholdUpdate) -> Result<String> {
        self.run_monitor_mutation::<UpdateMonitorThreshold>(&InputVariables::new(update))
            .await
    }

    pub async fn delete_monitor(&self, model: &ModelRef, name: &str) -> Result<bool> {
        let monitor = self.get_monitor(model, name).await?;
        self.delete_monitor_by_id(&monitor.id).await
    }

    pub async fn delete_monitor_by_id(&self, monitor_id: &str) -> Result<bool> {
        let input = DeleteInput {
            id: monitor_id.to_string(),
        };
        let acknowledged = self
            .execute_operation::<DeleteMonitor>(&InputVariables::new(input))
            .await?
            .into_first()
            .unwrap_or(false);
        tracing::info!(monitor_id, "deleted monitor");
        Ok(acknowledged)
    }

    fn fill_space(&self, space_id: &mut String) {
        if space_id.is_empty() {
            *space_id = self.space_id().to_string();
        }
    }

    async fn run_monitor_mutation<O>(&self, variables: &O::Variables) -> Result<String>
    where
        O: Operation<Item = IdNode>,
    {
        let monitor = self
            .execute_operation::<O>(variables)
            .await?
            .into_first()
            .ok_or_else(|| Error::shape(O::NAME, "no monitor returned"))?;
        tracing::info!(operation = O::NAME, monitor_id = %monitor.id, "monitor saved");
        Ok(monitor.id)
    }
}
