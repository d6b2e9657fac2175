use crate::api::exact_match;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::operation::Operation;
use crate::queries::dashboard::{
    CreateDashboard, CreateDashboardInput, CreateLineChartWidget, DeleteDashboard,
    GetAllDashboards, GetDashboardById, GetDashboardByName,
};
use crate::queries::{DeleteInput, NodeId, NodePage, NodeSearch};
use crate::record::InputVariables;
use crate::types::{Dashboard, DashboardRef, LineChartWidgetInput, Model};

impl Client {
    /// every dashboard in the session space
    pub async fn get_all_dashboards(&self) -> Result<Vec<Dashboard>> {
        self.list_dashboards(None).await
    }

    pub async fn list_dashboards(&self, limit: Option<usize>) -> Result<Vec<Dashboard>> {
        self.paginate::<GetAllDashboards>(NodePage::new(self.space_id()), limit)
            .collect_all()
            .await
    }

    pub async fn get_dashboard(&self, dashboard: &DashboardRef) -> Result<Dashboard> {
        match dashboard {
            DashboardRef::Id(id) => self
                .execute_operation::<GetDashboardById>(&NodeId::new(id.as_str()))
                .await?
                .into_first()
                .ok_or_else(|| self.dashboard_not_found(id)),
            DashboardRef::Name(name) => {
                let page = self
                    .execute_operation::<GetDashboardByName>(&NodeSearch::new(
                        self.space_id(),
                        name.as_str(),
                    ))
                    .await?;
                exact_match(page.items, name, |dashboard| &dashboard.name)
                    .ok_or_else(|| self.dashboard_not_found(name))
            }
        }
    }

    pub async fn get_dashboard_id(&self, dashboard: &DashboardRef) -> Result<String> {
        match dashboard {
            DashboardRef::Id(id) => Ok(id.clone()),
            DashboardRef::Name(_) => Ok(self.get_dashboard(dashboard).await?.id),
        }
    }

    /// create an empty dashboard and return its id
    pub async fn create_dashboard(&self, name: &str) -> Result<String> {
        let input = CreateDashboardInput {
            space_id: self.space_id().to_string(),
            name: name.to_string(),
        };
        let dashboard = self
            .execute_operation::<CreateDashboard>(&InputVariables::new(input))
            .await?
            .into_first()
            .ok_or_else(|| Error::shape(CreateDashboard::NAME, "no dashboard returned"))?;
        tracing::info!(dashboard_id = %dashboard.id, name, "created dashboard");
        Ok(dashboard.id)
    }

    pub async fn delete_dashboard(&self, dashboard: &DashboardRef) -> Result<bool> {
        let id = self.get_dashboard_id(dashboard).await?;
        let acknowledged = self
            .execute_operation::<DeleteDashboard>(&InputVariables::new(DeleteInput {
                id: id.clone(),
            }))
            .await?
            .into_first()
            .unwrap_or(false);
        tracing::info!(dashboard = %dashboard, dashboard_id = %id, "deleted dashboard");
        Ok(acknowledged)
    }

    /// web url of a dashboard in the session space
    pub fn dashboard_url(&self, dashboard_id: &str) -> String {
        let session = self.session();
        self.config()
            .dashboard_url(&session.organization_id, &session.space_id, dashboard_id)
    }

    /// create a dashboard with one volume widget per model and return its url
    ///
    /// `models` narrows the dashboard to the named models; every name must
    /// exist. a widget rejected by the api is logged and skipped, other
    /// failures abort.
    pub async fn create_model_volume_dashboard(
        &self,
        name: &str,
        models: Option<&[String]>,
    ) -> Result<String> {
        let all = self.get_all_models().await?;
        let selected: Vec<Model> = match models {
            None => all,
            Some(names) => {
                let mut selected = Vec::with_capacity(names.len());
                for wanted in names {
                    let model = all
                        .iter()
                        .find(|model| &model.name == wanted)
                        .ok_or_else(|| self.model_not_found(wanted))?;
                    selected.push(model.clone());
                }
                selected
            }
        };

        let dashboard_id = self.create_dashboard(name).await?;
        let mut placed = 0;
        for model in &selected {
            let widget =
                LineChartWidgetInput::model_volume(&dashboard_id, &model.id, &model.name, placed);
            match self
                .execute_operation::<CreateLineChartWidget>(&InputVariables::new(widget))
                .await
            {
                Ok(_) => placed += 1,
                Err(err) if err.is_api_error() => {
                    tracing::warn!(model = %model.name, error = %err, "skipping volume widget");
                }
                Err(err) => return Err(err),
            }
        }
        tracing::info!(
            dashboard_id = %dashboard_id,
            widgets = placed,
            models = selected.len(),
            "volume dashboard ready"
        );
        Ok(self.dashboard_url(&dashboard_id))
    }

    fn dashboard_not_found(&self, name: &str) -> Error {
        Error::NotFound {
            resource: "dashboard",
            name: name.to_string(),
            domain: self.space_label(),
        }
    }
}
