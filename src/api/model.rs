use crate::api::exact_match;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::queries::model::{DeleteModel, GetAllModels, GetModelById, GetModelByName};
use crate::queries::{DeleteInput, NodeId, NodePage, NodeSearch};
use crate::record::InputVariables;
use crate::types::{Model, ModelRef};

impl Client {
    /// every model in the session space
    pub async fn get_all_models(&self) -> Result<Vec<Model>> {
        self.list_models(None).await
    }

    /// models in the session space, stopping once `limit` are fetched
    pub async fn list_models(&self, limit: Option<usize>) -> Result<Vec<Model>> {
        self.paginate::<GetAllModels>(NodePage::new(self.space_id()), limit)
            .collect_all()
            .await
    }

    /// one model by id or exact name
    pub async fn get_model(&self, model: &ModelRef) -> Result<Model> {
        match model {
            ModelRef::Id(id) => self
                .execute_operation::<GetModelById>(&NodeId::new(id.as_str()))
                .await?
                .into_first()
                .ok_or_else(|| self.model_not_found(id)),
            ModelRef::Name(name) => self.find_model(name).await,
        }
    }

    /// id of a model; ids are returned as given without a request
    pub async fn get_model_id(&self, model: &ModelRef) -> Result<String> {
        match model {
            ModelRef::Id(id) => Ok(id.clone()),
            ModelRef::Name(name) => Ok(self.find_model(name).await?.id),
        }
    }

    pub async fn delete_model(&self, model: &ModelRef) -> Result<bool> {
        let id = self.get_model_id(model).await?;
        let acknowledged = self
            .execute_operation::<DeleteModel>(&InputVariables::new(DeleteInput { id }))
            .await?
            .into_first()
            .unwrap_or(false);
        tracing::info!(model = %model, "deleted model");
        Ok(acknowledged)
    }

    async fn find_model(&self, name: &str) -> Result<Model> {
        let page = self
            .execute_operation::<GetModelByName>(&NodeSearch::new(self.space_id(), name))
            .await?;
        exact_match(page.items, name, |model| &model.name).ok_or_else(|| self.model_not_found(name))
    }

    pub(crate) fn model_not_found(&self, name: &str) -> Error {
        Error::NotFound {
            resource: "model",
            name: name.to_string(),
            domain: self.space_label(),
        }
    }
}
