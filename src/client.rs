//! main client
//!
//! holds the session (api key, organization and space ids) and executes raw
//! documents, typed responses and [`Operation`] descriptors. the domain
//! methods live in [`crate::api`].

use crate::api::exact_match;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::{check_document, GraphQlRequest, GraphQlResponse};
use crate::operation::{CursorVariables, Operation, Page};
use crate::pagination::{BoxFetch, BoxFutureResult, DynPaginator, Paginator};
use crate::queries::space::{OrgAndSpaceIds, OrgAndSpaceVariables};
use crate::transport::{HttpTransport, Transport};
use crate::types::SpaceIds;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// graphql client for arize
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    session: SpaceIds,
}

impl Client {
    /// create a client over http and resolve the organization and space
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::connect_with_transport(config, Arc::new(transport)).await
    }

    /// create a client over a caller-provided transport
    pub async fn connect_with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let mut client = Self {
            config: Arc::new(config),
            transport,
            session: SpaceIds {
                organization_id: String::new(),
                space_id: String::new(),
            },
        };

        client.session = match client.config.ids.clone() {
            Some((organization_id, space_id)) => SpaceIds {
                organization_id,
                space_id,
            },
            None => {
                let organization = client.config.organization.clone();
                let space = client.config.space.clone();
                client.resolve_space(&organization, &space).await?
            }
        };
        tracing::debug!(
            organization_id = %client.session.organization_id,
            space_id = %client.session.space_id,
            "client session ready"
        );
        Ok(client)
    }

    /// a new client for another space with the same credentials
    pub async fn switch_space(
        &self,
        organization: impl Into<String>,
        space: impl Into<String>,
    ) -> Result<Self> {
        let mut config = (*self.config).clone();
        config.organization = organization.into();
        config.space = space.into();
        config.ids = None;
        config.validate()?;

        let mut client = Self {
            config: Arc::new(config),
            transport: self.transport.clone(),
            session: self.session.clone(),
        };
        let organization = client.config.organization.clone();
        let space = client.config.space.clone();
        client.session = client.resolve_space(&organization, &space).await?;
        Ok(client)
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// resolved organization and space ids
    pub fn session(&self) -> &SpaceIds {
        &self.session
    }

    pub(crate) fn space_id(&self) -> &str {
        &self.session.space_id
    }

    /// space name (or id) for not-found messages
    pub(crate) fn space_label(&self) -> String {
        if self.config.space.is_empty() {
            format!("space {}", self.session.space_id)
        } else {
            format!("space '{}'", self.config.space)
        }
    }

    async fn resolve_space(&self, organization: &str, space: &str) -> Result<SpaceIds> {
        let variables = OrgAndSpaceVariables {
            organization: organization.to_string(),
            space: space.to_string(),
        };
        let organizations = self
            .execute_operation::<OrgAndSpaceIds>(&variables)
            .await?
            .items;
        let org = exact_match(organizations, organization, |org| org.name.as_str()).ok_or_else(
            || Error::NotFound {
                resource: "organization",
                name: organization.to_string(),
                domain: "account".to_string(),
            },
        )?;
        let organization_id = org.id.clone();
        let space_id = org.space_id(space).ok_or_else(|| Error::NotFound {
            resource: "space",
            name: space.to_string(),
            domain: format!("organization '{organization}'"),
        })?;
        Ok(SpaceIds {
            organization_id,
            space_id,
        })
    }

    /// execute a raw graphql document; the document is syntax-checked first
    pub async fn execute_raw(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<GraphQlResponse<serde_json::Value>> {
        self.execute(query, variables).await
    }

    /// execute a raw graphql document and deserialize into a typed response
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<GraphQlResponse<T>> {
        let operation_name = check_document(query)?;
        let mut request = GraphQlRequest::new(query)
            .with_variables(variables.unwrap_or_else(|| serde_json::json!({})));
        request.operation_name = operation_name;
        self.send(&request, "graphql request").await
    }

    /// execute one operation and parse its page of results
    pub async fn execute_operation<O: Operation>(
        &self,
        variables: &O::Variables,
    ) -> Result<Page<O::Item>> {
        let request = O::request(variables)?;
        tracing::debug!(operation = O::NAME, "executing operation");
        let response: GraphQlResponse<serde_json::Value> =
            self.send(&request, O::ERROR_CONTEXT).await?;
        let data = response
            .data
            .ok_or_else(|| Error::shape(O::NAME, "response has no data"))?;
        O::parse(&data)
    }

    /// page through an operation, replaying each cursor into the variables
    pub fn paginate<'a, O>(
        &'a self,
        variables: O::Variables,
        limit: Option<usize>,
    ) -> DynPaginator<'a, O::Item>
    where
        O: Operation + 'static,
        O::Variables: CursorVariables + Clone,
    {
        let fetch: BoxFetch<'a, O::Item> = Box::new(
            move |cursor: Option<String>| -> BoxFutureResult<'a, Page<O::Item>> {
                let mut variables = variables.clone();
                variables.set_cursor(cursor);
                Box::pin(async move { self.execute_operation::<O>(&variables).await })
            },
        );
        Paginator::new(fetch).with_limit(limit)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: &GraphQlRequest,
        context: &str,
    ) -> Result<GraphQlResponse<T>> {
        let url = self.config.graphql_url()?;
        let body = serde_json::to_value(request)?;
        let (status, text) = self.transport.post(&url, &body).await?;
        parse_graphql_response(status, text, context)
    }
}

fn parse_graphql_response<T: DeserializeOwned>(
    status: StatusCode,
    text: String,
    context: &str,
) -> Result<GraphQlResponse<T>> {
    let parsed: GraphQlResponse<T> = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(Error::Api {
                operation: context.to_string(),
                status: Some(status.as_u16()),
                message: format!("graphql http error: {}", status),
                errors: Vec::new(),
            })
        }
        Err(err) => return Err(Error::shape(context, err.to_string())),
    };

    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| "graphql error".to_string());
        return Err(Error::Api {
            operation: context.to_string(),
            status: Some(status.as_u16()),
            message,
            errors: parsed.errors,
        });
    }

    if !status.is_success() {
        return Err(Error::Api {
            operation: context.to_string(),
            status: Some(status.as_u16()),
            message: format!("graphql http error: {}", status),
            errors: Vec::new(),
        });
    }

    Ok(parsed)
}
