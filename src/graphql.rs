//! graphql wire types
//!
//! the request envelope sent to `/graphql` and the `{data, errors}` response.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// request envelope posted to the graphql endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    /// query or mutation document
    pub query: String,
    /// variables map (always an object)
    pub variables: serde_json::Value,
    /// operation name, when the document declares one
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQlRequest {
    /// build a request with an empty variables object
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: serde_json::json!({}),
            operation_name: None,
        }
    }

    /// replace the variables map
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = variables;
        self
    }

    /// set the operation name
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// graphql response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    /// response data or null if errors
    pub data: Option<T>,
    /// graphql errors array
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// true if the response contains graphql errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// graphql error entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    /// error message
    pub message: String,
    /// error locations in the query
    #[serde(default)]
    pub locations: Vec<GraphQlLocation>,
    /// response path
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
    /// optional extensions payload
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

/// graphql error location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// line number (1-based)
    pub line: i64,
    /// column number (1-based)
    pub column: i64,
}

/// syntax-check a query or mutation document and return the name of its
/// first named operation
pub fn check_document(document: &str) -> Result<Option<String>> {
    use graphql_parser::query::{Definition, OperationDefinition};

    let parsed = graphql_parser::parse_query::<&str>(document).map_err(|err| Error::Validation {
        record: "graphql document".to_string(),
        field: None,
        message: err.to_string(),
    })?;

    let name = parsed.definitions.iter().find_map(|def| match def {
        Definition::Operation(OperationDefinition::Query(q)) => q.name,
        Definition::Operation(OperationDefinition::Mutation(m)) => m.name,
        Definition::Operation(OperationDefinition::Subscription(s)) => s.name,
        _ => None,
    });
    Ok(name.map(str::to_string))
}
