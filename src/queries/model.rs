//! model queries and mutations

use crate::error::Result;
use crate::operation::{parse_acknowledged, parse_connection, parse_node, Operation, Page};
use crate::queries::{DeleteInput, NodeId, NodePage, NodeSearch};
use crate::record::InputVariables;
use crate::types::Model;
use serde_json::Value;

/// every model in a space, paginated
pub struct GetAllModels;

impl Operation for GetAllModels {
    const NAME: &'static str = "getAllModels";
    const DOCUMENT: &'static str = r#"
query getAllModels($id: ID!, $first: Int, $endCursor: String) {
  node(id: $id) {
    ... on Space {
      models(first: $first, after: $endCursor) {
        pageInfo { hasNextPage endCursor }
        edges { node { id name modelType createdAt isDemoModel } }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting models";

    type Variables = NodePage;
    type Item = Model;

    fn parse(data: &Value) -> Result<Page<Model>> {
        parse_connection(Self::NAME, data, &["node", "models"])
    }
}

/// a model by exact name within a space
pub struct GetModelByName;

impl Operation for GetModelByName {
    const NAME: &'static str = "getModelByName";
    const DOCUMENT: &'static str = r#"
query getModelByName($id: ID!, $search: String!) {
  node(id: $id) {
    ... on Space {
      models(search: $search, useExactSearchMatch: true, first: 1) {
        edges { node { id name modelType createdAt isDemoModel } }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting model by name";

    type Variables = NodeSearch;
    type Item = Model;

    fn parse(data: &Value) -> Result<Page<Model>> {
        parse_connection(Self::NAME, data, &["node", "models"])
    }
}

pub struct GetModelById;

impl Operation for GetModelById {
    const NAME: &'static str = "getModelById";
    const DOCUMENT: &'static str = r#"
query getModelById($id: ID!) {
  node(id: $id) {
    ... on Model { id name modelType createdAt isDemoModel }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting model by id";

    type Variables = NodeId;
    type Item = Model;

    fn parse(data: &Value) -> Result<Page<Model>> {
        parse_node(Self::NAME, data, &["node"])
    }
}

pub struct DeleteModel;

impl Operation for DeleteModel {
    const NAME: &'static str = "deleteModel";
    const DOCUMENT: &'static str = r#"
mutation deleteModel($input: DeleteModelMutationInput!) {
  deleteModel(input: $input) { clientMutationId }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error deleting model";

    type Variables = InputVariables<DeleteInput>;
    type Item = bool;

    fn parse(data: &Value) -> Result<Page<bool>> {
        parse_acknowledged(Self::NAME, data, &["deleteModel"])
    }
}
