//! monitor queries and mutations

use crate::error::Result;
use crate::operation::{parse_acknowledged, parse_connection, parse_node, Operation, Page};
use crate::queries::{DeleteInput, IdNode, NodeId, NodePage, NodeSearch};
use crate::record::InputVariables;
use crate::types::{
    DataQualityMonitorInput, DriftMonitorInput, Monitor, PerformanceMonitorInput, ThresholdUpdate,
};
use serde_json::Value;

/// every monitor on a model, paginated
pub struct GetAllModelMonitors;

impl Operation for GetAllModelMonitors {
    const NAME: &'static str = "getAllModelMonitors";
    const DOCUMENT: &'static str = r#"
query getAllModelMonitors($id: ID!, $first: Int, $endCursor: String) {
  node(id: $id) {
    ... on Model {
      monitors(first: $first, after: $endCursor) {
        pageInfo { hasNextPage endCursor }
        edges {
          node {
            id name monitorCategory status isTriggered threshold operator
            dynamicAutoThresholdEnabled evaluationWindowLengthSeconds notes createdDate
          }
        }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting model monitors";

    type Variables = NodePage;
    type Item = Monitor;

    fn parse(data: &Value) -> Result<Page<Monitor>> {
        parse_connection(Self::NAME, data, &["node", "monitors"])
    }
}

pub struct GetModelMonitorByName;

impl Operation for GetModelMonitorByName {
    const NAME: &'static str = "getModelMonitorByName";
    const DOCUMENT: &'static str = r#"
query getModelMonitorByName($id: ID!, $search: String!) {
  node(id: $id) {
    ... on Model {
      monitors(search: $search, useExactSearchMatch: true) {
        edges {
          node {
            id name monitorCategory status isTriggered threshold operator
            dynamicAutoThresholdEnabled evaluationWindowLengthSeconds notes createdDate
          }
        }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting monitor by name";

    type Variables = NodeSearch;
    type Item = Monitor;

    fn parse(data: &Value) -> Result<Page<Monitor>> {
        parse_connection(Self::NAME, data, &["node", "monitors"])
    }
}

pub struct GetMonitorById;

impl Operation for GetMonitorById {
    const NAME: &'static str = "getMonitorById";
    const DOCUMENT: &'static str = r#"
query getMonitorById($id: ID!) {
  node(id: $id) {
    ... on Monitor {
      id name monitorCategory status isTriggered threshold operator
      dynamicAutoThresholdEnabled evaluationWindowLengthSeconds notes createdDate
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting monitor by id";

    type Variables = NodeId;
    type Item = Monitor;

    fn parse(data: &Value) -> Result<Page<Monitor>> {
        parse_node(Self::NAME, data, &["node"])
    }
}

pub struct CreatePerformanceMonitor;

impl Operation for CreatePerformanceMonitor {
    const NAME: &'static str = "createPerformanceMonitor";
    const DOCUMENT: &'static str = r#"
mutation createPerformanceMonitor($input: CreatePerformanceMonitorMutationInput!) {
  createPerformanceMonitor(input: $input) { monitor { id } }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error creating performance monitor";

    type Variables = InputVariables<PerformanceMonitorInput>;
    type Item = IdNode;

    fn parse(data: &Value) -> Result<Page<IdNode>> {
        parse_node(Self::NAME, data, &["createPerformanceMonitor", "monitor"])
    }
}

pub struct CreateDriftMonitor;

impl Operation for CreateDriftMonitor {
    const NAME: &'static str = "createDriftMonitor";
    const DOCUMENT: &'static str = r#"
mutation createDriftMonitor($input: CreateDriftMonitorMutationInput!) {
  createDriftMonitor(input: $input) { monitor { id } }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error creating drift monitor";

    type Variables = InputVariables<DriftMonitorInput>;
    type Item = IdNode;

    fn parse(data: &Value) -> Result<Page<IdNode>> {
        parse_node(Self::NAME, data, &["createDriftMonitor", "monitor"])
    }
}

pub struct CreateDataQualityMonitor;

impl Operation for CreateDataQualityMonitor {
    const NAME: &'static str = "createDataQualityMonitor";
    const DOCUMENT: &'static str = r#"
mutation createDataQualityMonitor($input: CreateDataQualityMonitorMutationInput!) {
  createDataQualityMonitor(input: $input) { monitor { id } }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error creating data quality monitor";

    type Variables = InputVariables<DataQualityMonitorInput>;
    type Item = IdNode;

    fn parse(data: &Value) -> Result<Page<IdNode>> {
        parse_node(Self::NAME, data, &["createDataQualityMonitor", "monitor"])
    }
}

pub struct UpdateMonitorThreshold;

impl Operation for UpdateMonitorThreshold {
    const NAME: &'static str = "updateMonitorThreshold";
    const DOCUMENT: &'static str = r#"
mutation updateMonitorThreshold($input: UpdateMonitorThresholdMutationInput!) {
  updateMonitorThreshold(input: $input) { monitor { id } }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error updating monitor threshold";

    type Variables = InputVariables<ThresholdUpdate>;
    type Item = IdNode;

    fn parse(data: &Value) -> Result<Page<IdNode>> {
        parse_node(Self::NAME, data, &["updateMonitorThreshold", "monitor"])
    }
}

pub struct DeleteMonitor;

impl Operation for DeleteMonitor {
    const NAME: &'static str = "deleteMonitor";
    const DOCUMENT: &'static str = r#"
mutation deleteMonitor($input: DeleteMonitorMutationInput!) {
  deleteMonitor(input: $input) { clientMutationId }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error deleting monitor";

    type Variables = InputVariables<DeleteInput>;
    type Item = bool;

    fn parse(data: &Value) -> Result<Page<bool>> {
        parse_acknowledged(Self::NAME, data, &["deleteMonitor"])
    }
}
