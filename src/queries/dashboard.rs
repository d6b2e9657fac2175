//! dashboard queries and mutations

use crate::error::Result;
use crate::operation::{parse_acknowledged, parse_connection, parse_node, Operation, Page};
use crate::queries::{DeleteInput, NodeId, NodePage, NodeSearch};
use crate::record::{require_non_empty, InputVariables, Record, SparseRecord};
use crate::types::{Dashboard, LineChartWidgetInput, Widget};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub struct GetAllDashboards;

impl Operation for GetAllDashboards {
    const NAME: &'static str = "getAllDashboards";
    const DOCUMENT: &'static str = r#"
query getAllDashboards($id: ID!, $first: Int, $endCursor: String) {
  node(id: $id) {
    ... on Space {
      dashboards(first: $first, after: $endCursor) {
        pageInfo { hasNextPage endCursor }
        edges { node { id name status createdAt creator { id name } } }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting dashboards";

    type Variables = NodePage;
    type Item = Dashboard;

    fn parse(data: &Value) -> Result<Page<Dashboard>> {
        parse_connection(Self::NAME, data, &["node", "dashboards"])
    }
}

pub struct GetDashboardByName;

impl Operation for GetDashboardByName {
    const NAME: &'static str = "getDashboardByName";
    const DOCUMENT: &'static str = r#"
query getDashboardByName($id: ID!, $search: String!) {
  node(id: $id) {
    ... on Space {
      dashboards(search: $search, useExactSearchMatch: true) {
        edges { node { id name status createdAt creator { id name } } }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting dashboard by name";

    type Variables = NodeSearch;
    type Item = Dashboard;

    fn parse(data: &Value) -> Result<Page<Dashboard>> {
        parse_connection(Self::NAME, data, &["node", "dashboards"])
    }
}

pub struct GetDashboardById;

impl Operation for GetDashboardById {
    const NAME: &'static str = "getDashboardById";
    const DOCUMENT: &'static str = r#"
query getDashboardById($id: ID!) {
  node(id: $id) {
    ... on Dashboard { id name status createdAt creator { id name } }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting dashboard by id";

    type Variables = NodeId;
    type Item = Dashboard;

    fn parse(data: &Value) -> Result<Page<Dashboard>> {
        parse_node(Self::NAME, data, &["node"])
    }
}

/// input for an empty dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDashboardInput {
    pub space_id: String,
    pub name: String,
}

impl Record for CreateDashboardInput {
    const NAME: &'static str = "CreateDashboardInput";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "spaceId", &self.space_id)?;
        require_non_empty(Self::NAME, "name", &self.name)
    }
}

impl SparseRecord for CreateDashboardInput {}

pub struct CreateDashboard;

impl Operation for CreateDashboard {
    const NAME: &'static str = "createDashboard";
    const DOCUMENT: &'static str = r#"
mutation createDashboard($input: CreateDashboardMutationInput!) {
  createDashboard(input: $input) {
    dashboard { id name status createdAt }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error creating dashboard";

    type Variables = InputVariables<CreateDashboardInput>;
    type Item = Dashboard;

    fn parse(data: &Value) -> Result<Page<Dashboard>> {
        parse_node(Self::NAME, data, &["createDashboard", "dashboard"])
    }
}

pub struct CreateLineChartWidget;

impl Operation for CreateLineChartWidget {
    const NAME: &'static str = "createLineChartWidget";
    const DOCUMENT: &'static str = r#"
mutation createLineChartWidget($input: CreateLineChartWidgetMutationInput!) {
  createLineChartWidget(input: $input) {
    lineChartWidget { id title }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error creating line chart widget";

    type Variables = InputVariables<LineChartWidgetInput>;
    type Item = Widget;

    fn parse(data: &Value) -> Result<Page<Widget>> {
        parse_node(Self::NAME, data, &["createLineChartWidget", "lineChartWidget"])
    }
}

pub struct DeleteDashboard;

impl Operation for DeleteDashboard {
    const NAME: &'static str = "deleteDashboard";
    const DOCUMENT: &'static str = r#"
mutation deleteDashboard($input: DeleteDashboardMutationInput!) {
  deleteDashboard(input: $input) { clientMutationId }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error deleting dashboard";

    type Variables = InputVariables<DeleteInput>;
    type Item = bool;

    fn parse(data: &Value) -> Result<Page<bool>> {
        parse_acknowledged(Self::NAME, data, &["deleteDashboard"])
    }
}
