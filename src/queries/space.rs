//! organization and space resolution

use crate::error::Result;
use crate::operation::{parse_connection, Connection, Operation, Page};
use crate::record::{require_non_empty, Record};
use serde::{Deserialize, Serialize};

/// look up an organization and one of its spaces by name
pub struct OrgAndSpaceIds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrgAndSpaceVariables {
    pub organization: String,
    pub space: String,
}

impl Record for OrgAndSpaceVariables {
    const NAME: &'static str = "OrgAndSpaceVariables";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "organization", &self.organization)?;
        require_non_empty(Self::NAME, "space", &self.space)
    }
}

/// space returned by a name search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpaceMatch {
    pub id: String,
    pub name: String,
}

/// organization returned by a name search, with the spaces matching the
/// space search; both searches may return near misses
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationMatch {
    pub id: String,
    pub name: String,
    pub spaces: Connection<SpaceMatch>,
}

impl OrganizationMatch {
    /// id of the space named exactly `name`
    pub fn space_id(self, name: &str) -> Option<String> {
        self.spaces
            .into_page()
            .items
            .into_iter()
            .find(|space| space.name == name)
            .map(|space| space.id)
    }
}

impl Operation for OrgAndSpaceIds {
    const NAME: &'static str = "orgIdAndSpaceIdQuery";
    const DOCUMENT: &'static str = r#"
query orgIdAndSpaceIdQuery($organization: String!, $space: String!) {
  account {
    organizations(search: $organization) {
      edges {
        node {
          id
          name
          spaces(search: $space) {
            edges { node { id name } }
          }
        }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error resolving organization and space";

    type Variables = OrgAndSpaceVariables;
    type Item = OrganizationMatch;

    fn parse(data: &serde_json::Value) -> Result<Page<Self::Item>> {
        parse_connection(Self::NAME, data, &["account", "organizations"])
    }
}
