//! query and mutation descriptors
//!
//! one unit type per operation, grouped by api domain, plus the variable
//! records several operations share.

pub mod dashboard;
pub mod model;
pub mod monitor;
pub mod space;
pub mod trace;

use crate::error::{Error, Result};
use crate::operation::CursorVariables;
use crate::record::{require_non_empty, Record, SparseRecord};
use serde::{Deserialize, Serialize};

/// default page size for list operations
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// `{ id, first, endCursor }` for lists hanging off a space or model node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodePage {
    pub id: String,
    #[serde(default)]
    pub first: Option<i64>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl NodePage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first: Some(DEFAULT_PAGE_SIZE),
            end_cursor: None,
        }
    }
}

impl Record for NodePage {
    const NAME: &'static str = "NodePage";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "id", &self.id)?;
        validate_page_size(Self::NAME, self.first)
    }
}

impl CursorVariables for NodePage {
    fn set_cursor(&mut self, cursor: Option<String>) {
        self.end_cursor = cursor;
    }
}

/// `{ id, search }` for exact-name lookups under a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSearch {
    pub id: String,
    pub search: String,
}

impl NodeSearch {
    pub fn new(id: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            search: search.into(),
        }
    }
}

impl Record for NodeSearch {
    const NAME: &'static str = "NodeSearch";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "id", &self.id)?;
        require_non_empty(Self::NAME, "search", &self.search)
    }
}

/// `{ id }` for single node fetches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeId {
    pub id: String,
}

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Record for NodeId {
    const NAME: &'static str = "NodeId";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "id", &self.id)
    }
}

/// input of every delete mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteInput {
    pub id: String,
}

impl Record for DeleteInput {
    const NAME: &'static str = "DeleteInput";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "id", &self.id)
    }
}

impl SparseRecord for DeleteInput {}

/// `{ id }` payload returned by create and update mutations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdNode {
    pub id: String,
}

pub(crate) fn validate_page_size(record: &str, first: Option<i64>) -> Result<()> {
    match first {
        Some(first) if first <= 0 => Err(Error::invalid_field(
            record,
            "first",
            "page size must be positive",
        )),
        _ => Ok(()),
    }
}
