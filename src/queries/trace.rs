//! span queries

use crate::error::{Error, Result};
use crate::operation::{parse_connection, CursorVariables, Operation, Page};
use crate::queries::validate_page_size;
use crate::record::{require_non_empty, Record};
use crate::types::{Span, SpanSort};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// spans of a model within a time window
pub struct GetModelSpans;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpanQueryVariables {
    pub model_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub first: Option<i64>,
    #[serde(default)]
    pub end_cursor: Option<String>,
    /// only spans without a parent
    #[serde(default)]
    pub root_spans_only: bool,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub sort: Option<SpanSort>,
}

impl SpanQueryVariables {
    pub fn new(
        model_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            start_time,
            end_time,
            first: Some(super::DEFAULT_PAGE_SIZE),
            end_cursor: None,
            root_spans_only: false,
            trace_id: None,
            sort: None,
        }
    }
}

impl Record for SpanQueryVariables {
    const NAME: &'static str = "SpanQueryVariables";

    fn validate(&self) -> Result<()> {
        require_non_empty(Self::NAME, "modelId", &self.model_id)?;
        if self.start_time >= self.end_time {
            return Err(Error::invalid_field(
                Self::NAME,
                "startTime",
                "start time must be before end time",
            ));
        }
        if let Some(trace_id) = &self.trace_id {
            require_non_empty(Self::NAME, "traceId", trace_id)?;
        }
        validate_page_size(Self::NAME, self.first)
    }
}

impl CursorVariables for SpanQueryVariables {
    fn set_cursor(&mut self, cursor: Option<String>) {
        self.end_cursor = cursor;
    }
}

impl Operation for GetModelSpans {
    const NAME: &'static str = "getModelSpans";
    const DOCUMENT: &'static str = r#"
query getModelSpans(
  $modelId: ID!
  $startTime: DateTime!
  $endTime: DateTime!
  $first: Int
  $endCursor: String
  $rootSpansOnly: Boolean
  $traceId: String
  $sort: SpanSortInput
) {
  node(id: $modelId) {
    ... on Model {
      spans(
        startTime: $startTime
        endTime: $endTime
        first: $first
        after: $endCursor
        rootSpansOnly: $rootSpansOnly
        traceId: $traceId
        sort: $sort
      ) {
        pageInfo { hasNextPage endCursor }
        edges {
          node {
            spanId traceId parentId name spanKind statusCode statusMessage
            startTime endTime latencyMs attributes
          }
        }
      }
    }
  }
}
"#;
    const ERROR_CONTEXT: &'static str = "Error getting spans";

    type Variables = SpanQueryVariables;
    type Item = Span;

    fn parse(data: &Value) -> Result<Page<Span>> {
        parse_connection(Self::NAME, data, &["node", "spans"])
    }
}
