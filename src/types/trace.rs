use crate::enums::{SortDirection, SpanKind, StatusCode};
use crate::error::{Error, Result};
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// columns the span endpoint can sort by
const SORTABLE_COLUMNS: &[&str] = &["startTime", "endTime", "latencyMs", "name", "statusCode"];

/// one span of a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub span_id: String,
    pub trace_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub span_kind: Option<SpanKind>,
    #[serde(default)]
    pub status_code: Option<StatusCode>,
    #[serde(default)]
    pub status_message: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub latency_ms: Option<f64>,
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
}

impl Span {
    /// true for the span that starts a trace
    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref().map_or(true, str::is_empty)
    }
}

impl Record for Span {
    const NAME: &'static str = "Span";
}

/// sort order for span listings, parsed from `column:direction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpanSort {
    pub column: String,
    pub direction: SortDirection,
}

impl Default for SpanSort {
    fn default() -> Self {
        Self {
            column: "startTime".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SpanSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column.trim(), direction.parse()?),
            None => (s.trim(), SortDirection::Desc),
        };
        let column = SORTABLE_COLUMNS
            .iter()
            .find(|c| c.eq_ignore_ascii_case(column) || snake_eq(c, column))
            .ok_or_else(|| {
                Error::invalid_field(
                    "SpanSort",
                    "column",
                    format!(
                        "cannot sort by '{column}'; expected one of: {}",
                        SORTABLE_COLUMNS.join(", ")
                    ),
                )
            })?;
        Ok(Self {
            column: column.to_string(),
            direction,
        })
    }
}

/// `start_time` matches `startTime`
fn snake_eq(camel: &str, candidate: &str) -> bool {
    camel.eq_ignore_ascii_case(&candidate.replace('_', ""))
}
