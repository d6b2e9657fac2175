use crate::client::Client;
use crate::enums::SortDirection;
use crate::error::{Error, Result};
use crate::pagination::Collected;
use crate::queries::trace::{GetModelSpans, SpanQueryVariables};
use crate::queries::DEFAULT_PAGE_SIZE;
use crate::types::{ModelRef, Span, SpanSort};
use chrono::{DateTime, Duration, Utc};

/// window and filters for a span listing
#[derive(Debug, Clone, PartialEq)]
pub struct SpanQuery {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// stop after this many spans
    pub limit: Option<usize>,
    pub root_spans_only: bool,
    pub sort: Option<SpanSort>,
    pub page_size: i64,
}

impl SpanQuery {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            limit: None,
            root_spans_only: false,
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// the window ending now
    pub fn last_days(days: i64) -> Self {
        let end_time = Utc::now();
        Self::new(end_time - Duration::days(days), end_time)
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_sort(mut self, sort: Option<SpanSort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_root_spans_only(mut self, root_spans_only: bool) -> Self {
        self.root_spans_only = root_spans_only;
        self
    }

    fn variables(&self, model_id: String) -> SpanQueryVariables {
        let mut variables = SpanQueryVariables::new(model_id, self.start_time, self.end_time);
        variables.first = Some(self.page_size);
        variables.root_spans_only = self.root_spans_only;
        variables.sort = self.sort.clone();
        variables
    }
}

impl Default for SpanQuery {
    fn default() -> Self {
        Self::last_days(7)
    }
}

impl Client {
    /// spans of a model, keeping whatever was fetched if a later page fails
    ///
    /// name resolution failures are returned as errors; page failures end
    /// up in [`Collected::error`].
    pub async fn list_spans(&self, model: &ModelRef, query: &SpanQuery) -> Result<Collected<Span>> {
        let model_id = self.get_model_id(model).await?;
        let collected = self
            .paginate::<GetModelSpans>(query.variables(model_id), query.limit)
            .collect()
            .await;
        tracing::debug!(
            model = %model,
            spans = collected.items.len(),
            pages = collected.pages,
            complete = collected.is_complete(),
            "listed spans"
        );
        Ok(collected)
    }

    /// spans of a model; any page failure fails the call
    pub async fn get_all_spans(&self, model: &ModelRef, query: &SpanQuery) -> Result<Vec<Span>> {
        self.list_spans(model, query).await?.into_result()
    }

    /// every span of one trace in the window, oldest first
    pub async fn get_trace(
        &self,
        model: &ModelRef,
        trace_id: &str,
        query: &SpanQuery,
    ) -> Result<Vec<Span>> {
        let model_id = self.get_model_id(model).await?;
        let mut variables = query.variables(model_id);
        variables.root_spans_only = false;
        variables.trace_id = Some(trace_id.to_string());
        variables.sort = Some(SpanSort {
            column: "startTime".to_string(),
            direction: SortDirection::Asc,
        });

        let spans = self
            .paginate::<GetModelSpans>(variables, None)
            .collect_all()
            .await?;
        if spans.is_empty() {
            return Err(Error::NotFound {
                resource: "trace",
                name: trace_id.to_string(),
                domain: model.to_string(),
            });
        }
        Ok(spans)
    }
}
