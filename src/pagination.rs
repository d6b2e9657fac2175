//! pagination helpers
//!
//! cursor paginator for connection-style graphql results. the cursor is
//! replayed verbatim; pages are fetched one at a time.

use crate::error::{Error, Result};
use crate::operation::Page;
use std::future::Future;
use std::pin::Pin;

/// boxed, sendable future returning a library result
pub type BoxFutureResult<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// boxed page fetcher: cursor in, page out
pub type BoxFetch<'a, T> = Box<dyn FnMut(Option<String>) -> BoxFutureResult<'a, Page<T>> + Send + 'a>;

/// paginator over a boxed fetcher, as returned by [`crate::Client::paginate`]
pub type DynPaginator<'a, T> = Paginator<T, BoxFetch<'a, T>>;

/// everything fetched before the paginator stopped
#[derive(Debug)]
pub struct Collected<T> {
    /// items from every successful page, in order
    pub items: Vec<T>,
    /// pages fetched successfully
    pub pages: usize,
    /// the failure that stopped pagination, if any
    pub error: Option<Error>,
}

impl<T> Collected<T> {
    /// true if pagination ended without a failure
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// items if complete, otherwise the error that stopped pagination
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// generic cursor paginator
pub struct Paginator<T, Fetch> {
    fetch: Fetch,
    cursor: Option<String>,
    limit: Option<usize>,
    fetched: usize,
    pages: usize,
    done: bool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, Fetch, Fut> Paginator<T, Fetch>
where
    Fetch: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    /// create a new paginator starting without a cursor
    pub fn new(fetch: Fetch) -> Self {
        Self {
            fetch,
            cursor: None,
            limit: None,
            fetched: 0,
            pages: 0,
            done: false,
            _phantom: std::marker::PhantomData,
        }
    }

    /// start from a cursor returned by an earlier call
    pub fn starting_at(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// stop after this many items
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// cursor the next request would send
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// fetch the next page of results
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        if self.done {
            return Ok(None);
        }
        if self.limit == Some(0) {
            self.done = true;
            return Ok(None);
        }

        let page = match (self.fetch)(self.cursor.clone()).await {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Err(err);
            }
        };
        self.pages += 1;
        tracing::debug!(
            page = self.pages,
            items = page.items.len(),
            has_next = page.has_next,
            "fetched page"
        );

        let mut items = page.items;
        if let Some(limit) = self.limit {
            items.truncate(limit.saturating_sub(self.fetched));
        }
        self.fetched += items.len();

        self.cursor = page.next_cursor;
        let limit_reached = self.limit.is_some_and(|limit| self.fetched >= limit);
        if !page.has_next || self.cursor.is_none() || limit_reached {
            self.done = true;
        }

        Ok(Some(items))
    }

    /// fetch pages until done or failed, keeping what was fetched
    pub async fn collect(mut self) -> Collected<T> {
        let mut items = Vec::new();
        loop {
            match self.next_page().await {
                Ok(Some(page)) => items.extend(page),
                Ok(None) => {
                    return Collected {
                        items,
                        pages: self.pages,
                        error: None,
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        pages = self.pages,
                        items = items.len(),
                        error = %err,
                        "pagination stopped early"
                    );
                    return Collected {
                        items,
                        pages: self.pages,
                        error: Some(err),
                    };
                }
            }
        }
    }

    /// fetch all pages and return a single collection
    pub async fn collect_all(self) -> Result<Vec<T>> {
        self.collect().await.into_result()
    }
}
