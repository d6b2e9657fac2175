//! domain methods on [`Client`](crate::Client)
//!
//! each submodule adds an `impl Client` block for one api domain. names are
//! resolved to ids before the primary operation is sent; a name with no
//! match fails with [`Error::NotFound`](crate::Error::NotFound) and nothing
//! else goes out.

mod dashboard;
mod model;
mod monitor;
mod trace;

pub use trace::SpanQuery;

/// keep only exact name matches; server-side search may be fuzzy
pub(crate) fn exact_match<T>(items: Vec<T>, name: &str, item_name: impl Fn(&T) -> &str) -> Option<T> {
    items.into_iter().find(|item| item_name(item) == name)
}
