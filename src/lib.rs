//! arize graphql client
//!
//! this crate provides a typed client for the arize ml observability
//! graphql api. start with [`Client`] and [`ClientConfig`]; the domain
//! methods (`get_all_models`, `create_model_volume_dashboard`,
//! `list_spans`, ...) resolve names to ids and page through results for
//! you. `execute_raw` and `execute` remain available for ad-hoc documents.
//!
//! ## quick start
//!
//! ```no_run
//! use arize::{Client, ClientConfig};
//! use arize::types::ModelRef;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("api-key", "my-org", "my-space");
//! let client = Client::connect(config).await?;
//! let model = client
//!     .get_model(&ModelRef::Name("fraud-detector".to_string()))
//!     .await?;
//! println!("{} {}", model.id, model.name);
//! # Ok(())
//! # }
//! ```
//!
//! ## operations
//!
//! every request the façade sends is a unit type implementing
//! [`Operation`] under [`queries`]. they can be executed directly with
//! [`Client::execute_operation`] or paged with [`Client::paginate`].

mod api;
mod client;
mod config;
pub mod enums;
mod error;
mod graphql;
mod operation;
mod pagination;
pub mod profile;
pub mod queries;
pub mod record;
mod transport;
pub mod types;

pub use api::SpanQuery;
pub use client::Client;
pub use config::{ClientConfig, RetryPolicy, DEFAULT_BASE_URL};
pub use enums::{resolve, WireEnum};
pub use error::{Error, Result};
pub use graphql::{check_document, GraphQlError, GraphQlLocation, GraphQlRequest, GraphQlResponse};
pub use operation::{
    lookup, parse_acknowledged, parse_connection, parse_node, Connection, CursorVariables, Edge,
    Operation, Page, PageInfo,
};
pub use pagination::{BoxFetch, BoxFutureResult, Collected, DynPaginator, Paginator};
pub use transport::{HttpTransport, Transport};
