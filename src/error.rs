//! error types
//!
//! one error enum for local validation, name resolution, api responses and
//! transport failures.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the client, operations and profiles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// bad input caught before any network call
    #[error("validation error for {record}: {message}")]
    Validation {
        /// record or operation being validated
        record: String,
        /// offending field, when known
        field: Option<String>,
        /// human readable reason
        message: String,
    },

    #[error("invalid {kind} value '{value}'; expected one of: {}", accepted.join(", "))]
    InvalidEnumValue {
        /// enum type name
        kind: &'static str,
        /// rejected input
        value: String,
        /// canonical values and aliases accepted by the enum
        accepted: Vec<String>,
    },

    #[error("{resource} '{name}' not found in {domain}")]
    NotFound {
        /// kind of resource looked up (model, dashboard, ...)
        resource: &'static str,
        /// name or id that failed to resolve
        name: String,
        /// where it was looked up
        domain: String,
    },

    /// the server answered with graphql errors or a failing status
    #[error("{operation}: {message}")]
    Api {
        /// error context of the operation that failed
        operation: String,
        /// http status if available
        status: Option<u16>,
        /// first server message, verbatim
        message: String,
        /// graphql error list
        errors: Vec<GraphQlError>,
    },

    #[error("unexpected response shape for {operation}: {detail}")]
    ResponseShape {
        /// operation whose payload did not match
        operation: String,
        /// missing key or decode failure
        detail: String,
    },

    #[error("service unavailable (http {status})")]
    Unavailable {
        /// 502, 503 or 504
        status: u16,
        /// raw response body
        body: String,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("profile write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// validation failure tied to a single field
    pub fn invalid_field(
        record: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation {
            record: record.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// validation failure for a required field that was not provided
    pub fn missing_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        Error::Validation {
            record: record.into(),
            message: format!("missing required field `{field}`"),
            field: Some(field),
        }
    }

    pub(crate) fn shape(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::ResponseShape {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    /// true if the server rejected the operation
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api { status: Some(401 | 403), .. })
            || matches!(self, Error::Http(err) if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED))
    }

    /// true for transient transport failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Unavailable { .. } => true,
            Error::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
