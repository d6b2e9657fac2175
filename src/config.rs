//! client configuration
//!
//! build a [`ClientConfig`] with an api key and the organization and space
//! names (or ids) to work in, plus optional transport overrides. pass it to
//! [`crate::Client::connect`].

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

/// default arize host
pub const DEFAULT_BASE_URL: &str = "https://app.arize.com";

/// bounded retry applied to each http call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// total attempts, including the first
    pub max_attempts: u32,
    /// constant delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// configuration for the arize client
#[derive(Clone)]
pub struct ClientConfig {
    /// original base url input
    pub(crate) raw_base_url: String,

    /// base url of the arize instance
    pub(crate) base_url: Url,

    /// whether the provided base url parsed successfully
    pub(crate) base_url_valid: bool,

    /// developer api key
    pub(crate) api_key: String,

    /// organization name
    pub(crate) organization: String,

    /// space name
    pub(crate) space: String,

    /// known organization and space ids; skips the lookup when set
    pub(crate) ids: Option<(String, String)>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// retry policy for transient failures
    pub(crate) retry: RetryPolicy,
}

impl ClientConfig {
    /// create a new client configuration against the default host
    ///
    /// # example
    ///
    /// ```
    /// use arize::ClientConfig;
    ///
    /// let config = ClientConfig::new("api-key", "my-org", "my-space");
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        organization: impl Into<String>,
        space: impl Into<String>,
    ) -> Self {
        Self {
            raw_base_url: DEFAULT_BASE_URL.to_string(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            base_url_valid: true,
            api_key: api_key.into(),
            organization: organization.into(),
            space: space.into(),
            ids: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("arize-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            extra_headers: HeaderMap::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// point the client at another host (with or without trailing slash)
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        let base_url_str = base_url.as_ref();
        let normalized = base_url_str.trim_end_matches('/');

        match Url::parse(normalized).or_else(|_| Url::parse(&format!("https://{}", normalized))) {
            Ok(url) => {
                self.base_url = url;
                self.base_url_valid = true;
            }
            Err(_) => self.base_url_valid = false,
        }
        self.raw_base_url = base_url_str.to_string();
        self
    }

    /// use known organization and space ids instead of resolving names
    pub fn with_ids(
        mut self,
        organization_id: impl Into<String>,
        space_id: impl Into<String>,
    ) -> Self {
        self.ids = Some((organization_id.into(), space_id.into()));
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// set the retry policy
    ///
    /// default: 3 attempts, 500ms apart
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// organization name
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// space name
    pub fn space(&self) -> &str {
        &self.space
    }

    /// base url of the arize instance
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// access extra headers configured on this client
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url_valid {
            return Err(Error::Config(format!(
                "invalid base url: {}",
                self.raw_base_url
            )));
        }

        if self.base_url.scheme() != "http" && self.base_url.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.base_url.scheme()
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api key cannot be empty".to_string()));
        }

        if self.retry.max_attempts == 0 {
            return Err(Error::Config(
                "retry policy needs at least one attempt".to_string(),
            ));
        }

        match &self.ids {
            Some((org_id, space_id)) if org_id.is_empty() || space_id.is_empty() => Err(
                Error::Config("organization and space ids cannot be empty".to_string()),
            ),
            Some(_) => Ok(()),
            None if self.organization.trim().is_empty() => {
                Err(Error::Config("organization cannot be empty".to_string()))
            }
            None if self.space.trim().is_empty() => {
                Err(Error::Config("space cannot be empty".to_string()))
            }
            None => Ok(()),
        }
    }

    /// graphql endpoint
    pub(crate) fn graphql_url(&self) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/graphql", base)).map_err(Error::from)
    }

    /// browser url of a dashboard
    pub(crate) fn dashboard_url(
        &self,
        organization_id: &str,
        space_id: &str,
        dashboard_id: &str,
    ) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!(
            "{}/organizations/{}/spaces/{}/dashboards/{}",
            base, organization_id, space_id, dashboard_id
        )
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("space", &self.space)
            .field("ids", &self.ids)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("extra_headers", &self.extra_headers.len())
            .field("retry", &self.retry)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
