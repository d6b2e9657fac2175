//! http transport
//!
//! [`Transport`] is the seam between the client and the network. the
//! default [`HttpTransport`] posts json with reqwest and retries transient
//! failures with a constant backoff.

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::{Error, Result};
use crate::pagination::BoxFutureResult;
use backon::{ConstantBuilder, Retryable};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use url::Url;

/// posts a graphql request body and returns the raw status and body
pub trait Transport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: &'a Url,
        body: &'a serde_json::Value,
    ) -> BoxFutureResult<'a, (StatusCode, String)>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// build the http client with auth and transport settings from `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&config.api_key)
                .map_err(|err| Error::Config(format!("invalid api key header value: {err}")))?,
        );
        headers.extend(config.extra_headers.clone());

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self {
            http,
            retry: config.retry,
        })
    }

    async fn post_once(&self, url: &Url, body: &serde_json::Value) -> Result<(StatusCode, String)> {
        let response = self.http.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if is_unavailable(status) {
            return Err(Error::Unavailable {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok((status, text))
    }
}

impl Transport for HttpTransport {
    fn post<'a>(
        &'a self,
        url: &'a Url,
        body: &'a serde_json::Value,
    ) -> BoxFutureResult<'a, (StatusCode, String)> {
        Box::pin(async move {
            let backoff = ConstantBuilder::default()
                .with_delay(self.retry.delay)
                .with_max_times(self.retry.max_attempts.saturating_sub(1) as usize);

            (|| self.post_once(url, body))
                .retry(backoff)
                .when(Error::is_retryable)
                .notify(|err, delay| {
                    tracing::warn!(error = %err, ?delay, "retrying graphql request");
                })
                .await
        })
    }
}

fn is_unavailable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}
