use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;

// tokio::time::sleep is only available on non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
use tokio::time::sleep;

use crate::{Action, DataApiError, Result, TransportOptions};

/// Performs one HTTP round trip for the client and returns the raw body.
///
/// The client hands over a fully built action URL, the serialized request
/// body, the headers for this call and the action tag. Implementations
/// decide everything about the network: retries, timeouts, status handling.
/// Any error returned here is logged by the client and turned into `None`.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use atlas_data_api::{Action, ActionTransport, Result};
/// use reqwest::header::HeaderMap;
/// use serde_json::Value;
///
/// struct Canned;
///
/// #[async_trait]
/// impl ActionTransport for Canned {
///     async fn request(
///         &self,
///         _url: &str,
///         _body: &Value,
///         _headers: &HeaderMap,
///         _action: Action,
///     ) -> Result<String> {
///         Ok(r#"{"deletedCount": 0}"#.to_owned())
///     }
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ActionTransport: Send + Sync {
    async fn request(
        &self,
        url: &str,
        body: &Value,
        headers: &HeaderMap,
        action: Action,
    ) -> Result<String>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: ActionTransport + ?Sized> ActionTransport for Arc<T> {
    async fn request(
        &self,
        url: &str,
        body: &Value,
        headers: &HeaderMap,
        action: Action,
    ) -> Result<String> {
        (**self).request(url, body, headers, action).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: ActionTransport + ?Sized> ActionTransport for Box<T> {
    async fn request(
        &self,
        url: &str,
        body: &Value,
        headers: &HeaderMap,
        action: Action,
    ) -> Result<String> {
        (**self).request(url, body, headers, action).await
    }
}

/// [`ActionTransport`] backed by `reqwest`, with optional retries.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
    options: TransportOptions,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing `reqwest::Client`, e.g. one with custom TLS or proxy settings.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            options: TransportOptions::default(),
        }
    }

    /// Applies timeout and retry behavior.
    pub fn with_options(mut self, opts: TransportOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    fn should_retry_status(&self, status: StatusCode) -> bool {
        matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS
                | StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT
        )
    }

    fn should_retry_transport(&self, err: &reqwest::Error) -> bool {
        err.is_timeout()
            || err.is_request()
            || err.is_body()
            // is_connect() is not available on wasm32 targets (no TCP)
            || {
                #[cfg(not(target_arch = "wasm32"))]
                { err.is_connect() }
                #[cfg(target_arch = "wasm32")]
                { false }
            }
    }

    /// Waits before the next retry attempt.
    ///
    /// On native targets: exponential backoff sleep via `tokio::time::sleep`.
    /// On WASM targets: no-op, `tokio::time::sleep` is not available there.
    async fn wait_before_retry(&self, action: Action, attempt: usize) {
        let exp = attempt.min(16) as u32;
        let multiplier = 1u64 << exp;
        let delay_ms = self.options.retry_backoff_ms.saturating_mul(multiplier);

        tracing::debug!(%action, attempt, delay_ms, "retrying data api request");

        #[cfg(not(target_arch = "wasm32"))]
        sleep(Duration::from_millis(delay_ms)).await;

        #[cfg(target_arch = "wasm32")]
        let _ = delay_ms;
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ActionTransport for HttpTransport {
    async fn request(
        &self,
        url: &str,
        body: &Value,
        headers: &HeaderMap,
        action: Action,
    ) -> Result<String> {
        let mut attempt = 0usize;
        loop {
            let response = self
                .http
                .post(url)
                .headers(headers.clone())
                .timeout(Duration::from_millis(self.options.timeout_ms))
                .json(body)
                .send()
                .await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().await.map_err(DataApiError::Transport)?;

                    if status.is_success() {
                        return Ok(text);
                    }

                    if self.should_retry_status(status) && attempt < self.options.max_retries {
                        self.wait_before_retry(action, attempt).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(DataApiError::Http {
                        status: status.as_u16(),
                        body: text,
                    });
                }
                Err(err) => {
                    if self.should_retry_transport(&err) && attempt < self.options.max_retries {
                        self.wait_before_retry(action, attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(DataApiError::Transport(err));
                }
            }
        }
    }
}
