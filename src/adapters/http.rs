//! reqwest-backed vendor clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use crate::config::{AepsConfig, EstampConfig};
use crate::domain::aeps::{Upstream, UpstreamError, UpstreamReply};

const APPLICATION_JSON: &str = "application/json";

/// JSON-over-HTTP client for one vendor, with its static headers
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    request_timeout: Duration,
}

impl HttpUpstream {
    pub fn new(
        base_url: impl Into<String>,
        headers: HeaderMap,
        request_timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(Box::new(e)))?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
            request_timeout,
        })
    }

    /// Client for the AePS banking vendor
    pub fn banking(config: &AepsConfig, request_timeout: Duration) -> Result<Self, UpstreamError> {
        let headers = static_headers([
            ("x-ipay-auth-code", config.auth_code.as_str(), false),
            ("x-ipay-client-id", config.client_id.expose_secret(), true),
            ("x-ipay-client-secret", config.client_secret.expose_secret(), true),
            ("x-ipay-endpoint-ip", config.endpoint_ip.as_str(), false),
            ("x-ipay-outlet-id", config.outlet_id.as_str(), false),
        ])?;
        Self::new(&config.base_url, headers, request_timeout)
    }

    /// Client for the document e-stamp vendor
    pub fn estamp(config: &EstampConfig, request_timeout: Duration) -> Result<Self, UpstreamError> {
        let headers = static_headers([
            ("x-client-id", config.client_id.expose_secret(), true),
            ("x-client-secret", config.client_secret.expose_secret(), true),
            (
                "x-product-instance-id",
                config.product_instance_id.as_str(),
                false,
            ),
        ])?;
        Self::new(&config.base_url, headers, request_timeout)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The client deadline and the outer one are the same; whichever fires
    /// first is reported as a timeout.
    fn transport_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.request_timeout)
        } else {
            UpstreamError::Transport(Box::new(error))
        }
    }
}

fn static_headers<const N: usize>(
    entries: [(&'static str, &str, bool); N],
) -> Result<HeaderMap, UpstreamError> {
    let mut headers = HeaderMap::with_capacity(N + 1);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

    for (name, value, sensitive) in entries {
        let mut value =
            HeaderValue::from_str(value).map_err(|e| UpstreamError::InvalidHeader {
                name,
                reason: e.to_string(),
            })?;
        value.set_sensitive(sensitive);
        headers.insert(HeaderName::from_static(name), value);
    }

    Ok(headers)
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<UpstreamReply, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "calling vendor");

        let call = async {
            let response = self
                .client
                .post(&url)
                .headers(self.headers.clone())
                .body(body)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;
            let status = response.status().as_u16();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.transport_error(e))?;
            Ok::<_, UpstreamError>((status, bytes))
        };

        let (status, bytes) = match timeout(self.request_timeout, call).await {
            Ok(result) => result?,
            Err(_) => return Err(UpstreamError::Timeout(self.request_timeout)),
        };

        // Vendors answer JSON; anything else is passed on as a string.
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Ok(UpstreamReply { status, body })
    }
}
