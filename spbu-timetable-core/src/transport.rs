use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder, Url,
    header::{self, HeaderMap, HeaderValue},
};

use crate::{Error, Result};

#[cfg(test)]
pub(crate) mod fake;

const USER_AGENT: &str = concat!("SPbU-Timetable-Rust/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Issues a single GET and returns the validated response body.
///
/// Implementations must not retry; one call is one request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        (**self).get(url).await
    }
}

pub struct HttpTransportBuilder {
    pub client_builder: ClientBuilder,
}

/// reqwest-backed transport that accepts only successful JSON responses.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        let client_builder = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
                headers.insert(
                    header::ACCEPT_ENCODING,
                    HeaderValue::from_static("br;q=1.0, gzip;q=0.9, deflate;q=0.8"),
                );
                headers
            });

        Self { client_builder }
    }

    pub fn timeout(mut self, timeout_secs: u64) -> Self {
        self.client_builder = self
            .client_builder
            .timeout(Duration::from_secs(timeout_secs));
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.client_builder = self.client_builder.user_agent(user_agent.into());
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let client = self
            .client_builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpTransport { client })
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        HttpTransportBuilder::new().build()
    }

    fn handle_error_req(error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(error)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Self::handle_error_req)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json(&content_type) {
            return Err(Error::ContentType {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.bytes().await.map_err(Self::handle_error_req)?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

/// `application/json`, ignoring parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mime| mime.eq_ignore_ascii_case("application/json"))
}
