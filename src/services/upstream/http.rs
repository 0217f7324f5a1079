//! `reqwest`-backed upstream client.
//!
//! One instance per upstream service (identity, content). The inner
//! `reqwest::Client` is pooled and cheap to share behind `Arc`.

use std::time::Duration;

use async_trait::async_trait;

use super::client::{Payload, UpstreamClient, UpstreamFailure, UpstreamRequest, UpstreamResult};

#[derive(Debug, Clone)]
pub struct HttpUpstream {
    name: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Build a client for `base_url`; every call is bounded by `timeout`.
    pub fn new(
        name: &'static str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            name,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    fn service_name(&self) -> &'static str {
        self.name
    }

    async fn call(&self, request: UpstreamRequest) -> UpstreamResult<Payload> {
        let url = self.url(&request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(
                upstream = self.name,
                method = %request.method,
                url = %url,
                error = %err,
                timeout = err.is_timeout(),
                connect = err.is_connect(),
                "upstream request failed"
            );
            UpstreamFailure::transport(err.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            tracing::warn!(upstream = self.name, url = %url, error = %err, "upstream body read failed");
            UpstreamFailure::transport(err.to_string())
        })?;
        let body = Payload::decode(&bytes);

        if status.is_success() {
            Ok(body)
        } else {
            tracing::debug!(
                upstream = self.name,
                method = %request.method,
                url = %url,
                status = status.as_u16(),
                "upstream responded with non-success status"
            );
            Err(UpstreamFailure::Response { status, body })
        }
    }
}
