use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use url::Url;

use crate::Error;

/// Builder for configuring how a `RemoteJwkSet` reaches the JWK set endpoint.
pub struct RemoteJwkSetBuilder {
    url: Url,
    http_client: Option<Client>,
    timeout: Option<Duration>,
}

impl RemoteJwkSetBuilder {
    /// Creates a new builder with the given JWKS URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http_client: None,
            timeout: None,
        }
    }

    /// Uses an existing `reqwest::Client`, e.g. to share its connection pool.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Bounds each JWK set request, including reading the response body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> RemoteJwkSet {
        RemoteJwkSet {
            http_client: self.http_client.unwrap_or_default(),
            url: self.url,
            timeout: self.timeout,
        }
    }
}

/// Fetches a JWK set over HTTP on every call.
#[derive(Clone, Debug)]
pub struct RemoteJwkSet {
    http_client: Client,
    url: Url,
    timeout: Option<Duration>,
}

impl RemoteJwkSet {
    /// Creates a builder for configuring a `RemoteJwkSet`.
    pub fn builder(url: Url) -> RemoteJwkSetBuilder {
        RemoteJwkSetBuilder::new(url)
    }

    pub async fn jwk_set(&self) -> Result<JwkSet, Error> {
        tracing::debug!(url = %self.url, "fetching JWK set");

        let mut request = self.http_client.get(self.url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Error::JwkSetResponseError {
                status_code: response.status(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Error::MalformedJwkSet)
    }
}
