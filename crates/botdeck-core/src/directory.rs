//! Read-only directory client for the admin API.
//!
//! Fetches the three collections the console lists: bots, business units and
//! processes. All calls are plain GETs authenticated with the session's
//! bearer token.

use anyhow::{Context, Result, anyhow};
use url::Url;

use crate::models::{BusinessProcess, BusinessUnit, RpaBot};

pub struct DirectoryClient {
    base_url: Url,
    token: String,
    client: reqwest::Client,
}

impl DirectoryClient {
    /// Builds a client for the given API base URL and bearer token.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        // A trailing slash matters for Url::join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| anyhow!("Invalid API base URL {normalized:?}: {e}"))?;
        Ok(Self {
            base_url,
            token: token.to_string(),
            client: reqwest::Client::new(),
        })
    }

    pub async fn bots(&self) -> Result<Vec<RpaBot>> {
        self.fetch("bots/").await.context("Failed to fetch bots")
    }

    pub async fn business_units(&self) -> Result<Vec<BusinessUnit>> {
        self.fetch("business-units/")
            .await
            .context("Failed to fetch business units")
    }

    pub async fn processes(&self) -> Result<Vec<BusinessProcess>> {
        self.fetch("processes/")
            .await
            .context("Failed to fetch processes")
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path {path:?}"))?;

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{url} answered {status}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Test: the bots listing round-trips through the wire model and sends
    /// the bearer token.
    #[tokio::test]
    async fn test_bots_listing() {
        let server = MockServer::start().await;
        let bots = crate::demo::sample_bots();

        Mock::given(method("GET"))
            .and(path("/bots/"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&bots))
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectoryClient::new(&server.uri(), "tok").unwrap();
        let fetched = client.bots().await.unwrap();
        assert_eq!(fetched.len(), bots.len());
        assert_eq!(fetched[0].name, bots[0].name);
    }

    /// Test: a non-success status surfaces as an error naming the endpoint.
    #[tokio::test]
    async fn test_error_status_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/processes/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = DirectoryClient::new(&server.uri(), "stale").unwrap();
        let err = client.processes().await.unwrap_err();
        assert!(format!("{err:#}").contains("401"));
    }
}
