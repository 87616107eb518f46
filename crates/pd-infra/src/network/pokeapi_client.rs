//! PokeAPI HTTP adapter
//! PokeAPI HTTP 适配器
//!
//! Implements [`CatalogPort`] and [`DetailSourcePort`] on top of one pooled
//! `reqwest::Client`. Each call is a single GET: no retry, no caching.

use async_trait::async_trait;
use pd_core::catalog::{CatalogPage, EntityReference, PageRequest};
use pd_core::config::CatalogConfig;
use pd_core::ports::{CatalogError, CatalogPort, DetailSourcePort};
use pd_core::Locator;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http, &config.base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/pokemon?limit=N`, with `offset` only when it is non-zero.
    fn listing_url(&self, page: PageRequest) -> Result<Url, CatalogError> {
        let raw = format!("{}/pokemon", self.base_url);
        let mut url =
            Url::parse(&raw).map_err(|e| CatalogError::InvalidLocator(format!("{raw}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &page.limit.to_string());
            if page.offset > 0 {
                pairs.append_pair("offset", &page.offset.to_string());
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, CatalogError> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "catalog request rejected");
            return Err(map_status(status));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogPort for PokeApiClient {
    async fn list_references(
        &self,
        page: PageRequest,
    ) -> Result<Vec<EntityReference>, CatalogError> {
        let url = self.listing_url(page)?;
        let document = self.get_json(url).await?;
        let page: CatalogPage =
            serde_json::from_value(document).map_err(|e| CatalogError::Decode(e.to_string()))?;

        debug!(count = page.results.len(), "catalog page received");
        Ok(page.results)
    }
}

#[async_trait]
impl DetailSourcePort for PokeApiClient {
    async fn fetch_document(&self, locator: &Locator) -> Result<Value, CatalogError> {
        let url = Url::parse(locator.as_str())
            .map_err(|e| CatalogError::InvalidLocator(format!("{locator}: {e}")))?;
        self.get_json(url).await
    }
}

fn map_status(status: StatusCode) -> CatalogError {
    CatalogError::Status(status.as_u16())
}

fn map_transport_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Transport("request timed out".to_string())
    } else if err.is_decode() {
        CatalogError::Decode(err.to_string())
    } else {
        CatalogError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn build_client(host: String) -> PokeApiClient {
        let config = CatalogConfig {
            base_url: host,
            timeout_secs: 5,
            ..CatalogConfig::default()
        };
        PokeApiClient::new(&config).unwrap()
    }

    fn listing_body() -> &'static str {
        r#"{
            "count": 1302,
            "next": null,
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"},
                {"name": "venusaur", "url": "https://pokeapi.co/api/v2/pokemon/3/"}
            ]
        }"#
    }

    #[tokio::test]
    async fn list_references_sends_limit_and_keeps_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon")
            .match_query(Matcher::Exact("limit=20".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing_body())
            .create_async()
            .await;

        let client = build_client(server.url());
        let refs = client
            .list_references(PageRequest::default())
            .await
            .expect("listing should succeed");

        mock.assert_async().await;
        let names: Vec<_> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(
            refs[0].locator().as_str(),
            "https://pokeapi.co/api/v2/pokemon/1/"
        );
    }

    #[tokio::test]
    async fn list_references_sends_offset_when_paging() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "5".into()),
                Matcher::UrlEncoded("offset".into(), "40".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let client = build_client(format!("{}/", server.url()));
        let refs = client
            .list_references(PageRequest::new(5, 40))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(refs.is_empty());
    }

    #[tokio::test]
    async fn list_references_maps_server_error_to_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/pokemon")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = build_client(server.url());
        let err = client
            .list_references(PageRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::Status(503));
    }

    #[tokio::test]
    async fn list_references_rejects_malformed_envelope() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/pokemon")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": "nope"}"#)
            .create_async()
            .await;

        let client = build_client(server.url());
        let err = client
            .list_references(PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_document_returns_raw_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon/1/")
            .with_status(200)
            .with_body(r#"{"id": 1, "name": "bulbasaur", "height": 7, "weight": 69}"#)
            .create_async()
            .await;

        let client = build_client(server.url());
        let locator = Locator::new(format!("{}/pokemon/1/", server.url()));
        let document = client.fetch_document(&locator).await.unwrap();

        mock.assert_async().await;
        assert_eq!(document["name"], "bulbasaur");
        assert_eq!(document["height"], 7);
    }

    #[tokio::test]
    async fn fetch_document_maps_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/pokemon/99999/")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let client = build_client(server.url());
        let locator = Locator::new(format!("{}/pokemon/99999/", server.url()));

        assert_eq!(
            client.fetch_document(&locator).await.unwrap_err(),
            CatalogError::Status(404)
        );
    }

    #[tokio::test]
    async fn fetch_document_rejects_non_json_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/pokemon/1/")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = build_client(server.url());
        let locator = Locator::new(format!("{}/pokemon/1/", server.url()));

        assert!(matches!(
            client.fetch_document(&locator).await,
            Err(CatalogError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn fetch_document_rejects_relative_locator_without_network() {
        let client = build_client("http://127.0.0.1:9".to_string());

        let err = client
            .fetch_document(&Locator::new("pokemon/1"))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::InvalidLocator(_)));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = build_client("https://pokeapi.co/api/v2/".to_string());

        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(
            client.listing_url(PageRequest::default()).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon?limit=20"
        );
    }
}
