//! HTTP client for the remote catalog.
//!
//! Endpoints, relative to the configured base URL and resource name:
//! - `GET /{resource}/?name=&page=&status=` returns `{ results, info: { next } }`
//! - `GET /{resource}/{id}` returns one entity
//! - `GET /{resource}/{id1,id2,...}` returns a list, or a single object when
//!   exactly one id is requested

use crate::core::config::ExplorerConfig;
use crate::core::entity::{Entity, EntityId, RemotePage};
use crate::core::error::{ExplorerError, Result};
use crate::core::query_state::PageKey;
use serde::Deserialize;
use std::future::Future;

/// Remote catalog operations the engine depends on.
pub trait CatalogApi {
    fn fetch_page(&self, key: &PageKey) -> impl Future<Output = Result<RemotePage>>;

    /// Full records for `ids`. The result order is whatever the server returns.
    fn fetch_many(&self, ids: &[EntityId]) -> impl Future<Output = Result<Vec<Entity>>>;

    fn fetch_entity(&self, id: EntityId) -> impl Future<Output = Result<Entity>>;
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    results: Vec<Entity>,
    info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    next: Option<String>,
}

impl From<PageResponse> for RemotePage {
    fn from(response: PageResponse) -> Self {
        Self {
            items: response.results,
            has_next: response.info.next.is_some(),
        }
    }
}

/// A batch lookup answers with an object instead of a list for one id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Entity>),
    One(Entity),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Entity> {
        match self {
            Self::Many(entities) => entities,
            Self::One(entity) => vec![entity],
        }
    }
}

pub struct HttpCatalogApi {
    client: reqwest::Client,
    base_url: String,
    resource: String,
}

impl HttpCatalogApi {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        url::Url::parse(&config.api_url)
            .map_err(|e| ExplorerError::invalid_url(&config.api_url, e))?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("catalog-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            resource: config.resource.clone(),
        })
    }

    fn resource_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ExplorerError::api(status.as_u16(), body));
        }
        Ok(response)
    }
}

impl CatalogApi for HttpCatalogApi {
    async fn fetch_page(&self, key: &PageKey) -> Result<RemotePage> {
        let mut query = vec![
            ("name", key.search_text.clone()),
            ("page", key.page.to_string()),
        ];
        if let Some(status) = key.status {
            query.push(("status", status.as_str().to_string()));
        }

        log::debug!("GET {}/ {:?}", self.resource_url(), query);
        let response = self
            .client
            .get(format!("{}/", self.resource_url()))
            .query(&query)
            .send()
            .await?;

        // The catalog answers "no match" with 404
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            log::debug!("No catalog entries for {key:?}");
            return Ok(RemotePage::default());
        }

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<PageResponse>().await?.into())
    }

    async fn fetch_many(&self, ids: &[EntityId]) -> Result<Vec<Entity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        log::debug!("GET {}/{}", self.resource_url(), joined);

        let response = self
            .client
            .get(format!("{}/{}", self.resource_url(), joined))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<OneOrMany>().await?.into_vec())
    }

    async fn fetch_entity(&self, id: EntityId) -> Result<Entity> {
        log::debug!("GET {}/{}", self.resource_url(), id);
        let response = self
            .client
            .get(format!("{}/{}", self.resource_url(), id))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Entity>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_maps_next_link() -> Result<()> {
        let json = r#"{
            "info": { "count": 2, "pages": 2, "next": "https://example.test/character/?page=2", "prev": null },
            "results": [
                { "id": 1, "name": "Rick Sanchez", "status": "Alive", "image": "https://example.test/1.jpeg", "species": "Human" }
            ]
        }"#;

        let page: RemotePage = serde_json::from_str::<PageResponse>(json)?.into();
        assert!(page.has_next);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Rick Sanchez");
        Ok(())
    }

    #[test]
    fn test_last_page_has_no_next() -> Result<()> {
        let json = r#"{ "info": { "next": null }, "results": [] }"#;
        let page: RemotePage = serde_json::from_str::<PageResponse>(json)?.into();
        assert!(!page.has_next);
        assert!(page.items.is_empty());
        Ok(())
    }

    #[test]
    fn test_single_object_batch_becomes_list() -> Result<()> {
        let json = r#"{ "id": 2, "name": "Morty Smith", "status": "Alive", "image": "" }"#;
        let batch = serde_json::from_str::<OneOrMany>(json)?.into_vec();
        assert_eq!(batch, vec![Entity::new(2, "Morty Smith", "Alive")]);
        Ok(())
    }

    #[test]
    fn test_list_batch_is_kept() -> Result<()> {
        let json = r#"[
            { "id": 1, "name": "Rick Sanchez", "status": "Alive", "image": "" },
            { "id": 3, "name": "Summer Smith", "status": "Alive", "image": "" }
        ]"#;
        let batch = serde_json::from_str::<OneOrMany>(json)?.into_vec();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].id, 3);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let mut config = ExplorerConfig::default();
        config.api_url = "not a url".to_string();
        assert!(matches!(
            HttpCatalogApi::new(&config),
            Err(ExplorerError::InvalidUrl { .. })
        ));
    }
}
