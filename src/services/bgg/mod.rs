//! BoardGameGeek clients: the hot-games strip (XML API 2) and the full
//! game record lookup (legacy XML API).

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use roxmltree::Document;

use crate::error::{AppError, AppResult};
use crate::models::{GameDisplayRecord, HotGame};

pub mod normalize;

/// Seam over the BoardGameGeek XML APIs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameCatalog: Send + Sync {
    /// Currently trending games, best-effort: individual fetch failures
    /// shrink the list instead of failing it.
    async fn hot_games(&self, limit: usize) -> AppResult<Vec<HotGame>>;

    /// One game's legacy record, flattened for display.
    async fn game_details(&self, game_id: &str) -> AppResult<GameDisplayRecord>;
}

#[derive(Clone)]
pub struct BggClient {
    http_client: HttpClient,
    api_url: String,
    legacy_api_url: String,
}

impl BggClient {
    pub fn new(api_url: String, legacy_api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            legacy_api_url,
        }
    }

    async fn fetch_text(&self, url: &str, query: &[(&str, &str)]) -> AppResult<String> {
        let response = self.http_client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "BGG returned status {}: {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }

    /// Ids of the current hot list. The strip is decorative, so any
    /// failure here degrades to an empty list rather than an error.
    async fn fetch_hot_ids(&self, limit: usize) -> Vec<String> {
        let url = format!("{}/hot", self.api_url);
        let body = match self.fetch_text(&url, &[("type", "boardgame")]).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Hot list fetch failed");
                return Vec::new();
            }
        };

        match parse_hot_ids(&body, limit) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "Hot list unparsable");
                Vec::new()
            }
        }
    }

    async fn fetch_hot_entry(&self, game_id: &str) -> AppResult<HotGame> {
        let url = format!("{}/thing", self.api_url);
        let body = self.fetch_text(&url, &[("id", game_id)]).await?;
        parse_thing(&body, game_id)
    }
}

#[async_trait]
impl GameCatalog for BggClient {
    async fn hot_games(&self, limit: usize) -> AppResult<Vec<HotGame>> {
        let ids = self.fetch_hot_ids(limit).await;

        // One blocking fetch per id, in hot-list order.
        let mut games = Vec::with_capacity(ids.len());
        let mut failures = 0usize;
        for id in &ids {
            match self.fetch_hot_entry(id).await {
                Ok(game) => games.push(game),
                Err(e) => {
                    failures += 1;
                    tracing::warn!(
                        game_id = %id,
                        error = %e,
                        "Hot game detail fetch failed, skipping"
                    );
                }
            }
        }

        if failures > 0 {
            tracing::warn!(
                success_count = games.len(),
                error_count = failures,
                "Partial hot list fetch failure"
            );
        }

        tracing::info!(
            requested = ids.len(),
            fetched = games.len(),
            provider = "bgg",
            "Hot games fetched"
        );

        Ok(games)
    }

    async fn game_details(&self, game_id: &str) -> AppResult<GameDisplayRecord> {
        let url = format!("{}/boardgame/{}", self.legacy_api_url, game_id);
        let body = self.fetch_text(&url, &[("stats", "1")]).await?;
        let record = normalize::parse_game_record(&body)?;

        tracing::info!(game_id = %game_id, provider = "bgg", "Game detail fetched");

        Ok(record)
    }
}

/// Item ids from a `/hot?type=boardgame` response, in rank order.
fn parse_hot_ids(xml: &str, limit: usize) -> AppResult<Vec<String>> {
    let doc = Document::parse(xml)
        .map_err(|e| AppError::ExternalApi(format!("unparsable hot list payload: {e}")))?;

    Ok(doc
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("item"))
        .filter_map(|node| node.attribute("id").map(str::to_string))
        .take(limit)
        .collect())
}

/// Name and image from a `/thing?id={id}` response. The name lives in the
/// `value` attribute and is required; the image element text is optional.
fn parse_thing(xml: &str, game_id: &str) -> AppResult<HotGame> {
    let doc = Document::parse(xml)
        .map_err(|e| AppError::ExternalApi(format!("unparsable thing payload: {e}")))?;

    let item = doc
        .root_element()
        .children()
        .find(|node| node.has_tag_name("item"))
        .ok_or_else(|| {
            AppError::UpstreamFormat(format!("thing response holds no item for id {game_id}"))
        })?;

    let name = item
        .children()
        .find(|node| node.has_tag_name("name"))
        .and_then(|node| node.attribute("value"))
        .ok_or_else(|| {
            AppError::UpstreamFormat(format!("thing response holds no name for id {game_id}"))
        })?
        .to_string();

    let image = item
        .children()
        .find(|node| node.has_tag_name("image"))
        .and_then(|node| node.text())
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(HotGame {
        id: game_id.to_string(),
        name,
        image,
    })
}
