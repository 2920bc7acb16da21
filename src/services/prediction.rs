use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::GameSummary;

/// The three prediction modes offered by the front end. The rename
/// strings are the remote API's `predict_option` values, verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PredictOption {
    #[serde(rename = "Both")]
    Both,
    #[serde(rename = "Play one of my games")]
    PlayOwnedGame,
    #[serde(rename = "Play to buy a new game")]
    BuyNewGame,
}

/// Query-string payload for the remote `predict_party` endpoint.
///
/// Field names follow the remote API's observed, undocumented contract;
/// the centroid coordinates and `ratio_filter` pass through untouched.
/// Unspecified dimensions are omitted entirely, which the service reads
/// as "no filter on this dimension".
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PartyQuery {
    pub average: f64,
    pub usersrated: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playingtime: Option<f64>,
    pub minplayers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearpublished: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boardgamecategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boardgamemechanic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boardgamefamily: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub predict_option: PredictOption,
    pub ratio_filter: f64,
}

/// Query-string payload for the remote `predict_filters` endpoint: the
/// same mapped filters with no user collection and no blend ratio.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterQuery {
    pub average: f64,
    pub usersrated: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playingtime: Option<f64>,
    pub minplayers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearpublished: Option<f64>,
}

#[derive(Serialize)]
struct UserQuery<'a> {
    #[serde(rename = "userID")]
    user_id: &'a str,
    predict_option: PredictOption,
}

/// Seam over the remote prediction service.
///
/// All clustering, filtering and ranking happens behind these calls; this
/// crate only shapes the query and checks the response shape.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// `predict_userID`: recommendations from a user's own collection.
    async fn predict_for_user(
        &self,
        user_id: &str,
        option: PredictOption,
    ) -> AppResult<Vec<GameSummary>>;

    /// `predict_party`: the user's collection blended with cluster and
    /// filter criteria.
    async fn predict_party(&self, query: PartyQuery) -> AppResult<Vec<GameSummary>>;

    /// `predict_filters`: pure filter criteria, no user collection.
    async fn predict_filters(&self, query: FilterQuery) -> AppResult<Vec<GameSummary>>;
}

#[derive(Clone)]
pub struct PredictionClient {
    http_client: HttpClient,
    api_url: String,
}

impl PredictionClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    async fn fetch_games<Q>(&self, endpoint: &str, query: &Q) -> AppResult<Vec<GameSummary>>
    where
        Q: Serialize + Sync,
    {
        let url = format!("{}/{}", self.api_url, endpoint);
        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "prediction API returned status {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        let games = parse_game_list(&payload)?;

        tracing::info!(
            endpoint = %endpoint,
            results = games.len(),
            provider = "prediction",
            "Prediction fetched"
        );

        Ok(games)
    }
}

#[async_trait]
impl PredictionApi for PredictionClient {
    async fn predict_for_user(
        &self,
        user_id: &str,
        option: PredictOption,
    ) -> AppResult<Vec<GameSummary>> {
        let query = UserQuery {
            user_id,
            predict_option: option,
        };
        self.fetch_games("predict_userID", &query).await
    }

    async fn predict_party(&self, query: PartyQuery) -> AppResult<Vec<GameSummary>> {
        self.fetch_games("predict_party", &query).await
    }

    async fn predict_filters(&self, query: FilterQuery) -> AppResult<Vec<GameSummary>> {
        self.fetch_games("predict_filters", &query).await
    }
}

/// The contract is a JSON array of game objects; anything else clears the
/// result set and surfaces a format error to the caller.
fn parse_game_list(payload: &serde_json::Value) -> AppResult<Vec<GameSummary>> {
    let items = payload.as_array().ok_or_else(|| {
        AppError::UpstreamFormat("prediction response is not a list".to_string())
    })?;

    items
        .iter()
        .map(|item| {
            let object = item.as_object().ok_or_else(|| {
                AppError::UpstreamFormat(
                    "prediction response entry is not an object".to_string(),
                )
            })?;
            Ok(GameSummary::from_object(object))
        })
        .collect()
}
