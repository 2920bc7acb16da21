use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::buckets::{AGE, PLAYING_TIME, YEAR_PUBLISHED};
use crate::models::clusters::{self, Centroid};
use crate::models::GameSummary;
use crate::services::prediction::{FilterQuery, PartyQuery, PredictOption};
use crate::state::AppState;

const ERROR_INVALID_USER_ID: &str = "Please enter a valid BGG user ID!";

/// Slider bounds of the collection/filter blend, in percent.
const RATIO_MIN: u32 = 10;
const RATIO_MAX: u32 = 90;

fn default_option() -> PredictOption {
    PredictOption::Both
}

fn default_min_players() -> u32 {
    1
}

fn default_ratio() -> u32 {
    90
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    user_id: String,
    #[serde(default = "default_option")]
    option: PredictOption,
}

/// "What game I must have in my board game library?": recommendations
/// from the user's own collection.
pub async fn by_user(
    State(state): State<AppState>,
    Query(request): Query<UserRequest>,
) -> AppResult<Json<Vec<GameSummary>>> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::InvalidInput(ERROR_INVALID_USER_ID.to_string()));
    }

    let games = state
        .prediction
        .predict_for_user(&request.user_id, request.option)
        .await?;
    Ok(Json(games))
}

/// Filter selections as emitted by the front end's widgets: bucket and
/// cluster fields carry the human-readable labels, not numbers.
#[derive(Debug, Deserialize)]
pub struct PartyRequest {
    user_id: String,
    #[serde(default = "default_option")]
    option: PredictOption,
    cluster: String,
    playingtime: String,
    #[serde(default = "default_min_players")]
    minplayers: u32,
    age: String,
    yearpublished: String,
    #[serde(default)]
    boardgamecategory: Option<String>,
    #[serde(default)]
    boardgamemechanic: Option<String>,
    #[serde(default)]
    boardgamefamily: Option<String>,
    /// Slider value in percent; 90 becomes a ratio_filter of 0.9.
    #[serde(default = "default_ratio")]
    ratio: u32,
}

/// "What's 'play'-list for tonight?": the user's collection blended
/// with cluster and filter criteria.
pub async fn party(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(request): Query<PartyRequest>,
) -> AppResult<Json<Vec<GameSummary>>> {
    let query = build_party_query(request)?;

    tracing::info!(
        request_id = %request_id,
        cluster_average = query.average,
        ratio_filter = query.ratio_filter,
        "Processing party prediction"
    );

    let games = state.prediction.predict_party(query).await?;
    Ok(Json(games))
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    cluster: String,
    playingtime: String,
    #[serde(default = "default_min_players")]
    minplayers: u32,
    age: String,
    yearpublished: String,
}

/// "What can I offer to my nephew?": pure filter criteria, no user
/// collection involved.
pub async fn filters(
    State(state): State<AppState>,
    Query(request): Query<FilterRequest>,
) -> AppResult<Json<Vec<GameSummary>>> {
    let query = build_filter_query(request)?;
    let games = state.prediction.predict_filters(query).await?;
    Ok(Json(games))
}

fn build_party_query(request: PartyRequest) -> AppResult<PartyQuery> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::InvalidInput(ERROR_INVALID_USER_ID.to_string()));
    }
    if !(RATIO_MIN..=RATIO_MAX).contains(&request.ratio) {
        return Err(AppError::InvalidInput(format!(
            "ratio must be between {RATIO_MIN} and {RATIO_MAX} percent"
        )));
    }

    let centroid = resolve_centroid(&request.cluster)?;

    Ok(PartyQuery {
        average: centroid.average,
        usersrated: centroid.users_rated,
        playingtime: PLAYING_TIME.resolve(&request.playingtime)?,
        minplayers: request.minplayers,
        age: AGE.resolve(&request.age)?,
        yearpublished: YEAR_PUBLISHED.resolve(&request.yearpublished)?,
        boardgamecategory: non_empty(request.boardgamecategory),
        boardgamemechanic: non_empty(request.boardgamemechanic),
        boardgamefamily: non_empty(request.boardgamefamily),
        user_id: request.user_id,
        predict_option: request.option,
        ratio_filter: f64::from(request.ratio) / 100.0,
    })
}

fn build_filter_query(request: FilterRequest) -> AppResult<FilterQuery> {
    let centroid = resolve_centroid(&request.cluster)?;

    Ok(FilterQuery {
        average: centroid.average,
        usersrated: centroid.users_rated,
        playingtime: PLAYING_TIME.resolve(&request.playingtime)?,
        minplayers: request.minplayers,
        age: AGE.resolve(&request.age)?,
        yearpublished: YEAR_PUBLISHED.resolve(&request.yearpublished)?,
    })
}

/// Cluster descriptions come from this service's own reference endpoint,
/// so an unknown one is a table mismatch rather than a user error.
fn resolve_centroid(description: &str) -> AppResult<Centroid> {
    clusters::resolve_description(description)
        .map(|cluster| cluster.centroid)
        .ok_or_else(|| AppError::Internal(format!("unknown cluster description: {description:?}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::GameSummary;
    use crate::services::bgg::MockGameCatalog;
    use crate::services::prediction::MockPredictionApi;
    use crate::services::reference::ReferenceData;

    fn state_with_prediction(prediction: MockPredictionApi) -> AppState {
        AppState {
            prediction: Arc::new(prediction),
            catalog: Arc::new(MockGameCatalog::new()),
            reference: Arc::new(ReferenceData::default()),
        }
    }

    #[tokio::test]
    async fn test_by_user_forwards_id_and_option() {
        let mut prediction = MockPredictionApi::new();
        prediction
            .expect_predict_for_user()
            .withf(|user_id, option| user_id == "jeff" && *option == PredictOption::BuyNewGame)
            .returning(|_, _| {
                Ok(vec![GameSummary {
                    object_id: Some("169786".to_string()),
                    name: Some("Scythe".to_string()),
                    thumbnail: None,
                    image: None,
                    description: None,
                    age: Some(14.0),
                }])
            });

        let response = by_user(
            State(state_with_prediction(prediction)),
            Query(UserRequest {
                user_id: "jeff".to_string(),
                option: PredictOption::BuyNewGame,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.len(), 1);
        assert_eq!(response.0[0].name, Some("Scythe".to_string()));
    }

    #[tokio::test]
    async fn test_by_user_blank_id_never_goes_upstream() {
        // No expectation set: any upstream call would panic the mock.
        let state = state_with_prediction(MockPredictionApi::new());

        let err = by_user(
            State(state),
            Query(UserRequest {
                user_id: "  ".to_string(),
                option: PredictOption::Both,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    fn party_request() -> PartyRequest {
        PartyRequest {
            user_id: "jeff".to_string(),
            option: PredictOption::Both,
            cluster: "Hidden Treasures → Niche games underappreciated".to_string(),
            playingtime: "Medium (30-60 min)".to_string(),
            minplayers: 2,
            age: "Adult (18+ years)".to_string(),
            yearpublished: "Any".to_string(),
            boardgamecategory: Some("Economic".to_string()),
            boardgamemechanic: None,
            boardgamefamily: Some("  ".to_string()),
            ratio: 90,
        }
    }

    #[test]
    fn test_party_query_maps_cluster_and_buckets() {
        let query = build_party_query(party_request()).unwrap();

        assert!((query.average - 6.66641581).abs() < 1e-8);
        assert!((query.usersrated - 139.517327).abs() < 1e-6);
        assert_eq!(query.playingtime, Some(45.0));
        assert_eq!(query.age, Some(18.0));
        assert_eq!(query.yearpublished, None);
        assert_eq!(query.minplayers, 2);
        assert_eq!(query.ratio_filter, 0.9);
        assert_eq!(query.user_id, "jeff");
        assert_eq!(query.predict_option, PredictOption::Both);
    }

    #[test]
    fn test_party_query_drops_blank_tag_filters() {
        let query = build_party_query(party_request()).unwrap();
        assert_eq!(query.boardgamecategory, Some("Economic".to_string()));
        assert_eq!(query.boardgamemechanic, None);
        assert_eq!(query.boardgamefamily, None);
    }

    #[test]
    fn test_party_query_requires_user_id() {
        let request = PartyRequest {
            user_id: "   ".to_string(),
            ..party_request()
        };
        let err = build_party_query(request).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("BGG user ID"));
    }

    #[test]
    fn test_party_query_bounds_ratio() {
        let request = PartyRequest {
            ratio: 95,
            ..party_request()
        };
        assert!(matches!(
            build_party_query(request).unwrap_err(),
            AppError::InvalidInput(_)
        ));

        let request = PartyRequest {
            ratio: 5,
            ..party_request()
        };
        assert!(matches!(
            build_party_query(request).unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_party_query_unknown_label_is_invalid_input() {
        let request = PartyRequest {
            playingtime: "Forever".to_string(),
            ..party_request()
        };
        assert!(matches!(
            build_party_query(request).unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_party_query_unknown_cluster_is_internal() {
        let request = PartyRequest {
            cluster: "Sleepers → Games nobody rated yet".to_string(),
            ..party_request()
        };
        assert!(matches!(
            build_party_query(request).unwrap_err(),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_filter_query_has_no_user_dimensions() {
        let query = build_filter_query(FilterRequest {
            cluster: "Must Have → Popular well-rated classics".to_string(),
            playingtime: "Any".to_string(),
            minplayers: 1,
            age: "Child (4-12 years)".to_string(),
            yearpublished: "New (2020+)".to_string(),
        })
        .unwrap();

        assert_eq!(query.average, 7.65193971);
        assert_eq!(query.usersrated, 62695.8406);
        assert_eq!(query.playingtime, None);
        assert_eq!(query.age, Some(8.0));
        assert_eq!(query.yearpublished, Some(2020.0));
    }
}
