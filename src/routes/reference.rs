use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::buckets::{AGE, PLAYING_TIME, YEAR_PUBLISHED};
use crate::models::clusters;
use crate::services::prediction::PredictOption;
use crate::state::AppState;

/// The closed filter vocabularies the front end builds its select
/// widgets from. Labels are served in table order.
#[derive(Debug, Serialize)]
pub struct FilterVocabulary {
    pub playing_time: Vec<&'static str>,
    pub age: Vec<&'static str>,
    pub year_published: Vec<&'static str>,
    pub clusters: Vec<&'static str>,
    pub predict_options: Vec<PredictOption>,
}

pub async fn filters() -> Json<FilterVocabulary> {
    Json(FilterVocabulary {
        playing_time: PLAYING_TIME.labels().collect(),
        age: AGE.labels().collect(),
        year_published: YEAR_PUBLISHED.labels().collect(),
        clusters: clusters::descriptions().collect(),
        predict_options: vec![
            PredictOption::Both,
            PredictOption::PlayOwnedGame,
            PredictOption::BuyNewGame,
        ],
    })
}

/// Free-text tag suggestions loaded from the reference tables.
#[derive(Debug, Serialize)]
pub struct TagOptions {
    pub categories: Vec<String>,
    pub mechanics: Vec<String>,
    pub families: Vec<String>,
}

pub async fn tags(State(state): State<AppState>) -> Json<TagOptions> {
    Json(TagOptions {
        categories: state.reference.categories.clone(),
        mechanics: state.reference.mechanics.clone(),
        families: state.reference.families.clone(),
    })
}
