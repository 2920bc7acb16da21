use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One game as returned by the prediction API.
///
/// The upstream contract only guarantees a list of objects; every field is
/// optional here so one sparse or mistyped entry degrades instead of
/// clearing the whole result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSummary {
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
}

impl GameSummary {
    /// Builds a summary from one upstream JSON object.
    ///
    /// The legacy feed names the id `@objectid`; newer payloads use `id`.
    /// Numbers showing up where strings are expected are stringified
    /// rather than dropped.
    pub fn from_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let text = |key: &str| {
            object.get(key).and_then(|value| match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        };

        Self {
            object_id: text("@objectid").or_else(|| text("id")),
            name: text("name"),
            thumbnail: text("thumbnail"),
            image: text("image"),
            description: text("description"),
            age: object.get("age").and_then(serde_json::Value::as_f64),
        }
    }
}

/// One entry of the home banner's hot-games strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotGame {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// Hot-games strip, stamped with the fetch time since the upstream list
/// is refreshed server-side on each request.
#[derive(Debug, Clone, Serialize)]
pub struct HotList {
    pub games: Vec<HotGame>,
    pub fetched_at: DateTime<Utc>,
}

/// Flat, uniformly-typed view of one legacy BGG game record.
///
/// String fields default to empty and list fields to empty lists when the
/// source lacks them; numeric fields are coerced to floats or left absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameDisplayRecord {
    pub object_id: String,
    pub primary_name: String,
    /// All recorded names, primary included, in source order.
    pub names: Vec<String>,
    pub description: String,
    pub thumbnail: String,
    pub image: String,
    pub year_published: Option<f64>,
    pub min_players: Option<f64>,
    pub max_players: Option<f64>,
    pub playing_time: Option<f64>,
    pub min_playtime: Option<f64>,
    pub max_playtime: Option<f64>,
    pub age: Option<f64>,
    /// `statistics/ratings/average` from the source record.
    pub average: Option<f64>,
    /// `statistics/ratings/averageweight` from the source record.
    pub average_weight: Option<f64>,
    pub categories: Vec<String>,
    pub mechanics: Vec<String>,
    pub families: Vec<String>,
    pub subdomains: Vec<String>,
    pub publishers: Vec<String>,
    pub designers: Vec<String>,
    pub artists: Vec<String>,
    pub honors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_summary_from_full_object() {
        let object = as_object(json!({
            "@objectid": "224517",
            "name": "Brass: Birmingham",
            "thumbnail": "https://cf.geekdo-images.com/thumb.jpg",
            "image": "https://cf.geekdo-images.com/full.jpg",
            "description": "An economic strategy game.",
            "age": 14
        }));

        let summary = GameSummary::from_object(&object);
        assert_eq!(summary.object_id, Some("224517".to_string()));
        assert_eq!(summary.name, Some("Brass: Birmingham".to_string()));
        assert_eq!(summary.age, Some(14.0));
    }

    #[test]
    fn test_summary_falls_back_to_plain_id() {
        let object = as_object(json!({ "id": 161936, "name": "Pandemic Legacy" }));
        let summary = GameSummary::from_object(&object);
        assert_eq!(summary.object_id, Some("161936".to_string()));
    }

    #[test]
    fn test_summary_tolerates_sparse_object() {
        let summary = GameSummary::from_object(&as_object(json!({})));
        assert_eq!(summary, GameSummary {
            object_id: None,
            name: None,
            thumbnail: None,
            image: None,
            description: None,
            age: None,
        });
    }

    #[test]
    fn test_summary_drops_mistyped_fields() {
        let object = as_object(json!({
            "name": ["not", "a", "string"],
            "age": "not a number"
        }));
        let summary = GameSummary::from_object(&object);
        assert_eq!(summary.name, None);
        assert_eq!(summary.age, None);
    }
}
