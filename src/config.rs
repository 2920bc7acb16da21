use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Remote prediction API base URL
    #[serde(default = "default_prediction_api_url")]
    pub prediction_api_url: String,

    /// BoardGameGeek XML API 2 base URL (hot list, thing lookups)
    #[serde(default = "default_bgg_api_url")]
    pub bgg_api_url: String,

    /// BoardGameGeek legacy XML API base URL (full game records)
    #[serde(default = "default_bgg_legacy_api_url")]
    pub bgg_legacy_api_url: String,

    /// Directory holding the category/mechanic/family option tables
    #[serde(default = "default_reference_data_dir")]
    pub reference_data_dir: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_prediction_api_url() -> String {
    "https://api-326525614739.europe-west1.run.app".to_string()
}

fn default_bgg_api_url() -> String {
    "https://boardgamegeek.com/xmlapi2".to_string()
}

fn default_bgg_legacy_api_url() -> String {
    "https://boardgamegeek.com/xmlapi".to_string()
}

fn default_reference_data_dir() -> String {
    "reference_data".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        // Base URLs are joined with path fragments; strip trailing slashes
        // once here so operator-supplied values behave like the defaults.
        config.prediction_api_url = trim_trailing_slashes(config.prediction_api_url);
        config.bgg_api_url = trim_trailing_slashes(config.bgg_api_url);
        config.bgg_legacy_api_url = trim_trailing_slashes(config.bgg_legacy_api_url);

        Ok(config)
    }
}

fn trim_trailing_slashes(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
