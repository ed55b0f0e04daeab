//! Client for the Edamam food database parser API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    Error,
    food_source::{FoodLookup, FoodMatch},
};

/// Edamam client configuration.
#[derive(Debug, Clone)]
pub struct EdamamConfig {
    /// The Edamam application ID.
    pub app_id: String,
    /// The Edamam application key.
    pub app_key: String,
    /// Base URL for the API (default: <https://api.edamam.com>).
    pub base_url: String,
    /// How long to wait for a single lookup before giving up.
    pub timeout: Duration,
}

impl Default for EdamamConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            base_url: "https://api.edamam.com".to_owned(),
            timeout: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParserResponse {
    #[serde(default)]
    hints: Vec<Hint>,
}

#[derive(Debug, Deserialize)]
struct Hint {
    food: Food,
}

#[derive(Debug, Deserialize)]
struct Food {
    label: Option<String>,
    category: Option<String>,
}

/// Looks up foods with the Edamam food database.
#[derive(Debug, Clone)]
pub struct EdamamClient {
    config: EdamamConfig,
    http_client: reqwest::Client,
}

impl EdamamClient {
    /// Create a new client. Every request is bounded by `config.timeout`.
    ///
    /// # Errors
    /// Returns [Error::FoodLookup] if the HTTP client cannot be built.
    pub fn new(config: EdamamConfig) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| Error::FoodLookup(error.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl FoodLookup for EdamamClient {
    async fn lookup(&self, term: &str) -> Result<Option<FoodMatch>, Error> {
        let url = format!("{}/api/food-database/v2/parser", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
                ("ingr", term),
                ("nutrition-type", "logging"),
            ])
            .send()
            .await
            .map_err(|error| {
                // The URL holds the app key, keep it out of the logs.
                let error = error.without_url();
                Error::FoodLookup(format!("request for \"{term}\" failed: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FoodLookup(format!(
                "request for \"{term}\" returned HTTP {status}"
            )));
        }

        let body: ParserResponse = response.json().await.map_err(|error| {
            let error = error.without_url();
            Error::FoodLookup(format!("could not parse response for \"{term}\": {error}"))
        })?;

        Ok(body.hints.into_iter().next().map(|hint| FoodMatch {
            label: hint.food.label,
            category: hint.food.category,
        }))
    }
}
