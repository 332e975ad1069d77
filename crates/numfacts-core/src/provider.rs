use async_trait::async_trait;
use reqwest::Client;

use crate::error::FactError;

pub const DEFAULT_API_URL: &str = "http://numbersapi.com";

/// Something that can hand out a random fact.
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn fetch_fact(&self) -> Result<String, FactError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FactCategory {
    #[default]
    Trivia,
    Math,
    Date,
    Year,
}

impl FactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactCategory::Trivia => "trivia",
            FactCategory::Math => "math",
            FactCategory::Date => "date",
            FactCategory::Year => "year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trivia" => Some(FactCategory::Trivia),
            "math" => Some(FactCategory::Math),
            "date" => Some(FactCategory::Date),
            "year" => Some(FactCategory::Year),
            _ => None,
        }
    }

    pub fn all() -> Vec<FactCategory> {
        vec![
            FactCategory::Trivia,
            FactCategory::Math,
            FactCategory::Date,
            FactCategory::Year,
        ]
    }

    /// The category after this one, wrapping around.
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FactCategory::Trivia => "Trivia",
            FactCategory::Math => "Math",
            FactCategory::Date => "Date",
            FactCategory::Year => "Year",
        }
    }
}

/// Client for the Numbers API, which answers `GET /random/<category>` with a
/// plain-text fact.
#[derive(Clone)]
pub struct NumbersApiClient {
    client: Client,
    base_url: String,
    category: FactCategory,
}

impl NumbersApiClient {
    pub fn new(base_url: &str, category: FactCategory) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            category,
        }
    }

    pub fn category(&self) -> FactCategory {
        self.category
    }

    pub fn random_fact_url(&self) -> String {
        format!("{}/random/{}", self.base_url, self.category.as_str())
    }
}

#[async_trait]
impl FactProvider for NumbersApiClient {
    async fn fetch_fact(&self) -> Result<String, FactError> {
        let url = self.random_fact_url();

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FactError::fetch_failed(format!(
                "{} responded with status {}",
                url,
                response.status()
            )));
        }

        let fact = response.text().await?;
        let fact = fact.trim();
        if fact.is_empty() {
            return Err(FactError::fetch_failed("empty response"));
        }
        Ok(fact.to_string())
    }
}
