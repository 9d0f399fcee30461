use crate::config::toml_config::SupplySourceConfig;
use crate::domain::model::SupplyCount;
use crate::domain::ports::SupplySource;
use crate::utils::error::{RecommendError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ShoppingSearchResponse {
    total: Option<u64>,
}

/// Listing counts from the shopping search API.
#[derive(Debug, Clone)]
pub struct ShoppingSupplySource {
    client: Client,
    endpoint: String,
    client_id: String,
    client_secret: String,
    parameters: BTreeMap<String, String>,
}

impl ShoppingSupplySource {
    pub fn new(config: &SupplySourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            parameters: config.parameters.clone(),
        })
    }
}

#[async_trait]
impl SupplySource for ShoppingSupplySource {
    async fn supply_count(&self, keyword: &str) -> Result<SupplyCount> {
        tracing::debug!("Requesting supply count for '{}'", keyword);

        let mut query: Vec<(&str, &str)> = vec![("query", keyword)];
        query.extend(
            self.parameters
                .iter()
                .filter(|(name, _)| name.as_str() != "query")
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecommendError::SourceError {
                source_name: "supply source".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body: ShoppingSearchResponse = response.json().await?;
        let total = body.total.ok_or_else(|| RecommendError::ProcessingError {
            message: format!("supply response for '{}' has no total", keyword),
        })?;

        tracing::debug!("Supply count for '{}': {}", keyword, total);
        Ok(SupplyCount(total))
    }
}
