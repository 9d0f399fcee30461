// Application wiring: turns an AppConfig into ready-to-use components.

use crate::adapters::cache::{CachedKeywordSource, CachedSupplySource};
use crate::adapters::keyword_source::SearchAdKeywordSource;
use crate::adapters::supply_source::ShoppingSupplySource;
use crate::config::toml_config::AppConfig;
use crate::core::catalog::CatalogRecommender;
use crate::core::qualifier::KeywordQualifier;
use crate::core::recommender::KeywordTitleRecommender;
use crate::core::seed::SeedExtractor;
use crate::domain::ports::{KeywordSource, Recommender, SupplySource};
use crate::utils::error::Result;
use std::sync::Arc;

pub fn build_extractor(config: &AppConfig) -> SeedExtractor {
    SeedExtractor::new(config.seed.vocabulary.iter().cloned())
}

pub fn build_catalog_recommender(config: &AppConfig) -> CatalogRecommender {
    CatalogRecommender::new(
        config.catalog.clone(),
        config.policy.title_max_length,
        config.policy.max_keywords,
        config.policy.placeholder.clone(),
    )
}

/// Builds the online recommender from the two remote sources, wrapped in
/// read-through caches when `[cache] enabled` is set.
pub fn build_online_recommender(config: &AppConfig) -> Result<Box<dyn Recommender>> {
    config.validate_online()?;
    let policy = config.policy.clone();

    // validate_online 已確認兩個來源都存在
    let keyword_config = crate::utils::validation::validate_required_field(
        "keyword_source",
        &config.keyword_source,
    )?;
    let supply_config =
        crate::utils::validation::validate_required_field("supply_source", &config.supply_source)?;

    let keyword_source = SearchAdKeywordSource::new(keyword_config)?;
    let supply_source = ShoppingSupplySource::new(supply_config)?;

    let (keywords, supply): (Arc<dyn KeywordSource>, Arc<dyn SupplySource>) =
        if config.cache.enabled {
            (
                Arc::new(CachedKeywordSource::new(keyword_source)),
                Arc::new(CachedSupplySource::new(supply_source)),
            )
        } else {
            (Arc::new(keyword_source), Arc::new(supply_source))
        };

    tracing::info!(
        "Online recommender ready (gate: {:?}, cache: {})",
        policy.competition_gate,
        config.cache.enabled
    );

    Ok(Box::new(KeywordTitleRecommender::new(KeywordQualifier::new(
        keywords, supply, policy,
    ))))
}

pub fn build_recommender(config: &AppConfig, offline: bool) -> Result<Box<dyn Recommender>> {
    if offline {
        tracing::info!("Offline mode: using catalog of {} seeds", config.catalog.len());
        return Ok(Box::new(build_catalog_recommender(config)));
    }
    build_online_recommender(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RecommendError;

    #[tokio::test]
    async fn test_offline_build_uses_catalog() {
        let config = AppConfig::default();
        let recommender = build_recommender(&config, true).unwrap();

        let titles = recommender.recommend("보냉백").await;
        assert_eq!(titles.len(), 10);
        assert!(titles.iter().all(|t| t.ends_with("보냉백")));
    }

    #[test]
    fn test_online_build_requires_sources() {
        let config = AppConfig::default();
        assert!(matches!(
            build_recommender(&config, false),
            Err(RecommendError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_extractor_follows_configured_vocabulary_order() {
        let config = AppConfig::from_toml_str("[seed]\nvocabulary = [\"보냉백\", \"손풍기\"]\n").unwrap();
        let extractor = build_extractor(&config);
        assert_eq!(extractor.extract("손풍기 보냉백 세트"), "보냉백");
    }
}
