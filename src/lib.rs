pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    cache::{CachedKeywordSource, CachedSupplySource},
    keyword_source::SearchAdKeywordSource,
    supply_source::ShoppingSupplySource,
};
pub use config::{
    cli::LocalStorage,
    policy::{CompetitionGate, QualificationPolicy},
    toml_config::AppConfig,
};
pub use crate::core::{
    batch::BatchOrchestrator,
    catalog::CatalogRecommender,
    composer::TitleComposer,
    engine::RecommendEngine,
    pipeline::RecommendationPipeline,
    qualifier::KeywordQualifier,
    recommender::KeywordTitleRecommender,
    seed::SeedExtractor,
};
pub use utils::error::{RecommendError, Result};
