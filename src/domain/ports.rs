use crate::domain::model::{BatchReport, ProductTitle, RelatedKeywordRecord, SupplyCount};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
}

/// Related-keyword metrics for a seed. Implementations do no filtering.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn related_keywords(&self, seed: &str) -> Result<Vec<RelatedKeywordRecord>>;
}

/// Number of marketplace listings for a keyword.
#[async_trait]
pub trait SupplySource: Send + Sync {
    async fn supply_count(&self, keyword: &str) -> Result<SupplyCount>;
}

/// Seed keyword in, display-ready titles out. Never fails; the worst case
/// is a single placeholder entry.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, seed: &str) -> Vec<ProductTitle>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, titles: Vec<String>) -> Result<BatchReport>;
    async fn load(&self, report: BatchReport) -> Result<String>;
}

#[async_trait]
impl<T: KeywordSource + ?Sized> KeywordSource for std::sync::Arc<T> {
    async fn related_keywords(&self, seed: &str) -> Result<Vec<RelatedKeywordRecord>> {
        (**self).related_keywords(seed).await
    }
}

#[async_trait]
impl<T: SupplySource + ?Sized> SupplySource for std::sync::Arc<T> {
    async fn supply_count(&self, keyword: &str) -> Result<SupplyCount> {
        (**self).supply_count(keyword).await
    }
}

#[async_trait]
impl<T: Recommender + ?Sized> Recommender for Box<T> {
    async fn recommend(&self, seed: &str) -> Vec<ProductTitle> {
        (**self).recommend(seed).await
    }
}
