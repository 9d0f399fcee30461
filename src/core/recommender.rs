use crate::core::composer::TitleComposer;
use crate::core::qualifier::KeywordQualifier;
use crate::domain::model::ProductTitle;
use crate::domain::ports::{KeywordSource, Recommender, SupplySource};
use async_trait::async_trait;

/// Online recommendation: qualify related keywords, then compose titles.
pub struct KeywordTitleRecommender<K: KeywordSource, S: SupplySource> {
    qualifier: KeywordQualifier<K, S>,
    composer: TitleComposer,
}

impl<K: KeywordSource, S: SupplySource> KeywordTitleRecommender<K, S> {
    pub fn new(qualifier: KeywordQualifier<K, S>) -> Self {
        let composer = TitleComposer::from_policy(qualifier.policy());
        Self {
            qualifier,
            composer,
        }
    }
}

#[async_trait]
impl<K: KeywordSource, S: SupplySource> Recommender for KeywordTitleRecommender<K, S> {
    async fn recommend(&self, seed: &str) -> Vec<ProductTitle> {
        let keywords = self.qualifier.qualify(seed).await;
        self.composer.compose(&keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::policy::QualificationPolicy;
    use crate::domain::model::{Competition, RelatedKeywordRecord, SupplyCount};
    use crate::utils::error::Result;

    struct OneRecord;

    #[async_trait]
    impl KeywordSource for OneRecord {
        async fn related_keywords(&self, _seed: &str) -> Result<Vec<RelatedKeywordRecord>> {
            Ok(vec![RelatedKeywordRecord {
                text: "미니 손풍기".to_string(),
                pc_volume: 100,
                mobile_volume: 200,
                competition: Competition::Low,
                avg_depth: Some(1.0),
            }])
        }
    }

    struct FixedSupply(u64);

    #[async_trait]
    impl SupplySource for FixedSupply {
        async fn supply_count(&self, _keyword: &str) -> Result<SupplyCount> {
            Ok(SupplyCount(self.0))
        }
    }

    #[tokio::test]
    async fn test_recommends_composed_titles() {
        let recommender = KeywordTitleRecommender::new(KeywordQualifier::new(
            OneRecord,
            FixedSupply(500),
            QualificationPolicy::default(),
        ));

        assert_eq!(
            recommender.recommend("손풍기").await,
            vec!["미니 손풍기 무선 초소형 강풍 휴대용".to_string()]
        );
    }

    #[tokio::test]
    async fn test_recommends_placeholder_when_nothing_qualifies() {
        let recommender = KeywordTitleRecommender::new(KeywordQualifier::new(
            OneRecord,
            FixedSupply(50000),
            QualificationPolicy::default(),
        ));

        assert_eq!(
            recommender.recommend("손풍기").await,
            vec![QualificationPolicy::default().placeholder]
        );
    }
}
