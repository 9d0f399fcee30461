use crate::core::seed::SeedExtractor;
use crate::domain::model::{BatchRow, ProductTitle};
use crate::domain::ports::Recommender;
use std::collections::HashMap;

/// Runs seed extraction and recommendation for each input title.
pub struct BatchOrchestrator<R: Recommender> {
    extractor: SeedExtractor,
    recommender: R,
}

impl<R: Recommender> BatchOrchestrator<R> {
    pub fn new(extractor: SeedExtractor, recommender: R) -> Self {
        Self {
            extractor,
            recommender,
        }
    }

    /// Rows come back in input order. Identical seeds within one call are
    /// recommended once.
    pub async fn process(&self, titles: &[String]) -> Vec<BatchRow> {
        let mut seen: HashMap<String, Vec<ProductTitle>> = HashMap::new();
        let mut rows = Vec::with_capacity(titles.len());

        for (index, title) in titles.iter().enumerate() {
            let mut row = self.extractor.extract_row(title);

            row.titles = match seen.get(&row.seed).cloned() {
                Some(cached) => cached,
                None => {
                    let recommended = self.recommender.recommend(&row.seed).await;
                    seen.insert(row.seed.clone(), recommended.clone());
                    recommended
                }
            };

            tracing::debug!(
                "Row {}: '{}' -> seed '{}' ({} titles)",
                index + 1,
                row.original_title,
                row.seed,
                row.titles.len()
            );
            rows.push(row);
        }

        tracing::info!(
            "Processed {} rows with {} distinct seeds",
            rows.len(),
            seen.len()
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct EchoRecommender {
        seeds: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Recommender for EchoRecommender {
        async fn recommend(&self, seed: &str) -> Vec<ProductTitle> {
            self.seeds.lock().unwrap().push(seed.to_string());
            vec![format!("{} 1", seed), format!("{} 2", seed)]
        }
    }

    #[tokio::test]
    async fn test_rows_keep_input_order_and_join_titles() {
        let recommender = EchoRecommender::default();
        let orchestrator =
            BatchOrchestrator::new(SeedExtractor::new(["손풍기", "보냉백"]), recommender.clone());

        let titles = vec![
            "무선 손풍기 미니".to_string(),
            "피크닉 보냉백".to_string(),
            "탁상용 손풍기".to_string(),
        ];
        let rows = orchestrator.process(&titles).await;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].original_title, "무선 손풍기 미니");
        assert_eq!(rows[0].seed, "손풍기");
        assert_eq!(rows[0].joined_titles(), "손풍기 1; 손풍기 2");
        assert_eq!(rows[1].seed, "보냉백");
        assert_eq!(rows[2].titles, rows[0].titles);

        // 相同種子只查詢一次
        assert_eq!(
            *recommender.seeds.lock().unwrap(),
            vec!["손풍기".to_string(), "보냉백".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_title_still_produces_a_row() {
        let orchestrator =
            BatchOrchestrator::new(SeedExtractor::new(["손풍기"]), EchoRecommender::default());

        let rows = orchestrator.process(&[String::new()]).await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seed, "");
        assert_eq!(rows[0].original_title, "");
    }
}
