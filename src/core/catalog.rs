use crate::domain::model::ProductTitle;
use crate::domain::ports::Recommender;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const MISSING_SEED_MESSAGE: &str = "키워드 DB 없음";

/// Offline keyword database entry for one seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub seed: String,
    #[serde(default)]
    pub mid_keywords: Vec<String>,
    #[serde(default)]
    pub attribute_keywords: Vec<String>,
    #[serde(default)]
    pub usage_keywords: Vec<String>,
}

impl CatalogEntry {
    fn new(seed: &str, mids: &[&str], attrs: &[&str], uses: &[&str]) -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            seed: seed.to_string(),
            mid_keywords: owned(mids),
            attribute_keywords: owned(attrs),
            usage_keywords: owned(uses),
        }
    }
}

pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            "손풍기",
            &["무선 손풍기", "탁상용 손풍기", "손목 손풍기", "휴대 손풍기"],
            &["저소음", "강풍", "미니", "무소음", "초소형"],
            &["사무실용", "캠핑용", "공부방", "출퇴근", "야외활동"],
        ),
        CatalogEntry::new(
            "보냉백",
            &["미니 보냉백", "피크닉 보냉가방", "아기 이유식 보냉백"],
            &["가볍고", "이중단열", "접이식"],
            &["도시락용", "여행용", "캠핑용"],
        ),
    ]
}

/// Recommends titles from a static catalog without any remote calls.
///
/// Titles are `"{mid} {attribute} {usage} {seed}"` over the catalog lists
/// in order; combinations longer than the cap are skipped rather than cut.
#[derive(Debug, Clone)]
pub struct CatalogRecommender {
    entries: Vec<CatalogEntry>,
    max_length: usize,
    max_titles: usize,
    placeholder: String,
}

impl CatalogRecommender {
    pub fn new(
        entries: Vec<CatalogEntry>,
        max_length: usize,
        max_titles: usize,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            entries,
            max_length,
            max_titles,
            placeholder: placeholder.into(),
        }
    }

    pub fn seeds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.seed.as_str())
    }

    pub fn generate(&self, seed: &str) -> Vec<ProductTitle> {
        let Some(entry) = self.entries.iter().find(|entry| entry.seed == seed) else {
            return vec![MISSING_SEED_MESSAGE.to_string()];
        };

        let mut titles = Vec::new();
        for mid in &entry.mid_keywords {
            for attr in &entry.attribute_keywords {
                for usage in &entry.usage_keywords {
                    let title = format!("{} {} {} {}", mid, attr, usage, seed);
                    if title.chars().count() <= self.max_length {
                        titles.push(title);
                    }
                    if titles.len() >= self.max_titles {
                        return titles;
                    }
                }
            }
        }

        if titles.is_empty() {
            // 全部超過長度
            return vec![self.placeholder.clone()];
        }
        titles
    }
}

#[async_trait]
impl Recommender for CatalogRecommender {
    async fn recommend(&self, seed: &str) -> Vec<ProductTitle> {
        self.generate(seed)
    }
}
