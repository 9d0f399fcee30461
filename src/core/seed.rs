use crate::domain::model::BatchRow;

/// Picks a seed keyword out of a free-text product title.
///
/// The first vocabulary term found as a substring wins, so vocabulary order
/// decides ties. Without a match the first whitespace-delimited token is
/// used.
#[derive(Debug, Clone)]
pub struct SeedExtractor {
    vocabulary: Vec<String>,
}

impl SeedExtractor {
    pub fn new<I, T>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            vocabulary: vocabulary
                .into_iter()
                .map(Into::into)
                .filter(|term: &String| !term.is_empty())
                .collect(),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn extract(&self, title: &str) -> String {
        if let Some(term) = self.vocabulary.iter().find(|term| title.contains(term.as_str())) {
            return term.clone();
        }

        title
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn extract_row(&self, title: &str) -> BatchRow {
        BatchRow {
            original_title: title.to_string(),
            seed: self.extract(title),
            titles: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SeedExtractor {
        SeedExtractor::new(["손풍기", "보냉백"])
    }

    #[test]
    fn test_vocabulary_match_wins() {
        assert_eq!(extractor().extract("무선 손풍기 미니"), "손풍기");
        assert_eq!(extractor().extract("피크닉 보냉백 대용량"), "보냉백");
    }

    #[test]
    fn test_first_vocabulary_entry_breaks_ties() {
        let title = "보냉백 증정 손풍기";
        assert_eq!(extractor().extract(title), "손풍기");
        assert_eq!(SeedExtractor::new(["보냉백", "손풍기"]).extract(title), "보냉백");
    }

    #[test]
    fn test_falls_back_to_first_token() {
        assert_eq!(extractor().extract("알수없는상품"), "알수없는상품");
        assert_eq!(extractor().extract("  텀블러 500ml 보온"), "텀블러");
    }

    #[test]
    fn test_empty_title_yields_empty_seed() {
        assert_eq!(extractor().extract(""), "");
        assert_eq!(extractor().extract("   "), "");
    }

    #[test]
    fn test_empty_vocabulary_terms_are_ignored() {
        let extractor = SeedExtractor::new(["", "보냉백"]);
        assert_eq!(extractor.vocabulary().len(), 1);
        assert_eq!(extractor.extract("무선 손풍기"), "무선");
    }
}
