use crate::config::policy::QualificationPolicy;
use crate::domain::model::{ProductTitle, QualifiedKeyword};

/// Turns qualified keywords into product titles.
#[derive(Debug, Clone)]
pub struct TitleComposer {
    suffix: String,
    max_length: usize,
    placeholder: String,
}

impl TitleComposer {
    pub fn new(suffix: impl Into<String>, max_length: usize, placeholder: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            max_length,
            placeholder: placeholder.into(),
        }
    }

    pub fn from_policy(policy: &QualificationPolicy) -> Self {
        Self::new(
            policy.descriptor_suffix.clone(),
            policy.title_max_length,
            policy.placeholder.clone(),
        )
    }

    pub fn compose(&self, keywords: &[QualifiedKeyword]) -> Vec<ProductTitle> {
        if keywords.is_empty() {
            return vec![self.placeholder.clone()];
        }

        keywords
            .iter()
            .map(|keyword| {
                let title = if self.suffix.is_empty() {
                    keyword.clone()
                } else {
                    format!("{} {}", keyword, self.suffix)
                };
                truncate_chars(&title, self.max_length)
            })
            .collect()
    }
}

/// Hard cut at `max` characters; no word-boundary handling.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
