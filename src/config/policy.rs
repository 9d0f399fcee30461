use crate::utils::error::{RecommendError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VOLUME_CEILING: u64 = 3000;
pub const DEFAULT_SUPPLY_CEILING: u64 = 10000;
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
pub const DEFAULT_TITLE_MAX_LENGTH: usize = 45;
pub const DEFAULT_DEPTH_THRESHOLD: f64 = 3.0;
pub const DEFAULT_DESCRIPTOR_SUFFIX: &str = "무선 초소형 강풍 휴대용";
pub const DEFAULT_PLACEHOLDER: &str = "조건에 맞는 키워드 없음";

/// Which competition check a deployment uses. Never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompetitionGate {
    /// Accept only records whose competition indicator is low.
    #[default]
    Low,
    /// Accept only records whose average search depth is at most `threshold`.
    MaxDepth {
        #[serde(default = "default_depth_threshold")]
        threshold: f64,
    },
}

fn default_depth_threshold() -> f64 {
    DEFAULT_DEPTH_THRESHOLD
}

/// Thresholds and output shaping for one deployment, chosen once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationPolicy {
    pub volume_ceiling: u64,
    pub competition_gate: CompetitionGate,
    pub supply_ceiling: u64,
    pub max_keywords: usize,
    pub title_max_length: usize,
    pub descriptor_suffix: String,
    pub placeholder: String,
}

impl Default for QualificationPolicy {
    fn default() -> Self {
        Self {
            volume_ceiling: DEFAULT_VOLUME_CEILING,
            competition_gate: CompetitionGate::default(),
            supply_ceiling: DEFAULT_SUPPLY_CEILING,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            title_max_length: DEFAULT_TITLE_MAX_LENGTH,
            descriptor_suffix: DEFAULT_DESCRIPTOR_SUFFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Validate for QualificationPolicy {
    fn validate(&self) -> Result<()> {
        validate_positive_number("policy.volume_ceiling", self.volume_ceiling, 1)?;
        validate_positive_number("policy.supply_ceiling", self.supply_ceiling, 1)?;
        validate_range("policy.max_keywords", self.max_keywords, 1, DEFAULT_MAX_KEYWORDS)?;
        validate_positive_number("policy.title_max_length", self.title_max_length, 1)?;
        validate_non_empty_string("policy.placeholder", &self.placeholder)?;

        // placeholder 也會出現在標題欄位，同樣受長度上限限制
        let placeholder_length = self.placeholder.chars().count();
        if placeholder_length > self.title_max_length {
            return Err(RecommendError::InvalidConfigValueError {
                field: "policy.placeholder".to_string(),
                value: self.placeholder.clone(),
                reason: format!(
                    "{} characters exceeds title_max_length {}",
                    placeholder_length, self.title_max_length
                ),
            });
        }

        if let CompetitionGate::MaxDepth { threshold } = self.competition_gate {
            validate_range("policy.competition_gate.threshold", threshold, 0.0, 100.0)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_low_competition_deployment() {
        let policy = QualificationPolicy::default();
        assert_eq!(policy.volume_ceiling, 3000);
        assert_eq!(policy.supply_ceiling, 10000);
        assert_eq!(policy.max_keywords, 10);
        assert_eq!(policy.title_max_length, 45);
        assert_eq!(policy.competition_gate, CompetitionGate::Low);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_parse_depth_gate_from_toml() {
        let policy: QualificationPolicy = toml::from_str(
            r#"
title_max_length = 49

[competition_gate]
kind = "max_depth"
"#,
        )
        .unwrap();

        assert_eq!(policy.title_max_length, 49);
        assert_eq!(
            policy.competition_gate,
            CompetitionGate::MaxDepth { threshold: 3.0 }
        );
        assert_eq!(policy.descriptor_suffix, DEFAULT_DESCRIPTOR_SUFFIX);
    }

    #[test]
    fn test_placeholder_must_fit_title_cap() {
        let policy = QualificationPolicy {
            title_max_length: 5,
            ..QualificationPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(RecommendError::InvalidConfigValueError { ref field, .. }) if field == "policy.placeholder"
        ));

        // 13 個字元剛好等於上限
        let policy = QualificationPolicy {
            title_max_length: 13,
            ..QualificationPolicy::default()
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_default_gate_is_low() {
        assert_eq!(CompetitionGate::default(), CompetitionGate::Low);
    }

    #[test]
    fn test_rejects_keyword_cap_above_ten() {
        let policy = QualificationPolicy {
            max_keywords: 11,
            ..QualificationPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = QualificationPolicy {
            competition_gate: CompetitionGate::MaxDepth { threshold: -0.5 },
            ..QualificationPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
