use crate::config::policy::QualificationPolicy;
use crate::core::catalog::{default_catalog, CatalogEntry};
use crate::utils::error::{RecommendError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_KEYWORD_ENDPOINT: &str = "https://api.searchad.naver.com";
pub const DEFAULT_SUPPLY_ENDPOINT: &str = "https://openapi.naver.com/v1/search/shop.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub policy: QualificationPolicy,
    pub keyword_source: Option<KeywordSourceConfig>,
    pub supply_source: Option<SupplySourceConfig>,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_catalog")]
    pub catalog: Vec<CatalogEntry>,
}

/// Search-ad keyword tool credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSourceConfig {
    #[serde(default = "default_keyword_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    pub secret_key: String,
    pub customer_id: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Shopping search credentials plus the fixed query parameters sent with
/// every supply lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplySourceConfig {
    #[serde(default = "default_supply_endpoint")]
    pub endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_supply_parameters")]
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Order matters: the first term found in a title wins.
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
}

fn default_keyword_endpoint() -> String {
    DEFAULT_KEYWORD_ENDPOINT.to_string()
}

fn default_supply_endpoint() -> String {
    DEFAULT_SUPPLY_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_supply_parameters() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("display".to_string(), "1".to_string()),
        ("sort".to_string(), "sim".to_string()),
    ])
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_catalog().into_iter().map(|entry| entry.seed).collect(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: QualificationPolicy::default(),
            keyword_source: None,
            supply_source: None,
            seed: SeedConfig::default(),
            cache: CacheConfig::default(),
            catalog: default_catalog(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RecommendError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NAVER_AD_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RecommendError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Both remote sources are needed for online recommendations.
    pub fn validate_online(&self) -> Result<()> {
        let keyword = crate::utils::validation::validate_required_field(
            "keyword_source",
            &self.keyword_source,
        )?;
        let supply = crate::utils::validation::validate_required_field(
            "supply_source",
            &self.supply_source,
        )?;

        validate_url("keyword_source.endpoint", &keyword.endpoint)?;
        validate_non_empty_string("keyword_source.api_key", &keyword.api_key)?;
        validate_non_empty_string("keyword_source.secret_key", &keyword.secret_key)?;
        validate_non_empty_string("keyword_source.customer_id", &keyword.customer_id)?;
        validate_positive_number("keyword_source.timeout_seconds", keyword.timeout_seconds, 1)?;

        validate_url("supply_source.endpoint", &supply.endpoint)?;
        validate_non_empty_string("supply_source.client_id", &supply.client_id)?;
        validate_non_empty_string("supply_source.client_secret", &supply.client_secret)?;
        validate_positive_number("supply_source.timeout_seconds", supply.timeout_seconds, 1)?;

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.policy.validate()?;

        for term in &self.seed.vocabulary {
            validate_non_empty_string("seed.vocabulary", term)?;
        }
        for entry in &self.catalog {
            validate_non_empty_string("catalog.seed", &entry.seed)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::policy::CompetitionGate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ONLINE_CONFIG: &str = r#"
[policy]
title_max_length = 49
descriptor_suffix = "접이식 경량 휴대용"

[policy.competition_gate]
kind = "max_depth"
threshold = 2.5

[keyword_source]
api_key = "key"
secret_key = "secret"
customer_id = "1234"

[supply_source]
client_id = "client"
client_secret = "client-secret"

[supply_source.parameters]
display = "1"
category = "50000008"

[seed]
vocabulary = ["보냉백", "손풍기"]

[cache]
enabled = false
"#;

    #[test]
    fn test_parse_online_config() {
        let config = AppConfig::from_toml_str(ONLINE_CONFIG).unwrap();

        assert_eq!(config.policy.title_max_length, 49);
        assert_eq!(
            config.policy.competition_gate,
            CompetitionGate::MaxDepth { threshold: 2.5 }
        );
        let keyword = config.keyword_source.as_ref().unwrap();
        assert_eq!(keyword.endpoint, DEFAULT_KEYWORD_ENDPOINT);
        assert_eq!(keyword.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        let supply = config.supply_source.as_ref().unwrap();
        assert_eq!(supply.parameters.get("category").unwrap(), "50000008");
        assert_eq!(config.seed.vocabulary, vec!["보냉백", "손풍기"]);
        assert!(!config.cache.enabled);
        assert_eq!(config.catalog.len(), 2);
        assert!(config.validate().is_ok());
        assert!(config.validate_online().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults_and_is_offline_only() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.policy, QualificationPolicy::default());
        assert_eq!(config.seed.vocabulary, vec!["손풍기", "보냉백"]);
        assert!(config.cache.enabled);
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.validate_online(),
            Err(RecommendError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TITLE_RECOMMENDER_TEST_AD_KEY", "from-env");

        let config = AppConfig::from_toml_str(
            r#"
[keyword_source]
api_key = "${TITLE_RECOMMENDER_TEST_AD_KEY}"
secret_key = "${TITLE_RECOMMENDER_TEST_UNSET}"
customer_id = "1"
"#,
        )
        .unwrap();

        let keyword = config.keyword_source.unwrap();
        assert_eq!(keyword.api_key, "from-env");
        assert_eq!(keyword.secret_key, "${TITLE_RECOMMENDER_TEST_UNSET}");

        std::env::remove_var("TITLE_RECOMMENDER_TEST_AD_KEY");
    }

    #[test]
    fn test_invalid_endpoint_fails_online_validation() {
        let content = ONLINE_CONFIG.replace(
            "[supply_source]\n",
            "[supply_source]\nendpoint = \"ftp://shop.example.com\"\n",
        );
        let config = AppConfig::from_toml_str(&content).unwrap();
        assert!(config.validate_online().is_err());
    }

    #[test]
    fn test_blank_vocabulary_term_is_rejected() {
        let config = AppConfig::from_toml_str("[seed]\nvocabulary = [\"손풍기\", \" \"]\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                r#"
[[catalog]]
seed = "텀블러"
mid_keywords = ["보온 텀블러"]
attribute_keywords = ["대용량"]
usage_keywords = ["사무실용"]
"#
                .as_bytes(),
            )
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog[0].seed, "텀블러");
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = AppConfig::from_toml_str("[policy\n").unwrap_err();
        assert!(matches!(err, RecommendError::ConfigValidationError { .. }));
    }
}
