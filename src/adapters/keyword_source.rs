use crate::adapters::signing::RequestSigner;
use crate::config::toml_config::KeywordSourceConfig;
use crate::domain::model::{Competition, RelatedKeywordRecord};
use crate::domain::ports::KeywordSource;
use crate::utils::error::{RecommendError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const KEYWORD_TOOL_URI: &str = "/keywordstool";

#[derive(Debug, Deserialize)]
struct KeywordToolResponse {
    #[serde(rename = "keywordList", default)]
    keyword_list: Vec<RawKeyword>,
}

/// Volumes arrive either as numbers or as strings such as `"< 10"`.
#[derive(Debug, Deserialize)]
struct RawKeyword {
    #[serde(rename = "relKeyword", default)]
    rel_keyword: String,
    #[serde(rename = "monthlyPcQcCnt", default)]
    monthly_pc_qc_cnt: Value,
    #[serde(rename = "monthlyMobileQcCnt", default)]
    monthly_mobile_qc_cnt: Value,
    #[serde(rename = "compIdx", default)]
    comp_idx: Option<String>,
    #[serde(rename = "plAvgDepth", default)]
    pl_avg_depth: Value,
}

impl From<RawKeyword> for RelatedKeywordRecord {
    fn from(raw: RawKeyword) -> Self {
        RelatedKeywordRecord {
            text: raw.rel_keyword,
            pc_volume: parse_volume(&raw.monthly_pc_qc_cnt),
            mobile_volume: parse_volume(&raw.monthly_mobile_qc_cnt),
            competition: raw
                .comp_idx
                .as_deref()
                .map(Competition::parse)
                .unwrap_or_default(),
            avg_depth: parse_depth(&raw.pl_avg_depth),
        }
    }
}

fn parse_volume(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

fn parse_depth(value: &Value) -> Option<f64> {
    let depth = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (depth >= 0.0).then_some(depth)
}

/// Related keywords from the search-ad keyword tool.
#[derive(Debug, Clone)]
pub struct SearchAdKeywordSource {
    client: Client,
    endpoint: String,
    signer: RequestSigner,
}

impl SearchAdKeywordSource {
    pub fn new(config: &KeywordSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            signer: RequestSigner::new(&config.api_key, &config.secret_key, &config.customer_id),
        })
    }
}

#[async_trait]
impl KeywordSource for SearchAdKeywordSource {
    async fn related_keywords(&self, seed: &str) -> Result<Vec<RelatedKeywordRecord>> {
        // 關鍵字工具不接受空白
        let hint: String = seed.split_whitespace().collect();
        let url = format!("{}{}", self.endpoint, KEYWORD_TOOL_URI);

        tracing::debug!("Requesting related keywords for '{}' from {}", hint, url);

        let signed = self.signer.sign("GET", KEYWORD_TOOL_URI);
        let mut request = self
            .client
            .get(&url)
            .query(&[("hintKeywords", hint.as_str()), ("showDetail", "1")]);
        for (name, value) in signed.pairs() {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Keyword source response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecommendError::SourceError {
                source_name: "keyword source".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body: KeywordToolResponse = response.json().await?;
        Ok(body
            .keyword_list
            .into_iter()
            .map(RelatedKeywordRecord::from)
            .filter(|record| !record.text.is_empty())
            .collect())
    }
}
