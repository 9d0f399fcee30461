use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition level reported by the keyword source.
///
/// The source may send a localized label (`낮음`) or an enum token (`LOW`);
/// both map to the same variant. Anything else is kept verbatim as
/// `Unknown` and never passes the low-competition gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Competition {
    Low,
    Medium,
    High,
    Unknown(String),
}

impl Competition {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "LOW" | "낮음" => Competition::Low,
            "MEDIUM" | "MID" | "중간" => Competition::Medium,
            "HIGH" | "높음" => Competition::High,
            _ => Competition::Unknown(trimmed.to_string()),
        }
    }

    pub fn is_low(&self) -> bool {
        matches!(self, Competition::Low)
    }
}

impl Default for Competition {
    fn default() -> Self {
        Competition::Unknown(String::new())
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competition::Low => f.write_str("LOW"),
            Competition::Medium => f.write_str("MEDIUM"),
            Competition::High => f.write_str("HIGH"),
            Competition::Unknown(raw) => write!(f, "UNKNOWN({})", raw),
        }
    }
}

/// One related keyword as returned by the keyword source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedKeywordRecord {
    pub text: String,
    pub pc_volume: u64,
    pub mobile_volume: u64,
    pub competition: Competition,
    /// `None` when the source omitted the metric.
    pub avg_depth: Option<f64>,
}

impl RelatedKeywordRecord {
    pub fn total_volume(&self) -> u64 {
        self.pc_volume.saturating_add(self.mobile_volume)
    }
}

/// Marketplace listing count for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplyCount(pub u64);

impl SupplyCount {
    /// Stands in for a failed lookup; larger than any supply ceiling in use.
    pub const UNKNOWN: SupplyCount = SupplyCount(999_999_999);

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

impl fmt::Display for SupplyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("unknown")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Related keyword text that passed every gate.
pub type QualifiedKeyword = String;

/// Keyword plus descriptor suffix, already cut to the length cap.
pub type ProductTitle = String;

/// One processed input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    pub original_title: String,
    pub seed: String,
    pub titles: Vec<ProductTitle>,
}

impl BatchRow {
    pub const TITLE_SEPARATOR: &'static str = "; ";

    pub fn joined_titles(&self) -> String {
        self.titles.join(Self::TITLE_SEPARATOR)
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
    pub csv_output: String,
    pub json_output: String,
}
