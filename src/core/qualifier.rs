use crate::config::policy::{CompetitionGate, QualificationPolicy, DEFAULT_MAX_KEYWORDS};
use crate::domain::model::{QualifiedKeyword, RelatedKeywordRecord, SupplyCount};
use crate::domain::ports::{KeywordSource, SupplySource};

/// Outcome of running one record through the gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Accepted,
    RejectedVolume,
    RejectedCompetition,
    RejectedSupply(SupplyCount),
}

/// Filters related keywords by volume, competition and supply.
///
/// Gates run in that order and stop at the first failure, so the supply
/// source is only asked about records that already passed the cheap
/// checks. Remote failures never reach the caller: a failed keyword
/// lookup yields no keywords, a failed supply lookup yields
/// [`SupplyCount::UNKNOWN`], which always fails the supply gate.
pub struct KeywordQualifier<K: KeywordSource, S: SupplySource> {
    keywords: K,
    supply: S,
    policy: QualificationPolicy,
}

impl<K: KeywordSource, S: SupplySource> KeywordQualifier<K, S> {
    pub fn new(keywords: K, supply: S, policy: QualificationPolicy) -> Self {
        Self {
            keywords,
            supply,
            policy,
        }
    }

    pub fn policy(&self) -> &QualificationPolicy {
        &self.policy
    }

    pub async fn qualify(&self, seed: &str) -> Vec<QualifiedKeyword> {
        let seed = seed.trim();
        if seed.is_empty() {
            tracing::debug!("Empty seed, skipping keyword lookup");
            return Vec::new();
        }

        let records = match self.keywords.related_keywords(seed).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("⚠️ Keyword source failed for '{}': {}", seed, e);
                return Vec::new();
            }
        };

        tracing::debug!("Keyword source returned {} records for '{}'", records.len(), seed);

        // 未經 validate 的 policy 也不能超過 10 個
        let cap = self.policy.max_keywords.min(DEFAULT_MAX_KEYWORDS);
        let mut qualified = Vec::new();
        for record in &records {
            if qualified.len() >= cap {
                break;
            }

            let decision = self.evaluate(record).await;
            tracing::debug!(
                keyword = %record.text,
                volume = record.total_volume(),
                competition = %record.competition,
                "{:?}",
                decision
            );

            if decision == GateDecision::Accepted {
                qualified.push(record.text.clone());
            }
        }

        tracing::info!(
            "✅ '{}': {} of {} related keywords qualified",
            seed,
            qualified.len(),
            records.len()
        );
        qualified
    }

    /// Runs every gate for a single record, consulting the supply source
    /// only when the volume and competition gates pass.
    pub async fn evaluate(&self, record: &RelatedKeywordRecord) -> GateDecision {
        if !self.passes_volume(record) {
            return GateDecision::RejectedVolume;
        }
        if !self.passes_competition(record) {
            return GateDecision::RejectedCompetition;
        }

        let supply = self.lookup_supply(&record.text).await;
        if supply.value() > self.policy.supply_ceiling {
            return GateDecision::RejectedSupply(supply);
        }

        GateDecision::Accepted
    }

    pub fn passes_volume(&self, record: &RelatedKeywordRecord) -> bool {
        record.total_volume() <= self.policy.volume_ceiling
    }

    pub fn passes_competition(&self, record: &RelatedKeywordRecord) -> bool {
        match self.policy.competition_gate {
            CompetitionGate::Low => record.competition.is_low(),
            CompetitionGate::MaxDepth { threshold } => {
                record.avg_depth.is_some_and(|depth| depth <= threshold)
            }
        }
    }

    async fn lookup_supply(&self, keyword: &str) -> SupplyCount {
        match self.supply.supply_count(keyword).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("⚠️ Supply source failed for '{}': {}", keyword, e);
                SupplyCount::UNKNOWN
            }
        }
    }
}
