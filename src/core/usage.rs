//! Token usage accounting.

use std::collections::BTreeMap;

use serde::Serialize;

/// Kind of client operation that consumed context tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    List,
    Search,
    Load,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkillUsage {
    pub loads: u64,
    pub tokens: u64,
}

/// Point-in-time view of usage, with the savings computed against the cost
/// of loading every indexed skill up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageStats {
    pub list_tokens: u64,
    pub search_tokens: u64,
    pub load_tokens: u64,
    pub total_tokens: u64,
    pub upfront_tokens: u64,
    pub savings_percent: f64,
    pub per_skill: BTreeMap<String, SkillUsage>,
}

impl UsageStats {
    #[must_use]
    pub fn loads_of(&self, name: &str) -> u64 {
        self.per_skill.get(name).map_or(0, |usage| usage.loads)
    }
}

#[derive(Debug, Default)]
pub struct UsageTracker {
    list_tokens: u64,
    search_tokens: u64,
    load_tokens: u64,
    per_skill: BTreeMap<String, SkillUsage>,
}

impl UsageTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: OperationKind, tokens: u64) {
        let bucket = match kind {
            OperationKind::List => &mut self.list_tokens,
            OperationKind::Search => &mut self.search_tokens,
            OperationKind::Load => &mut self.load_tokens,
        };
        *bucket = bucket.saturating_add(tokens);
    }

    pub fn record_load(&mut self, name: &str, tokens: u64) {
        self.record(OperationKind::Load, tokens);
        let usage = self.per_skill.entry(name.to_string()).or_default();
        usage.loads += 1;
        usage.tokens = usage.tokens.saturating_add(tokens);
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.list_tokens
            .saturating_add(self.search_tokens)
            .saturating_add(self.load_tokens)
    }

    #[must_use]
    pub fn snapshot(&self, upfront_tokens: u64) -> UsageStats {
        let total_tokens = self.total();
        UsageStats {
            list_tokens: self.list_tokens,
            search_tokens: self.search_tokens,
            load_tokens: self.load_tokens,
            total_tokens,
            upfront_tokens,
            savings_percent: savings_percent(upfront_tokens, total_tokens),
            per_skill: self.per_skill.clone(),
        }
    }
}

/// `(upfront - used) / upfront * 100`, floored at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn savings_percent(upfront: u64, used: u64) -> f64 {
    if upfront == 0 {
        return 0.0;
    }
    let saved = upfront.saturating_sub(used) as f64;
    saved / upfront as f64 * 100.0
}
