//! Metadata search over the index.
//!
//! Matching is case-insensitive substring matching against one field at a
//! time. Results are ranked by the best field that matched, then by
//! discovery order.

use serde::Serialize;

use super::skill::{SkillMetadata, SkillType};

/// Which field produced a match. Lower ranks sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Name = 0,
    Description = 1,
    Category = 2,
    Tags = 3,
}

/// A search request. Free text plus optional filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Keep skills carrying at least one of these tags.
    pub tags: Vec<String>,
    /// Keep skills in this category only.
    pub category: Option<String>,
    /// Keep skills by this author only. Exact match.
    pub author: Option<String>,
    pub skill_type: Option<SkillType>,
}

impl SearchQuery {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub const fn with_type(mut self, skill_type: SkillType) -> Self {
        self.skill_type = Some(skill_type);
        self
    }

    /// Whether `meta` passes the tag and category filters. Ignores the text.
    #[must_use]
    pub fn admits(&self, meta: &SkillMetadata) -> bool {
        if let Some(category) = &self.category {
            if !meta.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if meta.author.as_deref() != Some(author.as_str()) {
                return false;
            }
        }
        if self.skill_type.is_some() && meta.skill_type != self.skill_type {
            return false;
        }
        if self.tags.is_empty() {
            return true;
        }
        self.tags.iter().any(|wanted| {
            meta.tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(wanted.trim()))
        })
    }
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for SearchQuery {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    pub metadata: &'a SkillMetadata,
    pub tier: Option<MatchTier>,
}

struct Needle {
    phrase: String,
    keywords: Vec<String>,
}

impl Needle {
    fn new(text: &str) -> Option<Self> {
        let phrase = text.trim().to_lowercase();
        if phrase.is_empty() {
            return None;
        }
        let keywords = phrase.split_whitespace().map(str::to_string).collect();
        Some(Self { phrase, keywords })
    }

    fn matches(&self, field: &str) -> bool {
        let haystack = field.to_lowercase();
        haystack.contains(&self.phrase) || self.keywords.iter().all(|k| haystack.contains(k.as_str()))
    }

    fn tier(&self, meta: &SkillMetadata) -> Option<MatchTier> {
        if self.matches(&meta.name) {
            Some(MatchTier::Name)
        } else if self.matches(&meta.description) {
            Some(MatchTier::Description)
        } else if self.matches(&meta.category) {
            Some(MatchTier::Category)
        } else if meta.tags.iter().any(|tag| self.matches(tag)) {
            Some(MatchTier::Tags)
        } else {
            None
        }
    }
}

/// Rank `skills` (given in discovery order) against `query`.
///
/// A blank query text matches everything and keeps discovery order; filters
/// still apply.
pub fn rank<'a, I>(skills: I, query: &SearchQuery) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = &'a SkillMetadata>,
{
    let needle = Needle::new(&query.text);
    let mut hits: Vec<SearchHit<'a>> = skills
        .into_iter()
        .filter(|meta| query.admits(meta))
        .filter_map(|meta| match &needle {
            None => Some(SearchHit { metadata: meta, tier: None }),
            Some(needle) => needle
                .tier(meta)
                .map(|tier| SearchHit { metadata: meta, tier: Some(tier) }),
        })
        .collect();
    // Stable sort keeps discovery order within a tier.
    hits.sort_by_key(|hit| hit.tier);
    hits
}
