//! # Diary entries & mood vocabulary
//! Input records as supplied by the caller, plus the fixed category → score table.
//!
//! Only `category` is read by the decision engine; `feelings` and `created_at`
//! travel along so callers can hand over raw records unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user diary record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Coarse mood category ("pleasant" | "neutral" | "unpleasant"). Anything else is ignored.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feelings: Vec<String>,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DiaryEntry {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn with_feelings<I, S>(mut self, feelings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feelings = feelings.into_iter().map(Into::into).collect();
        self
    }

    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }
}

/// Known mood categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Pleasant,
    Neutral,
    Unpleasant,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 3] = [Self::Pleasant, Self::Neutral, Self::Unpleasant];

    /// Exact match on the lower-case wire name; no trimming or case folding.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pleasant" => Some(Self::Pleasant),
            "neutral" => Some(Self::Neutral),
            "unpleasant" => Some(Self::Unpleasant),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pleasant => "pleasant",
            Self::Neutral => "neutral",
            Self::Unpleasant => "unpleasant",
        }
    }
}

/// Outcome of looking a raw category up in the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLookup {
    Scored(MoodCategory, i32),
    /// Unknown or missing category: contributes neither to count nor score.
    Ignored,
}

/// Signed score per category. Every variant has a slot, so adding a category
/// to [`MoodCategory`] fails to compile until it gets a score here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodVocabulary {
    pub pleasant: i32,
    pub neutral: i32,
    pub unpleasant: i32,
}

impl Default for MoodVocabulary {
    fn default() -> Self {
        Self {
            pleasant: 1,
            neutral: 0,
            unpleasant: -1,
        }
    }
}

impl MoodVocabulary {
    pub fn score(&self, category: MoodCategory) -> i32 {
        match category {
            MoodCategory::Pleasant => self.pleasant,
            MoodCategory::Neutral => self.neutral,
            MoodCategory::Unpleasant => self.unpleasant,
        }
    }

    pub fn lookup(&self, raw: Option<&str>) -> CategoryLookup {
        match raw.and_then(MoodCategory::parse) {
            Some(c) => CategoryLookup::Scored(c, self.score(c)),
            None => CategoryLookup::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scores_match_categories() {
        let v = MoodVocabulary::default();
        assert_eq!(v.score(MoodCategory::Pleasant), 1);
        assert_eq!(v.score(MoodCategory::Neutral), 0);
        assert_eq!(v.score(MoodCategory::Unpleasant), -1);
    }

    #[test]
    fn unknown_and_missing_are_ignored() {
        let v = MoodVocabulary::default();
        assert_eq!(v.lookup(Some("ecstatic")), CategoryLookup::Ignored);
        assert_eq!(v.lookup(Some("Pleasant")), CategoryLookup::Ignored);
        assert_eq!(v.lookup(Some(" pleasant")), CategoryLookup::Ignored);
        assert_eq!(v.lookup(None), CategoryLookup::Ignored);
        assert_eq!(
            v.lookup(Some("neutral")),
            CategoryLookup::Scored(MoodCategory::Neutral, 0)
        );
    }

    #[test]
    fn parse_round_trips_names() {
        for c in MoodCategory::ALL {
            assert_eq!(MoodCategory::parse(c.as_str()), Some(c));
        }
    }

    #[test]
    fn builder_sets_metadata() {
        let ts = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let e = DiaryEntry::new("neutral").with_feelings(["bored"]).at(ts);
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["category"], "neutral");
        assert_eq!(v["feelings"][0], "bored");
        assert!(v.get("created_at").is_some());
    }

    #[test]
    fn entry_accepts_camel_case_timestamp() {
        let e: DiaryEntry = serde_json::from_str(
            r#"{"category":"pleasant","feelings":["calm"],"createdAt":"2025-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(e.category.as_deref(), Some("pleasant"));
        assert_eq!(e.feelings, vec!["calm".to_string()]);
        assert!(e.created_at.is_some());
    }
}
