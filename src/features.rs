//! # Feature Extraction
//! Reduces a batch of diary entries to `{average_mood, entries}`.
//!
//! Pure function of the input; unknown categories are skipped, an empty
//! (or fully ignored) batch yields `0.0 / 0`.

use serde::{Deserialize, Serialize};

use crate::diary::{CategoryLookup, DiaryEntry, MoodVocabulary};

/// Compact mood summary of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    /// Mean score of the scored entries only.
    pub average_mood: f64,
    /// Number of scored entries (ignored categories are not counted).
    #[serde(rename = "entries")]
    pub entry_count: usize,
}

impl FeatureSummary {
    pub const EMPTY: FeatureSummary = FeatureSummary {
        average_mood: 0.0,
        entry_count: 0,
    };

    /// Single-dimensional feature vector used by the clustering path.
    pub fn as_vector(&self) -> [f64; 1] {
        [self.average_mood]
    }
}

/// Side information for logs; never part of the decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub scored: usize,
    pub ignored: usize,
}

pub fn extract_features(entries: &[DiaryEntry], vocab: &MoodVocabulary) -> FeatureSummary {
    extract_with_stats(entries, vocab).0
}

pub fn extract_with_stats(
    entries: &[DiaryEntry],
    vocab: &MoodVocabulary,
) -> (FeatureSummary, ExtractionStats) {
    let mut total: i64 = 0;
    let mut stats = ExtractionStats::default();

    for e in entries {
        match vocab.lookup(e.category.as_deref()) {
            CategoryLookup::Scored(_, score) => {
                total += score as i64;
                stats.scored += 1;
            }
            CategoryLookup::Ignored => stats.ignored += 1,
        }
    }

    let average_mood = if stats.scored > 0 {
        total as f64 / stats.scored as f64
    } else {
        0.0
    };

    (
        FeatureSummary {
            average_mood,
            entry_count: stats.scored,
        },
        stats,
    )
}
