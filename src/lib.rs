// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod cluster;
pub mod config;
pub mod decision;
pub mod diary;
pub mod engine;
pub mod features;
pub mod gate;
pub mod rules;

// ---- Re-exports for stable public API ----
pub use crate::config::PersonalizationConfig;
pub use crate::decision::{ClassificationMethod, ClusterLabel, Personalization};
pub use crate::diary::{DiaryEntry, MoodCategory, MoodVocabulary};
pub use crate::engine::Personalizer;
pub use crate::features::FeatureSummary;
