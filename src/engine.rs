//! # Personalization Engine
//! Pure, testable composition: entries → features → size gate → classifier.
//! No I/O; config is fixed at construction and only read afterwards.
//!
//! Policy: batches below the gate go to the threshold rules, the rest are
//! clustered. The chosen method is always reported next to the label.

use metrics::counter;
use tracing::debug;

use crate::cluster::ClusterEngine;
use crate::config::PersonalizationConfig;
use crate::decision::{ClassificationMethod, Personalization, Reason, ReasonKind};
use crate::diary::{DiaryEntry, MoodVocabulary};
use crate::features::extract_with_stats;
use crate::gate::SizeGate;
use crate::rules::RuleBasedClassifier;

#[derive(Debug, Clone)]
pub struct Personalizer {
    vocabulary: MoodVocabulary,
    gate: SizeGate,
    rules: RuleBasedClassifier,
    clusters: ClusterEngine,
}

impl Default for Personalizer {
    fn default() -> Self {
        Self::new(PersonalizationConfig::default())
    }
}

impl Personalizer {
    pub fn new(cfg: PersonalizationConfig) -> Self {
        Self {
            vocabulary: cfg.vocabulary,
            gate: cfg.gate,
            rules: RuleBasedClassifier::new(cfg.rules),
            clusters: ClusterEngine::new(cfg.clustering),
        }
    }

    /// Total over any entry slice: empty or unrecognised input still yields a label.
    pub fn personalize(&self, entries: &[DiaryEntry]) -> Personalization {
        let (features, stats) = extract_with_stats(entries, &self.vocabulary);
        let small = self.gate.is_small(features.entry_count);

        let volume = Reason::new(format!(
            "{} scored entries ({} ignored); gate at {}",
            stats.scored, stats.ignored, self.gate.min_entries
        ))
        .kind(ReasonKind::Volume);

        let (cluster, method, reason) = if small {
            let (label, r) = self.rules.classify_explained(&features);
            (label, ClassificationMethod::RuleBased, r)
        } else {
            let (label, r) = self.clusters.classify_explained(&features);
            (label, ClassificationMethod::Clustering, r)
        };

        counter!("personalize_decisions_total", "method" => method.as_str()).increment(1);
        if stats.ignored > 0 {
            counter!("personalize_ignored_entries_total").increment(stats.ignored as u64);
        }
        debug!(
            avg = features.average_mood,
            entries = features.entry_count,
            ignored = stats.ignored,
            method = method.as_str(),
            cluster = cluster.ordinal(),
            "personalization decided"
        );

        Personalization::new(features, cluster, method)
            .with_reason(volume)
            .with_reason(reason)
    }
}
