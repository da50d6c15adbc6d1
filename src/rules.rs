//! # Rule-Based Classifier
//! Deterministic threshold mapping `average_mood → ClusterLabel` for sparse data.
//!
//! Ordered, first match wins:
//! 1. `avg >  positive_above` → Positive
//! 2. `avg <  negative_below` → Negative
//! 3. otherwise               → Neutral
//!
//! Both comparisons are strict, so the thresholds themselves sit in the
//! neutral dead zone.

use serde::{Deserialize, Serialize};

use crate::decision::{ClusterLabel, Reason, ReasonKind};
use crate::features::FeatureSummary;

pub const DEFAULT_POSITIVE_ABOVE: f64 = 0.3;
pub const DEFAULT_NEGATIVE_BELOW: f64 = -0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    pub positive_above: f64,
    pub negative_below: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            positive_above: DEFAULT_POSITIVE_ABOVE,
            negative_below: DEFAULT_NEGATIVE_BELOW,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier {
    thresholds: RuleThresholds,
}

impl RuleBasedClassifier {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, features: &FeatureSummary) -> ClusterLabel {
        self.classify_explained(features).0
    }

    pub fn classify_explained(&self, features: &FeatureSummary) -> (ClusterLabel, Reason) {
        let avg = features.average_mood;
        let t = self.thresholds;

        let (label, msg) = if avg > t.positive_above {
            (
                ClusterLabel::Positive,
                format!("average mood {avg:.2} > {:.2}", t.positive_above),
            )
        } else if avg < t.negative_below {
            (
                ClusterLabel::Negative,
                format!("average mood {avg:.2} < {:.2}", t.negative_below),
            )
        } else {
            (
                ClusterLabel::Neutral,
                format!(
                    "average mood {avg:.2} within [{:.2}, {:.2}]",
                    t.negative_below, t.positive_above
                ),
            )
        };

        (label, Reason::new(msg).kind(ReasonKind::Threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(avg: f64) -> FeatureSummary {
        FeatureSummary {
            average_mood: avg,
            entry_count: 1,
        }
    }

    #[test]
    fn boundaries_fall_into_dead_zone() {
        let c = RuleBasedClassifier::default();
        assert_eq!(c.classify(&f(0.31)), ClusterLabel::Positive);
        assert_eq!(c.classify(&f(0.30)), ClusterLabel::Neutral);
        assert_eq!(c.classify(&f(-0.31)), ClusterLabel::Negative);
        assert_eq!(c.classify(&f(-0.30)), ClusterLabel::Neutral);
        assert_eq!(c.classify(&f(0.0)), ClusterLabel::Neutral);
    }

    #[test]
    fn extremes() {
        let c = RuleBasedClassifier::default();
        assert_eq!(c.classify(&f(1.0)), ClusterLabel::Positive);
        assert_eq!(c.classify(&f(-1.0)), ClusterLabel::Negative);
    }

    #[test]
    fn custom_thresholds() {
        let c = RuleBasedClassifier::new(RuleThresholds {
            positive_above: 0.5,
            negative_below: -0.1,
        });
        assert_eq!(c.classify(&f(0.4)), ClusterLabel::Neutral);
        assert_eq!(c.classify(&f(-0.2)), ClusterLabel::Negative);
    }

    #[test]
    fn reason_mentions_threshold() {
        let (label, r) = RuleBasedClassifier::default().classify_explained(&f(0.333));
        assert_eq!(label, ClusterLabel::Positive);
        assert_eq!(r.kind, Some(ReasonKind::Threshold));
        assert!(r.message.contains("> 0.30"), "{}", r.message);
    }
}
