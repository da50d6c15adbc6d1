//! decision.rs — Output shapes of the personalization engine.
//!
//! Both strategies land in the same `ClusterLabel` domain, so the caller can
//! compare labels regardless of which method produced them. `reasons` carry a
//! short explanation of the path taken.

use serde::{Deserialize, Serialize};

use crate::features::FeatureSummary;

/// Mood cluster. Serialized as its ordinal (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ClusterLabel {
    Negative = 0,
    Neutral = 1,
    Positive = 2,
}

impl ClusterLabel {
    pub const COUNT: usize = 3;

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Map a raw index into the label domain. `None` when out of range.
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::Negative),
            1 => Some(Self::Neutral),
            2 => Some(Self::Positive),
            _ => None,
        }
    }
}

impl From<ClusterLabel> for u8 {
    fn from(l: ClusterLabel) -> u8 {
        l.ordinal()
    }
}

impl TryFrom<u8> for ClusterLabel {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::from_index(v as usize).ok_or_else(|| format!("cluster label out of range: {v}"))
    }
}

/// Which strategy produced the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationMethod {
    #[serde(rename = "rule-based")]
    RuleBased,
    #[serde(rename = "kmeans")]
    Clustering,
}

impl ClassificationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RuleBased => "rule-based",
            Self::Clustering => "kmeans",
        }
    }
}

/// Human-readable explanation attached to a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReasonKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    /// Size gate outcome.
    Volume,
    /// Rule threshold (or dead zone) that fired.
    Threshold,
    /// Clustering fit details.
    Cluster,
}

impl Reason {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
        }
    }

    pub fn kind(mut self, kind: ReasonKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Complete result of one personalization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    pub features: FeatureSummary,
    pub cluster: ClusterLabel,
    pub method: ClassificationMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<Reason>,
}

impl Personalization {
    pub fn new(
        features: FeatureSummary,
        cluster: ClusterLabel,
        method: ClassificationMethod,
    ) -> Self {
        Self {
            features,
            cluster,
            method,
            reasons: Vec::new(),
        }
    }

    pub fn with_reason(mut self, r: Reason) -> Self {
        self.reasons.push(r);
        self
    }
}
