// src/config/personalization.rs
//! Immutable engine configuration: vocabulary, size gate, rule thresholds,
//! clustering settings.
//!
//! Resolution order:
//! 1) `$PERSONALIZATION_CONFIG_PATH` (must exist)
//! 2) `config/personalization.toml` (optional)
//! 3) built-in defaults
//!
//! Then `PERSONALIZATION_MIN_ENTRIES` / `PERSONALIZATION_SEED` override the
//! file values. Everything is validated once here; the engine assumes a valid
//! config.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cluster::ClusterSettings;
use crate::diary::MoodVocabulary;
use crate::gate::SizeGate;
use crate::rules::RuleThresholds;

pub const DEFAULT_PERSONALIZATION_CONFIG_PATH: &str = "config/personalization.toml";

pub const ENV_PERSONALIZATION_CONFIG_PATH: &str = "PERSONALIZATION_CONFIG_PATH";
pub const ENV_MIN_ENTRIES: &str = "PERSONALIZATION_MIN_ENTRIES";
pub const ENV_SEED: &str = "PERSONALIZATION_SEED";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalizationConfig {
    pub vocabulary: MoodVocabulary,
    pub gate: SizeGate,
    pub rules: RuleThresholds,
    pub clustering: ClusterSettings,
}

impl PersonalizationConfig {
    /// Resolve path + env overrides (see module docs).
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_PERSONALIZATION_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    bail!("{ENV_PERSONALIZATION_CONFIG_PATH} points to non-existent path");
                }
                Self::load_from_file(&pb)?
            }
            Err(_) => {
                let pb = PathBuf::from(DEFAULT_PERSONALIZATION_CONFIG_PATH);
                if pb.exists() {
                    Self::load_from_file(&pb)?
                } else {
                    Self::default()
                }
            }
        };

        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading personalization config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing personalization config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(n) = parse_env::<usize>(ENV_MIN_ENTRIES) {
            self.gate.min_entries = n;
        }
        if let Some(seed) = parse_env::<u64>(ENV_SEED) {
            self.clustering.seed = seed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.rules;
        if !r.positive_above.is_finite() || !r.negative_below.is_finite() {
            return Err(anyhow!("rule thresholds must be finite"));
        }
        if r.negative_below > r.positive_above {
            bail!(
                "rules.negative_below ({}) must not exceed rules.positive_above ({})",
                r.negative_below,
                r.positive_above
            );
        }

        let c = &self.clustering;
        if c.n_init == 0 {
            bail!("clustering.n_init must be > 0");
        }
        if c.max_iterations == 0 {
            bail!("clustering.max_iterations must be > 0");
        }
        if !c.tolerance.is_finite() || c.tolerance < 0.0 {
            bail!("clustering.tolerance must be a finite value >= 0.0");
        }
        Ok(())
    }
}

/// Parse an env var; unparsable values are logged and ignored.
fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable env override");
            None
        }
    }
}
