//! Engine configuration.
//!
//! Settings come from JSON or from environment variables. Every field has a
//! default, so an empty object is a complete config.
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "difficulty": "advanced",
//!   "max_depth": 6,
//!   "pruning": true,
//!   "weights": {"tricks_won": 1.0, "sure_winners": 0.6, "sure_winner_increment": 0.5}
//! }
//! ```
//!
//! # Environment
//!
//! - `BRIDGE_PLAY_DIFFICULTY`: beginner, intermediate, advanced or expert
//! - `BRIDGE_PLAY_MAX_DEPTH`: search depth in plies, overriding the tier preset
//! - `BRIDGE_PLAY_PRUNING`: true/false, 1/0, on/off

use super::error::ConfigError;
use super::evaluate::EvalWeights;
use super::search::{SearchConfig, DEFAULT_MAX_DEPTH};
use super::strategy::{strategy_for, DifficultyTier, PlayStrategy};
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_DIFFICULTY: &str = "BRIDGE_PLAY_DIFFICULTY";
pub const ENV_MAX_DEPTH: &str = "BRIDGE_PLAY_MAX_DEPTH";
pub const ENV_PRUNING: &str = "BRIDGE_PLAY_PRUNING";

/// Deepest search accepted: the whole deal
pub const MAX_SEARCH_DEPTH: u8 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: DifficultyTier,
    /// Search depth in plies. When unset each tier uses its own preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u8>,
    pub pruning: bool,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            difficulty: DifficultyTier::default(),
            max_depth: None,
            pruning: true,
            weights: EvalWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Defaults overridden by `BRIDGE_PLAY_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();

        if let Some(value) = lookup(ENV_DIFFICULTY) {
            config.difficulty = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DIFFICULTY,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            let depth = value.trim().parse::<u8>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_MAX_DEPTH,
                value: value.clone(),
            })?;
            config.max_depth = Some(depth);
        }

        if let Some(value) = lookup(ENV_PRUNING) {
            config.pruning = parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_PRUNING,
                value: value.clone(),
            })?;
        }

        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if let Some(depth) = self.max_depth {
            if depth == 0 || depth > MAX_SEARCH_DEPTH {
                return Err(ConfigError::InvalidValue {
                    key: "max_depth",
                    value: depth.to_string(),
                });
            }
        }
        Ok(self)
    }

    /// Search settings for `tier`: the configured depth, else the tier preset
    pub fn search_config(&self, tier: DifficultyTier) -> SearchConfig {
        SearchConfig {
            max_depth: self
                .max_depth
                .or(tier.search_depth())
                .unwrap_or(DEFAULT_MAX_DEPTH),
            pruning: self.pruning,
        }
    }

    /// The strategy for the configured difficulty
    pub fn build_strategy(&self) -> Box<dyn PlayStrategy> {
        strategy_for(self.difficulty, self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
