//! Playing strategies behind one interface
//!
//! Every card-playing AI implements [`PlayStrategy`]. Strategies are built
//! per seat from a [`DifficultyTier`], or looked up by name in the static
//! registry.
//!
//! How to register a strategy:
//!
//! 1) Implement `PlayStrategy` for the type in its own module.
//! 2) Add a `StrategyFactory` entry to `STRATEGY_FACTORIES` with a stable name.
//! 3) Keep constructors free of side effects; the same config builds the same player.

use super::cards::{Card, Cards};
use super::config::EngineConfig;
use super::error::{AiError, ConfigError};
use super::evaluate::PositionEvaluator;
use super::heuristic::HeuristicAi;
use super::search::MinimaxAi;
use super::state::PlayState;
use super::types::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A card-playing AI.
///
/// Implementations borrow the state for one decision and must return one of
/// `state.legal_plays()` for `seat`, which has to be the seat on turn.
/// Declarer is asked for dummy's cards by passing dummy's seat.
pub trait PlayStrategy: Send {
    fn choose_card(&mut self, state: &PlayState, seat: Seat) -> Result<Card, AiError>;

    fn name(&self) -> &str;

    fn difficulty_tier(&self) -> DifficultyTier;

    /// Human-readable account of the most recent decision
    fn explain_last_choice(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Beginner,
        DifficultyTier::Intermediate,
        DifficultyTier::Advanced,
        DifficultyTier::Expert,
    ];

    /// Search depth in plies; None for the heuristic tier
    pub fn search_depth(self) -> Option<u8> {
        match self {
            DifficultyTier::Beginner => None,
            DifficultyTier::Intermediate => Some(4),
            DifficultyTier::Advanced => Some(8),
            DifficultyTier::Expert => Some(12),
        }
    }

    /// Tier a search of `depth` plies plays at
    pub fn for_depth(depth: u8) -> DifficultyTier {
        match depth {
            0..=4 => DifficultyTier::Intermediate,
            5..=8 => DifficultyTier::Advanced,
            _ => DifficultyTier::Expert,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
            DifficultyTier::Expert => "expert",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        DifficultyTier::ALL
            .into_iter()
            .find(|tier| tier.name() == lower)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "difficulty",
                value: s.to_string(),
            })
    }
}

/// Check that `seat` may be asked for a card and return its legal plays
pub(crate) fn legal_choices(state: &PlayState, seat: Seat) -> Result<Cards, AiError> {
    if state.is_complete() {
        return Err(AiError::DealComplete);
    }
    if seat != state.next_to_play() {
        return Err(AiError::NotOnTurn {
            expected: state.next_to_play(),
            actual: seat,
        });
    }
    let legal = state.legal_plays();
    if legal.is_empty() {
        return Err(AiError::NoLegalPlays(seat));
    }
    Ok(legal)
}

/// Build the strategy for a difficulty tier
pub fn strategy_for(tier: DifficultyTier, config: &EngineConfig) -> Box<dyn PlayStrategy> {
    match tier.search_depth() {
        None => Box::new(HeuristicAi::new()),
        Some(_) => Box::new(MinimaxAi::with_evaluator(
            config.search_config(tier),
            PositionEvaluator::new(config.weights),
        )),
    }
}

/// Factory definition for constructing strategies by name
pub struct StrategyFactory {
    pub name: &'static str,
    pub tier: DifficultyTier,
    pub make: fn(config: &EngineConfig) -> Box<dyn PlayStrategy>,
}

static STRATEGY_FACTORIES: &[StrategyFactory] = &[
    StrategyFactory {
        name: HeuristicAi::NAME,
        tier: DifficultyTier::Beginner,
        make: make_heuristic,
    },
    StrategyFactory {
        name: "minimax-intermediate",
        tier: DifficultyTier::Intermediate,
        make: make_intermediate,
    },
    StrategyFactory {
        name: "minimax-advanced",
        tier: DifficultyTier::Advanced,
        make: make_advanced,
    },
    StrategyFactory {
        name: "minimax-expert",
        tier: DifficultyTier::Expert,
        make: make_expert,
    },
];

/// Returns the statically registered strategy factories.
pub fn registered_strategies() -> &'static [StrategyFactory] {
    STRATEGY_FACTORIES
}

/// Finds a registered strategy factory by its name.
pub fn by_name(name: &str) -> Option<&'static StrategyFactory> {
    registered_strategies().iter().find(|factory| factory.name == name)
}

fn make_heuristic(config: &EngineConfig) -> Box<dyn PlayStrategy> {
    strategy_for(DifficultyTier::Beginner, config)
}

fn make_intermediate(config: &EngineConfig) -> Box<dyn PlayStrategy> {
    strategy_for(DifficultyTier::Intermediate, config)
}

fn make_advanced(config: &EngineConfig) -> Box<dyn PlayStrategy> {
    strategy_for(DifficultyTier::Advanced, config)
}

fn make_expert(config: &EngineConfig) -> Box<dyn PlayStrategy> {
    strategy_for(DifficultyTier::Expert, config)
}

/// Ask `primary` for a card, falling back to `fallback` if it fails or
/// returns a card the rules reject. Whatever is returned has been checked
/// against the rules engine. A finished deal or a seat that is not on turn
/// is reported without consulting either strategy.
pub fn choose_with_fallback(
    primary: &mut dyn PlayStrategy,
    fallback: &mut dyn PlayStrategy,
    state: &PlayState,
    seat: Seat,
) -> Result<Card, AiError> {
    legal_choices(state, seat)?;
    let verified = |card: Card| {
        state
            .check(seat, card)
            .map(|()| card)
            .map_err(AiError::from)
    };

    primary.choose_card(state, seat).and_then(verified).or_else(|err| {
        warn!(
            seat = %seat,
            primary = primary.name(),
            fallback = fallback.name(),
            error = %err,
            "strategy failed, using fallback"
        );
        fallback.choose_card(state, seat).and_then(verified)
    })
}
