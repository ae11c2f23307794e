//! Bridge card-play engine
//!
//! Plays out the card phase of a contract bridge deal once the auction is
//! over. The crate provides:
//! - The rules of play: following suit, trick winners, rotation and dummy
//! - Duplicate scoring of the finished deal
//! - A static position evaluator
//! - Computer players behind one [`PlayStrategy`] interface: a depth-limited
//!   minimax search with alpha-beta pruning and a rule-of-thumb heuristic
//!
//! Cards are held in a 52-bit set ([`Cards`]); the search simulates on a
//! single cloned [`PlayState`] by applying and undoing plays.
//!
//! # Example using bridge-types
//!
//! ```
//! use bridge_play::{
//!     parse_contract, strategy_for, DifficultyTier, EngineConfig, Hands, PlayState, Vulnerability,
//! };
//! use bridge_types::Deal;
//!
//! let pbn = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";
//! let deal = Deal::from_pbn(pbn).unwrap();
//!
//! let contract = parse_contract("3NT by S")?;
//! let hands = Hands::from_deal(&deal);
//! let mut state = PlayState::new(contract, hands, Vulnerability::NONE)?;
//!
//! let mut player = strategy_for(DifficultyTier::Beginner, &EngineConfig::default());
//! while !state.is_complete() {
//!     let seat = state.next_to_play();
//!     let card = player.choose_card(&state, seat)?;
//!     state.play(seat, card)?;
//! }
//! assert_eq!(state.declarer_tricks() + state.defender_tricks(), 13);
//! assert!(state.final_score().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cards;
pub mod config;
pub mod contract;
mod convert;
pub mod error;
pub mod evaluate;
mod hands;
pub mod heuristic;
pub mod rules;
pub mod scoring;
pub mod search;
pub mod state;
pub mod strategy;
pub mod trick;
pub mod types;

pub use cards::{Card, Cards};
pub use config::EngineConfig;
pub use contract::{parse_contract, Contract, Doubled, Vulnerability};
pub use error::{AiError, ConfigError, ContractError, DealError, PlayError, ScoreError};
pub use evaluate::{EvalWeights, Evaluator, PositionEvaluator};
pub use hands::Hands;
pub use heuristic::HeuristicAi;
pub use rules::{determine_trick_winner, is_legal_play, next_player};
pub use scoring::{calculate_score, ScoreBreakdown, ScoreResult};
pub use search::{MinimaxAi, SearchConfig, SearchStats};
pub use state::{PlayOutcome, PlayState};
pub use strategy::{
    by_name, choose_with_fallback, registered_strategies, strategy_for, DifficultyTier,
    PlayStrategy, StrategyFactory,
};
pub use trick::{CompletedTrick, PlayedCard, Trick};
pub use types::{Rank, Seat, Side, Strain, Suit, NUM_SEATS, NUM_SUITS, TOTAL_CARDS, TOTAL_TRICKS};
