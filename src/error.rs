//! Error types for deal construction, contracts, play and strategies

use super::cards::Card;
use super::types::{Seat, Suit};
use thiserror::Error;

/// Malformed deal or card text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("invalid card: {0:?}")]
    InvalidCard(String),
    #[error("invalid PBN deal: {0}")]
    InvalidPbn(String),
    #[error("{seat} holds {count} cards, expected {expected}")]
    WrongCardCount {
        seat: Seat,
        count: usize,
        expected: usize,
    },
    #[error("{card} appears in more than one hand")]
    DuplicateCard { card: Card },
    #[error("hands are empty")]
    EmptyDeal,
}

/// Malformed contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("contract level {0} is outside 1..=7")]
    InvalidLevel(u8),
    #[error("invalid strain: {0:?}")]
    InvalidStrain(String),
    #[error("invalid declarer: {0:?}")]
    InvalidDeclarer(String),
    #[error("cannot parse contract {0:?}")]
    Malformed(String),
    #[error("invalid vulnerability: {0:?}")]
    InvalidVulnerability(String),
}

/// A rejected play. The state is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("the deal is already complete")]
    DealComplete,
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: Seat, actual: Seat },
    #[error("{seat} does not hold {card}")]
    CardNotHeld { seat: Seat, card: Card },
    #[error("{seat} must follow suit: {led} was led and {card} is not a {led}")]
    MustFollowSuit { seat: Seat, card: Card, led: Suit },
}

/// Rejected score request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("{0} tricks is more than a deal holds")]
    TooManyTricks(u8),
}

/// Errors raised by playing strategies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("asked to choose a card for a completed deal")]
    DealComplete,
    #[error("{0} has no legal plays")]
    NoLegalPlays(Seat),
    #[error("asked to play for {actual} but {expected} is on turn")]
    NotOnTurn { expected: Seat, actual: Seat },
    #[error("strategy chose an illegal card: {0}")]
    InvalidChoice(#[from] PlayError),
}

/// Invalid engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
