//! Duplicate bridge scoring
//!
//! Scores are from the declaring side's point of view: positive when the
//! contract makes, negative when it is set.

use super::contract::{Contract, Doubled, Vulnerability};
use super::error::ScoreError;
use super::types::*;
use serde::{Deserialize, Serialize};

/// Itemised score. Every field is from declarer's point of view; the
/// undertrick penalty is stored as a positive number and subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub contract_points: i32,
    pub overtrick_points: i32,
    pub game_bonus: i32,
    pub part_score_bonus: i32,
    pub slam_bonus: i32,
    pub insult_bonus: i32,
    pub undertrick_penalty: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.contract_points
            + self.overtrick_points
            + self.game_bonus
            + self.part_score_bonus
            + self.slam_bonus
            + self.insult_bonus
            - self.undertrick_penalty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub made: bool,
    pub overtricks: u8,
    pub undertricks: u8,
    pub score: i32,
    pub breakdown: ScoreBreakdown,
}

/// Points for one contracted trick, undoubled
fn trick_value(strain: Strain) -> i32 {
    if strain.is_minor() {
        20
    } else {
        30
    }
}

/// Trick score for the contracted tricks, doubling applied
fn contract_points(contract: &Contract) -> i32 {
    let level = i32::from(contract.level());
    let notrump_first = if contract.strain() == Strain::NoTrump { 10 } else { 0 };
    (trick_value(contract.strain()) * level + notrump_first) * contract.doubled().multiplier()
}

/// Doubled undertrick penalty: NV 100, 300, 500 then +300; V 200, 500, 800 then +300
fn doubled_penalty(undertricks: i32, vulnerable: bool) -> i32 {
    if vulnerable {
        match undertricks {
            1 => 200,
            n => 200 + (n - 1) * 300,
        }
    } else {
        match undertricks {
            1 => 100,
            2 => 300,
            3 => 500,
            n => 500 + (n - 3) * 300,
        }
    }
}

fn undertrick_penalty(doubled: Doubled, undertricks: i32, vulnerable: bool) -> i32 {
    let per_trick = if vulnerable { 100 } else { 50 };
    match doubled {
        Doubled::Undoubled => undertricks * per_trick,
        Doubled::Doubled => doubled_penalty(undertricks, vulnerable),
        Doubled::Redoubled => 2 * doubled_penalty(undertricks, vulnerable),
    }
}

/// Score a played contract from the tricks the declaring side took
pub fn calculate_score(
    contract: &Contract,
    tricks_taken: u8,
    vulnerability: Vulnerability,
) -> Result<ScoreResult, ScoreError> {
    if usize::from(tricks_taken) > TOTAL_TRICKS {
        return Err(ScoreError::TooManyTricks(tricks_taken));
    }
    let vulnerable = vulnerability.is_vulnerable(contract.side());
    let needed = contract.tricks_needed();
    let mut breakdown = ScoreBreakdown::default();

    if tricks_taken < needed {
        let undertricks = needed - tricks_taken;
        breakdown.undertrick_penalty =
            undertrick_penalty(contract.doubled(), i32::from(undertricks), vulnerable);
        return Ok(ScoreResult {
            made: false,
            overtricks: 0,
            undertricks,
            score: breakdown.total(),
            breakdown,
        });
    }

    let overtricks = tricks_taken - needed;
    breakdown.contract_points = contract_points(contract);

    if breakdown.contract_points >= 100 {
        breakdown.game_bonus = if vulnerable { 500 } else { 300 };
    } else {
        breakdown.part_score_bonus = 50;
    }

    let (small_slam, grand_slam) = if vulnerable {
        (750, 1500)
    } else {
        (500, 1000)
    };
    breakdown.slam_bonus = match contract.level() {
        6 => small_slam,
        7 => grand_slam,
        _ => 0,
    };

    // Doubled overtricks: 100 each, twice that vulnerable, twice again redoubled
    let vulnerable_factor = if vulnerable { 2 } else { 1 };
    let per_overtrick = match contract.doubled() {
        Doubled::Undoubled => trick_value(contract.strain()),
        doubled => 50 * doubled.multiplier() * vulnerable_factor,
    };
    breakdown.overtrick_points = i32::from(overtricks) * per_overtrick;

    breakdown.insult_bonus = match contract.doubled() {
        Doubled::Undoubled => 0,
        Doubled::Doubled => 50,
        Doubled::Redoubled => 100,
    };

    Ok(ScoreResult {
        made: true,
        overtricks,
        undertricks: 0,
        score: breakdown.total(),
        breakdown,
    })
}
