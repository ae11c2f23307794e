//! Contracts, doubling state and vulnerability
//!
//! Contract strings use the form `"<level><strain>[X|XX] by <declarer>"`,
//! e.g. `"3NT by S"`, `"4♠X by N"`, `"7♥XX by W"`.

use super::error::ContractError;
use super::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Doubling state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Doubled {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

impl Doubled {
    /// Multiplier applied to trick score: 1, 2 or 4
    pub fn multiplier(self) -> i32 {
        match self {
            Doubled::Undoubled => 1,
            Doubled::Doubled => 2,
            Doubled::Redoubled => 4,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Doubled::Undoubled => "",
            Doubled::Doubled => "X",
            Doubled::Redoubled => "XX",
        }
    }
}

/// A resolved contract; immutable once play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    level: u8,
    strain: Strain,
    declarer: Seat,
    doubled: Doubled,
}

impl Contract {
    pub fn new(
        level: u8,
        strain: Strain,
        declarer: Seat,
        doubled: Doubled,
    ) -> Result<Self, ContractError> {
        if !(1..=7).contains(&level) {
            return Err(ContractError::InvalidLevel(level));
        }
        Ok(Contract {
            level,
            strain,
            declarer,
            doubled,
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn strain(&self) -> Strain {
        self.strain
    }

    pub fn declarer(&self) -> Seat {
        self.declarer
    }

    pub fn doubled(&self) -> Doubled {
        self.doubled
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.strain.trump()
    }

    pub fn tricks_needed(&self) -> u8 {
        self.level + 6
    }

    /// Declarer's partner
    pub fn dummy(&self) -> Seat {
        self.declarer.partner()
    }

    /// The seat left of declarer makes the opening lead
    pub fn opening_leader(&self) -> Seat {
        self.declarer.left_hand_opp()
    }

    pub fn side(&self) -> Side {
        self.declarer.side()
    }

    pub fn is_declaring_side(&self, seat: Seat) -> bool {
        seat.side() == self.side()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{} by {}",
            self.level,
            self.strain,
            self.doubled.suffix(),
            self.declarer.letter()
        )
    }
}

impl FromStr for Contract {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_contract(s)
    }
}

/// Parse a contract string such as `"3NT by S"` or `"4♠X by N"`.
///
/// Letter strains (`S`, `H`, `D`, `C`, `N`) are accepted alongside the glyphs.
pub fn parse_contract(s: &str) -> Result<Contract, ContractError> {
    let malformed = || ContractError::Malformed(s.to_string());
    let trimmed = s.trim();

    let (bid, declarer) = trimmed
        .rsplit_once(char::is_whitespace)
        .and_then(|(head, declarer)| {
            let head = head.trim_end();
            let bid = head
                .strip_suffix("by")
                .or_else(|| head.strip_suffix("BY"))
                .or_else(|| head.strip_suffix("By"))?;
            Some((bid.trim(), declarer))
        })
        .ok_or_else(malformed)?;

    let mut declarer_chars = declarer.chars();
    let declarer = match (declarer_chars.next(), declarer_chars.next()) {
        (Some(c), None) => Seat::from_char(c),
        _ => None,
    }
    .ok_or_else(|| ContractError::InvalidDeclarer(declarer.to_string()))?;

    let mut chars = bid.chars();
    let level = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(malformed)? as u8;
    let rest = chars.as_str();

    let upper = rest.to_ascii_uppercase();
    let (strain_text, doubled) = if let Some(strain) = upper.strip_suffix("XX") {
        (strain.to_string(), Doubled::Redoubled)
    } else if let Some(strain) = upper.strip_suffix('X') {
        (strain.to_string(), Doubled::Doubled)
    } else {
        (upper.clone(), Doubled::Undoubled)
    };

    let strain = parse_strain(&strain_text)
        .ok_or_else(|| ContractError::InvalidStrain(strain_text.clone()))?;

    Contract::new(level, strain, declarer, doubled)
}

fn parse_strain(s: &str) -> Option<Strain> {
    match s {
        "NT" | "N" => Some(Strain::NoTrump),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Suit::from_char(c).map(Strain::from),
                _ => None,
            }
        }
    }
}

/// Per-partnership vulnerability flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vulnerability {
    pub ns: bool,
    pub ew: bool,
}

impl Vulnerability {
    pub const NONE: Vulnerability = Vulnerability { ns: false, ew: false };
    pub const NS: Vulnerability = Vulnerability { ns: true, ew: false };
    pub const EW: Vulnerability = Vulnerability { ns: false, ew: true };
    pub const BOTH: Vulnerability = Vulnerability { ns: true, ew: true };

    pub fn is_vulnerable(&self, side: Side) -> bool {
        match side {
            Side::NorthSouth => self.ns,
            Side::EastWest => self.ew,
        }
    }
}

impl FromStr for Vulnerability {
    type Err = ContractError;

    /// PBN forms: None, NS, EW, All (plus Both and Love)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "LOVE" | "-" => Ok(Vulnerability::NONE),
            "NS" | "N-S" => Ok(Vulnerability::NS),
            "EW" | "E-W" => Ok(Vulnerability::EW),
            "ALL" | "BOTH" => Ok(Vulnerability::BOTH),
            _ => Err(ContractError::InvalidVulnerability(s.to_string())),
        }
    }
}
