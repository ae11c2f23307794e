//! Four hands representation - allocation-free
//!
//! Uses a fixed-size array of Cards (4 × u64), no heap allocation.

use super::cards::*;
use super::error::DealError;
use super::types::*;
use std::fmt;

/// Four hands, one per seat - no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Hands {
    hands: [Cards; NUM_SEATS],
}

impl Hands {
    /// Create empty hands
    #[inline]
    pub const fn new() -> Self {
        Hands {
            hands: [Cards::new(); NUM_SEATS],
        }
    }

    /// Build from four card sets indexed N, E, S, W
    pub fn from_cards(hands: [Cards; NUM_SEATS]) -> Self {
        Hands { hands }
    }

    /// Get hand for a seat
    #[inline]
    pub fn hand(&self, seat: Seat) -> Cards {
        self.hands[seat.index()]
    }

    /// Get all cards across all hands
    #[inline]
    pub fn all_cards(&self) -> Cards {
        self.hands[0]
            .union(self.hands[1])
            .union(self.hands[2])
            .union(self.hands[3])
    }

    /// Cards held by `seat` and its partner
    #[inline]
    pub fn partnership_cards(&self, seat: Seat) -> Cards {
        self.hand(seat).union(self.hand(seat.partner()))
    }

    /// Tricks left to play, counting one still in progress
    #[inline]
    pub fn num_tricks(&self) -> usize {
        self.hands.iter().map(Cards::size).max().unwrap_or(0)
    }

    /// Total cards still held across the four hands
    #[inline]
    pub fn total_size(&self) -> usize {
        self.hands.iter().map(Cards::size).sum()
    }

    /// A complete deal: 13 cards per hand, 52 distinct cards
    pub fn validate_full_deal(&self) -> Result<(), DealError> {
        self.validate_sizes(TOTAL_TRICKS)
    }

    /// An endgame position: equal, non-empty, disjoint hands
    pub fn validate_position(&self) -> Result<(), DealError> {
        let expected = self.num_tricks();
        if expected == 0 {
            return Err(DealError::EmptyDeal);
        }
        self.validate_sizes(expected)
    }

    fn validate_sizes(&self, expected: usize) -> Result<(), DealError> {
        let mut seen = Cards::new();
        for seat in Seat::ALL {
            let hand = self.hand(seat);
            let duplicates = seen.intersect(hand);
            if let Some(card) = duplicates.top() {
                return Err(DealError::DuplicateCard { card });
            }
            seen.add_cards(hand);
        }
        for seat in Seat::ALL {
            let count = self.hand(seat).size();
            if count != expected {
                return Err(DealError::WrongCardCount {
                    seat,
                    count,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Parse from PBN-style deal string
    /// Format: "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72"
    /// Order after first seat: rotates clockwise (N E S W or W N E S, etc.)
    ///
    /// A card appearing in two hands is rejected.
    pub fn from_pbn(s: &str) -> Result<Self, DealError> {
        let invalid = |why: &str| DealError::InvalidPbn(format!("{why}: {s:?}"));
        let mut hands = Hands::new();
        let s = s.trim();

        // Find the starting seat indicator
        let (start_seat, rest) = match s.split_once(':') {
            Some((seat, rest)) => {
                let mut chars = seat.chars();
                let seat = match (chars.next(), chars.next()) {
                    (Some(c), None) => Seat::from_char(c),
                    _ => None,
                };
                (seat.ok_or_else(|| invalid("bad first seat"))?, rest)
            }
            None => (Seat::North, s), // Default to North
        };

        // Split into four hands
        let hand_strs: Vec<&str> = rest.split_whitespace().collect();
        if hand_strs.len() != NUM_SEATS {
            return Err(invalid("expected four hands"));
        }

        // Parse each hand in clockwise order starting from start_seat
        let mut seen = Cards::new();
        for (i, hand_str) in hand_strs.iter().enumerate() {
            let seat = Seat::from_index(start_seat.index() + i);
            let cards = parse_hand(hand_str).ok_or_else(|| invalid("bad hand"))?;
            if let Some(card) = seen.intersect(cards).top() {
                return Err(DealError::DuplicateCard { card });
            }
            seen.add_cards(cards);
            hands.hands[seat.index()] = cards;
        }

        Ok(hands)
    }

    /// PBN deal string starting from North
    pub fn to_pbn(&self) -> String {
        let hands: Vec<String> = Seat::ALL
            .iter()
            .map(|&seat| {
                let suits: Vec<String> = Suit::ALL
                    .iter()
                    .map(|&suit| {
                        self.hand(seat)
                            .suit(suit)
                            .iter()
                            .map(|c| c.rank.to_char())
                            .collect()
                    })
                    .collect();
                suits.join(".")
            })
            .collect();
        format!("N:{}", hands.join(" "))
    }
}

impl std::ops::Index<Seat> for Hands {
    type Output = Cards;

    #[inline]
    fn index(&self, seat: Seat) -> &Self::Output {
        &self.hands[seat.index()]
    }
}

impl std::ops::IndexMut<Seat> for Hands {
    #[inline]
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.hands[seat.index()]
    }
}

impl fmt::Debug for Hands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seat in Seat::ALL {
            write!(f, "{}: {} ", seat.letter(), self.hand(seat))?;
        }
        Ok(())
    }
}

impl fmt::Display for Hands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        {}", self.hand(Seat::North))?;
        writeln!(f, "{}        {}", self.hand(Seat::West), self.hand(Seat::East))?;
        writeln!(f, "        {}", self.hand(Seat::South))
    }
}

/// Parse a single hand from PBN format (SHDC separated by dots)
fn parse_hand(s: &str) -> Option<Cards> {
    let mut cards = Cards::new();
    let suits: Vec<&str> = s.split('.').collect();
    if suits.len() != NUM_SUITS {
        return None;
    }

    for (suit, suit_str) in Suit::ALL.iter().zip(suits.iter()) {
        let mut chars = suit_str.chars();
        while let Some(c) = chars.next() {
            if c == '-' {
                continue; // Void marker
            }
            if c == '1' {
                // "10" spelled out
                if chars.next() != Some('0') {
                    return None;
                }
            }
            let rank = Rank::from_char(c)?;
            let card = Card::new(rank, *suit);
            if cards.have(card) {
                return None;
            }
            cards.add(card);
        }
    }

    Some(cards)
}
