//! Conversion between bridge-types and the engine's own types.
//!
//! Deals arrive from the dealing and bidding layers as `bridge_types::Deal`.
//! Play runs on the bitboard [`Hands`], so conversion happens once, at that
//! boundary.

use super::cards::Card;
use super::hands::Hands;
use super::types::{Rank, Seat, Suit};

impl Hands {
    /// Create Hands from a bridge_types::Deal
    pub fn from_deal(deal: &bridge_types::Deal) -> Self {
        let mut hands = Hands::new();
        for seat in Seat::ALL {
            for card in deal.hand(seat.into()).cards() {
                hands[seat].add(Card::from(card));
            }
        }
        hands
    }
}

impl From<&bridge_types::Card> for Card {
    fn from(card: &bridge_types::Card) -> Self {
        Card::new(convert_rank(card.rank), convert_suit(card.suit))
    }
}

/// bridge_types orders suits Clubs first; the bitboard starts at Spades
fn convert_suit(suit: bridge_types::Suit) -> Suit {
    match suit {
        bridge_types::Suit::Spades => Suit::Spades,
        bridge_types::Suit::Hearts => Suit::Hearts,
        bridge_types::Suit::Diamonds => Suit::Diamonds,
        bridge_types::Suit::Clubs => Suit::Clubs,
    }
}

/// bridge_types: Two=2 .. Ace=14
fn convert_rank(rank: bridge_types::Rank) -> Rank {
    Rank::from_index(rank as usize - 2)
}

impl From<Seat> for bridge_types::Direction {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::North => bridge_types::Direction::North,
            Seat::East => bridge_types::Direction::East,
            Seat::South => bridge_types::Direction::South,
            Seat::West => bridge_types::Direction::West,
        }
    }
}

impl From<bridge_types::Direction> for Seat {
    fn from(direction: bridge_types::Direction) -> Self {
        match direction {
            bridge_types::Direction::North => Seat::North,
            bridge_types::Direction::East => Seat::East,
            bridge_types::Direction::South => Seat::South,
            bridge_types::Direction::West => Seat::West,
        }
    }
}
