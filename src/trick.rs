//! Tricks: cards played in order, and archived completed tricks

use super::cards::Card;
use super::types::*;
use serde::{Deserialize, Serialize};

/// A card played to a trick, with the seat that played it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    pub seat: Seat,
}

impl PlayedCard {
    pub fn new(card: Card, seat: Seat) -> Self {
        PlayedCard { card, seat }
    }
}

/// Up to four cards in play order. Fixed capacity, so tricks are `Copy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Trick {
    plays: [Option<PlayedCard>; NUM_SEATS],
    count: usize,
}

impl Trick {
    /// Create an empty trick
    pub fn new() -> Self {
        Trick::default()
    }

    /// Build a trick from plays in order; extra plays beyond four are ignored
    pub fn from_plays(plays: &[(Card, Seat)]) -> Self {
        let mut trick = Trick::new();
        for &(card, seat) in plays.iter().take(NUM_SEATS) {
            trick.add(card, seat);
        }
        trick
    }

    /// Add a card to the trick. Callers never add to a complete trick.
    pub fn add(&mut self, card: Card, seat: Seat) -> &mut Self {
        debug_assert!(self.count < NUM_SEATS, "trick already holds four cards");
        self.plays[self.count] = Some(PlayedCard::new(card, seat));
        self.count += 1;
        self
    }

    /// Remove and return the last card played
    pub fn pop(&mut self) -> Option<PlayedCard> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        self.plays[self.count].take()
    }

    /// Get the number of cards played
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if no cards have been played
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_complete(&self) -> bool {
        self.count == NUM_SEATS
    }

    /// Cards played so far, in play order
    pub fn plays(&self) -> impl Iterator<Item = PlayedCard> + '_ {
        self.plays[..self.count].iter().flatten().copied()
    }

    /// Get the lead suit (suit of the first card played)
    pub fn led_suit(&self) -> Option<Suit> {
        self.plays[0].map(|p| p.card.suit)
    }

    /// Get the seat that led to this trick
    pub fn leader(&self) -> Option<Seat> {
        self.plays[0].map(|p| p.seat)
    }

    /// Get the next seat to play
    pub fn next_to_play(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        self.last().map(|p| p.seat.next())
    }

    pub fn last(&self) -> Option<PlayedCard> {
        self.count.checked_sub(1).and_then(|i| self.plays[i])
    }

    /// The card a seat played to this trick
    pub fn card_of(&self, seat: Seat) -> Option<Card> {
        self.plays().find(|p| p.seat == seat).map(|p| p.card)
    }
}

/// A finished trick and the seat that won it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: Seat,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_trick_builder() {
        let mut trick = Trick::new();
        assert!(trick.is_empty());
        assert_eq!(trick.len(), 0);
        assert_eq!(trick.led_suit(), None);

        trick.add(card("S3"), Seat::West);
        assert!(!trick.is_empty());
        assert_eq!(trick.len(), 1);
        assert_eq!(trick.led_suit(), Some(Suit::Spades));
        assert_eq!(trick.leader(), Some(Seat::West));
        assert_eq!(trick.next_to_play(), Some(Seat::North));

        trick.add(card("SA"), Seat::North);
        assert_eq!(trick.len(), 2);
        assert_eq!(trick.next_to_play(), Some(Seat::East));
        assert_eq!(trick.card_of(Seat::North), Some(card("SA")));
        assert_eq!(trick.card_of(Seat::South), None);
    }

    #[test]
    fn test_trick_pop() {
        let mut trick = Trick::from_plays(&[(card("S3"), Seat::West), (card("SA"), Seat::North)]);
        assert_eq!(trick.pop(), Some(PlayedCard::new(card("SA"), Seat::North)));
        assert_eq!(trick.len(), 1);
        assert_eq!(trick.last(), Some(PlayedCard::new(card("S3"), Seat::West)));
        trick.pop();
        assert_eq!(trick.pop(), None);
        assert_eq!(trick, Trick::new());
    }

    #[test]
    fn test_complete_trick() {
        let trick = Trick::from_plays(&[
            (card("S2"), Seat::West),
            (card("SA"), Seat::North),
            (card("SK"), Seat::East),
            (card("S3"), Seat::South),
        ]);
        assert!(trick.is_complete());
        assert_eq!(trick.next_to_play(), None);
        assert_eq!(trick.plays().count(), 4);
    }
}
