//! Cards bitboard representation
//!
//! Uses a 52-bit integer where each bit represents a card.
//! Cards are ordered by suit (SHDC) then rank (Ace high).
//! Bit 0 = Spade Ace, Bit 12 = Spade 2, Bit 13 = Heart Ace, etc.

use super::error::DealError;
use super::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bits of all 52 cards
const DECK_MASK: u64 = (1u64 << TOTAL_CARDS) - 1;

/// Get mask for a suit (13 bits)
#[inline]
pub fn mask_of(suit: Suit) -> u64 {
    0x1FFF << (suit.index() * NUM_RANKS)
}

/// A single playing card. Equality is by (rank, suit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Bit index of the card (0-51)
    #[inline]
    pub fn index(self) -> usize {
        self.suit.index() * NUM_RANKS + (NUM_RANKS - 1 - self.rank.index())
    }

    /// Card from its bit index (0-51)
    #[inline]
    pub fn from_index(index: usize) -> Card {
        Card {
            suit: Suit::from_index(index / NUM_RANKS),
            rank: Rank::from_index(NUM_RANKS - 1 - (index % NUM_RANKS)),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.glyph(), self.rank.to_char())
    }
}

impl FromStr for Card {
    type Err = DealError;

    /// Accepts suit-first ("SA", "♠A", "H10") and rank-first ("AS", "10H", "A♠") forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DealError::InvalidCard(s.to_string());
        let chars: Vec<char> = s.trim().chars().filter(|c| !c.is_whitespace()).collect();
        let (first, rest) = chars.split_first().ok_or_else(invalid)?;
        let last = *chars.last().ok_or_else(invalid)?;

        let rank_text = |text: &[char]| -> Option<Rank> {
            match text {
                ['1', '0'] => Some(Rank::Ten),
                [c] => Rank::from_char(*c).filter(|_| *c != '1'),
                _ => None,
            }
        };

        if let Some(suit) = Suit::from_char(*first) {
            if let Some(rank) = rank_text(rest) {
                return Ok(Card::new(rank, suit));
            }
        }
        if let Some(suit) = Suit::from_char(last) {
            if let Some(rank) = rank_text(&chars[..chars.len() - 1]) {
                return Ok(Card::new(rank, suit));
            }
        }
        Err(invalid())
    }
}

/// Cards represented as a 52-bit bitboard
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cards {
    bits: u64,
}

impl Cards {
    /// Create empty card set
    #[inline]
    pub const fn new() -> Self {
        Cards { bits: 0 }
    }

    /// Create from raw bits; bits above the 52nd are dropped
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Cards {
            bits: bits & DECK_MASK,
        }
    }

    /// The full 52-card deck
    #[inline]
    pub const fn full_deck() -> Self {
        Cards { bits: DECK_MASK }
    }

    /// Count number of cards
    #[inline]
    pub fn size(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if a card is present
    #[inline]
    pub fn have(&self, card: Card) -> bool {
        self.bits & (1u64 << card.index()) != 0
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Get cards in a specific suit
    #[inline]
    pub fn suit(&self, suit: Suit) -> Cards {
        Cards::from_bits(self.bits & mask_of(suit))
    }

    /// Get highest card (lowest bit index = highest rank)
    #[inline]
    pub fn top(&self) -> Option<Card> {
        if self.is_empty() {
            None
        } else {
            Some(Card::from_index(self.bits.trailing_zeros() as usize))
        }
    }

    /// Get lowest card (highest bit index = lowest rank)
    #[inline]
    pub fn bottom(&self) -> Option<Card> {
        if self.is_empty() {
            None
        } else {
            Some(Card::from_index(63 - self.bits.leading_zeros() as usize))
        }
    }

    /// Union of two card sets
    #[inline]
    pub fn union(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits | other.bits)
    }

    /// Intersection of two card sets
    #[inline]
    pub fn intersect(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits & other.bits)
    }

    /// Add a single card
    #[inline]
    pub fn add(&mut self, card: Card) -> &mut Self {
        self.bits |= 1u64 << card.index();
        self
    }

    /// Remove a single card
    #[inline]
    pub fn remove(&mut self, card: Card) -> &mut Self {
        self.bits &= !(1u64 << card.index());
        self
    }

    /// Add all cards from another set
    #[inline]
    pub fn add_cards(&mut self, other: Cards) -> &mut Self {
        self.bits |= other.bits;
        self
    }

    /// Calculate high card points
    pub fn points(&self) -> usize {
        self.iter()
            .filter(|card| card.rank > Rank::Ten)
            .map(|card| card.rank.index() - Rank::Ten.index())
            .sum()
    }

    /// Iterate over cards (from highest to lowest, spades first)
    pub fn iter(&self) -> CardsIterator {
        CardsIterator { bits: self.bits }
    }

    /// Iterate over cards from lowest to highest
    pub fn iter_low(&self) -> impl Iterator<Item = Card> {
        let mut remaining = *self;
        std::iter::from_fn(move || {
            let card = remaining.bottom()?;
            remaining.remove(card);
            Some(card)
        })
    }
}

impl FromIterator<Card> for Cards {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut cards = Cards::new();
        for card in iter {
            cards.add(card);
        }
        cards
    }
}

impl fmt::Debug for Cards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cards(")?;
        for suit in Suit::ALL {
            let suit_cards = self.suit(suit);
            if !suit_cards.is_empty() {
                write!(f, "{}: ", suit.letter())?;
                for card in suit_cards.iter() {
                    write!(f, "{}", card.rank)?;
                }
                write!(f, " ")?;
            }
        }
        write!(f, ")")
    }
}

impl fmt::Display for Cards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for suit in Suit::ALL {
            let suit_cards = self.suit(suit);
            write!(f, "{} ", suit.glyph())?;
            if suit_cards.is_empty() {
                write!(f, "- ")?;
            } else {
                for card in suit_cards.iter() {
                    write!(f, "{}", card.rank)?;
                }
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

/// Iterator over cards in a Cards bitset
pub struct CardsIterator {
    bits: u64,
}

impl Iterator for CardsIterator {
    type Item = Card;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let index = self.bits.trailing_zeros() as usize;
            self.bits &= self.bits - 1; // Clear lowest set bit
            Some(Card::from_index(index))
        }
    }
}

impl IntoIterator for Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        CardsIterator { bits: self.bits }
    }
}

impl IntoIterator for &Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_card_indices() {
        // Spade Ace should be card 0
        let sa = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(sa.index(), 0);
        assert_eq!(Card::from_index(0), sa);

        // Spade 2 should be card 12
        assert_eq!(Card::new(Rank::Two, Suit::Spades).index(), 12);

        // Heart Ace should be card 13
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).index(), 13);

        // Club 2 should be card 51
        let c2 = Card::new(Rank::Two, Suit::Clubs);
        assert_eq!(c2.index(), 51);
        assert_eq!(Card::from_index(51), c2);
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!(card("SA"), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(card("AS"), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(card("♥K"), Card::new(Rank::King, Suit::Hearts));
        assert_eq!(card("10D"), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(card("CT"), Card::new(Rank::Ten, Suit::Clubs));
        assert!("ZZ".parse::<Card>().is_err());
        assert!("S1".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_display() {
        assert_eq!(card("SA").to_string(), "♠A");
        assert_eq!(card("HT").to_string(), "♥T");
    }

    #[test]
    fn test_cards_basic() {
        let mut cards = Cards::new();
        assert!(cards.is_empty());
        assert_eq!(cards.size(), 0);

        cards.add(card("SA"));
        assert!(!cards.is_empty());
        assert_eq!(cards.size(), 1);
        assert!(cards.have(card("SA")));

        cards.add(card("HK"));
        assert_eq!(cards.size(), 2);

        cards.remove(card("SA"));
        assert_eq!(cards.size(), 1);
        assert!(!cards.have(card("SA")));
    }

    #[test]
    fn test_cards_suit() {
        let cards: Cards = [card("SA"), card("SK"), card("HA")].into_iter().collect();

        let spades = cards.suit(Suit::Spades);
        assert_eq!(spades.size(), 2);
        assert!(spades.have(card("SA")));
        assert!(spades.have(card("SK")));
        assert!(!spades.have(card("HA")));
    }

    #[test]
    fn test_cards_top_bottom() {
        let cards: Cards = [card("SA"), card("S2"), card("HK")].into_iter().collect();

        assert_eq!(cards.top(), Some(card("SA")));
        assert_eq!(cards.bottom(), Some(card("HK")));
        assert_eq!(cards.suit(Suit::Spades).bottom(), Some(card("S2")));
        assert_eq!(Cards::new().top(), None);
    }

    #[test]
    fn test_cards_iteration() {
        let cards: Cards = [card("HA"), card("SK"), card("SA")].into_iter().collect();

        let collected: Vec<_> = cards.iter().collect();
        // Should be in order from top (highest) to bottom (lowest)
        assert_eq!(collected, vec![card("SA"), card("SK"), card("HA")]);

        let low_first: Vec<_> = cards.iter_low().collect();
        assert_eq!(low_first, vec![card("HA"), card("SK"), card("SA")]);
    }

    #[test]
    fn test_cards_points() {
        let cards: Cards = ["SA", "SK", "HQ", "HJ", "HT"]
            .iter()
            .map(|s| card(s))
            .collect();
        assert_eq!(cards.points(), 10);
    }

    #[test]
    fn test_cards_union_intersect() {
        let a: Cards = [card("SA"), card("SK")].into_iter().collect();
        let b: Cards = [card("SK"), card("HA")].into_iter().collect();

        assert_eq!(a.union(b).size(), 3);
        let intersect = a.intersect(b);
        assert_eq!(intersect.size(), 1);
        assert!(intersect.have(card("SK")));
        assert_eq!(Cards::full_deck().size(), 52);
    }

    #[test]
    fn test_from_bits_stays_in_deck() {
        let cards = Cards::from_bits(u64::MAX);
        assert_eq!(cards, Cards::full_deck());
        assert_eq!(cards.bottom(), Some(card("C2")));
        assert!(Cards::from_bits(1 << 60).is_empty());
    }
}
