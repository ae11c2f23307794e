//! Core type definitions: seats, suits, ranks and strains

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_SUITS: usize = 4;
pub const NUM_RANKS: usize = 13;
pub const NUM_SEATS: usize = 4;
pub const TOTAL_TRICKS: usize = NUM_RANKS;
pub const TOTAL_CARDS: usize = NUM_RANKS * NUM_SUITS;

/// Suits in bitboard order: SPADES=0, HEARTS=1, DIAMONDS=2, CLUBS=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; NUM_SUITS] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Suit {
        Suit::ALL[index]
    }

    pub fn letter(self) -> char {
        const LETTERS: [char; NUM_SUITS] = ['S', 'H', 'D', 'C'];
        LETTERS[self.index()]
    }

    pub fn glyph(self) -> char {
        const GLYPHS: [char; NUM_SUITS] = ['♠', '♥', '♦', '♣'];
        GLYPHS[self.index()]
    }

    /// Accepts both the letter and the glyph form
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'S' | '♠' => Some(Suit::Spades),
            'H' | '♥' => Some(Suit::Hearts),
            'D' | '♦' => Some(Suit::Diamonds),
            'C' | '♣' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Ranks: TWO=0, ..., TEN=8, JACK=9, QUEEN=10, KING=11, ACE=12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; NUM_RANKS] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Rank {
        Rank::ALL[index]
    }

    pub fn to_char(self) -> char {
        const NAMES: [char; NUM_RANKS] = [
            '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
        ];
        NAMES[self.index()]
    }

    /// 'T' and '1' (the leading digit of "10") both map to the ten
    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' | '1' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Is this rank an honour (ten or higher)
    pub fn is_honor(self) -> bool {
        self >= Rank::Ten
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Seats in clockwise order: NORTH=0, EAST=1, SOUTH=2, WEST=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    pub const ALL: [Seat; NUM_SEATS] = [Seat::North, Seat::East, Seat::South, Seat::West];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Seat {
        Seat::ALL[index % NUM_SEATS]
    }

    /// Next seat (clockwise)
    #[inline]
    pub fn next(self) -> Seat {
        Seat::from_index(self.index() + 1)
    }

    #[inline]
    pub fn partner(self) -> Seat {
        Seat::from_index(self.index() + 2)
    }

    #[inline]
    pub fn left_hand_opp(self) -> Seat {
        Seat::from_index(self.index() + 1)
    }

    #[inline]
    pub fn right_hand_opp(self) -> Seat {
        Seat::from_index(self.index() + 3)
    }

    /// Check if seat is NS (North or South)
    #[inline]
    pub fn is_ns(self) -> bool {
        self.index() & 1 == 0
    }

    #[inline]
    pub fn side(self) -> Side {
        if self.is_ns() {
            Side::NorthSouth
        } else {
            Side::EastWest
        }
    }

    pub fn name(self) -> &'static str {
        const NAMES: [&str; NUM_SEATS] = ["North", "East", "South", "West"];
        NAMES[self.index()]
    }

    pub fn letter(self) -> char {
        const LETTERS: [char; NUM_SEATS] = ['N', 'E', 'S', 'W'];
        LETTERS[self.index()]
    }

    pub fn from_char(c: char) -> Option<Seat> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A partnership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    NorthSouth,
    EastWest,
}

impl Side {
    pub fn opponents(self) -> Side {
        match self {
            Side::NorthSouth => Side::EastWest,
            Side::EastWest => Side::NorthSouth,
        }
    }

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Side::NorthSouth => [Seat::North, Seat::South],
            Side::EastWest => [Seat::East, Seat::West],
        }
    }
}

/// Contract denomination, ordered as in the auction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    pub const ALL: [Strain; 5] = [
        Strain::Clubs,
        Strain::Diamonds,
        Strain::Hearts,
        Strain::Spades,
        Strain::NoTrump,
    ];

    /// The trump suit, or None at no-trump
    pub fn trump(self) -> Option<Suit> {
        match self {
            Strain::Clubs => Some(Suit::Clubs),
            Strain::Diamonds => Some(Suit::Diamonds),
            Strain::Hearts => Some(Suit::Hearts),
            Strain::Spades => Some(Suit::Spades),
            Strain::NoTrump => None,
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, Strain::Clubs | Strain::Diamonds)
    }
}

impl From<Suit> for Strain {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => Strain::Clubs,
            Suit::Diamonds => Strain::Diamonds,
            Suit::Hearts => Strain::Hearts,
            Suit::Spades => Strain::Spades,
        }
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.trump() {
            Some(suit) => write!(f, "{}", suit.glyph()),
            None => write!(f, "NT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ns() {
        assert!(Seat::North.is_ns());
        assert!(!Seat::East.is_ns());
        assert!(Seat::South.is_ns());
        assert!(!Seat::West.is_ns());
    }

    #[test]
    fn test_partner() {
        assert_eq!(Seat::West.partner(), Seat::East);
        assert_eq!(Seat::North.partner(), Seat::South);
        assert_eq!(Seat::East.partner(), Seat::West);
        assert_eq!(Seat::South.partner(), Seat::North);
    }

    #[test]
    fn test_clockwise_rotation() {
        assert_eq!(Seat::North.next(), Seat::East);
        assert_eq!(Seat::East.next(), Seat::South);
        assert_eq!(Seat::South.next(), Seat::West);
        assert_eq!(Seat::West.next(), Seat::North);
        assert_eq!(Seat::North.right_hand_opp(), Seat::West);
    }

    #[test]
    fn test_char_to_suit() {
        assert_eq!(Suit::from_char('S'), Some(Suit::Spades));
        assert_eq!(Suit::from_char('h'), Some(Suit::Hearts));
        assert_eq!(Suit::from_char('♦'), Some(Suit::Diamonds));
        assert_eq!(Suit::from_char('X'), None);
    }

    #[test]
    fn test_char_to_rank() {
        assert_eq!(Rank::from_char('A'), Some(Rank::Ace));
        assert_eq!(Rank::from_char('T'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('2'), Some(Rank::Two));
        assert_eq!(Rank::from_char('X'), None);
        assert!(Rank::Two < Rank::Ten && Rank::Ten < Rank::Jack && Rank::King < Rank::Ace);
    }

    #[test]
    fn test_strain_trump() {
        assert_eq!(Strain::Hearts.trump(), Some(Suit::Hearts));
        assert_eq!(Strain::NoTrump.trump(), None);
        assert_eq!(Strain::from(Suit::Clubs), Strain::Clubs);
        assert_eq!(Strain::NoTrump.to_string(), "NT");
        assert_eq!(Strain::Spades.to_string(), "♠");
        assert!(Strain::Diamonds.is_minor());
        assert!(!Strain::Hearts.is_minor() && !Strain::NoTrump.is_minor());
    }

    #[test]
    fn test_seat_names() {
        assert_eq!(Seat::West.name(), "West");
        assert_eq!(Seat::South.to_string(), "S");
    }
}
