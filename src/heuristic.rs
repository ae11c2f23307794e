//! Rule-based card play
//!
//! No lookahead: each decision applies a table-side rule of thumb to the
//! seat's own hand and the trick on the table.
//!
//! - Leading: top of a sequence headed by a ten or better, else fourth best
//!   from the longest side suit. After the opening lead a side-suit winner is
//!   cashed first.
//! - Second hand plays low.
//! - Third hand plays high (the cheaper of touching top cards) unless partner
//!   is already winning.
//! - Fourth hand wins as cheaply as possible unless partner is winning.
//! - Void: ruff with the cheapest trump that wins, otherwise discard low from
//!   the longest suit that holds no winner.
//!
//! Cards still out are read from the hands, which is the same as reading
//! them from the played cards.

use super::cards::*;
use super::error::AiError;
use super::rules::{current_winner, wins_over};
use super::state::PlayState;
use super::strategy::{legal_choices, DifficultyTier, PlayStrategy};
use super::types::*;
use std::fmt;
use tracing::debug;

/// Why the heuristic picked a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    OnlyCard,
    CashWinner,
    TopOfSequence,
    FourthBest,
    TopOfShortSuit,
    LowFromHonor,
    SecondHandLow,
    ThirdHandHigh,
    WinCheaply,
    PartnerWinning,
    CannotWin,
    Ruff,
    Discard,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::OnlyCard => "the only legal card",
            Reason::CashWinner => "cashing a winner",
            Reason::TopOfSequence => "top of a sequence",
            Reason::FourthBest => "fourth best from the longest suit",
            Reason::TopOfShortSuit => "top of a short suit",
            Reason::LowFromHonor => "low from an honour",
            Reason::SecondHandLow => "second hand low",
            Reason::ThirdHandHigh => "third hand high",
            Reason::WinCheaply => "winning as cheaply as possible",
            Reason::PartnerWinning => "partner is winning the trick",
            Reason::CannotWin => "cannot win the trick",
            Reason::Ruff => "ruffing",
            Reason::Discard => "discarding from a weak suit",
        };
        f.write_str(text)
    }
}

/// Rule-of-thumb player used at the lowest difficulty and as a fallback
#[derive(Debug, Clone, Default)]
pub struct HeuristicAi {
    last: Option<(Seat, Card, Reason)>,
}

impl HeuristicAi {
    pub const NAME: &'static str = "heuristic";

    pub fn new() -> Self {
        HeuristicAi::default()
    }

    /// Reason behind the most recent choice
    pub fn last_reason(&self) -> Option<Reason> {
        self.last.map(|(_, _, reason)| reason)
    }

    fn decide(state: &PlayState, seat: Seat, legal: Cards) -> Option<(Card, Reason)> {
        if legal.size() == 1 {
            return legal.top().map(|card| (card, Reason::OnlyCard));
        }

        let trick = state.current_trick();
        let Some(led) = trick.led_suit() else {
            return lead(state, legal);
        };

        let trump = state.trump_suit();
        let winner = current_winner(trick, trump)?;
        let partner_winning = winner.seat == seat.partner();
        let outstanding = state.hands().all_cards();

        if legal.suit(led).is_empty() {
            return void(legal, winner.card, partner_winning, trump, outstanding);
        }

        let cheapest_winner = legal.iter_low().find(|&c| wins_over(c, winner.card, trump));
        let low = legal.bottom().map(|card| (card, Reason::SecondHandLow));

        match trick.len() {
            1 => low,
            2 if partner_winning => legal.bottom().map(|card| (card, Reason::PartnerWinning)),
            2 => match cheapest_winner {
                Some(_) => {
                    top_of_equals(legal, outstanding).map(|card| (card, Reason::ThirdHandHigh))
                }
                None => legal.bottom().map(|card| (card, Reason::CannotWin)),
            },
            _ if partner_winning => legal.bottom().map(|card| (card, Reason::PartnerWinning)),
            _ => match cheapest_winner {
                Some(card) => Some((card, Reason::WinCheaply)),
                None => legal.bottom().map(|card| (card, Reason::CannotWin)),
            },
        }
    }
}

/// Choose an opening or later lead from `hand`
fn lead(state: &PlayState, hand: Cards) -> Option<(Card, Reason)> {
    let trump = state.trump_suit();
    let outstanding = state.hands().all_cards();
    let side_suits: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|&suit| Some(suit) != trump && !hand.suit(suit).is_empty())
        .collect();

    if state.tricks_played() > 0 {
        for &suit in &side_suits {
            let top = hand.suit(suit).top();
            if top.is_some() && top == outstanding.suit(suit).top() {
                return top.map(|card| (card, Reason::CashWinner));
            }
        }
    }

    // Only trumps left
    let candidates = if side_suits.is_empty() {
        Suit::ALL.to_vec()
    } else {
        side_suits
    };

    // Longest suit, stronger suit on equal length, suit order after that
    let mut best: Option<Cards> = None;
    for suit in candidates {
        let cards = hand.suit(suit);
        let better = match best {
            None => !cards.is_empty(),
            Some(b) => (cards.size(), cards.points()) > (b.size(), b.points()),
        };
        if better {
            best = Some(cards);
        }
    }

    lead_from_suit(best?)
}

/// Conventional lead from one suit
fn lead_from_suit(cards: Cards) -> Option<(Card, Reason)> {
    let ranked: Vec<Card> = cards.iter().collect();

    // Top of a (possibly internal) sequence such as KQ, QJT or AQJ
    for pair in ranked.windows(2) {
        if pair[0].rank >= Rank::Ten && pair[0].rank.index() == pair[1].rank.index() + 1 {
            return Some((pair[0], Reason::TopOfSequence));
        }
    }

    match ranked.len() {
        0 => None,
        1 | 2 => Some((ranked[0], Reason::TopOfShortSuit)),
        3 if ranked[0].rank.is_honor() => Some((ranked[2], Reason::LowFromHonor)),
        3 => Some((ranked[0], Reason::TopOfShortSuit)),
        _ => Some((ranked[3], Reason::FourthBest)),
    }
}

/// Highest card of `cards`, or the cheapest card equal to it: the lowest of
/// the unbroken run of outstanding cards starting at our top card
fn top_of_equals(cards: Cards, outstanding: Cards) -> Option<Card> {
    let top = cards.top()?;
    let mut result = top;
    for card in outstanding.suit(top.suit).iter().skip_while(|&c| c != top) {
        if !cards.have(card) {
            break;
        }
        result = card;
    }
    Some(result)
}

/// Play when unable to follow suit
fn void(
    hand: Cards,
    winning: Card,
    partner_winning: bool,
    trump: Option<Suit>,
    outstanding: Cards,
) -> Option<(Card, Reason)> {
    if let Some(trump) = trump {
        if !partner_winning {
            let ruff = hand
                .suit(trump)
                .iter_low()
                .find(|&c| wins_over(c, winning, Some(trump)));
            if let Some(card) = ruff {
                return Some((card, Reason::Ruff));
            }
        }
    }
    discard(hand, trump, outstanding).map(|card| (card, Reason::Discard))
}

/// Lowest card of the longest side suit without a winner in it
fn discard(hand: Cards, trump: Option<Suit>, outstanding: Cards) -> Option<Card> {
    let side: Vec<Cards> = Suit::ALL
        .into_iter()
        .filter(|&suit| Some(suit) != trump)
        .map(|suit| hand.suit(suit))
        .filter(|cards| !cards.is_empty())
        .collect();

    let has_winner = |cards: &Cards| {
        cards
            .top()
            .is_some_and(|top| outstanding.suit(top.suit).top() == Some(top))
    };

    let weak: Vec<Cards> = side.iter().copied().filter(|c| !has_winner(c)).collect();
    let pool = if !weak.is_empty() {
        weak
    } else if !side.is_empty() {
        side
    } else {
        // Nothing but trumps
        return hand.iter_low().next();
    };

    // Longest first, fewer points on equal length
    let mut best: Option<Cards> = None;
    for cards in pool {
        let better = match best {
            None => true,
            Some(b) => {
                cards.size() > b.size() || (cards.size() == b.size() && cards.points() < b.points())
            }
        };
        if better {
            best = Some(cards);
        }
    }
    best.and_then(|cards| cards.bottom())
}

impl PlayStrategy for HeuristicAi {
    fn choose_card(&mut self, state: &PlayState, seat: Seat) -> Result<Card, AiError> {
        self.last = None;
        let legal = legal_choices(state, seat)?;
        let (card, reason) = Self::decide(state, seat, legal)
            .ok_or(AiError::NoLegalPlays(seat))?;
        debug!(seat = %seat, card = %card, reason = %reason, "heuristic choice");
        self.last = Some((seat, card, reason));
        Ok(card)
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn difficulty_tier(&self) -> DifficultyTier {
        DifficultyTier::Beginner
    }

    fn explain_last_choice(&self) -> Option<String> {
        self.last
            .map(|(seat, card, reason)| format!("{seat} played {card}: {reason}"))
    }
}
