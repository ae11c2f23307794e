//! Rules of play: follow-suit legality, trick resolution, rotation
//!
//! Pure functions over hands and tricks; nothing here mutates play state.

use super::cards::*;
use super::error::PlayError;
use super::hands::Hands;
use super::trick::{PlayedCard, Trick};
use super::types::*;

/// Get playable cards for a hand given the trick in progress
pub fn legal_plays(hand: Cards, current_trick: &Trick) -> Cards {
    if let Some(suit) = current_trick.led_suit() {
        // Must follow suit if possible
        let suit_cards = hand.suit(suit);
        if !suit_cards.is_empty() {
            return suit_cards;
        }
    }

    // Can play any card
    hand
}

/// Is `card` a legal play from `hand` to `current_trick`.
///
/// Leading, anything goes. Following, a card of the led suit is required
/// when the hand holds one; a void hand may trump or discard freely, so
/// the trump suit never restricts legality.
pub fn is_legal_play(
    card: Card,
    hand: Cards,
    current_trick: &Trick,
    _trump_suit: Option<Suit>,
) -> bool {
    hand.have(card) && legal_plays(hand, current_trick).have(card)
}

/// Like [`is_legal_play`], naming the reason a play is rejected
pub fn check_play(
    seat: Seat,
    card: Card,
    hand: Cards,
    current_trick: &Trick,
) -> Result<(), PlayError> {
    if !hand.have(card) {
        return Err(PlayError::CardNotHeld { seat, card });
    }
    if !legal_plays(hand, current_trick).have(card) {
        if let Some(led) = current_trick.led_suit() {
            return Err(PlayError::MustFollowSuit { seat, card, led });
        }
    }
    Ok(())
}

/// Does `challenger` beat `winning`, the card currently holding the trick.
///
/// `winning` is always either of the led suit or a trump, so a card of
/// another suit never wins.
#[inline]
pub fn wins_over(challenger: Card, winning: Card, trump_suit: Option<Suit>) -> bool {
    if challenger.suit == winning.suit {
        challenger.rank > winning.rank
    } else {
        Some(challenger.suit) == trump_suit
    }
}

/// The play currently winning a (possibly partial) trick
pub fn current_winner(trick: &Trick, trump_suit: Option<Suit>) -> Option<PlayedCard> {
    let mut plays = trick.plays();
    let mut best = plays.next()?;
    for play in plays {
        if wins_over(play.card, best.card, trump_suit) {
            best = play;
        }
    }
    Some(best)
}

/// Winner of a completed trick: the highest trump if any was played,
/// otherwise the highest card of the led suit. None until four cards are in.
pub fn determine_trick_winner(trick: &Trick, trump_suit: Option<Suit>) -> Option<Seat> {
    if !trick.is_complete() {
        return None;
    }
    current_winner(trick, trump_suit).map(|p| p.seat)
}

/// Fixed clockwise rotation N→E→S→W→N
#[inline]
pub fn next_player(seat: Seat) -> Seat {
    seat.next()
}

#[inline]
pub fn is_trick_complete(trick: &Trick) -> bool {
    trick.is_complete()
}

/// All hands empty and no trick in progress
#[inline]
pub fn is_deal_complete(hands: &Hands, current_trick: &Trick) -> bool {
    hands.all_cards().is_empty() && current_trick.is_empty()
}
