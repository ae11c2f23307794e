//! Static position evaluation
//!
//! Scores a position as a trick-count advantage for the perspective seat's
//! partnership, roughly within [-13, +13]. Two terms are combined:
//!
//! - tricks already won by each side (exact)
//! - "sure winners": per suit, the unbroken run of top cards a partnership
//!   holds among the cards still out, counted at a fraction of a trick so it
//!   never outweighs a trick actually taken
//!
//! No trump control, entries or signalling are modelled. Sure winners in a
//! side suit are counted even when an opponent could ruff them.
//!
//! Both partnerships' winners are read from all four hands, not just the
//! cards the perspective seat can see, so the score is zero-sum:
//! `evaluate(s, seat) == -evaluate(s, seat.next())`.

use super::hands::Hands;
use super::state::PlayState;
use super::types::*;
use serde::{Deserialize, Serialize};

/// Position evaluation used at search leaves
pub trait Evaluator: Send + Sync {
    /// Score `state` for the partnership of `perspective`; higher is better
    /// for that side and `evaluate(s, seat) == -evaluate(s, seat.next())`.
    fn evaluate(&self, state: &PlayState, perspective: Seat) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub tricks_won: f64,
    pub sure_winners: f64,
    /// Value of one sure winner before `sure_winners` weighting
    pub sure_winner_increment: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            tricks_won: 1.0,
            sure_winners: 0.6,
            sure_winner_increment: 0.5,
        }
    }
}

/// Weighted tricks-won plus sure-winners evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionEvaluator {
    weights: EvalWeights,
}

impl PositionEvaluator {
    pub fn new(weights: EvalWeights) -> Self {
        PositionEvaluator { weights }
    }
}

impl Evaluator for PositionEvaluator {
    fn evaluate(&self, state: &PlayState, perspective: Seat) -> f64 {
        let ours = perspective.side();
        let theirs = ours.opponents();

        let trick_diff = f64::from(state.side_tricks(ours)) - f64::from(state.side_tricks(theirs));

        let hands = state.hands();
        let our_winners = sure_winners(hands, perspective);
        let their_winners = sure_winners(hands, perspective.next());
        let winner_diff =
            (our_winners as f64 - their_winners as f64) * self.weights.sure_winner_increment;

        self.weights.tricks_won * trick_diff + self.weights.sure_winners * winner_diff
    }
}

/// Top-of-suit winners the partnership of `seat` holds: per suit, the run
/// of the highest outstanding cards held by either hand, capped by the
/// longer holding since the two hands can't both win with the same trick.
pub fn sure_winners(hands: &Hands, seat: Seat) -> usize {
    let outstanding = hands.all_cards();
    let ours = hands.partnership_cards(seat);
    let (hand, partner) = (hands.hand(seat), hands.hand(seat.partner()));
    Suit::ALL
        .iter()
        .map(|&suit| {
            let run = outstanding
                .suit(suit)
                .iter()
                .take_while(|&card| ours.have(card))
                .count();
            let longest = hand.suit(suit).size().max(partner.suit(suit).size());
            run.min(longest)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Cards};
    use crate::contract::{parse_contract, Vulnerability};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn hand(cards: &[&str]) -> Cards {
        cards.iter().map(|s| card(s)).collect()
    }

    /// North and South hold the given cards, East everything else
    fn pair(north: &[&str], south: &[&str]) -> Hands {
        let (north, south) = (hand(north), hand(south));
        let mut rest = Cards::full_deck();
        for card in north.union(south) {
            rest.remove(card);
        }
        Hands::from_cards([north, rest, south, Cards::new()])
    }

    fn position(pbn: &str, contract: &str, leader: Seat) -> PlayState {
        PlayState::from_position(
            parse_contract(contract).unwrap(),
            Hands::from_pbn(pbn).unwrap(),
            leader,
            Vulnerability::NONE,
        )
        .unwrap()
    }

    #[test]
    fn test_sure_winners_top_sequence() {
        assert_eq!(sure_winners(&pair(&["SA", "SK", "S2"], &[]), Seat::North), 2);
        // AK split across the partnership, capped by the longer holding
        assert_eq!(sure_winners(&pair(&["SA"], &["SK"]), Seat::North), 1);
        assert_eq!(sure_winners(&pair(&["SA", "S3"], &["SK", "S2"]), Seat::South), 2);
        // No ace, no winners
        assert_eq!(sure_winners(&pair(&["SK", "SQ"], &[]), Seat::North), 0);
    }

    #[test]
    fn test_sure_winners_promote_after_ace_gone() {
        let mut hands = pair(&["SK", "SQ"], &[]);
        hands[Seat::East].remove(card("SA"));
        assert_eq!(sure_winners(&hands, Seat::North), 2);
    }

    #[test]
    fn test_evaluate_symmetric() {
        let state = position("N:AK.A.. QJ.K.. 32.2.. T9.Q..", "2NT by S", Seat::West);
        let eval = PositionEvaluator::default();
        for seat in Seat::ALL {
            let ours = eval.evaluate(&state, seat);
            let theirs = eval.evaluate(&state, seat.next());
            assert!((ours + theirs).abs() < 1e-9, "{seat}: {ours} vs {theirs}");
        }
        // NS holds AK of spades and the heart ace: 3 winners * 0.5 * 0.6
        assert!((eval.evaluate(&state, Seat::North) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_monotonic_in_tricks() {
        let mut state = position("N:AK.A.. QJ.K.. 32.2.. T9.Q..", "2NT by S", Seat::West);
        let eval = PositionEvaluator::default();
        let before = eval.evaluate(&state, Seat::South);
        // West leads the heart queen, North wins with the ace
        state.play(Seat::West, card("HQ")).unwrap();
        state.play(Seat::North, card("HA")).unwrap();
        state.play(Seat::East, card("HK")).unwrap();
        state.play(Seat::South, card("H2")).unwrap();
        assert_eq!(state.declarer_tricks(), 1);
        let after = eval.evaluate(&state, Seat::South);
        assert!(after > before, "{after} should beat {before}");
    }
}
