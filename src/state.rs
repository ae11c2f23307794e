//! Play state of a deal in progress
//!
//! `PlayState` is owned by whoever drives the hand. Strategies only borrow it
//! for one decision; the search clones it once and then simulates on the
//! clone with `apply`/`undo` rather than copying per node.

use super::cards::*;
use super::contract::{Contract, Vulnerability};
use super::error::{DealError, PlayError};
use super::hands::Hands;
use super::rules;
use super::scoring::{calculate_score, ScoreResult};
use super::trick::{CompletedTrick, Trick};
use super::types::*;
use tracing::{debug, info};

/// Result of one accepted play, as reported to the session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub seat: Seat,
    pub card: Card,
    /// Winner of the trick this card completed, if it completed one
    pub trick_winner: Option<Seat>,
    pub tricks_won: [u8; NUM_SEATS],
    /// None once the deal is complete
    pub next_to_play: Option<Seat>,
    pub deal_complete: bool,
    /// Final score, present once the last trick is played
    pub score: Option<ScoreResult>,
}

/// Everything needed to reverse one `apply`
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    seat: Seat,
    card: Card,
    completed: Option<Seat>,
    dummy_revealed: bool,
}

impl Undo {
    /// Winner of the trick the undone play completed
    pub fn trick_winner(&self) -> Option<Seat> {
        self.completed
    }
}

#[derive(Debug, Clone)]
pub struct PlayState {
    contract: Contract,
    vulnerability: Vulnerability,
    hands: Hands,
    current_trick: Trick,
    history: Vec<CompletedTrick>,
    tricks_won: [u8; NUM_SEATS],
    next_to_play: Seat,
    dummy_revealed: bool,
    initial_cards: usize,
}

impl PlayState {
    /// Start a deal from a resolved contract and four 13-card hands.
    /// The opening leader is the seat left of declarer.
    pub fn new(
        contract: Contract,
        hands: Hands,
        vulnerability: Vulnerability,
    ) -> Result<Self, DealError> {
        hands.validate_full_deal()?;
        Ok(Self::build(contract, hands, contract.opening_leader(), vulnerability))
    }

    /// Start from an endgame position of equal hands with `leader` on lead
    pub fn from_position(
        contract: Contract,
        hands: Hands,
        leader: Seat,
        vulnerability: Vulnerability,
    ) -> Result<Self, DealError> {
        hands.validate_position()?;
        Ok(Self::build(contract, hands, leader, vulnerability))
    }

    fn build(contract: Contract, hands: Hands, leader: Seat, vulnerability: Vulnerability) -> Self {
        PlayState {
            contract,
            vulnerability,
            hands,
            current_trick: Trick::new(),
            history: Vec::with_capacity(TOTAL_TRICKS),
            tricks_won: [0; NUM_SEATS],
            next_to_play: leader,
            dummy_revealed: false,
            initial_cards: hands.total_size(),
        }
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.contract.trump_suit()
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn hand(&self, seat: Seat) -> Cards {
        self.hands[seat]
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    /// Completed tricks in play order
    pub fn history(&self) -> &[CompletedTrick] {
        &self.history
    }

    pub fn tricks_won(&self) -> [u8; NUM_SEATS] {
        self.tricks_won
    }

    pub fn tricks_won_by(&self, seat: Seat) -> u8 {
        self.tricks_won[seat.index()]
    }

    pub fn side_tricks(&self, side: Side) -> u8 {
        side.seats().iter().map(|&s| self.tricks_won_by(s)).sum()
    }

    pub fn declarer_tricks(&self) -> u8 {
        self.side_tricks(self.contract.side())
    }

    pub fn defender_tricks(&self) -> u8 {
        self.side_tricks(self.contract.side().opponents())
    }

    pub fn tricks_played(&self) -> usize {
        self.history.len()
    }

    pub fn next_to_play(&self) -> Seat {
        self.next_to_play
    }

    pub fn dummy(&self) -> Seat {
        self.contract.dummy()
    }

    pub fn dummy_revealed(&self) -> bool {
        self.dummy_revealed
    }

    /// Cards this deal started with (52 for a full deal)
    pub fn initial_cards(&self) -> usize {
        self.initial_cards
    }

    pub fn cards_remaining(&self) -> usize {
        self.hands.total_size()
    }

    /// Complete once every hand is empty
    pub fn is_complete(&self) -> bool {
        rules::is_deal_complete(&self.hands, &self.current_trick)
    }

    /// Declarer plays dummy's cards; every other seat plays its own
    pub fn controller_of(&self, seat: Seat) -> Seat {
        if seat == self.contract.dummy() {
            self.contract.declarer()
        } else {
            seat
        }
    }

    /// Hands `seat` can see: its own, plus dummy once it is on the table.
    /// Dummy itself sees declarer's hand, since declarer plays it.
    pub fn visible_hands(&self, seat: Seat) -> Cards {
        let mut visible = self.hands[seat];
        let dummy = self.contract.dummy();
        if self.dummy_revealed || seat == self.contract.declarer() {
            visible.add_cards(self.hands[dummy]);
        }
        if seat == dummy {
            visible.add_cards(self.hands[self.contract.declarer()]);
        }
        visible
    }

    /// Legal plays for the seat to move
    pub fn legal_plays(&self) -> Cards {
        rules::legal_plays(self.hands[self.next_to_play], &self.current_trick)
    }

    /// Validate a play without applying it
    pub fn check(&self, seat: Seat, card: Card) -> Result<(), PlayError> {
        if self.is_complete() {
            return Err(PlayError::DealComplete);
        }
        if seat != self.next_to_play {
            return Err(PlayError::NotYourTurn {
                expected: self.next_to_play,
                actual: seat,
            });
        }
        rules::check_play(seat, card, self.hands[seat], &self.current_trick)
    }

    /// Play `card` from `seat`. Rejected plays leave the state untouched.
    pub fn play(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        self.check(seat, card)?;
        let undo = self.apply(card);
        debug!(seat = %seat, card = %card, "card played");

        if let Some(winner) = undo.completed {
            debug!(
                winner = %winner,
                trick = self.history.len(),
                declarer_tricks = self.declarer_tricks(),
                "trick complete"
            );
        }

        let deal_complete = self.is_complete();
        let score = if deal_complete { self.final_score() } else { None };
        if let Some(score) = &score {
            info!(
                contract = %self.contract,
                declarer_tricks = self.declarer_tricks(),
                made = score.made,
                score = score.score,
                "deal complete"
            );
        }

        Ok(PlayOutcome {
            seat,
            card,
            trick_winner: undo.completed,
            tricks_won: self.tricks_won,
            next_to_play: (!deal_complete).then_some(self.next_to_play),
            deal_complete,
            score,
        })
    }

    /// Score of the finished deal; None while play continues
    pub fn final_score(&self) -> Option<ScoreResult> {
        if !self.is_complete() {
            return None;
        }
        calculate_score(&self.contract, self.declarer_tricks(), self.vulnerability).ok()
    }

    /// Apply a play for the seat to move without validation.
    ///
    /// The card must be a legal play for `next_to_play`; the search only
    /// feeds it cards taken from `legal_plays()`.
    pub fn apply(&mut self, card: Card) -> Undo {
        let seat = self.next_to_play;
        debug_assert!(self.hands[seat].have(card), "{seat} does not hold {card}");

        let undo = Undo {
            seat,
            card,
            completed: None,
            dummy_revealed: self.dummy_revealed,
        };

        self.hands[seat].remove(card);
        self.current_trick.add(card, seat);
        self.dummy_revealed = true;

        match rules::determine_trick_winner(&self.current_trick, self.trump_suit()) {
            Some(winner) => {
                self.tricks_won[winner.index()] += 1;
                self.history.push(CompletedTrick {
                    trick: self.current_trick,
                    winner,
                });
                self.current_trick = Trick::new();
                self.next_to_play = winner;
                Undo {
                    completed: Some(winner),
                    ..undo
                }
            }
            None => {
                self.next_to_play = rules::next_player(seat);
                undo
            }
        }
    }

    /// Reverse the most recent `apply`
    pub fn undo(&mut self, undo: Undo) {
        if let Some(winner) = undo.completed {
            self.tricks_won[winner.index()] -= 1;
            if let Some(completed) = self.history.pop() {
                self.current_trick = completed.trick;
            }
        }
        self.current_trick.pop();
        self.hands[undo.seat].add(undo.card);
        self.next_to_play = undo.seat;
        self.dummy_revealed = undo.dummy_revealed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::parse_contract;

    const PBN: &str = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn new_deal(contract: &str) -> PlayState {
        PlayState::new(
            parse_contract(contract).unwrap(),
            Hands::from_pbn(PBN).unwrap(),
            Vulnerability::NONE,
        )
        .unwrap()
    }

    #[test]
    fn test_opening_leader_and_dummy() {
        let state = new_deal("3NT by S");
        assert_eq!(state.next_to_play(), Seat::West);
        assert_eq!(state.dummy(), Seat::North);
        assert!(!state.dummy_revealed());
        assert!(!state.is_complete());
        assert_eq!(state.controller_of(Seat::North), Seat::South);
        assert_eq!(state.controller_of(Seat::East), Seat::East);
    }

    #[test]
    fn test_rejects_bad_deal() {
        let contract = parse_contract("3NT by S").unwrap();
        let hands = Hands::from_pbn("N:A... K... 2... 3...").unwrap();
        assert!(matches!(
            PlayState::new(contract, hands, Vulnerability::NONE),
            Err(DealError::WrongCardCount { .. })
        ));
        assert!(PlayState::from_position(contract, hands, Seat::West, Vulnerability::NONE).is_ok());
    }

    #[test]
    fn test_rejected_plays_do_not_mutate() {
        let mut state = new_deal("3NT by S");
        let before = state.clone();

        assert_eq!(
            state.play(Seat::North, card("SA")),
            Err(PlayError::NotYourTurn {
                expected: Seat::West,
                actual: Seat::North
            })
        );
        assert_eq!(
            state.play(Seat::West, card("SA")),
            Err(PlayError::CardNotHeld {
                seat: Seat::West,
                card: card("SA")
            })
        );

        state.play(Seat::West, card("S9")).unwrap();
        let mid = state.clone();
        // North holds spades, so a heart is rejected
        assert!(matches!(
            state.play(Seat::North, card("HJ")),
            Err(PlayError::MustFollowSuit { led: Suit::Spades, .. })
        ));
        assert_eq!(state.hand(Seat::North), mid.hand(Seat::North));
        assert_eq!(state.current_trick(), mid.current_trick());
        assert_ne!(state.hand(Seat::West), before.hand(Seat::West));
    }

    #[test]
    fn test_trick_resolution() {
        let mut state = new_deal("3NT by S");
        state.play(Seat::West, card("S9")).unwrap();
        assert!(state.dummy_revealed());
        state.play(Seat::North, card("S3")).unwrap();
        state.play(Seat::East, card("S6")).unwrap();
        let outcome = state.play(Seat::South, card("SJ")).unwrap();

        assert_eq!(outcome.trick_winner, Some(Seat::South));
        assert_eq!(outcome.next_to_play, Some(Seat::South));
        assert_eq!(outcome.tricks_won, [0, 0, 1, 0]);
        assert!(!outcome.deal_complete);
        assert!(outcome.score.is_none());
        assert_eq!(state.history().len(), 1);
        assert!(state.current_trick().is_empty());
        assert_eq!(state.declarer_tricks(), 1);
        assert_eq!(state.defender_tricks(), 0);
    }

    #[test]
    fn test_apply_undo_restores_state() {
        let mut state = new_deal("4♠ by N");
        let original = state.clone();
        let mut undos = Vec::new();
        for _ in 0..6 {
            let card = state.legal_plays().top().unwrap();
            undos.push(state.apply(card));
        }
        assert_eq!(state.tricks_played(), 1);
        while let Some(undo) = undos.pop() {
            state.undo(undo);
        }
        assert_eq!(state.hands(), original.hands());
        assert_eq!(state.current_trick(), original.current_trick());
        assert_eq!(state.tricks_won(), original.tricks_won());
        assert_eq!(state.next_to_play(), original.next_to_play());
        assert_eq!(state.dummy_revealed(), original.dummy_revealed());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_visible_hands() {
        let mut state = new_deal("3NT by S");
        let west = state.hand(Seat::West);
        assert_eq!(state.visible_hands(Seat::West), west);
        assert_eq!(state.visible_hands(Seat::South).size(), 26);
        state.play(Seat::West, card("S9")).unwrap();
        assert_eq!(state.visible_hands(Seat::East).size(), 13 + 13);
    }

    #[test]
    fn test_play_to_completion_scores() {
        let mut state = new_deal("3NT by S");
        let mut last = None;
        while !state.is_complete() {
            let seat = state.next_to_play();
            let card = state.legal_plays().bottom().unwrap();
            last = Some(state.play(seat, card).unwrap());
        }
        let last = last.unwrap();
        assert!(last.deal_complete);
        assert_eq!(last.next_to_play, None);
        assert_eq!(state.tricks_played(), 13);
        assert_eq!(state.cards_remaining(), 0);
        assert_eq!(state.initial_cards(), TOTAL_CARDS);
        let total: u8 = state.tricks_won().iter().sum();
        assert_eq!(total, 13);
        assert_eq!(last.score, state.final_score());
        assert!(last.score.is_some());
        assert_eq!(state.play(Seat::North, card("SA")), Err(PlayError::DealComplete));
    }
}
