//! Depth-limited minimax search with alpha-beta pruning
//!
//! The search plays every card of the side to move, one ply per card, down
//! to `max_depth` plies or the end of the deal, and scores the leaves with an
//! [`Evaluator`]. Values are taken from the perspective of the seat asking
//! for a card: its partnership maximizes, the opponents minimize. Tricks
//! change the seat on lead, so whether a node maximizes is decided by the
//! side of the seat to move, not by alternating plies.
//!
//! The caller's state is cloned once per decision. Below the root the clone
//! is advanced with `PlayState::apply` and rewound with `PlayState::undo`.
//!
//! Candidates are searched in `Cards` iteration order (suit order, then high
//! to low) and a later candidate only replaces the best one when its value is
//! strictly greater, so equal choices always resolve to the first card.

use super::cards::*;
use super::error::AiError;
use super::evaluate::{Evaluator, PositionEvaluator};
use super::state::PlayState;
use super::strategy::{legal_choices, DifficultyTier, PlayStrategy};
use super::types::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default lookahead in plies (one trick)
pub const DEFAULT_MAX_DEPTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Lookahead in plies; one ply is one card
    pub max_depth: u8,
    /// Alpha-beta cutoffs. Disabled, the search is full width.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            pruning: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        SearchConfig {
            max_depth,
            ..SearchConfig::default()
        }
    }
}

/// Counters for the most recent decision. Reset at the start of each call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Positions entered below the root
    pub nodes_visited: u64,
    /// Positions scored by the evaluator
    pub leaf_nodes: u64,
    /// Sibling moves skipped by cutoffs
    pub branches_pruned: u64,
    pub elapsed: Duration,
    /// Value of the chosen card
    pub best_score: f64,
    pub max_depth: u8,
}

/// What the last decision looked like, for explanations
#[derive(Debug, Clone, PartialEq)]
struct Decision {
    seat: Seat,
    card: Card,
    candidates: usize,
    forced: bool,
}

/// Minimax player with alpha-beta pruning
#[derive(Debug, Clone)]
pub struct MinimaxAi<E: Evaluator = PositionEvaluator> {
    config: SearchConfig,
    evaluator: E,
    stats: SearchStats,
    last: Option<Decision>,
}

impl MinimaxAi<PositionEvaluator> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, PositionEvaluator::default())
    }
}

impl Default for MinimaxAi<PositionEvaluator> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<E: Evaluator> MinimaxAi<E> {
    pub const NAME: &'static str = "minimax";

    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        MinimaxAi {
            config,
            evaluator,
            stats: SearchStats::default(),
            last: None,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Statistics of the most recent `choose_card`
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `state` for the seat to move and return the best card.
    ///
    /// `state` is never modified; all simulation happens on one clone.
    pub fn search(&mut self, state: &PlayState, seat: Seat) -> Result<Card, AiError> {
        let start = Instant::now();
        self.stats = SearchStats {
            max_depth: self.config.max_depth,
            ..SearchStats::default()
        };
        self.last = None;

        let legal = legal_choices(state, seat)?;

        // Nothing to think about with a single card
        if legal.size() == 1 {
            if let Some(card) = legal.top() {
                self.stats.elapsed = start.elapsed();
                self.last = Some(Decision {
                    seat,
                    card,
                    candidates: 1,
                    forced: true,
                });
                debug!(seat = %seat, card = %card, "forced play");
                return Ok(card);
            }
        }

        let mut sim = state.clone();
        let child_depth = self.config.max_depth.saturating_sub(1);
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<(Card, f64)> = None;

        for card in legal {
            let undo = sim.apply(card);
            let value = self.minimax(&mut sim, child_depth, alpha, beta, seat);
            sim.undo(undo);
            trace!(seat = %seat, card = %card, value, "root candidate");

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((card, value));
            }
            if self.config.pruning {
                alpha = alpha.max(value);
            }
        }

        let (card, value) = best.ok_or(AiError::NoLegalPlays(seat))?;
        self.stats.best_score = value;
        self.stats.elapsed = start.elapsed();
        self.last = Some(Decision {
            seat,
            card,
            candidates: legal.size(),
            forced: false,
        });

        debug!(
            seat = %seat,
            card = %card,
            score = value,
            depth = self.config.max_depth,
            nodes = self.stats.nodes_visited,
            leaves = self.stats.leaf_nodes,
            pruned = self.stats.branches_pruned,
            elapsed_ms = self.stats.elapsed.as_secs_f64() * 1000.0,
            "search complete"
        );

        Ok(card)
    }

    /// Value of `sim` for `perspective`'s side, searching `depth` more plies
    fn minimax(
        &mut self,
        sim: &mut PlayState,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        perspective: Seat,
    ) -> f64 {
        self.stats.nodes_visited += 1;

        if depth == 0 || sim.is_complete() {
            self.stats.leaf_nodes += 1;
            let value = self.evaluator.evaluate(sim, perspective);
            trace!(depth, value, "leaf");
            return value;
        }

        let mover = sim.next_to_play();
        let maximizing = mover.side() == perspective.side();
        let playable = sim.legal_plays();
        let count = playable.size();

        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (i, card) in playable.iter().enumerate() {
            let undo = sim.apply(card);
            let child = self.minimax(sim, depth - 1, alpha, beta, perspective);
            sim.undo(undo);

            if maximizing {
                value = value.max(child);
                alpha = alpha.max(value);
            } else {
                value = value.min(child);
                beta = beta.min(value);
            }

            if self.config.pruning && alpha >= beta {
                let skipped = (count - i - 1) as u64;
                self.stats.branches_pruned += skipped;
                trace!(depth, seat = %mover, card = %card, skipped, "cutoff");
                break;
            }
        }

        value
    }
}

impl<E: Evaluator> PlayStrategy for MinimaxAi<E> {
    fn choose_card(&mut self, state: &PlayState, seat: Seat) -> Result<Card, AiError> {
        self.search(state, seat)
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn difficulty_tier(&self) -> DifficultyTier {
        DifficultyTier::for_depth(self.config.max_depth)
    }

    fn explain_last_choice(&self) -> Option<String> {
        let last = self.last.as_ref()?;
        if last.forced {
            return Some(format!("{} played {}, the only legal card", last.seat, last.card));
        }
        let pruning = if self.config.pruning { "" } else { " without pruning" };
        Some(format!(
            "{} played {}: best of {} legal cards at {}-ply lookahead{}, evaluation {:+.2} ({} positions, {} branches pruned)",
            last.seat,
            last.card,
            last.candidates,
            self.stats.max_depth,
            pruning,
            self.stats.best_score,
            self.stats.nodes_visited,
            self.stats.branches_pruned,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{parse_contract, Vulnerability};
    use crate::hands::Hands;

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

    fn position(pbn: &str, contract: &str, leader: Seat) -> PlayState {
        PlayState::from_position(
            parse_contract(contract).unwrap(),
            Hands::from_pbn(pbn).unwrap(),
            leader,
            Vulnerability::NONE,
        )
        .unwrap()
    }

    /// West leads the spade king, North and East follow; South is void in
    /// spades holding a diamond and the two of trumps.
    fn ruffing_position() -> PlayState {
        let mut state = position("N:2.3.. 3.4.. ..5.2 K.2..", "1♣ by S", Seat::West);
        state.play(Seat::West, card("SK")).unwrap();
        state.play(Seat::North, card("S2")).unwrap();
        state.play(Seat::East, card("S3")).unwrap();
        state
    }

    #[test]
    fn test_ruffs_rather_than_discarding() {
        let state = ruffing_position();
        for depth in [1, 4, 8] {
            let mut ai = MinimaxAi::new(SearchConfig::with_depth(depth));
            assert_eq!(ai.choose_card(&state, Seat::South), Ok(card("C2")), "depth {depth}");
            assert!(ai.stats().best_score > 0.0);
        }
    }

    #[test]
    fn test_ties_go_to_first_card() {
        // North holds three top winners; every order takes all three tricks
        let state = position("N:AK.A.. QJ.K.. 32.2.. T9.Q..", "2NT by S", Seat::North);
        let mut ai = MinimaxAi::new(SearchConfig::with_depth(12));
        assert_eq!(ai.choose_card(&state, Seat::North), Ok(card("SA")));
    }

    #[test]
    fn test_deterministic() {
        let state = new_deal("3NT by S");
        let mut a = MinimaxAi::new(SearchConfig::with_depth(4));
        let mut b = MinimaxAi::new(SearchConfig::with_depth(4));
        let first = a.choose_card(&state, Seat::West).unwrap();
        assert_eq!(b.choose_card(&state, Seat::West).unwrap(), first);
        assert_eq!(a.choose_card(&state, Seat::West).unwrap(), first);
        assert_eq!(a.stats(), SearchStats { elapsed: a.stats().elapsed, ..b.stats() });
    }

    #[test]
    fn test_state_not_mutated() {
        let state = new_deal("4♠ by N");
        let before = state.clone();
        let mut ai = MinimaxAi::new(SearchConfig::with_depth(5));
        ai.choose_card(&state, Seat::East).unwrap();
        assert_eq!(state.hands(), before.hands());
        assert_eq!(state.current_trick(), before.current_trick());
        assert_eq!(state.tricks_won(), before.tricks_won());
        assert_eq!(state.next_to_play(), before.next_to_play());
        assert_eq!(state.dummy_revealed(), before.dummy_revealed());
    }

    #[test]
    fn test_deeper_search_examines_more_nodes() {
        let state = new_deal("3NT by S");
        let full_width = |depth| SearchConfig {
            max_depth: depth,
            pruning: false,
        };
        let mut shallow = MinimaxAi::new(full_width(2));
        let mut deep = MinimaxAi::new(full_width(3));
        shallow.choose_card(&state, Seat::West).unwrap();
        deep.choose_card(&state, Seat::West).unwrap();
        assert!(deep.stats().nodes_visited >= shallow.stats().nodes_visited);
        assert!(deep.stats().leaf_nodes > shallow.stats().leaf_nodes);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes_same_choice() {
        let state = new_deal("3NT by S");
        let mut pruned = MinimaxAi::new(SearchConfig::with_depth(4));
        let mut full = MinimaxAi::new(SearchConfig {
            max_depth: 4,
            pruning: false,
        });
        let a = pruned.choose_card(&state, Seat::West).unwrap();
        let b = full.choose_card(&state, Seat::West).unwrap();
        assert_eq!(a, b);
        assert!((pruned.stats().best_score - full.stats().best_score).abs() < 1e-9);
        assert!(pruned.stats().nodes_visited < full.stats().nodes_visited);
        assert!(pruned.stats().branches_pruned > 0);
        assert_eq!(full.stats().branches_pruned, 0);
    }

    #[test]
    fn test_forced_card_skips_search() {
        let mut state = new_deal("3NT by S");
        // South holds a single diamond
        state.play(Seat::West, card("D3")).unwrap();
        state.play(Seat::North, card("D2")).unwrap();
        state.play(Seat::East, card("D7")).unwrap();
        let mut ai = MinimaxAi::new(SearchConfig::with_depth(8));
        assert_eq!(ai.choose_card(&state, Seat::South), Ok(card("DT")));
        assert_eq!(ai.stats().nodes_visited, 0);
        assert!(ai.explain_last_choice().unwrap().contains("only legal card"));
    }

    #[test]
    fn test_errors() {
        let state = new_deal("3NT by S");
        let mut ai = MinimaxAi::default();
        assert_eq!(
            ai.choose_card(&state, Seat::North),
            Err(AiError::NotOnTurn {
                expected: Seat::West,
                actual: Seat::North
            })
        );
        assert!(ai.explain_last_choice().is_none());

        let mut done = position("N:A... K... 2... 3...", "1NT by S", Seat::North);
        done.play(Seat::North, card("SA")).unwrap();
        done.play(Seat::East, card("SK")).unwrap();
        done.play(Seat::South, card("S2")).unwrap();
        done.play(Seat::West, card("S3")).unwrap();
        assert_eq!(ai.choose_card(&done, Seat::North), Err(AiError::DealComplete));
    }

    #[test]
    fn test_failed_call_clears_explanation() {
        let state = new_deal("3NT by S");
        let mut ai = MinimaxAi::new(SearchConfig::with_depth(2));
        ai.choose_card(&state, Seat::West).unwrap();
        assert!(ai.explain_last_choice().is_some());
        assert!(ai.choose_card(&state, Seat::East).is_err());
        assert!(ai.explain_last_choice().is_none());
    }

    /// Counts only tricks already taken
    struct TricksOnly;

    impl Evaluator for TricksOnly {
        fn evaluate(&self, state: &PlayState, perspective: Seat) -> f64 {
            let ours = perspective.side();
            f64::from(state.side_tricks(ours)) - f64::from(state.side_tricks(ours.opponents()))
        }
    }

    #[test]
    fn test_custom_evaluator() {
        let config = SearchConfig {
            max_depth: 8,
            pruning: false,
        };
        let mut ai = MinimaxAi::with_evaluator(config, TricksOnly);
        assert_eq!(ai.config(), config);

        let state = ruffing_position();
        assert_eq!(ai.evaluator().evaluate(&state, Seat::South), 0.0);
        assert_eq!(ai.choose_card(&state, Seat::South), Ok(card("C2")));
        // The ruff wins this trick and the diamond then takes the last one
        assert_eq!(ai.stats().best_score, 2.0);
        assert_eq!(ai.difficulty_tier(), DifficultyTier::Advanced);
    }

    #[test]
    fn test_explanation_and_tier() {
        let state = new_deal("3NT by S");
        let mut ai = MinimaxAi::new(SearchConfig::with_depth(4));
        let card = ai.choose_card(&state, Seat::West).unwrap();
        let text = ai.explain_last_choice().unwrap();
        assert!(text.contains(&card.to_string()), "{text}");
        assert!(text.contains("13 legal cards"), "{text}");
        assert_eq!(ai.name(), "minimax");
        assert_eq!(ai.difficulty_tier(), DifficultyTier::Intermediate);
        assert_eq!(
            MinimaxAi::new(SearchConfig::with_depth(12)).difficulty_tier(),
            DifficultyTier::Expert
        );
    }
}
