//! Puzzle session controller.
//!
//! Owns the mutable state of one puzzle attempt and applies the player's
//! actions to it. Every operation is a silent no-op when its precondition
//! does not hold; nothing here can fail once the puzzle pack is validated.
//!
//! # State machine
//! - correct submit: `InProgress(s, m)` → `InProgress(s + 1, m)`, `Won` at 4
//! - incorrect submit with budget left: `InProgress(s, m)` → `InProgress(s, m + 1)`
//! - incorrect submit with budget spent: forced hint, `InProgress(s + 1, m)`

use crate::puzzles::{
    CATEGORIES_PER_PUZZLE, ContentError, Puzzle, TERMS_PER_PUZZLE, validate_puzzles,
};
use crate::{debug_log, info_log};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

pub const MAX_SELECTION: usize = 4;
pub const MAX_MISTAKES: usize = 4;
pub const MESSAGE_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermSlot {
    pub term: String,
    pub category: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Correct,
    OneAway,
    NotQuite,
    HintRevealed,
}

impl MessageKind {
    pub fn text(self) -> &'static str {
        match self {
            Self::Correct => "✓",
            Self::OneAway => "One away",
            Self::NotQuite => "Not quite",
            Self::HintRevealed => "💡 Hint revealed!",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransientMessage {
    pub kind: MessageKind,
    pub shown_at: Instant,
}

impl TransientMessage {
    pub fn text(&self) -> &'static str {
        self.kind.text()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= MESSAGE_TTL
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitOutcome {
    /// Fewer than four tiles selected, nothing happened.
    Ignored,
    Solved(usize),
    OneAway,
    NotQuite,
    HintRevealed(usize),
}

impl SubmitOutcome {
    fn message_kind(self) -> Option<MessageKind> {
        match self {
            Self::Ignored => None,
            Self::Solved(_) => Some(MessageKind::Correct),
            Self::OneAway => Some(MessageKind::OneAway),
            Self::NotQuite => Some(MessageKind::NotQuite),
            Self::HintRevealed(_) => Some(MessageKind::HintRevealed),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    InProgress { solved: usize, mistakes: usize },
    Won,
}

/// A uniformly random permutation of `0..len`.
pub fn random_permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

pub struct PuzzleSession<R = StdRng> {
    puzzles: Vec<Puzzle>,
    rng: R,
    active: usize,
    slots: Vec<TermSlot>,
    selected: Vec<usize>,
    solved: Vec<usize>,
    mistakes: usize,
    message: Option<TransientMessage>,
    won: bool,
}

impl PuzzleSession<StdRng> {
    pub fn new(puzzles: Vec<Puzzle>, start: usize) -> Result<Self, ContentError> {
        Self::with_rng(puzzles, start, StdRng::from_os_rng())
    }

    /// Deterministic session: the same seed always yields the same
    /// tile orders and hint picks.
    pub fn seeded(puzzles: Vec<Puzzle>, start: usize, seed: u64) -> Result<Self, ContentError> {
        Self::with_rng(puzzles, start, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PuzzleSession<R> {
    pub fn with_rng(puzzles: Vec<Puzzle>, start: usize, rng: R) -> Result<Self, ContentError> {
        validate_puzzles(&puzzles)?;
        let mut session = Self {
            puzzles,
            rng,
            active: 0,
            slots: Vec::with_capacity(TERMS_PER_PUZZLE),
            selected: Vec::with_capacity(MAX_SELECTION),
            solved: Vec::with_capacity(CATEGORIES_PER_PUZZLE),
            mistakes: 0,
            message: None,
            won: false,
        };
        session.initialize(start);
        Ok(session)
    }

    /// Load `puzzle_index` (wrapped to the pack size) and reset all
    /// per-attempt state. Also serves as "play again".
    pub fn initialize(&mut self, puzzle_index: usize) {
        self.active = puzzle_index % self.puzzles.len();
        let ordered: Vec<TermSlot> = self.puzzles[self.active]
            .terms()
            .map(|(term, category)| TermSlot {
                term: term.to_string(),
                category,
            })
            .collect();
        let order = random_permutation(ordered.len(), &mut self.rng);
        self.slots = order.into_iter().map(|i| ordered[i].clone()).collect();
        self.selected.clear();
        self.solved.clear();
        self.mistakes = 0;
        self.message = None;
        self.won = false;
        info_log!(
            "initialize() - puzzle {} (index {})",
            self.puzzles[self.active].id,
            self.active
        );
    }

    pub fn restart(&mut self) {
        self.initialize(self.active);
    }

    pub fn advance_puzzle(&mut self) {
        self.initialize((self.active + 1) % self.puzzles.len());
    }

    pub fn toggle_select(&mut self, slot: usize) {
        if slot >= self.slots.len() || self.is_slot_solved(slot) {
            debug_log!("toggle_select() - ignoring slot {}", slot);
            return;
        }
        if let Some(pos) = self.selected.iter().position(|&s| s == slot) {
            self.selected.remove(pos);
        } else if self.selected.len() < MAX_SELECTION {
            self.selected.push(slot);
        } else {
            debug_log!("toggle_select() - selection full, ignoring slot {}", slot);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Reorder the tiles. The selection follows its terms to their new
    /// positions.
    pub fn shuffle(&mut self) {
        let order = random_permutation(self.slots.len(), &mut self.rng);
        let mut new_position = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            new_position[old] = new;
        }
        self.slots = order.iter().map(|&i| self.slots[i].clone()).collect();
        for slot in &mut self.selected {
            *slot = new_position[*slot];
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.selected.len() != MAX_SELECTION {
            return SubmitOutcome::Ignored;
        }

        let mut distinct: Vec<usize> = self
            .selected
            .iter()
            .map(|&i| self.slots[i].category)
            .collect();
        distinct.sort_unstable();
        distinct.dedup();

        let outcome = match distinct.as_slice() {
            &[category] => {
                self.reveal(category);
                SubmitOutcome::Solved(category)
            }
            _ if self.mistakes < MAX_MISTAKES => {
                self.mistakes += 1;
                if distinct.len() == 2 {
                    SubmitOutcome::OneAway
                } else {
                    SubmitOutcome::NotQuite
                }
            }
            _ => match self.pick_hint() {
                Some(category) => {
                    self.reveal(category);
                    SubmitOutcome::HintRevealed(category)
                }
                None => SubmitOutcome::Ignored,
            },
        };

        info_log!(
            "submit() - {:?}, solved={:?}, mistakes={}",
            outcome,
            self.solved,
            self.mistakes
        );
        if let Some(kind) = outcome.message_kind() {
            self.set_message(kind, Instant::now());
        }
        outcome
    }

    fn pick_hint(&mut self) -> Option<usize> {
        let unsolved: Vec<usize> = (0..CATEGORIES_PER_PUZZLE)
            .filter(|c| !self.solved.contains(c))
            .collect();
        unsolved.choose(&mut self.rng).copied()
    }

    fn reveal(&mut self, category: usize) {
        if !self.solved.contains(&category) {
            self.solved.push(category);
        }
        self.selected.clear();
        self.won = self.solved.len() == CATEGORIES_PER_PUZZLE;
    }
}

impl<R> PuzzleSession<R> {
    fn set_message(&mut self, kind: MessageKind, now: Instant) {
        self.message = Some(TransientMessage {
            kind,
            shown_at: now,
        });
    }

    /// Drop the status message once it has been on screen for
    /// [`MESSAGE_TTL`]. Only clears; never touches game state.
    pub fn expire_message(&mut self, now: Instant) {
        if self.message.is_some_and(|m| m.is_expired(now)) {
            self.message = None;
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzles[self.active]
    }

    pub fn puzzle_index(&self) -> usize {
        self.active
    }

    pub fn puzzle_count(&self) -> usize {
        self.puzzles.len()
    }

    pub fn slots(&self) -> &[TermSlot] {
        &self.slots
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn solved(&self) -> &[usize] {
        &self.solved
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn mistakes_remaining(&self) -> usize {
        MAX_MISTAKES - self.mistakes
    }

    pub fn message(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn can_submit(&self) -> bool {
        self.selected.len() == MAX_SELECTION
    }

    pub fn is_selected(&self, slot: usize) -> bool {
        self.selected.contains(&slot)
    }

    pub fn is_slot_solved(&self, slot: usize) -> bool {
        self.slots
            .get(slot)
            .is_some_and(|s| self.solved.contains(&s.category))
    }

    /// Tiles still on the board, with their slot index, in display order.
    pub fn visible_slots(&self) -> impl Iterator<Item = (usize, &TermSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !self.solved.contains(&s.category))
    }

    pub fn phase(&self) -> Phase {
        if self.won {
            Phase::Won
        } else {
            Phase::InProgress {
                solved: self.solved.len(),
                mistakes: self.mistakes,
            }
        }
    }
}
