//! Ordered candidate queue with a cursor.
//!
//! The cursor only moves one step at a time: forward on a swipe, back on
//! undo. `cursor == len` means the deck is used up; the caller fetches a new
//! batch and hands it to [`Deck::reload`], which also bumps the generation so
//! late results for the old batch can be recognised and dropped.

use std::fmt;

use crate::profile::{Candidate, SwipeIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    /// No candidate left under the cursor.
    Exhausted,
    /// Cursor already at the first candidate.
    NothingToUndo,
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Exhausted => write!(f, "deck exhausted"),
            DeckError::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

impl std::error::Error for DeckError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStatus {
    /// The batch had no candidates at all.
    Empty,
    /// Every candidate in the batch has been swiped.
    Exhausted,
    Active,
}

impl DeckStatus {
    /// Heading and subtitle for the terminal states.
    pub fn message(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Empty => Some(("No Profiles Yet", "Check back later for new students!")),
            Self::Exhausted => Some(("You're All Caught Up!", "Check back later for new matches!")),
            Self::Active => None,
        }
    }
}

/// A swipe that has moved the cursor but whose submission has not resolved.
#[derive(Debug, Clone)]
pub struct PendingSwipe {
    pub candidate: Candidate,
    pub intent: SwipeIntent,
    /// Cursor value after the advance.
    pub cursor: usize,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Deck {
    candidates: Vec<Candidate>,
    cursor: usize,
    generation: u64,
}

impl Deck {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            cursor: 0,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    pub fn status(&self) -> DeckStatus {
        if self.candidates.is_empty() {
            DeckStatus::Empty
        } else if self.is_exhausted() {
            DeckStatus::Exhausted
        } else {
            DeckStatus::Active
        }
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.cursor)
    }

    /// Up to `n` candidates after the current one.
    pub fn peek_next(&self, n: usize) -> &[Candidate] {
        let start = (self.cursor + 1).min(self.candidates.len());
        let end = start.saturating_add(n).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// One-based `(position, total)` while a candidate is showing.
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.is_exhausted()).then(|| (self.cursor + 1, self.candidates.len()))
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Move past the current candidate and hand back what must be submitted.
    pub fn begin_advance(&mut self, intent: SwipeIntent) -> Result<PendingSwipe, DeckError> {
        let candidate = self.current().cloned().ok_or(DeckError::Exhausted)?;
        self.cursor += 1;
        Ok(PendingSwipe {
            candidate,
            intent,
            cursor: self.cursor,
            generation: self.generation,
        })
    }

    /// Step back one candidate. Returns the new cursor.
    pub fn undo(&mut self) -> Result<usize, DeckError> {
        if self.cursor == 0 {
            return Err(DeckError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(self.cursor)
    }

    /// Replace the batch and start over from the first candidate.
    pub fn reload(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.cursor = 0;
        self.generation += 1;
    }
}
