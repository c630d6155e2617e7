//! Swipe-deck interaction controller.
//!
//! Wires the [`Deck`] to a [`SwipeSubmitter`], the match overlay and any
//! number of observers. The cursor advances before the submission is sent
//! and stays advanced whatever the backend says; a failed submission is
//! reported as an error notice, never as a blocked deck. Undo only rewinds
//! the local cursor, the swipe already recorded server-side stays recorded.

use std::fmt;

use crate::deck::{Deck, DeckError, DeckStatus, PendingSwipe};
use crate::gesture::GestureThresholds;
use crate::presentation::{MatchPresentation, Notice};
use crate::profile::{Candidate, SubmissionResult, SwipeIntent, SwipeResponse};
use crate::session::AuthContext;
use crate::submit::{SubmissionError, SwipeSubmitter};

pub const SWIPE_FAILED_MESSAGE: &str = "Error recording swipe. Please try again.";

#[derive(Debug)]
pub enum AdvanceError {
    Deck(DeckError),
    Submission(SubmissionError),
}

impl fmt::Display for AdvanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvanceError::Deck(e) => write!(f, "{e}"),
            AdvanceError::Submission(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AdvanceError {}

impl From<DeckError> for AdvanceError {
    fn from(e: DeckError) -> Self {
        AdvanceError::Deck(e)
    }
}

impl From<SubmissionError> for AdvanceError {
    fn from(e: SubmissionError) -> Self {
        AdvanceError::Submission(e)
    }
}

/// State changes observers are told about, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    Advanced {
        cursor: usize,
        target_user_id: String,
        intent: SwipeIntent,
    },
    Undone {
        cursor: usize,
    },
    Reloaded {
        len: usize,
    },
    Exhausted,
    MatchShown {
        target_user_id: String,
        is_super_match: bool,
    },
    MatchDismissed,
    Notice(Notice),
}

/// Subscription interface for whatever renders the deck.
pub trait DeckObserver {
    fn on_event(&mut self, event: &DeckEvent);
}

impl<F: FnMut(&DeckEvent)> DeckObserver for F {
    fn on_event(&mut self, event: &DeckEvent) {
        self(event)
    }
}

pub struct DeckController<S> {
    deck: Deck,
    submitter: S,
    auth: AuthContext,
    overlay: MatchPresentation,
    thresholds: GestureThresholds,
    observers: Vec<Box<dyn DeckObserver + Send>>,
}

impl<S: SwipeSubmitter> DeckController<S> {
    pub fn new(auth: AuthContext, submitter: S, candidates: Vec<Candidate>) -> Self {
        Self {
            deck: Deck::new(candidates),
            submitter,
            auth,
            overlay: MatchPresentation::new(),
            thresholds: GestureThresholds::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: GestureThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn subscribe(&mut self, observer: impl DeckObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn overlay(&self) -> &MatchPresentation {
        &self.overlay
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.deck.current()
    }

    pub fn peek_next(&self, n: usize) -> &[Candidate] {
        self.deck.peek_next(n)
    }

    pub fn status(&self) -> DeckStatus {
        self.deck.status()
    }

    /// Swipe the current candidate and submit the intent.
    ///
    /// The cursor moves exactly one step whether or not the submission
    /// succeeds. An exhausted deck is rejected before anything is sent.
    pub async fn advance(&mut self, intent: SwipeIntent) -> Result<SubmissionResult, AdvanceError> {
        let pending = self.begin(intent)?;
        let outcome = self
            .submitter
            .submit(
                self.auth.user_id(),
                &pending.candidate.user_id,
                pending.intent,
            )
            .await;
        Ok(self.apply(&pending, outcome)?)
    }

    /// Interpret a drag release. Returns `None` when the card should snap
    /// back, otherwise the result of advancing with the classified intent.
    pub async fn release(
        &mut self,
        offset: f64,
        velocity: f64,
    ) -> Option<Result<SubmissionResult, AdvanceError>> {
        let intent = self.thresholds.classify(offset, velocity).intent()?;
        Some(self.advance(intent).await)
    }

    /// First half of an advance for callers that submit on their own and may
    /// have several submissions in flight. Pair with [`Self::resolve`].
    pub fn begin(&mut self, intent: SwipeIntent) -> Result<PendingSwipe, DeckError> {
        let pending = self.deck.begin_advance(intent)?;
        self.emit(DeckEvent::Advanced {
            cursor: pending.cursor,
            target_user_id: pending.candidate.user_id.clone(),
            intent,
        });
        if self.deck.is_exhausted() {
            self.emit(DeckEvent::Exhausted);
        }
        Ok(pending)
    }

    /// Apply a submission outcome. Outcomes for a batch that has since been
    /// replaced are dropped and yield `None`; completions of the current
    /// batch may arrive in any order.
    pub fn resolve(
        &mut self,
        pending: &PendingSwipe,
        outcome: Result<SwipeResponse, SubmissionError>,
    ) -> Option<Result<SubmissionResult, SubmissionError>> {
        if pending.generation != self.deck.generation() {
            return None;
        }
        Some(self.apply(pending, outcome))
    }

    fn apply(
        &mut self,
        pending: &PendingSwipe,
        outcome: Result<SwipeResponse, SubmissionError>,
    ) -> Result<SubmissionResult, SubmissionError> {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                self.emit(DeckEvent::Notice(Notice::error(SWIPE_FAILED_MESSAGE)));
                return Err(e);
            }
        };

        let result = SubmissionResult::from_response(response, &pending.candidate.profile);
        if let Some(profile) = &result.matched_profile {
            self.overlay.show(profile.clone(), result.is_super_match);
            self.emit(DeckEvent::MatchShown {
                target_user_id: pending.candidate.user_id.clone(),
                is_super_match: result.is_super_match,
            });
            self.emit(DeckEvent::Notice(Notice::matched(result.is_super_match)));
        }
        Ok(result)
    }

    /// Rewind the cursor one step. Returns the new cursor.
    pub fn undo(&mut self) -> Result<usize, DeckError> {
        let cursor = self.deck.undo()?;
        self.emit(DeckEvent::Undone { cursor });
        Ok(cursor)
    }

    pub fn dismiss_match(&mut self) {
        if self.overlay.is_visible() {
            self.overlay.dismiss();
            self.emit(DeckEvent::MatchDismissed);
        }
    }

    /// Install a freshly fetched batch.
    pub fn reload(&mut self, candidates: Vec<Candidate>) {
        self.deck.reload(candidates);
        let len = self.deck.len();
        self.emit(DeckEvent::Reloaded { len });
    }

    fn emit(&mut self, event: DeckEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}
