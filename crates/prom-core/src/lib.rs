//! Client-side state machines for the prom swipe-to-match app.
//!
//! Gesture classification, the swipe deck and its controller, the match
//! overlay, the profile wizard and the dashboard's deletion guard.
//!
//! Zero I/O: network access goes through the [`SwipeSubmitter`] and
//! [`ProfileCreator`] traits, implemented elsewhere.

pub mod constants;
pub mod controller;
pub mod dashboard;
pub mod deck;
pub mod gesture;
pub mod presentation;
pub mod profile;
pub mod session;
pub mod submit;
pub mod wizard;

pub use constants::{
    DELETE_CONFIRMATION, DISTANCE_THRESHOLD, MAX_PICTURE_BYTES, MIN_PERSONALITY_CHARS,
    PERSONALITY_QUESTIONS, PREVIEW_DEPTH, VELOCITY_THRESHOLD,
};
pub use controller::{AdvanceError, DeckController, DeckEvent, DeckObserver};
pub use dashboard::{ConfirmationMismatch, DashboardSummary, DeletionGuard};
pub use deck::{Deck, DeckError, DeckStatus, PendingSwipe};
pub use gesture::{Gesture, GestureThresholds, classify, hint};
pub use presentation::{MatchPresentation, Notice, NoticeLevel};
pub use profile::{
    Candidate, Gender, Grade, Match, MatchStats, Platform, Profile, ProfileCreated, Socials,
    SubmissionResult, SwipeIntent, SwipeResponse,
};
pub use session::{AuthContext, Session};
pub use submit::{SubmissionError, SwipeSubmitter};
pub use wizard::{
    Picture, ProfileCreator, ProfileDraft, ProfileSubmission, ProfileWizard, ValidationError,
    WizardError, WizardPhase, WizardStep,
};
