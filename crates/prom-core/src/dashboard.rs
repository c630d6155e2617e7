//! Dashboard state: match summary and the account-deletion guard.

use std::fmt;

use crate::constants::DELETE_CONFIRMATION;
use crate::profile::{Match, MatchStats};

pub const LOAD_FAILED_MESSAGE: &str = "Error loading data";
pub const DELETED_MESSAGE: &str = "Account deleted successfully";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete account";

/// The typed confirmation did not equal the required literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationMismatch;

impl fmt::Display for ConfirmationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Please type \"{DELETE_CONFIRMATION}\" to confirm")
    }
}

impl std::error::Error for ConfirmationMismatch {}

/// Holds what the user typed into the delete-account box. The destructive
/// action is only enabled on an exact, case-sensitive match.
#[derive(Debug, Clone, Default)]
pub struct DeletionGuard {
    typed: String,
}

impl DeletionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_text(&mut self, text: &str) {
        self.typed = text.to_string();
    }

    pub fn is_armed(&self) -> bool {
        self.typed == DELETE_CONFIRMATION
    }

    pub fn confirm(&self) -> Result<(), ConfirmationMismatch> {
        if self.is_armed() {
            Ok(())
        } else {
            Err(ConfirmationMismatch)
        }
    }

    pub fn reset(&mut self) {
        self.typed.clear();
    }
}

/// Matches and statistics shown together on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub matches: Vec<Match>,
    pub stats: MatchStats,
}

impl DashboardSummary {
    pub fn super_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_super_match)
    }
}

/// Notice for a failed summary load. Suppressed while the profile is known
/// to be missing, since the user is about to be sent to the wizard.
pub fn load_failure_notice(profile_exists: bool) -> Option<&'static str> {
    profile_exists.then_some(LOAD_FAILED_MESSAGE)
}
