//! Transient UI state: the match overlay and toast-style notices.

use std::time::Duration;

use crate::profile::Profile;

/// Match-celebration overlay. Holds a snapshot of the matched profile until
/// dismissed.
#[derive(Debug, Clone, Default)]
pub struct MatchPresentation {
    visible: bool,
    profile: Option<Profile>,
    is_super_match: bool,
}

impl MatchPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, profile: Profile, is_super_match: bool) {
        self.profile = Some(profile);
        self.is_super_match = is_super_match;
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.profile = None;
        self.is_super_match = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_super_match(&self) -> bool {
        self.is_super_match
    }

    /// The matched profile while the overlay is up.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref().filter(|_| self.visible)
    }

    pub fn headline(&self) -> &'static str {
        if self.is_super_match {
            "SUPER MATCH!"
        } else {
            "It's a Match!"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    const DEFAULT_DURATION: Duration = Duration::from_secs(2);
    const MATCH_DURATION: Duration = Duration::from_secs(3);

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn matched(is_super_match: bool) -> Self {
        let message = if is_super_match {
            "💫 SUPER MATCH! 💫"
        } else {
            "💕 It's a Match!"
        };
        Self {
            level: NoticeLevel::Success,
            message: message.to_string(),
            duration: Self::MATCH_DURATION,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
