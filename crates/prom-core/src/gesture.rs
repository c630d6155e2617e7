//! Drag-release classification for swipe cards.
//!
//! A release is decisive when the card travelled far enough or was flung
//! fast enough. Distance wins for direction; a flick with little travel
//! takes its direction from the velocity instead. Anything else snaps back.

use crate::constants::{DISTANCE_THRESHOLD, HINT_THRESHOLD, VELOCITY_THRESHOLD};
use crate::profile::SwipeIntent;

/// Classified outcome of a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Like,
    Pass,
    /// Not decisive: the card animates back to the origin.
    None,
}

impl Gesture {
    /// The swipe intent this gesture commits to, if any.
    pub fn intent(&self) -> Option<SwipeIntent> {
        match self {
            Self::Like => Some(SwipeIntent::Like),
            Self::Pass => Some(SwipeIntent::Pass),
            Self::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub distance: f64,
    pub velocity: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            distance: DISTANCE_THRESHOLD,
            velocity: VELOCITY_THRESHOLD,
        }
    }
}

impl GestureThresholds {
    pub fn classify(&self, offset: f64, velocity: f64) -> Gesture {
        if !offset.is_finite() || !velocity.is_finite() {
            return Gesture::None;
        }
        if offset.abs() > self.distance {
            return direction(offset);
        }
        if velocity.abs() > self.velocity {
            return direction(velocity);
        }
        Gesture::None
    }
}

fn direction(signed: f64) -> Gesture {
    if signed > 0.0 {
        Gesture::Like
    } else {
        Gesture::Pass
    }
}

/// Classify a release with the default thresholds (100px, 500px/s).
pub fn classify(offset: f64, velocity: f64) -> Gesture {
    GestureThresholds::default().classify(offset, velocity)
}

/// Badge to show while the card is still being dragged.
pub fn hint(offset: f64) -> Gesture {
    if offset > HINT_THRESHOLD {
        Gesture::Like
    } else if offset < -HINT_THRESHOLD {
        Gesture::Pass
    } else {
        Gesture::None
    }
}
