/// Horizontal drag distance (px) past which a release is a decisive swipe.
pub const DISTANCE_THRESHOLD: f64 = 100.0;

/// Release velocity (px/s) past which a release is a decisive swipe.
pub const VELOCITY_THRESHOLD: f64 = 500.0;

/// Drag distance at which the LIKE/PASS badge starts showing.
pub const HINT_THRESHOLD: f64 = 50.0;

/// Cards rendered at once: the current one plus this many beneath it.
pub const PREVIEW_DEPTH: usize = 1;

/// Minimum hobbies before leaving the interests step.
pub const MIN_HOBBIES: usize = 2;

/// Minimum personality description length, in characters.
pub const MIN_PERSONALITY_CHARS: usize = 50;

/// Maximum bio length, in characters.
pub const MAX_BIO_CHARS: usize = 500;

/// Largest accepted profile picture (5MB).
pub const MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;

/// Literal the user must type before the account can be deleted.
pub const DELETE_CONFIRMATION: &str = "DELETE";

/// Prompts pre-seeded into every wizard draft.
pub const PERSONALITY_QUESTIONS: [&str; 5] = [
    "What's your ideal prom night?",
    "What makes you laugh?",
    "Describe your perfect date",
    "What's your favorite way to spend weekends?",
    "What's something you're passionate about?",
];
