//! Four-step profile creation wizard.
//!
//! Steps run strictly in order. Leaving a step requires its gate to pass;
//! a failed gate leaves the wizard untouched and names the rule that failed.
//! Going back is always allowed. The draft lives until a submission is
//! accepted by the backend, then it is discarded.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use base64::Engine;
use serde::Serialize;

use crate::constants::{
    MAX_BIO_CHARS, MAX_PICTURE_BYTES, MIN_HOBBIES, MIN_PERSONALITY_CHARS, PERSONALITY_QUESTIONS,
};
use crate::profile::{Gender, Grade, Platform, ProfileCreated, Socials};
use crate::session::AuthContext;
use crate::submit::SubmissionError;

pub const CREATED_MESSAGE: &str = "Profile created successfully! 🎉";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating profile. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequiredFields,
    NoLookingFor,
    TooFewHobbies { have: usize },
    PersonalityTooShort { chars: usize },
    BioTooLong { chars: usize },
    PictureTooLarge { bytes: usize },
}

impl ValidationError {
    /// User-facing message for the failed rule.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingRequiredFields => "Please fill in all required fields",
            Self::NoLookingFor => "Please select who you're interested in",
            Self::TooFewHobbies { .. } => "Please add at least 2 hobbies",
            Self::PersonalityTooShort { .. } => {
                "Personality description must be at least 50 characters"
            }
            Self::BioTooLong { .. } => "Bio must be 500 characters or fewer",
            Self::PictureTooLarge { .. } => "Image must be less than 5MB",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum WizardError {
    Validation(ValidationError),
    /// The profile endpoint could not be reached or answered with an error.
    Submission(SubmissionError),
    /// The endpoint answered but did not report success.
    Rejected,
    /// The wizard already finished; start a new one.
    Completed,
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::Validation(e) => write!(f, "{e}"),
            WizardError::Submission(e) => write!(f, "{e}"),
            WizardError::Rejected => write!(f, "profile was not accepted"),
            WizardError::Completed => write!(f, "profile already submitted"),
        }
    }
}

impl std::error::Error for WizardError {}

impl From<ValidationError> for WizardError {
    fn from(e: ValidationError) -> Self {
        WizardError::Validation(e)
    }
}

impl From<SubmissionError> for WizardError {
    fn from(e: SubmissionError) -> Self {
        WizardError::Submission(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Basics,
    Interests,
    Socials,
    Personality,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Basics => 1,
            Self::Interests => 2,
            Self::Socials => 3,
            Self::Personality => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Basics => "The Basics",
            Self::Interests => "Your Interests",
            Self::Socials => "Your Socials",
            Self::Personality => "Your Personality",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Basics => Self::Interests,
            Self::Interests => Self::Socials,
            Self::Socials | Self::Personality => Self::Personality,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Basics | Self::Interests => Self::Basics,
            Self::Socials => Self::Interests,
            Self::Personality => Self::Socials,
        }
    }
}

/// Raw picture bytes chosen for the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Picture {
    /// `data:` URL sent in place of a hosted image URL.
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.mime)
    }
}

/// In-progress profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub gender: Option<Gender>,
    pub grade: Option<Grade>,
    pub looking_for: Vec<Gender>,
    pub hobbies: Vec<String>,
    pub socials: Socials,
    pub personality: String,
    pub question_answers: BTreeMap<String, String>,
    pub picture: Option<Picture>,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            gender: None,
            grade: None,
            looking_for: Vec::new(),
            hobbies: Vec::new(),
            socials: Socials::default(),
            personality: String::new(),
            question_answers: PERSONALITY_QUESTIONS
                .iter()
                .map(|q| (q.to_string(), String::new()))
                .collect(),
            picture: None,
        }
    }
}

impl ProfileDraft {
    pub fn set_bio(&mut self, bio: &str) -> Result<(), ValidationError> {
        let chars = bio.chars().count();
        if chars > MAX_BIO_CHARS {
            return Err(ValidationError::BioTooLong { chars });
        }
        self.bio = bio.to_string();
        Ok(())
    }

    /// Add or remove a gender from the interested-in set.
    pub fn toggle_looking_for(&mut self, gender: Gender) {
        if let Some(pos) = self.looking_for.iter().position(|g| *g == gender) {
            self.looking_for.remove(pos);
        } else {
            self.looking_for.push(gender);
        }
    }

    /// Trimmed; blanks and duplicates are ignored. Returns whether it was added.
    pub fn add_hobby(&mut self, hobby: &str) -> bool {
        let hobby = hobby.trim();
        if hobby.is_empty() || self.hobbies.iter().any(|h| h == hobby) {
            return false;
        }
        self.hobbies.push(hobby.to_string());
        true
    }

    pub fn remove_hobby(&mut self, hobby: &str) {
        self.hobbies.retain(|h| h != hobby);
    }

    pub fn set_social(&mut self, platform: Platform, handle: &str) {
        self.socials.set(platform, handle);
    }

    pub fn answer_question(&mut self, question: &str, answer: &str) {
        self.question_answers
            .insert(question.to_string(), answer.to_string());
    }

    pub fn set_personality(&mut self, text: &str) {
        self.personality = text.to_string();
    }

    pub fn set_picture(&mut self, picture: Picture) -> Result<(), ValidationError> {
        if picture.bytes.len() > MAX_PICTURE_BYTES {
            return Err(ValidationError::PictureTooLarge {
                bytes: picture.bytes.len(),
            });
        }
        self.picture = Some(picture);
        Ok(())
    }

    pub fn personality_chars(&self) -> usize {
        self.personality.chars().count()
    }

    fn check_basics(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty()
            || self.bio.trim().is_empty()
            || self.gender.is_none()
            || self.grade.is_none()
        {
            return Err(ValidationError::MissingRequiredFields);
        }
        if self.looking_for.is_empty() {
            return Err(ValidationError::NoLookingFor);
        }
        Ok(())
    }

    fn check_interests(&self) -> Result<(), ValidationError> {
        if self.hobbies.len() < MIN_HOBBIES {
            return Err(ValidationError::TooFewHobbies {
                have: self.hobbies.len(),
            });
        }
        Ok(())
    }

    fn check_personality(&self) -> Result<(), ValidationError> {
        let chars = self.personality_chars();
        if chars < MIN_PERSONALITY_CHARS {
            return Err(ValidationError::PersonalityTooShort { chars });
        }
        Ok(())
    }
}

/// Body of `POST /users/profile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSubmission {
    pub user_id: String,
    pub name: String,
    pub bio: String,
    pub gender: Gender,
    pub looking_for: Vec<Gender>,
    pub grade: Grade,
    pub hobbies: Vec<String>,
    pub personality: String,
    pub question_answers: BTreeMap<String, String>,
    pub socials: Socials,
    /// Data URL of the picture, or empty when none was chosen.
    pub profile_pic_url: String,
}

/// Whatever creates the profile on the backend.
pub trait ProfileCreator {
    fn create_profile(
        &self,
        profile: &ProfileSubmission,
    ) -> impl Future<Output = Result<ProfileCreated, SubmissionError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing(WizardStep),
    Completed,
}

#[derive(Debug, Default)]
pub struct ProfileWizard {
    step: Option<WizardStep>,
    draft: ProfileDraft,
    completed: bool,
}

impl ProfileWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draft(draft: ProfileDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step.unwrap_or(WizardStep::Basics)
    }

    pub fn phase(&self) -> WizardPhase {
        if self.completed {
            WizardPhase::Completed
        } else {
            WizardPhase::Editing(self.step())
        }
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Gate for leaving `step` forwards (or submitting, for the last step).
    pub fn validate_step(&self, step: WizardStep) -> Result<(), ValidationError> {
        match step {
            WizardStep::Basics => self.draft.check_basics(),
            WizardStep::Interests => self.draft.check_interests(),
            WizardStep::Socials => Ok(()),
            WizardStep::Personality => self.draft.check_personality(),
        }
    }

    /// Move forward if the current step's gate passes. The last step stays
    /// put once its gate passes.
    pub fn next_step(&mut self) -> Result<WizardStep, ValidationError> {
        let current = self.step();
        self.validate_step(current)?;
        self.step = Some(current.next());
        Ok(self.step())
    }

    /// Unconditional step back, never before the first step.
    pub fn prev_step(&mut self) -> WizardStep {
        self.step = Some(self.step().prev());
        self.step()
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.completed
            && self.step() == WizardStep::Personality
            && self.draft.check_personality().is_ok()
    }

    /// Check every gate and build the request body.
    pub fn package(&self, auth: &AuthContext) -> Result<ProfileSubmission, ValidationError> {
        self.draft.check_basics()?;
        self.draft.check_interests()?;
        self.draft.check_personality()?;

        let draft = &self.draft;
        Ok(ProfileSubmission {
            user_id: auth.user_id().to_string(),
            name: draft.name.trim().to_string(),
            bio: draft.bio.clone(),
            gender: draft.gender.ok_or(ValidationError::MissingRequiredFields)?,
            looking_for: draft.looking_for.clone(),
            grade: draft.grade.ok_or(ValidationError::MissingRequiredFields)?,
            hobbies: draft.hobbies.clone(),
            personality: draft.personality.clone(),
            question_answers: draft.question_answers.clone(),
            socials: draft.socials.clone(),
            profile_pic_url: draft
                .picture
                .as_ref()
                .map(Picture::data_url)
                .unwrap_or_default(),
        })
    }

    /// Send the profile. On success the draft is discarded and the wizard is
    /// finished; on any failure the draft is kept so the user can retry.
    pub async fn submit<C: ProfileCreator>(
        &mut self,
        auth: &AuthContext,
        creator: &C,
    ) -> Result<(), WizardError> {
        if self.completed {
            return Err(WizardError::Completed);
        }
        let submission = self.package(auth)?;
        let created = creator.create_profile(&submission).await?;
        if !created.success {
            return Err(WizardError::Rejected);
        }
        self.draft = ProfileDraft::default();
        self.completed = true;
        Ok(())
    }
}
