//! Profile drafts written as TOML, fed through the wizard step by step.
//!
//! ```toml
//! name = "Jordan"
//! bio = "Theatre kid."
//! gender = "male"
//! grade = "senior"
//! looking_for = ["female"]
//! hobbies = ["chess", "track"]
//! personality = "..."
//!
//! [socials]
//! instagram = "@jordan"
//!
//! [answers]
//! "What's your ideal prom night?" = "Dancing until they kick us out"
//! ```

use std::collections::BTreeMap;

use prom_core::{Gender, Grade, Picture, Platform, ProfileWizard, ValidationError, WizardStep};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DraftFile {
    pub name: String,
    pub bio: String,
    pub gender: Option<Gender>,
    pub grade: Option<Grade>,
    pub looking_for: Vec<Gender>,
    pub hobbies: Vec<String>,
    pub socials: BTreeMap<String, String>,
    pub personality: String,
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug)]
pub enum DraftError {
    Parse(toml::de::Error),
    UnknownPlatform(String),
    Invalid {
        step: Option<WizardStep>,
        error: ValidationError,
    },
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::Parse(e) => write!(f, "invalid draft: {e}"),
            DraftError::UnknownPlatform(p) => write!(f, "unknown social platform '{p}'"),
            DraftError::Invalid {
                step: Some(step),
                error,
            } => write!(f, "step {} ({}): {error}", step.number(), step.title()),
            DraftError::Invalid { step: None, error } => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for DraftError {}

impl From<ValidationError> for DraftError {
    fn from(error: ValidationError) -> Self {
        DraftError::Invalid { step: None, error }
    }
}

pub fn parse(content: &str) -> Result<DraftFile, DraftError> {
    toml::from_str(content).map_err(DraftError::Parse)
}

/// Fill a fresh wizard from the file and walk it to the last step,
/// stopping at the first gate that fails.
pub fn into_wizard(file: DraftFile, picture: Option<Picture>) -> Result<ProfileWizard, DraftError> {
    let mut wizard = ProfileWizard::new();
    let draft = wizard.draft_mut();
    draft.name = file.name;
    draft.set_bio(&file.bio)?;
    draft.gender = file.gender;
    draft.grade = file.grade;
    for gender in file.looking_for {
        if !draft.looking_for.contains(&gender) {
            draft.toggle_looking_for(gender);
        }
    }
    for hobby in &file.hobbies {
        draft.add_hobby(hobby);
    }
    for (platform, handle) in &file.socials {
        let platform =
            Platform::parse(platform).ok_or_else(|| DraftError::UnknownPlatform(platform.clone()))?;
        draft.set_social(platform, handle);
    }
    draft.set_personality(&file.personality);
    for (question, answer) in &file.answers {
        draft.answer_question(question, answer);
    }
    if let Some(picture) = picture {
        draft.set_picture(picture)?;
    }

    while wizard.step() != WizardStep::Personality {
        let step = wizard.step();
        wizard.next_step().map_err(|error| DraftError::Invalid {
            step: Some(step),
            error,
        })?;
        tracing::debug!("step {} ok", step.number());
    }
    wizard
        .validate_step(WizardStep::Personality)
        .map_err(|error| DraftError::Invalid {
            step: Some(WizardStep::Personality),
            error,
        })?;
    Ok(wizard)
}
