//! Wire-level data model shared by the deck, the wizard and the dashboard.
//!
//! Everything here mirrors the JSON the matching backend sends and accepts.
//! Decoding is lenient: fields the client does not use are ignored, and
//! optional profile fields default to empty whether missing or `null`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// School year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

impl Grade {
    pub const ALL: [Grade; 4] = [
        Grade::Freshman,
        Grade::Sophomore,
        Grade::Junior,
        Grade::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freshman => "freshman",
            Self::Sophomore => "sophomore",
            Self::Junior => "junior",
            Self::Senior => "senior",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Freshman => "Freshman (9th)",
            Self::Sophomore => "Sophomore (10th)",
            Self::Junior => "Junior (11th)",
            Self::Senior => "Senior (12th)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::NonBinary,
        Gender::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::NonBinary => "non-binary",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-Binary",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social platforms a profile may link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    Snapchat,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Snapchat, Platform::Tiktok];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Snapchat => "Snapchat",
            Self::Tiktok => "TikTok",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Some(Self::Instagram),
            "snapchat" => Some(Self::Snapchat),
            "tiktok" => Some(Self::Tiktok),
            _ => None,
        }
    }
}

/// Social handles. Every field is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapchat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
}

impl Socials {
    pub fn get(&self, platform: Platform) -> Option<&str> {
        let handle = match platform {
            Platform::Instagram => self.instagram.as_deref(),
            Platform::Snapchat => self.snapchat.as_deref(),
            Platform::Tiktok => self.tiktok.as_deref(),
        };
        handle.map(str::trim).filter(|h| !h.is_empty())
    }

    pub fn set(&mut self, platform: Platform, handle: &str) {
        let slot = match platform {
            Platform::Instagram => &mut self.instagram,
            Platform::Snapchat => &mut self.snapchat,
            Platform::Tiktok => &mut self.tiktok,
        };
        let handle = handle.trim();
        *slot = if handle.is_empty() {
            None
        } else {
            Some(handle.to_string())
        };
    }

    /// Profile URL for a platform, if a handle is set.
    ///
    /// Instagram and TikTok handles are accepted with or without a leading `@`.
    pub fn link(&self, platform: Platform) -> Option<String> {
        let handle = self.get(platform)?;
        Some(match platform {
            Platform::Instagram => format!("https://instagram.com/{}", handle.replace('@', "")),
            Platform::Snapchat => format!("https://snapchat.com/add/{handle}"),
            Platform::Tiktok => format!("https://tiktok.com/@{}", handle.replace('@', "")),
        })
    }

    /// All `(platform, url)` pairs that have a handle, in display order.
    pub fn links(&self) -> Vec<(Platform, String)> {
        Platform::ALL
            .into_iter()
            .filter_map(|p| self.link(p).map(|url| (p, url)))
            .collect()
    }
}

/// Public profile of a user, as shown on a card or in the match overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hobbies: Vec<String>,
    pub grade: Grade,
    pub gender: Gender,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub socials: Socials,
    #[serde(default, deserialize_with = "null_as_default")]
    pub looking_for: Vec<Gender>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question_answers: BTreeMap<String, String>,
}

impl Profile {
    /// Picture URL, treating an empty string as no picture.
    pub fn picture(&self) -> Option<&str> {
        self.profile_pic_url.as_deref().filter(|u| !u.is_empty())
    }

    /// First `n` hobbies and how many were left out.
    pub fn hobby_preview(&self, n: usize) -> (&[String], usize) {
        let shown = &self.hobbies[..self.hobbies.len().min(n)];
        (shown, self.hobbies.len() - shown.len())
    }
}

/// A prospective match, as returned by the recommendations endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub user_id: String,
    pub profile: Profile,
    /// Backend score rounded to one decimal, e.g. `83.5`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub compatibility_percentage: f64,
}

/// The user's decision about a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeIntent {
    Like,
    Pass,
    SuperLike,
}

impl SwipeIntent {
    /// Action vocabulary understood by `POST /swipe`.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Like => "yes",
            Self::Pass => "no",
            Self::SuperLike => "super",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "like" | "yes" | "right" => Some(Self::Like),
            "pass" | "no" | "left" => Some(Self::Pass),
            "super" | "super_like" | "superlike" => Some(Self::SuperLike),
            _ => None,
        }
    }
}

impl fmt::Display for SwipeIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Like => "like",
            Self::Pass => "pass",
            Self::SuperLike => "super_like",
        })
    }
}

/// Backend reply to a swipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_created: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_super_match: bool,
}

/// Outcome of a successful swipe submission, joined with the swiped profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub match_created: bool,
    pub is_super_match: bool,
    /// The swiped candidate's profile, present only when a match was created.
    pub matched_profile: Option<Profile>,
}

impl SubmissionResult {
    pub fn from_response(response: SwipeResponse, swiped: &Profile) -> Self {
        Self {
            match_created: response.match_created,
            is_super_match: response.match_created && response.is_super_match,
            matched_profile: response.match_created.then(|| swiped.clone()),
        }
    }
}

/// An established mutual match listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_super_match: bool,
    #[serde(default)]
    pub other_user: Option<Profile>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_matches: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub super_matches: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub regular_matches: u32,
}

/// Reply to `POST /users/profile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCreated {
    #[serde(default)]
    pub success: bool,
}
