use std::fmt;

use serde::{Deserialize, Serialize};

/// A file picked in one of the registration forms.
#[derive(Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlayingRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl PlayingRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "batsman" | "batter" => Some(Self::Batsman),
            "bowler" => Some(Self::Bowler),
            "all-rounder" | "allrounder" => Some(Self::AllRounder),
            "wicket-keeper" | "wicketkeeper" => Some(Self::WicketKeeper),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Batsman => "batsman",
            Self::Bowler => "bowler",
            Self::AllRounder => "all-rounder",
            Self::WicketKeeper => "wicket-keeper",
        }
    }
}

pub const SHIRT_SIZES: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "XXXL"];

/// Raw player registration input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistration {
    pub name: String,
    pub mobile_number: String,
    pub shirt_name: String,
    pub shirt_size: String,
    pub shirt_number: String,
    pub playing_role: String,
    pub profile_photo: Option<UploadFile>,
    pub id_document: Option<UploadFile>,
    pub payment_screenshot: Option<UploadFile>,
}

impl PlayerRegistration {
    /// Trimmed copy with the shirt size and playing role in their canonical
    /// spelling. Unrecognised values pass through trimmed.
    pub fn normalized(&self) -> Self {
        let playing_role = match PlayingRole::parse(&self.playing_role) {
            Some(role) => role.as_str().to_string(),
            None => self.playing_role.trim().to_string(),
        };
        Self {
            name: self.name.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            shirt_name: self.shirt_name.trim().to_string(),
            shirt_size: self.shirt_size.trim().to_ascii_uppercase(),
            shirt_number: self.shirt_number.trim().to_string(),
            playing_role,
            profile_photo: self.profile_photo.clone(),
            id_document: self.id_document.clone(),
            payment_screenshot: self.payment_screenshot.clone(),
        }
    }
}

/// Raw owner registration input.
#[derive(Debug, Clone, Default)]
pub struct OwnerRegistration {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub team_name: String,
    pub bio: String,
    pub image: Option<UploadFile>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MobileStatus {
    Idle,
    Checking,
    Exists,
    Available,
    Failed,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobileCheck {
    pub mobile_number: String,
    pub status: MobileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MobileCheck {
    pub fn idle() -> Self {
        Self {
            mobile_number: String::new(),
            status: MobileStatus::Idle,
            message: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileInput {
    pub mobile_number: String,
}

/// Returned after a successful registration.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub message: String,
    pub community_link: Option<String>,
}
