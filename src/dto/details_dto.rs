use serde::{Deserialize, Serialize};

use crate::dto::owner_dto::Owner;

/// Tournament configuration the informational pages render. Everything is
/// optional on the wire; missing sections decode as empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontendDetails {
    pub dashboard: Dashboard,
    pub payment: PaymentDetails,
    pub whatsapp: WhatsappLinks,
    pub gallery: Vec<MediaItem>,
    pub highlights: Vec<MediaItem>,
    pub past_winners: Vec<PastWinner>,
    pub about: AboutContent,
    pub owners: Vec<Owner>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Dashboard {
    pub tournament_name: String,
    pub season_label: String,
    pub year: Option<i32>,
    pub registration_fee: Option<i64>,
    pub registration_deadline: Option<String>,
    pub auction_date: Option<String>,
    pub tournament_start: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub upi_id: Option<String>,
    pub payee_name: Option<String>,
    pub qr_image: Option<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatsappLinks {
    pub player_group: Option<String>,
    pub owner_group: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub title: Option<String>,
    pub url: String,
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PastWinner {
    pub season: String,
    pub team_name: String,
    pub captain: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutContent {
    pub title: String,
    pub paragraphs: Vec<String>,
}

#[derive(Serialize)]
pub struct DetailsUpdate {
    pub r#type: String,
    pub details: FrontendDetails,
}
