use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::string_or_number;

/// Key used for players the backend has not placed in any category yet.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub base_price: i64,
}

/// Denormalized owner attached to a sold player.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(deserialize_with = "string_or_number")]
    pub mobile_number: String,
    pub name: String,
    #[serde(default)]
    pub shirt_size: String,
    #[serde(default)]
    pub shirt_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub shirt_number: String,
    #[serde(default)]
    pub playing_role: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub id_document: Option<String>,
    #[serde(default)]
    pub payment_screenshot: Option<String>,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default)]
    pub is_icon_player: bool,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
    #[serde(default)]
    pub bid_amount: Option<i64>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Player {
    pub fn base_price(&self) -> i64 {
        self.category.as_ref().map(|c| c.base_price).unwrap_or(0)
    }

    pub fn category_key(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.id.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    /// The owner id, whether the backend sent it flat or denormalized.
    pub fn owned_by(&self) -> Option<&str> {
        self.owner_id
            .as_deref()
            .or_else(|| self.owner.as_ref().map(|o| o.id.as_str()))
            .filter(|id| !id.is_empty())
    }
}

/// Body of the players list call. Every criterion is optional and filtered
/// server-side.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_icon_player: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bid: Option<i64>,
}

impl PlayerFilter {
    /// True when `other` differs from `self` only in the free-text search.
    pub fn only_search_differs(&self, other: &PlayerFilter) -> bool {
        self.search != other.search
            && self.is_sold == other.is_sold
            && self.is_icon_player == other.is_icon_player
            && self.owner_id == other.owner_id
            && self.max_bid == other.max_bid
    }
}

/// Body of `PUT players/{mobileNumber}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAssignment {
    pub owner_id: String,
    pub bid_amount: i64,
    pub is_sold: bool,
}

impl PlayerAssignment {
    pub fn sold_to(owner_id: impl Into<String>, bid_amount: i64) -> Self {
        Self {
            owner_id: owner_id.into(),
            bid_amount,
            is_sold: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MobileCheckResponse {
    #[serde(alias = "isRegistered")]
    pub exists: bool,
}
