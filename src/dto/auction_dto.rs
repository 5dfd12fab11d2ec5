use serde::{Deserialize, Serialize};

use crate::dto::player_dto::{Player, PlayerFilter};

/// Keyboard shortcuts the auction screen listens for.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

#[derive(Debug, Deserialize)]
pub struct KeyPress {
    pub key: Key,
}

/// Transient overlay shown after a successful sale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
    pub player_name: String,
    pub owner_name: String,
    pub amount: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusedPlayer {
    pub index: usize,
    pub player: Player,
    pub floor: i64,
    pub position_in_category: usize,
    pub category_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub key: String,
    pub name: String,
    pub base_price: i64,
    pub players: Vec<Player>,
}

/// Everything the auction screen renders.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuctionView {
    pub filter: PlayerFilter,
    pub players: Vec<Player>,
    pub focused: Option<FocusedPlayer>,
    pub bid: i64,
    pub bid_display: String,
    pub in_flight: Vec<String>,
    pub celebration: Option<Celebration>,
    pub alert: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Serialize)]
pub struct AuctionUpdate {
    pub r#type: String,
    pub auction: AuctionView,
}
