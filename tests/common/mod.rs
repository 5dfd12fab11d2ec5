#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use auction_desk::config::Settings;
use auction_desk::dto::details_dto::{FrontendDetails, WhatsappLinks};
use auction_desk::dto::owner_dto::Owner;
use auction_desk::dto::player_dto::{Category, OwnerRef, Player, PlayerAssignment, PlayerFilter};
use auction_desk::dto::registration_dto::{OwnerRegistration, PlayerRegistration, UploadFile};
use auction_desk::error::ApiError;
use auction_desk::services::gateway::TournamentApi;

pub const PLAYER_GROUP: &str = "https://chat.whatsapp.com/players";

/// In-memory backend. Filters like the real one and records every call.
#[derive(Default)]
pub struct FakeApi {
    pub players: Mutex<Vec<Player>>,
    pub owners: Mutex<Vec<Owner>>,
    pub registered_mobiles: Mutex<Vec<String>>,
    /// Players excluded from list responses regardless of filter.
    pub hidden: Mutex<Vec<String>>,
    pub fail_update: Mutex<Option<String>>,
    pub list_delays: Mutex<VecDeque<Duration>>,
    pub list_calls: Mutex<Vec<PlayerFilter>>,
    pub owner_calls: Mutex<usize>,
    pub check_calls: Mutex<usize>,
    pub player_registrations: Mutex<Vec<PlayerRegistration>>,
    pub owner_registrations: Mutex<Vec<OwnerRegistration>>,
}

impl FakeApi {
    pub fn with_players(players: Vec<Player>, owners: Vec<Owner>) -> Arc<Self> {
        let fake = FakeApi::default();
        *fake.players.lock().unwrap() = players;
        *fake.owners.lock().unwrap() = owners;
        Arc::new(fake)
    }

    pub fn hide(&self, mobile: &str) {
        self.hidden.lock().unwrap().push(mobile.to_string());
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn owner_call_count(&self) -> usize {
        *self.owner_calls.lock().unwrap()
    }

    pub fn check_call_count(&self) -> usize {
        *self.check_calls.lock().unwrap()
    }
}

fn matches(player: &Player, filter: &PlayerFilter) -> bool {
    filter.is_sold.is_none_or(|sold| player.is_sold == sold)
        && filter
            .is_icon_player
            .is_none_or(|icon| player.is_icon_player == icon)
        && filter
            .owner_id
            .as_deref()
            .is_none_or(|id| player.owned_by() == Some(id))
        && filter
            .search
            .as_deref()
            .is_none_or(|q| player.name.to_lowercase().contains(&q.to_lowercase()))
        && filter
            .max_bid
            .is_none_or(|max| player.bid_amount.unwrap_or(0) <= max)
}

#[async_trait]
impl TournamentApi for FakeApi {
    async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ApiError> {
        self.list_calls.lock().unwrap().push(filter.clone());
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let hidden = self.hidden.lock().unwrap().clone();
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .filter(|p| matches(p, filter) && !hidden.contains(&p.mobile_number))
            .cloned()
            .collect())
    }

    async fn update_player(
        &self,
        mobile_number: &str,
        assignment: &PlayerAssignment,
    ) -> Result<(), ApiError> {
        if let Some(message) = self.fail_update.lock().unwrap().clone() {
            return Err(ApiError::Status {
                status: 400,
                message,
            });
        }
        let owner_name = self
            .owners
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == assignment.owner_id)
            .map(|o| o.name.clone())
            .unwrap_or_default();

        let mut players = self.players.lock().unwrap();
        let player = players
            .iter_mut()
            .find(|p| p.mobile_number == mobile_number)
            .ok_or(ApiError::Status {
                status: 404,
                message: "Player not found".into(),
            })?;
        player.is_sold = assignment.is_sold;
        player.bid_amount = Some(assignment.bid_amount);
        player.owner_id = Some(assignment.owner_id.clone());
        player.owner = Some(OwnerRef {
            id: assignment.owner_id.clone(),
            name: owner_name,
            team_name: None,
        });
        Ok(())
    }

    async fn player_details(&self, mobile_number: &str) -> Result<Player, ApiError> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.mobile_number == mobile_number)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: "Player not found".into(),
            })
    }

    async fn owners(&self) -> Result<Vec<Owner>, ApiError> {
        *self.owner_calls.lock().unwrap() += 1;
        Ok(self.owners.lock().unwrap().clone())
    }

    async fn owner(&self, id: &str) -> Result<Owner, ApiError> {
        self.owners
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: "Owner not found".into(),
            })
    }

    async fn frontend_details(&self) -> Result<FrontendDetails, ApiError> {
        Ok(FrontendDetails {
            whatsapp: WhatsappLinks {
                player_group: Some(PLAYER_GROUP.to_string()),
                owner_group: None,
            },
            ..Default::default()
        })
    }

    async fn check_mobile(&self, mobile_number: &str) -> Result<bool, ApiError> {
        *self.check_calls.lock().unwrap() += 1;
        Ok(self
            .registered_mobiles
            .lock()
            .unwrap()
            .iter()
            .any(|m| m == mobile_number))
    }

    async fn register_player(&self, form: &PlayerRegistration) -> Result<(), ApiError> {
        self.player_registrations.lock().unwrap().push(form.clone());
        self.registered_mobiles
            .lock()
            .unwrap()
            .push(form.mobile_number.trim().to_string());
        Ok(())
    }

    async fn register_owner(&self, form: &OwnerRegistration) -> Result<(), ApiError> {
        self.owner_registrations.lock().unwrap().push(form.clone());
        Ok(())
    }
}

pub fn settings() -> Settings {
    Settings::from_lookup(|_| None)
}

pub fn category(id: &str, name: &str, base_price: i64) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        base_price,
    }
}

pub fn player(mobile: &str, name: &str, category: Option<Category>) -> Player {
    Player {
        mobile_number: mobile.to_string(),
        name: name.to_string(),
        shirt_size: "M".into(),
        shirt_name: name.to_uppercase(),
        shirt_number: "10".into(),
        playing_role: "batsman".into(),
        profile_photo: None,
        id_document: None,
        payment_screenshot: None,
        is_sold: false,
        is_icon_player: false,
        owner_id: None,
        owner: None,
        bid_amount: None,
        category,
        created_at: None,
    }
}

pub fn owner(id: &str, team: &str, purse: Option<i64>) -> Owner {
    Owner {
        id: id.to_string(),
        name: format!("{team} owner"),
        mobile_number: None,
        email: None,
        bio: None,
        team_name: team.to_string(),
        season: Some("Season 3".into()),
        purse,
        image: None,
    }
}

/// A, B, C in Gold (base ₹1000) with S in Silver between them.
pub fn gold_pool() -> Arc<FakeApi> {
    let gold = category("gold", "Gold", 1000);
    let silver = category("silver", "Silver", 500);
    FakeApi::with_players(
        vec![
            player("1000000001", "A", Some(gold.clone())),
            player("1000000002", "S", Some(silver)),
            player("1000000003", "B", Some(gold.clone())),
            player("1000000004", "C", Some(gold)),
        ],
        vec![
            owner("falcons", "Falcons", Some(50000)),
            owner("tigers", "Tigers", Some(40000)),
        ],
    )
}

pub fn image(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", vec![7u8; 2048])
}

pub fn valid_player_form(mobile: &str) -> PlayerRegistration {
    PlayerRegistration {
        name: "Ravi Kumar".into(),
        mobile_number: mobile.into(),
        shirt_name: "RAVI".into(),
        shirt_size: "L".into(),
        shirt_number: "18".into(),
        playing_role: "bowler".into(),
        profile_photo: Some(image("me.png")),
        id_document: Some(image("id.png")),
        payment_screenshot: Some(image("paid.png")),
    }
}
