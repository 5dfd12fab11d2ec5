//! Auction screen state: the loaded player pool, a cursor into it, the bid
//! counter, and the bookkeeping around owner assignment. Pure and
//! synchronous; `auction_desk` drives it against the backend.

use std::collections::{BTreeSet, HashMap};

use crate::dto::auction_dto::{AuctionView, CategoryGroup, Celebration, FocusedPlayer, Key};
use crate::dto::player_dto::{Player, PlayerFilter, UNCATEGORIZED};
use crate::error::AuctionError;
use crate::services::player_formatter::{format_rupees, sale_message};

/// Captured when an assignment starts, so the outcome can be applied after the
/// list has been refetched.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSale {
    pub mobile_number: String,
    pub player_name: String,
    pub owner_id: String,
    pub bid_amount: i64,
    /// Player that followed this one in its category when the sale started.
    pub next_mobile: Option<String>,
}

#[derive(Debug)]
pub struct AuctionBoard {
    players: Vec<Player>,
    /// Category key -> list indices, in list order.
    by_category: HashMap<String, Vec<usize>>,
    /// Mobile number -> position inside its category's index vector.
    slot: HashMap<String, usize>,
    focused: Option<usize>,
    bid: i64,
    step: i64,
    in_flight: BTreeSet<String>,
    celebration: Option<Celebration>,
    alert: Option<String>,
    error: Option<String>,
    loading: bool,
}

impl AuctionBoard {
    pub fn new(step: i64) -> Self {
        Self {
            players: Vec::new(),
            by_category: HashMap::new(),
            slot: HashMap::new(),
            focused: None,
            bid: 0,
            step,
            in_flight: BTreeSet::new(),
            celebration: None,
            alert: None,
            error: None,
            loading: false,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Swap in a freshly fetched list. The cursor follows its player by
    /// mobile number; if that player is gone the modal closes.
    pub fn replace_players(&mut self, players: Vec<Player>) {
        let focused_mobile = self.focused_player().map(|p| p.mobile_number.clone());

        self.players = players;
        self.by_category.clear();
        self.slot.clear();
        for (index, player) in self.players.iter().enumerate() {
            let members = self
                .by_category
                .entry(player.category_key().to_string())
                .or_default();
            self.slot.insert(player.mobile_number.clone(), members.len());
            members.push(index);
        }

        self.focused = focused_mobile.and_then(|mobile| self.index_of(&mobile));
        self.bid = self.bid.max(self.floor());
        self.loading = false;
        self.error = None;
    }

    pub fn index_of(&self, mobile_number: &str) -> Option<usize> {
        self.players.iter().position(|p| p.mobile_number == mobile_number)
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_player(&self) -> Option<&Player> {
        self.focused.and_then(|i| self.players.get(i))
    }

    pub fn is_open(&self) -> bool {
        self.focused.is_some()
    }

    /// Open the modal on `index`, resetting the bid to its base price.
    pub fn open(&mut self, index: usize) -> Result<(), AuctionError> {
        let player = self
            .players
            .get(index)
            .ok_or(AuctionError::IndexOutOfRange(index))?;
        self.bid = player.base_price();
        self.focused = Some(index);
        Ok(())
    }

    pub fn open_mobile(&mut self, mobile_number: &str) -> bool {
        match self.index_of(mobile_number) {
            Some(index) => self.open(index).is_ok(),
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.focused = None;
    }

    fn category_members(&self, player: &Player) -> Option<(&Vec<usize>, usize)> {
        let members = self.by_category.get(player.category_key())?;
        let position = *self.slot.get(&player.mobile_number)?;
        Some((members, position))
    }

    pub fn next_index(&self) -> Option<usize> {
        let (members, position) = self.category_members(self.focused_player()?)?;
        members.get(position + 1).copied()
    }

    pub fn previous_index(&self) -> Option<usize> {
        let (members, position) = self.category_members(self.focused_player()?)?;
        position.checked_sub(1).and_then(|p| members.get(p).copied())
    }

    /// Move to the next player in the same category. No-op at the end.
    pub fn next(&mut self) -> bool {
        match self.next_index() {
            Some(index) => self.open(index).is_ok(),
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.previous_index() {
            Some(index) => self.open(index).is_ok(),
            None => false,
        }
    }

    /// Lowest bid allowed: the focused player's category base price.
    pub fn floor(&self) -> i64 {
        self.focused_player().map(Player::base_price).unwrap_or(0)
    }

    pub fn bid(&self) -> i64 {
        self.bid
    }

    pub fn bid_up(&mut self) {
        self.bid = self.bid.max(self.floor()) + self.step;
    }

    pub fn bid_down(&mut self) {
        self.bid = (self.bid - self.step).max(self.floor());
    }

    /// Apply a keyboard shortcut. Returns whether anything changed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let before = (self.focused, self.bid);
        match key {
            Key::ArrowUp => self.bid_up(),
            Key::ArrowDown => self.bid_down(),
            Key::ArrowRight if self.is_open() => {
                self.next();
            }
            Key::ArrowLeft if self.is_open() => {
                self.previous();
            }
            Key::Escape => self.close(),
            Key::ArrowLeft | Key::ArrowRight => {}
        }
        before != (self.focused, self.bid)
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &str> {
        self.in_flight.iter().map(String::as_str)
    }

    /// Validate and record the start of an owner assignment for the focused
    /// player at the current bid.
    pub fn begin_assignment(&mut self, owner_id: &str) -> Result<PendingSale, AuctionError> {
        let player = self.focused_player().ok_or(AuctionError::NoPlayerFocused)?;

        if self.in_flight.contains(owner_id) {
            return Err(AuctionError::AlreadyInFlight(owner_id.to_string()));
        }
        if player.owned_by() == Some(owner_id) {
            return Err(AuctionError::AlreadyOwned(owner_id.to_string()));
        }
        let floor = player.base_price();
        if self.bid < floor {
            return Err(AuctionError::BelowBasePrice {
                bid: self.bid,
                floor,
            });
        }

        let next_mobile = self
            .next_index()
            .and_then(|i| self.players.get(i))
            .map(|p| p.mobile_number.clone());
        let sale = PendingSale {
            mobile_number: player.mobile_number.clone(),
            player_name: player.name.clone(),
            owner_id: owner_id.to_string(),
            bid_amount: self.bid,
            next_mobile,
        };

        self.in_flight.insert(owner_id.to_string());
        self.alert = None;
        Ok(sale)
    }

    pub fn assignment_failed(&mut self, owner_id: &str, message: impl Into<String>) {
        self.in_flight.remove(owner_id);
        self.alert = Some(message.into());
    }

    pub fn assignment_succeeded(&mut self, sale: &PendingSale, owner_name: &str) {
        self.in_flight.remove(&sale.owner_id);
        self.celebration = Some(Celebration {
            player_name: sale.player_name.clone(),
            owner_name: owner_name.to_string(),
            amount: sale.bid_amount,
            message: sale_message(&sale.player_name, owner_name, sale.bid_amount),
        });
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Drop the overlay and move to `next_mobile` if it is still loaded,
    /// otherwise close the modal. Returns whether a player is now open.
    pub fn finish_celebration(&mut self, next_mobile: Option<&str>) -> bool {
        self.celebration = None;
        let advanced = next_mobile.is_some_and(|mobile| self.open_mobile(mobile));
        if !advanced {
            self.close();
        }
        advanced
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Players grouped by category, most expensive category first.
    pub fn category_groups(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = self
            .by_category
            .iter()
            .map(|(key, members)| {
                let players: Vec<Player> =
                    members.iter().map(|&i| self.players[i].clone()).collect();
                let (name, base_price) = players
                    .first()
                    .and_then(|p| p.category.as_ref())
                    .map(|c| (c.name.clone(), c.base_price))
                    .unwrap_or_else(|| (UNCATEGORIZED.to_string(), 0));
                CategoryGroup {
                    key: key.clone(),
                    name,
                    base_price,
                    players,
                }
            })
            .collect();
        groups.sort_by(|a, b| b.base_price.cmp(&a.base_price).then_with(|| a.name.cmp(&b.name)));
        groups
    }

    pub fn view(&self, filter: &PlayerFilter) -> AuctionView {
        let focused = self.focused.and_then(|index| {
            let player = self.players.get(index)?;
            let (members, position) = self.category_members(player)?;
            Some(FocusedPlayer {
                index,
                player: player.clone(),
                floor: player.base_price(),
                position_in_category: position,
                category_size: members.len(),
                has_next: position + 1 < members.len(),
                has_previous: position > 0,
            })
        });

        AuctionView {
            filter: filter.clone(),
            players: self.players.clone(),
            focused,
            bid: self.bid,
            bid_display: format_rupees(self.bid),
            in_flight: self.in_flight.iter().cloned().collect(),
            celebration: self.celebration.clone(),
            alert: self.alert.clone(),
            error: self.error.clone(),
            loading: self.loading,
        }
    }
}
