use std::cmp::Reverse;

use crate::dto::owner_dto::{Owner, OwnerSquad};
use crate::dto::player_dto::Player;

/// Owners with the deepest purse first; owners without a purse go last.
pub fn owners_by_purse(mut owners: Vec<Owner>) -> Vec<Owner> {
    owners.sort_by(|a, b| {
        Reverse(a.purse.is_some())
            .cmp(&Reverse(b.purse.is_some()))
            .then_with(|| b.purse.cmp(&a.purse))
            .then_with(|| a.display_name().to_lowercase().cmp(&b.display_name().to_lowercase()))
    });
    owners
}

/// Players an owner bought, what they spent, and what is left in the purse.
pub fn squad(owner: Owner, players: &[Player]) -> OwnerSquad {
    let bought: Vec<Player> = players
        .iter()
        .filter(|p| p.owned_by() == Some(owner.id.as_str()))
        .cloned()
        .collect();
    let total_spent = bought.iter().filter_map(|p| p.bid_amount).sum();
    let remaining_purse = owner.purse.map(|purse| purse - total_spent);

    OwnerSquad {
        owner,
        players: bought,
        total_spent,
        remaining_purse,
    }
}

/// Case-insensitive match on name, shirt name or mobile number.
pub fn search_players<'a>(players: &'a [Player], query: &str) -> Vec<&'a Player> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return players.iter().collect();
    }
    players
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.shirt_name.to_lowercase().contains(&needle)
                || p.mobile_number.contains(&needle)
        })
        .collect()
}
