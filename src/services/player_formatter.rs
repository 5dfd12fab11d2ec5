use crate::dto::player_dto::Player;
use crate::dto::registration_dto::PlayingRole;

fn role_to_number(role: &str) -> u8 {
    match PlayingRole::parse(role) {
        Some(PlayingRole::Batsman) => 1,
        Some(PlayingRole::WicketKeeper) => 2,
        Some(PlayingRole::AllRounder) => 3,
        Some(PlayingRole::Bowler) => 4,
        None => 5,
    }
}

/// Amount in rupees with Indian digit grouping: 150000 -> "₹1,50,000".
pub fn format_rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if amount < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

pub fn sale_message(player_name: &str, owner_name: &str, amount: i64) -> String {
    format!(
        "Congratulations {}! {} joins the squad for {}.",
        owner_name,
        player_name,
        format_rupees(amount)
    )
}

/// Order used by the public player listing: icon players first, then the
/// most expensive categories, then batting order of roles, then name.
pub fn sort_for_listing(players: &mut [Player]) {
    players.sort_by_key(|p| {
        (
            std::cmp::Reverse(p.is_icon_player),
            std::cmp::Reverse(p.base_price()),
            role_to_number(&p.playing_role),
            p.name.to_lowercase(),
        )
    });
}
