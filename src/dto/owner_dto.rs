use serde::{Deserialize, Serialize};

use crate::dto::optional_string_or_number;
use crate::dto::player_dto::Player;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub purse: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Owner {
    /// Name shown on owner tiles: the team if there is one, else the person.
    pub fn display_name(&self) -> &str {
        if self.team_name.trim().is_empty() {
            &self.name
        } else {
            &self.team_name
        }
    }
}

/// An owner together with the players they bought.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSquad {
    pub owner: Owner,
    pub players: Vec<Player>,
    pub total_spent: i64,
    pub remaining_purse: Option<i64>,
}

#[derive(Serialize)]
pub struct OwnersUpdate {
    pub r#type: String,
    pub owners: Vec<Owner>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_mobile_numbers() {
        let owners: Vec<Owner> = serde_json::from_str(
            r#"[
                {"_id":"o1","name":"Anil","mobileNumber":9123456780,"purse":50000},
                {"_id":"o2","name":"Bina","mobileNumber":"9000000002"},
                {"_id":"o3","name":"Chetan","mobileNumber":null},
                {"_id":"o4","name":"Divya"}
            ]"#,
        )
        .unwrap();
        assert_eq!(owners[0].mobile_number.as_deref(), Some("9123456780"));
        assert_eq!(owners[1].mobile_number.as_deref(), Some("9000000002"));
        assert_eq!(owners[2].mobile_number, None);
        assert_eq!(owners[3].mobile_number, None);
    }
}
