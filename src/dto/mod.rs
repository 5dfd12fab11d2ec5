pub mod auction_dto;
pub mod details_dto;
pub mod owner_dto;
pub mod player_dto;
pub mod registration_dto;

use serde::{Deserialize, Deserializer};

/// The backend is not consistent about numeric-looking fields (shirt numbers,
/// mobile numbers); accept either a JSON string or a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Nothing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Nothing(()) => String::new(),
    })
}

/// `string_or_number` for optional fields; null and empty strings are `None`.
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = string_or_number(deserializer)?;
    Ok((!value.is_empty()).then_some(value))
}

/// Responses come back either bare or wrapped in `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Shirt {
        #[serde(deserialize_with = "string_or_number")]
        number: String,
    }

    #[test]
    fn shirt_number_accepts_strings_and_numbers() {
        let a: Shirt = serde_json::from_str(r#"{"number":"07"}"#).unwrap();
        let b: Shirt = serde_json::from_str(r#"{"number":18}"#).unwrap();
        let c: Shirt = serde_json::from_str(r#"{"number":null}"#).unwrap();
        assert_eq!(a.number, "07");
        assert_eq!(b.number, "18");
        assert_eq!(c.number, "");
    }

    #[test]
    fn envelope_unwraps_data_field() {
        let wrapped: Envelope<Vec<i32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        let bare: Envelope<Vec<i32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);
        assert_eq!(bare.into_inner(), vec![3]);
    }
}
