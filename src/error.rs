use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("could not read response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    /// Message suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Check your connection.".into(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AuctionError {
    #[error("no player is open")]
    NoPlayerFocused,

    #[error("player index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("owner {0} is already being assigned")]
    AlreadyInFlight(String),

    #[error("player already belongs to owner {0}")]
    AlreadyOwned(String),

    #[error("bid {bid} is below the category base price {floor}")]
    BelowBasePrice { bid: i64, floor: i64 },
}

pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("please fix the highlighted fields")]
    Invalid(FieldErrors),

    #[error("this mobile number is already registered")]
    AlreadyRegistered,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Auction(#[from] AuctionError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Auction(AuctionError::IndexOutOfRange(_)) => StatusCode::NOT_FOUND,
            AppError::Auction(_) => StatusCode::CONFLICT,
            AppError::Registration(RegistrationError::Invalid(_)) => StatusCode::BAD_REQUEST,
            AppError::Registration(RegistrationError::AlreadyRegistered) => StatusCode::CONFLICT,
            AppError::Registration(RegistrationError::Api(_)) | AppError::Api(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        let fields = match &self {
            AppError::Registration(RegistrationError::Invalid(fields)) => Some(fields.clone()),
            _ => None,
        };
        let error = match &self {
            AppError::Api(e) | AppError::Registration(RegistrationError::Api(e)) => e.user_message(),
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error, fields })).into_response()
    }
}
