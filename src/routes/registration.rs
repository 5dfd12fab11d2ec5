use std::collections::HashMap;

use axum::{
    Json,
    extract::{Extension, Multipart},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};

use crate::dto::registration_dto::{
    MobileCheck, MobileInput, OwnerRegistration, PlayerRegistration, UploadFile,
};
use crate::error::AppError;
use crate::state::AppState;

/// Text fields and files of a multipart form, keyed by field name.
#[derive(Default)]
struct FormParts {
    text: HashMap<String, String>,
    files: HashMap<String, UploadFile>,
}

impl FormParts {
    fn text(&mut self, name: &str) -> String {
        self.text.remove(name).unwrap_or_default()
    }

    fn file(&mut self, name: &str) -> Option<UploadFile> {
        self.files.remove(name)
    }
}

async fn read_form(mut multipart: Multipart) -> Result<FormParts, AppError> {
    let mut parts = FormParts::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Could not read form: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read {name}: {e}")))?;

        match file_name {
            // An untouched file input arrives with no name and no bytes.
            Some(file_name) if !file_name.is_empty() || !bytes.is_empty() => {
                parts
                    .files
                    .insert(name, UploadFile::new(file_name, content_type, bytes.to_vec()));
            }
            Some(_) => {}
            None => {
                parts
                    .text
                    .insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    Ok(parts)
}

/**
 * POST on every edit of the mobile number field.
 */
pub async fn mobile_input(
    Extension(state): Extension<AppState>,
    Json(payload): Json<MobileInput>,
) -> Json<MobileCheck> {
    Json(state.registration.mobile_input(&payload.mobile_number).await)
}

pub async fn mobile_status(Extension(state): Extension<AppState>) -> Json<MobileCheck> {
    Json(state.registration.mobile_check().await)
}

/**
 * POST a player registration (multipart: text fields plus three files).
 */
pub async fn register_player(
    Extension(state): Extension<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut parts = read_form(multipart).await?;
    let form = PlayerRegistration {
        name: parts.text("name"),
        mobile_number: parts.text("mobileNumber"),
        shirt_name: parts.text("shirtName"),
        shirt_size: parts.text("shirtSize"),
        shirt_number: parts.text("shirtNumber"),
        playing_role: parts.text("playingRole"),
        profile_photo: parts.file("profilePhoto"),
        id_document: parts.file("idDocument"),
        payment_screenshot: parts.file("paymentScreenshot"),
    };
    info!("Player registration for {}", form.mobile_number);

    let confirmation = state.registration.submit_player(&form).await.map_err(|e| {
        warn!("Player registration rejected: {}", e);
        AppError::from(e)
    })?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/**
 * POST an owner registration (multipart, optional image).
 */
pub async fn register_owner(
    Extension(state): Extension<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut parts = read_form(multipart).await?;
    let form = OwnerRegistration {
        name: parts.text("name"),
        mobile_number: parts.text("mobileNumber"),
        email: parts.text("email"),
        team_name: parts.text("teamName"),
        bio: parts.text("bio"),
        image: parts.file("image"),
    };
    info!("Owner registration for {}", form.name);

    let confirmation = state.registration.submit_owner(&form).await.map_err(|e| {
        warn!("Owner registration rejected: {}", e);
        AppError::from(e)
    })?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}
