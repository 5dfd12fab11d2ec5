//! Player and owner registration: field validation, the debounced
//! "already registered?" lookup, and submission.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::dto::registration_dto::{
    Confirmation, MobileCheck, MobileStatus, OwnerRegistration, PlayerRegistration, PlayingRole,
    SHIRT_SIZES, UploadFile,
};
use crate::dto::details_dto::WhatsappLinks;
use crate::error::{ApiError, FieldErrors, RegistrationError};
use crate::services::debounce::Debouncer;
use crate::services::gateway::TournamentApi;
use crate::services::provider::DetailsProvider;

pub const MOBILE_LENGTH: usize = 10;
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_SHIRT_NAME_CHARS: usize = 15;
pub const MAX_TEAM_NAME_CHARS: usize = 40;
pub const MAX_BIO_CHARS: usize = 500;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];
const DOCUMENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "application/pdf"];

pub fn is_valid_mobile(raw: &str) -> bool {
    let mobile = raw.trim();
    mobile.len() == MOBILE_LENGTH && mobile.bytes().all(|b| b.is_ascii_digit())
}

fn check_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    max_chars: usize,
    required: bool,
) {
    let value = value.trim();
    if required && value.is_empty() {
        errors.insert(field, format!("{label} is required"));
    } else if value.chars().count() > max_chars {
        errors.insert(field, format!("{label} must be at most {max_chars} characters"));
    }
}

fn check_mobile(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("mobileNumber", "Mobile number is required".into());
    } else if !is_valid_mobile(value) {
        errors.insert(
            "mobileNumber",
            format!("Mobile number must be exactly {MOBILE_LENGTH} digits"),
        );
    }
}

fn check_file(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    file: Option<&UploadFile>,
    allowed: &[&str],
    required: bool,
) {
    let Some(file) = file else {
        if required {
            errors.insert(field, format!("{label} is required"));
        }
        return;
    };

    let content_type = file.content_type.to_ascii_lowercase();
    if !allowed.contains(&content_type.as_str()) {
        errors.insert(field, format!("{label} must be one of: {}", allowed.join(", ")));
    } else if file.size() == 0 {
        errors.insert(field, format!("{label} is empty"));
    } else if file.size() > MAX_FILE_BYTES {
        errors.insert(
            field,
            format!("{label} must be smaller than {} MB", MAX_FILE_BYTES / (1024 * 1024)),
        );
    }
}

pub fn validate_player(form: &PlayerRegistration) -> Result<(), RegistrationError> {
    let mut errors = FieldErrors::new();

    check_text(&mut errors, "name", "Name", &form.name, MAX_NAME_CHARS, true);
    check_mobile(&mut errors, &form.mobile_number);
    check_text(
        &mut errors,
        "shirtName",
        "Shirt name",
        &form.shirt_name,
        MAX_SHIRT_NAME_CHARS,
        true,
    );

    let size = form.shirt_size.trim().to_ascii_uppercase();
    if size.is_empty() {
        errors.insert("shirtSize", "Shirt size is required".into());
    } else if !SHIRT_SIZES.contains(&size.as_str()) {
        errors.insert("shirtSize", format!("Shirt size must be one of {}", SHIRT_SIZES.join(", ")));
    }

    let number = form.shirt_number.trim();
    if number.is_empty() {
        errors.insert("shirtNumber", "Shirt number is required".into());
    } else if number.len() > 3 || !number.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert("shirtNumber", "Shirt number must be 1 to 3 digits".into());
    }

    if form.playing_role.trim().is_empty() {
        errors.insert("playingRole", "Playing role is required".into());
    } else if PlayingRole::parse(&form.playing_role).is_none() {
        errors.insert("playingRole", "Choose batsman, bowler, all-rounder or wicket-keeper".into());
    }

    check_file(
        &mut errors,
        "profilePhoto",
        "Profile photo",
        form.profile_photo.as_ref(),
        IMAGE_TYPES,
        true,
    );
    check_file(
        &mut errors,
        "idDocument",
        "ID document",
        form.id_document.as_ref(),
        DOCUMENT_TYPES,
        true,
    );
    check_file(
        &mut errors,
        "paymentScreenshot",
        "Payment screenshot",
        form.payment_screenshot.as_ref(),
        IMAGE_TYPES,
        true,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RegistrationError::Invalid(errors))
    }
}

pub fn validate_owner(form: &OwnerRegistration) -> Result<(), RegistrationError> {
    let mut errors = FieldErrors::new();

    check_text(&mut errors, "name", "Name", &form.name, MAX_NAME_CHARS, true);
    check_mobile(&mut errors, &form.mobile_number);

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required".into());
    } else if !looks_like_email(email) {
        errors.insert("email", "Enter a valid email address".into());
    }

    check_text(
        &mut errors,
        "teamName",
        "Team name",
        &form.team_name,
        MAX_TEAM_NAME_CHARS,
        true,
    );
    check_text(&mut errors, "bio", "Bio", &form.bio, MAX_BIO_CHARS, false);
    check_file(&mut errors, "image", "Image", form.image.as_ref(), IMAGE_TYPES, false);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RegistrationError::Invalid(errors))
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

/// Registration desk: holds the live mobile-number check and submits forms.
pub struct Registration {
    api: Arc<dyn TournamentApi>,
    details: Arc<DetailsProvider>,
    check: Arc<RwLock<MobileCheck>>,
    debounce: Debouncer,
}

impl Registration {
    pub fn new(
        api: Arc<dyn TournamentApi>,
        details: Arc<DetailsProvider>,
        debounce: Duration,
    ) -> Self {
        Self {
            api,
            details,
            check: Arc::new(RwLock::new(MobileCheck::idle())),
            debounce: Debouncer::new(debounce),
        }
    }

    pub async fn mobile_check(&self) -> MobileCheck {
        self.check.read().await.clone()
    }

    /// Called on every edit of the mobile field. Incomplete numbers reset the
    /// indicator; complete ones are looked up after the debounce delay.
    pub async fn mobile_input(&self, raw: &str) -> MobileCheck {
        let mobile = raw.trim().to_string();

        if !is_valid_mobile(&mobile) {
            self.debounce.cancel();
            let mut check = self.check.write().await;
            *check = MobileCheck {
                mobile_number: mobile,
                ..MobileCheck::idle()
            };
            return check.clone();
        }

        let pending = MobileCheck {
            mobile_number: mobile.clone(),
            status: MobileStatus::Checking,
            message: None,
        };
        *self.check.write().await = pending.clone();

        let api = Arc::clone(&self.api);
        let check = Arc::clone(&self.check);
        self.debounce.schedule(async move {
            let outcome = lookup(api.as_ref(), &mobile).await;
            let mut current = check.write().await;
            if current.mobile_number == mobile {
                *current = outcome;
            }
        });

        pending
    }

    /// Fails with `AlreadyRegistered` unless the number is known to be free,
    /// looking it up now if the debounced check has not settled.
    async fn ensure_available(&self, raw: &str) -> Result<(), RegistrationError> {
        let mobile = raw.trim();
        let cached = self.check.read().await.clone();
        let status = if cached.mobile_number == mobile
            && matches!(cached.status, MobileStatus::Exists | MobileStatus::Available)
        {
            cached.status
        } else {
            self.debounce.cancel();
            let outcome = lookup(self.api.as_ref(), mobile).await;
            let status = outcome.status;
            *self.check.write().await = outcome;
            status
        };

        match status {
            MobileStatus::Available => Ok(()),
            MobileStatus::Exists => Err(RegistrationError::AlreadyRegistered),
            _ => {
                let message = self
                    .check
                    .read()
                    .await
                    .message
                    .clone()
                    .unwrap_or_else(|| "Could not verify the mobile number".to_string());
                Err(RegistrationError::Api(ApiError::Status {
                    status: 503,
                    message,
                }))
            }
        }
    }

    async fn confirmation(
        &self,
        message: &str,
        link: fn(&WhatsappLinks) -> Option<String>,
    ) -> Confirmation {
        self.debounce.cancel();
        *self.check.write().await = MobileCheck::idle();
        let community_link = self.details.value().await.and_then(|d| link(&d.whatsapp));
        Confirmation {
            message: message.to_string(),
            community_link,
        }
    }

    pub async fn submit_player(
        &self,
        form: &PlayerRegistration,
    ) -> Result<Confirmation, RegistrationError> {
        validate_player(form)?;
        let form = &form.normalized();
        self.ensure_available(&form.mobile_number).await?;

        self.api.register_player(form).await.map_err(|e| {
            warn!("Player registration failed: {}", e);
            RegistrationError::Api(e)
        })?;
        info!("Player {} registered", form.mobile_number.trim());

        Ok(self
            .confirmation("Registration successful! Join the players' group for updates.", |w| {
                w.player_group.clone()
            })
            .await)
    }

    pub async fn submit_owner(
        &self,
        form: &OwnerRegistration,
    ) -> Result<Confirmation, RegistrationError> {
        validate_owner(form)?;

        self.api.register_owner(form).await.map_err(|e| {
            warn!("Owner registration failed: {}", e);
            RegistrationError::Api(e)
        })?;
        info!("Owner {} registered", form.name.trim());

        Ok(self
            .confirmation("Owner registration received! Join the owners' group for updates.", |w| {
                w.owner_group.clone()
            })
            .await)
    }
}

async fn lookup(api: &dyn TournamentApi, mobile: &str) -> MobileCheck {
    match api.check_mobile(mobile).await {
        Ok(exists) => MobileCheck {
            mobile_number: mobile.to_string(),
            status: if exists {
                MobileStatus::Exists
            } else {
                MobileStatus::Available
            },
            message: exists.then(|| "This mobile number is already registered".to_string()),
        },
        Err(e) => {
            warn!("Mobile check for {} failed: {}", mobile, e);
            MobileCheck {
                mobile_number: mobile.to_string(),
                status: MobileStatus::Failed,
                message: Some(e.user_message()),
            }
        }
    }
}
