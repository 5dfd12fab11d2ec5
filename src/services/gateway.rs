use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info};

use crate::dto::{
    Envelope,
    details_dto::FrontendDetails,
    owner_dto::Owner,
    player_dto::{MobileCheckResponse, Player, PlayerAssignment, PlayerFilter},
    registration_dto::{OwnerRegistration, PlayerRegistration, UploadFile},
};
use crate::error::ApiError;

/// Named endpoints of the tournament backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Details,
    CheckMobile,
    Owners,
    Owner,
    Players,
    FrontendDetails,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Register => "register",
            Endpoint::Details => "details",
            Endpoint::CheckMobile => "check-mobile",
            Endpoint::Owners => "owners",
            Endpoint::Owner => "owner",
            Endpoint::Players => "players",
            Endpoint::FrontendDetails => "frontendDetails",
        }
    }
}

/// Everything the desk asks of the backend. `ApiGateway` talks HTTP; tests
/// swap in an in-memory implementation.
#[async_trait]
pub trait TournamentApi: Send + Sync {
    async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ApiError>;
    async fn update_player(
        &self,
        mobile_number: &str,
        assignment: &PlayerAssignment,
    ) -> Result<(), ApiError>;
    async fn player_details(&self, mobile_number: &str) -> Result<Player, ApiError>;
    async fn owners(&self) -> Result<Vec<Owner>, ApiError>;
    async fn owner(&self, id: &str) -> Result<Owner, ApiError>;
    async fn frontend_details(&self) -> Result<FrontendDetails, ApiError>;
    async fn check_mobile(&self, mobile_number: &str) -> Result<bool, ApiError>;
    async fn register_player(&self, form: &PlayerRegistration) -> Result<(), ApiError>;
    async fn register_owner(&self, form: &OwnerRegistration) -> Result<(), ApiError>;
}

pub struct ApiGateway {
    client: Client,
    base: String,
}

impl ApiGateway {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/{endpoint}[/{suffix}][?query]`. Suffix segments are percent
    /// encoded.
    pub fn build_url(
        &self,
        endpoint: Endpoint,
        suffix: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base, endpoint.path());
        let mut url = Url::parse(&raw).map_err(|e| ApiError::Url(format!("{raw}: {e}")))?;

        if let Some(suffix) = suffix {
            url.path_segments_mut()
                .map_err(|_| ApiError::Url(raw.clone()))?
                .push(suffix);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        endpoint: Endpoint,
        suffix: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.build_url(endpoint, suffix, query)?;
        info!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), status.canonical_reason(), &body);
        error!("Backend answered {}: {}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let body = response.text().await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(Envelope::into_inner)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Best-effort message from an error body: `message`, then `error`, then the
/// HTTP status text.
pub fn error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["message", "error"].iter().find_map(|key| {
            json.get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
    });

    from_body
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

fn file_part(file: &UploadFile) -> Result<multipart::Part, ApiError> {
    multipart::Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| ApiError::Decode(format!("{}: {}", file.file_name, e)))
}

pub fn player_form(form: &PlayerRegistration) -> Result<multipart::Form, ApiError> {
    let form = form.normalized();
    let mut body = multipart::Form::new()
        .text("name", form.name)
        .text("mobileNumber", form.mobile_number)
        .text("shirtName", form.shirt_name)
        .text("shirtSize", form.shirt_size)
        .text("shirtNumber", form.shirt_number)
        .text("playingRole", form.playing_role);

    for (field, file) in [
        ("profilePhoto", &form.profile_photo),
        ("idDocument", &form.id_document),
        ("paymentScreenshot", &form.payment_screenshot),
    ] {
        if let Some(file) = file.as_ref() {
            body = body.part(field, file_part(file)?);
        }
    }
    Ok(body)
}

pub fn owner_form(form: &OwnerRegistration) -> Result<multipart::Form, ApiError> {
    let mut body = multipart::Form::new()
        .text("name", form.name.trim().to_string())
        .text("mobileNumber", form.mobile_number.trim().to_string())
        .text("email", form.email.trim().to_string())
        .text("teamName", form.team_name.trim().to_string())
        .text("bio", form.bio.trim().to_string());

    if let Some(image) = &form.image {
        body = body.part("image", file_part(image)?);
    }
    Ok(body)
}

#[async_trait]
impl TournamentApi for ApiGateway {
    async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ApiError> {
        let request = self.request(Method::POST, Endpoint::Players, None, &[])?.json(filter);
        Self::fetch(request).await
    }

    async fn update_player(
        &self,
        mobile_number: &str,
        assignment: &PlayerAssignment,
    ) -> Result<(), ApiError> {
        let request = self
            .request(Method::PUT, Endpoint::Players, Some(mobile_number), &[])?
            .json(assignment);
        // Any 2xx is a recorded sale; the body shape varies between deployments.
        Self::send(request).await?;
        Ok(())
    }

    async fn player_details(&self, mobile_number: &str) -> Result<Player, ApiError> {
        let request = self.request(
            Method::GET,
            Endpoint::Details,
            None,
            &[("mobileNumber", mobile_number)],
        )?;
        Self::fetch(request).await
    }

    async fn owners(&self) -> Result<Vec<Owner>, ApiError> {
        let request = self.request(Method::GET, Endpoint::Owners, None, &[])?;
        Self::fetch(request).await
    }

    async fn owner(&self, id: &str) -> Result<Owner, ApiError> {
        let request = self.request(Method::GET, Endpoint::Owner, Some(id), &[])?;
        Self::fetch(request).await
    }

    async fn frontend_details(&self) -> Result<FrontendDetails, ApiError> {
        let request = self.request(Method::GET, Endpoint::FrontendDetails, None, &[])?;
        Self::fetch(request).await
    }

    async fn check_mobile(&self, mobile_number: &str) -> Result<bool, ApiError> {
        let request = self.request(
            Method::GET,
            Endpoint::CheckMobile,
            None,
            &[("mobileNumber", mobile_number)],
        )?;
        let response: MobileCheckResponse = Self::fetch(request).await?;
        Ok(response.exists)
    }

    async fn register_player(&self, form: &PlayerRegistration) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, Endpoint::Register, None, &[])?
            .multipart(player_form(form)?);
        Self::send(request).await?;
        info!("Registered player {}", form.mobile_number);
        Ok(())
    }

    async fn register_owner(&self, form: &OwnerRegistration) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, Endpoint::Owner, None, &[])?
            .multipart(owner_form(form)?);
        Self::send(request).await?;
        info!("Registered owner {}", form.name);
        Ok(())
    }
}
