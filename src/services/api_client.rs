// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Wrappers de la Story API. Todo cuerpo con `error: true` se convierte en
// `ApiError::Server`, sea cual sea el status HTTP.
// ============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};
use crate::config::CONFIG;
use crate::models::{
    decode_envelope, ApiError, LoginRequest, LoginResponse, LoginResult, MessageResponse,
    PushSubscriptionBody, RegisterRequest, Session, Story, StoryFilter, StoryUpload, UnsubscribeBody,
};

/// Login y registro
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, ApiError>;
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<String, ApiError>;
}

/// Listado y creación de historias
#[allow(async_fn_in_trait)]
pub trait StoryGateway {
    /// Binario de la foto (`web_sys::File` en el navegador)
    type Photo;

    async fn list_stories(&self, token: &str, filter: StoryFilter) -> Result<Vec<Story>, ApiError>;
    async fn add_story(&self, upload: StoryUpload<Self::Photo>, auth: UploadAuth) -> Result<String, ApiError>;
}

/// Suscripción a notificaciones push
#[allow(async_fn_in_trait)]
pub trait PushGateway {
    async fn subscribe_push(&self, token: &str, body: &PushSubscriptionBody) -> Result<(), ApiError>;
    async fn unsubscribe_push(&self, token: &str, endpoint: &str) -> Result<(), ApiError>;
}

/// Modo de autenticación de la subida de una historia
#[derive(Debug, Clone, PartialEq)]
pub enum UploadAuth {
    Bearer(String),
    /// `POST /stories/guest`, sin cabecera Authorization
    Guest,
}

impl UploadAuth {
    pub fn for_session(session: &Session, guest: bool) -> Result<Self, ApiError> {
        if guest {
            return Ok(UploadAuth::Guest);
        }
        session
            .token()
            .map(|t| UploadAuth::Bearer(t.to_string()))
            .ok_or_else(ApiError::missing_token)
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            UploadAuth::Bearer(_) => "stories",
            UploadAuth::Guest => "stories/guest",
        }
    }
}

#[derive(serde::Deserialize)]
struct StoriesResponse {
    #[serde(rename = "listStory", default)]
    list_story: Vec<Story>,
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Leer el cuerpo y normalizar el sobre `{ error, message }`
async fn read_envelope<T: DeserializeOwned>(response: Response, default_message: &str) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode_envelope(&body, default_message).map_err(|err| match err {
        // Cuerpo no-JSON con status de error: mejor mostrar el HTTP
        ApiError::Parse(_) if !(200..300).contains(&status) => {
            ApiError::Server(format!("HTTP {}: {}", status, default_message))
        }
        other => other,
    })
}

fn build_story_form(upload: &StoryUpload<File>) -> Result<FormData, ApiError> {
    let form = FormData::new()?;
    form.append_with_str("description", &upload.description)?;
    form.append_with_blob_and_filename("photo", &upload.photo, &upload.photo.name())?;
    if let Some(location) = upload.location {
        form.append_with_str("lat", &location.lat.to_string())?;
        form.append_with_str("lon", &location.lon.to_string())?;
    }
    Ok(form)
}

impl AuthGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, ApiError> {
        log::info!("🔐 [API] Login para: {}", email);

        let response = Request::post(&self.url("login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data: LoginResponse = read_envelope(response, "Login gagal.").await?;
        log::info!("✅ [API] Login correcto: {}", data.login_result.name);
        Ok(data.login_result)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<String, ApiError> {
        log::info!("📝 [API] Registro de: {}", email);

        let response = Request::post(&self.url("register"))
            .json(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data: MessageResponse = read_envelope(response, "Pendaftaran gagal.").await?;
        Ok(data.message.unwrap_or_else(|| "User created".to_string()))
    }
}

impl StoryGateway for ApiClient {
    type Photo = File;

    async fn list_stories(&self, token: &str, filter: StoryFilter) -> Result<Vec<Story>, ApiError> {
        log::info!("📚 [API] Obteniendo historias (location={})", filter.query_value());

        let response = Request::get(&self.url("stories"))
            .query([("location", filter.query_value())])
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data: StoriesResponse = read_envelope(response, "Gagal memuat cerita.").await?;
        log::info!("✅ [API] {} historias recibidas", data.list_story.len());
        Ok(data.list_story)
    }

    async fn add_story(&self, upload: StoryUpload<File>, auth: UploadAuth) -> Result<String, ApiError> {
        log::info!(
            "📤 [API] Enviando historia ({} bytes, guest: {}, ubicación: {})",
            upload.photo.size(),
            auth == UploadAuth::Guest,
            upload.location.is_some()
        );

        let form = build_story_form(&upload)?;
        let mut builder = Request::post(&self.url(auth.endpoint()));
        if let UploadAuth::Bearer(token) = &auth {
            builder = builder.header("Authorization", &bearer(token));
        }

        let response = builder
            .body(form)
            .map_err(|e| ApiError::Browser(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data: MessageResponse = read_envelope(response, "Gagal menambahkan cerita.").await?;
        Ok(data.message.unwrap_or_else(|| "Story created successfully".to_string()))
    }
}

impl PushGateway for ApiClient {
    async fn subscribe_push(&self, token: &str, body: &PushSubscriptionBody) -> Result<(), ApiError> {
        log::info!("🔔 [API] Registrando suscripción push");

        let response = Request::post(&self.url("notifications/subscribe"))
            .header("Authorization", &bearer(token))
            .json(body)
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let _: MessageResponse = read_envelope(response, "Gagal berlangganan ke notifikasi.").await?;
        Ok(())
    }

    async fn unsubscribe_push(&self, token: &str, endpoint: &str) -> Result<(), ApiError> {
        log::info!("🔕 [API] Eliminando suscripción push");

        let response = Request::delete(&self.url("notifications/subscribe"))
            .header("Authorization", &bearer(token))
            .json(&UnsubscribeBody {
                endpoint: endpoint.to_string(),
            })
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let _: MessageResponse = read_envelope(response, "Gagal berhenti berlangganan.").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_auth_requires_token_unless_guest() {
        let anonymous = Session::default();
        assert!(matches!(UploadAuth::for_session(&anonymous, false), Err(ApiError::Unauthorized(_))));
        assert_eq!(UploadAuth::for_session(&anonymous, true), Ok(UploadAuth::Guest));

        let session = Session::new("tok", "Budi");
        assert_eq!(UploadAuth::for_session(&session, false), Ok(UploadAuth::Bearer("tok".to_string())));
    }

    #[test]
    fn test_upload_endpoints() {
        assert_eq!(UploadAuth::Guest.endpoint(), "stories/guest");
        assert_eq!(UploadAuth::Bearer("t".to_string()).endpoint(), "stories");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::with_base_url("https://story-api.dicoding.dev/v1/");
        assert_eq!(client.url("stories"), "https://story-api.dicoding.dev/v1/stories");
    }

    #[test]
    fn test_stories_response_without_list_is_empty() {
        let data: StoriesResponse = decode_envelope(r#"{"error":false,"message":"ok"}"#, "x").unwrap();
        assert!(data.list_story.is_empty());
    }
}
