// ============================================================================
// API - Errores y sobre de respuesta `{ error, message, ... }`
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error de la capa de API / navegador
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Fallo de red (fetch rechazado)
    Network(String),
    /// El cuerpo no es el JSON esperado
    Parse(String),
    /// La API devolvió `error: true`
    Server(String),
    /// Hace falta token y no hay sesión
    Unauthorized(String),
    /// Precondición del cliente no cumplida (campos vacíos)
    Validation(String),
    /// El navegador no soporta la funcionalidad
    Unsupported(String),
    /// Excepción JS
    Browser(String),
}

impl ApiError {
    /// Mensaje listo para mostrar al usuario
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(msg)
            | ApiError::Parse(msg)
            | ApiError::Server(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Validation(msg)
            | ApiError::Unsupported(msg)
            | ApiError::Browser(msg) => msg,
        }
    }

    pub fn missing_token() -> Self {
        ApiError::Unauthorized("Token tidak ditemukan. Silakan login terlebih dahulu.".to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Server(msg) => write!(f, "{}", msg),
            ApiError::Unauthorized(msg) => write!(f, "{}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::Unsupported(msg) => write!(f, "{}", msg),
            ApiError::Browser(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<wasm_bindgen::JsValue> for ApiError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let msg = js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        ApiError::Browser(msg)
    }
}

#[derive(Deserialize)]
struct Status {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Respuesta genérica `{ error: false, message }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Decodifica un cuerpo JSON de la API.
///
/// `error: true` es un fallo aunque el HTTP haya sido 2xx; se usa el mensaje
/// del servidor o `default_message`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str, default_message: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    let status: Status = serde_json::from_value(value.clone())
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    if status.error {
        let message = status
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string());
        return Err(ApiError::Server(message));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::LoginResponse;

    #[test]
    fn test_error_flag_wins_over_payload() {
        let body = r#"{"error":true,"message":"\"email\" must be a valid email"}"#;
        let result = decode_envelope::<LoginResponse>(body, "Login gagal");
        assert_eq!(result, Err(ApiError::Server("\"email\" must be a valid email".to_string())));
    }

    #[test]
    fn test_error_without_message_uses_default() {
        let result = decode_envelope::<MessageResponse>(r#"{"error":true}"#, "Gagal menambahkan cerita.");
        assert_eq!(result, Err(ApiError::Server("Gagal menambahkan cerita.".to_string())));
    }

    #[test]
    fn test_success_payload() {
        let body = r#"{
            "error": false,
            "message": "success",
            "loginResult": {"userId": "user-yj5pc_LARC_AgK61", "name": "Arif Faizin", "token": "eyJhbGci"}
        }"#;
        let response = decode_envelope::<LoginResponse>(body, "Login gagal").unwrap();
        assert_eq!(response.login_result.name, "Arif Faizin");
        assert_eq!(response.login_result.token, "eyJhbGci");
    }

    #[test]
    fn test_missing_error_field_is_success() {
        let response = decode_envelope::<MessageResponse>(r#"{"message":"Story created successfully"}"#, "x").unwrap();
        assert_eq!(response.message.as_deref(), Some("Story created successfully"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = decode_envelope::<MessageResponse>("<html>502</html>", "x");
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_display_uses_server_message() {
        assert_eq!(ApiError::Server("User not found".to_string()).to_string(), "User not found");
        assert_eq!(ApiError::Network("offline".to_string()).to_string(), "Network error: offline");
    }
}
