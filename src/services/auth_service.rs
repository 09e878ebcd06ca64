use crate::models::{ApiError, LoginResult};
use crate::router::{PendingRedirect, Route};
use crate::services::api_client::AuthGateway;
use crate::state::SessionStore;

/// Login: valida campos, llama a la API y guarda la sesión
pub async fn login<G: AuthGateway>(
    gateway: &G,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<LoginResult, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Email dan password wajib diisi.".to_string()));
    }

    let result = gateway.login(email.trim(), password).await?;
    session
        .set(&result.token, &result.name)
        .map_err(ApiError::Browser)?;
    Ok(result)
}

/// Destino tras un login correcto: la ruta protegida pendiente (se consume)
/// o la lista de historias
pub fn post_login_target(pending: &PendingRedirect) -> Route {
    pending.take().unwrap_or(Route::StoryList)
}

/// Registro: no inicia sesión, el usuario vuelve a login
pub async fn register<G: AuthGateway>(
    gateway: &G,
    name: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Semua field wajib diisi.".to_string()));
    }
    gateway.register(name.trim(), email.trim(), password).await
}

/// Logout: solo borra la sesión; la redirección la hace quien llama
pub fn logout(session: &SessionStore) {
    if let Err(e) = session.clear() {
        log::error!("❌ [AUTH] Error limpiando sesión: {}", e);
    }
}
