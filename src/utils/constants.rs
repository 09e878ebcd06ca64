// Claves de localStorage (compatibles con la versión web existente)
pub const TOKEN_KEY: &str = "token";
pub const NAME_KEY: &str = "name";
pub const PUSH_SUBSCRIBED_KEY: &str = "pushSubscribed";
pub const PUSH_ENDPOINT_KEY: &str = "pushEndpoint";

/// Región de contenido donde se montan las vistas
pub const MAIN_CONTENT_ID: &str = "main-content";
pub const NAV_LIST_ID: &str = "nav-list";

pub const APP_TITLE: &str = "Dicoding Story";
