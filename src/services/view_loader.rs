use gloo_net::http::Request;
use crate::config::CONFIG;
use crate::router::ViewName;

/// Descargar el markup de `views/<name>.html`.
///
/// Status no-2xx y fallos de red son errores (mensaje listo para mostrar).
pub async fn fetch_markup(view: ViewName) -> Result<String, String> {
    let url = CONFIG.view_url(view.as_str());
    log::debug!("📄 [VIEW] GET {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Halaman {} tidak ditemukan. ({})", view.as_str(), e))?;

    if !response.ok() {
        return Err(format!("Halaman {} tidak ditemukan.", view.as_str()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Halaman {} tidak dapat dibaca. ({})", view.as_str(), e))
}
