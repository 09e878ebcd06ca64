// ============================================================================
// DICODING STORY - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura:
// - Router: máquina de estados de navegación (sin DOM)
// - Views: inicializadores por vista (DOM)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API / navegador
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con la API
// ============================================================================

mod app;
mod config;
mod dom;
mod maps;
mod models;
mod router;
mod services;
mod state;
mod sw;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use crate::router::Route;

pub use sw::handle_push;

// Instancia global de App (usada por navigate)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging (ENABLE_LOGGING=false lo desactiva)
    if let Some(level) = CONFIG.log_level_filter().to_level() {
        wasm_logger::init(wasm_logger::Config::new(level));
    }

    // Dentro del service worker no hay window: solo se usa handle_push
    if web_sys::window().is_none() {
        log::debug!("🛠️ [SW] Módulo cargado en service worker");
        return Ok(());
    }

    log::info!("🚀 Dicoding Story - Rust Puro + MVVM");
    let app = App::new()?;
    app.start()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Navegar a una ruta. Si ya es la actual, se vuelve a resolver (recarga la vista).
pub(crate) fn navigate(route: Route) {
    let fragment = route.fragment();
    if dom::current_hash() != fragment {
        if let Err(e) = dom::set_location_hash(&fragment) {
            log::error!("❌ [APP] No se pudo navegar a {}: {:?}", fragment, e);
        }
        return;
    }

    let app = APP.with(|cell| cell.borrow().clone());
    match app {
        Some(app) => app.handle_route_change(),
        None => log::warn!("⚠️ [APP] App no está inicializada"),
    }
}
