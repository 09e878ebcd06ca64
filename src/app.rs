// ============================================================================
// APP - Aplicación principal
// ============================================================================
// hashchange -> Router::resolve -> transición de salida -> markup ->
// Router::complete -> swap + enlaces + inicializador
// ============================================================================

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{add_class, current_hash, get_element_by_id, on_window, remove_class, set_document_title, set_inner_html, set_location_hash};
use crate::router::{Completion, MountScope, NavigationTicket, Resolution, Route, ViewName};
use crate::services::{auth_service, view_loader};
use crate::state::AppState;
use crate::utils::constants::{APP_TITLE, MAIN_CONTENT_ID};
use crate::utils::escape_html;
use crate::views::{bind_hash_links, initializer_for, render_navigation, setup_drawer};

/// Aplicación principal
#[derive(Clone)]
pub struct App {
    state: AppState,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        get_element_by_id(MAIN_CONTENT_ID)
            .ok_or_else(|| JsValue::from_str("No #main-content element found"))?;
        Ok(Self {
            state: AppState::new(),
        })
    }

    /// Menú, drawer, listener de hashchange y primera navegación
    pub fn start(&self) -> Result<(), JsValue> {
        setup_drawer()?;

        self.state.session.subscribe(|session| {
            if let Err(e) = render_navigation(session) {
                log::error!("❌ [APP] Error pintando navegación: {:?}", e);
            }
        });

        let app = self.clone();
        on_window("hashchange", move |_| app.handle_route_change())?;

        self.handle_route_change();
        Ok(())
    }

    /// Un ciclo de navegación para el fragmento actual
    pub fn handle_route_change(&self) {
        let session = self.state.session.get();
        if let Err(e) = render_navigation(&session) {
            log::error!("❌ [APP] Error pintando navegación: {:?}", e);
        }

        let fragment = current_hash();
        log::debug!("🧭 [APP] Vista montada: {:?}", self.state.router.borrow().mounted_view());
        let resolution = self.state.router.borrow_mut().resolve(&fragment, &session);

        match resolution {
            Resolution::Redirect(route) => {
                log::info!("↪️ [APP] Redirección a {}", route.fragment());
                go_to(&route.fragment());
            }
            Resolution::Logout => {
                auth_service::logout(&self.state.session);
                go_to(&Route::Home.fragment());
            }
            Resolution::Load { view, ticket, .. } => {
                set_document_title(&format!("{} | {}", view.title(), APP_TITLE));
                self.load_view(view, ticket);
            }
        }
    }

    fn load_view(&self, view: ViewName, ticket: NavigationTicket) {
        let Some(content) = get_element_by_id(MAIN_CONTENT_ID) else {
            log::error!("❌ [APP] Elemen #{} tidak ditemukan.", MAIN_CONTENT_ID);
            return;
        };
        let _ = add_class(&content, "fade-out");

        let state = self.state.clone();
        spawn_local(async move {
            TimeoutFuture::new(CONFIG.view_transition_ms).await;
            if !state.router.borrow().is_current(ticket) {
                log::debug!("⏭️ [APP] Navegación a '{}' superada, sin descargar", view.as_str());
                return;
            }
            let result = view_loader::fetch_markup(view).await;
            let completion = state.router.borrow_mut().complete(ticket, result);

            match completion {
                Completion::Mount { view, markup } => {
                    if let Err(e) = mount_view(&state, &content, view, &markup) {
                        log::error!("❌ [APP] Error montando '{}': {:?}", view.as_str(), e);
                    }
                }
                Completion::ShowError { message, .. } => {
                    if let Some(previous) = state.mount.borrow_mut().take() {
                        previous.unmount();
                    }
                    set_inner_html(
                        &content,
                        &format!("<h2>404 - Halaman Tidak Ditemukan</h2><p>{}</p>", escape_html(&message)),
                    );
                    let _ = remove_class(&content, "fade-out");
                }
                Completion::Stale => {
                    log::debug!("⏭️ [APP] Markup de '{}' descartado", view.as_str());
                }
            }
        });
    }
}

/// Desmontar la vista anterior, pegar el markup y ejecutar el inicializador
fn mount_view(state: &AppState, content: &Element, view: ViewName, markup: &str) -> Result<(), JsValue> {
    let scope = MountScope::new(view);
    state.replace_mount(scope.clone());

    set_inner_html(content, markup);
    remove_class(content, "fade-out")?;
    bind_hash_links(content)?;

    if let Some(init) = initializer_for(view) {
        log::debug!("🎬 [APP] Inicializando '{}'", view.as_str());
        init(state, &scope)?;
    }
    Ok(())
}

fn go_to(fragment: &str) {
    if let Err(e) = set_location_hash(fragment) {
        log::error!("❌ [APP] No se pudo navegar a {}: {:?}", fragment, e);
    }
}
