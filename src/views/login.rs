// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;
use crate::dom::{alert, get_typed_by_id, input_value, on_submit};
use crate::router::MountScope;
use crate::services::auth_service;
use crate::state::AppState;

pub fn init(state: &AppState, _scope: &MountScope) -> Result<(), JsValue> {
    let Some(form) = get_typed_by_id::<HtmlFormElement>("login-form") else {
        return Ok(());
    };

    if let Some(target) = state.pending.peek() {
        log::info!("🔐 [LOGIN] Tras el login se abrirá {}", target.fragment());
    }

    let state = state.clone();
    on_submit(&form, move |_| {
        let email = input_value("email");
        let password = input_value("password");
        let state = state.clone();

        spawn_local(async move {
            match auth_service::login(&state.api, &state.session, &email, &password).await {
                Ok(result) => {
                    log::info!("🔐 [LOGIN] Bienvenido {}", result.name);
                    crate::navigate(auth_service::post_login_target(&state.pending));
                }
                Err(e) => {
                    log::error!("❌ [LOGIN] {}", e);
                    alert(&format!("Login gagal: {}", e.message()));
                }
            }
        });
    })
}
