// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;
use crate::dom::{alert, get_typed_by_id, input_value, on_submit};
use crate::router::{MountScope, Route};
use crate::services::auth_service;
use crate::state::AppState;

pub fn init(state: &AppState, _scope: &MountScope) -> Result<(), JsValue> {
    let Some(form) = get_typed_by_id::<HtmlFormElement>("register-form") else {
        return Ok(());
    };

    let api = state.api.clone();
    on_submit(&form, move |_| {
        let name = input_value("name");
        let email = input_value("reg-email");
        let password = input_value("reg-password");
        let api = api.clone();

        spawn_local(async move {
            match auth_service::register(&api, &name, &email, &password).await {
                Ok(message) => {
                    log::info!("📝 [REGISTER] {}", message);
                    alert("Pendaftaran berhasil! Silakan login.");
                    crate::navigate(Route::Login);
                }
                Err(e) => {
                    log::error!("❌ [REGISTER] {}", e);
                    alert(&format!("Pendaftaran gagal: {}", e.message()));
                }
            }
        });
    })
}
