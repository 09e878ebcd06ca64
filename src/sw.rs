// ============================================================================
// SERVICE WORKER - Mensajes push -> notificación del sistema
// ============================================================================
// `public/sw.js` carga el módulo WASM y delega el evento `push` aquí.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{NotificationOptions, PushEvent, ServiceWorkerGlobalScope};
use crate::models::push::{NotificationContent, PushMessage};

/// Handler del evento `push`: payload JSON opcional, valores por defecto si falta
#[wasm_bindgen]
pub fn handle_push(event: PushEvent) -> Result<(), JsValue> {
    let payload = event.data().map(|data| data.text()).unwrap_or_default();
    let content = PushMessage::parse(&payload).into_notification();
    log::info!("🔔 [SW] Push recibido: {}", content.title);

    let scope: ServiceWorkerGlobalScope = js_sys::global().unchecked_into();
    let options = notification_options(&content)?;
    let shown = scope
        .registration()
        .show_notification_with_options(&content.title, &options)?;
    event.wait_until(&shown)
}

fn notification_options(content: &NotificationContent) -> Result<NotificationOptions, JsValue> {
    let options = js_sys::Object::new();
    for (key, value) in [("body", content.body.as_str()), ("icon", content.icon), ("badge", content.badge)] {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }
    Ok(options.unchecked_into())
}
