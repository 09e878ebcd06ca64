// ============================================================================
// PUSH SERVICE - Suscripción a notificaciones push (service worker + API)
// ============================================================================

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{PushEncryptionKeyName, PushSubscription, PushSubscriptionOptionsInit, ServiceWorkerRegistration};
use crate::config::CONFIG;
use crate::models::push::{url_safe_to_standard_base64, PushKeys};
use crate::models::{ApiError, PushSubscriptionBody, Session};
use crate::services::api_client::PushGateway;
use crate::utils::constants::{PUSH_ENDPOINT_KEY, PUSH_SUBSCRIBED_KEY};
use crate::utils::storage::KeyValueStore;

/// ¿El navegador tiene service worker + PushManager?
pub fn is_supported() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let navigator: JsValue = window.navigator().into();
    let window: JsValue = window.into();
    js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false)
        && js_sys::Reflect::has(&window, &JsValue::from_str("PushManager")).unwrap_or(false)
}

pub fn is_subscribed(store: &dyn KeyValueStore) -> bool {
    store.get_item(PUSH_SUBSCRIBED_KEY).as_deref() == Some("true")
}

pub fn record_subscription(store: &dyn KeyValueStore, endpoint: &str) -> Result<(), ApiError> {
    store.set_item(PUSH_SUBSCRIBED_KEY, "true").map_err(ApiError::Browser)?;
    store.set_item(PUSH_ENDPOINT_KEY, endpoint).map_err(ApiError::Browser)
}

pub fn forget_subscription(store: &dyn KeyValueStore) {
    for key in [PUSH_SUBSCRIBED_KEY, PUSH_ENDPOINT_KEY] {
        if let Err(e) = store.remove_item(key) {
            log::warn!("⚠️ [PUSH] {}", e);
        }
    }
}

/// Suscribirse: registra el service worker, pide la suscripción al
/// navegador y la envía a la API. Cualquier fallo borra las claves locales.
pub async fn subscribe<G: PushGateway>(
    gateway: &G,
    session: &Session,
    store: &dyn KeyValueStore,
) -> Result<(), ApiError> {
    if !is_supported() {
        return Err(ApiError::Unsupported("Browser tidak mendukung notifikasi push.".to_string()));
    }
    let token = session
        .token()
        .ok_or_else(|| ApiError::Unauthorized("Silakan login terlebih dahulu.".to_string()))?;

    let result = async {
        let registration = register_service_worker().await?;
        let subscription = browser_subscribe(&registration).await?;
        let body = subscription_body(&subscription)?;
        gateway.subscribe_push(token, &body).await?;
        Ok::<String, ApiError>(body.endpoint)
    }
    .await;

    match result {
        Ok(endpoint) => {
            record_subscription(store, &endpoint)?;
            log::info!("✅ [PUSH] Suscripción activa");
            Ok(())
        }
        Err(e) => {
            log::error!("❌ [PUSH] Gagal subscribe notifikasi: {}", e);
            forget_subscription(store);
            Err(e)
        }
    }
}

/// Cancelar la suscripción. Sin token, registro o suscripción no hace nada.
pub async fn unsubscribe<G: PushGateway>(
    gateway: &G,
    session: &Session,
    store: &dyn KeyValueStore,
) -> Result<(), ApiError> {
    let Some(token) = session.token() else {
        return Ok(());
    };
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    if !is_supported() {
        return Ok(());
    }

    let registration = JsFuture::from(window.navigator().service_worker().get_registration()).await?;
    if registration.is_undefined() || registration.is_null() {
        return Ok(());
    }
    let registration: ServiceWorkerRegistration = registration.unchecked_into();

    let subscription = JsFuture::from(registration.push_manager()?.get_subscription()?).await?;
    if subscription.is_undefined() || subscription.is_null() {
        return Ok(());
    }
    let subscription: PushSubscription = subscription.unchecked_into();

    let endpoint = store
        .get_item(PUSH_ENDPOINT_KEY)
        .unwrap_or_else(|| subscription.endpoint());
    gateway.unsubscribe_push(token, &endpoint).await?;
    JsFuture::from(subscription.unsubscribe()?).await?;

    forget_subscription(store);
    log::info!("🔕 [PUSH] Suscripción cancelada");
    Ok(())
}

async fn register_service_worker() -> Result<ServiceWorkerRegistration, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Unsupported("No window".to_string()))?;
    let promise = window.navigator().service_worker().register(&CONFIG.service_worker_path);
    let registration = JsFuture::from(promise).await?;
    Ok(registration.unchecked_into())
}

/// `{ userVisibleOnly: true, applicationServerKey: Uint8Array }`
fn subscribe_options(vapid_key: &str) -> Result<PushSubscriptionOptionsInit, ApiError> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("userVisibleOnly"), &JsValue::TRUE)?;
    let key: JsValue = vapid_key_bytes(vapid_key)?.into();
    js_sys::Reflect::set(&options, &JsValue::from_str("applicationServerKey"), &key)?;
    Ok(options.unchecked_into())
}

async fn browser_subscribe(registration: &ServiceWorkerRegistration) -> Result<PushSubscription, ApiError> {
    let options = subscribe_options(&CONFIG.vapid_public_key)?;
    let promise = registration.push_manager()?.subscribe_with_options(&options)?;
    let subscription = JsFuture::from(promise).await?;
    Ok(subscription.unchecked_into())
}

fn subscription_body(subscription: &PushSubscription) -> Result<PushSubscriptionBody, ApiError> {
    Ok(PushSubscriptionBody {
        endpoint: subscription.endpoint(),
        keys: PushKeys {
            p256dh: encode_key(subscription, PushEncryptionKeyName::P256dh)?,
            auth: encode_key(subscription, PushEncryptionKeyName::Auth)?,
        },
    })
}

/// Clave de la suscripción en base64 estándar
fn encode_key(subscription: &PushSubscription, name: PushEncryptionKeyName) -> Result<String, ApiError> {
    let buffer = subscription
        .get_key(name)?
        .ok_or_else(|| ApiError::Browser(format!("Push subscription sin clave {:?}", name)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let binary: String = bytes.iter().map(|&b| b as char).collect();
    let window = web_sys::window().ok_or_else(|| ApiError::Unsupported("No window".to_string()))?;
    Ok(window.btoa(&binary)?)
}

/// Clave VAPID (base64 URL-safe) -> Uint8Array
fn vapid_key_bytes(key: &str) -> Result<js_sys::Uint8Array, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Unsupported("No window".to_string()))?;
    let binary = window.atob(&url_safe_to_standard_base64(key))?;
    let bytes: Vec<u8> = binary.chars().map(|c| c as u32 as u8).collect();
    Ok(js_sys::Uint8Array::from(bytes.as_slice()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_subscribe_options_carry_raw_vapid_key() {
        let options = subscribe_options(&CONFIG.vapid_public_key).unwrap();
        let user_visible = js_sys::Reflect::get(&options, &JsValue::from_str("userVisibleOnly")).unwrap();
        assert_eq!(user_visible.as_bool(), Some(true));

        let key = js_sys::Reflect::get(&options, &JsValue::from_str("applicationServerKey")).unwrap();
        let key: js_sys::Uint8Array = key.dyn_into().unwrap();
        // Clave pública P-256 sin comprimir
        assert_eq!(key.length(), 65);
        assert_eq!(key.get_index(0), 0x04);
    }
}
