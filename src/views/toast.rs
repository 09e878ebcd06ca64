// ============================================================================
// TOAST - Notificación UI transitoria (no push)
// ============================================================================

use gloo_timers::callback::Timeout;
use crate::config::CONFIG;
use crate::dom::{add_class, document, ElementBuilder};

const FADE_OUT_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// Mostrar un `.notification <kind>` en el body (reemplaza al anterior)
pub fn show_toast(message: &str, kind: ToastKind) {
    let Some(doc) = document() else {
        return;
    };
    if let Ok(Some(old)) = doc.query_selector(".notification") {
        old.remove();
    }

    let notification = match ElementBuilder::new("div") {
        Ok(builder) => builder
            .class(&format!("notification {}", kind.as_str()))
            .text(message)
            .build(),
        Err(e) => {
            log::error!("❌ [TOAST] No se pudo crear la notificación: {:?}", e);
            return;
        }
    };
    let Some(body) = doc.body() else {
        return;
    };
    if let Err(e) = body.append_child(&notification) {
        log::error!("❌ [TOAST] {:?}", e);
        return;
    }

    Timeout::new(CONFIG.toast_duration_ms, move || {
        let _ = add_class(&notification, "fade-out");
        Timeout::new(FADE_OUT_MS, move || notification.remove()).forget();
    })
    .forget();
}
