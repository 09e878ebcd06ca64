// ============================================================================
// NOTIFICATION VIEWMODEL - Sección de notificaciones push del perfil
// ============================================================================

use crate::models::ApiError;

pub const ENABLE_LABEL: &str = "🔔 Aktifkan Notifikasi Cerita Baru";
pub const DISABLE_LABEL: &str = "🔕 Nonaktifkan Notifikasi";
pub const PROCESSING_LABEL: &str = "Memproses...";

const UNSUPPORTED_TEXT: &str = "Browser tidak mendukung notifikasi push.";
const ACTIVE_TEXT: &str = "✅ Notifikasi sudah aktif. Anda akan menerima pemberitahuan saat ada cerita baru.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushAction {
    Subscribe,
    Unsubscribe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationViewModel {
    supported: bool,
    subscribed: bool,
    busy: bool,
    message: Option<String>,
}

impl NotificationViewModel {
    pub fn new(supported: bool, subscribed: bool) -> Self {
        Self {
            supported,
            subscribed,
            busy: false,
            message: None,
        }
    }

    /// Click en el botón. None si no hay nada que hacer (sin soporte o en curso).
    pub fn begin(&mut self) -> Option<PushAction> {
        if !self.supported || self.busy {
            return None;
        }
        self.busy = true;
        self.message = None;
        Some(if self.subscribed {
            PushAction::Unsubscribe
        } else {
            PushAction::Subscribe
        })
    }

    pub fn finish(&mut self, action: PushAction, result: Result<(), ApiError>) {
        self.busy = false;
        self.message = Some(match (action, result) {
            (PushAction::Subscribe, Ok(())) => {
                self.subscribed = true;
                "✅ Notifikasi berhasil diaktifkan!".to_string()
            }
            (PushAction::Unsubscribe, Ok(())) => {
                self.subscribed = false;
                "🔕 Notifikasi dinonaktifkan.".to_string()
            }
            (_, Err(e)) => {
                let reason = if e.message().is_empty() { "Silakan coba lagi." } else { e.message() };
                format!("❌ Gagal: {}", reason)
            }
        });
    }

    pub fn status_text(&self) -> String {
        if !self.supported {
            return UNSUPPORTED_TEXT.to_string();
        }
        match &self.message {
            Some(message) => message.clone(),
            None if self.subscribed => ACTIVE_TEXT.to_string(),
            None => String::new(),
        }
    }

    pub fn button_visible(&self) -> bool {
        self.supported
    }

    pub fn button_disabled(&self) -> bool {
        self.busy
    }

    pub fn button_label(&self) -> &'static str {
        if self.busy {
            PROCESSING_LABEL
        } else if self.subscribed {
            DISABLE_LABEL
        } else {
            ENABLE_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_hides_button() {
        let mut vm = NotificationViewModel::new(false, false);
        assert_eq!(vm.status_text(), UNSUPPORTED_TEXT);
        assert!(!vm.button_visible());
        assert_eq!(vm.begin(), None);
    }

    #[test]
    fn test_subscribe_cycle() {
        let mut vm = NotificationViewModel::new(true, false);
        assert_eq!(vm.button_label(), ENABLE_LABEL);

        assert_eq!(vm.begin(), Some(PushAction::Subscribe));
        assert!(vm.button_disabled());
        assert_eq!(vm.button_label(), PROCESSING_LABEL);
        assert_eq!(vm.begin(), None);

        vm.finish(PushAction::Subscribe, Ok(()));
        assert!(!vm.button_disabled());
        assert_eq!(vm.status_text(), "✅ Notifikasi berhasil diaktifkan!");
        assert_eq!(vm.button_label(), DISABLE_LABEL);
    }

    #[test]
    fn test_failure_restores_button() {
        let mut vm = NotificationViewModel::new(true, false);
        let action = vm.begin().unwrap();
        vm.finish(action, Err(ApiError::Server("Invalid subscription".to_string())));

        assert_eq!(vm.status_text(), "❌ Gagal: Invalid subscription");
        assert!(!vm.button_disabled());
        assert_eq!(vm.button_label(), ENABLE_LABEL);
    }

    #[test]
    fn test_already_subscribed_offers_unsubscribe() {
        let mut vm = NotificationViewModel::new(true, true);
        assert!(vm.status_text().starts_with("✅ Notifikasi sudah aktif"));
        assert_eq!(vm.begin(), Some(PushAction::Unsubscribe));
        vm.finish(PushAction::Unsubscribe, Ok(()));
        assert_eq!(vm.button_label(), ENABLE_LABEL);
    }
}
