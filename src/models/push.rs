use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Dicoding Story";
pub const DEFAULT_NOTIFICATION_BODY: &str = "Ada cerita baru!";

/// Payload de un mensaje push: `{ title?, options?: { body? } }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PushMessage {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub options: Option<PushMessageOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PushMessageOptions {
    #[serde(default)]
    pub body: Option<String>,
}

/// Contenido final de la notificación del sistema
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub icon: &'static str,
    pub badge: &'static str,
}

impl PushMessage {
    /// Payload ilegible = payload vacío (se usan los valores por defecto)
    pub fn parse(data: &str) -> Self {
        serde_json::from_str(data).unwrap_or_default()
    }

    pub fn into_notification(self) -> NotificationContent {
        // Cadena vacía = campo ausente
        let title = self.title.filter(|t| !t.is_empty());
        let body = self.options.and_then(|o| o.body).filter(|b| !b.is_empty());
        NotificationContent {
            title: title.unwrap_or_else(|| DEFAULT_NOTIFICATION_TITLE.to_string()),
            body: body.unwrap_or_else(|| DEFAULT_NOTIFICATION_BODY.to_string()),
            icon: "/icon-192.png",
            badge: "/badge.png",
        }
    }
}

/// Cuerpo de `POST /notifications/subscribe`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushSubscriptionBody {
    pub endpoint: String,
    pub keys: PushKeys,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Cuerpo de `DELETE /notifications/subscribe`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsubscribeBody {
    pub endpoint: String,
}

/// Base64 URL-safe (clave VAPID) -> base64 estándar con padding, para `atob`
pub fn url_safe_to_standard_base64(input: &str) -> String {
    let mut out: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = (4 - out.len() % 4) % 4;
    out.extend(std::iter::repeat('=').take(padding));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let msg = PushMessage::parse(r#"{"title":"Story berhasil dibuat","options":{"body":"Anda telah membuat story baru"}}"#);
        let content = msg.into_notification();
        assert_eq!(content.title, "Story berhasil dibuat");
        assert_eq!(content.body, "Anda telah membuat story baru");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let content = PushMessage::parse(r#"{"options":{}}"#).into_notification();
        assert_eq!(content.title, DEFAULT_NOTIFICATION_TITLE);
        assert_eq!(content.body, DEFAULT_NOTIFICATION_BODY);
    }

    #[test]
    fn test_empty_strings_use_defaults() {
        let content = PushMessage::parse(r#"{"title":"","options":{"body":""}}"#).into_notification();
        assert_eq!(content.title, DEFAULT_NOTIFICATION_TITLE);
        assert_eq!(content.body, DEFAULT_NOTIFICATION_BODY);
    }

    #[test]
    fn test_garbage_payload_uses_defaults() {
        let content = PushMessage::parse("not json").into_notification();
        assert_eq!(content.title, DEFAULT_NOTIFICATION_TITLE);
        assert_eq!(content.icon, "/icon-192.png");
    }

    #[test]
    fn test_url_safe_base64_padding() {
        assert_eq!(url_safe_to_standard_base64("ab-_"), "ab+/");
        assert_eq!(url_safe_to_standard_base64("abcde"), "abcde===");
        assert_eq!(url_safe_to_standard_base64("abcdef"), "abcdef==");
        assert_eq!(url_safe_to_standard_base64("abc"), "abc=");
    }

    #[test]
    fn test_subscription_body_shape() {
        let body = PushSubscriptionBody {
            endpoint: "https://fcm.googleapis.com/fcm/send/xyz".to_string(),
            keys: PushKeys { p256dh: "p".to_string(), auth: "a".to_string() },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["keys"]["p256dh"], "p");
        assert_eq!(json["endpoint"], "https://fcm.googleapis.com/fcm/send/xyz");
    }
}
