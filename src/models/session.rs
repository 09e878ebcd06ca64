use serde::{Deserialize, Serialize};

/// Sesión del usuario: token de la API + nombre visible
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub name: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            name: Some(name.into()),
        }
    }

    /// Un token vacío cuenta como "sin sesión"
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session {
            token: Some(String::new()),
            name: Some("Budi".to_string()),
        };
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_new_session_is_authenticated() {
        let session = Session::new("abc", "Budi");
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.display_name(), "Budi");
    }
}
