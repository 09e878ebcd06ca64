// ============================================================================
// SESSION STATE - Token + nombre persistidos en localStorage
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::Session;
use crate::utils::constants::{NAME_KEY, TOKEN_KEY};
use crate::utils::storage::KeyValueStore;

type SessionListener = Rc<dyn Fn(&Session)>;

/// Estado de sesión
#[derive(Clone)]
pub struct SessionStore {
    store: Rc<dyn KeyValueStore>,
    listeners: Rc<RefCell<Vec<SessionListener>>>,
}

impl SessionStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Leer la sesión persistida
    pub fn get(&self) -> Session {
        Session {
            token: self.store.get_item(TOKEN_KEY),
            name: self.store.get_item(NAME_KEY),
        }
    }

    /// Persistir la sesión y notificar (re-render del menú) antes de retornar
    pub fn set(&self, token: &str, name: &str) -> Result<(), String> {
        self.store.set_item(TOKEN_KEY, token)?;
        self.store.set_item(NAME_KEY, name)?;
        log::info!("🔐 [SESSION] Sesión guardada para {}", name);
        self.notify();
        Ok(())
    }

    /// Borrar solo los campos persistidos. No notifica: el que llama redirige.
    pub fn clear(&self) -> Result<(), String> {
        self.store.remove_item(TOKEN_KEY)?;
        self.store.remove_item(NAME_KEY)?;
        log::info!("👋 [SESSION] Sesión eliminada");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_authenticated()
    }

    /// Suscribirse a `set`
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Session) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self) {
        let session = self.get();
        // Copia de la lista: un listener puede suscribir a otro
        let listeners: Vec<SessionListener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&session);
        }
    }
}
