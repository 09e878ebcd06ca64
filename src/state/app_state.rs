// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Contexto explícito que se pasa a cada inicializador de vista. Nada de
// estáticos: todo vive en Rc<RefCell> compartido por clones.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::StoryFilter;
use crate::router::{MountScope, PendingRedirect, Router};
use crate::services::ApiClient;
use crate::state::SessionStore;
use crate::utils::storage::{KeyValueStore, LocalStore};

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub store: Rc<dyn KeyValueStore>,
    pub session: SessionStore,
    pub pending: PendingRedirect,
    pub router: Rc<RefCell<Router>>,
    pub api: ApiClient,

    /// Scope de la vista montada (teardown al desmontar)
    pub mount: Rc<RefCell<Option<MountScope>>>,

    // UI State
    pub story_filter: Rc<RefCell<StoryFilter>>,
}

impl AppState {
    /// Estado sobre localStorage
    pub fn new() -> Self {
        Self::with_store(Rc::new(LocalStore), ApiClient::new())
    }

    pub fn with_store(store: Rc<dyn KeyValueStore>, api: ApiClient) -> Self {
        let pending = PendingRedirect::new();
        Self {
            session: SessionStore::new(store.clone()),
            store,
            router: Rc::new(RefCell::new(Router::new(pending.clone()))),
            pending,
            api,
            mount: Rc::new(RefCell::new(None)),
            story_filter: Rc::new(RefCell::new(StoryFilter::All)),
        }
    }

    /// Desmontar la vista actual (si hay) y registrar el scope nuevo
    pub fn replace_mount(&self, scope: MountScope) {
        let previous = self.mount.borrow_mut().replace(scope);
        if let Some(previous) = previous {
            log::debug!("🧹 [STATE] Desmontando {}", previous.view().as_str());
            previous.unmount();
        }
    }

    pub fn story_filter(&self) -> StoryFilter {
        *self.story_filter.borrow()
    }

    pub fn set_story_filter(&self, filter: StoryFilter) {
        *self.story_filter.borrow_mut() = filter;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Resolution, Route, ViewName};
    use crate::utils::storage::MemoryStore;
    use std::cell::Cell;

    fn state() -> AppState {
        AppState::with_store(Rc::new(MemoryStore::default()), ApiClient::with_base_url("http://localhost"))
    }

    #[test]
    fn test_router_and_state_share_pending_redirect() {
        let state = state();
        let resolution = state.router.borrow_mut().resolve("#/profile", &state.session.get());
        assert_eq!(resolution, Resolution::Redirect(Route::Login));
        assert_eq!(state.pending.peek(), Some(Route::Profile));
    }

    #[test]
    fn test_replace_mount_runs_previous_teardown() {
        let state = state();
        let released = Rc::new(Cell::new(false));

        let first = MountScope::new(ViewName::AddStory);
        let flag = released.clone();
        first.on_unmount(move || flag.set(true));
        state.replace_mount(first);
        assert!(!released.get());

        state.replace_mount(MountScope::new(ViewName::Home));
        assert!(released.get());
    }

    #[test]
    fn test_story_filter_defaults_to_all() {
        let state = state();
        assert_eq!(state.story_filter(), StoryFilter::All);
        state.set_story_filter(StoryFilter::WithLocation);
        assert_eq!(state.clone().story_filter(), StoryFilter::WithLocation);
    }
}
