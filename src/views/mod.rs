// ============================================================================
// VIEWS - Inicializadores por vista
// ============================================================================
// Tabla ViewName -> inicializador. Cada montaje ejecuta exactamente uno.
// ============================================================================

pub mod add_story;
pub mod camera;
pub mod location_map;
pub mod login;
pub mod navigation;
pub mod profile;
pub mod register;
pub mod story_list;
pub mod toast;

use wasm_bindgen::JsValue;
use crate::router::{MountScope, ViewName};
use crate::state::AppState;

pub use navigation::{bind_hash_links, render_navigation, setup_drawer};

pub type Initializer = fn(&AppState, &MountScope) -> Result<(), JsValue>;

/// Vistas estáticas (home, about) no tienen inicializador
pub fn initializer_for(view: ViewName) -> Option<Initializer> {
    match view {
        ViewName::StoryList => Some(story_list::init),
        ViewName::AddStory => Some(add_story::init),
        ViewName::Login => Some(login::init),
        ViewName::Register => Some(register::init),
        ViewName::Profile => Some(profile::init),
        ViewName::Home | ViewName::About => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_interactive_view_has_an_initializer() {
        for view in [ViewName::StoryList, ViewName::AddStory, ViewName::Login, ViewName::Register, ViewName::Profile] {
            assert!(initializer_for(view).is_some(), "{:?}", view);
        }
        assert!(initializer_for(ViewName::Home).is_none());
        assert!(initializer_for(ViewName::About).is_none());
    }
}
