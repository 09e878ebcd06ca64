// ============================================================================
// NAVIGATION - Menú según sesión + drawer
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{get_element_by_id, on_click, query_selector_all, set_location_hash, toggle_class, ElementBuilder};
use crate::models::Session;
use crate::router::Route;
use crate::utils::constants::NAV_LIST_ID;

#[derive(Debug, Clone, PartialEq)]
pub enum NavItem {
    Greeting(String),
    Link { label: &'static str, route: Route },
}

/// Entradas del menú para la sesión actual
pub fn nav_items(session: &Session) -> Vec<NavItem> {
    let link = |label, route| NavItem::Link { label, route };

    if session.is_authenticated() {
        vec![
            NavItem::Greeting(format!("Halo, {}", session.display_name())),
            link("Beranda", Route::Home),
            link("Daftar Cerita", Route::StoryList),
            link("Tambah Cerita", Route::AddStory),
            link("Logout", Route::Logout),
            link("About", Route::About),
            link("Profil", Route::Profile),
        ]
    } else {
        vec![
            link("Beranda", Route::Home),
            link("Login", Route::Login),
            link("Daftar", Route::Register),
            link("About", Route::About),
        ]
    }
}

/// Pintar `#nav-list`
pub fn render_navigation(session: &Session) -> Result<(), JsValue> {
    let Some(nav_list) = get_element_by_id(NAV_LIST_ID) else {
        return Ok(());
    };
    nav_list.set_inner_html("");

    for item in nav_items(session) {
        let li = match item {
            NavItem::Greeting(text) => ElementBuilder::new("li")?.class("nav-greeting").text(&text).build(),
            NavItem::Link { label, route } => {
                let anchor = ElementBuilder::new("a")?
                    .attr("href", &route.fragment())?
                    .text(label)
                    .build();
                ElementBuilder::new("li")?.child(anchor)?.build()
            }
        };
        nav_list.append_child(&li)?;
    }

    bind_hash_links(&nav_list)
}

/// Cada `a[href^="#"]` del contenedor navega con `location.hash`
pub fn bind_hash_links(container: &Element) -> Result<(), JsValue> {
    for link in query_selector_all(container, "a[href^=\"#\"]")? {
        let href = link.get_attribute("href").unwrap_or_default();
        on_click(&link, move |event| {
            event.prevent_default();
            if let Err(e) = set_location_hash(&href) {
                log::error!("❌ [NAV] {:?}", e);
            }
        })?;
    }
    Ok(())
}

/// `#drawer-button` abre/cierra `#navigation-drawer`
pub fn setup_drawer() -> Result<(), JsValue> {
    let (Some(button), Some(drawer)) = (get_element_by_id("drawer-button"), get_element_by_id("navigation-drawer")) else {
        log::warn!("⚠️ [NAV] Drawer no encontrado");
        return Ok(());
    };

    on_click(&button, move |event| {
        event.stop_propagation();
        if let Err(e) = toggle_class(&drawer, "open") {
            log::error!("❌ [NAV] {:?}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[NavItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                NavItem::Greeting(text) => text.clone(),
                NavItem::Link { label, .. } => label.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_anonymous_menu() {
        let items = nav_items(&Session::default());
        assert_eq!(labels(&items), vec!["Beranda", "Login", "Daftar", "About"]);
    }

    #[test]
    fn test_authenticated_menu_greets_user() {
        let items = nav_items(&Session::new("tok", "Budi"));
        assert_eq!(
            labels(&items),
            vec!["Halo, Budi", "Beranda", "Daftar Cerita", "Tambah Cerita", "Logout", "About", "Profil"]
        );
        assert!(items.contains(&NavItem::Link { label: "Logout", route: Route::Logout }));
    }
}
