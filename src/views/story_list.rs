// ============================================================================
// STORY LIST VIEW - Mapa + tarjetas + filtro "semua / berlokasi"
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use crate::dom::{add_class, get_element_by_id, on_click, remove_class, set_inner_html};
use crate::maps::{LeafletMap, MapViewport};
use crate::models::StoryFilter;
use crate::router::MountScope;
use crate::state::AppState;
use crate::viewmodels::story_list_viewmodel::{
    error_html, load_stories, markers_for, render_cards, show_markers, StoryRequests, LOADING_HTML,
    LOGIN_PROMPT_HTML,
};
use super::navigation::bind_hash_links;

const CONTAINER_ID: &str = "story-list-container";

type SharedMap = Rc<RefCell<Option<LeafletMap>>>;

pub fn init(state: &AppState, scope: &MountScope) -> Result<(), JsValue> {
    let map: SharedMap = Rc::new(RefCell::new(None));

    match LeafletMap::mount("map", MapViewport::default()) {
        Ok(leaflet) => {
            *map.borrow_mut() = Some(leaflet.with_base_layers());
            let owned = map.clone();
            scope.on_unmount(move || {
                if let Some(mut leaflet) = owned.borrow_mut().take() {
                    leaflet.destroy();
                }
            });
        }
        Err(e) => log::warn!("⚠️ [STORIES] Peta tidak diinisialisasi: {}", e),
    }

    let requests = StoryRequests::default();
    setup_filters(state, scope, &map, &requests)?;
    load(state.clone(), scope.clone(), map, requests);
    Ok(())
}

fn setup_filters(state: &AppState, scope: &MountScope, map: &SharedMap, requests: &StoryRequests) -> Result<(), JsValue> {
    let (Some(all_btn), Some(location_btn)) = (get_element_by_id("filter-all"), get_element_by_id("filter-location"))
    else {
        return Ok(());
    };

    let buttons = [(StoryFilter::All, all_btn), (StoryFilter::WithLocation, location_btn)];
    mark_active(&buttons, state.story_filter())?;

    for (filter, button) in buttons.iter() {
        let filter = *filter;
        let (state, scope, map, requests) = (state.clone(), scope.clone(), map.clone(), requests.clone());
        let buttons = buttons.clone();
        on_click(button, move |_| {
            log::info!("🔎 [STORIES] Filtro: location={}", filter.query_value());
            state.set_story_filter(filter);
            if let Err(e) = mark_active(&buttons, filter) {
                log::error!("❌ [STORIES] {:?}", e);
            }
            load(state.clone(), scope.clone(), map.clone(), requests.clone());
        })?;
    }
    Ok(())
}

fn mark_active(buttons: &[(StoryFilter, web_sys::Element); 2], active: StoryFilter) -> Result<(), JsValue> {
    for (filter, button) in buttons {
        if *filter == active {
            add_class(button, "active")?;
        } else {
            remove_class(button, "active")?;
        }
    }
    Ok(())
}

/// Cargar y pintar. Se descarta si la vista se desmonta o si otro filtro
/// lanzó una petición posterior.
fn load(state: AppState, scope: MountScope, map: SharedMap, requests: StoryRequests) {
    let Some(container) = get_element_by_id(CONTAINER_ID) else {
        log::warn!("⚠️ [STORIES] #{} no encontrado", CONTAINER_ID);
        return;
    };

    let session = state.session.get();
    if !session.is_authenticated() {
        set_inner_html(&container, LOGIN_PROMPT_HTML);
        let _ = bind_hash_links(&container);
        return;
    }

    set_inner_html(&container, LOADING_HTML);
    let filter = state.story_filter();
    let request = requests.begin();

    spawn_local(async move {
        let result = load_stories(&state.api, &session, filter).await;
        if !scope.is_mounted() {
            log::debug!("🗑️ [STORIES] Resultado descartado (vista desmontada)");
            return;
        }
        if !requests.is_latest(request) {
            log::debug!("🗑️ [STORIES] Resultado descartado (filtro cambiado)");
            return;
        }

        match result {
            Ok(stories) => {
                set_inner_html(&container, &render_cards(&stories));
                if let Some(leaflet) = map.borrow_mut().as_mut() {
                    match show_markers(leaflet, &markers_for(&stories, filter)) {
                        Ok(count) => log::info!("🗺️ [STORIES] {} marcadores en el mapa", count),
                        Err(e) => log::error!("❌ [STORIES] {}", e),
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [STORIES] Error fetching stories: {}", e);
                set_inner_html(&container, &error_html(&e));
            }
        }
    });
}
