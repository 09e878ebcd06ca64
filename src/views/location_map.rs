// ============================================================================
// LOCATION MAP - Mapa de add-story: click o cursor de teclado
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use crate::dom::{get_element_by_id, js_callback, on_keydown, set_inner_html, set_input_value};
use crate::maps::{LeafletMap, MapViewport};
use crate::models::Coordinates;
use crate::router::MountScope;
use crate::utils::leaflet_ffi::event_lat_lng;
use crate::viewmodels::location_picker::{LocationPicker, PickerAction, PickerKey, MAP_ARIA_LABEL, SELECTED_MESSAGE};
use super::toast::{show_toast, ToastKind};

const MAP_ID: &str = "map";
const FOCUS_DELAY_MS: u32 = 500;

type SharedMap = Rc<RefCell<Option<LeafletMap>>>;

pub fn init(scope: &MountScope) -> Result<(), JsValue> {
    let leaflet = match LeafletMap::mount(MAP_ID, MapViewport::default()) {
        Ok(leaflet) => leaflet.with_street_layer(),
        Err(e) => {
            log::error!("❌ [PICKER] Gagal inisialisasi peta: {}", e);
            if let Some(container) = get_element_by_id(MAP_ID) {
                set_inner_html(&container, "<p style=\"color: red;\">Gagal memuat peta. Silakan refresh halaman.</p>");
            }
            return Ok(());
        }
    };

    let container = leaflet.container();
    container.set_attribute("tabindex", "0")?;
    container.set_attribute("role", "application")?;
    container.set_attribute("aria-label", MAP_ARIA_LABEL)?;

    let map: SharedMap = Rc::new(RefCell::new(Some(leaflet)));
    let picker = Rc::new(RefCell::new(LocationPicker::default()));

    {
        let owned = map.clone();
        scope.on_unmount(move || {
            if let Some(mut leaflet) = owned.borrow_mut().take() {
                leaflet.destroy();
            }
        });
    }

    let on_focus = {
        let (map, picker) = (map.clone(), picker.clone());
        js_callback(move |_| {
            let action = picker.borrow_mut().focus();
            apply(&map, &picker, action);
        })
    };
    let on_blur = {
        let (map, picker) = (map.clone(), picker.clone());
        js_callback(move |_| {
            let action = picker.borrow_mut().blur();
            apply(&map, &picker, action);
        })
    };
    let on_map_click = {
        let (map, picker) = (map.clone(), picker.clone());
        js_callback(move |event| {
            let Some((lat, lon)) = event_lat_lng(&event) else {
                return;
            };
            let action = picker.borrow_mut().click(Coordinates::new(lat, lon));
            apply(&map, &picker, action);
        })
    };

    if let Some(leaflet) = map.borrow().as_ref() {
        leaflet.on("focus", &on_focus);
        leaflet.on("blur", &on_blur);
        leaflet.on("click", &on_map_click);
    }

    {
        let (map, picker) = (map.clone(), picker.clone());
        on_keydown(&container, move |event| {
            let action = picker.borrow_mut().handle_key(PickerKey::from_key(&event.key()));
            if action.consumes_key() {
                event.prevent_default();
            }
            apply(&map, &picker, action);
        })?;
    }

    let scope = scope.clone();
    Timeout::new(FOCUS_DELAY_MS, move || {
        if scope.is_mounted() {
            if let Err(e) = container.focus() {
                log::warn!("⚠️ [PICKER] Gagal fokus ke peta: {:?}", e);
            }
        }
    })
    .forget();

    Ok(())
}

fn apply(map: &SharedMap, picker: &Rc<RefCell<LocationPicker>>, action: PickerAction) {
    let mut map = map.borrow_mut();
    let Some(leaflet) = map.as_mut() else {
        return;
    };

    match action {
        PickerAction::None => {}
        PickerAction::ShowCursor(at) => leaflet.show_cursor(at),
        PickerAction::HideCursor => leaflet.hide_cursor(),
        PickerAction::MoveCursor(at) => leaflet.move_cursor(at, true),
        PickerAction::Commit { at, announce } => {
            let (lat, lon) = at.to_fields();
            set_input_value("lat-input", &lat);
            set_input_value("lon-input", &lon);
            leaflet.select(at);
            if picker.borrow().cursor_visible() {
                leaflet.move_cursor(at, false);
            }
            log::info!("📍 [PICKER] Lokasi dipilih: {}", at.popup_label());
            if announce {
                show_toast(SELECTED_MESSAGE, ToastKind::Success);
            }
        }
    }
}
