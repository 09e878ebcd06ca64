// ============================================================================
// LEAFLET FFI - Foreign Function Interface para JavaScript (global `L`)
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container_id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = panTo)]
    pub fn pan_to(this: &Map, center: &JsValue, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = removeLayer)]
    pub fn remove_layer(this: &Map, layer: &Layer) -> Map;

    #[wasm_bindgen(method, js_name = getContainer)]
    pub fn get_container(this: &Map) -> web_sys::HtmlElement;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map) -> Map;

    #[wasm_bindgen(js_namespace = L)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(extends = Layer, js_namespace = L)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(lat_lng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    pub fn set_lat_lng(this: &Marker, lat_lng: &JsValue) -> Marker;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = L)]
    pub type Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = layers)]
    pub fn control_layers(base_layers: &JsValue) -> Control;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Control, map: &Map) -> Control;
}

/// Helper: `[lat, lon]` para Leaflet
pub fn lat_lng(lat: f64, lon: f64) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(lat));
    array.push(&JsValue::from_f64(lon));
    array.into()
}

/// Helper: objeto JS plano a partir de pares clave/valor
pub fn js_options(entries: &[(&str, JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        let _ = js_sys::Reflect::set(&object, &JsValue::from_str(key), value);
    }
    object.into()
}

/// Helper: leer `e.latlng` de un evento de Leaflet
pub fn event_lat_lng(event: &JsValue) -> Option<(f64, f64)> {
    let latlng = js_sys::Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    let lat = js_sys::Reflect::get(&latlng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&latlng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some((lat, lng))
}
