// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Listeners en elementos de una vista: el markup se reemplaza en cada
//   montaje y el navegador los limpia con el elemento, así que forget() es seguro.
// - Listeners globales (window): registrar UNA VEZ al arrancar la app.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

/// Listener genérico sobre cualquier EventTarget
pub fn on_event<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |event: JsValue| {
        handler(event.unchecked_into::<E>());
    }) as Box<dyn FnMut(JsValue)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    on_event(target, "click", handler)
}

/// Submit con preventDefault ya aplicado
pub fn on_submit<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let mut handler = handler;
    on_event(target, "submit", move |event: Event| {
        event.prevent_default();
        handler(event);
    })
}

pub fn on_change<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    on_event(target, "change", handler)
}

pub fn on_keydown<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    on_event(target, "keydown", handler)
}

/// Listener global en window (solo al arrancar)
pub fn on_window<F>(event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    on_event(&win, event_type, handler)
}

/// Closure JS de un solo argumento para APIs de terceros (eventos de Leaflet)
pub fn js_callback<F>(handler: F) -> js_sys::Function
where
    F: FnMut(JsValue) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
    let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    closure.forget();
    function
}
