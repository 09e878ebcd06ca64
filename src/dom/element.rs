// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Obtener elemento por ID ya convertido (input, video, form...)
pub fn get_typed_by_id<T: JsCast>(id: &str) -> Option<T> {
    get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Alternar clase
pub fn toggle_class(element: &Element, class: &str) -> Result<bool, JsValue> {
    element.class_list().toggle(class)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// `style.display` (`"none"`, `"block"`, `"inline-block"`)
pub fn set_display(element: &Element, display: &str) -> Result<(), JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?
        .style()
        .set_property("display", display)
}

pub fn show(element: &Element, visible: bool, display: &str) -> Result<(), JsValue> {
    set_display(element, if visible { display } else { "none" })
}

/// Query selector all dentro de un elemento
pub fn query_selector_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Valor de un `<input>` o `<textarea>` (vacío si no existe)
pub fn input_value(id: &str) -> String {
    let Some(element) = get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    element
        .dyn_ref::<HtmlTextAreaElement>()
        .map(|textarea| textarea.value())
        .unwrap_or_default()
}

pub fn set_input_value(id: &str, value: &str) {
    if let Some(input) = get_typed_by_id::<HtmlInputElement>(id) {
        input.set_value(value);
    }
}

/// Fragmento actual (`#/story-list`)
pub fn current_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Navegar cambiando `location.hash` (dispara `hashchange`)
pub fn set_location_hash(fragment: &str) -> Result<(), JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .location()
        .set_hash(fragment)
}

pub fn set_document_title(title: &str) {
    if let Some(doc) = document() {
        doc.set_title(title);
    }
}

/// `window.alert`
pub fn alert(message: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.alert_with_message(message) {
            log::warn!("⚠️ [DOM] alert falló: {:?}", e);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn attach(element: &Element) {
        if let Some(body) = document().and_then(|d| d.body()) {
            body.append_child(element).unwrap();
        }
    }

    #[wasm_bindgen_test]
    fn test_input_value_reads_input_and_textarea() {
        let input = ElementBuilder::new("input").unwrap().attr("id", "t-input").unwrap().build();
        let textarea = ElementBuilder::new("textarea").unwrap().attr("id", "t-area").unwrap().build();
        attach(&input);
        attach(&textarea);

        set_input_value("t-input", "-6.200000");
        textarea.unchecked_ref::<HtmlTextAreaElement>().set_value("Pantai");

        assert_eq!(input_value("t-input"), "-6.200000");
        assert_eq!(input_value("t-area"), "Pantai");
        assert_eq!(input_value("no-such-id"), "");
    }

    #[wasm_bindgen_test]
    fn test_show_toggles_display() {
        let div = ElementBuilder::new("div").unwrap().build();
        attach(&div);

        show(&div, false, "block").unwrap();
        assert_eq!(div.unchecked_ref::<HtmlElement>().style().get_property_value("display").unwrap(), "none");
        show(&div, true, "inline-block").unwrap();
        assert_eq!(div.unchecked_ref::<HtmlElement>().style().get_property_value("display").unwrap(), "inline-block");
    }
}
