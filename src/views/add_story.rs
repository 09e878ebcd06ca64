// ============================================================================
// ADD STORY VIEW - Formulario con foto, cámara y selector de ubicación
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Blob, Element, FileReader, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};
use crate::config::CONFIG;
use crate::dom::{
    get_element_by_id, get_typed_by_id, input_value, on_change, on_submit, query_selector_all, set_display,
    set_inner_html, ElementBuilder,
};
use crate::router::{MountScope, Route};
use crate::state::AppState;
use crate::viewmodels::story_form_viewmodel::{submit, FormError, PhotoInput, StoryForm, SubmitError, SUCCESS_MESSAGE};
use super::toast::{show_toast, ToastKind};
use super::{camera, location_map};

pub const PHOTO_INPUT_ID: &str = "photo-input";
pub const PREVIEW_ID: &str = "preview-img";
const FORM_ID: &str = "add-story-form";

pub fn init(state: &AppState, scope: &MountScope) -> Result<(), JsValue> {
    let Some(form) = get_typed_by_id::<HtmlFormElement>(FORM_ID) else {
        log::warn!("⚠️ [FORM] #{} no encontrado", FORM_ID);
        return Ok(());
    };

    location_map::init(scope)?;
    camera::init(scope)?;

    if let Some(photo_input) = get_typed_by_id::<HtmlInputElement>(PHOTO_INPUT_ID) {
        let input = photo_input.clone();
        on_change(&photo_input, move |_| {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                if let Err(e) = preview_blob(&file) {
                    log::error!("❌ [FORM] Preview: {:?}", e);
                }
            }
        })?;
    }

    let state = state.clone();
    let scope = scope.clone();
    let form_handle = form.clone();
    on_submit(&form, move |_| {
        clear_form_errors(&form_handle);
        handle_submit(&state, &scope, &form_handle);
    })
}

/// Mostrar un blob (archivo o captura) en `#preview-img`
pub fn preview_blob(blob: &Blob) -> Result<(), JsValue> {
    let reader = FileReader::new()?;
    let reader_handle = reader.clone();
    let on_load = Closure::once(move |_event: JsValue| {
        let Some(data_url) = reader_handle.result().ok().and_then(|r| r.as_string()) else {
            return;
        };
        if let Some(preview) = get_element_by_id(PREVIEW_ID) {
            set_inner_html(&preview, &format!("<img src=\"{}\" alt=\"Preview\" />", data_url));
            let _ = set_display(&preview, "block");
        }
    });
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();
    reader.read_as_data_url(blob)
}

fn read_form() -> StoryForm<web_sys::File> {
    let photo = get_typed_by_id::<HtmlInputElement>(PHOTO_INPUT_ID)
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
        .map(|file| PhotoInput {
            size: file.size() as u64,
            file,
        });

    StoryForm {
        description: input_value("description-input"),
        photo,
        lat: input_value("lat-input"),
        lon: input_value("lon-input"),
    }
}

fn handle_submit(state: &AppState, scope: &MountScope, form: &HtmlFormElement) {
    let submit_btn = get_typed_by_id::<HtmlButtonElement>("submit-btn");
    if let Some(button) = &submit_btn {
        button.set_disabled(true);
    }

    let (state, scope, form) = (state.clone(), scope.clone(), form.clone());
    spawn_local(async move {
        let session = state.session.get();
        let result = submit(&state.api, &session, read_form(), CONFIG.max_photo_bytes, false).await;

        if let Some(button) = &submit_btn {
            button.set_disabled(false);
        }

        match result {
            Ok(_) => {
                show_toast(SUCCESS_MESSAGE, ToastKind::Success);
                form.reset();
                if scope.is_mounted() {
                    crate::navigate(Route::StoryList);
                }
            }
            Err(SubmitError::Invalid(error)) => {
                log::warn!("⚠️ [FORM] {}", error);
                if let Err(e) = show_form_error(&error) {
                    log::error!("❌ [FORM] {:?}", e);
                }
            }
            Err(error) => {
                log::error!("❌ [FORM] Error adding story: {}", error);
                show_toast(&error.to_string(), ToastKind::Error);
            }
        }
    });
}

/// Error inline justo después del input afectado
fn show_form_error(error: &FormError) -> Result<(), JsValue> {
    let Some(input) = get_element_by_id(error.field.input_id()) else {
        return Ok(());
    };

    let existing = input
        .next_element_sibling()
        .filter(|sibling| sibling.class_list().contains("error-message"));
    let message_el: Element = match existing {
        Some(sibling) => sibling,
        None => {
            let created = ElementBuilder::new("div")?.class("error-message").build();
            if let Some(parent) = input.parent_node() {
                parent.insert_before(&created, input.next_sibling().as_ref())?;
            }
            created
        }
    };
    message_el.set_text_content(Some(&error.message));
    set_display(&message_el, "block")?;

    if let Some(html_input) = input.dyn_ref::<HtmlElement>() {
        html_input.focus()?;
    }
    Ok(())
}

fn clear_form_errors(form: &HtmlFormElement) {
    if let Ok(errors) = query_selector_all(form, ".error-message") {
        for error in errors {
            let _ = set_display(&error, "none");
        }
    }
}
