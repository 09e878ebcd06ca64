// ============================================================================
// CAMERA - Captura de foto con getUserMedia para el formulario
// ============================================================================
// El stream se registra en el MountScope: se detiene al capturar, al
// cancelar y al salir de la vista.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Blob, CanvasRenderingContext2d, DataTransfer, File, FilePropertyBag, HtmlCanvasElement,
    HtmlInputElement, HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack,
};
use crate::dom::{alert, create_element, get_element_by_id, get_typed_by_id, on_click, show};
use crate::models::ApiError;
use crate::router::MountScope;
use crate::viewmodels::camera_viewmodel::{CameraViewModel, CAPTURE_FILE_NAME, CAPTURE_MIME};
use super::add_story::{preview_blob, PHOTO_INPUT_ID, PREVIEW_ID};

#[derive(Clone)]
struct Camera {
    vm: Rc<RefCell<CameraViewModel>>,
    stream: Rc<RefCell<Option<MediaStream>>>,
    video: HtmlVideoElement,
}

impl Camera {
    fn sync_controls(&self) {
        let controls = self.vm.borrow().state().controls();
        let toggles = [
            ("video", controls.video, "block"),
            ("capture-btn", controls.capture_button, "inline-block"),
            ("cancel-btn", controls.cancel_button, "inline-block"),
            (PHOTO_INPUT_ID, controls.photo_input, "block"),
            (PREVIEW_ID, controls.preview, "block"),
        ];
        for (id, visible, display) in toggles {
            if let Some(element) = get_element_by_id(id) {
                let _ = show(&element, visible, display);
            }
        }
    }

    /// Detener todas las pistas del stream (idempotente)
    fn stop(&self) {
        if let Some(stream) = self.stream.borrow_mut().take() {
            for track in stream.get_tracks().iter() {
                track.unchecked_into::<MediaStreamTrack>().stop();
            }
            log::info!("📷 [CAMERA] Stream detenido");
        }
        self.video.set_src_object(None);
        self.vm.borrow_mut().stopped();
        self.sync_controls();
    }

    async fn open(&self, scope: &MountScope) -> Result<(), ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Unsupported("No window".to_string()))?;
        let devices = window.navigator().media_devices()?;

        let constraints = js_sys::Object::new();
        js_sys::Reflect::set(&constraints, &JsValue::from_str("video"), &JsValue::TRUE)?;
        let constraints: MediaStreamConstraints = constraints.unchecked_into();

        let stream: MediaStream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
            .await?
            .unchecked_into();

        *self.stream.borrow_mut() = Some(stream.clone());
        if !scope.is_mounted() {
            // La vista cambió mientras se pedía permiso
            self.stop();
            return Ok(());
        }

        self.video.set_src_object(Some(&stream));
        self.vm.borrow_mut().stream_started();
        self.sync_controls();
        log::info!("📷 [CAMERA] Stream activo");
        Ok(())
    }

    /// Dibujar el frame actual y ponerlo en el input de foto como `captured.jpg`
    fn capture(&self) -> Result<(), JsValue> {
        if !self.vm.borrow().can_capture() {
            return Ok(());
        }

        let canvas: HtmlCanvasElement = create_element("canvas")?.unchecked_into();
        canvas.set_width(self.video.video_width());
        canvas.set_height(self.video.video_height());
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2D no disponible"))?
            .unchecked_into();
        context.draw_image_with_html_video_element_and_dw_and_dh(
            &self.video,
            0.0,
            0.0,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        )?;

        let on_blob = Closure::once(move |blob: JsValue| {
            if blob.is_null() {
                log::error!("❌ [CAMERA] toBlob no devolvió datos");
                return;
            }
            if let Err(e) = attach_capture(&blob.unchecked_into::<Blob>()) {
                log::error!("❌ [CAMERA] {:?}", e);
            }
        });
        canvas.to_blob_with_type(on_blob.as_ref().unchecked_ref(), CAPTURE_MIME)?;
        on_blob.forget();

        self.stop();
        Ok(())
    }
}

fn attach_capture(blob: &Blob) -> Result<(), JsValue> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("type"), &JsValue::from_str(CAPTURE_MIME))?;
    let options: FilePropertyBag = options.unchecked_into();

    let parts = js_sys::Array::of1(blob);
    let file = File::new_with_blob_sequence_and_options(&parts, CAPTURE_FILE_NAME, &options)?;

    let transfer = DataTransfer::new()?;
    transfer.items().add_with_file(&file)?;
    if let Some(input) = get_typed_by_id::<HtmlInputElement>(PHOTO_INPUT_ID) {
        input.set_files(transfer.files().as_ref());
    }
    log::info!("📸 [CAMERA] Foto capturada ({} bytes)", file.size());
    preview_blob(blob)
}

pub fn init(scope: &MountScope) -> Result<(), JsValue> {
    let (Some(camera_btn), Some(capture_btn), Some(cancel_btn), Some(video)) = (
        get_element_by_id("camera-btn"),
        get_element_by_id("capture-btn"),
        get_element_by_id("cancel-btn"),
        get_typed_by_id::<HtmlVideoElement>("video"),
    ) else {
        log::warn!("⚠️ [CAMERA] Controles de cámara no encontrados");
        return Ok(());
    };

    let camera = Camera {
        vm: Rc::new(RefCell::new(CameraViewModel::new())),
        stream: Rc::new(RefCell::new(None)),
        video,
    };
    camera.sync_controls();

    {
        let camera = camera.clone();
        scope.on_unmount(move || camera.stop());
    }

    {
        let (camera, scope) = (camera.clone(), scope.clone());
        on_click(&camera_btn, move |_| {
            if !camera.vm.borrow_mut().request_start() {
                return;
            }
            let (camera, scope) = (camera.clone(), scope.clone());
            spawn_local(async move {
                if let Err(e) = camera.open(&scope).await {
                    let message = camera.vm.borrow_mut().stream_failed(e.message());
                    log::error!("❌ [CAMERA] {}", message);
                    alert(&message);
                    camera.sync_controls();
                }
            });
        })?;
    }

    {
        let camera = camera.clone();
        on_click(&cancel_btn, move |_| camera.stop())?;
    }

    on_click(&capture_btn, move |_| {
        if let Err(e) = camera.capture() {
            log::error!("❌ [CAMERA] Error capturando: {:?}", e);
        }
    })?;

    Ok(())
}
