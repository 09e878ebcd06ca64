// ============================================================================
// PROFILE VIEW - Nombre, logout y notificaciones push
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement};
use crate::dom::{get_element_by_id, get_typed_by_id, on_click, set_display, set_text_content, show};
use crate::router::{MountScope, Route};
use crate::services::push_service;
use crate::state::AppState;
use crate::viewmodels::notification_viewmodel::{NotificationViewModel, PushAction};

pub fn init(state: &AppState, scope: &MountScope) -> Result<(), JsValue> {
    let session = state.session.get();
    if let (Some(name_el), Some(name)) = (get_element_by_id("profile-name"), session.name.as_deref()) {
        set_text_content(&name_el, name);
    }

    if let Some(logout_btn) = get_element_by_id("logout-btn") {
        on_click(&logout_btn, |_| crate::navigate(Route::Logout))?;
    }

    setup_notifications(state, scope)
}

struct PushPanel {
    vm: Rc<RefCell<NotificationViewModel>>,
    button: HtmlButtonElement,
    status: Element,
}

impl PushPanel {
    fn render(&self) -> Result<(), JsValue> {
        let vm = self.vm.borrow();
        set_text_content(&self.status, &vm.status_text());
        self.button.set_text_content(Some(vm.button_label()));
        self.button.set_disabled(vm.button_disabled());
        show(&self.button, vm.button_visible(), "inline-block")
    }
}

fn setup_notifications(state: &AppState, scope: &MountScope) -> Result<(), JsValue> {
    let (Some(section), Some(button), Some(status)) = (
        get_element_by_id("notification-section"),
        get_typed_by_id::<HtmlButtonElement>("enable-notif-btn"),
        get_element_by_id("notif-status"),
    ) else {
        return Ok(());
    };

    let vm = NotificationViewModel::new(
        push_service::is_supported(),
        push_service::is_subscribed(state.store.as_ref()),
    );
    let panel = Rc::new(PushPanel {
        vm: Rc::new(RefCell::new(vm)),
        button: button.clone(),
        status,
    });
    set_display(&section, "block")?;
    panel.render()?;

    let (state, scope) = (state.clone(), scope.clone());
    on_click(&button, move |_| {
        let Some(action) = panel.vm.borrow_mut().begin() else {
            return;
        };
        if let Err(e) = panel.render() {
            log::error!("❌ [PROFILE] {:?}", e);
        }

        let (state, scope, panel) = (state.clone(), scope.clone(), panel.clone());
        spawn_local(async move {
            let session = state.session.get();
            let result = match action {
                PushAction::Subscribe => push_service::subscribe(&state.api, &session, state.store.as_ref()).await,
                PushAction::Unsubscribe => push_service::unsubscribe(&state.api, &session, state.store.as_ref()).await,
            };
            if let Err(e) = &result {
                log::error!("❌ [PROFILE] Gagal {:?} notifikasi: {}", action, e);
            }

            panel.vm.borrow_mut().finish(action, result);
            if scope.is_mounted() {
                if let Err(e) = panel.render() {
                    log::error!("❌ [PROFILE] {:?}", e);
                }
            }
        });
    })
}
