//! Event wiring and `window` globals
//!
//! Connects DOM events to [`PlannerUi`] and publishes the functions inline
//! page scripts call (`updateProfile`, `showXpToast`, `openModal`,
//! `closeModal`, `showToast`). Every closure lives for the page's lifetime
//! and is leaked with `forget`.

use js_sys::{Promise, Reflect};
use study_planner::dom::ids;
use study_planner::{PlannerUi, ToastKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Window};

use crate::dom::WebElement;

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!("Failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Listen on element `id` if it exists
fn listen_by_id(document: &Document, id: &str, event: &str, handler: impl FnMut(Event) + 'static) {
    match document.get_element_by_id(id) {
        Some(element) => listen(&element, event, handler),
        None => tracing::debug!("#{} not on page; {} not bound", id, event),
    }
}

fn key_of(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(|e| e.key())
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX)
}

/// Wire every page event to `ui`
pub fn bind_events(ui: &PlannerUi, window: &Window, document: &Document) {
    let handle = ui.clone();
    listen_by_id(document, ids::MENU_TOGGLE, "click", move |_| handle.toggle_sidebar());

    let handle = ui.clone();
    listen_by_id(document, ids::SIDEBAR_CLOSE, "click", move |_| handle.close_sidebar());

    let handle = ui.clone();
    let win = window.clone();
    listen(document, "click", move |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        handle.on_document_click(&WebElement::new(target), viewport_width(&win));
    });

    let handle = ui.clone();
    listen(document, "keydown", move |event| {
        if let Some(key) = key_of(&event) {
            handle.on_keydown(&key);
        }
    });

    if !ui.has_chat() {
        return;
    }

    let handle = ui.clone();
    listen_by_id(document, ids::CHATBOT_TOGGLE, "click", move |_| handle.toggle_chat());

    let handle = ui.clone();
    listen_by_id(document, ids::CHATBOT_CLOSE, "click", move |_| handle.close_chat());

    let handle = ui.clone();
    listen_by_id(document, ids::CHAT_SEND, "click", move |_| handle.on_chat_send_click());

    let handle = ui.clone();
    listen_by_id(document, ids::CHAT_INPUT, "keypress", move |event| {
        if let Some(key) = key_of(&event) {
            handle.on_chat_key(&key);
        }
    });
}

fn export(window: &Window, name: &str, function: &JsValue) {
    if let Err(e) = Reflect::set(window, &JsValue::from_str(name), function) {
        tracing::warn!("Failed to export window.{}: {:?}", name, e);
    }
}

/// Publish the page-script entry points on `window`
pub fn export_globals(ui: &PlannerUi, window: &Window) {
    let handle = ui.clone();
    let update_profile = Closure::wrap(Box::new(move || -> Promise {
        let ui = handle.clone();
        future_to_promise(async move {
            // Failures are logged by the widget; the promise always resolves
            let _ = ui.update_profile().await;
            Ok(JsValue::UNDEFINED)
        })
    }) as Box<dyn FnMut() -> Promise>);
    export(window, "updateProfile", update_profile.as_ref());
    update_profile.forget();

    let handle = ui.clone();
    let show_xp_toast = Closure::wrap(Box::new(move |xp: JsValue| {
        // Fractions are dropped; anything non-numeric awards nothing
        let xp = xp.as_f64().map(|v| v.trunc() as i64).unwrap_or(0);
        handle.show_xp_toast(xp);
    }) as Box<dyn FnMut(JsValue)>);
    export(window, "showXpToast", show_xp_toast.as_ref());
    show_xp_toast.forget();

    let handle = ui.clone();
    let open_modal = Closure::wrap(Box::new(move |id: JsValue| {
        if let Some(id) = id.as_string() {
            handle.open_modal(&id);
        }
    }) as Box<dyn FnMut(JsValue)>);
    export(window, "openModal", open_modal.as_ref());
    open_modal.forget();

    let handle = ui.clone();
    let close_modal = Closure::wrap(Box::new(move |id: JsValue| {
        if let Some(id) = id.as_string() {
            handle.close_modal(&id);
        }
    }) as Box<dyn FnMut(JsValue)>);
    export(window, "closeModal", close_modal.as_ref());
    close_modal.forget();

    let handle = ui.clone();
    let show_toast = Closure::wrap(Box::new(move |message: JsValue, kind: JsValue| {
        let message = message.as_string().unwrap_or_default();
        let kind = kind
            .as_string()
            .map(|name| ToastKind::from_name(&name))
            .unwrap_or_default();
        handle.show_toast(&message, kind);
    }) as Box<dyn FnMut(JsValue, JsValue)>);
    export(window, "showToast", show_toast.as_ref());
    show_toast.forget();
}
