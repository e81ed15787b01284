//! Study Planner Browser Glue
//!
//! Binds the `study-planner` controllers to the server-rendered planner page
//! (WASM).
//!
//! # Architecture
//!
//! The controllers only see `UiElement`/`Page`, `Scheduler` and `PlannerApi`.
//! This crate supplies the browser implementations of those seams:
//!
//! - `dom`: `web-sys` elements and document
//! - `scheduler`: `gloo-timers` and `spawn_local`
//! - `api`: same-origin `fetch` via `gloo-net`
//! - `bindings`: event listeners and `window` globals

mod api;
mod bindings;
mod dom;
mod logging;
mod scheduler;

use std::rc::Rc;

use study_planner::{PlannerUi, SystemClock, UiConfig, UiContext};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DocumentReadyState, Window};

use api::BrowserApi;
use dom::WebPage;
use scheduler::BrowserScheduler;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        tracing::error!("No document to bind to");
        return;
    };

    if document.ready_state() == DocumentReadyState::Loading {
        let win = window.clone();
        let on_ready = Closure::once(move || start(&win));
        if let Err(e) = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        ) {
            tracing::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
        on_ready.forget();
    } else {
        start(&window);
    }
}

fn start(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };

    let api = BrowserApi::same_origin();
    tracing::info!("Planner UI v{} (api {})", env!("CARGO_PKG_VERSION"), api.base_url());

    let ui = PlannerUi::new(UiContext {
        page: Rc::new(WebPage::new(document.clone())),
        api: Rc::new(api),
        scheduler: Rc::new(BrowserScheduler),
        wall_clock: Rc::new(SystemClock),
        config: UiConfig::default(),
    });

    bindings::bind_events(&ui, window, &document);
    bindings::export_globals(&ui, window);
    ui.start();
}
