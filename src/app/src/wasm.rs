//! WebAssembly FFI bindings for the Crux Core
//!
//! This module provides the interface between JavaScript and the Crux Core.
//! It exposes functions for processing events and retrieving the view model.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Initialize the WASM module and set up logging
///
/// This runs automatically when the WASM module is loaded. Debug builds log
/// every poll tick; release builds only report `info` and above.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        log::warn!("Logger was already initialized");
    }
}

/// Process a serialized `Event` from the page and return the requested effects.
///
/// A malformed event is logged and answered with no effects so the page keeps
/// running.
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.update(event_bytes, &mut effects) {
        log::error!("Failed to process event: {e:?}");
    }
    effects
}

/// Serialized view model (the whole `Model`)
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    if let Err(e) = CORE.view(&mut view) {
        log::error!("Failed to serialize view model: {e:?}");
    }
    view
}

/// Resolve effect `id` with the shell's serialized output.
///
/// Used for HTTP responses, timer expiries, clock reads and storage results.
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    ) {
        log::error!("Failed to resolve effect {id}: {e:?}");
    }
    effects
}
