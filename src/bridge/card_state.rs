//! Card state bridge - per-frame tick and renderer getters
//!
//! JavaScript drives this from its requestAnimationFrame loop: one
//! `card_tick` per frame, then reads the transform back for the
//! renderer. Runtime tuning setters mirror the detector-side config.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use super::hand_landmarks;
use crate::interaction::{CardController, SwipeTuning, Viewport};

thread_local! {
    static CARD: RefCell<CardController> = RefCell::new(CardController::new());
}

/// Advance the card state machine by one frame.
/// `delta_s` is the elapsed time since the previous frame, in seconds.
#[wasm_bindgen]
pub fn card_tick(delta_s: f32) {
    let now_ms = js_sys::Date::now();
    let sample = hand_landmarks::latest_gesture();

    CARD.with(|card_cell| {
        let mut card = card_cell.borrow_mut();
        if let Some(entered) = card.tick(sample.as_ref(), now_ms, delta_s) {
            web_sys::console::log_1(&format!("🃏 Card → {}", entered.name()).into());
        }
    });
}

/// Current card transform for the renderer:
/// [x, y, z, pitch, yaw, scale]
#[wasm_bindgen]
pub fn get_card_transform() -> Vec<f32> {
    CARD.with(|card_cell| {
        let t = card_cell.borrow().transform();
        vec![t.position.x, t.position.y, t.position.z, t.pitch, t.yaw, t.scale]
    })
}

/// Current visibility variant name (for UI display)
#[wasm_bindgen]
pub fn get_card_visibility() -> String {
    CARD.with(|card_cell| card_cell.borrow().visibility().name().to_string())
}

/// Set the renderer's world-space viewport extents
#[wasm_bindgen]
pub fn set_viewport(width: f32, height: f32) {
    if width <= 0.0 || height <= 0.0 {
        web_sys::console::warn_1(
            &format!("Ignoring invalid viewport: {width}x{height}").into(),
        );
        return;
    }
    CARD.with(|card_cell| {
        card_cell.borrow_mut().set_viewport(Viewport { width, height });
    });
}

/// Tune swipe detection at runtime
#[wasm_bindgen]
pub fn set_swipe_params(threshold: f32, cooldown_ms: f64, immunity_ms: f64) {
    CARD.with(|card_cell| {
        card_cell.borrow_mut().set_tuning(SwipeTuning {
            threshold,
            cooldown_ms,
            immunity_ms,
        });
    });
}

/// Reset classifier and card to their startup state
#[wasm_bindgen]
pub fn reset_card() {
    hand_landmarks::reset_gesture_state();
    CARD.with(|card_cell| card_cell.borrow_mut().reset());
}
