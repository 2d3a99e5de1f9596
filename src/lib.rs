//! Card Web - hand-gesture card control
//!
//! WASM core for a gesture-driven playing card. JavaScript owns the
//! camera, the MediaPipe HandLandmarker and the 3D renderer; Rust owns
//! gesture classification and the card interaction state machine.

mod bridge;
pub mod gesture;
pub mod interaction;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    apply_hand_landmarks, card_tick, get_card_transform, get_card_visibility,
    get_gesture_debug, reset_card, set_swipe_params, set_viewport,
};

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Announce readiness - call once after module instantiation
#[wasm_bindgen]
pub fn init() {
    console_log!("✅ Gesture card core ready");
}
