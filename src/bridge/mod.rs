//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod card_state;
mod hand_landmarks;

pub use card_state::{
    card_tick, get_card_transform, get_card_visibility, reset_card, set_swipe_params,
    set_viewport,
};

pub use hand_landmarks::{
    // WASM entry points
    apply_hand_landmarks,
    get_gesture_debug,
    // Internal API
    latest_gesture,
    reset_gesture_state,
};
