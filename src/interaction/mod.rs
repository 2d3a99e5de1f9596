//! Interaction module - card state machine
//!
//! Re-exports only. All logic in submodules.

mod card;
mod visibility;

pub use card::{
    CardController, CardTransform, SwipeTuning, Viewport, FLY_DISTANCE, GESTURE_IMMUNITY_MS,
    SWIPE_COOLDOWN_MS, SWIPE_THRESHOLD,
};
pub use visibility::Visibility;
