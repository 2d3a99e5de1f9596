//! Hand landmark ingestion - JS → Rust
//!
//! Receives MediaPipe HandLandmarker output from JavaScript once per
//! video frame, runs the gesture classifier, and stores the latest
//! sample for the card tick to consume.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::gesture::{GestureClassifier, GestureSample, HandLandmark, LANDMARK_COUNT};

/// Floats per hand in the flat payload (21 landmarks × xyz)
const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

struct GestureState {
    classifier: GestureClassifier,
    latest: Option<GestureSample>,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            classifier: GestureClassifier::new(),
            latest: None,
        }
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static GESTURE_STATE: RefCell<GestureState> = RefCell::new(GestureState::default());
}

/// Called from JavaScript with the detector output for one frame:
/// a flat Float32Array of 63 values per hand (x, y, z per landmark)
/// and the video timestamp in milliseconds.
///
/// Only the first hand is consumed; `num_hands == 0` clears the
/// current sample (hand lost).
#[wasm_bindgen]
pub fn apply_hand_landmarks(data: &[f32], num_hands: usize, timestamp_ms: f64) {
    GESTURE_STATE.with(|state_cell| {
        let mut state = state_cell.borrow_mut();

        if num_hands == 0 {
            state.latest = None;
            return;
        }
        if data.len() < FLOATS_PER_HAND {
            web_sys::console::warn_1(
                &format!(
                    "Invalid landmark data length: {} (expected at least {})",
                    data.len(),
                    FLOATS_PER_HAND
                )
                .into(),
            );
            state.latest = None;
            return;
        }

        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            let base = i * 3;
            *lm = HandLandmark {
                x: data[base],
                y: data[base + 1],
                z: data[base + 2],
            };
        }

        let sample = state.classifier.classify(&landmarks, timestamp_ms);
        state.latest = Some(sample);
    });
}

/// Gesture debug info for the UI overlay:
/// [x, y, vx, vy, is_open, is_pointing, detected]
#[wasm_bindgen]
pub fn get_gesture_debug() -> Vec<f32> {
    GESTURE_STATE.with(|state_cell| {
        let state = state_cell.borrow();
        match state.latest {
            Some(s) => vec![
                s.x,
                s.y,
                s.vx,
                s.vy,
                s.is_open as u8 as f32,
                s.is_pointing as u8 as f32,
                1.0,
            ],
            None => vec![0.0; 7],
        }
    })
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Latest sample for the current frame
pub fn latest_gesture() -> Option<GestureSample> {
    GESTURE_STATE.with(|state_cell| state_cell.borrow().latest)
}

/// Drop the sample and the classifier's velocity memory
pub fn reset_gesture_state() {
    GESTURE_STATE.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        state.classifier.reset();
        state.latest = None;
    });
}
