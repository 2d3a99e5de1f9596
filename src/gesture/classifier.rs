//! Hand pose classification
//!
//! Turns one hand's landmarks plus a frame timestamp into a
//! `GestureSample`: mirrored index-tip position, frame-normalized
//! velocity, and the open/pointing pose flags the interaction state
//! machine consumes.

use super::landmarks::{
    distance, HandLandmark, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_TIP, PINKY_TIP,
    RING_TIP, WRIST,
};

/// Fingertips used by the fold test (middle, ring, pinky)
const FOLD_TIPS: [usize; 3] = [MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// A fingertip closer to the wrist than this fraction of hand size counts as folded
const FOLD_RATIO: f32 = 1.2;

/// Index tip farther from the wrist than this fraction of hand size counts as extended
const EXTEND_RATIO: f32 = 1.5;

/// Gaps at or above this between samples are treated as discontinuities (tracking loss)
const MAX_SAMPLE_GAP_MS: f64 = 100.0;

/// Nominal frame period; velocity is reported per canonical ~60fps frame
const NOMINAL_FRAME_MS: f32 = 16.6;

/// One classified frame of hand input
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureSample {
    /// Index-tip position, normalized 0-1, x mirrored to match the mirrored video
    pub x: f32,
    pub y: f32,
    /// Displacement per nominal frame
    pub vx: f32,
    pub vy: f32,
    /// Controls the scale target
    pub is_open: bool,
    /// Controls rotation and the scale lock
    pub is_pointing: bool,
    pub detected: bool,
}

/// Stateful classifier for one tracked hand
///
/// Keeps the previous position/timestamp for the velocity finite
/// difference. One instance per tracked session; state is not reset
/// between detections (the sample-gap bound absorbs tracking loss).
pub struct GestureClassifier {
    last_x: f32,
    last_y: f32,
    last_timestamp_ms: f64,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self {
            last_x: 0.0,
            last_y: 0.0,
            last_timestamp_ms: 0.0,
        }
    }

    /// Classify one frame of landmarks
    ///
    /// `timestamp_ms` must be monotonically increasing across calls.
    pub fn classify(
        &mut self,
        landmarks: &[HandLandmark; LANDMARK_COUNT],
        timestamp_ms: f64,
    ) -> GestureSample {
        let tip = landmarks[INDEX_TIP];

        // Mirror x to compensate for the mirrored camera view
        let x = 1.0 - tip.x;
        let y = tip.y;

        // Finite-difference velocity, rejecting stalls and large gaps
        let dt = timestamp_ms - self.last_timestamp_ms;
        let mut vx = 0.0;
        let mut vy = 0.0;
        if dt > 0.0 && dt < MAX_SAMPLE_GAP_MS {
            let time_scale = NOMINAL_FRAME_MS / dt as f32;
            vx = (x - self.last_x) * time_scale;
            vy = (y - self.last_y) * time_scale;
        }

        self.last_x = x;
        self.last_y = y;
        self.last_timestamp_ms = timestamp_ms;

        // All thresholds relative to hand size, so classification is
        // invariant to distance from the camera
        let wrist = landmarks[WRIST];
        let hand_size = distance(wrist, landmarks[MIDDLE_MCP]);

        let folded = FOLD_TIPS
            .iter()
            .filter(|&&idx| distance(landmarks[idx], wrist) < hand_size * FOLD_RATIO)
            .count();

        let index_extended = distance(tip, wrist) > hand_size * EXTEND_RATIO;

        GestureSample {
            x,
            y,
            vx,
            vy,
            is_open: folded < 3,
            is_pointing: index_extended && folded >= 3,
            detected: true,
        }
    }

    /// Reset velocity memory (new session)
    pub fn reset(&mut self) {
        self.last_x = 0.0;
        self.last_y = 0.0;
        self.last_timestamp_ms = 0.0;
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}
