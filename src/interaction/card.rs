//! Card interaction state machine
//!
//! Converts the gesture sample stream into debounced visibility
//! transitions and a continuously smoothed transform. Pure per-tick
//! function of (previous state, current sample, delta, wall clock);
//! no I/O and no failure states - absent samples degrade to the
//! "not detected" behavior.

use nalgebra::Vector3;

use super::visibility::Visibility;
use crate::gesture::GestureSample;

/// Swipe speed must exceed this (strictly) to trigger a transition
pub const SWIPE_THRESHOLD: f32 = 0.08;

/// World-space distance the card flies off screen
pub const FLY_DISTANCE: f32 = 15.0;

/// Minimum time between accepted swipes
pub const SWIPE_COOLDOWN_MS: f64 = 500.0;

/// Swipes are suppressed this long after a pose change
pub const GESTURE_IMMUNITY_MS: f64 = 400.0;

/// Position lerp factor while following the hand
const FOLLOW_LERP: f32 = 0.10;
/// Position lerp factor while flying off (floatier departure)
const FLY_LERP: f32 = 0.08;
/// Scale and tilt lerp factor
const SHAPE_LERP: f32 = 0.10;

/// Yaw spin rate while pointing (rad/s)
const POINT_SPIN_RATE: f32 = 6.0;
/// Yaw spin rate while flying off (rad/s)
const FLY_SPIN_RATE: f32 = 15.0;

/// Open palm grows the card to this scale
const OPEN_SCALE: f32 = 2.5;
/// Fist shrinks the card to this scale
const FIST_SCALE: f32 = 0.5;

/// Hover offset above the fingertip while pointing: base plus a
/// per-scale term so a larger card sits higher
const HOVER_BASE: f32 = 0.3;
const HOVER_PER_SCALE: f32 = 0.3;
/// Depth the card hovers at while pointing (toward the viewer)
const HOVER_DEPTH: f32 = 0.5;

/// Tilt target as a fraction of the screen-space offset
const TILT_FACTOR: f32 = 0.5;

/// Fixed-factor exponential step toward a target, calibrated for a
/// ~60fps tick cadence
fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// World-space viewport extents of the renderer's camera at the
/// card's neutral depth, used to map normalized screen coordinates
/// to world coordinates and to derive tilt targets
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Map a normalized screen point to world coordinates (y up)
    pub fn to_world(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - 0.5) * self.width, -(y - 0.5) * self.height)
    }
}

impl Default for Viewport {
    // 16:9 view at the default camera distance
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 4.5,
        }
    }
}

/// Runtime-tunable swipe detection parameters
#[derive(Clone, Copy, Debug)]
pub struct SwipeTuning {
    pub threshold: f32,
    pub cooldown_ms: f64,
    pub immunity_ms: f64,
}

impl Default for SwipeTuning {
    fn default() -> Self {
        Self {
            threshold: SWIPE_THRESHOLD,
            cooldown_ms: SWIPE_COOLDOWN_MS,
            immunity_ms: GESTURE_IMMUNITY_MS,
        }
    }
}

/// Transform handed to the renderer each frame
///
/// `scale` is uniform across all three axes.
#[derive(Clone, Copy, Debug)]
pub struct CardTransform {
    pub position: Vector3<f32>,
    pub pitch: f32,
    pub yaw: f32,
    pub scale: f32,
}

/// Long-lived state for one controlled card
pub struct CardController {
    visibility: Visibility,
    position: Vector3<f32>,
    target_position: Vector3<f32>,
    pitch: f32,
    yaw: f32,
    scale: f32,
    last_swipe_at_ms: f64,
    gesture_stable_since_ms: f64,
    last_is_pointing: bool,
    last_is_open: bool,
    viewport: Viewport,
    tuning: SwipeTuning,
}

impl CardController {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Visible,
            position: Vector3::zeros(),
            target_position: Vector3::zeros(),
            pitch: 0.0,
            yaw: 0.0,
            scale: 1.0,
            last_swipe_at_ms: 0.0,
            gesture_stable_since_ms: 0.0,
            last_is_pointing: false,
            last_is_open: true,
            viewport: Viewport::default(),
            tuning: SwipeTuning::default(),
        }
    }

    /// Advance by one frame
    ///
    /// `now_ms` is wall-clock time, `delta_s` the elapsed seconds
    /// since the previous frame. Returns the newly entered visibility
    /// variant when a swipe transition fired this tick.
    pub fn tick(
        &mut self,
        sample: Option<&GestureSample>,
        now_ms: f64,
        delta_s: f32,
    ) -> Option<Visibility> {
        // An undetected sample is the same as no sample
        let sample = sample.filter(|s| s.detected);

        // Pose stability: a change in the (pointing, open) pair
        // restarts the immunity window, so a motion that flips the
        // pose can't also register as a swipe
        if let Some(s) = sample {
            if s.is_pointing != self.last_is_pointing || s.is_open != self.last_is_open {
                self.gesture_stable_since_ms = now_ms;
                self.last_is_pointing = s.is_pointing;
                self.last_is_open = s.is_open;
            }
        }
        let stable = now_ms - self.gesture_stable_since_ms > self.tuning.immunity_ms;

        // Swipe toggle: odd swipes dismiss, even swipes summon back
        let mut transition = None;
        if let Some(s) = sample {
            if stable && now_ms - self.last_swipe_at_ms > self.tuning.cooldown_ms {
                let speed = s.vx.hypot(s.vy);
                if speed > self.tuning.threshold {
                    self.visibility = match self.visibility {
                        Visibility::Visible => Visibility::from_swipe(s.vx, s.vy),
                        _ => Visibility::Visible,
                    };
                    self.last_swipe_at_ms = now_ms;
                    transition = Some(self.visibility);
                }
            }
        }

        // Target position for this tick
        self.target_position = match self.visibility {
            Visibility::Visible => match sample {
                Some(s) => {
                    let (hand_x, hand_y) = self.viewport.to_world(s.x, s.y);
                    if s.is_pointing {
                        let hover = HOVER_BASE + self.scale * HOVER_PER_SCALE;
                        Vector3::new(hand_x, hand_y + hover, HOVER_DEPTH)
                    } else {
                        Vector3::new(hand_x, hand_y, 0.0)
                    }
                }
                // Hand lost: recenter
                None => Vector3::zeros(),
            },
            flown => flown.fly_direction() * FLY_DISTANCE,
        };

        // Position smoothing
        let factor = if self.visibility.is_visible() {
            FOLLOW_LERP
        } else {
            FLY_LERP
        };
        self.position += (self.target_position - self.position) * factor;

        // Scale and rotation
        match (self.visibility, sample) {
            (Visibility::Visible, Some(s)) if s.is_pointing => {
                // Spin in place; scale frozen while pointing
                self.pitch = lerp(self.pitch, 0.0, SHAPE_LERP);
                self.yaw += delta_s * POINT_SPIN_RATE;
            }
            (Visibility::Visible, Some(s)) => {
                let target_scale = if s.is_open { OPEN_SCALE } else { FIST_SCALE };
                self.scale = lerp(self.scale, target_scale, SHAPE_LERP);

                // Tilt toward the card's own screen-space offset
                let tilt_x = self.position.y / self.viewport.height * TILT_FACTOR;
                let tilt_y = self.position.x / self.viewport.width * TILT_FACTOR;
                self.pitch = lerp(self.pitch, tilt_x, SHAPE_LERP);
                self.yaw = lerp(self.yaw, tilt_y, SHAPE_LERP);
            }
            (Visibility::Visible, None) => {
                self.pitch = lerp(self.pitch, 0.0, SHAPE_LERP);
                self.yaw = lerp(self.yaw, 0.0, SHAPE_LERP);
            }
            _ => {
                // Flying off: relax pitch, keep spinning
                self.pitch = lerp(self.pitch, 0.0, SHAPE_LERP);
                self.yaw += delta_s * FLY_SPIN_RATE;
            }
        }

        transition
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn transform(&self) -> CardTransform {
        CardTransform {
            position: self.position,
            pitch: self.pitch,
            yaw: self.yaw,
            scale: self.scale,
        }
    }

    pub fn target_position(&self) -> Vector3<f32> {
        self.target_position
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_tuning(&mut self, tuning: SwipeTuning) {
        self.tuning = tuning;
    }

    /// Back to the startup state (visible, unit scale, at origin)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 16.6;
    const FRAME_S: f32 = 0.0166;

    fn sample(vx: f32, vy: f32) -> GestureSample {
        GestureSample {
            x: 0.5,
            y: 0.5,
            vx,
            vy,
            is_open: true,
            is_pointing: false,
            detected: true,
        }
    }

    fn open_at(x: f32, y: f32) -> GestureSample {
        GestureSample {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            is_open: true,
            is_pointing: false,
            detected: true,
        }
    }

    fn pointing_at(x: f32, y: f32) -> GestureSample {
        GestureSample {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            is_open: false,
            is_pointing: true,
            detected: true,
        }
    }

    #[test]
    fn swipe_right_flies_right() {
        let mut card = CardController::new();
        // Stable since 0, cooldown elapsed at t=1000
        let transition = card.tick(Some(&sample(0.2, 0.01)), 1000.0, FRAME_S);
        assert_eq!(transition, Some(Visibility::FlownRight));
        assert_eq!(card.visibility(), Visibility::FlownRight);
    }

    #[test]
    fn any_swipe_summons_back() {
        let mut card = CardController::new();
        card.tick(Some(&sample(0.2, 0.01)), 1000.0, FRAME_S);
        assert_eq!(card.visibility(), Visibility::FlownRight);

        // Different direction, still returns to visible
        let transition = card.tick(Some(&sample(-0.1, 0.2)), 1600.0, FRAME_S);
        assert_eq!(transition, Some(Visibility::Visible));
        assert_eq!(card.visibility(), Visibility::Visible);
    }

    #[test]
    fn swipe_count_toggles_odd_even() {
        let mut card = CardController::new();
        let mut now = 1000.0;
        let mut seen = Vec::new();
        for _ in 0..4 {
            card.tick(Some(&sample(0.0, -0.3)), now, FRAME_S);
            seen.push(card.visibility());
            now += 600.0;
        }
        assert_eq!(seen[0], Visibility::FlownUp);
        assert_eq!(seen[1], Visibility::Visible);
        assert_eq!(seen[0], seen[2]);
        assert_eq!(seen[1], seen[3]);
    }

    #[test]
    fn vertical_axis_wins_when_dominant() {
        let mut card = CardController::new();
        card.tick(Some(&sample(0.05, 0.2)), 1000.0, FRAME_S);
        assert_eq!(card.visibility(), Visibility::FlownDown);
    }

    #[test]
    fn cooldown_suppresses_back_to_back_swipes() {
        let mut card = CardController::new();
        card.tick(Some(&sample(0.2, 0.0)), 1000.0, FRAME_S);
        assert_eq!(card.visibility(), Visibility::FlownRight);

        // 300ms later: inside the cooldown, no transition
        let transition = card.tick(Some(&sample(0.5, 0.0)), 1300.0, FRAME_S);
        assert_eq!(transition, None);
        assert_eq!(card.visibility(), Visibility::FlownRight);

        // Past the cooldown it fires again
        let transition = card.tick(Some(&sample(0.5, 0.0)), 1600.0, FRAME_S);
        assert_eq!(transition, Some(Visibility::Visible));
    }

    #[test]
    fn pose_change_grants_swipe_immunity() {
        let mut card = CardController::new();

        // Open -> fist flips the pose pair and restarts the window
        let fast_fist = GestureSample {
            is_open: false,
            ..sample(0.3, 0.0)
        };
        assert_eq!(card.tick(Some(&fast_fist), 1000.0, FRAME_S), None);
        assert_eq!(card.visibility(), Visibility::Visible);

        // Still inside the immunity window
        assert_eq!(card.tick(Some(&fast_fist), 1200.0, FRAME_S), None);
        assert_eq!(card.visibility(), Visibility::Visible);

        // Window elapsed, same fast motion now counts
        let transition = card.tick(Some(&fast_fist), 1500.0, FRAME_S);
        assert_eq!(transition, Some(Visibility::FlownRight));
    }

    #[test]
    fn speed_at_threshold_does_not_trigger() {
        let mut card = CardController::new();
        let transition = card.tick(Some(&sample(SWIPE_THRESHOLD, 0.0)), 1000.0, FRAME_S);
        assert_eq!(transition, None);
        assert_eq!(card.visibility(), Visibility::Visible);
    }

    #[test]
    fn undetected_sample_behaves_like_none() {
        let mut card = CardController::new();
        let ghost = GestureSample {
            detected: false,
            ..sample(0.5, 0.5)
        };
        assert_eq!(card.tick(Some(&ghost), 1000.0, FRAME_S), None);
        assert_eq!(card.visibility(), Visibility::Visible);
        assert_eq!(card.target_position(), Vector3::zeros());
    }

    #[test]
    fn no_sample_recenters_while_visible() {
        let mut card = CardController::new();
        // Track off-center for a while
        let mut now = 1000.0;
        for _ in 0..30 {
            card.tick(Some(&open_at(0.9, 0.2)), now, FRAME_S);
            now += FRAME_MS;
        }
        assert!(card.transform().position.x > 1.0);

        // Hand lost: target is the origin and the card drifts back
        card.tick(None, now, FRAME_S);
        assert_eq!(card.target_position(), Vector3::zeros());
        for _ in 0..200 {
            now += FRAME_MS;
            card.tick(None, now, FRAME_S);
        }
        assert!(card.transform().position.norm() < 0.01);
    }

    #[test]
    fn open_palm_converges_to_full_spread() {
        // Scenario: open hand held at screen center for over a second
        let mut card = CardController::new();
        let mut now = 1000.0;
        for _ in 0..120 {
            card.tick(Some(&open_at(0.5, 0.5)), now, FRAME_S);
            now += FRAME_MS;
        }
        let t = card.transform();
        assert!((t.scale - 2.5).abs() < 0.01);
        assert!(t.position.norm() < 1e-3);
        assert!(t.pitch.abs() < 1e-3);
        assert!(t.yaw.abs() < 1e-3);
    }

    #[test]
    fn fist_shrinks_the_card() {
        let mut card = CardController::new();
        let fist = GestureSample {
            is_open: false,
            ..open_at(0.5, 0.5)
        };
        let mut now = 1000.0;
        for _ in 0..120 {
            card.tick(Some(&fist), now, FRAME_S);
            now += FRAME_MS;
        }
        assert!((card.transform().scale - 0.5).abs() < 0.01);
    }

    #[test]
    fn pointing_spins_and_freezes_scale() {
        let mut card = CardController::new();
        // Grow first so the frozen scale is distinguishable from 1.0
        let mut now = 1000.0;
        for _ in 0..60 {
            card.tick(Some(&open_at(0.5, 0.5)), now, FRAME_S);
            now += FRAME_MS;
        }
        let grown = card.transform().scale;

        let yaw_before = card.transform().yaw;
        for _ in 0..60 {
            card.tick(Some(&pointing_at(0.5, 0.5)), now, FRAME_S);
            now += FRAME_MS;
        }
        let t = card.transform();
        assert_eq!(t.scale, grown);
        assert!(t.yaw > yaw_before + 5.0); // ~6 rad/s for one second
        assert!(t.pitch.abs() < 1e-3);
    }

    #[test]
    fn pointing_hovers_above_the_fingertip() {
        let mut card = CardController::new();
        card.tick(Some(&pointing_at(0.5, 0.5)), 1000.0, FRAME_S);
        let target = card.target_position();
        let hover = 0.3 + card.transform().scale * 0.3;
        assert!((target.y - hover).abs() < 1e-6);
        assert!((target.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn flown_card_heads_for_the_fly_target() {
        let mut card = CardController::new();
        card.tick(Some(&sample(0.2, 0.0)), 1000.0, FRAME_S);
        assert_eq!(
            card.target_position(),
            Vector3::new(FLY_DISTANCE, 0.0, 0.0)
        );

        let mut now = 1000.0;
        for _ in 0..300 {
            now += FRAME_MS;
            card.tick(None, now, FRAME_S);
        }
        let t = card.transform();
        assert!((t.position.x - FLY_DISTANCE).abs() < 0.1);
    }

    #[test]
    fn flown_card_keeps_spinning() {
        let mut card = CardController::new();
        card.tick(Some(&sample(0.0, 0.3)), 1000.0, FRAME_S);
        let yaw_before = card.transform().yaw;
        card.tick(None, 1016.6, FRAME_S);
        let yaw_after = card.transform().yaw;
        assert!((yaw_after - yaw_before - FRAME_S * 15.0).abs() < 1e-5);
    }

    #[test]
    fn tilt_follows_screen_offset() {
        let mut card = CardController::new();
        let mut now = 1000.0;
        for _ in 0..200 {
            card.tick(Some(&open_at(0.75, 0.5)), now, FRAME_S);
            now += FRAME_MS;
        }
        let t = card.transform();
        let viewport = Viewport::default();
        let expected_yaw = t.position.x / viewport.width * 0.5;
        assert!((t.yaw - expected_yaw).abs() < 0.01);
        assert!(t.pitch.abs() < 0.01);
    }

    #[test]
    fn reset_restores_startup_state() {
        let mut card = CardController::new();
        card.tick(Some(&sample(0.3, 0.0)), 1000.0, FRAME_S);
        card.reset();
        assert_eq!(card.visibility(), Visibility::Visible);
        let t = card.transform();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.position, Vector3::zeros());
    }
}
