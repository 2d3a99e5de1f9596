//! Card visibility variants
//!
//! Closed set of states for the controlled card: on screen, or flown
//! off in one of four cardinal directions. Odd swipes dismiss the
//! card, even swipes summon it back.

use nalgebra::Vector3;

/// Where the card currently lives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    FlownUp,
    FlownDown,
    FlownLeft,
    FlownRight,
}

impl Visibility {
    pub fn name(&self) -> &'static str {
        match self {
            Visibility::Visible => "VISIBLE",
            Visibility::FlownUp => "FLOWN_UP",
            Visibility::FlownDown => "FLOWN_DOWN",
            Visibility::FlownLeft => "FLOWN_LEFT",
            Visibility::FlownRight => "FLOWN_RIGHT",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    /// Unit direction the card flies toward; zero while visible
    pub fn fly_direction(&self) -> Vector3<f32> {
        match self {
            Visibility::Visible => Vector3::zeros(),
            Visibility::FlownUp => Vector3::new(0.0, 1.0, 0.0),
            Visibility::FlownDown => Vector3::new(0.0, -1.0, 0.0),
            Visibility::FlownLeft => Vector3::new(-1.0, 0.0, 0.0),
            Visibility::FlownRight => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// Classify a qualifying swipe by its dominant axis
    ///
    /// Strict comparison, so an exact tie goes to the horizontal
    /// branch. Screen y grows downward: negative vy is an upward swipe.
    pub fn from_swipe(vx: f32, vy: f32) -> Self {
        if vy.abs() > vx.abs() {
            if vy < 0.0 {
                Visibility::FlownUp
            } else {
                Visibility::FlownDown
            }
        } else if vx < 0.0 {
            Visibility::FlownLeft
        } else {
            Visibility::FlownRight
        }
    }
}
