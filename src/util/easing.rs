//! Easing functions for formation transitions.
//!
//! The smoothed progress of a transition is shaped by one of these curves
//! before it drives any per-entity interpolation. All functions clamp their
//! input to [0, 1] so floating-point drift never escapes the unit interval.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for transition curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Cubic ease-out (fast start, slow end).
    CubicOut,
    /// Symmetric cubic ease-in-out (slow start and end, fast middle).
    CubicInOut,
}

impl EasingFunction {
    /// Default easing: symmetric cubic ease-in-out.
    pub const DEFAULT: EasingFunction = EasingFunction::CubicInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0] (NaN maps to 0.0).
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        match self {
            EasingFunction::Linear => clamp_unit(t),
            EasingFunction::CubicOut => ease_out_cubic(t),
            EasingFunction::CubicInOut => ease_in_out_cubic(t),
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Clamp to [0, 1], mapping NaN to 0.
#[inline]
#[must_use]
pub fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// `1 - (1 - t)^3`
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let omt = 1.0 - clamp_unit(t);
    1.0 - omt * omt * omt
}

/// `4t^3` below 0.5, `1 - (-2t + 2)^3 / 2` above.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = clamp_unit(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k * k / 2.0
    }
}

/// Hermite smoothstep between two edges, as in GLSL.
#[inline]
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp_unit((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}
