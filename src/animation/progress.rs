//! Smoothed formation progress.
//!
//! A [`TransitionState`] is a first-order low-pass filter on the target
//! progress (0 = scattered, 1 = tree). It has no notion of a transition
//! start time: reversing the target mid-way simply changes the direction
//! the smoothed value drifts in, so the motion stays continuous.

use crate::util::easing::EasingFunction;

/// Frame rate the per-frame blend rates are defined against.
pub const REFERENCE_FPS: f32 = 60.0;

/// Longest frame delta honoured by [`TransitionState::advance`]; longer
/// stalls (suspended tabs, debugger breaks) are treated as this long.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// The two stable formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormationState {
    /// Scattered cloud.
    #[default]
    Scattered,
    /// Converged cone.
    TreeShape,
}

impl FormationState {
    /// Target progress for this formation.
    #[must_use]
    pub fn target_progress(self) -> f32 {
        match self {
            FormationState::Scattered => 0.0,
            FormationState::TreeShape => 1.0,
        }
    }

    /// The other formation.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            FormationState::Scattered => FormationState::TreeShape,
            FormationState::TreeShape => FormationState::Scattered,
        }
    }

    /// Short status label for overlays.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FormationState::Scattered => "Entropy",
            FormationState::TreeShape => "Coherent",
        }
    }
}

/// Blend factor for one update of `dt` seconds at a per-reference-frame
/// `rate`.
///
/// Exactly `rate` at `dt = 1 / REFERENCE_FPS`. Zero for non-positive or
/// non-finite `dt`; `dt` is capped at [`MAX_FRAME_DELTA`].
#[must_use]
pub fn blend_factor(rate: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    let rate = rate.clamp(0.0, 1.0);
    let frames = dt.min(MAX_FRAME_DELTA) * REFERENCE_FPS;
    1.0 - (1.0 - rate).powf(frames)
}

/// Smoothed progress toward a target formation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    target: f32,
    smoothed: f32,
    rate: f32,
}

impl TransitionState {
    /// Fully scattered state that approaches its target at `rate` per
    /// reference frame.
    #[must_use]
    pub fn new(rate: f32) -> Self {
        Self {
            target: 0.0,
            smoothed: 0.0,
            rate: rate.clamp(0.0, 1.0),
        }
    }

    /// Target progress (0 or 1 in normal use).
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current smoothed progress in [0, 1].
    #[must_use]
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    /// Per-reference-frame blend rate.
    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Smoothed progress shaped by `easing`.
    #[must_use]
    pub fn eased(&self, easing: EasingFunction) -> f32 {
        easing.evaluate(self.smoothed)
    }

    /// Set the target progress, clamped to [0, 1].
    pub fn set_target(&mut self, target: f32) {
        self.target = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, 1.0)
        };
    }

    /// Point the target at a formation.
    pub fn set_state(&mut self, state: FormationState) {
        self.set_target(state.target_progress());
    }

    /// Change the blend rate without disturbing progress.
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.clamp(0.0, 1.0);
    }

    /// Advance by `dt` seconds and return the new smoothed progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.blend(blend_factor(self.rate, dt))
    }

    /// Advance by exactly one reference frame.
    pub fn step(&mut self) -> f32 {
        self.blend(self.rate)
    }

    /// Whether the smoothed progress is within `epsilon` of the target.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target - self.smoothed).abs() <= epsilon
    }

    fn blend(&mut self, factor: f32) -> f32 {
        self.smoothed += (self.target - self.smoothed) * factor;
        self.smoothed = self.smoothed.clamp(0.0, 1.0);
        self.smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formation_state() {
        assert_eq!(FormationState::default(), FormationState::Scattered);
        assert_eq!(FormationState::Scattered.target_progress(), 0.0);
        assert_eq!(FormationState::TreeShape.target_progress(), 1.0);
        assert_eq!(
            FormationState::Scattered.toggled(),
            FormationState::TreeShape
        );
        assert_eq!(FormationState::TreeShape.label(), "Coherent");
    }

    #[test]
    fn test_blend_factor_matches_rate_at_reference_fps() {
        let f = blend_factor(0.03, 1.0 / REFERENCE_FPS);
        assert!((f - 0.03).abs() < 1e-6);
        // Two half-frames compound to one full frame.
        let half = blend_factor(0.03, 0.5 / REFERENCE_FPS);
        assert!((1.0 - (1.0 - half) * (1.0 - half) - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_blend_factor_rejects_bad_deltas() {
        assert_eq!(blend_factor(0.05, 0.0), 0.0);
        assert_eq!(blend_factor(0.05, -1.0), 0.0);
        assert_eq!(blend_factor(0.05, f32::NAN), 0.0);
        assert_eq!(blend_factor(0.05, f32::INFINITY), 0.0);
        assert_eq!(blend_factor(0.05, 10.0), blend_factor(0.05, MAX_FRAME_DELTA));
    }

    #[test]
    fn test_converges_monotonically_without_overshoot() {
        let mut state = TransitionState::new(0.03);
        state.set_state(FormationState::TreeShape);
        let mut prev = state.smoothed();
        for _ in 0..2000 {
            let now = state.step();
            assert!(now >= prev, "went backwards: {now} < {prev}");
            assert!(now <= 1.0);
            prev = now;
        }
        assert!(state.is_settled(1e-3));
    }

    #[test]
    fn test_variable_dt_never_overshoots() {
        let mut state = TransitionState::new(0.05);
        state.set_target(1.0);
        for i in 0..600 {
            let dt = [0.001, 0.016, 0.033, 0.1, 1.0][i % 5];
            let now = state.advance(dt);
            assert!((0.0..=1.0).contains(&now));
        }
        assert!(state.is_settled(1e-3));
    }

    #[test]
    fn test_reversal_is_continuous() {
        let rate = 0.04;
        let mut state = TransitionState::new(rate);
        state.set_state(FormationState::TreeShape);
        let mut prev = state.smoothed();
        for frame in 0..300 {
            if frame == 40 {
                state.set_state(FormationState::Scattered);
            }
            if frame == 120 {
                state.set_state(FormationState::TreeShape);
            }
            let now = state.step();
            // One frame can move at most `rate` of the remaining distance,
            // and the remaining distance is at most 1.
            assert!((now - prev).abs() <= rate + 1e-6, "jump at {frame}");
            prev = now;
        }
    }

    #[test]
    fn test_reversal_changes_direction() {
        let mut state = TransitionState::new(0.05);
        state.set_target(1.0);
        for _ in 0..20 {
            let _ = state.step();
        }
        let peak = state.smoothed();
        state.set_target(0.0);
        let after = state.step();
        assert!(after < peak);
        assert!(after > 0.0);
    }

    #[test]
    fn test_target_is_clamped() {
        let mut state = TransitionState::new(0.5);
        state.set_target(3.0);
        assert_eq!(state.target(), 1.0);
        state.set_target(f32::NAN);
        assert_eq!(state.target(), 0.0);
    }

    #[test]
    fn test_eased_progress() {
        let mut state = TransitionState::new(1.0);
        state.set_target(1.0);
        let _ = state.step();
        assert_eq!(state.smoothed(), 1.0);
        assert!((state.eased(EasingFunction::CubicInOut) - 1.0).abs() < 1e-6);
    }
}
