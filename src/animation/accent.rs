//! The accent entity (tree topper).
//!
//! Uses the same smoothing and easing as the ornaments but with its own
//! [`TransitionState`] and a stricter terminal state: once the tree is
//! fully targeted and mostly formed, the topper stops tumbling and its
//! rotation decays to exactly zero so it faces front.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rand::Rng;

use super::instance::InstanceTransform;
use super::progress::{blend_factor, FormationState, TransitionState};
use crate::geometry::{random_sphere_point, star_outline};
use crate::options::AccentOptions;
use crate::util::color::Rgb;
use crate::util::easing::EasingFunction;

/// Angles below this magnitude snap to zero while settling.
pub const SETTLE_SNAP_EPSILON: f32 = 1e-3;

/// Tint of the topper.
pub const ACCENT_COLOR: Rgb = Rgb::new(1.0, 215.0 / 255.0, 0.0);

const STAR_POINTS: u32 = 5;
const STAR_OUTER_RADIUS: f32 = 0.8;
const STAR_INNER_RADIUS: f32 = 0.4;

/// Driver for the single accent entity.
#[derive(Debug, Clone)]
pub struct AccentEntity {
    scatter_pos: Vec3,
    scatter_radius: f32,
    tree_pos: Vec3,
    transition: TransitionState,
    rotation: Vec3,
    tumble_rates: Vec3,
    settle_threshold: f32,
    settle_rate: f32,
    scale: f32,
}

impl AccentEntity {
    /// Place a new accent entity: scattered somewhere in a ball, headed
    /// for `options.clearance` above `apex_height`.
    pub fn new<R: Rng + ?Sized>(
        options: &AccentOptions,
        apex_height: f32,
        progress_rate: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            scatter_pos: random_sphere_point(rng, options.scatter_radius),
            scatter_radius: options.scatter_radius,
            tree_pos: tree_position(options, apex_height),
            transition: TransitionState::new(progress_rate),
            rotation: Vec3::ZERO,
            tumble_rates: Vec3::from_array(options.tumble_rates),
            settle_threshold: options.settle_threshold,
            settle_rate: options.settle_rate,
            scale: options.scale,
        }
    }

    /// Take new constants from `options` without disturbing progress or
    /// rotation. The scatter position is redrawn only when its radius
    /// changed.
    pub fn apply_options<R: Rng + ?Sized>(
        &mut self,
        options: &AccentOptions,
        apex_height: f32,
        progress_rate: f32,
        rng: &mut R,
    ) {
        if self.scatter_radius != options.scatter_radius {
            self.scatter_pos = random_sphere_point(rng, options.scatter_radius);
            self.scatter_radius = options.scatter_radius;
        }
        self.tree_pos = tree_position(options, apex_height);
        self.transition.set_rate(progress_rate);
        self.tumble_rates = Vec3::from_array(options.tumble_rates);
        self.settle_threshold = options.settle_threshold;
        self.settle_rate = options.settle_rate;
        self.scale = options.scale;
    }

    /// Position on the tree.
    #[must_use]
    pub fn tree_position(&self) -> Vec3 {
        self.tree_pos
    }

    /// Point the accent at a formation.
    pub fn set_state(&mut self, state: FormationState) {
        self.transition.set_state(state);
    }

    /// The accent's own transition state.
    #[must_use]
    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    /// Current Euler rotation in radians, each axis in [-π, π).
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Whether the entity is in its terminal settled regime: the tree is
    /// fully targeted and smoothed progress is past the threshold.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.transition.target() >= 1.0
            && self.transition.smoothed() > self.settle_threshold
    }

    /// Advance by `dt` seconds and return the new transform.
    pub fn advance(
        &mut self,
        dt: f32,
        easing: EasingFunction,
    ) -> InstanceTransform {
        let _ = self.transition.advance(dt);

        if self.is_settling() {
            let factor = blend_factor(self.settle_rate, dt);
            self.rotation = settle(self.rotation, factor);
        } else if dt.is_finite() && dt > 0.0 {
            self.rotation = wrap_angles(self.rotation + self.tumble_rates * dt);
        }

        self.transform(easing)
    }

    /// Transform at the current state, without advancing.
    #[must_use]
    pub fn transform(&self, easing: EasingFunction) -> InstanceTransform {
        let eased = self.transition.eased(easing);
        InstanceTransform {
            position: self.scatter_pos.lerp(self.tree_pos, eased),
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

fn tree_position(options: &AccentOptions, apex_height: f32) -> Vec3 {
    Vec3::new(0.0, apex_height + options.clearance, 0.0)
}

/// Outline of the five-pointed star topper in its local XY plane, first
/// vertex at +Y.
#[must_use]
pub fn accent_outline() -> Vec<Vec2> {
    star_outline(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS)
}

/// Decay each angle toward zero, snapping once close enough.
fn settle(rotation: Vec3, factor: f32) -> Vec3 {
    let decay = |angle: f32| {
        let next = angle - angle * factor;
        if next.abs() < SETTLE_SNAP_EPSILON {
            0.0
        } else {
            next
        }
    };
    Vec3::new(decay(rotation.x), decay(rotation.y), decay(rotation.z))
}

/// Wrap each angle into [-π, π) so decay takes the short way round.
fn wrap_angles(rotation: Vec3) -> Vec3 {
    let wrap = |angle: f32| (angle + PI).rem_euclid(TAU) - PI;
    Vec3::new(wrap(rotation.x), wrap(rotation.y), wrap(rotation.z))
}
