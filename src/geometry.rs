//! Point generators for the two formations.
//!
//! The tree formation places points on the lateral surface of a right
//! circular cone whose base sits at `p = 0` and whose apex sits at `p = 1`.
//! The scattered formation draws points from a solid ball.
//!
//! Random generators take any [`rand::Rng`] so callers can inject a seeded
//! source; see [`seeded_rng`].

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Golden angle in degrees, used for low-discrepancy spiral placement.
pub const GOLDEN_ANGLE_DEG: f32 = 137.5;

/// Reproducible random source for batch construction.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Point on a cone's lateral surface.
///
/// `p` is the normalized height (0 = base, 1 = apex) and is clamped to
/// [0, 1]; a non-finite `p` is treated as the base. `angle_deg` is any angle
/// in degrees and is reduced mod 360.
#[must_use]
pub fn cone_point(height: f32, radius: f32, p: f32, angle_deg: f32) -> Vec3 {
    let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
    let angle = if angle_deg.is_finite() {
        angle_deg.rem_euclid(360.0).to_radians()
    } else {
        0.0
    };
    let r = radius * (1.0 - p);
    Vec3::new(r * angle.cos(), height * p, r * angle.sin())
}

/// Uniformly distributed point inside a ball of the given radius.
///
/// The direction is uniform on the unit sphere (uniform `z`, uniform
/// azimuth) and the distance uses a cube root so density is uniform by
/// volume. A non-positive radius yields the origin.
pub fn random_sphere_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    if radius <= 0.0 || !radius.is_finite() {
        return Vec3::ZERO;
    }
    random_unit_vector(rng) * radius * rng.random::<f32>().cbrt()
}

/// Uniformly distributed unit vector.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let theta: f32 = rng.random_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * theta.cos(), ring * theta.sin(), z)
}

/// Unit vector pointing away from the vertical axis through `v`.
///
/// Zero for points on the axis.
#[must_use]
pub fn horizontal_direction(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Outline of a star polygon with `points` tips, alternating between the
/// outer and inner radius.
///
/// The first vertex is the tip pointing along +Y; vertices proceed
/// counter-clockwise. Returns `2 * points` vertices, empty for zero points.
#[must_use]
pub fn star_outline(points: u32, outer: f32, inner: f32) -> Vec<Vec2> {
    let n = points * 2;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = i as f32 / n as f32 * TAU + PI / 2.0;
            Vec2::new(a.cos() * r, a.sin() * r)
        })
        .collect()
}
