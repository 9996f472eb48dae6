//! Ornament instance data.
//!
//! [`OrnamentBatches::build`] generates, once per configuration, the
//! per-instance records for the three ornament categories. Every record
//! carries both formations (scatter and tree positions) plus the constants
//! the per-frame animator needs (scale, spin, weight, phase).

mod profile;

use glam::Vec3;
use rand::Rng;

pub use profile::{
    AngleLaw, CategoryProfile, HeightLaw, OrnamentCategory, Palette,
    PaletteBand, RadialPush, HEAVY, LIGHT, MEDIUM,
};

use crate::geometry::{cone_point, horizontal_direction, random_sphere_point};
use crate::options::OrnamentOptions;
use crate::util::color::Rgb;

/// Upper bound of the per-instance random phase.
const PHASE_RANGE: f32 = 100.0;

/// One ornament with both of its formation positions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrnamentInstance {
    /// Index within its category batch.
    pub id: u32,
    /// Category this instance belongs to.
    pub category: OrnamentCategory,
    /// Position in the scattered cloud.
    pub scatter_pos: Vec3,
    /// Position on the tree.
    pub target_pos: Vec3,
    /// Base uniform scale.
    pub scale: f32,
    /// Instance tint.
    pub color: Rgb,
    /// Per-axis spin rate in rad/s.
    pub rotation_speed: Vec3,
    /// Fixed per-category weight; lower floats more.
    pub weight: f32,
    /// Random animation phase in [0, 100).
    pub phase: f32,
}

/// The three ornament batches for one configuration.
#[derive(Debug, Clone, Default)]
pub struct OrnamentBatches {
    /// Gift boxes.
    pub heavy: Vec<OrnamentInstance>,
    /// Baubles.
    pub medium: Vec<OrnamentInstance>,
    /// Lights.
    pub light: Vec<OrnamentInstance>,
}

impl OrnamentBatches {
    /// Generate all three batches for `base_count`.
    ///
    /// Batch sizes are `floor(base_count * ratio)` with the per-category
    /// ratios; a zero base count gives three empty batches.
    pub fn build<R: Rng + ?Sized>(
        base_count: u32,
        options: &OrnamentOptions,
        rng: &mut R,
    ) -> Self {
        let batches = Self {
            heavy: build_batch(OrnamentCategory::Heavy, base_count, options, rng),
            medium: build_batch(
                OrnamentCategory::Medium,
                base_count,
                options,
                rng,
            ),
            light: build_batch(OrnamentCategory::Light, base_count, options, rng),
        };
        for category in OrnamentCategory::ALL {
            log::debug!(
                "built {} {} ornaments",
                batches.get(category).len(),
                category.name()
            );
        }
        batches
    }

    /// Instances of one category.
    #[must_use]
    pub fn get(&self, category: OrnamentCategory) -> &[OrnamentInstance] {
        match category {
            OrnamentCategory::Heavy => &self.heavy,
            OrnamentCategory::Medium => &self.medium,
            OrnamentCategory::Light => &self.light,
        }
    }

    /// Total instances across all categories.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.heavy.len() + self.medium.len() + self.light.len()
    }

    /// Whether every batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

/// Generate the batch for one category.
fn build_batch<R: Rng + ?Sized>(
    category: OrnamentCategory,
    base_count: u32,
    options: &OrnamentOptions,
    rng: &mut R,
) -> Vec<OrnamentInstance> {
    let profile = category.profile();
    let count = category.count_for(base_count);

    (0..count)
        .map(|i| {
            let p = profile.height.sample(i, count, rng);
            let angle = profile.angle.sample(i, rng);

            let mut target =
                cone_point(options.cone_height, profile.cone_radius, p, angle);
            target.y += options.vertical_offset;
            target += horizontal_direction(target)
                * profile.radial_push.sample(rng);

            OrnamentInstance {
                id: i as u32,
                category,
                scatter_pos: random_sphere_point(rng, profile.scatter_radius),
                target_pos: target,
                color: profile.palette.sample(rng),
                scale: profile.sample_scale(rng),
                rotation_speed: profile.sample_spin(rng),
                weight: profile.weight,
                phase: rng.random::<f32>() * PHASE_RANGE,
            }
        })
        .collect()
}

/// Generate the ornament batches for `base_count` with the default cone
/// geometry.
pub fn build_ornament_batches<R: Rng + ?Sized>(
    base_count: u32,
    rng: &mut R,
) -> OrnamentBatches {
    OrnamentBatches::build(base_count, &OrnamentOptions::default(), rng)
}
