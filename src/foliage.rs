//! Foliage particle field.
//!
//! [`ParticleSet`] precomputes, once per configuration, a scatter position,
//! a tree position and a random scalar per particle. The per-frame display
//! evaluation ([`ParticleSet::write_vertices`]) is a CPU rendition of what a
//! point-sprite shader does with those attributes: staggered arrival,
//! breathing and twinkle.

use glam::Vec3;
use rand::Rng;

use crate::geometry::{cone_point, random_sphere_point, GOLDEN_ANGLE_DEG};
use crate::options::FoliageOptions;
use crate::util::color::Rgb;
use crate::util::easing::{ease_out_cubic, smoothstep};

/// Global progress is stretched by this factor before the per-particle
/// delay is subtracted, so every particle still arrives at progress 1.
const STAGGER_STRETCH: f32 = 1.2;
/// Largest per-particle arrival delay (for `random -> 1`).
const STAGGER_DELAY: f32 = 0.2;
/// Radial breathing amplitude.
const BREATHE_AMPLITUDE: f32 = 0.05;
/// Brightness above which the bloom boost kicks in.
const BLOOM_THRESHOLD: f32 = 0.8;
/// Additive highlight for bright particles.
const BLOOM_BOOST: Rgb = Rgb::new(0.5, 0.4, 0.2);

/// Per-particle vertex written every frame for the point renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    /// Displayed position.
    pub position: [f32; 3],
    /// Base point size before perspective attenuation.
    pub size: f32,
    /// Displayed color (may exceed 1.0 when boosted).
    pub color: [f32; 3],
    /// Twinkle brightness in [0, 1].
    pub brightness: f32,
}

/// Immutable foliage attributes for a fixed particle count.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    /// Positions in the scattered cloud.
    pub scatter_positions: Vec<Vec3>,
    /// Positions on (and around) the cone.
    pub target_positions: Vec<Vec3>,
    /// Per-particle random in [0, 1), drives stagger, breathing and twinkle.
    pub randoms: Vec<f32>,
}

impl ParticleSet {
    /// Generate the field described by `options`.
    ///
    /// Tree positions follow a golden-angle spiral up the cone, thickened
    /// into a shell by uniform per-axis jitter. A zero count gives an empty
    /// set.
    pub fn build<R: Rng + ?Sized>(options: &FoliageOptions, rng: &mut R) -> Self {
        let count = options.count as usize;
        let mut set = Self {
            scatter_positions: Vec::with_capacity(count),
            target_positions: Vec::with_capacity(count),
            randoms: Vec::with_capacity(count),
        };

        for i in 0..count {
            let p = i as f32 / count as f32;
            let angle = i as f32 * GOLDEN_ANGLE_DEG;

            let mut target = cone_point(
                options.cone_height,
                options.cone_radius,
                p,
                angle,
            );
            target += jitter(rng, options.jitter);
            target.y += options.vertical_offset;

            set.target_positions.push(target);
            set.scatter_positions
                .push(random_sphere_point(rng, options.scatter_radius));
            set.randoms.push(rng.random::<f32>());
        }

        log::debug!("built foliage field: {count} particles");
        set
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.randoms.len()
    }

    /// Whether the set holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.randoms.is_empty()
    }

    /// Displayed position of particle `index` at the given eased progress
    /// and elapsed time, or `None` if out of range.
    #[must_use]
    pub fn display_position(
        &self,
        index: usize,
        eased: f32,
        time: f32,
    ) -> Option<Vec3> {
        let random = *self.randoms.get(index)?;
        let scatter = *self.scatter_positions.get(index)?;
        let target = *self.target_positions.get(index)?;
        Some(particle_position(scatter, target, random, eased, time))
    }

    /// Evaluate every particle into `out`.
    ///
    /// Writes `min(out.len(), self.len())` vertices and allocates nothing.
    pub fn write_vertices(
        &self,
        eased: f32,
        time: f32,
        primary: Rgb,
        secondary: Rgb,
        out: &mut [ParticleVertex],
    ) {
        let attributes = self
            .scatter_positions
            .iter()
            .zip(&self.target_positions)
            .zip(&self.randoms);
        for (vertex, ((&scatter, &target), &random)) in
            out.iter_mut().zip(attributes)
        {
            let brightness = twinkle_brightness(random, time);
            *vertex = ParticleVertex {
                position: particle_position(
                    scatter, target, random, eased, time,
                )
                .to_array(),
                size: point_size(random),
                color: particle_color(primary, secondary, brightness)
                    .to_array(),
                brightness,
            };
        }
    }
}

/// Uniform jitter in `[-amount, amount)` on each axis. Zero for
/// non-positive or non-finite amounts.
fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> Vec3 {
    if !amount.is_finite() || amount <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.random_range(-amount..amount),
        rng.random_range(-amount..amount),
        rng.random_range(-amount..amount),
    )
}

/// Per-particle arrival progress.
///
/// Higher randoms lag behind, so the tree assembles rather than snapping.
#[inline]
#[must_use]
pub fn local_progress(eased: f32, random: f32) -> f32 {
    ease_out_cubic(eased * STAGGER_STRETCH - random * STAGGER_DELAY)
}

/// Displayed particle position: staggered blend plus radial breathing.
#[must_use]
pub fn particle_position(
    scatter: Vec3,
    target: Vec3,
    random: f32,
    eased: f32,
    time: f32,
) -> Vec3 {
    let pos = scatter.lerp(target, local_progress(eased, random));
    let breathe = (time * 2.0 + random * 10.0).sin() * BREATHE_AMPLITUDE;
    pos + pos.normalize_or_zero() * breathe
}

/// Twinkle brightness in [0, 1], independent of position.
#[inline]
#[must_use]
pub fn twinkle_brightness(random: f32, time: f32) -> f32 {
    smoothstep(0.0, 1.0, (time * 3.0 + random * 20.0).sin())
}

/// Particle color for a twinkle brightness, with bloom boost for the
/// brightest particles.
#[must_use]
pub fn particle_color(primary: Rgb, secondary: Rgb, brightness: f32) -> Rgb {
    let base = primary.lerp(secondary, brightness * 0.5 + 0.2);
    if brightness > BLOOM_THRESHOLD {
        Rgb::from(Vec3::from(base) + Vec3::from(BLOOM_BOOST))
    } else {
        base
    }
}

/// Base point size before perspective attenuation.
#[inline]
#[must_use]
pub fn point_size(random: f32) -> f32 {
    4.0 * random + 2.0
}

/// Build a particle field of `count` particles with the default cone and
/// scatter geometry.
pub fn build_particle_field<R: Rng + ?Sized>(
    count: u32,
    rng: &mut R,
) -> ParticleSet {
    let options = FoliageOptions {
        count,
        ..FoliageOptions::default()
    };
    ParticleSet::build(&options, rng)
}
