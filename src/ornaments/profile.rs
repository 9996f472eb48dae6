//! Per-category generation profiles.
//!
//! Each ornament category is described by a [`CategoryProfile`]: how many
//! instances it gets relative to the base count, where on the cone they
//! sit, how far they scatter, how big they are, how they spin and which
//! palette colors them. The builder in the parent module is one loop over
//! these profiles.

use glam::Vec3;
use rand::Rng;

use crate::animation::MotionProfile;
use crate::geometry::GOLDEN_ANGLE_DEG;
use crate::util::color::Rgb;

/// The three ornament populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrnamentCategory {
    /// Gift boxes: few, large, bottom-heavy, kept upright on the tree.
    Heavy,
    /// Baubles: many, medium size, evenly spaced.
    Medium,
    /// Lights: most numerous, small, diffuse, flickering.
    Light,
}

impl OrnamentCategory {
    /// All categories in build order.
    pub const ALL: [OrnamentCategory; 3] = [
        OrnamentCategory::Heavy,
        OrnamentCategory::Medium,
        OrnamentCategory::Light,
    ];

    /// Generation profile for this category.
    #[must_use]
    pub fn profile(self) -> &'static CategoryProfile {
        match self {
            OrnamentCategory::Heavy => &HEAVY,
            OrnamentCategory::Medium => &MEDIUM,
            OrnamentCategory::Light => &LIGHT,
        }
    }

    /// Per-frame motion rule for this category.
    #[must_use]
    pub fn motion(self) -> MotionProfile {
        match self {
            OrnamentCategory::Heavy => MotionProfile::Upright,
            OrnamentCategory::Medium => MotionProfile::Tumble,
            OrnamentCategory::Light => MotionProfile::Flicker,
        }
    }

    /// Mesh the renderer draws for this category.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OrnamentCategory::Heavy => "box",
            OrnamentCategory::Medium => "sphere",
            OrnamentCategory::Light => "star",
        }
    }

    /// Instance count for a base count: `floor(base * ratio)`, exact in
    /// integer arithmetic.
    #[must_use]
    pub fn count_for(self, base_count: u32) -> usize {
        (u64::from(base_count) * u64::from(self.profile().count_percent)
            / 100) as usize
    }
}

/// How the normalized cone height `p` is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightLaw {
    /// `u^2 * scale + offset`: concentrates items near the base.
    SquaredSkew {
        /// Span of the skewed range.
        scale: f32,
        /// Lowest `p`.
        offset: f32,
    },
    /// `index / count`: even spacing up the cone.
    Even,
    /// `u`: uniformly random height.
    Uniform,
}

impl HeightLaw {
    /// Sample `p` for instance `index` of `count`.
    pub fn sample<R: Rng + ?Sized>(
        self,
        index: usize,
        count: usize,
        rng: &mut R,
    ) -> f32 {
        match self {
            HeightLaw::SquaredSkew { scale, offset } => {
                let u = rng.random::<f32>();
                u * u * scale + offset
            }
            HeightLaw::Even => index as f32 / count.max(1) as f32,
            HeightLaw::Uniform => rng.random::<f32>(),
        }
    }
}

/// How the angular position around the cone is chosen (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleLaw {
    /// `index * golden_angle + offset`.
    GoldenSpiral {
        /// Constant angular offset in degrees.
        offset_deg: f32,
    },
    /// Uniform in [0, 360).
    Uniform,
}

impl AngleLaw {
    /// Sample the angle for instance `index`.
    pub fn sample<R: Rng + ?Sized>(self, index: usize, rng: &mut R) -> f32 {
        match self {
            AngleLaw::GoldenSpiral { offset_deg } => {
                index as f32 * GOLDEN_ANGLE_DEG + offset_deg
            }
            AngleLaw::Uniform => rng.random_range(0.0..360.0),
        }
    }
}

/// Outward offset from the cone surface, along the horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadialPush {
    /// Same offset for every instance.
    Fixed(f32),
    /// Uniform in `[min, max)`; negative values sink into the foliage.
    Range {
        /// Smallest offset.
        min: f32,
        /// Largest offset (exclusive).
        max: f32,
    },
}

impl RadialPush {
    /// Sample the offset.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        match self {
            RadialPush::Fixed(d) => d,
            RadialPush::Range { min, max } => {
                min + rng.random::<f32>() * (max - min)
            }
        }
    }
}

/// A palette entry picked when the draw exceeds `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteBand {
    /// Lower bound of the draw for this band.
    pub threshold: f32,
    /// Packed `0xRRGGBB` color.
    pub color: u32,
}

/// How an instance color is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// Discrete weighted bands, ordered by ascending threshold. The last
    /// band whose threshold the draw exceeds wins; the first band is the
    /// fallback.
    Bands(&'static [PaletteBand]),
    /// Continuous HSL hue in `[base, base + spread)`.
    WarmHue {
        /// Lowest hue.
        base: f32,
        /// Hue range.
        spread: f32,
        /// HSL saturation.
        saturation: f32,
        /// HSL lightness.
        lightness: f32,
    },
}

impl Palette {
    /// Sample a color.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Rgb {
        let u = rng.random::<f32>();
        match self {
            Palette::Bands(bands) => bands
                .iter()
                .rev()
                .find(|band| u > band.threshold)
                .or_else(|| bands.first())
                .map_or(Rgb::WHITE, |band| Rgb::from_hex(band.color)),
            Palette::WarmHue {
                base,
                spread,
                saturation,
                lightness,
            } => Rgb::from_hsl(base + u * spread, saturation, lightness),
        }
    }
}

/// Static description of one ornament category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    /// Instances per 100 base count.
    pub count_percent: u32,
    /// Fixed weight in [0, 1]; lower floats more.
    pub weight: f32,
    /// Height distribution on the cone.
    pub height: HeightLaw,
    /// Angular distribution around the cone.
    pub angle: AngleLaw,
    /// Cone base radius for this category.
    pub cone_radius: f32,
    /// Offset off the cone surface.
    pub radial_push: RadialPush,
    /// Radius of the scatter ball.
    pub scatter_radius: f32,
    /// Smallest base scale.
    pub scale_min: f32,
    /// Base scale range above `scale_min`.
    pub scale_range: f32,
    /// Per-axis maximum spin rate (rad/s); each axis is uniform in
    /// `[0, max)`.
    pub spin_max: Vec3,
    /// Color palette.
    pub palette: Palette,
}

impl CategoryProfile {
    /// Count ratio as a fraction of the base count.
    #[must_use]
    pub fn count_ratio(&self) -> f32 {
        self.count_percent as f32 / 100.0
    }

    /// Sample a base scale.
    pub fn sample_scale<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random::<f32>() * self.scale_range + self.scale_min
    }

    /// Sample a spin rate vector.
    pub fn sample_spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        if self.spin_max == Vec3::ZERO {
            return Vec3::ZERO;
        }
        Vec3::new(rng.random(), rng.random(), rng.random()) * self.spin_max
    }
}

const EMERALD: u32 = 0x0f_4a_28;
const DEEP_RED: u32 = 0x8b_00_00;
const ANTIQUE_GOLD: u32 = 0xd4_af_37;
const GOLD: u32 = 0xff_d7_00;
const SILVER: u32 = 0xb0_b0_b0;
const BRIGHT_RED: u32 = 0xff_33_33;

const HEAVY_BANDS: [PaletteBand; 3] = [
    PaletteBand {
        threshold: 0.0,
        color: EMERALD,
    },
    PaletteBand {
        threshold: 0.6,
        color: DEEP_RED,
    },
    PaletteBand {
        threshold: 0.85,
        color: ANTIQUE_GOLD,
    },
];

const MEDIUM_BANDS: [PaletteBand; 3] = [
    PaletteBand {
        threshold: 0.0,
        color: GOLD,
    },
    PaletteBand {
        threshold: 0.5,
        color: SILVER,
    },
    PaletteBand {
        threshold: 0.8,
        color: BRIGHT_RED,
    },
];

/// Gift boxes.
pub const HEAVY: CategoryProfile = CategoryProfile {
    count_percent: 15,
    weight: 1.0,
    height: HeightLaw::SquaredSkew {
        scale: 0.6,
        offset: 0.05,
    },
    angle: AngleLaw::GoldenSpiral { offset_deg: 0.0 },
    cone_radius: 6.0,
    radial_push: RadialPush::Fixed(0.9),
    scatter_radius: 12.0,
    scale_min: 0.4,
    scale_range: 0.5,
    spin_max: Vec3::new(0.5, 0.5, 0.5),
    palette: Palette::Bands(&HEAVY_BANDS),
};

/// Baubles.
pub const MEDIUM: CategoryProfile = CategoryProfile {
    count_percent: 50,
    weight: 0.5,
    height: HeightLaw::Even,
    angle: AngleLaw::GoldenSpiral { offset_deg: 45.0 },
    cone_radius: 5.2,
    radial_push: RadialPush::Fixed(0.4),
    scatter_radius: 22.0,
    scale_min: 0.2,
    scale_range: 0.25,
    spin_max: Vec3::new(1.0, 1.0, 0.0),
    palette: Palette::Bands(&MEDIUM_BANDS),
};

/// Lights.
pub const LIGHT: CategoryProfile = CategoryProfile {
    count_percent: 120,
    weight: 0.1,
    height: HeightLaw::Uniform,
    angle: AngleLaw::Uniform,
    cone_radius: 5.8,
    radial_push: RadialPush::Range {
        min: -0.2,
        max: 0.4,
    },
    scatter_radius: 30.0,
    scale_min: 0.05,
    scale_range: 0.15,
    spin_max: Vec3::ZERO,
    palette: Palette::WarmHue {
        base: 0.1,
        spread: 0.05,
        saturation: 1.0,
        lightness: 0.6,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::seeded_rng;

    #[test]
    fn test_count_for() {
        assert_eq!(OrnamentCategory::Heavy.count_for(1000), 150);
        assert_eq!(OrnamentCategory::Medium.count_for(1000), 500);
        assert_eq!(OrnamentCategory::Light.count_for(1000), 1200);
        // floor, not round
        assert_eq!(OrnamentCategory::Heavy.count_for(13), 1);
        assert_eq!(OrnamentCategory::Light.count_for(0), 0);
        assert_eq!(HEAVY.count_ratio(), 0.15);
        assert_eq!(LIGHT.count_ratio(), 1.2);
    }

    #[test]
    fn test_weights_are_fixed_per_category() {
        assert_eq!(OrnamentCategory::Heavy.profile().weight, 1.0);
        assert_eq!(OrnamentCategory::Medium.profile().weight, 0.5);
        assert_eq!(OrnamentCategory::Light.profile().weight, 0.1);
    }

    #[test]
    fn test_squared_skew_stays_low() {
        let mut rng = seeded_rng(4);
        let law = HEAVY.height;
        let samples: Vec<f32> =
            (0..5000).map(|i| law.sample(i, 5000, &mut rng)).collect();
        assert!(samples.iter().all(|p| (0.05..=0.65).contains(p)));
        // u^2 puts the median at 0.25 * 0.6 + 0.05 = 0.2
        let below = samples.iter().filter(|&&p| p < 0.2).count();
        let frac = below as f32 / samples.len() as f32;
        assert!((frac - 0.5).abs() < 0.03, "median drift {frac}");
    }

    #[test]
    fn test_even_height_law() {
        let mut rng = seeded_rng(0);
        assert_eq!(HeightLaw::Even.sample(0, 4, &mut rng), 0.0);
        assert_eq!(HeightLaw::Even.sample(3, 4, &mut rng), 0.75);
    }

    #[test]
    fn test_band_palette_frequencies() {
        let mut rng = seeded_rng(8);
        let n = 20_000;
        let (mut emerald, mut red, mut gold) = (0, 0, 0);
        for _ in 0..n {
            let c = HEAVY.palette.sample(&mut rng);
            if c == Rgb::from_hex(EMERALD) {
                emerald += 1;
            } else if c == Rgb::from_hex(DEEP_RED) {
                red += 1;
            } else if c == Rgb::from_hex(ANTIQUE_GOLD) {
                gold += 1;
            }
        }
        assert_eq!(emerald + red + gold, n);
        let frac = |k: i32| k as f32 / n as f32;
        assert!((frac(emerald) - 0.6).abs() < 0.02);
        assert!((frac(red) - 0.25).abs() < 0.02);
        assert!((frac(gold) - 0.15).abs() < 0.02);
    }

    #[test]
    fn test_warm_hue_palette() {
        let mut rng = seeded_rng(9);
        for _ in 0..500 {
            let c = LIGHT.palette.sample(&mut rng);
            // Hue 0.10..0.15 at lightness 0.6: red saturated, blue floor.
            assert!((c.r - 1.0).abs() < 1e-5);
            assert!((c.b - 0.2).abs() < 1e-5);
            assert!(c.g >= 0.2 && c.g < 1.0);
        }
    }

    #[test]
    fn test_spin_respects_max() {
        let mut rng = seeded_rng(10);
        for _ in 0..500 {
            let s = MEDIUM.sample_spin(&mut rng);
            assert_eq!(s.z, 0.0);
            assert!(s.x >= 0.0 && s.x < 1.0);
        }
        assert_eq!(LIGHT.sample_spin(&mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_motion_rules() {
        assert_eq!(OrnamentCategory::Heavy.motion(), MotionProfile::Upright);
        assert_eq!(OrnamentCategory::Medium.motion(), MotionProfile::Tumble);
        assert_eq!(OrnamentCategory::Light.motion(), MotionProfile::Flicker);
    }
}
