use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Rgb;

/// Emerald.
const PRIMARY_HEX: u32 = 0x0f4a28;
/// Gold.
const SECONDARY_HEX: u32 = 0xd4af37;

/// Particle field generation and tinting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Foliage", inline)]
#[serde(default)]
pub struct FoliageOptions {
    /// Number of particles.
    #[schemars(title = "Particles", range(min = 0, max = 50000), extend("step" = 500))]
    pub count: u32,
    /// Height of the target cone.
    #[schemars(skip)]
    pub cone_height: f32,
    /// Base radius of the target cone.
    #[schemars(title = "Cone Radius", range(min = 1.0, max = 10.0), extend("step" = 0.1))]
    pub cone_radius: f32,
    /// Per-axis uniform jitter applied to tree positions.
    #[schemars(title = "Jitter", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub jitter: f32,
    /// Vertical shift applied to every tree position.
    #[schemars(skip)]
    pub vertical_offset: f32,
    /// Radius of the scattered ball.
    #[schemars(title = "Scatter Radius", range(min = 1.0, max = 40.0), extend("step" = 0.5))]
    pub scatter_radius: f32,
    /// Dim foliage tint.
    #[schemars(skip)]
    pub primary_color: [f32; 3],
    /// Twinkle highlight tint.
    #[schemars(skip)]
    pub secondary_color: [f32; 3],
}

impl FoliageOptions {
    /// Primary tint as [`Rgb`].
    #[must_use]
    pub fn primary(&self) -> Rgb {
        Rgb::from(self.primary_color)
    }

    /// Secondary tint as [`Rgb`].
    #[must_use]
    pub fn secondary(&self) -> Rgb {
        Rgb::from(self.secondary_color)
    }

    /// Whether switching from `self` to `other` changes generated
    /// positions (as opposed to only tints).
    #[must_use]
    pub fn affects_generation(&self, other: &Self) -> bool {
        self.count != other.count
            || self.cone_height != other.cone_height
            || self.cone_radius != other.cone_radius
            || self.jitter != other.jitter
            || self.vertical_offset != other.vertical_offset
            || self.scatter_radius != other.scatter_radius
    }
}

impl Default for FoliageOptions {
    fn default() -> Self {
        Self {
            count: 12_000,
            cone_height: 14.0,
            cone_radius: 5.5,
            jitter: 0.25,
            vertical_offset: -2.0,
            scatter_radius: 18.0,
            primary_color: Rgb::from_hex(PRIMARY_HEX).to_array(),
            secondary_color: Rgb::from_hex(SECONDARY_HEX).to_array(),
        }
    }
}
