use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The tree topper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Accent", inline)]
#[serde(default)]
pub struct AccentOptions {
    /// Gap between the tallest cone apex and the topper on the tree.
    #[schemars(title = "Clearance", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub clearance: f32,
    /// Radius of the ball the scattered position is drawn from.
    #[schemars(title = "Scatter Radius", range(min = 0.0, max = 40.0), extend("step" = 0.5))]
    pub scatter_radius: f32,
    /// Free tumble rates in rad/s, per axis.
    #[schemars(skip)]
    pub tumble_rates: [f32; 3],
    /// Smoothed progress past which the topper starts to settle.
    #[schemars(skip)]
    pub settle_threshold: f32,
    /// Per-reference-frame decay of the rotation while settling.
    #[schemars(skip)]
    pub settle_rate: f32,
    /// Constant uniform scale.
    #[schemars(title = "Scale", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub scale: f32,
}

impl Default for AccentOptions {
    fn default() -> Self {
        Self {
            clearance: 0.5,
            scatter_radius: 25.0,
            tumble_rates: [0.5, 0.3, 0.1],
            settle_threshold: 0.8,
            settle_rate: 0.1,
            scale: 1.0,
        }
    }
}
