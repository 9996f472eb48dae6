use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ornament batch generation. Per-category constants live in
/// [`CategoryProfile`](crate::ornaments::CategoryProfile).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ornaments", inline)]
#[serde(default)]
pub struct OrnamentOptions {
    /// Base count the per-category ratios are applied to.
    #[schemars(title = "Base Count", range(min = 0, max = 5000), extend("step" = 50))]
    pub base_count: u32,
    /// Height of the target cone.
    #[schemars(skip)]
    pub cone_height: f32,
    /// Vertical shift applied to every tree position.
    #[schemars(skip)]
    pub vertical_offset: f32,
}

impl Default for OrnamentOptions {
    fn default() -> Self {
        Self {
            base_count: 600,
            cone_height: 14.0,
            vertical_offset: -2.0,
        }
    }
}
