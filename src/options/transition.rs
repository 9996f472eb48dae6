use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Smoothing rates and easing shared by every formation transition.
///
/// Rates are the fraction of the remaining distance covered per 60 Hz
/// reference frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transition", inline)]
#[serde(default)]
pub struct TransitionOptions {
    /// Easing applied to smoothed progress before positions are blended.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Blend rate of the particle field.
    #[schemars(title = "Foliage Rate", range(min = 0.005, max = 0.5), extend("step" = 0.005))]
    pub foliage_rate: f32,
    /// Blend rate of all ornament batches.
    #[schemars(title = "Ornament Rate", range(min = 0.005, max = 0.5), extend("step" = 0.005))]
    pub ornament_rate: f32,
    /// Blend rate of the accent entity.
    #[schemars(title = "Accent Rate", range(min = 0.005, max = 0.5), extend("step" = 0.005))]
    pub accent_rate: f32,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            easing: EasingFunction::DEFAULT,
            foliage_rate: 0.05,
            ornament_rate: 0.03,
            accent_rate: 0.04,
        }
    }
}
