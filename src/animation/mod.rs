//! Formation transitions and per-frame entity motion.
//!
//! [`TransitionState`] turns a discrete [`FormationState`] into a smoothed
//! progress value; [`animate_instance`] and [`AccentEntity`] turn that
//! progress into transforms.

pub mod accent;
mod instance;
mod progress;

pub use accent::AccentEntity;
pub use instance::{
    animate_instance, flicker, idle_offset, write_instances, InstanceRaw,
    InstanceTransform, MotionProfile,
};
pub use progress::{
    blend_factor, FormationState, TransitionState, MAX_FRAME_DELTA,
    REFERENCE_FPS,
};
