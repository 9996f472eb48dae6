//! Shared utilities: easing curves, colors and frame timing.

pub mod color;
pub mod easing;
pub mod frame_timing;
