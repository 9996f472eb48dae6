//! Per-instance ornament animation.
//!
//! All three ornament categories share one update: blend the two formation
//! positions by eased progress, add weight-dependent idle motion, then
//! apply the category's [`MotionProfile`] to rotation and scale.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::ornaments::OrnamentInstance;

/// Vertical amplitude multiplier of the scattered float.
const SCATTER_FLOAT_GAIN: f32 = 3.0;
/// Amplitude of the settled breathe.
const TREE_BREATHE_AMPLITUDE: f32 = 0.05;
/// Frequency of the settled breathe.
const TREE_BREATHE_FREQ: f32 = 0.5;

/// Rotation and scale rule for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionProfile {
    /// Spin on all axes, fast when scattered and slower on the tree.
    Tumble,
    /// Like [`Tumble`](Self::Tumble), but pitch and roll fade out with
    /// progress so the instance stands upright on the tree.
    Upright,
    /// No rotation; scale flickers in [0.6, 1.0] of the base scale.
    Flicker,
}

impl MotionProfile {
    /// Transform for `instance` at eased progress `eased` and elapsed
    /// `time` seconds.
    #[must_use]
    pub fn animate(
        self,
        instance: &OrnamentInstance,
        eased: f32,
        time: f32,
    ) -> InstanceTransform {
        let position = instance.scatter_pos.lerp(instance.target_pos, eased)
            + idle_offset(instance.weight, instance.phase, eased, time);

        let (rotation, scale) = match self {
            MotionProfile::Tumble => {
                (spin(instance.rotation_speed, eased, time), instance.scale)
            }
            MotionProfile::Upright => {
                let mut r = spin(instance.rotation_speed, eased, time);
                r.x *= 1.0 - eased;
                r.z *= 1.0 - eased;
                (r, instance.scale)
            }
            MotionProfile::Flicker => {
                (Vec3::ZERO, instance.scale * flicker(time, instance.phase))
            }
        };

        InstanceTransform {
            position,
            rotation,
            scale,
        }
    }
}

/// Position, XYZ Euler rotation (radians) and uniform scale of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstanceTransform {
    /// World position.
    pub position: Vec3,
    /// Intrinsic X-then-Y-then-Z Euler angles in radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl InstanceTransform {
    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}

/// GPU instance record: model matrix and RGBA tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// xyz = RGB tint, w = 1.0
    pub color: [f32; 4],
}

impl InstanceRaw {
    /// Pack a transform and tint.
    #[must_use]
    pub fn new(transform: &InstanceTransform, color: [f32; 3]) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }
}

/// Idle motion blended between the chaotic scattered float and the gentle
/// settled breathe.
///
/// Lighter instances float with larger amplitude and higher frequency; the
/// float fades as `1 - eased` and the breathe grows as `eased`.
#[must_use]
pub fn idle_offset(weight: f32, phase: f32, eased: f32, time: f32) -> Vec3 {
    let lightness = 1.0 - weight;
    let amplitude = lightness * 0.5 + 0.1;
    let frequency = lightness + 0.5;
    let scattered = 1.0 - eased;

    let float_y = (time * frequency + phase).sin()
        * amplitude
        * SCATTER_FLOAT_GAIN
        * scattered;
    let breathe_y = (time * TREE_BREATHE_FREQ + phase).cos()
        * TREE_BREATHE_AMPLITUDE
        * eased;
    let float_x =
        (time * frequency * 0.5 + phase).cos() * amplitude * scattered;

    Vec3::new(float_x, float_y + breathe_y, 0.0)
}

/// Flicker factor in [0.6, 1.0].
#[inline]
#[must_use]
pub fn flicker(time: f32, phase: f32) -> f32 {
    (time * 3.0 + phase).sin() * 0.2 + 0.8
}

/// Spin angles: fast (x2) when scattered, slowing to x1 on the tree.
#[inline]
fn spin(rate: Vec3, eased: f32, time: f32) -> Vec3 {
    rate * time * (2.0 - eased)
}

/// Transform for `instance` using its category's motion profile.
#[must_use]
pub fn animate_instance(
    instance: &OrnamentInstance,
    eased: f32,
    time: f32,
) -> InstanceTransform {
    instance.category.motion().animate(instance, eased, time)
}

/// Animate a whole batch into `out`.
///
/// Writes `min(out.len(), instances.len())` records and allocates nothing.
pub fn write_instances(
    instances: &[OrnamentInstance],
    eased: f32,
    time: f32,
    out: &mut [InstanceRaw],
) {
    for (slot, instance) in out.iter_mut().zip(instances) {
        let transform = animate_instance(instance, eased, time);
        *slot = InstanceRaw::new(&transform, instance.color.to_array());
    }
}
