//! The whole tree: foliage, ornaments and topper driven together.
//!
//! [`TreeScene`] owns the generated data, one [`TransitionState`] per
//! driver, and the per-frame output buffers. Buffers are sized when the
//! scene is built (or rebuilt by [`TreeScene::set_options`]), so
//! [`TreeScene::advance`] never allocates.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::accent::{accent_outline, ACCENT_COLOR};
use crate::animation::{
    write_instances, AccentEntity, FormationState, InstanceRaw,
    InstanceTransform, TransitionState, MAX_FRAME_DELTA,
};
use crate::error::EvergreenError;
use crate::foliage::{ParticleSet, ParticleVertex};
use crate::geometry::seeded_rng;
use crate::options::Options;
use crate::ornaments::{OrnamentBatches, OrnamentCategory};

/// Everything the render submission step needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// One vertex per foliage particle.
    pub particles: Vec<ParticleVertex>,
    /// Heavy (box) instances.
    pub heavy: Vec<InstanceRaw>,
    /// Medium (sphere) instances.
    pub medium: Vec<InstanceRaw>,
    /// Light (star) instances.
    pub light: Vec<InstanceRaw>,
    /// Topper transform.
    pub accent_transform: InstanceTransform,
    /// Topper instance record.
    pub accent: InstanceRaw,
    /// Smoothed foliage progress.
    pub foliage_progress: f32,
    /// Smoothed ornament progress.
    pub ornament_progress: f32,
    /// Smoothed topper progress.
    pub accent_progress: f32,
    /// Animation clock in seconds.
    pub time: f32,
}

impl FrameOutput {
    /// Instance records of one ornament category.
    #[must_use]
    pub fn instances(&self, category: OrnamentCategory) -> &[InstanceRaw] {
        match category {
            OrnamentCategory::Heavy => &self.heavy,
            OrnamentCategory::Medium => &self.medium,
            OrnamentCategory::Light => &self.light,
        }
    }

    fn resize_particles(&mut self, particles: &ParticleSet) {
        self.particles
            .resize(particles.len(), ParticleVertex::default());
    }

    fn resize_instances(&mut self, ornaments: &OrnamentBatches) {
        self.heavy.resize(ornaments.heavy.len(), InstanceRaw::default());
        self.medium.resize(ornaments.medium.len(), InstanceRaw::default());
        self.light.resize(ornaments.light.len(), InstanceRaw::default());
    }
}

/// The animated tree.
#[derive(Debug, Clone)]
pub struct TreeScene {
    options: Options,
    rng: StdRng,
    particles: ParticleSet,
    ornaments: OrnamentBatches,
    accent: AccentEntity,
    accent_outline: Vec<Vec2>,
    foliage_progress: TransitionState,
    ornament_progress: TransitionState,
    state: FormationState,
    elapsed: f32,
    frame: FrameOutput,
}

impl TreeScene {
    /// Build a scattered scene from `options`.
    ///
    /// Generation is reproducible when `options.seed` is set.
    pub fn new(options: Options) -> Result<Self, EvergreenError> {
        options.validate()?;
        let mut rng = options.seed.map_or_else(StdRng::from_os_rng, seeded_rng);

        let particles = ParticleSet::build(&options.foliage, &mut rng);
        let ornaments = OrnamentBatches::build(
            options.ornaments.base_count,
            &options.ornaments,
            &mut rng,
        );
        let accent = AccentEntity::new(
            &options.accent,
            options.apex_height(),
            options.transition.accent_rate,
            &mut rng,
        );

        let mut frame = FrameOutput::default();
        frame.resize_particles(&particles);
        frame.resize_instances(&ornaments);

        log::debug!(
            "built tree scene: {} particles, {} ornaments",
            particles.len(),
            ornaments.total_len()
        );

        let mut scene = Self {
            foliage_progress: TransitionState::new(
                options.transition.foliage_rate,
            ),
            ornament_progress: TransitionState::new(
                options.transition.ornament_rate,
            ),
            options,
            rng,
            particles,
            ornaments,
            accent,
            accent_outline: accent_outline(),
            state: FormationState::Scattered,
            elapsed: 0.0,
            frame,
        };
        scene.write_frame();
        Ok(scene)
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The formation every driver is heading for.
    #[must_use]
    pub fn state(&self) -> FormationState {
        self.state
    }

    /// Head for `state`. Progress continues from wherever it is.
    pub fn set_state(&mut self, state: FormationState) {
        if state != self.state {
            log::debug!("formation -> {}", state.label());
        }
        self.state = state;
        self.foliage_progress.set_state(state);
        self.ornament_progress.set_state(state);
        self.accent.set_state(state);
    }

    /// Head for the other formation and return it.
    pub fn toggle(&mut self) -> FormationState {
        let next = self.state.toggled();
        self.set_state(next);
        next
    }

    /// Advance every driver by `dt` seconds and rewrite the frame buffers.
    pub fn advance(&mut self, dt: f32) -> &FrameOutput {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt.min(MAX_FRAME_DELTA);
        }
        let _ = self.foliage_progress.advance(dt);
        let _ = self.ornament_progress.advance(dt);
        let _ = self.accent.advance(dt, self.options.transition.easing);
        self.write_frame();
        &self.frame
    }

    /// Output of the most recent [`advance`](Self::advance).
    #[must_use]
    pub fn frame(&self) -> &FrameOutput {
        &self.frame
    }

    /// Apply new options.
    ///
    /// Rates, easing and tints take effect immediately. Foliage or
    /// ornaments are regenerated only when an option that shapes them
    /// changed; progress is never reset.
    pub fn set_options(
        &mut self,
        options: Options,
    ) -> Result<(), EvergreenError> {
        options.validate()?;

        if options.foliage.affects_generation(&self.options.foliage) {
            self.particles = ParticleSet::build(&options.foliage, &mut self.rng);
            self.frame.resize_particles(&self.particles);
            log::debug!("rebuilt foliage: {} particles", self.particles.len());
        }
        if options.ornaments != self.options.ornaments {
            self.ornaments = OrnamentBatches::build(
                options.ornaments.base_count,
                &options.ornaments,
                &mut self.rng,
            );
            self.frame.resize_instances(&self.ornaments);
        }

        let t = &options.transition;
        self.foliage_progress.set_rate(t.foliage_rate);
        self.ornament_progress.set_rate(t.ornament_rate);
        self.accent.apply_options(
            &options.accent,
            options.apex_height(),
            t.accent_rate,
            &mut self.rng,
        );

        self.options = options;
        self.write_frame();
        Ok(())
    }

    /// Foliage attributes.
    #[must_use]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Ornament batches.
    #[must_use]
    pub fn ornaments(&self) -> &OrnamentBatches {
        &self.ornaments
    }

    /// Topper driver.
    #[must_use]
    pub fn accent(&self) -> &AccentEntity {
        &self.accent
    }

    /// Topper outline in its local XY plane.
    #[must_use]
    pub fn accent_outline(&self) -> &[Vec2] {
        &self.accent_outline
    }

    /// Foliage transition.
    #[must_use]
    pub fn foliage_transition(&self) -> &TransitionState {
        &self.foliage_progress
    }

    /// Ornament transition.
    #[must_use]
    pub fn ornament_transition(&self) -> &TransitionState {
        &self.ornament_progress
    }

    /// Animation clock in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn write_frame(&mut self) {
        let easing = self.options.transition.easing;
        let time = self.elapsed;
        let foliage = &self.options.foliage;

        self.particles.write_vertices(
            self.foliage_progress.eased(easing),
            time,
            foliage.primary(),
            foliage.secondary(),
            &mut self.frame.particles,
        );

        let eased = self.ornament_progress.eased(easing);
        write_instances(&self.ornaments.heavy, eased, time, &mut self.frame.heavy);
        write_instances(
            &self.ornaments.medium,
            eased,
            time,
            &mut self.frame.medium,
        );
        write_instances(&self.ornaments.light, eased, time, &mut self.frame.light);

        let accent = self.accent.transform(easing);
        self.frame.accent_transform = accent;
        self.frame.accent = InstanceRaw::new(&accent, ACCENT_COLOR.to_array());

        self.frame.foliage_progress = self.foliage_progress.smoothed();
        self.frame.ornament_progress = self.ornament_progress.smoothed();
        self.frame.accent_progress = self.accent.transition().smoothed();
        self.frame.time = time;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::options::{FoliageOptions, OrnamentOptions};

    const DT: f32 = 1.0 / 60.0;

    fn small_options(seed: u64) -> Options {
        Options {
            seed: Some(seed),
            foliage: FoliageOptions {
                count: 300,
                ..FoliageOptions::default()
            },
            ornaments: OrnamentOptions {
                base_count: 40,
                ..OrnamentOptions::default()
            },
            ..Options::default()
        }
    }

    #[test]
    fn buffers_sized_at_build() {
        let scene = TreeScene::new(small_options(1)).unwrap();
        let frame = scene.frame();
        assert_eq!(frame.particles.len(), 300);
        assert_eq!(frame.heavy.len(), 6);
        assert_eq!(frame.medium.len(), 20);
        assert_eq!(frame.light.len(), 48);
        assert_eq!(frame.instances(OrnamentCategory::Light).len(), 48);
        assert_eq!(scene.accent_outline().len(), 10);
        assert_eq!(scene.state(), FormationState::Scattered);
    }

    #[test]
    fn seeded_scenes_are_reproducible() {
        let mut a = TreeScene::new(small_options(5)).unwrap();
        let mut b = TreeScene::new(small_options(5)).unwrap();
        a.set_state(FormationState::TreeShape);
        b.set_state(FormationState::TreeShape);
        for _ in 0..10 {
            let fa = a.advance(DT).clone();
            let fb = b.advance(DT);
            assert_eq!(fa.particles[7].position, fb.particles[7].position);
            assert_eq!(fa.medium[3].model, fb.medium[3].model);
            assert_eq!(fa.accent.model, fb.accent.model);
        }
    }

    #[test]
    fn converges_to_tree_and_back() {
        let mut scene = TreeScene::new(small_options(2)).unwrap();
        assert_eq!(scene.toggle(), FormationState::TreeShape);
        for _ in 0..1500 {
            let _ = scene.advance(DT);
        }
        let frame = scene.frame();
        assert!(frame.foliage_progress > 0.999);
        assert!(frame.ornament_progress > 0.999);
        assert!(frame.accent_progress > 0.999);
        assert_eq!(frame.accent_transform.rotation, Vec3::ZERO);
        assert!(
            (frame.accent_transform.position - scene.accent().tree_position())
                .length()
                < 1e-3
        );
        // Particles sit at their tree position plus the breathing offset.
        let target = scene.particles().target_positions[11];
        let shown = Vec3::from_array(frame.particles[11].position);
        assert!((shown - target).length() <= 0.05 + 1e-3);

        assert_eq!(scene.toggle(), FormationState::Scattered);
        for _ in 0..1500 {
            let _ = scene.advance(DT);
        }
        assert!(scene.frame().ornament_progress < 1e-3);
    }

    #[test]
    fn settled_topper_sits_above_the_tree() {
        let mut options = small_options(1);
        options.foliage.count = 2000;
        options.ornaments.base_count = 600;
        let mut scene = TreeScene::new(options).unwrap();
        scene.set_state(FormationState::TreeShape);
        for _ in 0..2000 {
            let _ = scene.advance(DT);
        }
        let frame = scene.frame();
        let topper_y = frame.accent_transform.position.y;

        let foliage_max = frame
            .particles
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        let ornament_max = OrnamentCategory::ALL
            .iter()
            .flat_map(|&c| frame.instances(c))
            .map(|raw| raw.model[3][1])
            .fold(f32::MIN, f32::max);

        assert!(foliage_max > 11.0, "foliage top {foliage_max}");
        assert!(topper_y >= foliage_max, "{topper_y} < {foliage_max}");
        assert!(topper_y >= ornament_max, "{topper_y} < {ornament_max}");
    }

    #[test]
    fn bad_frame_deltas_are_ignored() {
        let mut scene = TreeScene::new(small_options(3)).unwrap();
        scene.set_state(FormationState::TreeShape);
        let _ = scene.advance(f32::NAN);
        let _ = scene.advance(-1.0);
        assert_eq!(scene.elapsed(), 0.0);
        assert_eq!(scene.foliage_transition().smoothed(), 0.0);
        let _ = scene.advance(5.0);
        assert_eq!(scene.elapsed(), MAX_FRAME_DELTA);
    }

    #[test]
    fn recolor_does_not_regenerate() {
        let mut scene = TreeScene::new(small_options(4)).unwrap();
        let before = scene.particles().target_positions.clone();
        let heavy = scene.ornaments().heavy.clone();

        let mut options = scene.options().clone();
        options.foliage.primary_color = [1.0, 0.0, 0.0];
        options.transition.ornament_rate = 0.2;
        scene.set_options(options).unwrap();

        assert_eq!(scene.particles().target_positions, before);
        assert_eq!(scene.ornaments().heavy, heavy);
        assert_eq!(scene.ornament_transition().rate(), 0.2);
    }

    #[test]
    fn count_change_regenerates_and_keeps_progress() {
        let mut scene = TreeScene::new(small_options(6)).unwrap();
        scene.set_state(FormationState::TreeShape);
        for _ in 0..20 {
            let _ = scene.advance(DT);
        }
        let progress = scene.foliage_transition().smoothed();

        let mut options = scene.options().clone();
        options.foliage.count = 50;
        options.ornaments.base_count = 0;
        scene.set_options(options).unwrap();

        assert_eq!(scene.particles().len(), 50);
        assert_eq!(scene.frame().particles.len(), 50);
        assert!(scene.ornaments().is_empty());
        assert!(scene.frame().heavy.is_empty());
        assert_eq!(scene.foliage_transition().smoothed(), progress);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut options = small_options(7);
        options.transition.foliage_rate = 2.0;
        assert!(TreeScene::new(options.clone()).is_err());

        let mut scene = TreeScene::new(small_options(7)).unwrap();
        assert!(scene.set_options(options).is_err());
        assert_eq!(scene.options().transition.foliage_rate, 0.05);
    }

    #[test]
    fn empty_scene_still_animates_the_accent() {
        let mut options = small_options(8);
        options.foliage.count = 0;
        options.ornaments.base_count = 0;
        let mut scene = TreeScene::new(options).unwrap();
        scene.set_state(FormationState::TreeShape);
        let frame = scene.advance(DT);
        assert!(frame.particles.is_empty());
        assert!(frame.accent_progress > 0.0);
    }
}
