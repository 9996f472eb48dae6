//! Headless driver: builds a tree scene, runs one scatter → tree → scatter
//! cycle and logs progress.
//!
//! Usage: `evergreen [PRESET.toml] [--realtime]`. Set `RUST_LOG=info` (or
//! `debug`) to see output. With `--realtime` frames are paced at 60 FPS
//! and fed wall-clock deltas; otherwise a fixed 1/60 s step is used.

use std::path::Path;
use std::process::ExitCode;

use evergreen::animation::FormationState;
use evergreen::options::Options;
use evergreen::scene::TreeScene;
use evergreen::util::frame_timing::FrameTiming;

const TARGET_FPS: u32 = 60;
const FIXED_DT: f32 = 1.0 / 60.0;
/// Frames spent in each formation.
const PHASE_FRAMES: u32 = 360;
/// Log every this many frames.
const LOG_EVERY: u32 = 60;

fn run_phase(
    scene: &mut TreeScene,
    state: FormationState,
    mut timing: Option<&mut FrameTiming>,
) {
    scene.set_state(state);
    log::info!("heading for {} formation", state.label());

    for frame in 1..=PHASE_FRAMES {
        let dt = match timing.as_deref_mut() {
            Some(timing) => {
                while !timing.should_render() {
                    std::thread::sleep(timing.min_frame_duration() / 8);
                }
                timing.end_frame()
            }
            None => FIXED_DT,
        };
        let out = scene.advance(dt);
        if frame % LOG_EVERY == 0 {
            log::info!(
                "t={:6.2}s foliage={:.3} ornaments={:.3} accent={:.3} \
                 accent_rot=({:.3}, {:.3}, {:.3})",
                out.time,
                out.foliage_progress,
                out.ornament_progress,
                out.accent_progress,
                out.accent_transform.rotation.x,
                out.accent_transform.rotation.y,
                out.accent_transform.rotation.z,
            );
        }
    }

    if let Some(timing) = timing {
        log::info!("average {:.1} fps", timing.fps());
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut preset = None;
    let mut realtime = false;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else {
            preset = Some(arg);
        }
    }

    let options = match preset {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded preset {path}");
                options
            }
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let mut scene = match TreeScene::new(options) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("failed to build scene: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "scene: {} particles, {} ornaments",
        scene.particles().len(),
        scene.ornaments().total_len()
    );

    let mut timing = realtime.then(|| FrameTiming::new(TARGET_FPS));
    run_phase(&mut scene, FormationState::TreeShape, timing.as_mut());
    run_phase(&mut scene, FormationState::Scattered, timing.as_mut());

    ExitCode::SUCCESS
}
