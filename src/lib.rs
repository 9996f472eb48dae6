// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural particle and ornament formations that morph between a
//! scattered cloud and a cone-shaped tree.
//!
//! The crate generates the per-entity data once (two positions per entity
//! plus a few random constants) and then, every frame, blends between the
//! two formations with a frame-rate independent low-pass filter followed by
//! a cubic ease. It produces GPU-ready buffers but does no rendering itself.
//!
//! # Key entry points
//!
//! - [`scene::TreeScene`] - owns everything and writes one
//!   [`scene::FrameOutput`] per [`advance`](scene::TreeScene::advance)
//! - [`foliage::build_particle_field`] and
//!   [`ornaments::build_ornament_batches`] - the one-shot builders
//! - [`animation`] - transition state, instance animator and the topper
//! - [`options::Options`] - configuration with TOML presets
//!
//! # Architecture
//!
//! Single-threaded and frame-driven. [`animation::TransitionState`] values
//! are owned by the scene, not global; reversing the target mid-way just
//! changes the direction progress drifts in. Rebuilds replace whole
//! generated sets and resize the output buffers, the per-frame path
//! allocates nothing.

pub mod animation;
pub mod error;
pub mod foliage;
pub mod geometry;
pub mod options;
pub mod ornaments;
pub mod scene;
pub mod util;
