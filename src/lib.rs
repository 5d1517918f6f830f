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

//! Camera interaction and animation playback core for embedded 3D scene
//! viewers.
//!
//! Vantage sits between a host application's event loop and a rendering
//! engine. It turns pointer drags, wheel ticks and key presses into camera
//! operations, animates view snaps, drives a scene animation clock, and
//! exposes the engine's named display options through a data-driven key
//! table and sidebar intents.
//!
//! # Key entry points
//!
//! - [`Viewer`] - the shell a host forwards input, ticks and frames to
//! - [`engine::SceneEngine`] - the rendering-engine seam
//! - [`input::InteractionController`] - drag, wheel and view-snap handling
//! - [`playback::AnimationClock`] - scene time cursor
//! - [`options::Options`] - sensitivities, playback and key bindings
//!
//! # Architecture
//!
//! Everything runs on the host's UI thread. The host calls
//! [`Viewer::handle_input`] per event, [`Viewer::on_tick`] from its
//! animation timer and [`Viewer::on_frame`] per redraw; view snaps advance
//! on frames and the animation cursor advances on ticks. A GPU-less
//! [`engine::HeadlessEngine`] implements the seam for tests and the
//! `vantage` command-line shell.

pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod playback;
pub mod sidebar;
pub mod util;
pub mod viewer;

pub use error::{OptionError, VantageError};
pub use input::InputEvent;
pub use viewer::{Viewer, ViewerBuilder};
