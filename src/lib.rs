//! Frame-to-frame face tracking and expression smoothing for real-time
//! overlays.
//!
//! A detection collaborator supplies each frame's face boxes and expression
//! scores; [`TrackingPipeline::process`] gives every face a stable identity
//! and a smoothed expression vector, mutating a caller-owned [`TrackTable`].

pub mod utils;
pub mod pipeline;
pub mod config;
pub mod helper;
pub mod modules;

pub use config::config::{SnapshotConfig, TrackerConfig};
pub use modules::expression_smoother::ExpressionSmoother;
pub use modules::frame_matcher::FrameMatcher;
pub use modules::track_table::{Track, TrackId, TrackTable};
pub use pipeline::driver::{run_frame_loop, FrameBatch};
pub use pipeline::pipeline::{AnnotatedDetection, TrackingPipeline};
pub use pipeline::snapshot::SnapshotRecord;
pub use utils::clock::MonotonicClock;
pub use utils::coordinate::{Coordinate2D, FaceBox};
pub use utils::detection::Detection;
pub use utils::expression::{Expression, ExpressionVector};
