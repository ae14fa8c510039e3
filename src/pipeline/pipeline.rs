use anyhow::Error;
use serde::{Deserialize, Serialize};
use crate::config::config::TrackerConfig;
use crate::modules::frame_matcher::FrameMatcher;
use crate::modules::track_table::{TrackId, TrackTable};
use crate::utils::detection::{parse_detection_batch, Detection};

/// A detection tagged with its track identity. `detection.expressions`
/// holds the track's smoothed vector, not the raw detector output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedDetection {
    pub track_id: TrackId,
    pub detection: Detection,
}

/// Per-frame tracking entry point.
///
/// Holds no tracking state of its own: every frame mutates the
/// [`TrackTable`] passed in, and continuity across frames requires passing
/// the same table each time. The table is aged with this pipeline's match
/// and expiry windows whatever windows it was built with.
#[derive(Debug, Clone)]
pub struct TrackingPipeline {
    config: TrackerConfig,
    matcher: FrameMatcher,
}

impl TrackingPipeline {

    /// new initializes a pipeline with the given tracker configuration.
    ///
    /// # Arguments
    /// * `config` - tracker configuration, validated before use
    ///
    /// # Returns
    /// * `Result<TrackingPipeline, Error>`
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(TrackingPipeline::from_valid(config))
    }

    fn from_valid(config: TrackerConfig) -> Self {
        let matcher = FrameMatcher::new(config.smoothing_alpha);
        TrackingPipeline { config, matcher }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// new_table creates an empty track table using this pipeline's windows.
    pub fn new_table(&self) -> TrackTable {
        TrackTable::with_windows(self.config.match_window_ms, self.config.expiry_window_ms)
    }

    /// process matches one frame's detections against the table and returns
    /// them annotated with identity and smoothed expressions.
    ///
    /// # Arguments
    /// * `table` - the caller's track table
    /// * `detections` - this frame's detections, possibly empty
    /// * `now` - monotonic frame timestamp in milliseconds
    ///
    /// # Returns
    /// * `Vec<AnnotatedDetection>` - one per input detection, in input order
    pub fn process(&self, table: &mut TrackTable, detections: Vec<Detection>, now: u64) -> Vec<AnnotatedDetection> {
        table.set_windows(self.config.match_window_ms, self.config.expiry_window_ms);
        let matched = self.matcher.match_detections(detections, table, now);
        annotate(table, matched)
    }

    /// process_json decodes a detection batch in the collaborator's JSON
    /// shape and processes it.
    pub fn process_json(&self, table: &mut TrackTable, json: &str, now: u64) -> Result<Vec<AnnotatedDetection>, Error> {
        let detections = parse_detection_batch(json)?;
        Ok(self.process(table, detections, now))
    }
}

/// annotate swaps each detection's raw expressions for its track's smoothed
/// vector. A missing track keeps the raw scores.
fn annotate(table: &TrackTable, matched: Vec<(Detection, TrackId)>) -> Vec<AnnotatedDetection> {
    matched
        .into_iter()
        .map(|(mut detection, track_id)| {
            if let Some(track) = table.get(track_id) {
                detection.expressions = track.smoothed;
            }
            AnnotatedDetection { track_id, detection }
        })
        .collect()
}

impl Default for TrackingPipeline {
    fn default() -> Self {
        TrackingPipeline::from_valid(TrackerConfig::default())
    }
}
