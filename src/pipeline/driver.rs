use log::{debug, info};
use tokio::sync::mpsc::{Receiver, Sender};
use crate::modules::track_table::TrackTable;
use crate::pipeline::pipeline::{AnnotatedDetection, TrackingPipeline};
use crate::utils::clock::MonotonicClock;
use crate::utils::detection::Detection;

/// One frame's worth of detections handed over by the detection collaborator.
#[derive(Debug, Clone, Default)]
pub struct FrameBatch {
    pub detections: Vec<Detection>,
    /// Frame timestamp in milliseconds. When absent the loop samples its clock.
    pub timestamp_ms: Option<u64>,
}

impl FrameBatch {
    pub fn new(detections: Vec<Detection>) -> Self {
        FrameBatch { detections, timestamp_ms: None }
    }

    pub fn at(detections: Vec<Detection>, timestamp_ms: u64) -> Self {
        FrameBatch { detections, timestamp_ms: Some(timestamp_ms) }
    }
}

/// run_frame_loop drives the pipeline from a channel of detection batches.
///
/// Each batch is processed to completion before the next is received. The
/// loop ends when the input channel closes or the output receiver is dropped,
/// and hands the table back so tracking can resume later.
///
/// # Arguments
/// * `pipeline` - tracking pipeline
/// * `table` - track table carried across frames
/// * `frames` - incoming detection batches
/// * `annotated` - outgoing annotated batches for rendering
/// * `clock` - timestamp source for batches without their own timestamp
///
/// # Returns
/// * `TrackTable`
pub async fn run_frame_loop(
    pipeline: TrackingPipeline,
    mut table: TrackTable,
    mut frames: Receiver<FrameBatch>,
    annotated: Sender<Vec<AnnotatedDetection>>,
    clock: MonotonicClock,
) -> TrackTable {
    info!("frame loop started with {} existing tracks", table.len());
    let mut frame_count: u64 = 0;

    while let Some(batch) = frames.recv().await {
        let now = batch.timestamp_ms.unwrap_or_else(|| clock.now_ms());
        let output = pipeline.process(&mut table, batch.detections, now);
        frame_count += 1;
        debug!("frame {} at {} ms: {} faces, {} tracks", frame_count, now, output.len(), table.len());

        if annotated.send(output).await.is_err() {
            info!("annotated receiver dropped, stopping frame loop");
            break;
        }
    }

    info!("frame loop stopped after {} frames", frame_count);
    table
}
