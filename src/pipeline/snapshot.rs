use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use crate::config::config::SnapshotConfig;
use crate::modules::track_table::TrackId;
use crate::pipeline::pipeline::AnnotatedDetection;
use crate::utils::expression::ExpressionVector;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SnapshotBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotFace {
    pub identity: TrackId,
    #[serde(rename = "box")]
    pub face_box: SnapshotBox,
    pub expressions: ExpressionVector,
}

/// Exportable record of one frame's tracked faces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub capture_timestamp: u64,
    pub face_count: usize,
    pub detections: Vec<SnapshotFace>,
    #[serde(skip)]
    pretty: bool,
}

impl SnapshotRecord {

    /// from_frame builds a record from one frame's annotated detections,
    /// rounding box values to the configured precision.
    ///
    /// # Arguments
    /// * `capture_timestamp` - capture time in milliseconds
    /// * `annotated` - output of the tracking pipeline for that frame
    /// * `config` - rounding and formatting options
    ///
    /// # Returns
    /// * `SnapshotRecord`
    pub fn from_frame(capture_timestamp: u64, annotated: &[AnnotatedDetection], config: &SnapshotConfig) -> Self {
        let precision = config.box_precision;
        let detections: Vec<SnapshotFace> = annotated
            .iter()
            .map(|a| {
                let b = a.detection.face_box.rounded(precision);
                SnapshotFace {
                    identity: a.track_id,
                    face_box: SnapshotBox {
                        x: b.x,
                        y: b.y,
                        w: b.width,
                        h: b.height,
                    },
                    expressions: a.detection.expressions,
                }
            })
            .collect();

        SnapshotRecord {
            capture_timestamp,
            face_count: detections.len(),
            detections,
            pretty: config.pretty,
        }
    }

    /// to_json renders the record as human-readable JSON text.
    pub fn to_json(&self) -> Result<String, Error> {
        let text = if self.pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        text.context("failed to serialize snapshot")
    }

    /// write_to saves the record to `path`, replacing any existing file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create snapshot file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_json()?.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
