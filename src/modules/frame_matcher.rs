use std::collections::HashSet;
use log::{trace, warn};
use crate::config::config::DEFAULT_SMOOTHING_ALPHA;
use crate::helper::face_helper::{get_nearest_track, is_within_radius};
use crate::modules::track_table::{TrackId, TrackTable};
use crate::utils::detection::Detection;

/// Greedy nearest-centroid assignment of detections to tracks.
///
/// Detections are handled one at a time in arrival order and the table is
/// updated as each one is matched, so later detections in the same frame
/// are measured against the moved centroids. This is not an optimal
/// bipartite assignment and the result depends on detection order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatcher {
    pub alpha: f32,
}

impl FrameMatcher {
    pub fn new(alpha: f32) -> Self {
        FrameMatcher { alpha }
    }

    /// match_detections gives every detection exactly one track identity,
    /// continuing an existing track or creating a new one, then expires
    /// stale tracks.
    ///
    /// A track claimed earlier in the same frame is not offered again, so
    /// no identity appears twice in one frame's output.
    ///
    /// # Arguments
    /// * `detections` - this frame's detections, in arrival order
    /// * `table` - the caller's track table, mutated in place
    /// * `now` - monotonic frame timestamp in milliseconds
    ///
    /// # Returns
    /// * `Vec<(Detection, TrackId)>` - in the same order as `detections`
    pub fn match_detections(
        &self,
        detections: Vec<Detection>,
        table: &mut TrackTable,
        now: u64,
    ) -> Vec<(Detection, TrackId)> {
        let mut claimed: HashSet<TrackId> = HashSet::with_capacity(detections.len());
        let mut matched = Vec::with_capacity(detections.len());

        for detection in detections {
            if !detection.face_box.is_finite() {
                warn!("detection with non-finite box {:?}, it cannot continue a track", detection.face_box);
            }

            let centroid = detection.face_box.centroid();
            let candidates = table
                .lookup_candidates(now)
                .filter(|t| !claimed.contains(&t.id));

            let accepted = match get_nearest_track(candidates, &centroid) {
                Some((id, dist)) if is_within_radius(dist, &detection.face_box) => {
                    trace!("detection at ({:.1}, {:.1}) continues track {} (distance {:.2})", centroid.x, centroid.y, id, dist);
                    Some(id)
                }
                _ => None,
            };

            let id = match accepted {
                Some(id) => {
                    table.touch(id, centroid, now, &detection.expressions, self.alpha);
                    id
                }
                None => table.create(centroid, now, detection.expressions),
            };

            claimed.insert(id);
            matched.push((detection, id));
        }

        table.expire_stale(now);
        matched
    }
}

impl Default for FrameMatcher {
    fn default() -> Self {
        FrameMatcher::new(DEFAULT_SMOOTHING_ALPHA)
    }
}
