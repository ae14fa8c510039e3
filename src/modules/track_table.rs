use std::collections::BTreeMap;
use std::fmt;
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use crate::config::config::{DEFAULT_EXPIRY_WINDOW_MS, DEFAULT_MATCH_WINDOW_MS};
use crate::modules::expression_smoother::smooth;
use crate::utils::expression::ExpressionVector;
use crate::utils::utils::elapsed_ms;

/// Identity of a tracked face. Allocated in increasing order starting at 1
/// and never handed out twice by the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub centroid: Point2<f32>,
    pub last_seen_ms: u64,
    pub smoothed: ExpressionVector,
}

/// Owned map from track identity to track state.
///
/// The caller keeps one table alive across frames and threads it through
/// every call to the pipeline.
#[derive(Debug, Clone)]
pub struct TrackTable {
    tracks: BTreeMap<TrackId, Track>,
    next_id: u64,
    match_window_ms: u64,
    expiry_window_ms: u64,
}

impl TrackTable {
    pub fn new() -> Self {
        TrackTable::with_windows(DEFAULT_MATCH_WINDOW_MS, DEFAULT_EXPIRY_WINDOW_MS)
    }

    pub fn with_windows(match_window_ms: u64, expiry_window_ms: u64) -> Self {
        TrackTable {
            tracks: BTreeMap::new(),
            next_id: 1,
            match_window_ms,
            expiry_window_ms,
        }
    }

    /// set_windows replaces the match and expiry windows. Existing tracks
    /// are aged against the new windows from the next lookup on.
    pub fn set_windows(&mut self, match_window_ms: u64, expiry_window_ms: u64) {
        self.match_window_ms = match_window_ms;
        self.expiry_window_ms = expiry_window_ms;
    }

    pub fn match_window_ms(&self) -> u64 {
        self.match_window_ms
    }

    pub fn expiry_window_ms(&self) -> u64 {
        self.expiry_window_ms
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// tracks iterates every entry, stale or not, in identity order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// next_id is the identity the next `create` call will return.
    pub fn next_id(&self) -> TrackId {
        TrackId(self.next_id)
    }

    /// lookup_candidates returns the tracks seen within the match window, in
    /// identity order. Stale entries are skipped, not removed.
    pub fn lookup_candidates(&self, now: u64) -> impl Iterator<Item = &Track> {
        let window = self.match_window_ms;
        self.tracks
            .values()
            .filter(move |t| elapsed_ms(now, t.last_seen_ms) <= window)
    }

    pub fn active_tracks(&self, now: u64) -> Vec<&Track> {
        self.lookup_candidates(now).collect()
    }

    /// create inserts a new track whose expression state is the unsmoothed
    /// first observation, and returns its identity.
    pub fn create(&mut self, centroid: Point2<f32>, now: u64, initial: ExpressionVector) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        self.tracks.insert(id, Track {
            id,
            centroid,
            last_seen_ms: now,
            smoothed: initial,
        });
        debug!("track {} created at ({:.1}, {:.1})", id, centroid.x, centroid.y);
        id
    }

    /// touch moves an existing track and folds the raw expression into its
    /// smoothed state. Returns false if the identity is unknown.
    pub fn touch(&mut self, id: TrackId, centroid: Point2<f32>, now: u64, raw: &ExpressionVector, alpha: f32) -> bool {
        match self.tracks.get_mut(&id) {
            Some(track) => {
                track.centroid = centroid;
                track.last_seen_ms = now;
                track.smoothed = smooth(Some(&track.smoothed), raw, alpha);
                true
            }
            None => false,
        }
    }

    /// expire_stale deletes every track unseen for longer than the expiry
    /// window and returns how many were removed.
    pub fn expire_stale(&mut self, now: u64) -> usize {
        let window = self.expiry_window_ms;
        let before = self.tracks.len();
        self.tracks.retain(|id, track| {
            let keep = elapsed_ms(now, track.last_seen_ms) <= window;
            if !keep {
                debug!("track {} expired, last seen at {} ms", id, track.last_seen_ms);
            }
            keep
        });
        before - self.tracks.len()
    }
}

impl Default for TrackTable {
    fn default() -> Self {
        TrackTable::new()
    }
}
