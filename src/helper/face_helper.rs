use nalgebra::{distance, Point2};
use crate::modules::track_table::{Track, TrackId};
use crate::utils::coordinate::FaceBox;

/// get_nearest_track finds the track whose centroid is closest to `point`.
///
/// Ties keep the earliest track in iteration order. Distances that are not
/// comparable (NaN) never win.
///
/// # Arguments
/// * `tracks` - candidate tracks
/// * `point` - centroid of the detection being matched
///
/// # Returns
/// * `Option<(TrackId, f32)>` - identity and distance of the nearest track
pub fn get_nearest_track<'a, I>(tracks: I, point: &Point2<f32>) -> Option<(TrackId, f32)>
where
    I: IntoIterator<Item = &'a Track>,
{
    let mut nearest: Option<(TrackId, f32)> = None;
    for track in tracks {
        let dist = distance(&track.centroid, point);
        if dist.is_nan() {
            continue;
        }
        if nearest.map_or(true, |(_, best)| dist < best) {
            nearest = Some((track.id, dist));
        }
    }
    nearest
}

/// acceptance_radius is how far a detection may sit from a track and still
/// continue it: the larger side of the detection's own box.
pub fn acceptance_radius(face_box: &FaceBox) -> f32 {
    face_box.max_side()
}

/// is_within_radius applies the strict acceptance test.
pub fn is_within_radius(dist: f32, face_box: &FaceBox) -> bool {
    dist < acceptance_radius(face_box)
}
