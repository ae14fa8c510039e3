use rs_face_tracker::{
    Detection, Expression, ExpressionVector, FaceBox, SnapshotConfig, SnapshotRecord, TrackId,
    TrackerConfig, TrackingPipeline,
};

fn expressions(happy: f32, neutral: f32) -> ExpressionVector {
    ExpressionVector::new()
        .with(Expression::Happy, happy)
        .with(Expression::Neutral, neutral)
}

#[test]
fn end_to_end_two_frames() {
    let pipeline = TrackingPipeline::default();
    let mut table = pipeline.new_table();

    let out1 = pipeline.process(
        &mut table,
        vec![Detection::new(FaceBox::new(10.0, 10.0, 40.0, 40.0), expressions(0.9, 0.1))],
        0,
    );
    assert_eq!(out1[0].track_id, TrackId(1));
    let e1 = out1[0].detection.expressions;
    assert!((e1.get(Expression::Happy).unwrap() - 0.9).abs() < 1e-6);
    assert!((e1.get(Expression::Neutral).unwrap() - 0.1).abs() < 1e-6);

    let out2 = pipeline.process(
        &mut table,
        vec![Detection::new(FaceBox::new(12.0, 11.0, 40.0, 40.0), expressions(0.5, 0.5))],
        50,
    );
    assert_eq!(out2[0].track_id, TrackId(1));
    let e2 = out2[0].detection.expressions;
    assert!((e2.get(Expression::Happy).unwrap() - 0.74).abs() < 1e-6);
    assert!((e2.get(Expression::Neutral).unwrap() - 0.26).abs() < 1e-6);

    let record = SnapshotRecord::from_frame(1234, &out2, &SnapshotConfig::default());
    let json = record.to_json().unwrap();
    assert!(json.contains("\"captureTimestamp\": 1234"));
    assert!(json.contains("\"faceCount\": 1"));
}

#[test]
fn occlusion_then_expiry() {
    let pipeline = TrackingPipeline::default();
    let mut table = pipeline.new_table();
    let face = || Detection::new(FaceBox::new(75.0, 75.0, 50.0, 50.0), expressions(0.5, 0.5));

    pipeline.process(&mut table, vec![face()], 0);

    // briefly occluded: the track survives but can no longer be matched
    pipeline.process(&mut table, vec![], 2000);
    assert!(table.get(TrackId(1)).is_some());
    let out = pipeline.process(&mut table, vec![face()], 2000);
    assert_eq!(out[0].track_id, TrackId(2));

    pipeline.process(&mut table, vec![], 3100);
    assert!(table.get(TrackId(1)).is_none());
    assert!(table.get(TrackId(2)).is_some());
}

#[test]
fn reacquired_within_match_window() {
    let pipeline = TrackingPipeline::default();
    let mut table = pipeline.new_table();
    let face = |x: f32| Detection::new(FaceBox::new(x, 75.0, 50.0, 50.0), expressions(0.5, 0.5));

    pipeline.process(&mut table, vec![face(75.0)], 0);
    pipeline.process(&mut table, vec![], 700);
    let out = pipeline.process(&mut table, vec![face(90.0)], 1400);
    assert_eq!(out[0].track_id, TrackId(1));
}

#[test]
fn config_file_drives_pipeline() {
    let config = TrackerConfig::from_json_str(r#"{"match_window_ms": 100, "expiry_window_ms": 200}"#).unwrap();
    let pipeline = TrackingPipeline::new(config).unwrap();
    let mut table = pipeline.new_table();
    let face = || Detection::new(FaceBox::new(0.0, 0.0, 50.0, 50.0), expressions(1.0, 0.0));

    pipeline.process(&mut table, vec![face()], 0);
    let out = pipeline.process(&mut table, vec![face()], 150);
    assert_eq!(out[0].track_id, TrackId(2));
    pipeline.process(&mut table, vec![], 250);
    assert_eq!(table.len(), 1);
}
