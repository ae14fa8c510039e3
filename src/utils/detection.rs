use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use crate::utils::coordinate::{Coordinate2D, FaceBox};
use crate::utils::expression::ExpressionVector;

/// One face reported by the detector for a single frame.
///
/// A detection missing its expression scores is accepted with an empty
/// vector so partial detector output never breaks the overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    #[serde(rename = "box")]
    pub face_box: FaceBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Coordinate2D>>,
    #[serde(default)]
    pub expressions: ExpressionVector,
}

impl Detection {
    pub fn new(face_box: FaceBox, expressions: ExpressionVector) -> Self {
        Detection {
            face_box,
            landmarks: None,
            expressions,
        }
    }

    pub fn with_landmarks(mut self, landmarks: Vec<Coordinate2D>) -> Self {
        self.landmarks = Some(landmarks);
        self
    }
}

/// parse_detection_batch decodes one frame's detections from the JSON array
/// emitted by the detection collaborator.
///
/// # Arguments
/// * `json` - JSON array of detections
///
/// # Returns
/// * `Result<Vec<Detection>, Error>`
pub fn parse_detection_batch(json: &str) -> Result<Vec<Detection>, Error> {
    let trimmed = json.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(vec![])
    }
    let detections: Vec<Detection> = serde_json::from_str(trimmed)
        .context("failed to decode detection batch")?;
    Ok(detections)
}

#[cfg(test)]
mod tests {
    use crate::utils::detection::parse_detection_batch;
    use crate::utils::expression::Expression;

    #[test]
    fn test_parse_detection_batch() {
        let json = r#"[
            {"box":{"x":10,"y":10,"width":40,"height":40},
             "landmarks":[{"x":20.5,"y":22.0},{"x":35.0,"y":22.5}],
             "expressions":{"happy":0.9,"neutral":0.1}},
            {"box":{"x":200,"y":50,"width":60,"height":64},
             "expressions":{"sad":1.0}}
        ]"#;
        let detections = parse_detection_batch(json).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].landmarks.as_ref().map(|l| l.len()), Some(2));
        assert_eq!(detections[0].expressions.get(Expression::Happy), Some(0.9));
        assert!(detections[1].landmarks.is_none());
        assert_eq!(detections[1].face_box.height, 64.0);
    }

    #[test]
    fn test_missing_expressions_become_empty() {
        let json = r#"[{"box":{"x":0,"y":0,"width":10,"height":10}}]"#;
        let detections = parse_detection_batch(json).unwrap();
        assert!(detections[0].expressions.is_empty());
    }

    #[test]
    fn test_null_expressions_become_empty() {
        let json = r#"[{"box":{"x":0,"y":0,"width":10,"height":10},"expressions":null}]"#;
        let detections = parse_detection_batch(json).unwrap();
        assert_eq!(detections.len(), 1);
        assert!(detections[0].expressions.is_empty());
    }

    #[test]
    fn test_unknown_expression_keeps_the_batch() {
        let json = r#"[
            {"box":{"x":0,"y":0,"width":10,"height":10},"expressions":{"contempt":0.1,"neutral":0.9}},
            {"box":{"x":100,"y":0,"width":10,"height":10},"expressions":{"happy":1.0}}
        ]"#;
        let detections = parse_detection_batch(json).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].expressions.len(), 1);
        assert_eq!(detections[0].expressions.get(Expression::Neutral), Some(0.9));
        assert_eq!(detections[1].expressions.get(Expression::Happy), Some(1.0));
    }

    #[test]
    fn test_empty_batch() {
        assert!(parse_detection_batch("").unwrap().is_empty());
        assert!(parse_detection_batch("null").unwrap().is_empty());
        assert!(parse_detection_batch("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_batch_is_an_error() {
        assert!(parse_detection_batch("[{\"box\":").is_err());
    }
}
