use crate::config::config::DEFAULT_SMOOTHING_ALPHA;
use crate::utils::expression::ExpressionVector;

/// Exponential moving average over a track's expression scores.
///
/// `alpha` is the weight kept from history, so a larger alpha reacts more
/// slowly to the newest observation. The result is not renormalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionSmoother {
    pub alpha: f32,
}

impl ExpressionSmoother {
    pub fn new(alpha: f32) -> Self {
        ExpressionSmoother { alpha }
    }

    pub fn update(&self, previous: Option<&ExpressionVector>, current: &ExpressionVector) -> ExpressionVector {
        smooth(previous, current, self.alpha)
    }
}

impl Default for ExpressionSmoother {
    fn default() -> Self {
        ExpressionSmoother::new(DEFAULT_SMOOTHING_ALPHA)
    }
}

/// smooth blends `current` into `previous` as `alpha * previous + (1 - alpha) * current`.
///
/// The result carries exactly the keys of `current`. With no history, or for a
/// key the history lacks, the current value passes through unchanged.
///
/// # Arguments
/// * `previous` - smoothed vector from the last update, if any
/// * `current` - raw vector from the newest detection
/// * `alpha` - history weight
///
/// # Returns
/// * `ExpressionVector`
pub fn smooth(previous: Option<&ExpressionVector>, current: &ExpressionVector, alpha: f32) -> ExpressionVector {
    let previous = match previous {
        None => return *current,
        Some(previous) => previous,
    };

    current
        .iter()
        .map(|(expression, value)| {
            let blended = match previous.get(expression) {
                Some(old) => alpha * old + (1.0 - alpha) * value,
                None => value,
            };
            (expression, blended)
        })
        .collect()
}
