use std::collections::BTreeMap;
use std::fmt;
use log::warn;
use serde::{Deserialize, Serialize};

/// The fixed set of expressions scored by the face-analysis model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    Neutral,
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
}

impl Expression {
    pub const COUNT: usize = 7;

    pub const ALL: [Expression; Expression::COUNT] = [
        Expression::Neutral,
        Expression::Happy,
        Expression::Sad,
        Expression::Angry,
        Expression::Fearful,
        Expression::Disgusted,
        Expression::Surprised,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// from_name parses a lowercase expression name.
    pub fn from_name(name: &str) -> Option<Expression> {
        Expression::ALL.into_iter().find(|e| e.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Angry => "angry",
            Expression::Fearful => "fearful",
            Expression::Disgusted => "disgusted",
            Expression::Surprised => "surprised",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expression probabilities indexed by [`Expression`].
///
/// Each slot is optional: a vector only carries the expressions the detector
/// actually reported, and smoothing preserves that key set. On the wire it is
/// a plain `name -> probability` map. A `null` map decodes as empty and
/// unknown names are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<BTreeMap<String, f32>>", into = "BTreeMap<Expression, f32>")]
pub struct ExpressionVector {
    scores: [Option<f32>; Expression::COUNT],
}

impl ExpressionVector {
    pub fn new() -> Self {
        ExpressionVector::default()
    }

    pub fn get(&self, expression: Expression) -> Option<f32> {
        self.scores[expression.index()]
    }

    pub fn set(&mut self, expression: Expression, probability: f32) {
        self.scores[expression.index()] = Some(probability);
    }

    pub fn with(mut self, expression: Expression, probability: f32) -> Self {
        self.set(expression, probability);
        self
    }

    /// iter yields the present entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Expression, f32)> + '_ {
        Expression::ALL
            .into_iter()
            .filter_map(move |e| self.get(e).map(|p| (e, p)))
    }

    pub fn len(&self) -> usize {
        self.scores.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.iter().all(|s| s.is_none())
    }

    pub fn sum(&self) -> f32 {
        self.iter().map(|(_, p)| p).sum()
    }

    /// dominant returns the expression with the highest probability.
    /// Ties go to the expression declared first.
    pub fn dominant(&self) -> Option<(Expression, f32)> {
        self.iter().fold(None, |best, (e, p)| match best {
            Some((_, best_p)) if best_p >= p => best,
            _ => Some((e, p)),
        })
    }
}

impl From<BTreeMap<Expression, f32>> for ExpressionVector {
    fn from(map: BTreeMap<Expression, f32>) -> Self {
        let mut vector = ExpressionVector::new();
        for (expression, probability) in map {
            vector.set(expression, probability);
        }
        vector
    }
}

impl From<Option<BTreeMap<String, f32>>> for ExpressionVector {
    fn from(map: Option<BTreeMap<String, f32>>) -> Self {
        let mut vector = ExpressionVector::new();
        for (name, probability) in map.unwrap_or_default() {
            match Expression::from_name(&name) {
                Some(expression) => vector.set(expression, probability),
                None => warn!("ignoring unknown expression {:?}", name),
            }
        }
        vector
    }
}

impl From<ExpressionVector> for BTreeMap<Expression, f32> {
    fn from(vector: ExpressionVector) -> Self {
        vector.iter().collect()
    }
}

impl FromIterator<(Expression, f32)> for ExpressionVector {
    fn from_iter<I: IntoIterator<Item = (Expression, f32)>>(iter: I) -> Self {
        let mut vector = ExpressionVector::new();
        for (expression, probability) in iter {
            vector.set(expression, probability);
        }
        vector
    }
}
