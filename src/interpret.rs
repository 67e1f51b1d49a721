use serde::Serialize;
use std::fmt;

/// Number of digit classes a score vector must carry
pub const NUM_CLASSES: usize = 10;

/// Per-class scores, index = digit. Not assumed to sum to 1.
pub type ScoreVector = Vec<f32>;

/// Decision policy for turning scores into a prediction
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterConfig {
    /// Top scores below this percentage are rejected as "not a digit"
    pub min_confidence: f32,
    /// Decimal places shown for the confidence
    pub precision: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            min_confidence: 20.0,
            precision: 2,
        }
    }
}

/// Top score scaled to a percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Confidence {
    pub percent: f32,
    #[serde(skip)]
    pub precision: usize,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}%", self.precision, self.percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prediction {
    Digit { digit: usize, confidence: Confidence },
    /// The best score was too low to trust
    NotADigit,
    /// The score vector had nothing to pick from
    NoPrediction,
}

impl Prediction {
    pub fn digit(&self) -> Option<usize> {
        match self {
            Prediction::Digit { digit, .. } => Some(*digit),
            _ => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            Prediction::Digit { confidence, .. } => Some(*confidence),
            _ => None,
        }
    }

    /// Headline shown to the user
    pub fn label(&self) -> String {
        match self {
            Prediction::Digit { digit, .. } => format!("Predicted digit: {}", digit),
            Prediction::NotADigit => "The photo taken is probably not a handwritten digit.".to_string(),
            Prediction::NoPrediction => "No prediction available".to_string(),
        }
    }

    /// Confidence line, empty when there is no real prediction
    pub fn confidence_text(&self) -> String {
        match self.confidence() {
            Some(confidence) => format!("Confidence: {}", confidence),
            None => String::new(),
        }
    }
}

/// Index and value of the highest score. Ties go to the lowest index; NaN is skipped.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }

    best
}

/// Map a score vector to a prediction
pub fn interpret(scores: &[f32], config: &InterpreterConfig) -> Prediction {
    let Some((digit, score)) = argmax(scores) else {
        return Prediction::NoPrediction;
    };

    let percent = score * 100.0;
    if percent < config.min_confidence {
        return Prediction::NotADigit;
    }

    Prediction::Digit {
        digit,
        confidence: Confidence {
            // Unnormalized models can leave [0, 1]
            percent: percent.clamp(0.0, 100.0),
            precision: config.precision,
        },
    }
}
