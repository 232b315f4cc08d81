//! Eval scores on a fixed 0-10 scale.
//!
//! Backends report scores either on 0-10 or normalized to 0-100. Both are
//! converted here so the rest of the workspace only sees 0-10.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound of the score scale.
pub const MAX_SCORE: u8 = 10;

/// Score assumed when nothing numeric can be recovered from a result.
pub const NEUTRAL_SCORE: Score = Score(5);

static RATING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rating\s*:?\s*(\d+(?:\.\d+)?)(?:\s*(?:/|out\s+of)\s*(\d+))?")
        .expect("rating pattern is valid")
});

static SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)score\s*:?\s*(\d+(?:\.\d+)?)(?:\s*(?:/|out\s+of)\s*(\d+))?")
        .expect("score pattern is valid")
});

/// An eval score between 0 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Creates a score, `None` if it is outside 0-10.
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_SCORE).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Converts a backend-reported score.
    ///
    /// Values in 0-10 are taken as-is (rounded); values in (10, 100] are read
    /// as percentages. Anything else is rejected.
    pub fn from_backend(raw: f64) -> Option<Self> {
        if !raw.is_finite() || raw < 0.0 {
            return None;
        }
        if raw <= f64::from(MAX_SCORE) {
            return Some(Self(raw.round() as u8));
        }
        if raw <= 100.0 {
            return Some(Self((raw / 10.0).round() as u8));
        }
        None
    }

    /// Rough verdict used for display.
    pub fn band(&self) -> ScoreBand {
        match self.0 {
            7..=10 => ScoreBand::Good,
            4..=6 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, MAX_SCORE)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Score::from_backend(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("score out of range: {}", raw)))
    }
}

/// Display band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

/// Recovers a score from free-text eval output.
///
/// Looks for a `rating` token first, then `score`, each optionally followed
/// by a colon, a number and a `/N` or `out of N` qualifier. Qualified values
/// are rescaled to 0-10. Returns [`NEUTRAL_SCORE`] when nothing matches or
/// the matched value is out of range.
pub fn extract_score_from_result(result: &str) -> Score {
    [&*RATING_PATTERN, &*SCORE_PATTERN]
        .iter()
        .find_map(|pattern| pattern.captures(result))
        .map(|caps| {
            let value = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            let out_of = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
            value
                .and_then(|v| scale(v, out_of))
                .unwrap_or(NEUTRAL_SCORE)
        })
        .unwrap_or(NEUTRAL_SCORE)
}

fn scale(value: f64, out_of: Option<f64>) -> Option<Score> {
    let max = f64::from(MAX_SCORE);
    let normalized = match out_of {
        Some(denominator) if denominator > 0.0 => value * max / denominator,
        Some(_) => return None,
        None => value,
    };
    if (0.0..=max).contains(&normalized) {
        Some(Score(normalized.round() as u8))
    } else {
        None
    }
}
