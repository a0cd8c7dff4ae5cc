// src/mood/quadrant.rs
// Maps two ordinal slider values onto one of four fixed mood quadrants

use crate::error::MoodscopeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest selectable value on either axis
pub const SCALE_MIN: i8 = 1;
/// Highest selectable value on either axis
pub const SCALE_MAX: i8 = 5;
/// Neutral midpoint of the symmetric 5-point scale
pub const SCALE_MIDPOINT: i8 = 3;

/// A pair of ordinal values on the fixed arousal/valence scale.
///
/// The constructor clamps both axes into `SCALE_MIN..=SCALE_MAX`, so
/// classification is total: every coordinate resolves to exactly one
/// quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCoordinate {
    arousal: i8,
    valence: i8,
}

impl MoodCoordinate {
    pub fn new(arousal: i8, valence: i8) -> Self {
        Self {
            arousal: arousal.clamp(SCALE_MIN, SCALE_MAX),
            valence: valence.clamp(SCALE_MIN, SCALE_MAX),
        }
    }

    pub fn arousal(&self) -> i8 {
        self.arousal
    }

    pub fn valence(&self) -> i8 {
        self.valence
    }

    /// Signed offset of the arousal value from the neutral midpoint
    pub fn arousal_offset(&self) -> i8 {
        self.arousal - SCALE_MIDPOINT
    }

    /// Signed offset of the valence value from the neutral midpoint
    pub fn valence_offset(&self) -> i8 {
        self.valence - SCALE_MIDPOINT
    }

    /// Classify this coordinate into its mood quadrant.
    ///
    /// Pure and stable: same input always yields the same quadrant.
    /// Ties resolve so the double midpoint reads as calm and positive:
    /// valence offset 0 counts positive, arousal offset 0 counts low.
    pub fn quadrant(&self) -> Quadrant {
        let high_arousal = self.arousal_offset() > 0;
        let positive_valence = self.valence_offset() >= 0;

        match (high_arousal, positive_valence) {
            (true, false) => Quadrant::Agitated,
            (true, true) => Quadrant::Energized,
            (false, false) => Quadrant::Depleted,
            (false, true) => Quadrant::Serene,
        }
    }
}

/// One of four fixed emotional categories derived from the two axis values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// High arousal, negative valence
    Agitated,
    /// High arousal, positive valence
    Energized,
    /// Low arousal, negative valence
    Depleted,
    /// Low arousal, positive valence
    Serene,
}

impl Quadrant {
    /// Returns the string representation of the quadrant
    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Agitated => "agitated",
            Quadrant::Energized => "energized",
            Quadrant::Depleted => "depleted",
            Quadrant::Serene => "serene",
        }
    }

    /// Human-readable axis summary for prompt text
    pub fn axis_summary(&self) -> &'static str {
        match self {
            Quadrant::Agitated => "high arousal, negative valence",
            Quadrant::Energized => "high arousal, positive valence",
            Quadrant::Depleted => "low arousal, negative valence",
            Quadrant::Serene => "low arousal, positive valence",
        }
    }

    /// Fixed candidate descriptive phrases for this quadrant.
    ///
    /// Immutable reference data fed into prompt assembly.
    pub fn descriptors(&self) -> &'static [&'static str] {
        match self {
            Quadrant::Agitated => &["tense", "wired", "overstimulated", "restless", "on edge"],
            Quadrant::Energized => &["motivated", "focused", "upbeat", "charged", "engaged"],
            Quadrant::Depleted => &["drained", "foggy", "heavy", "withdrawn", "flat"],
            Quadrant::Serene => &["calm", "settled", "clear-headed", "at ease", "steady"],
        }
    }

    /// Get all quadrants
    pub fn all() -> Vec<Quadrant> {
        vec![
            Quadrant::Agitated,
            Quadrant::Energized,
            Quadrant::Depleted,
            Quadrant::Serene,
        ]
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = MoodscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agitated" => Ok(Quadrant::Agitated),
            "energized" => Ok(Quadrant::Energized),
            "depleted" => Ok(Quadrant::Depleted),
            "serene" => Ok(Quadrant::Serene),
            _ => Err(MoodscopeError::InvalidInput(format!(
                "unknown quadrant: {}",
                s
            ))),
        }
    }
}
