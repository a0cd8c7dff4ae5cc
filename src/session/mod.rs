// src/session/mod.rs
// Explicit per-session wizard state, owned by the caller

use crate::analyzer::Analysis;
use crate::error::{MoodscopeError, Result};
use crate::mood::MoodCoordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The linear wizard: Describe -> Tune -> Review.
///
/// Advanced only by explicit calls; the only way back is a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Collect the free-text description
    Describe,
    /// Collect the arousal/valence sliders and optional note
    Tune,
    /// Hold the analysis result
    Review,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Describe => "describe",
            WizardStep::Tune => "tune",
            WizardStep::Review => "review",
        }
    }

    /// 1-based position, for display
    pub fn position(&self) -> u8 {
        match self {
            WizardStep::Describe => 1,
            WizardStep::Tune => 2,
            WizardStep::Review => 3,
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Describe => Some(WizardStep::Tune),
            WizardStep::Tune => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-session state bag, created at session start and discarded with it.
/// No persistence, no identity beyond the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    step: WizardStep,
    pub description: String,
    pub coordinate: Option<MoodCoordinate>,
    pub context_note: Option<String>,
    pub last_analysis: Option<Analysis>,
    started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Describe,
            description: String::new(),
            coordinate: None,
            context_note: None,
            last_analysis: None,
            started_at: Utc::now(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Move to the next step. Advancing past Review is an error; use
    /// `restart` to begin a new round.
    pub fn advance(&mut self) -> Result<WizardStep> {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(MoodscopeError::InvalidInput(
                "review is the final step; restart to begin again".to_string(),
            )),
        }
    }

    /// Back to step one, clearing everything collected this round
    pub fn restart(&mut self) {
        self.step = WizardStep::Describe;
        self.description.clear();
        self.coordinate = None;
        self.context_note = None;
        self.last_analysis = None;
    }

    pub fn record_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn record_coordinate(&mut self, coordinate: MoodCoordinate) {
        self.coordinate = Some(coordinate);
    }

    pub fn record_context_note(&mut self, note: impl Into<String>) {
        self.context_note = Some(note.into());
    }

    pub fn record_analysis(&mut self, analysis: Analysis) {
        self.last_analysis = Some(analysis);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_is_linear() {
        let mut session = SessionState::new();
        assert_eq!(session.step(), WizardStep::Describe);

        assert_eq!(session.advance().unwrap(), WizardStep::Tune);
        assert_eq!(session.advance().unwrap(), WizardStep::Review);
        assert!(session.advance().is_err());
        // A failed advance leaves the step unchanged
        assert_eq!(session.step(), WizardStep::Review);
    }

    #[test]
    fn test_restart_clears_state() {
        let mut session = SessionState::new();
        session.record_description("wired and tired");
        session.record_coordinate(MoodCoordinate::new(4, 2));
        session.record_context_note("late shift");
        session.advance().unwrap();

        session.restart();
        assert_eq!(session.step(), WizardStep::Describe);
        assert!(session.description.is_empty());
        assert!(session.coordinate.is_none());
        assert!(session.context_note.is_none());
        assert!(session.last_analysis.is_none());
    }

    #[test]
    fn test_step_positions() {
        assert_eq!(WizardStep::Describe.position(), 1);
        assert_eq!(WizardStep::Tune.position(), 2);
        assert_eq!(WizardStep::Review.position(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(WizardStep::Tune.to_string(), "tune");
    }
}
