//! Step, activity and plan types.
//!
//! [`Step`] and [`Activity`] map directly to the JSON data files and are
//! deserialized via `serde`. The legacy field names (`step`, `csvKey`) are
//! accepted as aliases.

use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Static data
// ---------------------------------------------------------------------------

/// One of the diagnostic questions in the flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    /// 1-based position in the flow.
    #[serde(alias = "step")]
    pub order: u32,
    #[serde(default)]
    pub emoji: String,
    pub title: String,
    pub question: String,
    /// Lowercase identifier matched against [`Activity::category`].
    #[serde(alias = "csvKey")]
    pub key: String,
}

/// A remedial exercise recommended when a step is failed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Activity {
    pub name: String,
    /// Step key or universal category this activity belongs to.
    #[serde(alias = "step")]
    pub category: String,
    #[serde(default)]
    pub duration: String,
    /// One-line summary.
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Activity {
    /// The long description, or `None` when it is absent or blank.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Self-rated certainty recorded against a plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// A rating the user gave when clearing a step.
    Rated(u8),
    /// Marker for the step that ended the flow.
    NotConfident,
}

impl Confidence {
    pub fn is_rated(self) -> bool {
        matches!(self, Self::Rated(_))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rated(n) => write!(f, "{n}"),
            Self::NotConfident => f.write_str("not confident"),
        }
    }
}

/// One record in the run's plan log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub step_title: String,
    pub question: String,
    pub answer: String,
    pub confidence: Confidence,
}

impl PlanEntry {
    pub fn is_failure(&self) -> bool {
        self.confidence == Confidence::NotConfident
    }
}

/// Result of driving the engine one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The current step was cleared; this is the next one.
    Advanced(Step),
    /// The current step was failed or help was requested.
    NeedsHelp {
        /// Title of the failed step, used for the results preamble.
        step_title: String,
        activities: Vec<Activity>,
    },
    /// Every step has been cleared.
    Completed,
}
