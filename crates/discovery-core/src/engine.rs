//! Diagnostic flow state machine.
//!
//! The engine walks an ordered list of [`Step`]s. Each submission either
//! clears the current step (answer present and confidence at or above
//! [`CONFIDENCE_THRESHOLD`]) or ends the flow with a filtered list of
//! recommended [`Activity`] records.
//!
//! Valid positions:
//!
//! ```text
//! 0 ..= steps.len() - 1   answering that step
//! steps.len()             all steps cleared
//! ```

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::export;
use crate::model::{Activity, Confidence, Outcome, PlanEntry, Step};

/// Minimum confidence rating that clears a step.
pub const CONFIDENCE_THRESHOLD: u8 = 3;

/// Highest valid confidence rating. Ratings run from 1 to this value.
pub const MAX_CONFIDENCE: u8 = 5;

/// Activity categories recommended for every failed step.
pub const UNIVERSAL_CATEGORIES: [&str; 2] = ["core techniques", "discussions"];

/// Owns the state of one run through the diagnostic.
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    steps: Vec<Step>,
    activities: Vec<Activity>,
    current_index: usize,
    plan: Vec<PlanEntry>,
    last_recommendations: Vec<Activity>,
}

impl DiagnosticEngine {
    /// Build an engine over already-loaded data. The data is not validated.
    pub fn new(steps: Vec<Step>, activities: Vec<Activity>) -> Self {
        Self {
            steps,
            activities,
            current_index: 0,
            plan: Vec::new(),
            last_recommendations: Vec::new(),
        }
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        let (steps, activities) = catalog.into_parts();
        Self::new(steps, activities)
    }

    // -- Accessors --

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The step awaiting an answer, or `None` once every step is cleared.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current_index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.steps.len()
    }

    pub fn plan(&self) -> &[PlanEntry] {
        &self.plan
    }

    pub fn last_recommendations(&self) -> &[Activity] {
        &self.last_recommendations
    }

    // -- Transitions --

    /// Submit an answer for the current step.
    ///
    /// `raw_confidence` of `None`, or outside `1..=MAX_CONFIDENCE`, counts
    /// as 0. A blank answer or a rating below [`CONFIDENCE_THRESHOLD`] takes
    /// the failure path and leaves the position unchanged. Calling this after completion returns
    /// [`Outcome::Completed`] without touching state.
    pub fn submit_answer(&mut self, raw_answer: &str, raw_confidence: Option<u8>) -> Outcome {
        let Some(step) = self.current_step() else {
            debug!("submit after completion ignored");
            return Outcome::Completed;
        };

        let answer = raw_answer.trim();
        let confidence = raw_confidence
            .filter(|n| (1..=MAX_CONFIDENCE).contains(n))
            .unwrap_or(0);

        if answer.is_empty() || confidence < CONFIDENCE_THRESHOLD {
            debug!(
                step = %step.key,
                confidence,
                blank_answer = answer.is_empty(),
                "step not cleared"
            );
            return self.fail_current_step();
        }

        let entry = PlanEntry {
            step_title: step.title.clone(),
            question: step.question.clone(),
            answer: answer.to_string(),
            confidence: Confidence::Rated(confidence),
        };
        debug!(step = %step.key, confidence, "step cleared");
        self.plan.push(entry);
        self.current_index += 1;

        match self.current_step() {
            Some(next) => Outcome::Advanced(next.clone()),
            None => {
                info!(answers = self.plan.len(), "diagnostic completed");
                Outcome::Completed
            }
        }
    }

    /// Take the failure path for the current step regardless of confidence.
    ///
    /// After completion there is no current step, so this returns
    /// [`Outcome::Completed`].
    pub fn request_help(&mut self) -> Outcome {
        if self.is_complete() {
            debug!("help requested after completion ignored");
            return Outcome::Completed;
        }
        self.fail_current_step()
    }

    fn fail_current_step(&mut self) -> Outcome {
        let index = self.current_index;
        let activities = self.record_failure(index);
        Outcome::NeedsHelp {
            step_title: self.steps[index].title.clone(),
            activities,
        }
    }

    /// Compute the recommendations for the step at `step_index` and log the
    /// failure in the plan.
    ///
    /// The failure entry is not appended again when the plan already ends
    /// with a failure for the same step. Recommendations are recomputed on
    /// every call. Returns an empty list for an out-of-range index.
    pub fn record_failure(&mut self, step_index: usize) -> Vec<Activity> {
        let Some(step) = self.steps.get(step_index) else {
            return Vec::new();
        };

        let recommendations = recommend(&self.activities, &step.key);
        info!(
            step = %step.key,
            recommended = recommendations.len(),
            "recommending activities"
        );

        let already_logged = self
            .plan
            .last()
            .is_some_and(|last| last.is_failure() && last.step_title == step.title);
        if !already_logged {
            self.plan.push(PlanEntry {
                step_title: step.title.clone(),
                question: step.question.clone(),
                answer: String::new(),
                confidence: Confidence::NotConfident,
            });
        }

        self.last_recommendations = recommendations.clone();
        recommendations
    }

    /// Start a new run over the same steps and activities.
    pub fn restart(&mut self) {
        debug!(discarded_entries = self.plan.len(), "restarting diagnostic");
        self.current_index = 0;
        self.plan.clear();
        self.last_recommendations.clear();
    }

    /// Render the plan as a plain-text document. Does not change state.
    pub fn export_plan(&self) -> String {
        export::render_plan(&self.plan, &self.last_recommendations)
    }
}

/// Activities whose category equals `key` or a universal category,
/// compared case-insensitively, in their original order.
pub fn recommend(activities: &[Activity], key: &str) -> Vec<Activity> {
    activities
        .iter()
        .filter(|a| matches_key(a, key))
        .cloned()
        .collect()
}

fn matches_key(activity: &Activity, key: &str) -> bool {
    let category = activity.category.to_lowercase();
    category == key || UNIVERSAL_CATEGORIES.contains(&category.as_str())
}
