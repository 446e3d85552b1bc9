//! JSON parser for step and activity data, with load-time normalization.
//!
//! Parses the two data files and:
//! - Trims and lowercases step keys.
//! - Trims activity categories (display case is kept).
//! - Orders steps by their `order` field.
//! - Rejects an empty step list and duplicate step keys.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::engine::UNIVERSAL_CATEGORIES;
use crate::model::{Activity, Step};

/// Number of steps in the standard diagnostic.
pub const EXPECTED_STEP_COUNT: usize = 7;

/// Errors that can occur while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("step list must contain at least one step")]
    NoSteps,

    #[error("duplicate step key: {0:?}")]
    DuplicateStepKey(String),

    #[error("step {title:?} has an empty key")]
    EmptyStepKey { title: String },
}

/// Parse and normalize the steps JSON array.
pub fn parse_steps(content: &str) -> Result<Vec<Step>, CatalogError> {
    let mut steps: Vec<Step> =
        serde_json::from_str(content).map_err(|source| CatalogError::Json {
            what: "steps",
            source,
        })?;

    for step in &mut steps {
        step.key = step.key.trim().to_lowercase();
    }
    // Stable: equal orders keep file order.
    steps.sort_by_key(|s| s.order);

    validate_steps(&steps)?;
    Ok(steps)
}

/// Parse and normalize the activities JSON array.
pub fn parse_activities(content: &str) -> Result<Vec<Activity>, CatalogError> {
    let mut activities: Vec<Activity> =
        serde_json::from_str(content).map_err(|source| CatalogError::Json {
            what: "activities",
            source,
        })?;

    for activity in &mut activities {
        let trimmed = activity.category.trim();
        if trimmed.len() != activity.category.len() {
            activity.category = trimmed.to_string();
        }
    }
    Ok(activities)
}

fn validate_steps(steps: &[Step]) -> Result<(), CatalogError> {
    if steps.is_empty() {
        return Err(CatalogError::NoSteps);
    }

    let mut seen = HashSet::new();
    for step in steps {
        if step.key.is_empty() {
            return Err(CatalogError::EmptyStepKey {
                title: step.title.clone(),
            });
        }
        if !seen.insert(step.key.as_str()) {
            return Err(CatalogError::DuplicateStepKey(step.key.clone()));
        }
    }

    if steps.len() != EXPECTED_STEP_COUNT {
        warn!(
            count = steps.len(),
            expected = EXPECTED_STEP_COUNT,
            "unexpected number of steps"
        );
    }
    Ok(())
}

/// Log activities that no step would ever recommend.
pub(crate) fn warn_unreachable_activities(steps: &[Step], activities: &[Activity]) {
    for activity in activities {
        let category = activity.category.to_lowercase();
        let reachable = UNIVERSAL_CATEGORIES.contains(&category.as_str())
            || steps.iter().any(|s| s.key == category);
        if !reachable {
            warn!(
                activity = %activity.name,
                category = %activity.category,
                "activity category matches no step"
            );
        }
    }
}
