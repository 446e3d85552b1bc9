//! Step and activity catalog: the static data the engine runs over.
//!
//! The built-in catalog is defined in `data/steps.json` and
//! `data/activities.json` and embedded in the binary at compile time.
//! Alternative data files can be loaded from disk.

pub mod parser;

use std::path::Path;

use tracing::debug;

use crate::model::{Activity, Step};

pub use parser::{CatalogError, EXPECTED_STEP_COUNT, parse_activities, parse_steps};

/// The embedded steps JSON.
static STEPS_JSON: &str = include_str!("data/steps.json");

/// The embedded activities JSON.
static ACTIVITIES_JSON: &str = include_str!("data/activities.json");

/// Validated steps and activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    steps: Vec<Step>,
    activities: Vec<Activity>,
}

impl Catalog {
    /// Load the catalog embedded in the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded JSON is malformed. The files are compiled in,
    /// so a built binary always carries valid data.
    pub fn builtin() -> Self {
        Self::from_json(STEPS_JSON, ACTIVITIES_JSON).expect("embedded catalog data is invalid")
    }

    /// Parse a catalog from the two JSON documents.
    pub fn from_json(steps_json: &str, activities_json: &str) -> Result<Self, CatalogError> {
        let steps = parse_steps(steps_json)?;
        let activities = parse_activities(activities_json)?;
        parser::warn_unreachable_activities(&steps, &activities);
        debug!(
            steps = steps.len(),
            activities = activities.len(),
            "catalog loaded"
        );
        Ok(Self { steps, activities })
    }

    /// Load a catalog from files. A `None` path falls back to the embedded
    /// data for that half.
    pub fn load(
        steps_path: Option<&Path>,
        activities_path: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let steps_json = match steps_path {
            Some(path) => read(path)?,
            None => STEPS_JSON.to_string(),
        };
        let activities_json = match activities_path {
            Some(path) => read(path)?,
            None => ACTIVITIES_JSON.to_string(),
        };
        Self::from_json(&steps_json, &activities_json)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Look a step up by its key, case-insensitively.
    pub fn step_by_key(&self, key: &str) -> Option<&Step> {
        let key = key.trim().to_lowercase();
        self.steps.iter().find(|s| s.key == key)
    }

    /// Distinct activity categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for activity in &self.activities {
            if !out
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&activity.category))
            {
                out.push(&activity.category);
            }
        }
        out
    }

    /// Activities in the given category, compared case-insensitively.
    pub fn activities_in(&self, category: &str) -> Vec<&Activity> {
        let category = category.trim().to_lowercase();
        self.activities
            .iter()
            .filter(|a| a.category.to_lowercase() == category)
            .collect()
    }

    pub fn into_parts(self) -> (Vec<Step>, Vec<Activity>) {
        (self.steps, self.activities)
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
