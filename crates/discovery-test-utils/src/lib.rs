//! Shared test fixtures for discovery tests.
//!
//! Builders for steps and activities, plus a small catalog that mirrors the
//! shape of the real seven-step diagnostic without depending on its text.

use discovery_core::{Activity, DiagnosticEngine, Step};

/// Step keys of the standard diagnostic, in order.
pub const STEP_KEYS: [&str; 7] = [
    "goals",
    "understanding",
    "framing",
    "ideating",
    "evaluating",
    "prioritizing",
    "testing",
];

/// Build a step whose question is derived from its title.
pub fn step(order: u32, key: &str, title: &str) -> Step {
    Step {
        order,
        emoji: "*".to_string(),
        title: title.to_string(),
        question: format!("{title}?"),
        key: key.to_string(),
    }
}

/// Build an activity with placeholder duration and summary.
pub fn activity(name: &str, category: &str) -> Activity {
    Activity {
        name: name.to_string(),
        category: category.to_string(),
        duration: "30 min".to_string(),
        about: format!("About {name}"),
        description: None,
        instructions: Vec::new(),
    }
}

/// Seven steps titled `Step 1` .. `Step 7` keyed by [`STEP_KEYS`].
pub fn seven_steps() -> Vec<Step> {
    STEP_KEYS
        .iter()
        .enumerate()
        .map(|(i, key)| step(i as u32 + 1, key, &format!("Step {}", i + 1)))
        .collect()
}

/// One activity per step key (capitalized category) plus one in each
/// universal category and one that no step matches.
pub fn sample_activities() -> Vec<Activity> {
    let mut out: Vec<Activity> = STEP_KEYS
        .iter()
        .map(|key| activity(&format!("{key} drill"), &capitalize(key)))
        .collect();
    out.push(activity("Five Whys", "Core Techniques"));
    out.push(activity("Retro", "Discussions"));
    out.push(activity("Orphan", "Unrelated"));
    out
}

/// An engine over [`seven_steps`] and [`sample_activities`].
pub fn sample_engine() -> DiagnosticEngine {
    DiagnosticEngine::new(seven_steps(), sample_activities())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
