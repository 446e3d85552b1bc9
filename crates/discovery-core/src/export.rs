//! Plain-text rendering of a run's plan.

use std::fmt::Write;

use crate::model::{Activity, PlanEntry};

/// Heading at the top of every exported plan.
pub const PLAN_HEADER: &str = "=== DISCOVERY ASSISTANT - YOUR PLAN ===";

/// Line written when no step was cleared.
pub const NO_CONFIDENT_ANSWERS: &str = "No confident answers were provided.";

/// Step title used when recommendations exist without a logged failure.
const UNKNOWN_STEP: &str = "an unrecorded step";

/// Render confident answers and, when present, the recommended activities.
///
/// Output depends only on the arguments.
pub fn render_plan(plan: &[PlanEntry], recommendations: &[Activity]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_plan(&mut out, plan, recommendations);
    out
}

fn write_plan(
    out: &mut String,
    plan: &[PlanEntry],
    recommendations: &[Activity],
) -> std::fmt::Result {
    writeln!(out, "{PLAN_HEADER}")?;
    writeln!(out)?;

    let confident: Vec<&PlanEntry> = plan.iter().filter(|e| !e.is_failure()).collect();
    if confident.is_empty() {
        writeln!(out, "{NO_CONFIDENT_ANSWERS}")?;
        writeln!(out)?;
    }
    for (i, entry) in confident.iter().enumerate() {
        writeln!(out, "STEP {}: {}", i + 1, entry.step_title)?;
        writeln!(out, "Question: {}", entry.question)?;
        writeln!(out, "Your Answer: {}", entry.answer)?;
        writeln!(out, "Confidence: {}/5", entry.confidence)?;
        writeln!(out)?;
    }

    if recommendations.is_empty() {
        return Ok(());
    }

    let failed_step = plan
        .iter()
        .rev()
        .find(|e| e.is_failure())
        .map_or(UNKNOWN_STEP, |e| e.step_title.as_str());
    writeln!(out, "=== Recommended Activities for \"{failed_step}\" ===")?;
    writeln!(out)?;
    for (i, activity) in recommendations.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, activity.name)?;
        writeln!(out, "   Category: {}", activity.category)?;
        writeln!(out, "   Duration: {}", activity.duration)?;
        writeln!(out, "   About: {}", activity.about)?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Confidence;

    fn confident(step: &str, answer: &str, rating: u8) -> PlanEntry {
        PlanEntry {
            step_title: step.to_string(),
            question: "Q".to_string(),
            answer: answer.to_string(),
            confidence: Confidence::Rated(rating),
        }
    }

    fn failure(step: &str) -> PlanEntry {
        PlanEntry {
            step_title: step.to_string(),
            question: "Q".to_string(),
            answer: String::new(),
            confidence: Confidence::NotConfident,
        }
    }

    fn activity(name: &str) -> Activity {
        Activity {
            name: name.to_string(),
            category: "Core Techniques".to_string(),
            duration: "45 min".to_string(),
            about: "Warm up".to_string(),
            description: Some("Long text".to_string()),
            instructions: vec!["Do it".to_string()],
        }
    }

    #[test]
    fn empty_plan_states_no_answers() {
        let text = render_plan(&[], &[]);
        assert!(text.starts_with(PLAN_HEADER));
        assert!(text.contains(NO_CONFIDENT_ANSWERS));
        assert!(!text.contains("Recommended Activities"));
    }

    #[test]
    fn confident_entry_is_rendered() {
        let text = render_plan(&[confident("Agreeing On Goals", "Ans", 4)], &[]);
        assert!(text.contains("STEP 1: Agreeing On Goals"));
        assert!(text.contains("Your Answer: Ans"));
        assert!(text.contains("Confidence: 4/5"));
        assert!(!text.contains(NO_CONFIDENT_ANSWERS));
        assert!(!text.contains("Recommended Activities"));
    }

    #[test]
    fn failure_entries_are_not_listed_as_answers() {
        let plan = [
            confident("Agreeing On Goals", "Ans", 4),
            failure("Framing The Problem"),
        ];
        let text = render_plan(&plan, &[activity("Warmup"), activity("Retro")]);
        assert!(!text.contains("STEP 2"));
        assert!(text.contains("=== Recommended Activities for \"Framing The Problem\" ==="));
        let warmup = text.find("1. Warmup").expect("first activity");
        let retro = text.find("2. Retro").expect("second activity");
        assert!(warmup < retro);
        assert!(text.contains("   Duration: 45 min"));
        assert!(text.contains("   About: Warm up"));
        // Long descriptions stay out of the export.
        assert!(!text.contains("Long text"));
    }

    #[test]
    fn recommendations_without_failure_use_fallback_label() {
        let text = render_plan(&[], &[activity("Warmup")]);
        assert!(text.contains(UNKNOWN_STEP));
        assert!(text.contains(NO_CONFIDENT_ANSWERS));
    }
}
