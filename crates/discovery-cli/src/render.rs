//! Terminal rendering of steps, progress, results and activity details.

use std::io::{self, Write};

use discovery_core::{Activity, PlanEntry, Step};

/// Print the card for the step awaiting an answer.
pub fn step_card(out: &mut impl Write, step: &Step, total: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} Step {} of {}: {}", step.emoji, step.order, total, step.title)?;
    writeln!(out, "{}", step.question)?;
    Ok(())
}

/// Print the confident answers given so far.
pub fn summary(out: &mut impl Write, plan: &[PlanEntry]) -> io::Result<()> {
    let cleared: Vec<&PlanEntry> = plan.iter().filter(|e| !e.is_failure()).collect();
    if cleared.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Progress:")?;
    for entry in cleared {
        writeln!(
            out,
            "  {} — Confidence: {}/5",
            entry.step_title, entry.confidence
        )?;
    }
    Ok(())
}

/// Print the preamble and one card per recommended activity.
pub fn results(out: &mut impl Write, step_title: &str, activities: &[Activity]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "You need help with \"{step_title}\". Here are {} activities that can help:",
        activities.len()
    )?;
    for (i, activity) in activities.iter().enumerate() {
        writeln!(out)?;
        activity_card(out, i + 1, activity)?;
    }
    Ok(())
}

/// Print an activity's name, metadata and summary.
pub fn activity_card(out: &mut impl Write, number: usize, activity: &Activity) -> io::Result<()> {
    writeln!(out, "{number}. {}", activity.name)?;
    writeln!(
        out,
        "   Duration: {} | Category: {}",
        display_or_dash(&activity.duration),
        activity.category
    )?;
    if !activity.about.is_empty() {
        writeln!(out, "   {}", activity.about)?;
    }
    Ok(())
}

/// Print the expanded view of one activity: description and instructions.
pub fn activity_details(out: &mut impl Write, activity: &Activity) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {} ---", activity.name)?;
    match activity.description_text() {
        Some(text) => writeln!(out, "{text}")?,
        None => writeln!(out, "No description available.")?,
    }
    if activity.instructions.is_empty() {
        writeln!(out, "No instructions available.")?;
    } else {
        writeln!(out)?;
        writeln!(out, "Instructions:")?;
        for (i, line) in activity.instructions.iter().enumerate() {
            writeln!(out, "  {}. {line}", i + 1)?;
        }
    }
    Ok(())
}

/// Print the message shown once every step is cleared.
pub fn completed(out: &mut impl Write, total: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "🎉 Congratulations! You've completed the diagnostic. You're ready to move forward."
    )?;
    writeln!(
        out,
        "You have clear answers and high confidence across all {total} discovery steps."
    )?;
    Ok(())
}

fn display_or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_core::Confidence;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn activity() -> Activity {
        Activity {
            name: "Crazy 8s".to_string(),
            category: "Ideating".to_string(),
            duration: String::new(),
            about: "Sketch eight ideas".to_string(),
            description: None,
            instructions: vec![],
        }
    }

    #[test]
    fn results_preamble_counts_activities() {
        let text = render(|out| results(out, "Generating Ideas", &[activity()]));
        assert!(text.contains(
            "You need help with \"Generating Ideas\". Here are 1 activities that can help:"
        ));
        assert!(text.contains("1. Crazy 8s"));
        assert!(text.contains("Duration: - | Category: Ideating"));
    }

    #[test]
    fn details_degrade_without_description() {
        let text = render(|out| activity_details(out, &activity()));
        assert!(text.contains("No description available."));
        assert!(text.contains("No instructions available."));
    }

    #[test]
    fn details_list_instructions_in_order() {
        let mut a = activity();
        a.description = Some("Fold paper.".to_string());
        a.instructions = vec!["Fold".to_string(), "Sketch".to_string()];
        let text = render(|out| activity_details(out, &a));
        assert!(text.contains("Fold paper."));
        assert!(text.contains("  1. Fold\n  2. Sketch\n"));
    }

    #[test]
    fn summary_skips_failures() {
        let plan = vec![
            PlanEntry {
                step_title: "Agreeing On Goals".to_string(),
                question: "Q".to_string(),
                answer: "A".to_string(),
                confidence: Confidence::Rated(4),
            },
            PlanEntry {
                step_title: "Understanding The Problem".to_string(),
                question: "Q".to_string(),
                answer: String::new(),
                confidence: Confidence::NotConfident,
            },
        ];
        let text = render(|out| summary(out, &plan));
        assert!(text.contains("Agreeing On Goals — Confidence: 4/5"));
        assert!(!text.contains("Understanding"));
    }
}
