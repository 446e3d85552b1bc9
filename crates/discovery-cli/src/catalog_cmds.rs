//! `discovery steps`, `discovery activities` and `discovery recommend`.

use std::io::Write;

use anyhow::{Result, bail};

use discovery_core::engine::recommend;
use discovery_core::Catalog;

use crate::render;

/// List the steps in flow order.
pub fn run_steps(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<4} {:<15} {}", "#", "KEY", "TITLE")?;
    writeln!(out, "{}", "-".repeat(50))?;
    for step in catalog.steps() {
        writeln!(
            out,
            "{:<4} {:<15} {} {}",
            step.order, step.key, step.emoji, step.title
        )?;
    }
    Ok(())
}

/// List activities, optionally only those in `category`.
pub fn run_activities(
    catalog: &Catalog,
    category: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let activities: Vec<_> = match category {
        Some(c) => catalog.activities_in(c),
        None => catalog.activities().iter().collect(),
    };

    if activities.is_empty() {
        match category {
            Some(c) => {
                let known = catalog.categories().join(", ");
                writeln!(out, "No activities in category {c:?}. Known categories: {known}")?;
            }
            None => writeln!(out, "No activities found.")?,
        }
        return Ok(());
    }

    for (i, activity) in activities.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        render::activity_card(out, i + 1, activity)?;
    }
    Ok(())
}

/// Show the activities recommended when the step with `key` is failed.
pub fn run_recommend(catalog: &Catalog, key: &str, out: &mut impl Write) -> Result<()> {
    let Some(step) = catalog.step_by_key(key) else {
        let known: Vec<&str> = catalog.steps().iter().map(|s| s.key.as_str()).collect();
        bail!("unknown step key {key:?} (expected one of: {})", known.join(", "));
    };
    let activities = recommend(catalog.activities(), &step.key);
    render::results(out, &step.title, &activities)?;
    Ok(())
}
