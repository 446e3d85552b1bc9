use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing::info;

/// Write an exported plan to `dir` as `discovery-plan-<unix millis>.txt`.
///
/// The document is followed by a `Generated:` footer stamped with `now`.
pub fn write_plan_file(
    dir: &Path,
    document: &str,
    now: DateTime<Local>,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create export directory: {}", dir.display()))?;

    let path = dir.join(format!("discovery-plan-{}.txt", now.timestamp_millis()));
    let contents = format!(
        "{document}Generated: {}\n",
        now.format("%Y-%m-%d %H:%M:%S")
    );
    std::fs::write(&path, contents)
        .with_context(|| format!("cannot write plan file: {}", path.display()))?;

    info!(path = %path.display(), "plan exported");
    Ok(path)
}
