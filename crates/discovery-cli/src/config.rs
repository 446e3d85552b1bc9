//! Configuration file management for discovery.
//!
//! Provides a TOML-based config file at `~/.config/discovery/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Env var overriding the steps data file.
pub const STEPS_PATH_ENV: &str = "DISCOVERY_STEPS_PATH";
/// Env var overriding the activities data file.
pub const ACTIVITIES_PATH_ENV: &str = "DISCOVERY_ACTIVITIES_PATH";
/// Env var overriding the directory exported plans are written to.
pub const EXPORT_DIR_ENV: &str = "DISCOVERY_EXPORT_DIR";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DataSection {
    /// Steps JSON file. Built-in steps are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<PathBuf>,
    /// Activities JSON file. Built-in activities are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the discovery config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/discovery` or
/// `~/.config/discovery`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("discovery");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("discovery")
}

/// Return the path to the discovery config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
///
/// A missing file yields `Ok(None)`; an unreadable or malformed one is an
/// error.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file at `path`, creating parent dirs as
/// needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub steps: Option<PathBuf>,
    pub activities: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// `None` means the built-in steps.
    pub steps_path: Option<PathBuf>,
    /// `None` means the built-in activities.
    pub activities_path: Option<PathBuf>,
    pub export_dir: PathBuf,
}

impl DiscoveryConfig {
    /// Resolve against the config file at the default location.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let file_config = load_config_from(&config_path())?;
        Ok(Self::resolve_with(cli, file_config.as_ref()))
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - Steps: `--steps` > `DISCOVERY_STEPS_PATH` > `data.steps` > built-in
    /// - Activities: `--activities` > `DISCOVERY_ACTIVITIES_PATH` > `data.activities` > built-in
    /// - Export dir: `--export-dir` > `DISCOVERY_EXPORT_DIR` > `export.dir` > `.`
    pub fn resolve_with(cli: &CliOverrides, file_config: Option<&ConfigFile>) -> Self {
        let steps_path = pick(
            cli.steps.as_ref(),
            STEPS_PATH_ENV,
            file_config.and_then(|c| c.data.steps.as_ref()),
        );
        let activities_path = pick(
            cli.activities.as_ref(),
            ACTIVITIES_PATH_ENV,
            file_config.and_then(|c| c.data.activities.as_ref()),
        );
        let export_dir = pick(
            cli.export_dir.as_ref(),
            EXPORT_DIR_ENV,
            file_config.and_then(|c| c.export.dir.as_ref()),
        )
        .unwrap_or_else(|| PathBuf::from("."));

        Self {
            steps_path,
            activities_path,
            export_dir,
        }
    }
}

fn pick(cli: Option<&PathBuf>, env: &str, file: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(path) = cli {
        return Some(path.clone());
    }
    match std::env::var(env) {
        Ok(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => file.cloned(),
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
