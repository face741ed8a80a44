//! User settings loaded from a TOML file.
//!
//! A missing or unreadable file yields the defaults; the tool never refuses
//! to run because of its settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use facility_model::{DEFAULT_TIME, parse_time_of_day};
use facility_schedule::{DEFAULT_LOOKAHEAD_DAYS, SchedulerOptions};

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scheduler: SchedulerSettings,
    pub import: ImportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// `HH:MM`, used when a checklist has no readable time.
    pub default_time: String,
    pub lookahead_days: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            default_time: DEFAULT_TIME.to_string(),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }
}

impl SchedulerSettings {
    pub fn to_options(&self) -> SchedulerOptions {
        let mut options = SchedulerOptions::new().with_lookahead_days(self.lookahead_days);
        match parse_time_of_day(&self.default_time) {
            Some(time) => options = options.with_default_time(time),
            None => warn!(
                default_time = %self.default_time,
                "ignoring unreadable default_time setting"
            ),
        }
        options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Facility stamped onto imported records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,
}

impl Settings {
    /// Load from `explicit` when given, otherwise from [`Self::config_path`].
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|error| {
            warn!(path = %path.display(), %error, "invalid settings file, using defaults");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("write settings {}", path.display()))
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "Facility", "facility")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }
}
