use chrono::Duration;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const CONFIG_FILE: &str = "config.toml";

/// Tunables of the dashboard boards. Every field defaults to the values the
/// dashboard has always used, so an empty file is a valid configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Branch that counts as the main target; other bases go to `OtherBase`.
    pub main_branch: String,
    /// Conventional title prefixes; titles without one are `BadTitle`.
    pub title_prefixes: Vec<String>,
    /// Titles with this prefix must carry a topic label.
    pub feature_prefix: String,
    pub topic_labels: Vec<String>,
    pub topic_label_prefix: String,
    /// Staleness threshold of the delegated and ready-to-merge boards.
    pub stale_hours: i64,
    /// Staleness threshold of the new-contributor board.
    pub new_contributor_stale_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            main_branch: "master".to_string(),
            title_prefixes: ["feat", "chore", "perf", "refactor", "style", "fix", "doc"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            feature_prefix: "feat".to_string(),
            topic_labels: vec!["CI".to_string(), "IMO".to_string()],
            topic_label_prefix: "t-".to_string(),
            stale_hours: 24,
            new_contributor_stale_days: 7,
        }
    }
}

impl DashboardConfig {
    pub fn stale_threshold(&self) -> Duration {
        Duration::try_hours(self.stale_hours).unwrap_or(Duration::MAX)
    }

    pub fn new_contributor_threshold(&self) -> Duration {
        Duration::try_days(self.new_contributor_stale_days).unwrap_or(Duration::MAX)
    }

    /// First threshold field that is negative or too large for a duration.
    fn out_of_range(&self) -> Option<(&'static str, i64)> {
        if self.stale_hours < 0 || Duration::try_hours(self.stale_hours).is_none() {
            return Some(("stale_hours", self.stale_hours));
        }
        let days = self.new_contributor_stale_days;
        if days < 0 || Duration::try_days(days).is_none() {
            return Some(("new_contributor_stale_days", days));
        }
        None
    }

    pub fn is_topic_label(&self, name: &str) -> bool {
        self.topic_labels.iter().any(|t| t == name) || name.starts_with(&self.topic_label_prefix)
    }

    pub fn has_conventional_title(&self, title: &str) -> bool {
        self.title_prefixes.iter().any(|p| title.starts_with(p.as_str()))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the global
    /// `~/.config/queueboard/config.toml` is used if present, and the
    /// defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        match global_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading dashboard config from: {}", path.display());
                Self::load_from_path(&path)
            }
            _ => {
                tracing::debug!("No dashboard config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some((field, value)) = config.out_of_range() {
            return Err(Error::ConfigValue {
                path: path.to_path_buf(),
                field,
                value,
            });
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("queueboard").join(CONFIG_FILE))
}
