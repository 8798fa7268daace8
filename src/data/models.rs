use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::CiStatus;

/// A label as shown on a PR. Two labels are the same label iff their names match.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub name: String,
    /// Background colour, as a six-digit hexadecimal code.
    pub color: String,
    pub url: String,
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Label {}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: "ededed".to_string(),
            url: String::new(),
        }
    }

    /// RGB components of the background colour, if it is well-formed.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// Whether dark text reads better on this label, by perceived luminance.
    pub fn is_light(&self) -> bool {
        match self.rgb() {
            Some((r, g, b)) => {
                let darkness =
                    1.0 - (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
                darkness < 0.5
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Author {
    pub login: String,
    pub url: String,
}

/// Basic information about one open PR, as taken from a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub author: Author,
    pub title: String,
    pub url: String,
    /// Unique by name; kept in snapshot order for display.
    pub labels: Vec<Label>,
    pub updated_at: DateTime<Utc>,
    pub is_draft: bool,
    pub ci_status: CiStatus,
    pub base_branch: Option<String>,
}

impl PullRequest {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    pub fn has_any_label(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_label(name))
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// Size and discussion metrics of a PR, from the detail file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrMetrics {
    pub additions: i64,
    pub deletions: i64,
    pub changed_files: i64,
    pub comments: i64,
    pub review_comments: i64,
}

impl PrMetrics {
    /// Stand-in for PRs without detailed information.
    pub const MISSING: PrMetrics = PrMetrics {
        additions: -1,
        deletions: -1,
        changed_files: -1,
        comments: -1,
        review_comments: -1,
    };

    pub fn is_missing(&self) -> bool {
        *self == Self::MISSING
    }

    /// Standard plus review comments; -1 when missing.
    pub fn total_comments(&self) -> i64 {
        if self.is_missing() {
            -1
        } else {
            self.comments + self.review_comments
        }
    }
}
