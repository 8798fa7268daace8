use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::icons;

// CI Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CiStatus {
    #[default]
    Unknown,
    Pending,
    Pass,
    Fail,
}

impl CiStatus {
    pub fn display(self) -> (&'static str, ratatui::style::Color) {
        use ratatui::style::Color;
        match self {
            CiStatus::Unknown => ("N/A", Color::DarkGray),
            CiStatus::Pending => (icons::CI_PENDING_DISPLAY, Color::Yellow),
            CiStatus::Pass => (icons::CI_SUCCESS_DISPLAY, Color::Green),
            CiStatus::Fail => (icons::CI_FAILURE_DISPLAY, Color::Red),
        }
    }

    /// Whether this outcome keeps a PR off the review queue.
    /// `Unknown` is not blocking: snapshots often carry no CI data at all.
    pub fn blocks_review(self) -> bool {
        matches!(self, CiStatus::Fail | CiStatus::Pending)
    }
}

impl FromStr for CiStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "PENDING" | "EXPECTED" => CiStatus::Pending,
            "SUCCESS" => CiStatus::Pass,
            "FAILURE" | "ERROR" => CiStatus::Fail,
            _ => CiStatus::Unknown,
        })
    }
}

/// Canonical category of a raw label. Several raw names collapse onto one
/// category; labels without a category are irrelevant for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LabelCategory {
    /// Approved and sent to the merge bot.
    Bors,
    Blocked,
    MergeConflict,
    AwaitingAuthor,
    AwaitingCI,
    AwaitingZulip,
    /// Plain "awaiting-review" marker.
    AwaitingReview,
    /// Manual override forcing the review state; always contradictory.
    ForceReview,
    WIP,
    Delegated,
    HelpWanted,
}

/// Review status of a PR: exactly one per PR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PrStatus {
    AwaitingReview,
    Blocked,
    AwaitingAuthor,
    MergeConflict,
    HelpWanted,
    NotReady,
    AwaitingDecision,
    Contradictory,
    Delegated,
    AwaitingBors,
    /// Never produced by the classifier; closed PRs are filtered upstream.
    Closed,
}

impl PrStatus {
    pub const ALL: [PrStatus; 11] = [
        PrStatus::AwaitingReview,
        PrStatus::Blocked,
        PrStatus::AwaitingAuthor,
        PrStatus::MergeConflict,
        PrStatus::HelpWanted,
        PrStatus::NotReady,
        PrStatus::AwaitingDecision,
        PrStatus::Contradictory,
        PrStatus::Delegated,
        PrStatus::AwaitingBors,
        PrStatus::Closed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrStatus::AwaitingReview => "awaiting review",
            PrStatus::Blocked => "blocked",
            PrStatus::AwaitingAuthor => "awaiting author",
            PrStatus::MergeConflict => "merge conflict",
            PrStatus::HelpWanted => "help wanted",
            PrStatus::NotReady => "not ready",
            PrStatus::AwaitingDecision => "awaiting decision",
            PrStatus::Contradictory => "contradictory",
            PrStatus::Delegated => "delegated",
            PrStatus::AwaitingBors => "awaiting bors",
            PrStatus::Closed => "closed",
        }
    }
}

/// The worklists shown on the dashboard.
/// Boards are listed in the order of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Dashboard {
    Queue,
    QueueNewContributor,
    QueueEasy,
    StaleReadyToMerge,
    StaleDelegated,
    StaleMaintainerMerge,
    /// Ready PRs (not draft, not WIP) labelled "tech debt".
    TechDebt,
    /// Blocked on a zulip discussion or similar.
    NeedsDecision,
    /// Would be on the queue if not for a merge conflict.
    NeedsMerge,
    StaleNewContributor,
    /// Labelled please-adopt or help-wanted.
    NeedsHelp,
    /// Non-draft PRs into a branch other than the main one.
    OtherBase,
    /// Ready PRs whose title lacks a conventional prefix.
    BadTitle,
    /// Ready feature PRs without a topic label.
    Unlabelled,
    ContradictoryLabels,
}

impl Dashboard {
    pub const ALL: [Dashboard; 15] = [
        Dashboard::Queue,
        Dashboard::QueueNewContributor,
        Dashboard::QueueEasy,
        Dashboard::StaleReadyToMerge,
        Dashboard::StaleDelegated,
        Dashboard::StaleMaintainerMerge,
        Dashboard::TechDebt,
        Dashboard::NeedsDecision,
        Dashboard::NeedsMerge,
        Dashboard::StaleNewContributor,
        Dashboard::NeedsHelp,
        Dashboard::OtherBase,
        Dashboard::BadTitle,
        Dashboard::Unlabelled,
        Dashboard::ContradictoryLabels,
    ];

    /// Anchor id and section heading.
    pub fn id_title(self) -> (&'static str, &'static str) {
        match self {
            Dashboard::Queue => ("queue", "Review queue"),
            Dashboard::QueueNewContributor => {
                ("queue-new-contributors", "New contributors' PRs on the queue")
            }
            Dashboard::QueueEasy => ("queue-easy", "PRs on the review queue labelled 'easy'"),
            Dashboard::StaleReadyToMerge => ("stale-ready-to-merge", "Stale ready-to-merge'd PRs"),
            Dashboard::StaleDelegated => ("stale-delegated", "Stale delegated PRs"),
            Dashboard::StaleMaintainerMerge => {
                ("stale-maintainer-merge", "Stale maintainer-merge'd PRs")
            }
            Dashboard::TechDebt => ("tech-debt", "Ready PRs labelled technical debt"),
            Dashboard::NeedsDecision => ("needs-decision", "PRs blocked on a zulip discussion"),
            Dashboard::NeedsMerge => ("needs-merge", "PRs with just a merge conflict"),
            Dashboard::StaleNewContributor => {
                ("stale-new-contributor", "Stale new contributor PRs")
            }
            Dashboard::NeedsHelp => ("needs-owner", "PRs looking for help"),
            Dashboard::OtherBase => ("other-base", "PRs not into the main branch"),
            Dashboard::BadTitle => ("bad-title", "PRs with non-conforming titles"),
            Dashboard::Unlabelled => ("unlabelled", "PRs without an area label"),
            Dashboard::ContradictoryLabels => {
                ("contradictory-labels", "PRs with contradictory labels")
            }
        }
    }

    /// What the board contains, phrased for a "there are no such PRs" notice.
    pub fn short_description(self) -> &'static str {
        match self {
            Dashboard::Queue => "PRs on the review queue",
            Dashboard::QueueNewContributor => "PRs by new contributors on the review queue",
            Dashboard::QueueEasy => "PRs on the review queue which are labelled 'easy'",
            Dashboard::StaleReadyToMerge => {
                "stale PRs labelled auto-merge-after-CI or ready-to-merge"
            }
            Dashboard::StaleDelegated => "stale delegated PRs",
            Dashboard::StaleMaintainerMerge => "stale PRs labelled maintainer merge",
            Dashboard::TechDebt => "ready PRs labelled with 'tech debt'",
            Dashboard::NeedsDecision => "PRs blocked on a zulip discussion or similar",
            Dashboard::NeedsMerge => "PRs which just have a merge conflict",
            Dashboard::StaleNewContributor => "stale PRs by new contributors",
            Dashboard::NeedsHelp => "PRs which are looking for help",
            Dashboard::OtherBase => "ready PRs into a non-main branch",
            Dashboard::BadTitle => {
                "ready PRs whose title does not start with an abbreviation like 'feat', 'style' or 'perf'"
            }
            Dashboard::Unlabelled => "ready PRs without a 'CI' or 't-something' label",
            Dashboard::ContradictoryLabels => "PRs with contradictory labels",
        }
    }

    /// Full description, used as a sub-title. Not capitalised.
    pub fn long_description(self) -> String {
        let not_updated = "which have not been updated in the past";
        match self {
            Dashboard::Queue => "all PRs which are ready for review: CI passes, no merge conflict and not blocked on other PRs".into(),
            Dashboard::QueueNewContributor => "all PRs by new contributors which are ready for review".into(),
            Dashboard::QueueEasy => "all PRs labelled 'easy' which are ready for review".into(),
            Dashboard::StaleReadyToMerge => format!("all PRs labelled 'auto-merge-after-CI' or 'ready-to-merge' {not_updated} 24 hours"),
            Dashboard::StaleDelegated => format!("all PRs labelled 'delegated' {not_updated} 24 hours"),
            Dashboard::StaleMaintainerMerge => format!("all PRs labelled 'maintainer-merge' but not 'ready-to-merge' {not_updated} 24 hours"),
            Dashboard::TechDebt => "all ready PRs (not draft, not labelled WIP) labelled with 'tech debt'".into(),
            Dashboard::NeedsDecision => "all PRs labelled 'awaiting-zulip': these are blocked on a zulip discussion or similar".into(),
            Dashboard::NeedsMerge => "all PRs which have a merge conflict, but otherwise fit the review queue".into(),
            Dashboard::StaleNewContributor => format!("all PRs labelled 'new-contributor' {not_updated} 7 days"),
            Dashboard::NeedsHelp => "all PRs which are labelled 'please-adopt' or 'help-wanted'".into(),
            Dashboard::OtherBase => "all non-draft PRs into some branch other than the main branch".into(),
            Dashboard::BadTitle => "all PRs without draft status or 'WIP' label whose title does not start with an abbreviation like 'feat', 'style' or 'perf'".into(),
            Dashboard::Unlabelled => "all feature PRs without draft status or 'WIP' label without a 'CI' or 't-something' label".into(),
            Dashboard::ContradictoryLabels => "PRs whose labels are contradictory, such as 'WIP' and 'ready-to-merge'".into(),
        }
    }

    /// Board kind of a pre-queried input file, keyed by file name.
    pub fn from_input_file(name: &str) -> Option<Dashboard> {
        INPUT_FILES
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, kind)| *kind)
    }
}

/// Pre-queried board files accepted on the command line.
pub const INPUT_FILES: &[(&str, Dashboard)] = &[
    ("queue.json", Dashboard::Queue),
    ("ready-to-merge.json", Dashboard::StaleReadyToMerge),
    ("automerge.json", Dashboard::StaleReadyToMerge),
    ("needs-merge.json", Dashboard::NeedsMerge),
    ("maintainer-merge.json", Dashboard::StaleMaintainerMerge),
    ("needs-decision.json", Dashboard::NeedsDecision),
    ("delegated.json", Dashboard::StaleDelegated),
    ("other-base-branch.json", Dashboard::OtherBase),
    ("new-contributor.json", Dashboard::StaleNewContributor),
    ("please-adopt.json", Dashboard::NeedsHelp),
    ("help-wanted.json", Dashboard::NeedsHelp),
];

// Snapshot JSON types, as written by the GraphQL search queries upstream.

#[derive(Debug, Deserialize)]
pub struct SnapshotFile {
    pub output: Vec<SearchGraphQLResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SearchGraphQLResponse {
    pub data: SearchGraphQLData,
}

#[derive(Debug, Deserialize)]
pub struct SearchGraphQLData {
    pub search: SearchConnection,
}

#[derive(Debug, Deserialize)]
pub struct SearchConnection {
    pub nodes: Vec<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorNode {
    pub login: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct LabelNode {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct LabelConnection {
    pub nodes: Vec<LabelNode>,
}

#[derive(Debug, Deserialize)]
pub struct CommitConnection {
    pub nodes: Vec<CommitNode>,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    pub commit: CommitData,
}

#[derive(Debug, Deserialize)]
pub struct CommitData {
    #[serde(rename = "statusCheckRollup")]
    pub status_check_rollup: Option<StatusCheckRollup>,
}

#[derive(Debug, Deserialize)]
pub struct StatusCheckRollup {
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestNode {
    pub number: u64,
    pub author: Option<AuthorNode>,
    pub title: String,
    pub url: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub labels: Option<LabelConnection>,
    #[serde(rename = "isDraft")]
    pub is_draft: Option<bool>,
    #[serde(rename = "baseRefName")]
    pub base_ref_name: Option<String>,
    pub commits: Option<CommitConnection>,
}

impl PullRequestNode {
    /// CI outcome of the latest commit, if the query asked for it.
    pub fn ci_status(&self) -> CiStatus {
        self.commits
            .as_ref()
            .and_then(|c| c.nodes.last())
            .and_then(|n| n.commit.status_check_rollup.as_ref())
            .map(|r| r.state.parse().unwrap_or_default())
            .unwrap_or_default()
    }
}
