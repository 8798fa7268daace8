//! Grouping of PRs into the named dashboard boards.
//!
//! Boards are views, not a partition: a PR may sit on several of them.
//! Every board keeps the input order of the snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::DashboardConfig;
use crate::data::{Dashboard, PullRequest};

use super::contradiction::has_contradictory_labels;
use super::queue_check::QueueChecklist;
use super::staleness::is_stale;

/// Board lists provided pre-queried by the snapshot, keyed by kind.
pub type SuppliedBoards = BTreeMap<Dashboard, Vec<PullRequest>>;

const READY_TO_MERGE_LABELS: &[&str] = &["ready-to-merge", "auto-merge-after-CI"];

/// Everything a board predicate may depend on besides the PR itself.
#[derive(Debug, Clone, Copy)]
pub struct BoardContext<'a> {
    pub now: DateTime<Utc>,
    pub config: &'a DashboardConfig,
}

impl BoardContext<'_> {
    fn stale(&self, pr: &PullRequest) -> bool {
        is_stale(pr, self.now, self.config.stale_threshold())
    }

    fn on_queue(&self, pr: &PullRequest) -> bool {
        QueueChecklist::for_pr(pr, self.config).on_queue()
    }
}

fn is_wip(pr: &PullRequest) -> bool {
    pr.is_draft || pr.has_label("WIP")
}

fn has_topic_label(pr: &PullRequest, config: &DashboardConfig) -> bool {
    pr.label_names().any(|l| config.is_topic_label(l))
}

/// Whether `pr` belongs on the board `kind`.
pub fn belongs_to(kind: Dashboard, pr: &PullRequest, ctx: &BoardContext<'_>) -> bool {
    if pr.is_draft {
        return false;
    }
    let config = ctx.config;
    match kind {
        Dashboard::Queue => ctx.on_queue(pr),
        Dashboard::QueueNewContributor => ctx.on_queue(pr) && pr.has_label("new-contributor"),
        Dashboard::QueueEasy => ctx.on_queue(pr) && pr.has_label("easy"),
        Dashboard::StaleReadyToMerge => pr.has_any_label(READY_TO_MERGE_LABELS) && ctx.stale(pr),
        Dashboard::StaleDelegated => pr.has_label("delegated") && ctx.stale(pr),
        Dashboard::StaleMaintainerMerge => {
            pr.has_label("maintainer-merge") && !pr.has_label("ready-to-merge") && ctx.stale(pr)
        }
        Dashboard::TechDebt => !is_wip(pr) && pr.has_label("tech debt"),
        Dashboard::NeedsDecision => pr.has_label("awaiting-zulip"),
        Dashboard::NeedsMerge => QueueChecklist::for_pr(pr, config).only_merge_conflict(),
        Dashboard::StaleNewContributor => {
            pr.has_label("new-contributor")
                && is_stale(pr, ctx.now, config.new_contributor_threshold())
        }
        Dashboard::NeedsHelp => pr.has_any_label(&["help-wanted", "please-adopt"]),
        Dashboard::OtherBase => pr
            .base_branch
            .as_deref()
            .is_some_and(|base| base != config.main_branch),
        Dashboard::BadTitle => !is_wip(pr) && !config.has_conventional_title(&pr.title),
        Dashboard::Unlabelled => {
            !is_wip(pr)
                && pr.title.starts_with(config.feature_prefix.as_str())
                && !has_topic_label(pr, config)
        }
        Dashboard::ContradictoryLabels => has_contradictory_labels(pr),
    }
}

/// Label that narrows the queue down to a sub-board, for the queue-derived kinds.
fn queue_subset_label(kind: Dashboard) -> Option<&'static str> {
    match kind {
        Dashboard::QueueNewContributor => Some("new-contributor"),
        Dashboard::QueueEasy => Some("easy"),
        _ => None,
    }
}

/// The PR list of every board kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Boards {
    lists: BTreeMap<Dashboard, Vec<PullRequest>>,
}

impl Boards {
    /// PRs on `kind`; empty if the board has none.
    pub fn get(&self, kind: Dashboard) -> &[PullRequest] {
        self.lists.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn numbers(&self, kind: Dashboard) -> Vec<u64> {
        self.get(kind).iter().map(|pr| pr.number).collect()
    }

    pub fn len(&self, kind: Dashboard) -> usize {
        self.get(kind).len()
    }

    /// Boards in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Dashboard, &[PullRequest])> {
        Dashboard::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Sort `prs` onto every board.
///
/// A supplied list replaces the computed one for its kind; the queue-derived
/// boards are then taken from whichever queue list won.
pub fn compute_boards(
    prs: &[PullRequest],
    supplied: &SuppliedBoards,
    ctx: &BoardContext<'_>,
) -> Boards {
    let mut boards = Boards::default();
    for kind in Dashboard::ALL {
        let list: Vec<PullRequest> = if let Some(list) = supplied.get(&kind) {
            list.clone()
        } else if let Some(label) = queue_subset_label(kind) {
            boards
                .get(Dashboard::Queue)
                .iter()
                .filter(|pr| pr.has_label(label))
                .cloned()
                .collect()
        } else {
            prs.iter()
                .filter(|pr| belongs_to(kind, pr, ctx))
                .cloned()
                .collect()
        };
        tracing::debug!(board = ?kind, count = list.len(), "computed board");
        boards.lists.insert(kind, list);
    }
    boards
}
