//! Aggregate statistics over the classified PRs: per-status counts,
//! percentages, the colour legend and the angles of the status pie chart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::data::{Dashboard, PrStatus, PullRequest};

use super::classify::classify_pr;
use super::dashboard::Boards;

/// Order in which statuses are listed and laid out on the chart.
pub const STATUS_DISPLAY_ORDER: [PrStatus; 10] = [
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
];

/// Chart colour and legend text of a status. `None` only for `Closed`,
/// which is never counted.
pub fn legend(status: PrStatus) -> Option<(&'static str, &'static str)> {
    let entry = match status {
        PrStatus::AwaitingReview => ("#33b4ec", "are awaiting review"),
        PrStatus::HelpWanted => ("#cc317c", "are labelled help-wanted or please-adopt"),
        PrStatus::AwaitingAuthor => ("#f6ae9a", "are awaiting the PR author's action"),
        PrStatus::AwaitingDecision => ("#086ad4", "are awaiting the outcome of a zulip discussion"),
        PrStatus::Blocked => ("#8a6a1c", "are blocked on another PR"),
        PrStatus::Delegated => ("#689dea", "are delegated"),
        PrStatus::AwaitingBors => ("#098306", "have been sent to bors"),
        PrStatus::MergeConflict => ("#f17075", "have a merge conflict"),
        PrStatus::Contradictory => ("#000000", "have contradictory labels"),
        PrStatus::NotReady => ("#e899cd", "are marked as draft or work in progress"),
        PrStatus::Closed => return None,
    };
    Some(entry)
}

/// Panics if the display tables and the status taxonomy have drifted apart:
/// every status but `Closed` must be listed once and have a legend entry.
pub fn check_status_tables() {
    for status in PrStatus::ALL {
        let listed = STATUS_DISPLAY_ORDER.iter().filter(|s| **s == status).count();
        if status == PrStatus::Closed {
            assert_eq!(listed, 0, "Closed must not be part of the statistics");
            continue;
        }
        assert_eq!(listed, 1, "status {status:?} must be listed exactly once");
        assert!(legend(status).is_some(), "status {status:?} has no legend entry");
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub status: PrStatus,
    pub count: usize,
    /// Share of all open PRs, in percent.
    pub percent: f64,
    pub color: &'static str,
    pub description: &'static str,
}

/// The review queue disagrees with the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueMismatch {
    pub queue_len: usize,
    pub classified_len: usize,
    /// On the queue board but not classified as awaiting review.
    pub only_on_queue: Vec<u64>,
    /// Classified as awaiting review but missing from the queue board.
    pub only_classified: Vec<u64>,
}

impl std::fmt::Display for QueueMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "the review queue and the classification differ: {} PR(s) on the former, {} on the latter",
            self.queue_len, self.classified_len
        )?;
        if !self.only_on_queue.is_empty() {
            write!(f, "; only on the queue: {:?}", self.only_on_queue)?;
        }
        if !self.only_classified.is_empty() {
            write!(f, "; only classified as awaiting review: {:?}", self.only_classified)?;
        }
        Ok(())
    }
}

/// Compare the queue board with the PRs classified as awaiting review.
/// Membership matters, order does not.
pub fn cross_check_queue(queue: &[u64], awaiting_review: &[u64]) -> Option<QueueMismatch> {
    let queue_set: BTreeSet<u64> = queue.iter().copied().collect();
    let classified_set: BTreeSet<u64> = awaiting_review.iter().copied().collect();
    if queue_set == classified_set {
        return None;
    }
    Some(QueueMismatch {
        queue_len: queue.len(),
        classified_len: awaiting_review.len(),
        only_on_queue: queue_set.difference(&classified_set).copied().collect(),
        only_classified: classified_set.difference(&queue_set).copied().collect(),
    })
}

/// Status of every PR, keyed by PR number in input order.
pub fn compute_pr_statuses(prs: &[PullRequest], now: DateTime<Utc>) -> Vec<(u64, PrStatus)> {
    prs.iter().map(|pr| (pr.number, classify_pr(pr, now))).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PrStatistics {
    pub nondraft: usize,
    pub draft: usize,
    /// Every status except `Closed`, zero counts included. Drafts count as `NotReady`.
    pub counts: BTreeMap<PrStatus, usize>,
    /// One row per status, in display order.
    pub rows: Vec<StatusRow>,
    /// Cumulative chart angles in whole degrees, aligned with `rows`.
    pub chart_angles: Vec<u32>,
    /// PRs that would be on the queue if not for a merge conflict.
    pub just_merge_conflict: usize,
    pub queue_mismatch: Option<QueueMismatch>,
}

impl PrStatistics {
    /// Aggregate the statuses of the non-draft PRs plus `draft` drafts.
    ///
    /// The queue and needs-merge boards come from `boards`; a queue that
    /// disagrees with the classification is reported, not fatal.
    pub fn gather(statuses: &[(u64, PrStatus)], draft: usize, boards: &Boards) -> Self {
        check_status_tables();

        let mut counts: BTreeMap<PrStatus, usize> =
            STATUS_DISPLAY_ORDER.iter().map(|s| (*s, 0)).collect();
        for (_, status) in statuses {
            if let Some(count) = counts.get_mut(status) {
                *count += 1;
            }
        }
        if let Some(not_ready) = counts.get_mut(&PrStatus::NotReady) {
            *not_ready += draft;
        }

        let total = statuses.len() + draft;
        let rows: Vec<StatusRow> = STATUS_DISPLAY_ORDER
            .iter()
            .filter_map(|status| {
                let (color, description) = legend(*status)?;
                let count = counts[status];
                Some(StatusRow {
                    status: *status,
                    count,
                    percent: percent(count, total),
                    color,
                    description,
                })
            })
            .collect();
        let chart_angles = cumulative_angles(rows.iter().map(|r| r.count), total);

        let awaiting_review: Vec<u64> = statuses
            .iter()
            .filter(|(_, s)| *s == PrStatus::AwaitingReview)
            .map(|(n, _)| *n)
            .collect();
        let queue_mismatch = cross_check_queue(&boards.numbers(Dashboard::Queue), &awaiting_review);
        if let Some(mismatch) = &queue_mismatch {
            tracing::warn!("{mismatch}");
        }

        Self {
            nondraft: statuses.len(),
            draft,
            counts,
            rows,
            chart_angles,
            just_merge_conflict: boards.len(Dashboard::NeedsMerge),
            queue_mismatch,
        }
    }

    pub fn total(&self) -> usize {
        self.nondraft + self.draft
    }

    pub fn count(&self, status: PrStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Running sums of `counts` scaled to a full turn, truncated to whole degrees.
pub fn cumulative_angles(counts: impl IntoIterator<Item = usize>, total: usize) -> Vec<u32> {
    let mut running = 0usize;
    counts
        .into_iter()
        .map(|count| {
            running += count;
            if total == 0 {
                0
            } else {
                (running * 360 / total) as u32
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn statuses(list: &[(u64, PrStatus)]) -> Vec<(u64, PrStatus)> {
        list.to_vec()
    }

    #[test]
    fn status_tables_are_in_sync() {
        check_status_tables();
    }

    #[test]
    fn every_status_but_closed_is_counted() {
        let stats = PrStatistics::gather(&[], 0, &Boards::default());
        assert_eq!(stats.counts.len(), PrStatus::ALL.len() - 1);
        assert!(!stats.counts.contains_key(&PrStatus::Closed));
        assert!(stats.counts.values().all(|c| *c == 0));
        assert_eq!(stats.chart_angles, vec![0; 10]);
        assert!(stats.queue_mismatch.is_none());
    }

    #[test]
    fn drafts_are_added_to_not_ready() {
        let list = statuses(&[
            (1, PrStatus::NotReady),
            (2, PrStatus::AwaitingBors),
            (3, PrStatus::Blocked),
        ]);
        let stats = PrStatistics::gather(&list, 4, &Boards::default());
        assert_eq!(stats.count(PrStatus::NotReady), 5);
        assert_eq!(stats.total(), 7);
        assert_eq!(stats.counts.values().sum::<usize>(), stats.total());
    }

    #[test]
    fn chart_angles_are_truncated_running_sums() {
        assert_eq!(cumulative_angles([1, 1, 1], 3), vec![120, 240, 360]);
        assert_eq!(cumulative_angles([1, 0, 2], 7), vec![51, 51, 154]);
        assert_eq!(cumulative_angles([0, 0], 0), vec![0, 0]);
    }

    #[test]
    fn last_angle_closes_the_circle() {
        let list = statuses(&[
            (1, PrStatus::AwaitingReview),
            (2, PrStatus::Delegated),
            (3, PrStatus::MergeConflict),
        ]);
        let stats = PrStatistics::gather(&list, 0, &Boards::default());
        assert_eq!(stats.chart_angles.last(), Some(&360));
    }

    #[test]
    fn queue_cross_check_reports_both_sides() {
        let mismatch = cross_check_queue(&[1, 2, 3], &[2, 3, 4, 5]).unwrap();
        assert_eq!(mismatch.only_on_queue, vec![1]);
        assert_eq!(mismatch.only_classified, vec![4, 5]);
        assert_eq!(mismatch.queue_len, 3);
        assert_eq!(mismatch.classified_len, 4);
        assert!(mismatch.to_string().contains("only on the queue: [1]"));
    }

    #[test]
    fn queue_cross_check_ignores_order() {
        assert_eq!(cross_check_queue(&[3, 1, 2], &[1, 2, 3]), None);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_status() -> impl Strategy<Value = PrStatus> {
        prop::sample::select(STATUS_DISPLAY_ORDER.to_vec())
    }

    proptest! {
        #[test]
        fn counts_add_up_to_all_open_prs(
            list in prop::collection::vec(any_status(), 0..60),
            draft in 0usize..20,
        ) {
            let statuses: Vec<(u64, PrStatus)> =
                list.into_iter().enumerate().map(|(i, s)| (i as u64, s)).collect();
            let stats = PrStatistics::gather(&statuses, draft, &Boards::default());
            prop_assert_eq!(stats.counts.values().sum::<usize>(), statuses.len() + draft);
            let percent_sum: f64 = stats.rows.iter().map(|r| r.percent).sum();
            if stats.total() > 0 {
                prop_assert!((percent_sum - 100.0).abs() < 1e-6);
            }
        }

        #[test]
        fn chart_angles_never_decrease(counts in prop::collection::vec(0usize..50, 1..12)) {
            let total: usize = counts.iter().sum();
            let angles = cumulative_angles(counts, total);
            prop_assert!(angles.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(angles.iter().all(|a| *a <= 360));
        }
    }
}
