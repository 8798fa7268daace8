//! Per-PR checklist answering "why is my PR not on the review queue?".
//!
//! The checks test raw labels directly rather than going through the
//! classifier, so the queue board they define is an independent view that
//! the statistics can be cross-checked against. The base branch is shown as
//! a check but does not gate the queue; `OtherBase` surfaces those PRs.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data::PullRequest;

const BLOCKED_PREFIX: &str = "blocked-by-";
const NOT_READY_LABELS: &[&str] = &["WIP", "help-wanted", "please-adopt"];
const AWAITING_OTHERS_LABELS: &[&str] = &["awaiting-CI", "awaiting-author", "awaiting-zulip"];
const APPROVED_LABELS: &[&str] = &["delegated", "auto-merge-after-CI", "ready-to-merge"];
const MERGE_CONFLICT_LABEL: &str = "merge-conflict";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueChecklist {
    /// Based on the main branch (or base unknown). Informational only.
    pub into_main: bool,
    /// CI is not failing or still running.
    pub ci_ok: bool,
    pub not_blocked: bool,
    pub no_merge_conflict: bool,
    /// Not a draft, and not labelled as unfinished or up for adoption.
    pub ready: bool,
    /// Not waiting on CI, the author or a discussion.
    pub awaiting_review: bool,
    /// Not already delegated or sent to bors.
    pub not_approved: bool,
}

impl QueueChecklist {
    pub fn for_pr(pr: &PullRequest, config: &DashboardConfig) -> Self {
        Self {
            into_main: pr
                .base_branch
                .as_deref()
                .map_or(true, |base| base == config.main_branch),
            ci_ok: !pr.ci_status.blocks_review(),
            not_blocked: !pr.label_names().any(|l| l.starts_with(BLOCKED_PREFIX)),
            no_merge_conflict: !pr.has_label(MERGE_CONFLICT_LABEL),
            ready: !pr.is_draft && !pr.has_any_label(NOT_READY_LABELS),
            awaiting_review: !pr.has_any_label(AWAITING_OTHERS_LABELS),
            not_approved: !pr.has_any_label(APPROVED_LABELS),
        }
    }

    fn all_but_merge_conflict(&self) -> bool {
        self.ci_ok
            && self.not_blocked
            && self.ready
            && self.awaiting_review
            && self.not_approved
    }

    pub fn on_queue(&self) -> bool {
        self.all_but_merge_conflict() && self.no_merge_conflict
    }

    /// Would be on the queue, if not for a merge conflict.
    pub fn only_merge_conflict(&self) -> bool {
        self.all_but_merge_conflict() && !self.no_merge_conflict
    }

    /// (description, passed) pairs in display order.
    pub fn items(&self) -> [(&'static str, bool); 7] {
        [
            ("based on the main branch", self.into_main),
            ("CI passes", self.ci_ok),
            ("not blocked on another PR", self.not_blocked),
            ("no merge conflict", self.no_merge_conflict),
            ("ready (not draft, WIP, help-wanted or please-adopt)", self.ready),
            ("awaiting review (not awaiting CI, author or zulip)", self.awaiting_review),
            ("not delegated or sent to bors", self.not_approved),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CiStatus;
    use crate::test_support::pr_with_labels;

    #[test]
    fn unlabelled_passing_pr_is_on_the_queue() {
        let pr = pr_with_labels(1, &["t-algebra"]);
        assert!(QueueChecklist::for_pr(&pr, &DashboardConfig::default()).on_queue());
    }

    #[test]
    fn each_blocker_removes_from_queue() {
        let config = DashboardConfig::default();
        for label in [
            "blocked-by-qq-PR",
            "merge-conflict",
            "WIP",
            "please-adopt",
            "awaiting-CI",
            "awaiting-zulip",
            "delegated",
            "ready-to-merge",
        ] {
            let pr = pr_with_labels(1, &[label]);
            assert!(!QueueChecklist::for_pr(&pr, &config).on_queue(), "{label}");
        }
    }

    #[test]
    fn merge_conflict_alone_is_detected() {
        let config = DashboardConfig::default();
        let pr = pr_with_labels(1, &["merge-conflict"]);
        assert!(QueueChecklist::for_pr(&pr, &config).only_merge_conflict());

        let pr = pr_with_labels(2, &["merge-conflict", "awaiting-author"]);
        assert!(!QueueChecklist::for_pr(&pr, &config).only_merge_conflict());
    }

    #[test]
    fn other_base_and_failing_ci_fail_their_checks() {
        let config = DashboardConfig::default();
        let mut pr = pr_with_labels(1, &[]);
        pr.base_branch = Some("stable".to_string());
        pr.ci_status = CiStatus::Fail;
        let checks = QueueChecklist::for_pr(&pr, &config);
        assert!(!checks.into_main);
        assert!(!checks.ci_ok);
        assert_eq!(checks.items().iter().filter(|(_, ok)| !ok).count(), 2);
    }

    #[test]
    fn other_base_does_not_gate_the_queue() {
        let config = DashboardConfig::default();
        let mut pr = pr_with_labels(1, &[]);
        pr.base_branch = Some("nightly-testing".to_string());
        let checks = QueueChecklist::for_pr(&pr, &config);
        assert!(!checks.into_main);
        assert!(checks.on_queue());

        pr.labels = pr_with_labels(1, &["merge-conflict"]).labels;
        assert!(QueueChecklist::for_pr(&pr, &config).only_merge_conflict());
    }
}
