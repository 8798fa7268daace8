//! The review queue (label checklist) and the classifier agree on which PRs
//! await review, as long as no manual review override is involved. The base
//! branch does not matter to either.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use queueboard::data::{Author, CiStatus, Label};
use queueboard::services::{compute_boards, BoardContext, SuppliedBoards};
use queueboard::services::statistics::compute_pr_statuses;
use queueboard::{Dashboard, DashboardConfig, PrStatus, PullRequest};

const LABELS: &[&str] = &[
    "ready-to-merge",
    "auto-merge-after-CI",
    "merge-conflict",
    "awaiting-author",
    "awaiting-CI",
    "awaiting-zulip",
    "awaiting-review",
    "WIP",
    "delegated",
    "help-wanted",
    "please-adopt",
    "blocked-by-other-PR",
    "easy",
    "t-algebra",
];

fn any_ci() -> impl Strategy<Value = CiStatus> {
    prop_oneof![
        Just(CiStatus::Unknown),
        Just(CiStatus::Pending),
        Just(CiStatus::Pass),
        Just(CiStatus::Fail),
    ]
}

fn any_base() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("master".to_string())),
        Just(Some("nightly-testing".to_string())),
        Just(Some("stable".to_string())),
    ]
}

fn any_pr(number: u64) -> impl Strategy<Value = PullRequest> {
    let labels = prop::sample::subsequence(LABELS, 0..5);
    (labels, any_ci(), any_base()).prop_map(move |(labels, ci, base)| PullRequest {
        number,
        author: Author::default(),
        title: "chore: generated".to_string(),
        url: String::new(),
        labels: labels.into_iter().map(Label::new).collect(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        is_draft: false,
        ci_status: ci,
        base_branch: base,
    })
}

fn any_prs() -> impl Strategy<Value = Vec<PullRequest>> {
    (0usize..12).prop_flat_map(|n| (0..n as u64).map(any_pr).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn queue_equals_awaiting_review(prs in any_prs()) {
        let now = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let config = DashboardConfig::default();
        let ctx = BoardContext { now, config: &config };
        let boards = compute_boards(&prs, &SuppliedBoards::new(), &ctx);

        let mut queue = boards.numbers(Dashboard::Queue);
        queue.sort_unstable();
        let awaiting: Vec<u64> = compute_pr_statuses(&prs, now)
            .into_iter()
            .filter(|(_, status)| *status == PrStatus::AwaitingReview)
            .map(|(number, _)| number)
            .collect();
        prop_assert_eq!(queue, awaiting);
    }
}
