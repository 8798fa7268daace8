//! The status classifier: one review status per open PR.
//!
//! Classification walks [`RULES`] in order and returns the status of the
//! first rule that applies. The order is the priority policy: a draft beats
//! everything, contradictory labels beat every label-based rule, and so on.
//! A PR no rule applies to is awaiting review.

use chrono::{DateTime, Utc};

use crate::data::{CiStatus, LabelCategory, PrStatus, PullRequest};

use super::contradiction::has_contradiction;
use super::taxonomy::{categories_of, CategorySet};

/// Classifier input: everything the status depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrState {
    pub categories: CategorySet,
    pub ci: CiStatus,
    pub is_draft: bool,
}

impl PrState {
    pub fn new(categories: CategorySet, ci: CiStatus, is_draft: bool) -> Self {
        Self {
            categories,
            ci,
            is_draft,
        }
    }

    pub fn from_pr(pr: &PullRequest) -> Self {
        Self::new(categories_of(&pr.labels), pr.ci_status, pr.is_draft)
    }

    fn has(&self, category: LabelCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// One entry of the priority chain.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&PrState) -> bool,
    pub status: PrStatus,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "draft",
        applies: |s| s.is_draft,
        status: PrStatus::NotReady,
    },
    Rule {
        name: "contradictory labels",
        applies: |s| has_contradiction(&s.categories),
        status: PrStatus::Contradictory,
    },
    Rule {
        name: "work in progress",
        applies: |s| s.has(LabelCategory::WIP),
        status: PrStatus::NotReady,
    },
    Rule {
        name: "sent to bors",
        applies: |s| s.has(LabelCategory::Bors),
        status: PrStatus::AwaitingBors,
    },
    Rule {
        name: "delegated",
        applies: |s| s.has(LabelCategory::Delegated),
        status: PrStatus::Delegated,
    },
    Rule {
        name: "awaiting zulip",
        applies: |s| s.has(LabelCategory::AwaitingZulip),
        status: PrStatus::AwaitingDecision,
    },
    Rule {
        name: "help wanted",
        applies: |s| s.has(LabelCategory::HelpWanted),
        status: PrStatus::HelpWanted,
    },
    Rule {
        name: "blocked",
        applies: |s| s.has(LabelCategory::Blocked),
        status: PrStatus::Blocked,
    },
    Rule {
        name: "merge conflict",
        applies: |s| s.has(LabelCategory::MergeConflict),
        status: PrStatus::MergeConflict,
    },
    Rule {
        name: "awaiting author",
        applies: |s| s.has(LabelCategory::AwaitingAuthor) || s.has(LabelCategory::AwaitingCI),
        status: PrStatus::AwaitingAuthor,
    },
    Rule {
        name: "CI not green",
        applies: |s| s.ci.blocks_review(),
        status: PrStatus::AwaitingAuthor,
    },
];

/// The first rule applying to `state`, if any.
pub fn matching_rule(state: &PrState) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.applies)(state))
}

/// Review status of a PR in `state`.
///
/// `now` is the reference time of the batch; no current rule is
/// time-dependent. Never returns [`PrStatus::Closed`].
pub fn classify(state: &PrState, _now: DateTime<Utc>) -> PrStatus {
    matching_rule(state)
        .map(|rule| rule.status)
        .unwrap_or(PrStatus::AwaitingReview)
}

/// Convenience wrapper classifying a snapshot PR.
pub fn classify_pr(pr: &PullRequest, now: DateTime<Utc>) -> PrStatus {
    let state = PrState::from_pr(pr);
    let status = classify(&state, now);
    tracing::trace!(
        pr = pr.number,
        rule = matching_rule(&state).map_or("none", |r| r.name),
        ?status,
        "classified"
    );
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::reference_now;
    use LabelCategory::*;

    fn state(categories: &[LabelCategory], ci: CiStatus, is_draft: bool) -> PrState {
        PrState::new(categories.iter().copied().collect(), ci, is_draft)
    }

    #[test]
    fn table_driven_priorities() {
        let now = reference_now();
        let cases: &[(&[LabelCategory], CiStatus, bool, PrStatus)] = &[
            (&[], CiStatus::Pass, false, PrStatus::AwaitingReview),
            (&[], CiStatus::Unknown, false, PrStatus::AwaitingReview),
            (&[], CiStatus::Fail, false, PrStatus::AwaitingAuthor),
            (&[], CiStatus::Pending, false, PrStatus::AwaitingAuthor),
            (&[Bors], CiStatus::Pass, true, PrStatus::NotReady),
            (&[WIP, Bors], CiStatus::Pass, false, PrStatus::Contradictory),
            (&[WIP], CiStatus::Pass, false, PrStatus::NotReady),
            (&[WIP, Blocked], CiStatus::Fail, false, PrStatus::NotReady),
            (&[Bors], CiStatus::Pass, false, PrStatus::AwaitingBors),
            (&[Bors, Delegated], CiStatus::Pass, false, PrStatus::AwaitingBors),
            (&[Delegated, Blocked], CiStatus::Pass, false, PrStatus::Delegated),
            (&[AwaitingZulip, HelpWanted], CiStatus::Pass, false, PrStatus::AwaitingDecision),
            (&[HelpWanted, Blocked], CiStatus::Pass, false, PrStatus::HelpWanted),
            (&[Blocked, MergeConflict], CiStatus::Pass, false, PrStatus::Blocked),
            (&[MergeConflict, AwaitingAuthor], CiStatus::Pass, false, PrStatus::MergeConflict),
            (&[AwaitingAuthor], CiStatus::Pass, false, PrStatus::AwaitingAuthor),
            (&[AwaitingCI], CiStatus::Pass, false, PrStatus::AwaitingAuthor),
            (&[AwaitingReview], CiStatus::Pass, false, PrStatus::AwaitingReview),
            (&[ForceReview], CiStatus::Pass, false, PrStatus::Contradictory),
        ];
        for (categories, ci, is_draft, expected) in cases {
            let got = classify(&state(categories, *ci, *is_draft), now);
            assert_eq!(got, *expected, "{categories:?} ci={ci:?} draft={is_draft}");
        }
    }

    #[test]
    fn matching_rule_names_the_reason() {
        let rule = matching_rule(&state(&[Blocked], CiStatus::Pass, false));
        assert_eq!(rule.map(|r| r.name), Some("blocked"));
        assert!(matching_rule(&state(&[], CiStatus::Pass, false)).is_none());
    }

    #[test]
    fn rules_start_with_draft_then_contradiction() {
        assert_eq!(RULES[0].name, "draft");
        assert_eq!(RULES[1].status, PrStatus::Contradictory);
        assert!(RULES.iter().all(|r| r.status != PrStatus::Closed));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::test_support::reference_now;
    use proptest::prelude::*;
    use LabelCategory::*;

    fn any_state() -> impl Strategy<Value = PrState> {
        let category = prop::sample::select(vec![
            Bors,
            Blocked,
            MergeConflict,
            AwaitingAuthor,
            AwaitingCI,
            AwaitingZulip,
            AwaitingReview,
            ForceReview,
            WIP,
            Delegated,
            HelpWanted,
        ]);
        let ci = prop::sample::select(vec![
            CiStatus::Pass,
            CiStatus::Fail,
            CiStatus::Pending,
            CiStatus::Unknown,
        ]);
        (prop::collection::btree_set(category, 0..6), ci, any::<bool>())
            .prop_map(|(categories, ci, is_draft)| PrState::new(categories, ci, is_draft))
    }

    proptest! {
        #[test]
        fn drafts_are_never_ready(state in any_state()) {
            let draft = PrState { is_draft: true, ..state };
            prop_assert_eq!(classify(&draft, reference_now()), PrStatus::NotReady);
        }

        #[test]
        fn classification_never_yields_closed(state in any_state()) {
            prop_assert_ne!(classify(&state, reference_now()), PrStatus::Closed);
        }

        #[test]
        fn contradictions_win_over_everything_but_drafts(state in any_state()) {
            if !state.is_draft && has_contradiction(&state.categories) {
                prop_assert_eq!(classify(&state, reference_now()), PrStatus::Contradictory);
            }
        }

        #[test]
        fn classification_is_deterministic(state in any_state()) {
            let now = reference_now();
            prop_assert_eq!(classify(&state, now), classify(&state.clone(), now));
        }
    }
}
