//! Detection of label sets encoding mutually exclusive review states.

use crate::data::{LabelCategory, PullRequest};

use super::taxonomy::{categories_of, CategorySet};

use LabelCategory::*;

/// If the first category is present, none of the others may be.
/// The table is asymmetric: not every pair is listed.
const CONFLICTS: &[(LabelCategory, &[LabelCategory])] = &[
    (AwaitingZulip, &[AwaitingAuthor, Delegated, Bors, WIP]),
    (WIP, &[AwaitingReview, Bors]),
    (AwaitingAuthor, &[AwaitingZulip]),
    (Bors, &[WIP]),
];

/// Whether a category set is self-contradictory.
///
/// The manual "force awaiting review" override is always reported, whatever
/// it is combined with.
pub fn has_contradiction(categories: &CategorySet) -> bool {
    if categories.contains(&ForceReview) {
        return true;
    }
    CONFLICTS.iter().any(|(anchor, others)| {
        categories.contains(anchor) && others.iter().any(|c| categories.contains(c))
    })
}

/// Whether a PR's raw labels are contradictory once canonicalised.
pub fn has_contradictory_labels(pr: &PullRequest) -> bool {
    has_contradiction(&categories_of(&pr.labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pr_with_labels;

    fn set(categories: &[LabelCategory]) -> CategorySet {
        categories.iter().copied().collect()
    }

    #[test]
    fn zulip_contradicts_other_states() {
        assert!(has_contradiction(&set(&[AwaitingZulip, Delegated])));
        assert!(has_contradiction(&set(&[AwaitingZulip, AwaitingAuthor])));
        assert!(has_contradiction(&set(&[AwaitingZulip, Bors])));
        assert!(has_contradiction(&set(&[AwaitingZulip, WIP])));
    }

    #[test]
    fn wip_contradicts_review_and_bors() {
        assert!(has_contradiction(&set(&[WIP, AwaitingReview])));
        assert!(has_contradiction(&set(&[WIP, Bors])));
    }

    #[test]
    fn single_categories_are_consistent() {
        for category in [
            Bors,
            Blocked,
            MergeConflict,
            AwaitingAuthor,
            AwaitingCI,
            AwaitingZulip,
            AwaitingReview,
            WIP,
            Delegated,
            HelpWanted,
        ] {
            assert!(!has_contradiction(&set(&[category])), "{category:?}");
        }
        assert!(!has_contradiction(&CategorySet::new()));
    }

    #[test]
    fn unlisted_pairs_are_not_contradictions() {
        assert!(!has_contradiction(&set(&[Delegated, Bors])));
        assert!(!has_contradiction(&set(&[Blocked, MergeConflict, AwaitingAuthor])));
        assert!(!has_contradiction(&set(&[WIP, HelpWanted])));
    }

    #[test]
    fn force_review_is_always_contradictory() {
        assert!(has_contradiction(&set(&[ForceReview])));
        assert!(has_contradiction(&set(&[ForceReview, Blocked])));
    }

    #[test]
    fn raw_labels_are_canonicalised_first() {
        let pr = pr_with_labels(1, &["WIP", "auto-merge-after-CI"]);
        assert!(has_contradictory_labels(&pr));

        let pr = pr_with_labels(2, &["awaiting-zulip", "blocked-by-core-PR"]);
        assert!(!has_contradictory_labels(&pr));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_category() -> impl Strategy<Value = LabelCategory> {
        prop::sample::select(vec![
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
        ])
    }

    proptest! {
        #[test]
        fn adding_categories_never_resolves_a_contradiction(
            base in prop::collection::btree_set(any_category(), 0..6),
            extra in any_category(),
        ) {
            let mut grown = base.clone();
            grown.insert(extra);
            if has_contradiction(&base) {
                prop_assert!(has_contradiction(&grown));
            }
        }
    }
}
