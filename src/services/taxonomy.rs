use std::collections::BTreeSet;

use crate::data::{Label, LabelCategory};

/// Exact raw names and their category. `blocked-by-*` is matched by prefix.
const LABEL_CATEGORIES: &[(&str, LabelCategory)] = &[
    ("ready-to-merge", LabelCategory::Bors),
    ("auto-merge-after-CI", LabelCategory::Bors),
    ("merge-conflict", LabelCategory::MergeConflict),
    ("awaiting-author", LabelCategory::AwaitingAuthor),
    ("awaiting-CI", LabelCategory::AwaitingCI),
    ("awaiting-zulip", LabelCategory::AwaitingZulip),
    ("awaiting-review", LabelCategory::AwaitingReview),
    ("awaiting-review-DONT-USE", LabelCategory::ForceReview),
    ("WIP", LabelCategory::WIP),
    ("delegated", LabelCategory::Delegated),
    ("help-wanted", LabelCategory::HelpWanted),
    ("please-adopt", LabelCategory::HelpWanted),
];

const BLOCKED_PREFIX: &str = "blocked-by-";

pub type CategorySet = BTreeSet<LabelCategory>;

/// Category of a raw label name; `None` for labels irrelevant to classification.
pub fn category_of(label_name: &str) -> Option<LabelCategory> {
    if label_name.starts_with(BLOCKED_PREFIX) {
        return Some(LabelCategory::Blocked);
    }
    LABEL_CATEGORIES
        .iter()
        .find(|(name, _)| *name == label_name)
        .map(|(_, category)| *category)
}

/// Canonical categories of a label list. Unknown labels are dropped.
pub fn categories_of<'a>(labels: impl IntoIterator<Item = &'a Label>) -> CategorySet {
    labels
        .into_iter()
        .filter_map(|l| category_of(&l.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_collapse_to_one_category() {
        assert_eq!(category_of("ready-to-merge"), Some(LabelCategory::Bors));
        assert_eq!(category_of("auto-merge-after-CI"), Some(LabelCategory::Bors));
        assert_eq!(category_of("help-wanted"), Some(LabelCategory::HelpWanted));
        assert_eq!(category_of("please-adopt"), Some(LabelCategory::HelpWanted));
    }

    #[test]
    fn every_blocked_variant_is_blocked() {
        for name in [
            "blocked-by-other-PR",
            "blocked-by-core-PR",
            "blocked-by-batt-PR",
            "blocked-by-qq-PR",
        ] {
            assert_eq!(category_of(name), Some(LabelCategory::Blocked), "{name}");
        }
    }

    #[test]
    fn unknown_labels_have_no_category() {
        assert_eq!(category_of("t-algebra"), None);
        assert_eq!(category_of("easy"), None);
        assert_eq!(category_of("wip"), None, "matching is case-sensitive");
    }

    #[test]
    fn escape_hatch_is_distinct_from_review_marker() {
        assert_eq!(category_of("awaiting-review"), Some(LabelCategory::AwaitingReview));
        assert_eq!(
            category_of("awaiting-review-DONT-USE"),
            Some(LabelCategory::ForceReview)
        );
    }

    #[test]
    fn categories_of_drops_unknown_and_dedups() {
        let labels = [
            Label::new("ready-to-merge"),
            Label::new("auto-merge-after-CI"),
            Label::new("t-topology"),
            Label::new("WIP"),
        ];
        let set = categories_of(&labels);
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![LabelCategory::Bors, LabelCategory::WIP]
        );
    }
}
