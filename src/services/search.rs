use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Matcher, Utf32Str,
};

use crate::data::{PrStatus, PullRequest};

/// Filter pull requests using fuzzy matching.
/// Returns the indices of matching PRs, sorted by match score (best first);
/// ties keep board order.
pub fn filter_prs(
    prs: &[PullRequest],
    query: &str,
    status_of: impl Fn(&PullRequest) -> PrStatus,
) -> Vec<usize> {
    if query.is_empty() {
        return (0..prs.len()).collect();
    }

    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let mut buf = Vec::new();

    let mut scored: Vec<(usize, u32)> = prs
        .iter()
        .enumerate()
        .filter_map(|(idx, pr)| {
            let haystack = format!(
                "#{} {} {} {} {}",
                pr.number,
                pr.title,
                pr.author.login,
                pr.label_names().collect::<Vec<_>>().join(" "),
                status_of(pr).name()
            );
            pattern
                .score(Utf32Str::new(&haystack, &mut buf), &mut matcher)
                .map(|score| (idx, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(idx, _)| idx).collect()
}
