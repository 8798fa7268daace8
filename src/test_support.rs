use chrono::{DateTime, TimeZone, Utc};

use crate::data::{Author, CiStatus, Label, PullRequest};

/// Fixed point in time every test measures staleness against.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A non-draft PR into the main branch with a conventional title,
/// updated at `reference_now()`.
pub fn pr_with_labels(number: u64, labels: &[&str]) -> PullRequest {
    pr_with_title(number, &format!("chore: tidy up #{number}"), labels)
}

pub fn pr_with_title(number: u64, title: &str, labels: &[&str]) -> PullRequest {
    PullRequest {
        number,
        author: Author {
            login: "contributor".to_string(),
            url: "https://github.com/contributor".to_string(),
        },
        title: title.to_string(),
        url: format!("https://github.com/leanprover-community/mathlib4/pull/{number}"),
        labels: labels.iter().map(|name| Label::new(*name)).collect(),
        updated_at: reference_now(),
        is_draft: false,
        ci_status: CiStatus::Unknown,
        base_branch: Some("master".to_string()),
    }
}
