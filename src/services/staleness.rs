use chrono::{DateTime, Duration, Utc};

use crate::data::PullRequest;

/// Whether `pr` has not been updated for at least `threshold` as of `now`.
pub fn is_stale(pr: &PullRequest, now: DateTime<Utc>, threshold: Duration) -> bool {
    now.signed_duration_since(pr.updated_at) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pr_with_labels, reference_now};

    #[test]
    fn stale_at_exactly_the_threshold() {
        let now = reference_now();
        let mut pr = pr_with_labels(1, &[]);
        pr.updated_at = now - Duration::hours(24);
        assert!(is_stale(&pr, now, Duration::hours(24)));

        pr.updated_at = now - Duration::hours(24) + Duration::seconds(1);
        assert!(!is_stale(&pr, now, Duration::hours(24)));
    }

    #[test]
    fn updates_in_the_future_are_fresh() {
        let now = reference_now();
        let mut pr = pr_with_labels(1, &[]);
        pr.updated_at = now + Duration::minutes(5);
        assert!(!is_stale(&pr, now, Duration::seconds(1)));
    }
}
