//! One batch pass over a snapshot: boards, statuses, statistics and the
//! diagnostics raised along the way.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};

use crate::config::DashboardConfig;
use crate::data::{Dashboard, PrMetrics, PrStatus, PullRequest};

use super::classify::classify_pr;
use super::dashboard::{compute_boards, BoardContext, Boards};
use super::snapshot::Snapshot;
use super::statistics::{compute_pr_statuses, PrStatistics, QueueMismatch};

/// A recoverable inconsistency in the input. Never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    QueueMismatch(QueueMismatch),
    /// A listed PR has no entry in the detail file.
    MissingDetails { number: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::QueueMismatch(mismatch) => write!(f, "{mismatch}"),
            Diagnostic::MissingDetails { number } => {
                write!(f, "PR #{number} has no detailed information")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub boards: Boards,
    /// Status of every PR seen, drafts and board-only PRs included.
    pub statuses: BTreeMap<u64, PrStatus>,
    /// Metrics of every PR on some board; missing ones are `PrMetrics::MISSING`.
    pub metrics: BTreeMap<u64, PrMetrics>,
    pub statistics: PrStatistics,
    pub diagnostics: Vec<Diagnostic>,
}

impl DashboardReport {
    pub fn build(snapshot: &Snapshot, now: DateTime<Utc>, config: &DashboardConfig) -> Self {
        let ctx = BoardContext { now, config };
        let boards = compute_boards(&snapshot.nondraft, &snapshot.supplied, &ctx);

        let nondraft_statuses = compute_pr_statuses(&snapshot.nondraft, now);
        let statistics = PrStatistics::gather(&nondraft_statuses, snapshot.draft.len(), &boards);

        let mut statuses: BTreeMap<u64, PrStatus> = nondraft_statuses.into_iter().collect();
        for pr in &snapshot.draft {
            statuses.insert(pr.number, PrStatus::NotReady);
        }

        let mut diagnostics = Vec::new();
        if let Some(mismatch) = &statistics.queue_mismatch {
            diagnostics.push(Diagnostic::QueueMismatch(mismatch.clone()));
        }

        let mut metrics = BTreeMap::new();
        let mut seen = BTreeSet::new();
        for pr in boards.iter().flat_map(|(_, prs)| prs) {
            if !seen.insert(pr.number) {
                continue;
            }
            statuses
                .entry(pr.number)
                .or_insert_with(|| classify_pr(pr, now));
            let entry = snapshot.metrics(pr.number).unwrap_or_else(|| {
                let diagnostic = Diagnostic::MissingDetails { number: pr.number };
                tracing::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
                PrMetrics::MISSING
            });
            metrics.insert(pr.number, entry);
        }

        tracing::info!(
            open = statistics.total(),
            diagnostics = diagnostics.len(),
            "dashboard computed"
        );

        Self {
            generated_at: now,
            boards,
            statuses,
            metrics,
            statistics,
            diagnostics,
        }
    }

    pub fn status_of(&self, pr: &PullRequest) -> PrStatus {
        self.statuses
            .get(&pr.number)
            .copied()
            .unwrap_or_else(|| classify_pr(pr, self.generated_at))
    }

    pub fn metrics_of(&self, number: u64) -> PrMetrics {
        self.metrics.get(&number).copied().unwrap_or(PrMetrics::MISSING)
    }

    /// Plain-text rendition of the statistics, board sizes and diagnostics.
    pub fn summary(&self) -> String {
        let stats = &self.statistics;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "There are currently {} open PRs, {} of which are drafts.",
            stats.total(),
            stats.draft
        );
        for row in &stats.rows {
            let _ = write!(
                out,
                "  {:>4} PRs ({:>5.1}%) {}",
                row.count, row.percent, row.description
            );
            if row.status == PrStatus::MergeConflict {
                let _ = write!(
                    out,
                    "; {} of these would be on the review queue otherwise",
                    stats.just_merge_conflict
                );
            }
            out.push('\n');
        }

        out.push_str("\nBoards:\n");
        for kind in Dashboard::ALL {
            let (_, title) = kind.id_title();
            let _ = writeln!(out, "  {:>4}  {title}", self.boards.len(kind));
        }

        if !self.diagnostics.is_empty() {
            out.push_str("\nDiagnostics:\n");
            for diagnostic in &self.diagnostics {
                let _ = writeln!(out, "  {diagnostic}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pr_with_labels, reference_now};

    fn report(snapshot: &Snapshot) -> DashboardReport {
        DashboardReport::build(snapshot, reference_now(), &DashboardConfig::default())
    }

    fn full_metrics() -> PrMetrics {
        PrMetrics {
            additions: 5,
            deletions: 1,
            changed_files: 2,
            comments: 0,
            review_comments: 1,
        }
    }

    #[test]
    fn queue_matches_classifier_on_plain_prs() {
        let mut snapshot = Snapshot {
            nondraft: vec![
                pr_with_labels(1, &[]),
                pr_with_labels(2, &["awaiting-author"]),
                pr_with_labels(3, &["ready-to-merge"]),
            ],
            ..Snapshot::default()
        };
        for n in 1..=3 {
            snapshot.details.insert(n, full_metrics());
        }
        let report = report(&snapshot);
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
        assert_eq!(report.statuses[&1], PrStatus::AwaitingReview);
        assert_eq!(report.statuses[&2], PrStatus::AwaitingAuthor);
        assert_eq!(report.statuses[&3], PrStatus::AwaitingBors);
    }

    #[test]
    fn missing_details_are_reported_once() {
        let mut snapshot = Snapshot {
            nondraft: vec![pr_with_labels(1, &["easy", "new-contributor"])],
            ..Snapshot::default()
        };
        snapshot.draft.push({
            let mut draft = pr_with_labels(2, &[]);
            draft.is_draft = true;
            draft
        });
        let report = report(&snapshot);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::MissingDetails { number: 1 }]
        );
        assert!(report.metrics_of(1).is_missing());
        assert_eq!(report.statuses[&2], PrStatus::NotReady);
        assert_eq!(report.statistics.count(PrStatus::NotReady), 1);
    }

    #[test]
    fn supplied_queue_disagreement_becomes_a_diagnostic() {
        let mut snapshot = Snapshot {
            nondraft: vec![pr_with_labels(1, &[]), pr_with_labels(2, &["delegated"])],
            ..Snapshot::default()
        };
        snapshot.details.insert(2, full_metrics());
        snapshot
            .supplied
            .insert(Dashboard::Queue, vec![pr_with_labels(2, &["delegated"])]);
        let report = report(&snapshot);
        let mismatch = report
            .diagnostics
            .iter()
            .find_map(|d| match d {
                Diagnostic::QueueMismatch(m) => Some(m.clone()),
                _ => None,
            })
            .expect("queue mismatch");
        assert_eq!(mismatch.only_on_queue, vec![2]);
        assert_eq!(mismatch.only_classified, vec![1]);
    }

    #[test]
    fn summary_mentions_every_status_line() {
        let snapshot = Snapshot {
            nondraft: vec![pr_with_labels(1, &["merge-conflict"])],
            ..Snapshot::default()
        };
        let text = report(&snapshot).summary();
        assert!(text.starts_with("There are currently 1 open PRs, 0 of which are drafts."));
        assert!(text.contains("have a merge conflict; 1 of these would be on the review queue otherwise"));
        assert!(text.contains("Review queue"));
        assert!(text.contains("PR #1 has no detailed information"));
    }

    #[test]
    fn report_serialises_to_json() {
        let snapshot = Snapshot {
            nondraft: vec![pr_with_labels(4, &["WIP", "ready-to-merge"])],
            ..Snapshot::default()
        };
        let value = serde_json::to_value(report(&snapshot)).unwrap();
        assert_eq!(value["statuses"]["4"], "Contradictory");
        assert_eq!(value["diagnostics"][0]["kind"], "missing_details");
    }
}
