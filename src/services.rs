pub mod classify;
pub mod contradiction;
pub mod dashboard;
pub mod queue_check;
pub mod report;
pub mod search;
pub mod snapshot;
pub mod staleness;
pub mod statistics;
pub mod taxonomy;

pub use classify::{classify, classify_pr, PrState, RULES};
pub use contradiction::{has_contradiction, has_contradictory_labels};
pub use dashboard::{belongs_to, compute_boards, BoardContext, Boards, SuppliedBoards};
pub use queue_check::QueueChecklist;
pub use report::{DashboardReport, Diagnostic};
pub use search::filter_prs;
pub use snapshot::{Snapshot, SnapshotPaths};
pub use staleness::is_stale;
pub use statistics::{PrStatistics, QueueMismatch, StatusRow, STATUS_DISPLAY_ORDER};
pub use taxonomy::{categories_of, category_of, CategorySet};
