pub mod models;
pub mod types;

pub use models::{Author, Label, PrMetrics, PullRequest};
pub use types::{
    AuthorNode, CiStatus, CommitConnection, CommitData, CommitNode, Dashboard, LabelCategory,
    LabelConnection, LabelNode, PrStatus, PullRequestNode, SearchConnection, SearchGraphQLData,
    SearchGraphQLResponse, SnapshotFile, StatusCheckRollup, INPUT_FILES,
};
