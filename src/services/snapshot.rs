//! Reading a dashboard snapshot from the JSON files of the upstream queries.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::data::{
    Author, Dashboard, Label, PrMetrics, PullRequest, PullRequestNode, SnapshotFile, INPUT_FILES,
};
use crate::error::{Error, Result};

use super::dashboard::SuppliedBoards;

/// Where the files of one snapshot live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    /// Per-PR metrics, keyed by PR number.
    pub details: PathBuf,
    pub nondraft: PathBuf,
    pub draft: PathBuf,
    /// Pre-queried board lists, routed by file name.
    pub boards: Vec<PathBuf>,
}

/// Everything one dashboard run is computed from.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub nondraft: Vec<PullRequest>,
    pub draft: Vec<PullRequest>,
    pub supplied: SuppliedBoards,
    pub details: HashMap<u64, PrMetrics>,
}

impl Snapshot {
    pub fn load(paths: &SnapshotPaths) -> Result<Self> {
        let mut supplied = SuppliedBoards::new();
        for path in &paths.boards {
            let kind = board_kind_of(path)?;
            let prs = read_prs(path, None)?;
            tracing::debug!(board = ?kind, count = prs.len(), "read {}", path.display());
            supplied.entry(kind).or_default().extend(prs);
        }

        let nondraft = read_prs(&paths.nondraft, Some(false))?;
        let draft = read_prs(&paths.draft, Some(true))?;
        let details = read_details(&paths.details)?;
        tracing::debug!(
            nondraft = nondraft.len(),
            draft = draft.len(),
            details = details.len(),
            "snapshot loaded"
        );

        Ok(Self {
            nondraft,
            draft,
            supplied,
            details,
        })
    }

    /// Metrics of PR `number`, or `None` if the detail file lacks them.
    pub fn metrics(&self, number: u64) -> Option<PrMetrics> {
        self.details.get(&number).copied()
    }

    pub fn metrics_or_missing(&self, number: u64) -> PrMetrics {
        self.metrics(number).unwrap_or(PrMetrics::MISSING)
    }
}

/// Board kind a pre-queried file feeds, by its file name.
pub fn board_kind_of(path: &Path) -> Result<Dashboard> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Dashboard::from_input_file(&name).ok_or_else(|| Error::UnrecognizedInput {
        name,
        expected: INPUT_FILES
            .iter()
            .map(|(file, _)| format!("  {file}"))
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// PRs of a snapshot file, in file order. `draft` overrides the per-node flag.
fn read_prs(path: &Path, draft: Option<bool>) -> Result<Vec<PullRequest>> {
    let file: SnapshotFile = read_json(path)?;
    Ok(file
        .output
        .into_iter()
        .flat_map(|page| page.data.search.nodes)
        .map(|node| {
            let mut pr = pull_request_from_node(node);
            if let Some(draft) = draft {
                pr.is_draft = draft;
            }
            pr
        })
        .collect())
}

pub fn pull_request_from_node(node: PullRequestNode) -> PullRequest {
    let ci_status = node.ci_status();
    let mut labels: Vec<Label> = Vec::new();
    for label in node.labels.map(|c| c.nodes).unwrap_or_default() {
        let label = Label {
            name: label.name,
            color: label.color,
            url: label.url,
        };
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    let author = node
        .author
        .map(|a| Author {
            login: a.login,
            url: a.url,
        })
        .unwrap_or_else(|| Author {
            login: "ghost".to_string(),
            url: String::new(),
        });

    PullRequest {
        number: node.number,
        author,
        title: node.title,
        url: node.url,
        labels,
        updated_at: node.updated_at,
        is_draft: node.is_draft.unwrap_or(false),
        ci_status,
        base_branch: node.base_ref_name,
    }
}

/// The detail file. Entries that are incomplete or not keyed by a PR number
/// are skipped; their PRs then count as lacking details.
fn read_details(path: &Path) -> Result<HashMap<u64, PrMetrics>> {
    let raw: BTreeMap<String, serde_json::Value> = read_json(path)?;
    let mut details = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let Ok(number) = key.parse::<u64>() else {
            tracing::debug!("skipping detail entry with key {key:?}");
            continue;
        };
        match serde_json::from_value::<PrMetrics>(value) {
            Ok(metrics) => {
                details.insert(number, metrics);
            }
            Err(err) => tracing::debug!("skipping details of PR #{number}: {err}"),
        }
    }
    Ok(details)
}
