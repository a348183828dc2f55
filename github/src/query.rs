use graph::CommitRecord;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::FetchError;

/// GitHub caps connection pages at 100 nodes
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PARENT_LIMIT: u32 = 10;

pub const HISTORY_QUERY: &str = r#"
query CommitHistory($owner: String!, $repoName: String!, $pageSize: Int!, $parentLimit: Int!) {
  repository(owner: $owner, name: $repoName) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $pageSize) {
            nodes {
              oid
              message
              parents(first: $parentLimit) {
                nodes {
                  oid
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Size of the single history page to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPage {
    pub page_size: u32,
    pub parent_limit: u32,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            parent_limit: DEFAULT_PARENT_LIMIT,
        }
    }
}

impl HistoryPage {
    /// Page of `page_size` commits, clamped to what the API accepts
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            ..Self::default()
        }
    }
}

/// Body of a GraphQL POST
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn history(owner: &str, name: &str, page: HistoryPage) -> Self {
        Self {
            query: HISTORY_QUERY,
            variables: json!({
                "owner": owner,
                "repoName": name,
                "pageSize": page.page_size,
                "parentLimit": page.parent_limit,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Data {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    target: Option<Target>,
}

/// Only commit targets carry a history
#[derive(Debug, Deserialize)]
struct Target {
    history: Option<Connection<HistoryNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HistoryNode {
    oid: String,
    message: String,
    parents: Connection<OidNode>,
}

#[derive(Debug, Deserialize)]
struct OidNode {
    oid: String,
}

/// Extract commit records from a history query response.
///
/// `repo` is only used in error messages.
pub fn parse_history(response: Value, repo: &str) -> Result<Vec<CommitRecord>, FetchError> {
    let envelope: Envelope = serde_json::from_value(response)?;

    let repository = envelope.data.and_then(|data| data.repository);
    let Some(repository) = repository else {
        if envelope.errors.is_empty()
            || envelope.errors.iter().any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
        {
            return Err(FetchError::RepositoryNotFound(repo.to_string()));
        }
        return Err(FetchError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    };

    if !envelope.errors.is_empty() {
        tracing::warn!(
            errors = envelope.errors.len(),
            "GraphQL response carried partial errors"
        );
    }

    let history = repository
        .default_branch_ref
        .and_then(|branch| branch.target)
        .and_then(|target| target.history)
        .ok_or_else(|| FetchError::NoDefaultBranch(repo.to_string()))?;

    Ok(history
        .nodes
        .into_iter()
        .map(|node| {
            CommitRecord::new(
                node.oid,
                node.message,
                node.parents.nodes.into_iter().map(|p| p.oid),
            )
        })
        .collect())
}
