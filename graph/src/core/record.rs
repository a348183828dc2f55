use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{GraphError, Result};

/// Parent ids of a commit. Almost every commit has one or two.
pub type ParentIds = SmallVec<[String; 2]>;

/// A commit as delivered by a history source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit id (SHA)
    pub id: String,
    /// Full commit message
    pub message: String,
    /// Parent commit ids, in the order the source reported them
    pub parent_ids: ParentIds,
}

impl CommitRecord {
    pub fn new<I, S>(id: impl Into<String>, message: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            message: message.into(),
            parent_ids: parents.into_iter().map(Into::into).collect(),
        }
    }

    /// A commit without parents
    pub fn root(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            parent_ids: SmallVec::new(),
        }
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }

    /// Reject records whose own id or any parent id is unusable as a node id.
    ///
    /// `index` is the record's position in the input and is only used for
    /// the error report.
    pub fn validate(&self, index: usize) -> Result<()> {
        if let Some(reason) = id_problem(&self.id) {
            return Err(GraphError::InvalidRecord {
                index,
                reason: format!("commit id {reason}"),
            });
        }

        for (pos, parent) in self.parent_ids.iter().enumerate() {
            if let Some(reason) = id_problem(parent) {
                return Err(GraphError::InvalidRecord {
                    index,
                    reason: format!("parent #{pos} of {} {reason}", self.id),
                });
            }
        }

        Ok(())
    }
}

fn id_problem(id: &str) -> Option<&'static str> {
    if id.is_empty() {
        Some("is empty")
    } else if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("contains whitespace or control characters")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_merge() {
        let root = CommitRecord::root("a1", "init");
        assert!(root.is_root());
        assert!(!root.is_merge());

        let merge = CommitRecord::new("c3", "Merge branch", ["a1", "b2"]);
        assert!(!merge.is_root());
        assert!(merge.is_merge());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let record = CommitRecord::root("", "orphan");
        let err = record.validate(4).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidRecord {
                index: 4,
                reason: "commit id is empty".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_parent() {
        let record = CommitRecord::new("abc", "msg", ["def", "g h"]);
        let err = record.validate(0).unwrap_err();
        assert!(err.to_string().contains("parent #1 of abc"));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"id":"abc","message":"fix","parent_ids":["p1"]}"#;
        let record: CommitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, CommitRecord::new("abc", "fix", ["p1"]));
    }
}
