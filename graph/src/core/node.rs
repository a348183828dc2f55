/// Where a node came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Backed by a commit record from the history page
    Commit,
    /// Only referenced as a parent; no record was fetched for it
    Placeholder,
}

/// A node in the commit graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Commit id (SHA)
    pub id: String,
    /// Display label: the (possibly truncated) message, or the id for placeholders
    pub label: String,
    pub kind: NodeKind,
}

impl GraphNode {
    pub fn commit(id: String, label: String) -> Self {
        Self {
            id,
            label,
            kind: NodeKind::Commit,
        }
    }

    /// Placeholder nodes are labelled with their own id
    pub fn placeholder(id: String) -> Self {
        Self {
            label: id.clone(),
            id,
            kind: NodeKind::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == NodeKind::Placeholder
    }
}
