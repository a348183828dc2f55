use super::{dag::Graph, node::GraphNode, record::CommitRecord};
use crate::error::Result;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_LABEL_CHARS: usize = 30;
pub const DEFAULT_ELLIPSIS: &str = "...";

/// How commit messages become node labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPolicy {
    /// Cut long messages down to `max_chars`
    pub truncate: bool,
    /// Maximum label length in grapheme clusters, ellipsis excluded
    pub max_chars: usize,
    /// Appended to every label while truncation is on
    pub ellipsis: String,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            truncate: true,
            max_chars: DEFAULT_LABEL_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

impl LabelPolicy {
    /// Keep messages verbatim
    pub fn full() -> Self {
        Self {
            truncate: false,
            ..Self::default()
        }
    }

    pub fn truncated(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Self::default()
        }
    }

    /// Label for a commit message under this policy
    pub fn label(&self, message: &str) -> String {
        if !self.truncate {
            return message.to_string();
        }

        // Byte offset of the first grapheme past the limit, if there is one
        let prefix = match message.grapheme_indices(true).nth(self.max_chars) {
            Some((cut, _)) => &message[..cut],
            None => message,
        };
        format!("{prefix}{}", self.ellipsis)
    }
}

/// Builds a [`Graph`] from commit records
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    policy: LabelPolicy,
}

impl GraphBuilder {
    pub fn new(policy: LabelPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LabelPolicy {
        &self.policy
    }

    /// Build the graph in three passes: collect ids, create nodes, create edges.
    ///
    /// When several records share an id, the first one labels the node and
    /// the rest are ignored for node creation. Their parent references still
    /// produce edges. A record with an empty or malformed id fails the whole
    /// build with [`GraphError::InvalidRecord`](crate::GraphError::InvalidRecord).
    pub fn build(&self, records: &[CommitRecord]) -> Result<Graph> {
        // Pass 1: validate and decide which record owns each id
        let mut owners: HashMap<&str, usize> = HashMap::with_capacity(records.len());
        let mut order: Vec<usize> = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            record.validate(idx)?;
            if !owners.contains_key(record.id.as_str()) {
                owners.insert(record.id.as_str(), idx);
                order.push(idx);
            }
        }

        let duplicates = records.len() - order.len();
        if duplicates > 0 {
            tracing::debug!(duplicates, "ignoring repeated commit ids");
        }

        // Pass 2: commit nodes first, then placeholders for unseen parents
        let mut graph = Graph::new();
        for &idx in &order {
            let record = &records[idx];
            graph.insert_node(GraphNode::commit(
                record.id.clone(),
                self.policy.label(&record.message),
            ));
        }

        let mut placeholders = 0usize;
        for record in records {
            for parent in &record.parent_ids {
                if !owners.contains_key(parent.as_str())
                    && graph.insert_node(GraphNode::placeholder(parent.clone()))
                {
                    placeholders += 1;
                }
            }
        }

        // Pass 3: parent -> child edges
        for record in records {
            for parent in &record.parent_ids {
                graph.insert_edge(parent, &record.id);
            }
        }

        tracing::debug!(
            records = records.len(),
            nodes = graph.node_count(),
            placeholders,
            edges = graph.edge_count(),
            "built commit graph"
        );

        Ok(graph)
    }
}

/// Build a graph with the given label policy
pub fn build(records: &[CommitRecord], policy: LabelPolicy) -> Result<Graph> {
    GraphBuilder::new(policy).build(records)
}
