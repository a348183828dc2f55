use super::{edge::GraphEdge, node::GraphNode};
use std::collections::{HashMap, HashSet};

/// Directed graph of commits, edges pointing from parent to child.
///
/// Nodes are unique by id and kept in the order they were first inserted.
/// Every edge endpoint is a node of the graph. Duplicate edges between the
/// same pair are kept as-is; use [`Graph::unique_edges`] when they matter.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    /// commit ID -> position in `nodes`
    index: HashMap<String, usize>,
    edges: Vec<GraphEdge>,
    /// node index -> child node indices, one entry per edge
    outgoing: Vec<Vec<usize>>,
    /// node index -> parent node indices, one entry per edge
    incoming: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same id exists. Returns whether it was added.
    pub(crate) fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }

        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        true
    }

    /// Add a parent -> child edge. Both endpoints must already be nodes.
    pub(crate) fn insert_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(&src), Some(&dst)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };

        self.edges.push(GraphEdge::new(from, to));
        self.outgoing[src].push(dst);
        self.incoming[dst].push(src);
        true
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Child indices of the node at `idx`
    pub(crate) fn successors(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges, duplicates included
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Edges with redundant repeats of the same (from, to) pair removed
    pub fn unique_edges(&self) -> Vec<&GraphEdge> {
        let mut seen = HashSet::new();
        self.edges.iter().filter(|edge| seen.insert(*edge)).collect()
    }

    /// Get children of a commit
    pub fn children_of(&self, commit_id: &str) -> Vec<&GraphNode> {
        self.neighbours(commit_id, &self.outgoing)
    }

    /// Get parents of a commit
    pub fn parents_of(&self, commit_id: &str) -> Vec<&GraphNode> {
        self.neighbours(commit_id, &self.incoming)
    }

    fn neighbours<'a>(&'a self, commit_id: &str, adjacency: &[Vec<usize>]) -> Vec<&'a GraphNode> {
        let Some(idx) = self.index_of(commit_id) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        adjacency[idx]
            .iter()
            .filter(|&&n| seen.insert(n))
            .map(|&n| &self.nodes[n])
            .collect()
    }

    /// Nodes with no parent inside this graph
    pub fn roots(&self) -> Vec<&GraphNode> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.incoming[*idx].is_empty())
            .map(|(_, node)| node)
            .collect()
    }

    /// Nodes with no children (branch tips)
    pub fn leaves(&self) -> Vec<&GraphNode> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.outgoing[*idx].is_empty())
            .map(|(_, node)| node)
            .collect()
    }

    /// Nodes that were only seen as parent references
    pub fn placeholders(&self) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.is_placeholder()).collect()
    }

    /// Count of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let placeholder_nodes = self.placeholders().len();
        let merge_commits = self
            .incoming
            .iter()
            .filter(|parents| parents.iter().collect::<HashSet<_>>().len() > 1)
            .count();

        GraphStats {
            commit_nodes: self.nodes.len() - placeholder_nodes,
            placeholder_nodes,
            total_edges: self.edges.len(),
            distinct_edges: self.unique_edges().len(),
            merge_commits,
            root_nodes: self.roots().len(),
            leaf_nodes: self.leaves().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub commit_nodes: usize,
    pub placeholder_nodes: usize,
    pub total_edges: usize,
    pub distinct_edges: usize,
    pub merge_commits: usize,
    pub root_nodes: usize,
    pub leaf_nodes: usize,
}
