use super::dag::Graph;

/// The node at which a traversal ran back into its own active path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWitness {
    pub node: String,
}

/// Check that the graph has no directed cycle
pub fn is_acyclic(graph: &Graph) -> bool {
    find_cycle(graph).is_none()
}

/// Depth-first search for a back edge.
///
/// Every node is tried as a start point, so disconnected components and
/// placeholder nodes are covered. Nodes already fully explored are never
/// walked again, which keeps the search linear in nodes plus edges even
/// when thousands of commits share one ancestor.
pub fn find_cycle(graph: &Graph) -> Option<CycleWitness> {
    let mut traversal = Traversal::new(graph);

    for start in 0..graph.node_count() {
        if let Some(idx) = traversal.explore(start) {
            let node = graph.nodes()[idx].id.clone();
            tracing::debug!(%node, "cycle detected");
            return Some(CycleWitness { node });
        }
    }

    None
}

/// Detector state for one full call
struct Traversal<'a> {
    graph: &'a Graph,
    /// Nodes whose exploration has started; once off the stack they are known cycle-free
    visited: Vec<bool>,
    /// Nodes on the active path
    on_stack: Vec<bool>,
    /// Active path: node index and the position of the next edge to follow
    frames: Vec<(usize, usize)>,
}

impl<'a> Traversal<'a> {
    fn new(graph: &'a Graph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            visited: vec![false; n],
            on_stack: vec![false; n],
            frames: Vec::new(),
        }
    }

    /// Explore from `start`; returns the node that closes a cycle, if any
    fn explore(&mut self, start: usize) -> Option<usize> {
        if self.visited[start] {
            return None;
        }
        self.enter(start);

        while let Some(frame) = self.frames.last_mut() {
            let (node, next) = *frame;
            let successors = self.graph.successors(node);

            let Some(&child) = successors.get(next) else {
                self.on_stack[node] = false;
                self.frames.pop();
                continue;
            };
            frame.1 += 1;

            if self.on_stack[child] {
                return Some(child);
            }
            if !self.visited[child] {
                self.enter(child);
            }
        }

        None
    }

    fn enter(&mut self, node: usize) {
        self.visited[node] = true;
        self.on_stack[node] = true;
        self.frames.push((node, 0));
    }
}
