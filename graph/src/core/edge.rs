/// A directed edge: `from` is a parent of `to`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphEdge {
    /// Parent commit ID
    pub from: String,
    /// Child commit ID
    pub to: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Edge pointing back at its own source
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
