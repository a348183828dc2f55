use crate::core::Graph;

/// Serialises a [`Graph`] as Graphviz DOT
#[derive(Debug, Clone)]
pub struct DotWriter {
    name: String,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self::new("commits")
    }
}

impl DotWriter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// One statement per node, then one per distinct edge
    pub fn write(&self, graph: &Graph) -> String {
        let mut out = format!("digraph {} {{\n", quote(&self.name));

        for node in graph.nodes() {
            out.push_str(&format!("    {} [label={}];\n", quote(&node.id), quote(&node.label)));
        }

        for edge in graph.unique_edges() {
            out.push_str(&format!("    {} -> {};\n", quote(&edge.from), quote(&edge.to)));
        }

        out.push_str("}\n");
        out
    }
}

/// Double-quoted DOT string
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
