pub mod record;
pub mod node;
pub mod edge;
pub mod dag;
pub mod builder;
pub mod cycle;

pub use record::{CommitRecord, ParentIds};
pub use node::{GraphNode, NodeKind};
pub use edge::GraphEdge;
pub use dag::{Graph, GraphStats};
pub use builder::{build, GraphBuilder, LabelPolicy, DEFAULT_ELLIPSIS, DEFAULT_LABEL_CHARS};
pub use cycle::{find_cycle, is_acyclic, CycleWitness};
