//! Commit graph construction, acyclicity checking and rendering.

pub mod core;
pub mod error;
pub mod git_backend;
pub mod render;

pub use self::core::{
    build, find_cycle, is_acyclic, CommitRecord, CycleWitness, Graph, GraphBuilder, GraphEdge,
    GraphNode, GraphStats, LabelPolicy, NodeKind,
};
pub use error::GraphError;
pub use git_backend::GitWalker;
pub use render::{DotWriter, GraphvizRenderer, OutputPaths, RenderError, RenderReport, Renderer};
