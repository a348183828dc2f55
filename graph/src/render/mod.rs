pub mod dot;
pub mod graphviz;

pub use dot::DotWriter;
pub use graphviz::{
    GraphvizRenderer, OutputPaths, RenderError, RenderReport, Renderer, DEFAULT_DOT_FILE,
    DEFAULT_PNG_FILE,
};
