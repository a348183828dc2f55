use super::dot::DotWriter;
use crate::core::Graph;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

pub const DEFAULT_DOT_FILE: &str = "images/commit_graph.dot";
pub const DEFAULT_PNG_FILE: &str = "images/commit_graph.png";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("graphviz executable `{program}` could not be started: {source}")]
    GraphvizUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("graphviz exited with {status}: {stderr}")]
    GraphvizFailed { status: String, stderr: String },
}

/// Where rendered artefacts go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dot: PathBuf,
    pub image: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            dot: PathBuf::from(DEFAULT_DOT_FILE),
            image: PathBuf::from(DEFAULT_PNG_FILE),
        }
    }
}

impl OutputPaths {
    /// `commit_graph.dot` and `commit_graph.png` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dot: dir.join("commit_graph.dot"),
            image: dir.join("commit_graph.png"),
        }
    }
}

/// What a render produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub dot: PathBuf,
    pub image: Option<PathBuf>,
}

/// Turns a verified graph into files
pub trait Renderer {
    fn render(&self, graph: &Graph, paths: &OutputPaths) -> Result<RenderReport, RenderError>;
}

/// Writes DOT and optionally rasterises it with the Graphviz `dot` tool
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    writer: DotWriter,
    program: String,
    image: bool,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self {
            writer: DotWriter::default(),
            program: "dot".to_string(),
            image: true,
        }
    }
}

impl GraphvizRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different Graphviz executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Only write the DOT file
    pub fn dot_only(mut self) -> Self {
        self.image = false;
        self
    }

    fn rasterise(&self, dot: &Path, image: &Path) -> Result<(), RenderError> {
        let output = Command::new(&self.program)
            .arg("-Tpng")
            .arg("-o")
            .arg(image)
            .arg(dot)
            .output()
            .map_err(|source| RenderError::GraphvizUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::GraphvizFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, graph: &Graph, paths: &OutputPaths) -> Result<RenderReport, RenderError> {
        write_file(&paths.dot, &self.writer.write(graph))?;
        tracing::debug!(path = %paths.dot.display(), "wrote dot file");

        if !self.image {
            return Ok(RenderReport {
                dot: paths.dot.clone(),
                image: None,
            });
        }

        create_parent(&paths.image)?;
        self.rasterise(&paths.dot, &paths.image)?;
        tracing::debug!(path = %paths.image.display(), "rendered image");

        Ok(RenderReport {
            dot: paths.dot.clone(),
            image: Some(paths.image.clone()),
        })
    }
}

fn create_parent(path: &Path) -> Result<(), RenderError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| RenderError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    create_parent(path)?;
    fs::write(path, contents).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
