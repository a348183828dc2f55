use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "commitgraph")]
#[command(about = "Draw a repository's commit history as a graph", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Repository owner (user or organisation)
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(short, long)]
    pub repo: Option<String>,

    /// GitHub personal access token (defaults to $ACCESS_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Keep full commit messages as node labels
    #[arg(long)]
    pub no_truncate: bool,

    /// Maximum label length before truncation
    #[arg(long, value_name = "CHARS")]
    pub max_label: Option<usize>,

    /// Directory for commit_graph.dot and commit_graph.png
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only write the DOT file, skip running graphviz
    #[arg(long)]
    pub dot_only: bool,

    /// Number of commits to fetch (at most 100)
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// How many tokens to try before giving up on GitHub
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<usize>,

    /// Read history from a local repository instead of GitHub
    #[arg(long, value_name = "PATH")]
    pub local: Option<PathBuf>,

    /// Configuration file (defaults to ./commitgraph.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
