mod cli;
mod config;
mod pipeline;
mod prompt;
mod source;

use anyhow::Result;
use clap::Parser;
use github::{GitHubClient, RepoRef};
use graph::{GraphBuilder, GraphvizRenderer};
use std::io::{BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{Config, FileConfig, TOKEN_ENV};
use pipeline::{Outcome, Pipeline};
use prompt::Console;
use source::{CommitSource, GitHubSource, LocalSource};

fn main() -> Result<ExitCode> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = FileConfig::discover(cli.config.as_deref())?;
    let config = Config::resolve(&cli, std::env::var(TOKEN_ENV).ok(), file);
    tracing::debug!(
        owner = ?config.owner,
        repository = ?config.repository,
        truncate = config.truncate_messages,
        "configuration resolved"
    );

    let renderer = if config.dot_only {
        GraphvizRenderer::new().dot_only()
    } else {
        GraphvizRenderer::new()
    };

    match &config.local {
        Some(path) => {
            let source = LocalSource::new(path, config.page_size as usize);
            run(source, renderer, &config)
        }
        None => {
            let mut console = Console::stdio();
            console.say("Welcome to the commit graph generator!")?;

            let Some((repo, token)) = ask_missing(&config, &mut console)? else {
                console.say("Exiting...")?;
                return Ok(ExitCode::FAILURE);
            };

            let source = GitHubSource::new(
                GitHubClient::new(token),
                repo,
                config.history_page(),
                console,
            )
            .max_attempts(config.max_attempts);
            run(source, renderer, &config)
        }
    }
}

/// Fill in repository, owner and token from the terminal where they were not configured
fn ask_missing<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<Option<(RepoRef, String)>> {
    let name = match &config.repository {
        Some(name) => name.clone(),
        None => console.ask_required("Please enter the name of the repository: ")?,
    };
    let owner = match &config.owner {
        Some(owner) => owner.clone(),
        None => console.ask_required("Please enter the owner of the repository: ")?,
    };

    let token = match &config.token {
        Some(token) => {
            console.say(&format!("Token found {}. Using it...", token.source))?;
            token.value.clone()
        }
        None => {
            if !console.confirm("No token found in environment. Do you want to enter it manually?")? {
                return Ok(None);
            }
            console.ask_required("Please enter your GitHub Personal Access Token: ")?
        }
    };

    Ok(Some((RepoRef::new(owner, name), token)))
}

fn run<S: CommitSource>(source: S, renderer: GraphvizRenderer, config: &Config) -> Result<ExitCode> {
    let mut pipeline = Pipeline::new(
        source,
        renderer,
        GraphBuilder::new(config.label_policy()),
        config.output_paths(),
    );

    match pipeline.run()? {
        Outcome::Rendered { report, stats } => {
            println!("Graph generated successfully.");
            println!(
                "  {} commits, {} placeholder parents, {} edges",
                stats.commit_nodes, stats.placeholder_nodes, stats.distinct_edges
            );
            println!("  dot:   {}", report.dot.display());
            if let Some(image) = report.image {
                println!("  image: {}", image.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cyclic(witness) => {
            eprintln!(
                "Error: The commit graph is not acyclic (cycle through {}).",
                witness.node
            );
            Ok(ExitCode::from(2))
        }
    }
}

fn init_tracing(verbose: bool) {
    // Can be controlled via RUST_LOG, e.g. RUST_LOG=graph=debug
    let default = if verbose {
        "commitgraph=debug,graph=debug,github=debug"
    } else {
        "commitgraph=info,graph=info,github=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn config(cli: Cli) -> Config {
        Config::resolve(&cli, None, FileConfig::default())
    }

    #[test]
    fn test_ask_missing_prompts_for_everything() -> Result<()> {
        let mut console = console("demo\nocto\ny\nsecret\n");

        let answer = ask_missing(&config(Cli::default()), &mut console)?;

        assert_eq!(answer, Some((RepoRef::new("octo", "demo"), "secret".to_string())));
        Ok(())
    }

    #[test]
    fn test_ask_missing_uses_configured_values() -> Result<()> {
        let cli = Cli {
            owner: Some("octo".into()),
            repo: Some("demo".into()),
            token: Some("t0k".into()),
            ..Cli::default()
        };
        let mut console = console("");

        let answer = ask_missing(&config(cli), &mut console)?;

        assert_eq!(answer, Some((RepoRef::new("octo", "demo"), "t0k".to_string())));
        let said = String::from_utf8(console.into_output())?;
        assert_eq!(said, "Token found on the command line. Using it...\n");
        Ok(())
    }

    #[test]
    fn test_declining_token_entry_exits() -> Result<()> {
        let cli = Cli {
            owner: Some("octo".into()),
            repo: Some("demo".into()),
            ..Cli::default()
        };
        let mut console = console("n\n");

        assert_eq!(ask_missing(&config(cli), &mut console)?, None);
        Ok(())
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "commitgraph",
            "--owner",
            "octo",
            "--repo",
            "demo",
            "--no-truncate",
            "--page-size",
            "20",
            "--dot-only",
            "--max-attempts",
            "1",
        ]);
        let config = config(cli);

        assert!(!config.truncate_messages);
        assert_eq!(config.page_size, 20);
        assert!(config.dot_only);
        assert_eq!(config.max_attempts, 1);
    }
}
