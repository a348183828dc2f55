use anyhow::{Context, Result};
use github::{HistoryPage, DEFAULT_MAX_ATTEMPTS, MAX_PAGE_SIZE};
use graph::{LabelPolicy, OutputPaths};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

pub const TOKEN_ENV: &str = "ACCESS_TOKEN";
pub const DEFAULT_CONFIG_FILE: &str = "commitgraph.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Settings read from a TOML file; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub repository: Option<String>,
    pub owner: Option<String>,
    pub token: Option<String>,
    pub truncate_messages: Option<bool>,
    pub max_label: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub page_size: Option<u32>,
    pub max_attempts: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// The explicit file, or the default one if it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Where the access token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    CommandLine,
    Environment,
    ConfigFile,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::CommandLine => write!(f, "on the command line"),
            TokenSource::Environment => write!(f, "in environment"),
            TokenSource::ConfigFile => write!(f, "in the config file"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub source: TokenSource,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Effective settings: command line, then environment, then file, then defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repository: Option<String>,
    pub owner: Option<String>,
    pub token: Option<Token>,
    pub truncate_messages: bool,
    pub max_label: usize,
    pub output_dir: PathBuf,
    pub page_size: u32,
    pub max_attempts: usize,
    pub local: Option<PathBuf>,
    pub dot_only: bool,
}

impl Config {
    pub fn resolve(cli: &Cli, env_token: Option<String>, file: FileConfig) -> Self {
        let truncate_messages = !cli.no_truncate && file.truncate_messages.unwrap_or(true);

        Self {
            repository: non_blank(cli.repo.clone()).or(non_blank(file.repository)),
            owner: non_blank(cli.owner.clone()).or(non_blank(file.owner)),
            token: [
                (cli.token.clone(), TokenSource::CommandLine),
                (env_token, TokenSource::Environment),
                (file.token, TokenSource::ConfigFile),
            ]
            .into_iter()
            .find_map(|(value, source)| non_blank(value).map(|value| Token { value, source })),
            truncate_messages,
            max_label: cli
                .max_label
                .or(file.max_label)
                .unwrap_or(graph::core::DEFAULT_LABEL_CHARS),
            output_dir: cli
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            page_size: cli.page_size.or(file.page_size).unwrap_or(MAX_PAGE_SIZE),
            max_attempts: cli
                .max_attempts
                .or(file.max_attempts)
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            local: cli.local.clone(),
            dot_only: cli.dot_only,
        }
    }

    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy {
            truncate: self.truncate_messages,
            ..LabelPolicy::truncated(self.max_label)
        }
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::in_dir(&self.output_dir)
    }

    pub fn history_page(&self) -> HistoryPage {
        HistoryPage::new(self.page_size)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&Cli::default(), None, FileConfig::default());

        assert_eq!(config.repository, None);
        assert_eq!(config.token, None);
        assert!(config.truncate_messages);
        assert_eq!(config.max_label, 30);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.output_paths(), OutputPaths::default());
        assert_eq!(config.label_policy(), LabelPolicy::default());
    }

    #[test]
    fn test_precedence() {
        let cli = Cli {
            owner: Some("cli-owner".into()),
            token: Some("  ".into()),
            ..Cli::default()
        };
        let file = FileConfig {
            owner: Some("file-owner".into()),
            repository: Some("file-repo".into()),
            token: Some("file-token".into()),
            truncate_messages: Some(false),
            ..FileConfig::default()
        };

        let config = Config::resolve(&cli, Some("env-token".into()), file);

        assert_eq!(config.owner.as_deref(), Some("cli-owner"));
        assert_eq!(config.repository.as_deref(), Some("file-repo"));
        // Blank CLI token falls through to the environment
        assert_eq!(
            config.token,
            Some(Token {
                value: "env-token".into(),
                source: TokenSource::Environment,
            })
        );
        assert!(!config.truncate_messages);
        assert!(!config.label_policy().truncate);
    }

    #[test]
    fn test_token_source_is_recorded() {
        let file = FileConfig {
            token: Some("file-token".into()),
            max_attempts: Some(5),
            ..FileConfig::default()
        };
        let config = Config::resolve(&Cli::default(), None, file);

        assert_eq!(config.token.as_ref().map(|t| t.source), Some(TokenSource::ConfigFile));
        assert_eq!(config.max_attempts, 5);

        let cli = Cli {
            token: Some("cli-token".into()),
            ..Cli::default()
        };
        let config = Config::resolve(&cli, Some("env-token".into()), FileConfig::default());
        assert_eq!(config.token.as_ref().map(|t| t.value.as_str()), Some("cli-token"));
        assert_eq!(config.token.as_ref().map(|t| t.source), Some(TokenSource::CommandLine));
    }

    #[test]
    fn test_token_is_not_logged() {
        let token = Token {
            value: "ghp_secret".into(),
            source: TokenSource::Environment,
        };
        assert!(!format!("{token:?}").contains("ghp_secret"));
    }

    #[test]
    fn test_no_truncate_flag_wins() {
        let cli = Cli {
            no_truncate: true,
            ..Cli::default()
        };
        let file = FileConfig {
            truncate_messages: Some(true),
            ..FileConfig::default()
        };
        assert!(!Config::resolve(&cli, None, file).truncate_messages);
    }

    #[test]
    fn test_load_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("commitgraph.toml");
        std::fs::write(
            &path,
            "owner = \"octo\"\nrepository = \"demo\"\nmax_label = 12\noutput_dir = \"out\"\n",
        )?;

        let file = FileConfig::load(&path)?;
        assert_eq!(file.owner.as_deref(), Some("octo"));
        assert_eq!(file.max_label, Some(12));

        let config = Config::resolve(&Cli::default(), None, file);
        assert_eq!(config.output_paths(), OutputPaths::in_dir("out"));
        assert_eq!(config.label_policy().max_chars, 12);
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "colour = \"red\"\n")?;

        assert!(FileConfig::load(&path).is_err());
        Ok(())
    }
}
