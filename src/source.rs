use anyhow::{Context, Result};
use github::{fetch_with_retry, CredentialPrompt, GitHubClient, HistoryPage, RepoRef, Transport};
use graph::{CommitRecord, GitWalker};
use std::path::PathBuf;

/// Where commit records come from
pub trait CommitSource {
    /// Short human-readable name for logs
    fn describe(&self) -> String;

    fn fetch(&mut self) -> Result<Vec<CommitRecord>>;
}

/// Default-branch history of a GitHub repository
pub struct GitHubSource<T: Transport, P> {
    client: GitHubClient<T>,
    repo: RepoRef,
    page: HistoryPage,
    prompt: P,
    max_attempts: usize,
}

impl<T: Transport, P: CredentialPrompt> GitHubSource<T, P> {
    pub fn new(client: GitHubClient<T>, repo: RepoRef, page: HistoryPage, prompt: P) -> Self {
        Self {
            client,
            repo,
            page,
            prompt,
            max_attempts: github::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}

impl<T: Transport, P: CredentialPrompt> CommitSource for GitHubSource<T, P> {
    fn describe(&self) -> String {
        format!("github:{}", self.repo)
    }

    fn fetch(&mut self) -> Result<Vec<CommitRecord>> {
        fetch_with_retry(
            &mut self.client,
            &self.repo,
            self.page,
            &mut self.prompt,
            self.max_attempts,
        )
        .with_context(|| format!("Failed to fetch commits of {}", self.repo))
    }
}

/// History of HEAD in a local clone
pub struct LocalSource {
    path: PathBuf,
    limit: usize,
}

impl LocalSource {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
        }
    }
}

impl CommitSource for LocalSource {
    fn describe(&self) -> String {
        format!("local:{}", self.path.display())
    }

    fn fetch(&mut self) -> Result<Vec<CommitRecord>> {
        let walker = GitWalker::open(Some(self.path.as_path()))?;
        if let Some(branch) = walker.head_branch() {
            tracing::debug!(%branch, "reading local history");
        }
        walker.default_branch_history(Some(self.limit))
    }
}
