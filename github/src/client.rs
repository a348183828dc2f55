use graph::CommitRecord;
use std::fmt;

use crate::error::FetchError;
use crate::query::{parse_history, GraphQlRequest, HistoryPage};
use crate::transport::{Transport, UreqTransport};

/// `owner/name` of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A transport bound to one access token
pub struct GitHubClient<T = UreqTransport> {
    transport: T,
    token: String,
}

impl GitHubClient<UreqTransport> {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_transport(UreqTransport::default(), token)
    }
}

impl<T: Transport> GitHubClient<T> {
    pub fn with_transport(transport: T, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into(),
        }
    }

    /// Swap in a replacement token, keeping the transport
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// First page of the default branch history
    pub fn fetch_history(
        &self,
        repo: &RepoRef,
        page: HistoryPage,
    ) -> Result<Vec<CommitRecord>, FetchError> {
        tracing::debug!(%repo, page_size = page.page_size, "querying commit history");

        let request = GraphQlRequest::history(&repo.owner, &repo.name, page);
        let response = self.transport.execute(&self.token, &request)?;
        let records = parse_history(response, &repo.to_string())?;

        tracing::info!(%repo, commits = records.len(), "fetched commit history");
        Ok(records)
    }
}
