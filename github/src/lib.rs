//! Fetches a repository's default-branch history from the GitHub GraphQL API.

pub mod client;
pub mod error;
pub mod query;
pub mod retry;
pub mod transport;

pub use client::{GitHubClient, RepoRef};
pub use error::FetchError;
pub use query::{GraphQlRequest, HistoryPage, HISTORY_QUERY, MAX_PAGE_SIZE};
pub use retry::{fetch_with_retry, CredentialPrompt, DEFAULT_MAX_ATTEMPTS};
pub use transport::{Transport, UreqTransport, GITHUB_GRAPHQL_URL};
