use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The API rejected the token (HTTP 401)
    #[error("GitHub rejected the access token")]
    Unauthorized,

    #[error("GitHub API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request to GitHub failed: {0}")]
    Transport(String),

    #[error("GraphQL query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("repository {0} not found or not accessible")]
    RepositoryNotFound(String),

    #[error("repository {0} has no default branch")]
    NoDefaultBranch(String),

    #[error("unexpected GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("gave up after {attempts} rejected tokens")]
    RetriesExhausted { attempts: usize },
}

impl FetchError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized)
    }
}
