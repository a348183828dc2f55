use graph::CommitRecord;

use crate::client::{GitHubClient, RepoRef};
use crate::error::FetchError;
use crate::query::HistoryPage;
use crate::transport::Transport;

pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Asks for a replacement token after the current one was rejected
pub trait CredentialPrompt {
    /// `None` means the user declined to retry
    fn replacement_token(&mut self, repo: &RepoRef, attempt: usize) -> Option<String>;
}

/// Fetch the history page, asking `prompt` for a new token each time the
/// API answers 401, for at most `max_attempts` requests in total.
///
/// A replacement token is written into `client`, so after success it holds
/// the token that worked. Any error other than a rejected token is returned
/// immediately.
pub fn fetch_with_retry<T, P>(
    client: &mut GitHubClient<T>,
    repo: &RepoRef,
    page: HistoryPage,
    prompt: &mut P,
    max_attempts: usize,
) -> Result<Vec<CommitRecord>, FetchError>
where
    T: Transport,
    P: CredentialPrompt + ?Sized,
{
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match client.fetch_history(repo, page) {
            Ok(records) => return Ok(records),
            Err(FetchError::Unauthorized) if attempt < max_attempts => {
                tracing::warn!(%repo, attempt, "access token rejected");
                let Some(token) = prompt.replacement_token(repo, attempt) else {
                    return Err(FetchError::Unauthorized);
                };
                client.set_token(token);
            }
            Err(FetchError::Unauthorized) => break,
            Err(err) => return Err(err),
        }
    }

    Err(FetchError::RetriesExhausted {
        attempts: max_attempts,
    })
}
