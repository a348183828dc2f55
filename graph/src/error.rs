use thiserror::Error;

/// Errors raised while turning commit records into a graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A record (or one of its parent references) carries an unusable id
    #[error("invalid commit record at position {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
