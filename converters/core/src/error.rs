//! Errors raised at the boundaries this crate talks to.

use crate::model::PostId;

/// Failure reported by a search or listing engine.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The query could not be understood.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// The engine could not serve the request.
    #[error("search engine unavailable: {0}")]
    Unavailable(String),
}

/// Failure while looking up a user's groups.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The user is unknown to the directory.
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// The directory could not be reached.
    #[error("group directory unavailable: {0}")]
    Unavailable(String),
}

/// Failure of the custom-field store.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store rejected or failed the operation.
    #[error("custom field store error: {0}")]
    Backend(String),
}

/// Failure while re-rendering a post.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum RebakeError {
    /// The post's source could not be rendered.
    #[error("failed to rebake post {0}: {1}")]
    Render(PostId, String),

    /// The post could not be loaded or saved.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = RebakeError::Render(PostId(7), "boom".to_string());
        assert_eq!(error.to_string(), "failed to rebake post 7: boom");

        let error = RebakeError::from(StoreError::Backend("locked".to_string()));
        assert_eq!(error.to_string(), "custom field store error: locked");
    }
}
