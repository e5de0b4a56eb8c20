//! The search and listing engines query blocks run against.
//!
//! Both calls are blocking from the renderer's point of view and scoped to
//! what the acting user may see.

use crate::{
    error::EngineError,
    model::{PostId, Topic, User},
    request::{ListingRequest, SearchRequest},
};

/// Free-text search over posts.
pub trait SearchEngine {
    /// Run `request` with the visibility of `viewer`.
    ///
    /// The request's excerpt length is a hint for blurb generation.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the query is malformed or the engine
    /// cannot answer.
    fn search(&self, request: &SearchRequest, viewer: &User) -> Result<SearchResults, EngineError>;
}

/// Structured topic listing.
pub trait ListingEngine {
    /// List topics matching `request` that `viewer` may see, in the requested order.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the engine cannot answer.
    fn list(&self, request: &ListingRequest, viewer: &User) -> Result<Vec<Topic>, EngineError>;
}

/// One matched post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// The matched post.
    pub post_id: PostId,
    /// Username of the post's author.
    pub author: String,
    /// The topic the post belongs to.
    pub topic: Topic,
}

/// Search results, in rank order, with their excerpts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults {
    hits: Vec<(SearchHit, String)>,
}

impl SearchResults {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hit with its blurb.
    pub fn push(&mut self, hit: SearchHit, blurb: impl Into<String>) {
        self.hits.push((hit, blurb.into()));
    }

    /// Matched posts in rank order.
    pub fn posts(&self) -> impl Iterator<Item = &SearchHit> {
        self.hits.iter().map(|(hit, _)| hit)
    }

    /// Excerpt for a matched post.
    #[must_use]
    pub fn blurb(&self, post: PostId) -> Option<&str> {
        self.hits
            .iter()
            .find(|(hit, _)| hit.post_id == post)
            .map(|(_, blurb)| blurb.as_str())
    }

    /// Number of matched posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
