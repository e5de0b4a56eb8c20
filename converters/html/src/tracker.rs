//! Keeps the `has_topic_query` flag in step with cooked output.

use topic_query_converters_core::{CustomFieldStore, HAS_TOPIC_QUERY, PostId, StoreError};
use topic_query_parser::constants::MARKER_CLASS;

use crate::dom::Html;

/// What [`PresenceTracker::track`] did to the flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresenceChange {
    /// The post gained its first query block.
    Set,
    /// The post no longer has any query block.
    Deleted,
    /// The flag already matched.
    Unchanged,
}

/// Records whether a post's rendered output contains query blocks.
#[derive(Clone, Copy)]
pub struct PresenceTracker<'a> {
    store: &'a dyn CustomFieldStore,
}

impl<'a> PresenceTracker<'a> {
    #[must_use]
    pub fn new(store: &'a dyn CustomFieldStore) -> Self {
        Self { store }
    }

    /// Update the flag of `post` from its rendered tree.
    ///
    /// Must run after the renderer, so the flag reflects the containers that
    /// are actually in the output.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the flag cannot be read or written.
    #[tracing::instrument(skip(self, html))]
    pub fn track(&self, post: PostId, html: &Html) -> Result<PresenceChange, StoreError> {
        let present = html.contains_class(MARKER_CLASS);
        let flagged = self.store.flag(post, HAS_TOPIC_QUERY)?;
        let change = match (present, flagged) {
            (true, false) => {
                self.store.set_flag(post, HAS_TOPIC_QUERY)?;
                PresenceChange::Set
            }
            (false, true) => {
                self.store.delete_flag(post, HAS_TOPIC_QUERY)?;
                PresenceChange::Deleted
            }
            (true, true) | (false, false) => PresenceChange::Unchanged,
        };
        tracing::debug!(present, ?change, "tracked query block presence");
        Ok(change)
    }
}
