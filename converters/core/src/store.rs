//! Per-post custom fields.

use crate::{error::StoreError, model::PostId};

/// Name of the flag marking posts that contain at least one query block.
pub const HAS_TOPIC_QUERY: &str = "has_topic_query";

/// Boolean custom fields attached to posts.
///
/// Implementations own their synchronization; all methods take `&self` so the
/// store can be shared between the render hook and the rebake sweep.
pub trait CustomFieldStore {
    /// Whether `post` carries the flag `name` set to true.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be read.
    fn flag(&self, post: PostId, name: &str) -> Result<bool, StoreError>;

    /// Set the flag `name` on `post` to true.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be written.
    fn set_flag(&self, post: PostId, name: &str) -> Result<(), StoreError>;

    /// Remove the flag `name` from `post`. Removing an absent flag is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be written.
    fn delete_flag(&self, post: PostId, name: &str) -> Result<(), StoreError>;

    /// Every post carrying the flag `name` set to true.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be read.
    fn posts_with_flag(&self, name: &str) -> Result<Vec<PostId>, StoreError>;
}
