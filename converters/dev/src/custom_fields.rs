//! An in-memory [`CustomFieldStore`].

use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
};

use topic_query_converters_core::{CustomFieldStore, PostId, StoreError};

/// Flags held in a sorted set, so [`CustomFieldStore::posts_with_flag`]
/// returns ids in ascending order.
#[derive(Debug, Default)]
pub struct InMemoryCustomFields {
    flags: RefCell<BTreeSet<(PostId, String)>>,
    failing: Cell<bool>,
}

impl InMemoryCustomFields {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of flags currently stored under `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.flags
            .borrow()
            .iter()
            .filter(|(_, flag)| flag == name)
            .count()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.get() {
            Err(StoreError::Backend("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl CustomFieldStore for InMemoryCustomFields {
    fn flag(&self, post: PostId, name: &str) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.flags.borrow().contains(&(post, name.to_string())))
    }

    fn set_flag(&self, post: PostId, name: &str) -> Result<(), StoreError> {
        self.check()?;
        self.flags.borrow_mut().insert((post, name.to_string()));
        Ok(())
    }

    fn delete_flag(&self, post: PostId, name: &str) -> Result<(), StoreError> {
        self.check()?;
        self.flags.borrow_mut().remove(&(post, name.to_string()));
        Ok(())
    }

    fn posts_with_flag(&self, name: &str) -> Result<Vec<PostId>, StoreError> {
        self.check()?;
        Ok(self
            .flags
            .borrow()
            .iter()
            .filter(|(_, flag)| flag == name)
            .map(|(post, _)| *post)
            .collect())
    }
}
