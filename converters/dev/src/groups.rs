//! An in-memory [`GroupDirectory`].

use rustc_hash::FxHashMap;
use topic_query_converters_core::{GroupDirectory, GroupId, LookupError, UserId};

/// Group memberships keyed by user.
///
/// Users with no recorded membership are unknown, which is a lookup error.
#[derive(Debug, Default)]
pub struct InMemoryGroups {
    members: FxHashMap<UserId, Vec<GroupId>>,
    offline: bool,
}

impl InMemoryGroups {
    /// A directory with no members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory whose every lookup fails.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Record that `user` belongs to `groups`.
    #[must_use]
    pub fn with_member(mut self, user: UserId, groups: &[u64]) -> Self {
        self.members
            .entry(user)
            .or_default()
            .extend(groups.iter().copied().map(GroupId));
        self
    }
}

impl GroupDirectory for InMemoryGroups {
    fn group_ids(&self, user: UserId) -> Result<Vec<GroupId>, LookupError> {
        if self.offline {
            return Err(LookupError::Unavailable("directory offline".to_string()));
        }
        self.members
            .get(&user)
            .cloned()
            .ok_or_else(|| LookupError::UnknownUser(user.to_string()))
    }
}
