//! Who may use query blocks.
//!
//! Staff always may. Anyone else must belong to at least one of the groups
//! listed in [`Settings::allowed_groups`]. The check is fail-closed: if the
//! group lookup fails, the user is treated as not allowed.

use rustc_hash::FxHashSet;

use crate::{
    Settings,
    error::LookupError,
    model::{GroupId, User, UserId},
};

/// Source of group memberships.
pub trait GroupDirectory {
    /// Groups `user` belongs to.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when membership cannot be determined.
    fn group_ids(&self, user: UserId) -> Result<Vec<GroupId>, LookupError>;
}

/// Decides whether a user may use query blocks.
///
/// Holds no cache; callers that check the same user repeatedly within one
/// render pass keep the answer themselves.
#[derive(Clone, Copy)]
pub struct Authorizer<'a> {
    settings: &'a Settings,
    directory: &'a dyn GroupDirectory,
}

impl<'a> Authorizer<'a> {
    /// Create an authorizer over the given settings and directory.
    #[must_use]
    pub fn new(settings: &'a Settings, directory: &'a dyn GroupDirectory) -> Self {
        Self {
            settings,
            directory,
        }
    }

    /// `true` for staff and members of an allowed group, `false` otherwise.
    ///
    /// Never errors: lookup failures resolve to `false`.
    #[must_use]
    #[tracing::instrument(skip(self, user), fields(user = %user.username))]
    pub fn can_use_query_blocks(&self, user: &User) -> bool {
        if user.is_staff() {
            return true;
        }

        let allowed: FxHashSet<GroupId> = self.settings.allowed_groups().iter().copied().collect();
        if allowed.is_empty() {
            return false;
        }

        match self.directory.group_ids(user.id) {
            Ok(groups) => groups.iter().any(|group| allowed.contains(group)),
            Err(error) => {
                tracing::warn!(%error, "group lookup failed, denying query blocks");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Groups(Result<Vec<GroupId>, LookupError>);

    impl GroupDirectory for Groups {
        fn group_ids(&self, _user: UserId) -> Result<Vec<GroupId>, LookupError> {
            self.0.clone()
        }
    }

    fn settings(groups: &[u64]) -> Settings {
        Settings::builder()
            .enabled(true)
            .allowed_groups(groups.iter().copied().map(GroupId).collect())
            .build()
    }

    #[test]
    fn staff_is_always_allowed() {
        let settings = settings(&[]);
        let directory = Groups(Err(LookupError::Unavailable("down".into())));
        let authorizer = Authorizer::new(&settings, &directory);
        assert!(authorizer.can_use_query_blocks(&User::admin(1, "root")));
    }

    #[rstest::rstest]
    #[case::member(&[5], vec![GroupId(5)], true)]
    #[case::one_of_many(&[5, 9], vec![GroupId(1), GroupId(9)], true)]
    #[case::not_member(&[5], vec![GroupId(6)], false)]
    #[case::no_allowed_groups(&[], vec![GroupId(6)], false)]
    fn group_membership(
        #[case] allowed: &[u64],
        #[case] member_of: Vec<GroupId>,
        #[case] expected: bool,
    ) {
        let settings = settings(allowed);
        let directory = Groups(Ok(member_of));
        let authorizer = Authorizer::new(&settings, &directory);
        assert_eq!(authorizer.can_use_query_blocks(&User::new(2, "bob")), expected);
    }

    #[test]
    #[tracing_test::traced_test]
    fn lookup_failure_is_denied() {
        let settings = settings(&[5]);
        let directory = Groups(Err(LookupError::UnknownUser("bob".into())));
        let authorizer = Authorizer::new(&settings, &directory);
        assert!(!authorizer.can_use_query_blocks(&User::new(2, "bob")));
        assert!(logs_contain("group lookup failed"));
    }
}
