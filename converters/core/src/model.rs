//! The slice of the forum's domain that query blocks read.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a user.
    UserId
);
id_type!(
    /// Identifies a group.
    GroupId
);
id_type!(
    /// Identifies a topic.
    TopicId
);
id_type!(
    /// Identifies a post.
    PostId
);
id_type!(
    /// Identifies a category.
    CategoryId
);

/// A user as seen by the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's id.
    pub id: UserId,
    /// The user's handle, used in message links.
    pub username: String,
    /// Administrator flag.
    #[serde(default)]
    pub admin: bool,
    /// Moderator flag.
    #[serde(default)]
    pub moderator: bool,
}

impl User {
    /// Create a regular (non-staff) user.
    #[must_use]
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            username: username.into(),
            admin: false,
            moderator: false,
        }
    }

    /// Create an administrator.
    #[must_use]
    pub fn admin(id: u64, username: impl Into<String>) -> Self {
        Self {
            admin: true,
            ..Self::new(id, username)
        }
    }

    /// Administrators and moderators are staff.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.admin || self.moderator
    }
}

/// A topic category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The category's id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Badge colour as a hex string without the leading `#`.
    pub color: String,
}

impl Category {
    /// Path of the category's topic list.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/c/{}/{}", self.slug, self.id)
    }
}

/// A tag with its usage counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTag {
    /// Tag name.
    pub name: String,
    /// Number of public topics carrying the tag.
    #[serde(default)]
    pub topic_count: u32,
    /// Number of private message topics carrying the tag.
    #[serde(default)]
    pub pm_topic_count: u32,
}

impl TopicTag {
    /// Create a tag used on `topic_count` public topics.
    #[must_use]
    pub fn new(name: impl Into<String>, topic_count: u32) -> Self {
        Self {
            name: name.into(),
            topic_count,
            pm_topic_count: 0,
        }
    }

    /// A tag only ever seen on private messages.
    #[must_use]
    pub fn is_message_only(&self) -> bool {
        self.topic_count == 0 && self.pm_topic_count > 0
    }
}

/// What kind of topic this is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// A public topic.
    #[default]
    Regular,
    /// A private message between users.
    PrivateMessage,
}

/// Lifecycle status used by the `status` listing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    /// Accepting replies.
    #[default]
    Open,
    /// No longer accepting replies.
    Closed,
    /// Frozen and read-only.
    Archived,
}

impl FromStr for TopicStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "archived" => Ok(Self::Archived),
            _ => Err(format!(
                "invalid status: '{s}', expected: open, closed, archived"
            )),
        }
    }
}

/// A topic, as listed or as the parent of a search hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// The topic's id.
    pub id: TopicId,
    /// Title shown in result lists.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Category, if the topic has one.
    pub category: Option<Category>,
    /// Tags in display order.
    #[serde(default)]
    pub tags: Vec<TopicTag>,
    /// Public topic or private message.
    #[serde(default)]
    pub archetype: Archetype,
    /// Open, closed or archived.
    #[serde(default)]
    pub status: TopicStatus,
    /// Username the topic is assigned to.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the latest activity.
    pub bumped_at: DateTime<Utc>,
}

impl Topic {
    /// Relative URL of the topic.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/t/{}/{}", self.slug, self.id)
    }

    /// Whether this topic is a private message.
    #[must_use]
    pub fn is_private_message(&self) -> bool {
        self.archetype == Archetype::PrivateMessage
    }
}

/// A post whose source may contain query blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// The post's id.
    pub id: PostId,
    /// The topic the post belongs to.
    pub topic_id: TopicId,
    /// Author; `None` once the account has been deleted.
    pub user: Option<User>,
    /// Source text.
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(0, 0, false)]
    #[case(0, 3, true)]
    #[case(2, 3, false)]
    fn test_message_only(#[case] topics: u32, #[case] messages: u32, #[case] expected: bool) {
        let tag = TopicTag {
            name: "t".into(),
            topic_count: topics,
            pm_topic_count: messages,
        };
        assert_eq!(tag.is_message_only(), expected);
    }

    #[test]
    fn test_staff() {
        assert!(User::admin(1, "root").is_staff());
        assert!(!User::new(2, "bob").is_staff());
        let moderator = User {
            moderator: true,
            ..User::new(3, "mod")
        };
        assert!(moderator.is_staff());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Closed".parse::<TopicStatus>(), Ok(TopicStatus::Closed));
        assert!("listed".parse::<TopicStatus>().is_err());
    }
}
