//! An in-memory forum implementing both query engines.
//!
//! Topics are created through [`NewTopic`] and get deterministic timestamps:
//! the clock starts at 2024-01-01T00:00:00Z and advances one minute per
//! created topic or reply, so creation order is also `created` order.
//!
//! Search understands a small query language: `#name` requires a tag and
//! every other whitespace-separated word must appear, case-insensitively, in
//! the post body or topic title. Results are most recent post first.

use std::{
    cell::{Cell, RefCell},
    cmp::Reverse,
    str::FromStr,
};

use chrono::{DateTime, TimeDelta, Utc};
use rustc_hash::FxHashMap;
use topic_query_converters_core::{
    Archetype, Category, EngineError, ListingEngine, ListingRequest, Post, PostId, SearchEngine,
    SearchHit, SearchRequest, SearchResults, Topic, TopicId, TopicStatus, TopicTag, User, UserId,
};

const EPOCH_SECS: i64 = 1_704_067_200;

/// A topic to create, with its first post.
#[derive(Clone, Debug)]
pub struct NewTopic {
    title: String,
    author: User,
    body: String,
    tags: Vec<String>,
    category: Option<Category>,
    archetype: Archetype,
    status: TopicStatus,
    assigned_to: Option<String>,
    participants: Vec<UserId>,
}

impl NewTopic {
    /// A public topic titled `title`, written by `author`.
    #[must_use]
    pub fn new(title: impl Into<String>, author: &User) -> Self {
        let title = title.into();
        Self {
            body: title.clone(),
            title,
            author: author.clone(),
            tags: Vec::new(),
            category: None,
            archetype: Archetype::Regular,
            status: TopicStatus::Open,
            assigned_to: None,
            participants: vec![author.id],
        }
    }

    /// Body of the first post. Defaults to the title.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Tags, in display order.
    #[must_use]
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    /// Category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(mut self, status: TopicStatus) -> Self {
        self.status = status;
        self
    }

    /// Assignee username.
    #[must_use]
    pub fn assigned_to(mut self, username: impl Into<String>) -> Self {
        self.assigned_to = Some(username.into());
        self
    }

    /// Make this a private message between the author and `recipients`.
    #[must_use]
    pub fn private_message(mut self, recipients: &[&User]) -> Self {
        self.archetype = Archetype::PrivateMessage;
        self.participants
            .extend(recipients.iter().map(|user| user.id));
        self
    }
}

#[derive(Clone, Debug)]
struct StoredTopic {
    topic: Topic,
    tag_names: Vec<String>,
    participants: Vec<UserId>,
}

#[derive(Clone, Debug, Default)]
struct TagCounts {
    topics: u32,
    messages: u32,
}

/// In-memory topics and posts.
///
/// All methods take `&self` so a forum can be shared with a renderer while
/// a test keeps adding content.
#[derive(Debug)]
pub struct Forum {
    clock: Cell<DateTime<Utc>>,
    topics: RefCell<Vec<StoredTopic>>,
    posts: RefCell<Vec<Post>>,
    next_topic: Cell<u64>,
    next_post: Cell<u64>,
    failure: RefCell<Option<EngineError>>,
}

impl Default for Forum {
    fn default() -> Self {
        Self::new()
    }
}

impl Forum {
    /// An empty forum.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Cell::new(DateTime::<Utc>::from_timestamp(EPOCH_SECS, 0).unwrap_or_default()),
            topics: RefCell::default(),
            posts: RefCell::default(),
            next_topic: Cell::new(1),
            next_post: Cell::new(1),
            failure: RefCell::default(),
        }
    }

    fn tick(&self) -> DateTime<Utc> {
        let now = self.clock.get() + TimeDelta::minutes(1);
        self.clock.set(now);
        now
    }

    fn next_post_id(&self) -> PostId {
        let id = self.next_post.get();
        self.next_post.set(id + 1);
        PostId(id)
    }

    /// Create a topic and its first post.
    pub fn create(&self, new: NewTopic) -> (TopicId, PostId) {
        let id = TopicId(self.next_topic.get());
        self.next_topic.set(id.0 + 1);
        let now = self.tick();

        let slug = slugify(&new.title);
        self.topics.borrow_mut().push(StoredTopic {
            topic: Topic {
                id,
                title: new.title,
                slug,
                category: new.category,
                tags: Vec::new(),
                archetype: new.archetype,
                status: new.status,
                assigned_to: new.assigned_to,
                created_at: now,
                bumped_at: now,
            },
            tag_names: new.tags,
            participants: new.participants,
        });

        let post = self.next_post_id();
        self.posts.borrow_mut().push(Post {
            id: post,
            topic_id: id,
            user: Some(new.author),
            raw: new.body,
        });
        (id, post)
    }

    /// Reply to `topic`, bumping it.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the topic does not exist.
    pub fn reply(
        &self,
        topic: TopicId,
        author: &User,
        body: impl Into<String>,
    ) -> Result<PostId, EngineError> {
        let now = self.tick();
        {
            let mut topics = self.topics.borrow_mut();
            let stored = topics
                .iter_mut()
                .find(|stored| stored.topic.id == topic)
                .ok_or_else(|| EngineError::Unavailable(format!("no topic {topic}")))?;
            stored.topic.bumped_at = now;
        }
        let post = self.next_post_id();
        self.posts.borrow_mut().push(Post {
            id: post,
            topic_id: topic,
            user: Some(author.clone()),
            raw: body.into(),
        });
        Ok(post)
    }

    /// A post by id.
    #[must_use]
    pub fn post(&self, id: PostId) -> Option<Post> {
        self.posts.borrow().iter().find(|post| post.id == id).cloned()
    }

    /// Replace a post's source.
    pub fn edit(&self, id: PostId, raw: impl Into<String>) {
        if let Some(post) = self.posts.borrow_mut().iter_mut().find(|post| post.id == id) {
            post.raw = raw.into();
        }
    }

    /// Hard-delete a post.
    pub fn delete_post(&self, id: PostId) {
        self.posts.borrow_mut().retain(|post| post.id != id);
    }

    /// Make every engine call fail with `error` until [`Forum::recover`].
    pub fn fail_with(&self, error: EngineError) {
        *self.failure.borrow_mut() = Some(error);
    }

    /// Undo [`Forum::fail_with`].
    pub fn recover(&self) {
        self.failure.borrow_mut().take();
    }

    fn check_failure(&self) -> Result<(), EngineError> {
        match self.failure.borrow().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn tag_counts(&self) -> FxHashMap<String, TagCounts> {
        let mut counts: FxHashMap<String, TagCounts> = FxHashMap::default();
        for stored in self.topics.borrow().iter() {
            for name in &stored.tag_names {
                let entry = counts.entry(name.clone()).or_default();
                if stored.topic.is_private_message() {
                    entry.messages += 1;
                } else {
                    entry.topics += 1;
                }
            }
        }
        counts
    }

    fn materialize(stored: &StoredTopic, counts: &FxHashMap<String, TagCounts>) -> Topic {
        let mut topic = stored.topic.clone();
        topic.tags = stored
            .tag_names
            .iter()
            .map(|name| {
                let count = counts.get(name).cloned().unwrap_or_default();
                TopicTag {
                    name: name.clone(),
                    topic_count: count.topics,
                    pm_topic_count: count.messages,
                }
            })
            .collect();
        topic
    }
}

fn can_see(stored: &StoredTopic, viewer: &User) -> bool {
    !stored.topic.is_private_message()
        || viewer.is_staff()
        || stored.participants.contains(&viewer.id)
}

fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn blurb(body: &str, length: i64) -> String {
    let length = usize::try_from(length).unwrap_or(0);
    let flattened = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= length {
        return flattened;
    }
    let mut cut: String = flattened.chars().take(length).collect();
    cut.push('…');
    cut
}

impl SearchEngine for Forum {
    fn search(&self, request: &SearchRequest, viewer: &User) -> Result<SearchResults, EngineError> {
        self.check_failure()?;
        let (tags, words): (Vec<&str>, Vec<&str>) = request
            .query
            .split_whitespace()
            .partition(|term| term.starts_with('#'));
        let tags: Vec<&str> = tags.iter().map(|tag| tag.trim_start_matches('#')).collect();
        let words: Vec<String> = words.iter().map(|word| word.to_lowercase()).collect();
        if tags.iter().any(|tag| tag.is_empty()) || (tags.is_empty() && words.is_empty()) {
            return Err(EngineError::MalformedQuery(request.query.clone()));
        }

        let counts = self.tag_counts();
        let topics = self.topics.borrow();
        let mut results = SearchResults::new();
        for post in self.posts.borrow().iter().rev() {
            let Some(stored) = topics.iter().find(|stored| stored.topic.id == post.topic_id)
            else {
                continue;
            };
            if !can_see(stored, viewer)
                || !tags
                    .iter()
                    .all(|tag| stored.tag_names.iter().any(|name| name == tag))
            {
                continue;
            }
            let haystack = format!("{} {}", stored.topic.title, post.raw).to_lowercase();
            if !words.iter().all(|word| haystack.contains(word.as_str())) {
                continue;
            }
            let hit = SearchHit {
                post_id: post.id,
                author: post
                    .user
                    .as_ref()
                    .map(|user| user.username.clone())
                    .unwrap_or_default(),
                topic: Self::materialize(stored, &counts),
            };
            results.push(hit, blurb(&post.raw, request.excerpt_length));
        }
        Ok(results)
    }
}

impl ListingEngine for Forum {
    fn list(&self, request: &ListingRequest, viewer: &User) -> Result<Vec<Topic>, EngineError> {
        self.check_failure()?;
        let status = request
            .status
            .as_deref()
            .map(TopicStatus::from_str)
            .transpose()
            .map_err(EngineError::MalformedQuery)?;
        let include: Vec<u64> = request
            .topic_ids
            .iter()
            .filter_map(|id| id.trim().parse().ok())
            .collect();
        let exclude: Vec<u64> = request
            .except_topic_ids
            .iter()
            .filter_map(|id| id.trim().parse().ok())
            .collect();

        let counts = self.tag_counts();
        let mut topics: Vec<Topic> = self
            .topics
            .borrow()
            .iter()
            .filter(|stored| !stored.topic.is_private_message() && can_see(stored, viewer))
            .filter(|stored| {
                request.tags.is_empty()
                    || stored
                        .tag_names
                        .iter()
                        .any(|name| request.tags.contains(name))
            })
            .filter(|stored| status.is_none_or(|status| stored.topic.status == status))
            .filter(|stored| include.is_empty() || include.contains(&stored.topic.id.0))
            .filter(|stored| !exclude.contains(&stored.topic.id.0))
            .filter(|stored| {
                request.category.as_deref().is_none_or(|wanted| {
                    stored.topic.category.as_ref().is_some_and(|category| {
                        category.slug == wanted || category.id.to_string() == wanted
                    })
                })
            })
            .filter(|stored| match request.assigned.as_deref() {
                None => true,
                Some("*") => stored.topic.assigned_to.is_some(),
                Some("nobody") => stored.topic.assigned_to.is_none(),
                Some(user) => stored.topic.assigned_to.as_deref() == Some(user),
            })
            .map(|stored| Self::materialize(stored, &counts))
            .collect();

        match request.order.as_deref() {
            Some("created") => topics.sort_by_key(|topic| Reverse(topic.created_at)),
            Some("title") => topics.sort_by(|a, b| b.title.cmp(&a.title)),
            _ => topics.sort_by_key(|topic| Reverse(topic.bumped_at)),
        }
        if request.ascending {
            topics.reverse();
        }
        topics.truncate(request.limit);
        Ok(topics)
    }
}
