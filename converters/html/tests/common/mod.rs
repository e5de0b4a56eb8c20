use std::{cell::RefCell, collections::BTreeMap};

use topic_query_converters_core::{PostId, RebakeError, Rebaker, Settings};
use topic_query_converters_dev::{
    custom_fields::InMemoryCustomFields, forum::Forum, groups::InMemoryGroups,
};
use topic_query_converters_html::{Error, Processor, Services};

/// A forum with a baking pipeline: every service in memory, cooked output kept per post.
pub struct Site {
    pub settings: Settings,
    pub forum: Forum,
    pub fields: InMemoryCustomFields,
    pub groups: InMemoryGroups,
    cooked: RefCell<BTreeMap<PostId, String>>,
}

impl Site {
    pub fn new(settings: Settings, groups: InMemoryGroups) -> Self {
        Self {
            settings,
            forum: Forum::new(),
            fields: InMemoryCustomFields::new(),
            groups,
            cooked: RefCell::default(),
        }
    }

    pub fn enabled() -> Self {
        Self::new(
            Settings::builder().enabled(true).build(),
            InMemoryGroups::new(),
        )
    }

    pub fn processor(&self) -> Processor<'_> {
        Processor::new(
            &self.settings,
            Services {
                search: &self.forum,
                listing: &self.forum,
                directory: &self.groups,
                store: &self.fields,
            },
        )
    }

    pub fn cooked(&self, post: PostId) -> String {
        self.cooked.borrow().get(&post).cloned().unwrap_or_default()
    }
}

impl Rebaker for Site {
    fn post_exists(&self, post: PostId) -> Result<bool, RebakeError> {
        Ok(self.forum.post(post).is_some())
    }

    fn rebake(&self, id: PostId) -> Result<(), RebakeError> {
        let post = self
            .forum
            .post(id)
            .ok_or_else(|| RebakeError::Render(id, "no such post".to_string()))?;
        let cooked = self.processor().cook(&post).map_err(|error| match error {
            Error::Store(store) => RebakeError::Store(store),
            other => RebakeError::Render(id, other.to_string()),
        })?;
        self.cooked.borrow_mut().insert(id, cooked.html);
        Ok(())
    }
}
