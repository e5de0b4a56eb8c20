//! Class names of the generated result markup.

pub(crate) const FORCE_LIST_CLASS: &str = "force-list";

pub(crate) const TOPIC_CLASS: &str = "topic";
pub(crate) const FIRST_LINE_CLASS: &str = "first-line";
pub(crate) const SECOND_LINE_CLASS: &str = "second-line";
pub(crate) const TOPIC_TITLE_CLASS: &str = "topic-title";
pub(crate) const BLURB_CLASS: &str = "blurb";
pub(crate) const EXCERPT_CLASS: &str = "excerpt";

pub(crate) const TAGS_CLASS: &str = "discourse-tags";
pub(crate) const TAG_CLASS: &str = "discourse-tag";

pub(crate) const BADGE_WRAPPER_CLASS: &str = "badge-category__wrapper";
pub(crate) const BADGE_CLASS: &str = "badge-category";
pub(crate) const BADGE_NAME_CLASS: &str = "badge-category__name";
