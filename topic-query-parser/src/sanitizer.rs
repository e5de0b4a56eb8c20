//! Allow-list entries handed to the HTML sanitizer.
//!
//! Anything the sanitizer does not find here is stripped from the rendered
//! post, so every class and `data-*` attribute a query block container needs
//! is registered up front with [`register_query_blocks`].

use rustc_hash::FxHashSet;

use crate::{
    Error,
    constants::{CONTAINER_ELEMENT, LISTING_ATTRIBUTES, MARKER_CLASS, SEARCH_ATTRIBUTES, data_attribute},
};

/// Set of `tag.class` and `tag[attribute]` selectors.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    classes: FxHashSet<(String, String)>,
    attributes: FxHashSet<(String, String)>,
}

impl AllowList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selector of the form `tag.class` or `tag[attribute]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for anything else.
    pub fn allow(&mut self, selector: &str) -> Result<(), Error> {
        if let Some((tag, rest)) = selector.split_once('[') {
            let attribute = rest
                .strip_suffix(']')
                .filter(|a| !a.is_empty() && !tag.is_empty())
                .ok_or_else(|| Error::InvalidSelector(selector.to_string()))?;
            self.allow_attribute(tag, attribute);
            return Ok(());
        }
        match selector.split_once('.') {
            Some((tag, class)) if !tag.is_empty() && !class.is_empty() => {
                self.allow_class(tag, class);
                Ok(())
            }
            _ => Err(Error::InvalidSelector(selector.to_string())),
        }
    }

    pub fn allow_class(&mut self, tag: &str, class: &str) {
        self.classes.insert((tag.to_string(), class.to_string()));
    }

    pub fn allow_attribute(&mut self, tag: &str, attribute: &str) {
        self.attributes
            .insert((tag.to_string(), attribute.to_string()));
    }

    #[must_use]
    pub fn allows_class(&self, tag: &str, class: &str) -> bool {
        self.classes
            .contains(&(tag.to_string(), class.to_string()))
    }

    #[must_use]
    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.attributes
            .contains(&(tag.to_string(), attribute.to_string()))
    }

    /// Whether any entry mentions `tag`; the sanitizer leaves other tags alone.
    #[must_use]
    pub fn covers(&self, tag: &str) -> bool {
        self.classes.iter().any(|(t, _)| t == tag) || self.attributes.iter().any(|(t, _)| t == tag)
    }
}

/// Register the container class and every `data-*` attribute of both vocabularies.
pub fn register_query_blocks(allow_list: &mut AllowList) {
    allow_list.allow_class(CONTAINER_ELEMENT, MARKER_CLASS);
    for name in LISTING_ATTRIBUTES.iter().chain(SEARCH_ATTRIBUTES) {
        allow_list.allow_attribute(CONTAINER_ELEMENT, &data_attribute(name));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn registers_container_entries() {
        let mut allow_list = AllowList::new();
        register_query_blocks(&mut allow_list);
        assert!(allow_list.allows_class("div", "discourse-topic-query"));
        assert!(allow_list.allows_attribute("div", "data-tags"));
        assert!(allow_list.allows_attribute("div", "data-excepttopicids"));
        assert!(allow_list.allows_attribute("div", "data-excerptlength"));
        assert!(!allow_list.allows_attribute("div", "data-exceptTopicIds"));
        assert!(!allow_list.allows_attribute("span", "data-tags"));
        assert!(allow_list.covers("div"));
        assert!(!allow_list.covers("p"));
    }

    #[rstest::rstest]
    #[case("div.discourse-topic-query")]
    #[case("div[data-tags]")]
    fn accepts_selectors(#[case] selector: &str) {
        let mut allow_list = AllowList::new();
        allow_list.allow(selector).unwrap();
        assert!(allow_list.covers("div"));
    }

    #[rstest::rstest]
    #[case("div")]
    #[case(".discourse-topic-query")]
    #[case("div[]")]
    #[case("div[data-tags")]
    fn rejects_selectors(#[case] selector: &str) {
        assert!(matches!(
            AllowList::new().allow(selector),
            Err(Error::InvalidSelector(_))
        ));
    }
}
