//! Allow-list sanitization of cooked markup.
//!
//! Elements named by the allow-list keep only the classes and attributes it
//! lists; elements it does not mention are left alone.

use topic_query_parser::{AllowList, register_query_blocks};

use crate::dom::{Element, Html};

/// Strips classes and attributes the allow-list does not cover.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    allow_list: AllowList,
}

impl Default for Sanitizer {
    /// A sanitizer that keeps query block containers intact.
    fn default() -> Self {
        let mut allow_list = AllowList::new();
        register_query_blocks(&mut allow_list);
        Self { allow_list }
    }
}

impl Sanitizer {
    #[must_use]
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn clean(&self, html: &mut Html) {
        html.walk_mut(&mut |element| self.clean_element(element));
    }

    fn clean_element(&self, element: &mut Element) {
        let tag = element.name().to_string();
        if !self.allow_list.covers(&tag) {
            return;
        }

        let classes: Vec<String> = element
            .classes()
            .filter(|class| self.allow_list.allows_class(&tag, class))
            .map(str::to_string)
            .collect();
        if classes.is_empty() {
            element.retain_attributes(|name, _| name != "class");
        } else {
            element.set_attr("class", classes.join(" "));
        }

        element.retain_attributes(|name, _| {
            name == "class" || self.allow_list.allows_attribute(&tag, name)
        });
        tracing::trace!(%tag, "sanitized element");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_registered_container_entries() {
        let mut html = Html::new(vec![
            Element::new("div")
                .with_class("discourse-topic-query")
                .with_class("evil")
                .with_attr("data-tags", "a,b")
                .with_attr("onclick", "x()")
                .into(),
            Element::new("p").with_attr("data-any", "kept").into(),
        ]);
        Sanitizer::default().clean(&mut html);
        assert_eq!(
            html.to_html(),
            r#"<div class="discourse-topic-query" data-tags="a,b"></div><p data-any="kept"></p>"#
        );
    }

    #[test]
    fn unregistered_container_loses_marker() {
        let mut allow_list = AllowList::new();
        allow_list.allow_attribute("div", "data-tags");
        let mut html = Html::new(vec![
            Element::new("div")
                .with_class("discourse-topic-query")
                .with_attr("data-tags", "a")
                .into(),
        ]);
        Sanitizer::new(allow_list).clean(&mut html);
        assert_eq!(html.to_html(), r#"<div data-tags="a"></div>"#);
        assert!(!html.contains_class("discourse-topic-query"));
    }
}
