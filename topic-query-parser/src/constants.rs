//! Fixed names shared by the parser and the converters.

/// CSS class carried by every query block container.
pub const MARKER_CLASS: &str = "discourse-topic-query";

/// Element name of the query block container.
pub const CONTAINER_ELEMENT: &str = "div";

/// Block tag for listing mode: `[topics ...]` ... `[/topics]`.
pub const LISTING_TAG: &str = "topics";

/// Inline tag for search mode: `[query="..." ...]`.
pub const SEARCH_TAG: &str = "query";

/// Deepest `[topics]` nesting recognized as blocks. Fences below it are text.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Attributes copied from a listing block, in emission order.
pub const LISTING_ATTRIBUTES: &[&str] = &[
    "tags",
    "status",
    "order",
    "topicIds",
    "exceptTopicIds",
    "ascending",
    "assigned",
    "category",
];

/// Attributes copied from a search tag, in emission order.
///
/// `query` is required; a tag without it is not recognized.
pub const SEARCH_ATTRIBUTES: &[&str] = &["query", "hideTags", "hideCategory", "excerptLength"];

/// Prefix of the attributes a container carries.
pub const DATA_PREFIX: &str = "data-";

/// Build the `data-*` attribute name for an allow-listed attribute.
#[must_use]
pub fn data_attribute(name: &str) -> String {
    format!("{DATA_PREFIX}{}", name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_attribute_lowercases() {
        assert_eq!(data_attribute("exceptTopicIds"), "data-excepttopicids");
        assert_eq!(data_attribute("tags"), "data-tags");
    }
}
