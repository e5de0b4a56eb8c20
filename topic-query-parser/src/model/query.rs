use serde::{Deserialize, Serialize};

use crate::{
    constants::{LISTING_ATTRIBUTES, LISTING_TAG, SEARCH_ATTRIBUTES, SEARCH_TAG, data_attribute},
    model::{Block, Tag},
};

/// Lowercased name of an allow-listed attribute.
pub type AttributeName = String;

/// Which query a block asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Structured topic listing: `[topics tags=a,b order=created]`.
    Listing,
    /// Free-text search: `[query="#tag" excerptLength=0]`.
    Search,
}

impl QueryMode {
    /// The tag name that opens this form.
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Listing => LISTING_TAG,
            Self::Search => SEARCH_TAG,
        }
    }

    /// Attribute names this form accepts, in emission order.
    #[must_use]
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Self::Listing => LISTING_ATTRIBUTES,
            Self::Search => SEARCH_ATTRIBUTES,
        }
    }
}

/// Allow-listed attributes of a query block, keyed by lowercased name.
///
/// Order follows the mode's vocabulary, not the source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryAttributes(Vec<(AttributeName, String)>);

impl QueryAttributes {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The attributes as they appear on the container element.
    pub fn data_attributes(&self) -> impl Iterator<Item = (String, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (data_attribute(name), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A recognized query block, ready to be emitted as a placeholder container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlock {
    pub mode: QueryMode,
    pub attributes: QueryAttributes,
    /// Content written between `[topics]` and `[/topics]`. Empty for the inline form.
    pub blocks: Vec<Block>,
}

impl QueryBlock {
    /// Build a block from a parsed tag, keeping only allow-listed attributes.
    ///
    /// Returns `None` when the tag does not open this mode, or when a search
    /// tag has no query.
    #[must_use]
    pub fn from_tag(mode: QueryMode, tag: &Tag) -> Option<Self> {
        if tag.name != mode.tag_name() {
            return None;
        }

        if mode == QueryMode::Search && lookup(mode, tag, "query").is_none_or(str::is_empty) {
            tracing::debug!(?tag, "query tag without a query, leaving as text");
            return None;
        }

        let attributes = mode
            .vocabulary()
            .iter()
            .filter_map(|name| {
                lookup(mode, tag, name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (name.to_lowercase(), value.to_string()))
            })
            .collect();

        for (key, _) in &tag.attributes {
            if !mode.vocabulary().contains(&key.as_str()) {
                tracing::trace!(attribute = %key, "dropping attribute outside the allow-list");
            }
        }

        Some(Self {
            mode,
            attributes: QueryAttributes(attributes),
            blocks: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }
}

/// The search tag's default value stands in for its `query` attribute.
fn lookup<'t>(mode: QueryMode, tag: &'t Tag, name: &str) -> Option<&'t str> {
    match (mode, name) {
        (QueryMode::Search, "query") => tag.default.as_deref().or_else(|| tag.get("query")),
        _ => tag.get(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(name: &str, default: Option<&str>, attributes: &[(&str, &str)]) -> Tag {
        Tag {
            name: name.to_string(),
            default: default.map(str::to_string),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn listing_attributes_follow_vocabulary_order() {
        let tag = tag(
            "topics",
            None,
            &[("order", "created"), ("bogus", "1"), ("tags", "a,b")],
        );
        let block = QueryBlock::from_tag(QueryMode::Listing, &tag);
        let attributes: Vec<_> = block
            .as_ref()
            .map(|b| b.attributes.iter().collect())
            .unwrap_or_default();
        assert_eq!(attributes, vec![("tags", "a,b"), ("order", "created")]);
    }

    #[test]
    fn camel_case_names_are_lowercased() {
        let tag = tag("topics", None, &[("exceptTopicIds", "12")]);
        let block = QueryBlock::from_tag(QueryMode::Listing, &tag);
        assert_eq!(
            block.and_then(|b| b.attributes.get("excepttopicids").map(str::to_string)),
            Some("12".to_string())
        );
    }

    #[test]
    fn search_requires_a_query() {
        assert!(QueryBlock::from_tag(QueryMode::Search, &tag("query", None, &[])).is_none());
        assert!(QueryBlock::from_tag(QueryMode::Search, &tag("query", Some(""), &[])).is_none());
        let block = QueryBlock::from_tag(QueryMode::Search, &tag("query", Some("#foo"), &[]));
        assert_eq!(
            block.and_then(|b| b.attributes.get("query").map(str::to_string)),
            Some("#foo".to_string())
        );
    }

    #[test]
    fn wrong_tag_is_not_recognized() {
        assert!(QueryBlock::from_tag(QueryMode::Listing, &tag("query", Some("x"), &[])).is_none());
    }
}
