//! Typed requests built from a container's `data-*` attributes.

use crate::Settings;

/// A validated query, one variant per [`topic_query_parser::QueryMode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryRequest {
    /// Free-text search.
    Search(SearchRequest),
    /// Structured topic listing.
    Listing(ListingRequest),
}

impl QueryRequest {
    /// Build a request from allow-listed attributes.
    ///
    /// `lookup` is called with lowercased attribute names without the `data-`
    /// prefix (`"tags"`, `"excepttopicids"`, `"query"`...). A `query`
    /// attribute selects search mode. Returns `None` when the attributes do
    /// not make a well-formed request; the caller then skips the block.
    pub fn from_attributes<'a, F>(lookup: F, settings: &Settings) -> Option<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        match lookup("query") {
            Some(_) => SearchRequest::from_attributes(lookup, settings).map(Self::Search),
            None => Some(Self::Listing(ListingRequest::from_attributes(
                lookup, settings,
            ))),
        }
    }
}

/// Options for a free-text search block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// The search terms, passed to the engine untouched.
    pub query: String,
    /// Omit tag lists from results.
    pub hide_tags: bool,
    /// Omit category badges from results.
    pub hide_category: bool,
    /// Excerpt length in characters, capped at the configured ceiling.
    ///
    /// Only a positive length shows excerpts. `0` also asks for the
    /// `force-list` presentation; a negative length asks for neither.
    pub excerpt_length: i64,
}

impl SearchRequest {
    fn from_attributes<'a, F>(lookup: F, settings: &Settings) -> Option<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let query = lookup("query").map(str::trim).filter(|q| !q.is_empty())?;
        let excerpt_length = lookup("excerptlength")
            .map_or_else(|| i64::from(settings.excerpt_length()), leading_integer)
            .min(i64::from(settings.excerpt_ceiling()));

        Some(Self {
            query: query.to_string(),
            hide_tags: lookup("hidetags") == Some("true"),
            hide_category: lookup("hidecategory") == Some("true"),
            excerpt_length,
        })
    }
}

/// Options for a topic listing block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingRequest {
    /// Topics carrying any of these tags.
    pub tags: Vec<String>,
    /// Topic status filter (`open`, `closed`, `archived`).
    pub status: Option<String>,
    /// Ordering key (`created`, `activity`, `title`...).
    pub order: Option<String>,
    /// Only these topic ids.
    pub topic_ids: Vec<String>,
    /// Never these topic ids.
    pub except_topic_ids: Vec<String>,
    /// Reverse the default descending order.
    pub ascending: bool,
    /// Only topics assigned to this user.
    pub assigned: Option<String>,
    /// Category slug or id.
    pub category: Option<String>,
    /// Maximum number of topics.
    pub limit: usize,
}

impl ListingRequest {
    fn from_attributes<'a, F>(lookup: F, settings: &Settings) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let owned = |name: &str| lookup(name).map(str::to_string);
        Self {
            tags: split_list(lookup("tags")),
            status: owned("status"),
            order: owned("order"),
            topic_ids: split_list(lookup("topicids")),
            except_topic_ids: split_list(lookup("excepttopicids")),
            ascending: lookup("ascending") == Some("true"),
            assigned: owned("assigned"),
            category: owned("category"),
            limit: settings.listing_limit(),
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Integer prefix of `value`, `0` when there is none: `"120px"` is 120, `"abc"` is 0.
///
/// Saturates at the `i64` bounds instead of overflowing.
fn leading_integer(value: &str) -> i64 {
    let value = value.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i64, |n, digit| {
            n.saturating_mul(10).saturating_add(sign * i64::from(digit))
        })
}
