//! Parser for embedded topic query blocks.
//!
//! Two forms are recognized in post source:
//!
//! - the listing block, `[topics tags=a,b order=created]` ... `[/topics]`
//! - the inline search tag, `[query="#support" excerptLength=0]`
//!
//! Everything else is kept as paragraph text. Recognized tags become
//! [`QueryBlock`] placeholders whose attributes have been reduced to the
//! allow-list of their [`QueryMode`]. Attribute values are not validated here;
//! that happens when the rendered post is post-processed.
//!
//! # Example
//!
//! ```
//! use topic_query_parser::{Block, Options, parse};
//!
//! let doc = parse("[topics tags=foo,bar order=created]\n[/topics]", &Options::default());
//! let Some(Block::QueryBlock(block)) = doc.blocks.first() else {
//!     unreachable!()
//! };
//! assert_eq!(block.attributes.get("tags"), Some("foo,bar"));
//! ```

use tracing::instrument;

mod blocks;
pub mod constants;
mod error;
mod grammar;
mod inlines;
mod model;
mod options;
mod sanitizer;

pub use error::Error;
pub use grammar::parse_tag;
pub use model::{
    AttributeName, Block, Document, InlineNode, Paragraph, Plain, QueryAttributes, QueryBlock,
    QueryMode, Tag,
};
pub use options::{Options, OptionsBuilder};
pub use sanitizer::{AllowList, register_query_blocks};

/// Parse post source into a [`Document`].
///
/// Parsing never fails: anything that is not a well-formed query block is
/// kept as text.
#[must_use]
#[instrument(skip(input))]
pub fn parse(input: &str, options: &Options) -> Document {
    let normalized = input.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();
    let document = Document {
        blocks: blocks::parse_blocks(&lines, options),
    };
    tracing::trace!(
        blocks = document.blocks.len(),
        queries = document.query_block_count(),
        "parsed document"
    );
    document
}

#[cfg(test)]
mod proptests;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    #[tracing_test::traced_test]
    fn test_document_serializes() {
        let doc = parse("[topics tags=a]\n[/topics]", &Options::default());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "blocks": [{
                    "type": "query_block",
                    "mode": "listing",
                    "attributes": [["tags", "a"]],
                    "blocks": []
                }]
            })
        );
        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_query_block_count_includes_inline_and_nested() {
        let doc = parse(
            "[topics]\n[topics]\n[/topics]\n[/topics]\n\ntext [query=foo] text",
            &Options::default(),
        );
        assert_eq!(doc.query_block_count(), 3);
    }

    #[test]
    fn test_crlf_input() {
        let doc = parse("[topics]\r\n[/topics]\r\n", &Options::default());
        assert_eq!(doc.query_block_count(), 1);
    }
}
