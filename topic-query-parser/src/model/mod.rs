//! The types produced by the parser.

use serde::{Deserialize, Serialize};

mod query;
mod tag;

pub use query::{AttributeName, QueryAttributes, QueryBlock, QueryMode};
pub use tag::Tag;

/// A parsed post: an ordered list of top-level blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Count the query blocks anywhere in the document, inline forms included.
    #[must_use]
    pub fn query_block_count(&self) -> usize {
        self.blocks.iter().map(Block::query_block_count).sum()
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    QueryBlock(QueryBlock),
}

impl Block {
    fn query_block_count(&self) -> usize {
        match self {
            Block::Paragraph(paragraph) => paragraph
                .content
                .iter()
                .filter(|node| matches!(node, InlineNode::QueryMacro(_)))
                .count(),
            Block::QueryBlock(block) => {
                1 + block
                    .blocks
                    .iter()
                    .map(Block::query_block_count)
                    .sum::<usize>()
            }
        }
    }
}

/// A run of non-blank lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Vec<InlineNode>,
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineNode {
    PlainText(Plain),
    /// The inline `[query=...]` form.
    QueryMacro(QueryBlock),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plain {
    pub content: String,
}

impl Plain {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
