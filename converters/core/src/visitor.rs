//! Visitor pattern for traversing a parsed post.
//!
//! Converters implement [`Visitor`] to define how each node becomes output.
//! The provided `visit_document` and `visit_block` methods walk the tree in
//! source order; `visit_query_block` is called for the block form and the
//! inline form alike, so a converter emits one kind of container for both.

use topic_query_parser::{Block, Document, InlineNode, Paragraph, QueryBlock};

/// Defines how each node of a parsed post is converted.
pub trait Visitor {
    /// The error type that can be returned during visiting
    type Error;

    /// Visit the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if any visitor method fails during traversal.
    fn visit_document(&mut self, doc: &Document) -> Result<(), Self::Error> {
        for block in &doc.blocks {
            self.visit_block(block)?;
        }
        Ok(())
    }

    /// Visit a generic block (delegates to specific block visitors)
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of this block fails.
    fn visit_block(&mut self, block: &Block) -> Result<(), Self::Error> {
        match block {
            Block::Paragraph(para) => self.visit_paragraph(para),
            Block::QueryBlock(query) => self.visit_query_block(query),
            // Block is marked non-exhaustive
            _ => {
                tracing::warn!(?block, "Unexpected block");
                Ok(())
            }
        }
    }

    /// Visit a paragraph.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of the paragraph fails.
    fn visit_paragraph(&mut self, para: &Paragraph) -> Result<(), Self::Error>;

    /// Visit a query block placeholder, block or inline form.
    ///
    /// Its nested blocks are the fallback content shown until the block is rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of the placeholder fails.
    fn visit_query_block(&mut self, query: &QueryBlock) -> Result<(), Self::Error>;

    /// Visit a sequence of inline nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of any node fails.
    fn visit_inline_nodes(&mut self, nodes: &[InlineNode]) -> Result<(), Self::Error> {
        for node in nodes {
            self.visit_inline_node(node)?;
        }
        Ok(())
    }

    /// Visit a single inline node.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of the node fails.
    fn visit_inline_node(&mut self, node: &InlineNode) -> Result<(), Self::Error> {
        match node {
            InlineNode::PlainText(plain) => self.visit_text(&plain.content),
            InlineNode::QueryMacro(query) => self.visit_query_block(query),
            _ => {
                tracing::warn!(?node, "Unexpected inline node");
                Ok(())
            }
        }
    }

    /// Visit plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be written.
    fn visit_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use topic_query_parser::{Options, parse};

    #[derive(Default)]
    struct Outline(Vec<String>);

    impl Visitor for Outline {
        type Error = std::convert::Infallible;

        fn visit_paragraph(&mut self, para: &Paragraph) -> Result<(), Self::Error> {
            self.0.push("paragraph".into());
            self.visit_inline_nodes(&para.content)
        }

        fn visit_query_block(&mut self, query: &QueryBlock) -> Result<(), Self::Error> {
            self.0.push(format!("query:{}", query.mode.tag_name()));
            for block in &query.blocks {
                self.visit_block(block)?;
            }
            Ok(())
        }

        fn visit_text(&mut self, text: &str) -> Result<(), Self::Error> {
            self.0.push(format!("text:{text}"));
            Ok(())
        }
    }

    #[test]
    fn walks_in_source_order() {
        let doc = parse(
            "intro [query=\"#x\"] end\n\n[topics]\nfallback\n[/topics]",
            &Options::default(),
        );
        let mut outline = Outline::default();
        outline.visit_document(&doc).unwrap();
        assert_eq!(
            outline.0,
            [
                "paragraph",
                "text:intro ",
                "query:query",
                "text: end",
                "query:topics",
                "paragraph",
                "text:fallback",
            ]
        );
    }
}
