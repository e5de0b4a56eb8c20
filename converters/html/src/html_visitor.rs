//! Conversion of a parsed post into an [`Html`] tree.

use std::convert::Infallible;

use topic_query_converters_core::visitor::Visitor;
use topic_query_parser::{
    Document, Paragraph, QueryBlock,
    constants::{CONTAINER_ELEMENT, MARKER_CLASS},
};

use crate::dom::{Element, Html, Node};

/// Builds the tree a post cooks to.
///
/// Paragraphs become `<p>` elements. A query block, in either form, becomes
/// a `<div class="discourse-topic-query">` container carrying its `data-*` attributes,
/// with any nested content as fallback children. An inline query splits its
/// paragraph: text before and after it lands in separate `<p>` elements.
#[derive(Debug, Default)]
pub(crate) struct HtmlVisitor {
    current: Vec<Node>,
    parents: Vec<Vec<Node>>,
    run: Option<Vec<Node>>,
}

impl HtmlVisitor {
    pub(crate) fn into_html(self) -> Html {
        Html::new(self.current)
    }

    fn flush_run(&mut self) {
        if let Some(run) = self.run.take().filter(|run| !run.is_empty()) {
            self.current.push(Element::new("p").with_children(run).into());
        }
    }
}

impl Visitor for HtmlVisitor {
    type Error = Infallible;

    fn visit_paragraph(&mut self, para: &Paragraph) -> Result<(), Self::Error> {
        self.run = Some(Vec::new());
        self.visit_inline_nodes(&para.content)?;
        self.flush_run();
        Ok(())
    }

    fn visit_query_block(&mut self, query: &QueryBlock) -> Result<(), Self::Error> {
        let inside_paragraph = self.run.is_some();
        self.flush_run();

        self.parents.push(std::mem::take(&mut self.current));
        for block in &query.blocks {
            self.visit_block(block)?;
        }
        let fallback = std::mem::replace(&mut self.current, self.parents.pop().unwrap_or_default());

        let mut container = Element::new(CONTAINER_ELEMENT).with_class(MARKER_CLASS);
        for (name, value) in query.attributes.data_attributes() {
            container.set_attr(name, value);
        }
        self.current.push(container.with_children(fallback).into());

        if inside_paragraph {
            self.run = Some(Vec::new());
        }
        Ok(())
    }

    fn visit_text(&mut self, text: &str) -> Result<(), Self::Error> {
        match self.run.as_mut() {
            Some(run) => run.push(Node::text(text)),
            None => self.current.push(Node::text(text)),
        }
        Ok(())
    }
}

/// Convert a parsed post into its HTML tree.
#[must_use]
pub fn convert(doc: &Document) -> Html {
    let mut visitor = HtmlVisitor::default();
    let Ok(()) = visitor.visit_document(doc);
    visitor.into_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use topic_query_parser::{Options, parse};

    fn cook(source: &str) -> String {
        convert(&parse(source, &Options::default())).to_html()
    }

    #[test]
    fn paragraphs_and_blocks() {
        assert_eq!(
            cook("hello <world>\n\n[topics tags=foo,bar order=created]\n[/topics]"),
            r#"<p>hello &lt;world&gt;</p><div class="discourse-topic-query" data-tags="foo,bar" data-order="created"></div>"#
        );
    }

    #[test]
    fn inline_query_splits_paragraph() {
        assert_eq!(
            cook(r##"see [query="#faq" excerptLength=0] below"##),
            r##"<p>see </p><div class="discourse-topic-query" data-query="#faq" data-excerptlength="0"></div><p> below</p>"##
        );
    }

    #[test]
    fn nested_content_is_fallback() {
        assert_eq!(
            cook("[topics status=open]\nnothing yet\n[/topics]"),
            r#"<div class="discourse-topic-query" data-status="open"><p>nothing yet</p></div>"#
        );
    }
}
