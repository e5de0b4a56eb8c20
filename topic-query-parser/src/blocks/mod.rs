use std::ops::Range;

use tracing::instrument;

use crate::{
    Options,
    constants::{LISTING_TAG, MAX_NESTING_DEPTH},
    grammar::{closing_tag, tag_prefix},
    inlines::parse_inlines,
    model::{Block, Paragraph, QueryBlock, QueryMode, Tag},
};

/// Split `lines` into paragraphs and `[topics]` blocks.
#[instrument(level = "trace", skip(lines))]
pub(crate) fn parse_blocks(lines: &[&str], options: &Options) -> Vec<Block> {
    let kinds = if options.query_blocks {
        classify(lines)
    } else {
        lines.iter().map(|_| LineKind::Text).collect()
    };
    parse_range(lines, &kinds, 0..lines.len(), 0, options)
}

fn parse_range(
    lines: &[&str],
    kinds: &[LineKind],
    range: Range<usize>,
    depth: usize,
    options: &Options,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut index = range.start;

    while index < range.end {
        let (Some(line), Some(kind)) = (lines.get(index), kinds.get(index)) else {
            break;
        };
        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks, options);
            index += 1;
            continue;
        }

        let recognized = if depth < MAX_NESTING_DEPTH {
            match kind {
                LineKind::SelfClosed(tag) => {
                    QueryBlock::from_tag(QueryMode::Listing, tag).map(|block| (block, index + 1))
                }
                LineKind::Open { tag, close } if *close < range.end => {
                    QueryBlock::from_tag(QueryMode::Listing, tag).map(|block| {
                        let inner =
                            parse_range(lines, kinds, index + 1..*close, depth + 1, options);
                        (block.with_blocks(inner), close + 1)
                    })
                }
                LineKind::Open { .. } | LineKind::Text => None,
            }
        } else {
            None
        };
        if let Some((block, next)) = recognized {
            flush_paragraph(&mut paragraph, &mut blocks, options);
            blocks.push(Block::QueryBlock(block));
            index = next;
            continue;
        }

        paragraph.push(*line);
        index += 1;
    }
    flush_paragraph(&mut paragraph, &mut blocks, options);
    blocks
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>, options: &Options) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join("\n");
    paragraph.clear();
    blocks.push(Block::Paragraph(Paragraph {
        content: parse_inlines(&text, options),
    }));
}

/// How a line relates to a `[topics]` block.
enum Fence {
    /// `[topics ...]` alone on the line.
    Open(Tag),
    /// `[topics ...][/topics]` on a single line.
    SelfClosed(Tag),
    /// `[/topics]` alone on the line.
    Close,
}

fn fence(line: &str) -> Option<Fence> {
    let line = line.trim();
    if closing_tag(line) == Some(LISTING_TAG) {
        return Some(Fence::Close);
    }
    let (tag, len) = tag_prefix(line)?;
    if tag.name != LISTING_TAG {
        return None;
    }
    match line.get(len..).map(str::trim) {
        Some("") => Some(Fence::Open(tag)),
        Some(rest) if closing_tag(rest) == Some(LISTING_TAG) => Some(Fence::SelfClosed(tag)),
        _ => None,
    }
}

/// A line after fences have been paired.
#[derive(Debug)]
enum LineKind {
    Text,
    SelfClosed(Tag),
    /// Opening fence whose matching `[/topics]` is on line `close`.
    Open { tag: Tag, close: usize },
}

/// Classify every line once and pair opening fences with their closes.
///
/// Unmatched opening and closing fences are text.
fn classify(lines: &[&str]) -> Vec<LineKind> {
    let mut kinds = Vec::with_capacity(lines.len());
    let mut open: Vec<(usize, Tag)> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        match fence(line) {
            Some(Fence::Open(tag)) => open.push((index, tag)),
            Some(Fence::Close) => {
                if let Some((start, tag)) = open.pop() {
                    if let Some(kind) = kinds.get_mut(start) {
                        *kind = LineKind::Open { tag, close: index };
                    }
                }
            }
            Some(Fence::SelfClosed(tag)) => {
                kinds.push(LineKind::SelfClosed(tag));
                continue;
            }
            None => {}
        }
        kinds.push(LineKind::Text);
    }

    for (_, tag) in &open {
        tracing::debug!(?tag, "unterminated block, leaving as text");
    }
    kinds
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::model::{InlineNode, Plain};
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(Paragraph {
            content: vec![InlineNode::PlainText(Plain::new(text))],
        })
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        let blocks = parse_blocks(&["one", "two", "", "three"], &Options::default());
        assert_eq!(blocks, vec![paragraph("one\ntwo"), paragraph("three")]);
    }

    #[test]
    fn block_keeps_inner_content() {
        let blocks = parse_blocks(
            &["[topics tags=a]", "fallback", "[/topics]", "after"],
            &Options::default(),
        );
        let [Block::QueryBlock(block), after] = blocks.as_slice() else {
            panic!("unexpected blocks: {blocks:?}");
        };
        assert_eq!(block.attributes.get("tags"), Some("a"));
        assert_eq!(block.blocks, vec![paragraph("fallback")]);
        assert_eq!(after, &paragraph("after"));
    }

    #[test]
    fn nested_blocks_match_by_depth() {
        let blocks = parse_blocks(
            &["[topics]", "[topics order=created]", "[/topics]", "[/topics]"],
            &Options::default(),
        );
        let [Block::QueryBlock(outer)] = blocks.as_slice() else {
            panic!("unexpected blocks: {blocks:?}");
        };
        let [Block::QueryBlock(inner)] = outer.blocks.as_slice() else {
            panic!("unexpected inner blocks: {:?}", outer.blocks);
        };
        assert_eq!(inner.attributes.get("order"), Some("created"));
    }

    #[test]
    fn unterminated_block_is_text() {
        let blocks = parse_blocks(&["[topics tags=a]", "text"], &Options::default());
        assert_eq!(blocks, vec![paragraph("[topics tags=a]\ntext")]);
    }

    #[test]
    fn single_line_block() {
        let blocks = parse_blocks(&["[topics order=created][/topics]"], &Options::default());
        assert!(matches!(blocks.as_slice(), [Block::QueryBlock(b)] if b.blocks.is_empty()));
    }

    fn nesting(blocks: &[Block]) -> (usize, &[Block]) {
        let mut depth = 0;
        let mut current = blocks;
        while let [Block::QueryBlock(block)] = current {
            depth += 1;
            current = &block.blocks;
        }
        (depth, current)
    }

    #[test]
    fn nesting_is_capped() {
        let source: Vec<&str> = std::iter::repeat_n("[topics]", 800)
            .chain(std::iter::repeat_n("[/topics]", 800))
            .collect();
        let blocks = parse_blocks(&source, &Options::default());
        let (depth, innermost) = nesting(&blocks);
        assert_eq!(depth, MAX_NESTING_DEPTH);
        let [Block::Paragraph(leftover)] = innermost else {
            panic!("unexpected innermost blocks: {innermost:?}");
        };
        let [InlineNode::PlainText(text)] = leftover.content.as_slice() else {
            panic!("unexpected content: {:?}", leftover.content);
        };
        assert_eq!(text.content.lines().count(), 2 * (800 - MAX_NESTING_DEPTH));
    }

    #[test]
    fn unmatched_fences_are_text() {
        let mut source = vec!["[/topics]"];
        source.extend(std::iter::repeat_n("[topics]", 5000));
        let blocks = parse_blocks(&source, &Options::default());
        let [Block::Paragraph(text)] = blocks.as_slice() else {
            panic!("unexpected blocks: {blocks:?}");
        };
        assert_eq!(text.content.len(), 1);
    }

    #[test]
    fn stray_close_does_not_end_a_later_block() {
        let blocks = parse_blocks(
            &["[/topics]", "[topics]", "[topics]", "inner", "[/topics]"],
            &Options::default(),
        );
        let [before @ Block::Paragraph(_), Block::QueryBlock(block)] = blocks.as_slice() else {
            panic!("unexpected blocks: {blocks:?}");
        };
        assert_eq!(before, &paragraph("[/topics]\n[topics]"));
        assert_eq!(block.blocks, vec![paragraph("inner")]);
    }

    #[test]
    fn disabled_blocks_are_text() {
        let options = Options::builder().without_query_blocks().build();
        let blocks = parse_blocks(&["[topics]", "[/topics]"], &options);
        assert_eq!(blocks, vec![paragraph("[topics]\n[/topics]")]);
    }
}
