use crate::{
    Options,
    constants::SEARCH_TAG,
    grammar::tag_prefix,
    model::{InlineNode, Plain, QueryBlock, QueryMode},
};

/// Split paragraph text into plain runs and inline `[query=...]` tags.
pub(crate) fn parse_inlines(text: &str, options: &Options) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text.get(cursor..).and_then(|rest| rest.find('[')) {
        let at = cursor + offset;
        let recognized = if options.query_blocks {
            text.get(at..).and_then(query_at)
        } else {
            None
        };

        match recognized {
            Some((block, len)) => {
                push_plain(&mut nodes, text.get(plain_start..at));
                nodes.push(InlineNode::QueryMacro(block));
                cursor = at + len;
                plain_start = cursor;
            }
            None => cursor = at + 1,
        }
    }
    push_plain(&mut nodes, text.get(plain_start..));
    nodes
}

fn push_plain(nodes: &mut Vec<InlineNode>, text: Option<&str>) {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        nodes.push(InlineNode::PlainText(Plain::new(text)));
    }
}

fn query_at(input: &str) -> Option<(QueryBlock, usize)> {
    if !input.starts_with(&format!("[{SEARCH_TAG}")) {
        return None;
    }
    let (tag, len) = tag_prefix(input)?;
    QueryBlock::from_tag(QueryMode::Search, &tag).map(|block| (block, len))
}
