//! Parser invariants checked against generated input.

use proptest::prelude::*;

use crate::{
    Block, InlineNode, Options, QueryBlock,
    constants::{MAX_NESTING_DEPTH, data_attribute},
    parse,
};

fn attribute_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
}

fn bare_value() -> impl Strategy<Value = String> {
    "[a-z0-9,#:]{1,10}"
}

fn collect_queries(blocks: &[Block], out: &mut Vec<QueryBlock>) {
    for block in blocks {
        match block {
            Block::QueryBlock(query) => {
                out.push(query.clone());
                collect_queries(&query.blocks, out);
            }
            Block::Paragraph(paragraph) => {
                for node in &paragraph.content {
                    if let InlineNode::QueryMacro(query) = node {
                        out.push(query.clone());
                    }
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// The parser must never panic, whatever the input.
    #[test]
    fn parser_never_panics(input in "(\\PC|\\[|\\]|=|\"|\n){0,200}") {
        let _ = parse(&input, &Options::default());
    }

    /// Only allow-listed names ever reach a container.
    #[test]
    fn unknown_attributes_never_survive(
        pairs in proptest::collection::vec((attribute_name(), bare_value()), 0..6),
        inline in any::<bool>(),
    ) {
        let attrs: String = pairs.iter().map(|(k, v)| format!(" {k}={v}")).collect();
        let source = if inline {
            format!("text [query=needle{attrs}] text")
        } else {
            format!("[topics{attrs}]\n[/topics]")
        };

        let mut queries = Vec::new();
        collect_queries(&parse(&source, &Options::default()).blocks, &mut queries);
        prop_assert_eq!(queries.len(), 1);

        for query in &queries {
            let vocabulary: Vec<String> =
                query.mode.vocabulary().iter().map(|n| data_attribute(n)).collect();
            for (name, _) in query.attributes.data_attributes() {
                prop_assert!(vocabulary.contains(&name), "{} escaped the allow-list", name);
            }
        }
    }

    /// Balanced nesting yields one block per level, up to the limit.
    #[test]
    fn nesting_depth_is_bounded(depth in 0usize..120, extra_opens in 0usize..4) {
        let source = format!(
            "{}{}{}",
            "[topics]\n".repeat(extra_opens),
            "[topics]\n".repeat(depth),
            "[/topics]\n".repeat(depth),
        );
        let doc = parse(&source, &Options::default());
        prop_assert_eq!(doc.query_block_count(), depth.min(MAX_NESTING_DEPTH));
    }
}
