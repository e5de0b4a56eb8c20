use pretty_assertions::assert_eq;
use topic_query_parser::{
    Block, InlineNode, Options, QueryBlock, QueryMode, constants::MAX_NESTING_DEPTH, parse,
};

fn only_query(source: &str) -> Option<QueryBlock> {
    let doc = parse(source, &Options::default());
    match doc.blocks.as_slice() {
        [Block::QueryBlock(block)] => Some(block.clone()),
        [Block::Paragraph(paragraph)] => match paragraph.content.as_slice() {
            [InlineNode::QueryMacro(block)] => Some(block.clone()),
            _ => None,
        },
        _ => None,
    }
}

#[test]
fn tags_are_kept_verbatim() {
    let block = only_query("[topics tags=A,B]\n[/topics]");
    assert_eq!(
        block.as_ref().and_then(|b| b.attributes.get("tags")),
        Some("A,B")
    );
}

#[test]
fn block_without_attributes_is_empty() {
    let block = only_query("[topics]\n[/topics]");
    assert!(block.is_some_and(|b| b.mode == QueryMode::Listing && b.attributes.is_empty()));
}

#[test]
fn full_listing_vocabulary() {
    let block = only_query(
        "[topics tags=a status=open order=created topicIds=1,2 exceptTopicIds=3 \
         ascending=true assigned=alice category=support]\n[/topics]",
    );
    let names: Vec<String> = block
        .map(|b| b.attributes.data_attributes().map(|(n, _)| n).collect())
        .unwrap_or_default();
    assert_eq!(
        names,
        vec![
            "data-tags",
            "data-status",
            "data-order",
            "data-topicids",
            "data-excepttopicids",
            "data-ascending",
            "data-assigned",
            "data-category",
        ]
    );
}

#[test]
fn search_tag_alone_in_paragraph() {
    let block = only_query(r##"[query="#support" hideCategory=true excerptLength=0]"##);
    let attributes: Vec<(String, String)> = block
        .map(|b| {
            b.attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(
        attributes,
        vec![
            ("query".to_string(), "#support".to_string()),
            ("hidecategory".to_string(), "true".to_string()),
            ("excerptlength".to_string(), "0".to_string()),
        ]
    );
}

#[rstest::rstest]
#[case::no_query("[query]")]
#[case::unknown_tag("[listing tags=a]\n[/listing]")]
#[case::no_close("[topics tags=a]")]
#[case::trailing_text("[topics tags=a] please\n[/topics]")]
fn unrecognized_markup_is_text(#[case] source: &str) {
    let doc = parse(source, &Options::default());
    assert_eq!(doc.query_block_count(), 0);
}

#[test]
fn deeply_nested_blocks_stop_at_the_nesting_limit() {
    let source = format!("{}{}", "[topics]\n".repeat(800), "[/topics]\n".repeat(800));
    let doc = parse(&source, &Options::default());
    assert_eq!(doc.query_block_count(), MAX_NESTING_DEPTH);
}

#[test]
fn unmatched_opening_fences_stay_text() {
    let source = "[topics]\n".repeat(4000);
    let doc = parse(&source, &Options::default());
    assert_eq!(doc.query_block_count(), 0);
    assert_eq!(doc.blocks.len(), 1);
}
