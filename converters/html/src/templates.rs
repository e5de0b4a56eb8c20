//! Result list markup for both query modes.

use topic_query_converters_core::{
    Category, PostId, SearchHit, SearchRequest, SearchResults, Topic, TopicTag,
};

use crate::{
    constants::{
        BADGE_CLASS, BADGE_NAME_CLASS, BADGE_WRAPPER_CLASS, BLURB_CLASS, EXCERPT_CLASS,
        FIRST_LINE_CLASS, FORCE_LIST_CLASS, SECOND_LINE_CLASS, TAG_CLASS, TAGS_CLASS, TOPIC_CLASS,
        TOPIC_TITLE_CLASS,
    },
    dom::{Element, Node},
};

/// `<ul>` of search hits, skipping `host`. `None` when nothing is left to show.
pub(crate) fn render_search_list(
    results: &SearchResults,
    request: &SearchRequest,
    host: Option<PostId>,
    tag_style: Option<&str>,
) -> Option<Element> {
    let items: Vec<Node> = results
        .posts()
        .filter(|hit| Some(hit.post_id) != host)
        .map(|hit| {
            let blurb = results.blurb(hit.post_id).unwrap_or_default();
            render_search_item(hit, blurb, request, tag_style).into()
        })
        .collect();
    if items.is_empty() {
        return None;
    }

    let list = Element::new("ul");
    let list = if request.excerpt_length == 0 {
        list.with_class(FORCE_LIST_CLASS)
    } else {
        list
    };
    Some(list.with_children(items))
}

fn render_search_item(
    hit: &SearchHit,
    blurb: &str,
    request: &SearchRequest,
    tag_style: Option<&str>,
) -> Element {
    let title = Element::new("a").with_attr("href", hit.topic.url()).with_child(
        Element::new("span")
            .with_class(TOPIC_TITLE_CLASS)
            .with_text(&hit.topic.title),
    );
    let mut item = Element::new("li").with_class(TOPIC_CLASS).with_child(
        Element::new("span")
            .with_class(FIRST_LINE_CLASS)
            .with_child(title),
    );

    if !(request.hide_tags && request.hide_category) {
        let mut second_line = Element::new("span").with_class(SECOND_LINE_CLASS);
        if let Some(category) = hit.topic.category.as_ref().filter(|_| !request.hide_category) {
            second_line = second_line.with_child(render_category_badge(category));
        }
        if !request.hide_tags && !hit.topic.tags.is_empty() {
            second_line = second_line.with_child(render_tags(hit, tag_style));
        }
        item = item.with_child(second_line);
    }

    if request.excerpt_length > 0 {
        item = item.with_child(
            Element::new("span")
                .with_class(BLURB_CLASS)
                .with_class(EXCERPT_CLASS)
                .with_text(blurb),
        );
    }
    item
}

fn render_category_badge(category: &Category) -> Element {
    Element::new("a")
        .with_class(BADGE_WRAPPER_CLASS)
        .with_attr("href", category.url())
        .with_child(
            Element::new("span")
                .with_class(BADGE_CLASS)
                .with_attr("data-category-id", category.id.to_string())
                .with_attr("style", format!("--category-badge-color: #{}", category.color))
                .with_child(
                    Element::new("span")
                        .with_class(BADGE_NAME_CLASS)
                        .with_text(&category.name),
                ),
        )
}

fn render_tags(hit: &SearchHit, tag_style: Option<&str>) -> Element {
    let links = hit
        .topic
        .tags
        .iter()
        .map(|tag| render_tag(hit, tag, tag_style).into());
    Element::new("div").with_class(TAGS_CLASS).with_children(links)
}

fn render_tag(hit: &SearchHit, tag: &TopicTag, tag_style: Option<&str>) -> Element {
    let link = Element::new("a")
        .with_attr("href", tag_path(hit, tag))
        .with_attr("data-tag-name", &tag.name)
        .with_class(TAG_CLASS);
    let link = match tag_style.filter(|style| !style.is_empty()) {
        Some(style) => link.with_class(style),
        None => link,
    };
    link.with_text(&tag.name)
}

/// Message-only tags, and every tag of a private message, link into the
/// author's message inbox.
fn tag_path(hit: &SearchHit, tag: &TopicTag) -> String {
    let in_messages = hit.topic.is_private_message() || tag.is_message_only();
    if in_messages && !hit.author.is_empty() {
        format!("/u/{}/messages/tags/{}", hit.author, tag.name)
    } else {
        format!("/tag/{}", tag.name)
    }
}

/// `<ul>` of plain topic links. `None` for an empty listing.
pub(crate) fn render_listing(topics: &[Topic]) -> Option<Element> {
    if topics.is_empty() {
        return None;
    }
    let items = topics.iter().map(|topic| {
        Element::new("li")
            .with_child(
                Element::new("a")
                    .with_attr("href", topic.url())
                    .with_text(&topic.title),
            )
            .into()
    });
    Some(Element::new("ul").with_children(items))
}
