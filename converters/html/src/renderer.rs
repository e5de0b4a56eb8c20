//! Render-time replacement of query block placeholders.
//!
//! Runs over the cooked tree of one post. Every skip path leaves the
//! container exactly as cooked, fallback content included; only a non-empty
//! result list replaces it.

use topic_query_converters_core::{
    Authorizer, GroupDirectory, ListingEngine, ListingRequest, PostId, QueryRequest, SearchEngine,
    SearchRequest, Settings, User,
};
use topic_query_parser::constants::{DATA_PREFIX, MARKER_CLASS};
use tracing::instrument;

use crate::{
    dom::{Element, Html},
    templates::{render_listing, render_search_list},
};

/// Who is rendering what.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderContext<'u> {
    /// The post being rendered; its own hit is left out of search results.
    pub post_id: Option<PostId>,
    /// The user whose permissions and visibility apply.
    pub acting_user: Option<&'u User>,
}

/// Counts from one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Containers visited.
    pub found: usize,
    /// Containers whose content was replaced.
    pub rendered: usize,
    /// Containers left as cooked.
    pub skipped: usize,
}

/// Replaces query block placeholders with result lists.
pub struct QueryRenderer<'a> {
    settings: &'a Settings,
    authorizer: Authorizer<'a>,
    search: &'a dyn SearchEngine,
    listing: &'a dyn ListingEngine,
}

impl<'a> QueryRenderer<'a> {
    #[must_use]
    pub fn new(
        settings: &'a Settings,
        directory: &'a dyn GroupDirectory,
        search: &'a dyn SearchEngine,
        listing: &'a dyn ListingEngine,
    ) -> Self {
        Self {
            settings,
            authorizer: Authorizer::new(settings, directory),
            search,
            listing,
        }
    }

    /// Render every query block container in `html`.
    ///
    /// The acting user is authorized at most once per pass. A container whose
    /// content is not replaced is searched for nested containers.
    #[instrument(skip_all, fields(post = ?context.post_id))]
    pub fn render(&self, html: &mut Html, context: &RenderContext<'_>) -> RenderSummary {
        let mut summary = RenderSummary::default();
        if !self.settings.enabled() {
            tracing::debug!("query blocks disabled, leaving containers as cooked");
            return summary;
        }

        let mut authorized = None;
        html.select_class_mut(MARKER_CLASS, &mut |element| {
            summary.found += 1;
            let rendered = self.render_container(element, context, &mut authorized);
            if rendered {
                summary.rendered += 1;
            } else {
                summary.skipped += 1;
            }
            !rendered
        });

        tracing::debug!(
            found = summary.found,
            rendered = summary.rendered,
            skipped = summary.skipped,
            "rendered query blocks"
        );
        summary
    }

    fn render_container(
        &self,
        element: &mut Element,
        context: &RenderContext<'_>,
        authorized: &mut Option<bool>,
    ) -> bool {
        let Some(user) = context.acting_user else {
            tracing::debug!("no acting user, skipping query block");
            return false;
        };
        if !*authorized.get_or_insert_with(|| self.authorizer.can_use_query_blocks(user)) {
            tracing::debug!(user = %user.username, "user may not use query blocks, skipping");
            return false;
        }

        let container: &Element = element;
        let lookup = move |name: &str| container.attr(&format!("{DATA_PREFIX}{name}"));
        let Some(request) = QueryRequest::from_attributes(lookup, self.settings) else {
            tracing::debug!("search block without a query, skipping");
            return false;
        };

        let list = match &request {
            QueryRequest::Search(search) => self.run_search(search, user, context.post_id),
            QueryRequest::Listing(listing) => self.run_listing(listing, user),
        };
        match list {
            Some(list) => {
                element.set_children(vec![list.into()]);
                true
            }
            None => false,
        }
    }

    fn run_search(
        &self,
        request: &SearchRequest,
        user: &User,
        host: Option<PostId>,
    ) -> Option<Element> {
        let results = self
            .search
            .search(request, user)
            .inspect_err(|error| tracing::warn!(%error, query = %request.query, "search failed"))
            .ok()?;
        let list = render_search_list(&results, request, host, self.settings.tag_style());
        if list.is_none() {
            tracing::debug!(query = %request.query, "search matched nothing to show");
        }
        list
    }

    fn run_listing(&self, request: &ListingRequest, user: &User) -> Option<Element> {
        let topics = self
            .listing
            .list(request, user)
            .inspect_err(|error| tracing::warn!(%error, "listing failed"))
            .ok()?;
        let list = render_listing(&topics);
        if list.is_none() {
            tracing::debug!("listing matched no topics");
        }
        list
    }
}
