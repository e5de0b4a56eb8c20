//! HTML conversion and render-time processing of topic query blocks.
//!
//! A post is cooked in four steps, mirroring a forum's baking pipeline:
//!
//! 1. parse the source with [`topic_query_parser`]
//! 2. convert the document to an [`Html`] tree
//! 3. sanitize the tree against the allow-list
//! 4. run the [`PostProcessHook`]: render query blocks, then track presence
//!
//! [`Processor`] runs all four; hosts with their own pipeline call the
//! pieces directly.

use topic_query_converters_core::{
    CustomFieldStore, GroupDirectory, ListingEngine, Post, SearchEngine, Settings, User,
};
use topic_query_parser::{Options, parse};

mod constants;
pub mod dom;
mod error;
mod hook;
mod html_visitor;
mod renderer;
mod sanitize;
mod templates;
mod tracker;

pub use dom::{Element, Html, Node};
pub use error::Error;
pub use hook::{HookOutcome, PostProcessHook};
pub use html_visitor::convert;
pub use renderer::{QueryRenderer, RenderContext, RenderSummary};
pub use sanitize::Sanitizer;
pub use tracker::{PresenceChange, PresenceTracker};

/// The host services a [`Processor`] talks to.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub search: &'a dyn SearchEngine,
    pub listing: &'a dyn ListingEngine,
    pub directory: &'a dyn GroupDirectory,
    pub store: &'a dyn CustomFieldStore,
}

/// A cooked post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cooked {
    pub html: String,
    pub outcome: HookOutcome,
}

/// Cooks posts end to end.
pub struct Processor<'a> {
    options: Options,
    sanitizer: Sanitizer,
    hook: PostProcessHook<'a>,
}

impl<'a> Processor<'a> {
    /// Query blocks are recognized only while `settings` has them enabled.
    #[must_use]
    pub fn new(settings: &'a Settings, services: Services<'a>) -> Self {
        let options = Options::builder()
            .with_query_blocks(settings.enabled())
            .build();
        let renderer = QueryRenderer::new(
            settings,
            services.directory,
            services.search,
            services.listing,
        );
        Self {
            options,
            sanitizer: Sanitizer::default(),
            hook: PostProcessHook::new(renderer, PresenceTracker::new(services.store)),
        }
    }

    /// Use `sanitizer` instead of the default one.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Cook `post` with its author as the acting user.
    ///
    /// # Errors
    ///
    /// Returns an error if the presence flag cannot be updated.
    pub fn cook(&self, post: &Post) -> Result<Cooked, Error> {
        self.cook_as(post, post.user.as_ref())
    }

    /// Cook `post` as `acting_user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the presence flag cannot be updated.
    #[tracing::instrument(skip_all, fields(post = %post.id))]
    pub fn cook_as(&self, post: &Post, acting_user: Option<&User>) -> Result<Cooked, Error> {
        let document = parse(&post.raw, &self.options);
        let mut html = convert(&document);
        self.sanitizer.clean(&mut html);
        let outcome = self.hook.run(&mut html, post, acting_user)?;
        Ok(Cooked {
            html: html.to_html(),
            outcome,
        })
    }
}
