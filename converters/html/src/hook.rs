//! The post-process hook a host calls once per cooked post.

use topic_query_converters_core::{Post, User};

use crate::{
    Error,
    dom::Html,
    renderer::{QueryRenderer, RenderContext, RenderSummary},
    tracker::{PresenceChange, PresenceTracker},
};

/// Result of one hook invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookOutcome {
    pub summary: RenderSummary,
    pub presence: PresenceChange,
}

/// Renders query blocks, then records their presence.
pub struct PostProcessHook<'a> {
    renderer: QueryRenderer<'a>,
    tracker: PresenceTracker<'a>,
}

impl<'a> PostProcessHook<'a> {
    #[must_use]
    pub fn new(renderer: QueryRenderer<'a>, tracker: PresenceTracker<'a>) -> Self {
        Self { renderer, tracker }
    }

    /// Run over the cooked tree of `post` as `acting_user`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the presence flag cannot be updated. The
    /// tree has been rendered by then and keeps its new content.
    #[tracing::instrument(skip_all, fields(post = %post.id))]
    pub fn run(
        &self,
        html: &mut Html,
        post: &Post,
        acting_user: Option<&User>,
    ) -> Result<HookOutcome, Error> {
        let context = RenderContext {
            post_id: Some(post.id),
            acting_user,
        };
        let summary = self.renderer.render(html, &context);
        let presence = self.tracker.track(post.id, html)?;
        Ok(HookOutcome { summary, presence })
    }
}
