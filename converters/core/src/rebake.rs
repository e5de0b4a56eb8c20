//! Scheduled re-rendering of posts that contain query blocks.
//!
//! Query block output goes stale as soon as a matching topic is created or
//! edited. Rather than re-rendering every post, the sweep walks the posts
//! flagged with [`HAS_TOPIC_QUERY`] and re-renders only those, dropping flags
//! whose post no longer exists.

use chrono::{DateTime, TimeDelta, Utc};
use rustc_hash::FxHashSet;
use tracing::instrument;

use crate::{
    Settings,
    error::{RebakeError, StoreError},
    model::PostId,
    store::{CustomFieldStore, HAS_TOPIC_QUERY},
};

/// The host's ability to re-render a post.
pub trait Rebaker {
    /// Whether `post` still exists.
    ///
    /// # Errors
    ///
    /// Returns a [`RebakeError`] when existence cannot be determined.
    fn post_exists(&self, post: PostId) -> Result<bool, RebakeError>;

    /// Re-render `post` from its source and persist the result.
    ///
    /// # Errors
    ///
    /// Returns a [`RebakeError`] when the post cannot be rendered or saved.
    fn rebake(&self, post: PostId) -> Result<(), RebakeError>;
}

/// What a sweep did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Posts re-rendered.
    pub rebaked: Vec<PostId>,
    /// Flags removed because their post is gone.
    pub removed: Vec<PostId>,
    /// Posts whose rebake or cleanup failed.
    pub failed: Vec<PostId>,
}

impl SweepReport {
    /// Whether the sweep touched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rebaked.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }
}

/// Re-render every flagged post.
///
/// Does nothing when query blocks are disabled. A failure on one post is
/// logged and recorded in the report; the sweep carries on with the rest.
///
/// # Errors
///
/// Returns a [`StoreError`] only if the flagged posts cannot be listed.
#[instrument(skip_all)]
pub fn sweep(
    settings: &Settings,
    store: &dyn CustomFieldStore,
    rebaker: &dyn Rebaker,
) -> Result<SweepReport, StoreError> {
    let mut report = SweepReport::default();
    if !settings.enabled() {
        tracing::debug!("query blocks disabled, skipping sweep");
        return Ok(report);
    }

    let mut seen = FxHashSet::default();
    let posts: Vec<PostId> = store
        .posts_with_flag(HAS_TOPIC_QUERY)?
        .into_iter()
        .filter(|post| seen.insert(*post))
        .collect();
    tracing::info!(count = posts.len(), "sweeping posts with query blocks");

    for post in posts {
        match sweep_one(store, rebaker, post) {
            Ok(Swept::Rebaked) => report.rebaked.push(post),
            Ok(Swept::Removed) => report.removed.push(post),
            Err(error) => {
                tracing::warn!(%post, %error, "failed to refresh post");
                report.failed.push(post);
            }
        }
    }

    tracing::info!(
        rebaked = report.rebaked.len(),
        removed = report.removed.len(),
        failed = report.failed.len(),
        "sweep finished"
    );
    Ok(report)
}

enum Swept {
    Rebaked,
    Removed,
}

fn sweep_one(
    store: &dyn CustomFieldStore,
    rebaker: &dyn Rebaker,
    post: PostId,
) -> Result<Swept, RebakeError> {
    if rebaker.post_exists(post)? {
        rebaker.rebake(post)?;
        Ok(Swept::Rebaked)
    } else {
        tracing::debug!(%post, "post is gone, removing orphaned flag");
        store.delete_flag(post, HAS_TOPIC_QUERY)?;
        Ok(Swept::Removed)
    }
}

/// When the next sweep is due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    interval: TimeDelta,
    last_run: Option<DateTime<Utc>>,
}

impl Schedule {
    /// A schedule that has never run, using the configured sweep interval.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            interval: TimeDelta::from_std(settings.sweep_interval()).unwrap_or(TimeDelta::MAX),
            last_run: None,
        }
    }

    /// Time of the last recorded run.
    #[must_use]
    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
    }

    /// Earliest time the next sweep may run; `None` means immediately.
    #[must_use]
    pub fn next_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
            .map(|last| last.checked_add_signed(self.interval).unwrap_or(DateTime::<Utc>::MAX_UTC))
    }

    /// Whether a sweep should run at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_run().is_none_or(|next| now >= next)
    }

    /// Sweep if due at `now`, recording the run.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`sweep`]; the run is not recorded in that case.
    pub fn run_if_due(
        &mut self,
        now: DateTime<Utc>,
        settings: &Settings,
        store: &dyn CustomFieldStore,
        rebaker: &dyn Rebaker,
    ) -> Result<Option<SweepReport>, StoreError> {
        if !self.is_due(now) {
            return Ok(None);
        }
        let report = sweep(settings, store, rebaker)?;
        self.last_run = Some(now);
        Ok(Some(report))
    }
}
