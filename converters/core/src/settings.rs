//! Site-level configuration for query blocks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::GroupId;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_EXCERPT_LENGTH: u32 = 200;
const DEFAULT_EXCERPT_CEILING: u32 = 300;
const DEFAULT_LISTING_LIMIT: usize = 20;
const DEFAULT_TAG_STYLE: &str = "simple";

/// Query block settings.
///
/// Settings are immutable once built and handed to each component when it is
/// constructed; a host that lets administrators change them builds a new value
/// and uses it from the next render pass on.
///
/// Use [`Settings::builder()`] to construct an instance, or deserialize one:
/// every field has a default.
///
/// # Example
///
/// ```
/// use topic_query_converters_core::{GroupId, Settings};
///
/// let settings = Settings::builder()
///     .enabled(true)
///     .allowed_groups(vec![GroupId(41)])
///     .build();
/// assert!(settings.enabled());
/// assert_eq!(settings.listing_limit(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Settings {
    enabled: bool,
    allowed_groups: Vec<GroupId>,
    sweep_interval_secs: u64,
    excerpt_length: u32,
    excerpt_ceiling: u32,
    listing_limit: usize,
    tag_style: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_groups: Vec::new(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            excerpt_ceiling: DEFAULT_EXCERPT_CEILING,
            listing_limit: DEFAULT_LISTING_LIMIT,
            tag_style: Some(DEFAULT_TAG_STYLE.to_string()),
        }
    }
}

impl Settings {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Whether query blocks are processed at all.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Groups whose members may use query blocks in addition to staff.
    #[must_use]
    pub fn allowed_groups(&self) -> &[GroupId] {
        &self.allowed_groups
    }

    /// How often the rebake sweep runs.
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Excerpt length used when a search block does not set one.
    #[must_use]
    pub fn excerpt_length(&self) -> u32 {
        self.excerpt_length
    }

    /// Upper bound applied to any requested excerpt length.
    #[must_use]
    pub fn excerpt_ceiling(&self) -> u32 {
        self.excerpt_ceiling
    }

    /// Number of topics a listing block returns.
    #[must_use]
    pub fn listing_limit(&self) -> usize {
        self.listing_limit
    }

    /// Extra CSS class added to rendered tag links.
    #[must_use]
    pub fn tag_style(&self) -> Option<&str> {
        self.tag_style.as_deref()
    }
}

/// Builder for [`Settings`].
///
/// Use [`Settings::builder()`] to create a new builder.
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Turn query block processing on or off.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.settings.enabled = enabled;
        self
    }

    /// Set the groups allowed to use query blocks.
    #[must_use]
    pub fn allowed_groups(mut self, groups: Vec<GroupId>) -> Self {
        self.settings.allowed_groups = groups;
        self
    }

    /// Set the allowed groups from a `|` separated list of ids, e.g. `"12|41"`.
    ///
    /// Entries that are not ids are ignored.
    #[must_use]
    pub fn allowed_groups_list(self, list: &str) -> Self {
        let groups = list
            .split('|')
            .filter_map(|id| id.trim().parse().ok().map(GroupId))
            .collect();
        self.allowed_groups(groups)
    }

    /// Set the interval between rebake sweeps.
    #[must_use]
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.settings.sweep_interval_secs = interval.as_secs();
        self
    }

    /// Set the default and the ceiling for search excerpt lengths.
    #[must_use]
    pub fn excerpt_bounds(mut self, default: u32, ceiling: u32) -> Self {
        self.settings.excerpt_length = default;
        self.settings.excerpt_ceiling = ceiling;
        self
    }

    /// Set the number of topics a listing block returns.
    #[must_use]
    pub fn listing_limit(mut self, limit: usize) -> Self {
        self.settings.listing_limit = limit;
        self
    }

    /// Set the CSS class added to tag links, or `None` for no extra class.
    #[must_use]
    pub fn tag_style(mut self, style: Option<&str>) -> Self {
        self.settings.tag_style = style.map(str::to_string);
        self
    }

    /// Build the [`Settings`].
    #[must_use]
    pub fn build(self) -> Settings {
        self.settings
    }
}
