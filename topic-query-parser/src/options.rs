#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    /// Recognize `[topics]` blocks and `[query]` tags.
    ///
    /// When disabled, both forms pass through as ordinary text.
    pub query_blocks: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { query_blocks: true }
    }
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use topic_query_parser::Options;
    ///
    /// let options = Options::builder()
    ///     .without_query_blocks()
    ///     .build();
    /// assert!(!options.query_blocks);
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings.
    ///
    /// Equivalent to `Options::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for `Options`.
///
/// Create an `OptionsBuilder` using `Options::builder()`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct OptionsBuilder {
    query_blocks: bool,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self { query_blocks: true }
    }
}

impl OptionsBuilder {
    /// Turn query block recognition on or off.
    #[must_use]
    pub fn with_query_blocks(mut self, enabled: bool) -> Self {
        self.query_blocks = enabled;
        self
    }

    /// Disable query block recognition.
    #[must_use]
    pub fn without_query_blocks(self) -> Self {
        self.with_query_blocks(false)
    }

    /// Build the `Options` from this builder.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            query_blocks: self.query_blocks,
        }
    }
}
