#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Parsing error: {0}")]
    ParseGrammar(#[from] peg::error::ParseError<peg::str::LineCol>),

    #[error("Invalid allow-list selector: {0}")]
    InvalidSelector(String),
}

impl Error {
    /// Get advice for this error if available.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::ParseGrammar(..) => Some(
                "Tags look like `[name=value key=value]`; values with spaces must be quoted",
            ),
            Self::InvalidSelector(..) => {
                Some("Selectors are either `tag.class` or `tag[attribute]`, e.g. `div.discourse-topic-query`")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_selector_display() {
        let error = Error::InvalidSelector("div#id".to_string());
        assert_eq!(format!("{error}"), "Invalid allow-list selector: div#id");
        assert!(error.advice().is_some());
    }
}
