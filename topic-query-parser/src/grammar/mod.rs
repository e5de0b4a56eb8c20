//! Bracketed tag grammar.
//!
//! ```text
//! [topics tags=foo,bar order="created"]
//! [query="#support in:title" hideTags=true excerptLength=0]
//! [/topics]
//! ```
//!
//! A tag is a name, an optional default value written as `=value` straight
//! after the name, and whitespace separated `key=value` pairs. Values are
//! double quoted, single quoted or bare (no whitespace, quotes or `]`).

use crate::{Error, model::Tag};

peg::parser! {
    grammar tag_parser() for str {
        pub(crate) rule open_tag() -> Tag
            = t:tag() { t }

        /// An opening tag at the start of the input, followed by anything.
        ///
        /// Yields the tag and the byte length it spans.
        pub(crate) rule open_tag_prefix() -> (Tag, usize)
            = t:tag() end:position!() [_]* { (t, end) }

        pub(crate) rule close_tag() -> &'input str
            = "[/" n:name() "]" { n }

        rule tag() -> Tag
            = "[" name:name() default:("=" v:value() { v })?
              attributes:(whitespace() a:attribute() { a })* whitespace()? "]" {
                Tag {
                    name: name.to_string(),
                    default,
                    attributes,
                }
            }

        rule attribute() -> (String, String)
            = k:name() "=" v:value() { (k.to_string(), v) }

        rule name() -> &'input str
            = $(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-']*)

        rule value() -> String
            = "\"" v:$((!['"'] [_])*) "\"" { v.to_string() }
            / "'" v:$((!['\''] [_])*) "'" { v.to_string() }
            / v:$((!['"' | '\'' | ']' | ' ' | '\t' | '\n' | '\r'] [_])+) { v.to_string() }

        rule whitespace() = quiet!{[' ' | '\t']+}
    }
}

/// Parse a complete opening tag.
///
/// # Errors
///
/// Returns [`Error::ParseGrammar`] when `input` is not exactly one opening tag.
pub fn parse_tag(input: &str) -> Result<Tag, Error> {
    tag_parser::open_tag(input).map_err(|e| {
        tracing::debug!(?input, "failed to parse tag: {e}");
        Error::from(e)
    })
}

/// Parse an opening tag at the start of `input`, returning it with its byte length.
pub(crate) fn tag_prefix(input: &str) -> Option<(Tag, usize)> {
    tag_parser::open_tag_prefix(input).ok()
}

/// Name of the closing tag if `input` is exactly one, e.g. `[/topics]`.
pub(crate) fn closing_tag(input: &str) -> Option<&str> {
    tag_parser::close_tag(input).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(tag: &Tag) -> Vec<(&str, &str)> {
        tag.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn parses_bare_and_quoted_values() {
        let tag = parse_tag(r#"[topics tags=foo,bar order="created" status='open']"#).unwrap();
        assert_eq!(tag.name, "topics");
        assert_eq!(tag.default, None);
        assert_eq!(
            pairs(&tag),
            vec![("tags", "foo,bar"), ("order", "created"), ("status", "open")]
        );
    }

    #[test]
    fn parses_default_value() {
        let tag = parse_tag(r##"[query="#support in:title" hideTags=true]"##).unwrap();
        assert_eq!(tag.name, "query");
        assert_eq!(tag.default.as_deref(), Some("#support in:title"));
        assert_eq!(pairs(&tag), vec![("hideTags", "true")]);
    }

    #[test]
    fn tolerates_trailing_whitespace() {
        let tag = parse_tag("[topics order=created ]").unwrap();
        assert_eq!(pairs(&tag), vec![("order", "created")]);
    }

    #[rstest::rstest]
    #[case::unterminated("[topics tags=foo")]
    #[case::no_name("[=foo]")]
    #[case::dangling_key("[topics tags]")]
    #[case::trailing_text("[topics] more")]
    fn rejects_malformed(#[case] input: &str) {
        assert!(parse_tag(input).is_err());
    }

    #[test]
    fn prefix_reports_consumed_length() {
        let (tag, len) = tag_prefix("[query=foo] and more").unwrap();
        assert_eq!(tag.name, "query");
        assert_eq!(len, "[query=foo]".len());
    }

    #[test]
    fn closing_tag_is_exact() {
        assert_eq!(closing_tag("[/topics]"), Some("topics"));
        assert_eq!(closing_tag("[/topics] x"), None);
        assert_eq!(closing_tag("[topics]"), None);
    }
}
