//! Output normalization utilities for test comparisons.

/// Collapses the markup between tags so expected HTML can be written indented.
///
/// Whitespace-only runs between `>` and `<` are removed; text content is left
/// alone.
///
/// ```
/// use topic_query_converters_dev::output::squash_markup;
///
/// let expected = squash_markup("<ul>\n  <li>a b</li>\n</ul>");
/// assert_eq!(expected, "<ul><li>a b</li></ul>");
/// ```
#[must_use]
pub fn squash_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut pending = String::new();
    let mut after_tag = true;
    for c in markup.chars() {
        if c.is_whitespace() {
            pending.push(c);
            continue;
        }
        if !(c == '<' && after_tag) {
            out.push_str(&pending);
        }
        pending.clear();
        out.push(c);
        after_tag = c == '>';
    }
    if !after_tag {
        out.push_str(&pending);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squash_keeps_text_spacing() {
        assert_eq!(
            squash_markup("  <p>\n  one two\n</p>\n"),
            "<p>\n  one two\n</p>"
        );
        assert_eq!(squash_markup("<a>x</a>  <b>y</b>"), "<a>x</a><b>y</b>");
    }
}
