//! HTML escaping helpers
//!
//! Templates rendered by [`FormTemplates`](super::FormTemplates) are
//! auto-escaped. These helpers cover markup the crate assembles itself,
//! such as the `<form>` attribute string.

/// Escape a string for use in HTML attribute values
///
/// # Examples
///
/// ```rust
/// use formao::template::helpers::escape_attr;
///
/// assert_eq!(escape_attr(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
/// assert_eq!(escape_attr("/testaction"), "/testaction");
/// ```
#[must_use]
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use in HTML content
///
/// # Examples
///
/// ```rust
/// use formao::template::helpers::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>"),
///            "&lt;script&gt;alert('xss')&lt;/script&gt;");
/// assert_eq!(escape_html("Hello & goodbye"), "Hello &amp; goodbye");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_ampersand_first() {
        assert_eq!(escape_attr("&quot;"), "&amp;quot;");
    }

    #[test]
    fn test_escape_html_leaves_quotes() {
        assert_eq!(escape_html(r#"say "hi""#), r#"say "hi""#);
    }
}
