use std::fmt;

/// Class applied to links that stay inside the site.
pub const INTERNAL_LINK_CLASS: &str = "internal-link";

/// Where a link's destination lives relative to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKind {
    /// Site-relative path, handed to the host router (`/guide`).
    Internal,
    /// In-page anchor (`#install`).
    Fragment,
    /// Everything else; opens in a new tab.
    External,
}

/// Classifies a destination by how it starts.
///
/// Exactly one kind applies to every input, including the empty string.
///
/// ## Examples
///
/// ```
/// use folio_lib::render::link::{LinkKind, classify};
///
/// assert_eq!(classify("/docs/setup"), LinkKind::Internal);
/// assert_eq!(classify("#usage"), LinkKind::Fragment);
/// assert_eq!(classify("https://example.com"), LinkKind::External);
/// assert_eq!(classify("mailto:hi@example.com"), LinkKind::External);
/// ```
pub fn classify(href: &str) -> LinkKind {
    if href.starts_with('/') {
        LinkKind::Internal
    } else if href.starts_with('#') {
        LinkKind::Fragment
    } else {
        LinkKind::External
    }
}

/// A link destination with its kind and optional tooltip.
///
/// ## Examples
///
/// ```
/// use folio_lib::render::link::Link;
///
/// let link = Link::new("Guide", "/guide");
/// assert_eq!(
///     link.to_browser(),
///     r#"<a href="/guide" class="internal-link">Guide</a>"#
/// );
///
/// let link = Link::new("Crates", "https://crates.io").with_title("Registry");
/// assert_eq!(
///     link.open_tag(),
///     r#"<a href="https://crates.io" target="_blank" rel="noopener noreferrer" title="Registry">"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    kind: LinkKind,
    display: String,
    href: String,
    title: Option<String>,
}

impl Link {
    /// Creates a link; the kind is derived from `href`.
    pub fn new(display: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            kind: classify(&href),
            display: display.into(),
            href,
            title: None,
        }
    }

    /// Sets the tooltip. Empty titles are ignored.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.is_empty()).then_some(title);
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Renders just the opening `<a>` tag.
    ///
    /// Used when the link text is streamed separately.
    pub fn open_tag(&self) -> String {
        let mut attrs = format!(r#"href="{}""#, html_escape::encode_double_quoted_attribute(&self.href));

        match self.kind {
            LinkKind::Internal => {
                attrs.push_str(&format!(r#" class="{INTERNAL_LINK_CLASS}""#));
            }
            LinkKind::Fragment => {}
            LinkKind::External => {
                attrs.push_str(r#" target="_blank" rel="noopener noreferrer""#);
            }
        }

        if let Some(title) = &self.title {
            attrs.push_str(&format!(
                r#" title="{}""#,
                html_escape::encode_double_quoted_attribute(title)
            ));
        }

        format!("<a {attrs}>")
    }

    /// Renders the complete anchor element with escaped display text.
    pub fn to_browser(&self) -> String {
        format!(
            "{}{}</a>",
            self.open_tag(),
            html_escape::encode_text(&self.display)
        )
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_browser())
    }
}

impl<S1, S2> From<(S1, S2)> for Link
where
    S1: Into<String>,
    S2: Into<String>,
{
    /// Creates a Link from a tuple of (display, href).
    fn from((display, href): (S1, S2)) -> Self {
        Link::new(display, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("/"), LinkKind::Internal);
        assert_eq!(classify("/a/b?c=d"), LinkKind::Internal);
        assert_eq!(classify("//cdn.example.com"), LinkKind::Internal);
        assert_eq!(classify("#"), LinkKind::Fragment);
        assert_eq!(classify("#section-2"), LinkKind::Fragment);
        assert_eq!(classify("http://example.com"), LinkKind::External);
        assert_eq!(classify("relative/path"), LinkKind::External);
        assert_eq!(classify(""), LinkKind::External);
    }

    #[test]
    fn test_internal_link_markup() {
        let link = Link::new("Docs", "/docs");
        assert_eq!(
            link.to_browser(),
            r#"<a href="/docs" class="internal-link">Docs</a>"#
        );
    }

    #[test]
    fn test_fragment_link_markup() {
        let link = Link::new("Jump", "#install");
        assert_eq!(link.to_browser(), r##"<a href="#install">Jump</a>"##);
    }

    #[test]
    fn test_external_link_markup() {
        let link = Link::new("Example", "https://example.com");
        assert_eq!(
            link.to_browser(),
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">Example</a>"#
        );
    }

    #[test]
    fn test_escapes_html() {
        let link = Link::new("<b>", "https://example.com?a=1&b=\"2\"");
        let html = link.to_browser();
        assert!(html.contains("&amp;b="));
        assert!(html.contains("&quot;2&quot;"));
        assert!(html.contains("&lt;b&gt;</a>"));
    }

    #[test]
    fn test_empty_title_ignored() {
        let link = Link::new("x", "#x").with_title("");
        assert_eq!(link.title(), None);
        assert!(!link.open_tag().contains("title="));
    }

    #[test]
    fn test_from_tuple() {
        let link: Link = ("Display", "/url").into();
        assert_eq!(link.display(), "Display");
        assert_eq!(link.kind(), LinkKind::Internal);
    }

    proptest! {
        #[test]
        fn prop_exactly_one_rule(href in "\\PC{0,40}") {
            let kind = classify(&href);
            let expected = match href.chars().next() {
                Some('/') => LinkKind::Internal,
                Some('#') => LinkKind::Fragment,
                _ => LinkKind::External,
            };
            prop_assert_eq!(kind, expected);
        }
    }
}
