//! Heading markup with stable anchor ids.

use crate::markdown::slug::slugify;
use pulldown_cmark::HeadingLevel;
use serde::Serialize;

/// Class on the self-link placed inside every heading.
pub const ANCHOR_CLASS: &str = "anchor";

/// A heading as listed in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

impl HeadingEntry {
    /// Builds an entry from the heading's plain text.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        let slug = slugify(&text);
        Self { level, text, slug }
    }
}

/// Wraps rendered heading content with an id and a self-anchor.
///
/// Holds no state between headings: two headings with the same text get the
/// same id.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingComposer;

impl HeadingComposer {
    /// Renders `<hN id="slug"><a href="#slug" class="anchor"></a>inner</hN>`.
    ///
    /// `plain_text` feeds the slug; `inner_html` is already-rendered content
    /// and is inserted as is. Levels outside 1..=6 are clamped.
    ///
    /// ## Examples
    ///
    /// ```
    /// use folio_lib::markdown::output::HeadingComposer;
    ///
    /// let html = HeadingComposer.compose(2, "Getting <em>Started</em>", "Getting Started");
    /// assert_eq!(
    ///     html,
    ///     r##"<h2 id="getting-started"><a href="#getting-started" class="anchor"></a>Getting <em>Started</em></h2>"##
    /// );
    /// ```
    pub fn compose(&self, level: u8, inner_html: &str, plain_text: &str) -> String {
        let level = level.clamp(1, 6);
        let slug = slugify(plain_text);
        format!(
            r##"<h{level} id="{slug}"><a href="#{slug}" class="{ANCHOR_CLASS}"></a>{inner_html}</h{level}>"##
        )
    }
}

/// Numeric level for a pulldown-cmark heading level.
pub(crate) fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
