//! HTML output for Markdown documents.
//!
//! - [`html`] walks the Markdown events and assembles the document
//! - [`BlockComposer`] renders highlighted code blocks
//! - [`HeadingComposer`] renders headings with anchor ids
//!
//! ## Examples
//!
//! ```
//! use folio_lib::markdown::Markdown;
//! use folio_lib::markdown::output::HtmlOptions;
//! use folio_lib::markdown::highlighting::ThemePair;
//!
//! let mut options = HtmlOptions::default();
//! options.theme = ThemePair::Nord;
//! options.line_numbers = true;
//!
//! let md: Markdown = "```rust\nfn main() {}\n```\n".into();
//! let html = md.as_html(&options);
//! assert!(html.contains("line-numbers"));
//! ```

mod block;
mod heading;
pub mod html;

pub use block::{BlockComposer, COPY_BUTTON_CLASS, LINE_NUMBERS_CLASS};
pub use heading::{ANCHOR_CLASS, HeadingComposer, HeadingEntry};
pub use html::{HtmlRenderer, generate_styles, wrap_document};

pub(crate) use heading::level_number;

use crate::markdown::highlighting::ThemePair;
use pulldown_cmark::{Tag, TagEnd};

/// Options for HTML output with sensible defaults.
///
/// Per-block settings in a fence's meta string take precedence over
/// `line_numbers` and `allow_copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HtmlOptions {
    /// Theme pair for code blocks.
    pub theme: ThemePair,
    /// Default for blocks without `displayLineNumbers`.
    pub line_numbers: bool,
    /// Default for blocks without `allowCopy`.
    pub allow_copy: bool,
    /// Prepend the generated `<style>` element.
    pub include_styles: bool,
    /// Append the copy-button script when any block has a copy button.
    pub include_scripts: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            theme: ThemePair::default(),
            line_numbers: false,
            allow_copy: true,
            include_styles: true,
            include_scripts: true,
        }
    }
}

/// Elements that get dedicated rendering instead of plain prose markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading(u8),
    Link,
    Image,
    CodeBlock,
    Table,
}

impl ElementKind {
    /// Classifies an opening tag. Prose tags return `None`.
    pub fn of_tag(tag: &Tag<'_>) -> Option<Self> {
        match tag {
            Tag::Heading { level, .. } => Some(Self::Heading(level_number(*level))),
            Tag::Link { .. } => Some(Self::Link),
            Tag::Image { .. } => Some(Self::Image),
            Tag::CodeBlock(_) => Some(Self::CodeBlock),
            Tag::Table(_) => Some(Self::Table),
            _ => None,
        }
    }

    /// Classifies a closing tag. Prose tags return `None`.
    pub fn of_end(tag: &TagEnd) -> Option<Self> {
        match tag {
            TagEnd::Heading(level) => Some(Self::Heading(level_number(*level))),
            TagEnd::Link => Some(Self::Link),
            TagEnd::Image => Some(Self::Image),
            TagEnd::CodeBlock => Some(Self::CodeBlock),
            TagEnd::Table => Some(Self::Table),
            _ => None,
        }
    }
}
