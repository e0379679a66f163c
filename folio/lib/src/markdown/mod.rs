//! Markdown documents rendered to presentational HTML.
//!
//! This module provides the [`Markdown`] document type plus the pieces it is
//! built from:
//!
//! - [`meta`] - fenced code block metadata
//! - [`highlighting`] - dual-theme syntax highlighting pipeline
//! - [`slug`] - heading anchor ids
//! - [`output`] - HTML assembly
//!
//! ## Examples
//!
//! ```
//! use folio_lib::markdown::Markdown;
//!
//! let md: Markdown = "# Guide\n\n```rust title=\"main.rs\"\nfn main() {}\n```\n".into();
//!
//! let headings = md.headings();
//! assert_eq!(headings[0].slug, "guide");
//!
//! let blocks = md.code_blocks();
//! assert_eq!(blocks[0].title, "main.rs");
//! assert_eq!(blocks[0].lang.as_deref(), Some("rust"));
//! ```

pub mod highlighting;
pub mod meta;
pub mod output;
pub mod slug;
mod types;

pub use types::{MarkdownError, MarkdownResult};

use highlighting::preprocess;
use meta::{BlockMeta, parse_meta, split_info_string};
use output::{HeadingEntry, HtmlOptions, HtmlRenderer, level_number};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::path::Path;

/// A markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markdown {
    content: String,
}

impl Markdown {
    /// Creates a document from its source text.
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Returns the source text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Renders the document to HTML.
    pub fn as_html(&self, options: &HtmlOptions) -> String {
        HtmlRenderer::new(options).render(&self.content)
    }

    /// Renders the document into any [`std::fmt::Write`].
    ///
    /// ## Errors
    ///
    /// Returns [`MarkdownError::Render`] if the writer fails.
    pub fn write_html<W: std::fmt::Write>(&self, out: &mut W, options: &HtmlOptions) -> MarkdownResult<()> {
        HtmlRenderer::new(options).write(&self.content, out)?;
        Ok(())
    }

    /// Lists the document's headings in order, with the ids they render with.
    pub fn headings(&self) -> Vec<HeadingEntry> {
        let mut entries = Vec::new();
        let mut current: Option<(u8, String)> = None;
        let mut image_depth = 0usize;

        for event in Parser::new_ext(&self.content, output::html::parser_options()) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((level_number(level), String::new()));
                }
                // Alt text is not part of the heading's id.
                Event::Start(Tag::Image { .. }) => image_depth += 1,
                Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
                Event::Text(text) | Event::Code(text) if image_depth == 0 => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak if image_depth == 0 => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push(' ');
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = current.take() {
                        entries.push(HeadingEntry::new(level, text));
                    }
                }
                _ => {}
            }
        }

        entries
    }

    /// Lists the code blocks with parsed metadata and resolved language.
    pub fn code_blocks(&self) -> Vec<BlockMeta> {
        let mut blocks = Vec::new();
        let mut current: Option<(String, String)> = None;

        for event in Parser::new_ext(&self.content, output::html::parser_options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let info = match kind {
                        CodeBlockKind::Fenced(info) => info.to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    current = Some((info, String::new()));
                }
                Event::Text(text) => {
                    if let Some((_, code)) = current.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((info, code)) = current.take() {
                        let (lang, meta_str) = split_info_string(&info);
                        let mut meta = parse_meta(meta_str).with_raw_code(code);
                        preprocess(&mut meta, lang);
                        blocks.push(meta);
                    }
                }
                _ => {}
            }
        }

        blocks
    }

    /// [`Markdown::headings`] as pretty-printed JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`MarkdownError::Serialization`] if encoding fails.
    pub fn headings_json(&self) -> MarkdownResult<String> {
        Ok(serde_json::to_string_pretty(&self.headings())?)
    }

    /// [`Markdown::code_blocks`] as pretty-printed JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`MarkdownError::Serialization`] if encoding fails.
    pub fn code_blocks_json(&self) -> MarkdownResult<String> {
        Ok(serde_json::to_string_pretty(&self.code_blocks())?)
    }
}

impl From<String> for Markdown {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl From<&str> for Markdown {
    fn from(content: &str) -> Self {
        content.to_string().into()
    }
}

impl TryFrom<&Path> for Markdown {
    type Error = MarkdownError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(content.into())
    }
}
