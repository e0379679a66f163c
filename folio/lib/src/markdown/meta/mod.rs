//! Fenced code block metadata.
//!
//! A fenced block's info string is the language token followed by an
//! attribute string:
//!
//! ````markdown
//! ```ts title="Greeter" displayLineNumbers="true" allowCopy="false"
//! export const greet = (name: string) => `Hello ${name}`;
//! ```
//! ````
//!
//! [`split_info_string`] separates the two halves and [`parse_meta`] turns
//! the attribute string into a [`BlockMeta`].

mod parser;

pub use parser::{parse_meta, split_info_string};

use serde::Serialize;

/// Language used when a block does not request one.
pub const DEFAULT_LANG: &str = "txt";

/// Metadata for a single fenced code block.
///
/// Created fresh for each block. `lang` is filled once by the highlight
/// pipeline's preprocess step; `raw_code` is fixed at construction and is
/// what a copy button hands to the clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMeta {
    /// Title shown in the block header. Empty means "show the language".
    pub title: String,
    /// Whether to show line numbers. `None` defers to the renderer default.
    pub display_line_numbers: Option<bool>,
    /// Whether to render a copy button. `None` defers to the renderer default.
    pub allow_copy: Option<bool>,
    /// Resolved language. `None` until preprocess has run.
    pub lang: Option<String>,
    raw_code: String,
}

impl BlockMeta {
    /// Attaches the exact block source.
    ///
    /// ## Examples
    ///
    /// ```
    /// use folio_lib::markdown::meta::parse_meta;
    ///
    /// let meta = parse_meta(r#"title="demo""#).with_raw_code("let x = 1;\n");
    /// assert_eq!(meta.raw_code(), "let x = 1;\n");
    /// ```
    pub fn with_raw_code(mut self, code: impl Into<String>) -> Self {
        self.raw_code = code.into();
        self
    }

    /// The block source, byte-for-byte as written.
    pub fn raw_code(&self) -> &str {
        &self.raw_code
    }

    /// The resolved language, or [`DEFAULT_LANG`] if preprocess has not run.
    pub fn resolved_lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    /// Text for the block header: the title when set, otherwise the language.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            self.resolved_lang()
        } else {
            &self.title
        }
    }
}
