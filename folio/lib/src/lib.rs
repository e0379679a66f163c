//! Documentation rendering with annotated, syntax-highlighted code blocks.
//!
//! Folio turns markdown documentation into presentational HTML. Fenced code
//! blocks get a title row, an optional copy button, optional line numbers and
//! dual-theme (dark + light) syntax highlighting. Headings get stable anchor ids.
//!
//! ## Modules
//!
//! - [`markdown`] - Document type, code block metadata, highlighting and HTML output
//! - [`render`] - Link classification
//! - [`copy`] - Copy-to-clipboard affordance with debounced label revert
//!
//! ## Examples
//!
//! ```
//! use folio_lib::markdown::Markdown;
//! use folio_lib::markdown::output::HtmlOptions;
//!
//! let md: Markdown = "## Install & Run\n\n```sh title=\"Setup\"\ncargo run\n```\n".into();
//! let html = md.as_html(&HtmlOptions::default());
//! assert!(html.contains(r#"id="install-and-run""#));
//! assert!(html.contains("Setup"));
//! ```

pub mod copy;
pub mod markdown;
pub mod render;
