//! Grammar loading utilities for syntax highlighting.
//!
//! The syntax set comes from two-face, which bundles syntect's defaults plus
//! the extra grammars curated by the bat project (TypeScript, TOML,
//! Dockerfile, GraphQL, Protobuf, ...).

use lazy_static::lazy_static;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use two_face::syntax::extra_newlines as extra_syntax_set;

lazy_static! {
    /// Process-wide syntax set, built on first use and never rebuilt.
    static ref SYNTAX_SET: SyntaxSet = extra_syntax_set();
}

/// Returns the shared syntax set.
pub(super) fn syntax_set() -> &'static SyntaxSet {
    &SYNTAX_SET
}

/// Finds the grammar for a language token (`rust`, `ts`, `sh`, ...).
///
/// Returns `None` for languages the syntax set does not know.
pub(super) fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    let syntax_set = syntax_set();
    syntax_set
        .find_syntax_by_token(lang)
        .or_else(|| syntax_set.find_syntax_by_token(&lang.to_lowercase()))
}

/// The plain-text grammar used whenever a language cannot be resolved.
pub(super) fn plain_text() -> &'static SyntaxReference {
    syntax_set().find_syntax_plain_text()
}
