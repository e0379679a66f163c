//! Anchor slug generation for headings.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    /// Word characters are ASCII only, so accented letters are dropped.
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\-]+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Generates a URL-safe anchor slug from heading text.
///
/// The steps run in a fixed order, each on the previous result:
///
/// 1. lowercase
/// 2. trim surrounding whitespace
/// 3. replace whitespace runs with `-`
/// 4. replace `&` with `-and-`
/// 5. drop everything except ASCII word characters and `-`
/// 6. collapse hyphen runs into a single `-`
///
/// Identical input always yields identical output. Nothing tracks previously
/// issued slugs, so two headings with the same text share a slug.
///
/// ## Examples
///
/// ```
/// use folio_lib::markdown::slug::slugify;
///
/// assert_eq!(slugify("Hello & World  Test"), "hello-and-world-test");
/// assert_eq!(slugify("  What's new?  "), "whats-new");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(lowered.trim(), "-");
    let anded = hyphenated.replace('&', "-and-");
    let stripped = NON_SLUG_CHARS.replace_all(&anded, "");

    HYPHEN_RUN.replace_all(&stripped, "-").into_owned()
}
