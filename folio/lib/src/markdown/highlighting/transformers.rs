//! Hooks that run around tokenization.
//!
//! A [`Transformer`] can adjust block metadata before tokenization and
//! decorate each emitted line afterwards. The default chain resolves the
//! language and tags every line for line-number styling.

use super::tokens::Line;
use crate::markdown::meta::{BlockMeta, DEFAULT_LANG};

/// Class appended to every line so CSS can number lines on demand.
pub const LINE_NUMBER_CLASS: &str = "has-line-number";

/// A hook in the highlight pipeline.
pub trait Transformer: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Runs once per block, before tokenization.
    fn preprocess(&self, _meta: &mut BlockMeta, _requested_lang: Option<&str>) {}

    /// Runs for every emitted line; `line_number` is 1-based.
    fn line(&self, _line: &mut Line, _line_number: usize) {}
}

/// Sets `meta.lang` to the requested language, or `txt` when none was given.
///
/// An empty request counts as no request.
///
/// ## Examples
///
/// ```
/// use folio_lib::markdown::highlighting::preprocess;
/// use folio_lib::markdown::meta::parse_meta;
///
/// let mut meta = parse_meta("");
/// assert_eq!(meta.lang, None);
/// preprocess(&mut meta, Some("rust"));
/// assert_eq!(meta.lang.as_deref(), Some("rust"));
///
/// let mut meta = parse_meta("");
/// preprocess(&mut meta, None);
/// assert_eq!(meta.lang.as_deref(), Some("txt"));
/// ```
pub fn preprocess(meta: &mut BlockMeta, requested_lang: Option<&str>) {
    let lang = requested_lang.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LANG);
    meta.lang = Some(lang.to_string());
}

/// Appends [`LINE_NUMBER_CLASS`] to a line's class list.
///
/// Whether numbers are actually shown is decided later from
/// `BlockMeta::display_line_numbers`.
pub fn decorate_line(line: &mut Line) {
    line.add_class(LINE_NUMBER_CLASS);
}

/// Default preprocess hook: language resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageResolver;

impl Transformer for LanguageResolver {
    fn name(&self) -> &'static str {
        "language-resolver"
    }

    fn preprocess(&self, meta: &mut BlockMeta, requested_lang: Option<&str>) {
        preprocess(meta, requested_lang);
    }
}

/// Default line hook: line-number marker class.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineNumberMarker;

impl Transformer for LineNumberMarker {
    fn name(&self) -> &'static str {
        "line-number-marker"
    }

    fn line(&self, line: &mut Line, _line_number: usize) {
        decorate_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_requested_lang() {
        let mut meta = BlockMeta::default();
        preprocess(&mut meta, Some("python"));
        assert_eq!(meta.lang.as_deref(), Some("python"));
    }

    #[test]
    fn test_preprocess_defaults_to_txt() {
        let mut meta = BlockMeta::default();
        preprocess(&mut meta, None);
        assert_eq!(meta.lang.as_deref(), Some("txt"));
    }

    #[test]
    fn test_preprocess_empty_lang_defaults_to_txt() {
        let mut meta = BlockMeta::default();
        preprocess(&mut meta, Some(""));
        assert_eq!(meta.lang.as_deref(), Some("txt"));
    }

    #[test]
    fn test_preprocess_keeps_raw_code() {
        let mut meta = BlockMeta::default().with_raw_code("x = 1\n");
        preprocess(&mut meta, Some("python"));
        assert_eq!(meta.raw_code(), "x = 1\n");
    }

    #[test]
    fn test_decorate_line_appends_marker() {
        let mut line = Line::new(vec![]);
        decorate_line(&mut line);
        assert_eq!(line.classes, vec!["line", "has-line-number"]);
    }

    #[test]
    fn test_line_number_marker_transformer() {
        let mut line = Line::new(vec![]);
        LineNumberMarker.line(&mut line, 1);
        assert!(line.has_class(LINE_NUMBER_CLASS));
    }
}
