//! Rule table for code block attribute strings.
//!
//! Each rule owns one regex and one decoder. Rules run independently against
//! the whole attribute string, so one attribute never affects another and
//! unknown tokens simply go unmatched.

use super::BlockMeta;
use lazy_static::lazy_static;
use regex::Regex;

/// A single recognized attribute.
struct MetaRule {
    name: &'static str,
    pattern: Regex,
    apply: fn(&mut BlockMeta, &str),
}

lazy_static! {
    static ref META_RULES: Vec<MetaRule> = vec![
        MetaRule {
            name: "title",
            pattern: Regex::new(r#"title="(?P<value>[^"]*)""#).unwrap(),
            apply: |meta, value| meta.title = value.to_string(),
        },
        MetaRule {
            name: "displayLineNumbers",
            pattern: Regex::new(r#"displayLineNumbers="(?P<value>true|false)""#).unwrap(),
            apply: |meta, value| meta.display_line_numbers = Some(value == "true"),
        },
        MetaRule {
            name: "allowCopy",
            pattern: Regex::new(r#"allowCopy="(?P<value>true|false)""#).unwrap(),
            apply: |meta, value| meta.allow_copy = Some(value == "true"),
        },
    ];
}

/// Parses a code block attribute string into [`BlockMeta`].
///
/// Recognized attributes are `title="…"`, `displayLineNumbers="true|false"`
/// and `allowCopy="true|false"`. Anything else is ignored, and a missing or
/// malformed attribute leaves its field at the default. This never fails.
///
/// ## Examples
///
/// ```
/// use folio_lib::markdown::meta::parse_meta;
///
/// let meta = parse_meta(r#"title="Server" displayLineNumbers="true""#);
/// assert_eq!(meta.title, "Server");
/// assert_eq!(meta.display_line_numbers, Some(true));
/// assert_eq!(meta.allow_copy, None);
///
/// let empty = parse_meta("");
/// assert_eq!(empty.title, "");
/// assert_eq!(empty.lang, None);
/// ```
pub fn parse_meta(meta_string: &str) -> BlockMeta {
    let mut meta = BlockMeta::default();

    for rule in META_RULES.iter() {
        if let Some(value) = rule
            .pattern
            .captures(meta_string)
            .and_then(|captures| captures.name("value"))
        {
            tracing::trace!(attribute = rule.name, value = value.as_str(), "Matched code block attribute");
            (rule.apply)(&mut meta, value.as_str());
        }
    }

    meta
}

/// Splits a fenced block info string into its language token and attribute string.
///
/// The language is the first whitespace-delimited token; everything after it
/// is the attribute string. An info string that is empty or starts with
/// whitespace has no language.
///
/// ## Examples
///
/// ```
/// use folio_lib::markdown::meta::split_info_string;
///
/// assert_eq!(split_info_string(r#"rust title="x""#), (Some("rust"), r#"title="x""#));
/// assert_eq!(split_info_string("python"), (Some("python"), ""));
/// assert_eq!(split_info_string(""), (None, ""));
/// ```
pub fn split_info_string(info: &str) -> (Option<&str>, &str) {
    let info = info.trim_end();
    match info.split_once(char::is_whitespace) {
        Some(("", rest)) => (None, rest.trim_start()),
        Some((lang, rest)) => (Some(lang), rest.trim_start()),
        None if info.is_empty() => (None, ""),
        None => (Some(info), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_empty_string() {
        let meta = parse_meta("");
        assert_eq!(meta, BlockMeta::default());
    }

    #[test]
    fn test_parse_title() {
        let meta = parse_meta(r#"title="Main function""#);
        assert_eq!(meta.title, "Main function");
    }

    #[test]
    fn test_parse_empty_title() {
        let meta = parse_meta(r#"title="""#);
        assert_eq!(meta.title, "");
    }

    #[test]
    fn test_parse_booleans() {
        let meta = parse_meta(r#"displayLineNumbers="true" allowCopy="false""#);
        assert_eq!(meta.display_line_numbers, Some(true));
        assert_eq!(meta.allow_copy, Some(false));

        let meta = parse_meta(r#"displayLineNumbers="false" allowCopy="true""#);
        assert_eq!(meta.display_line_numbers, Some(false));
        assert_eq!(meta.allow_copy, Some(true));
    }

    #[test]
    fn test_parse_boolean_requires_exact_literal() {
        let meta = parse_meta(r#"displayLineNumbers="yes" allowCopy=true allowCopy="TRUE""#);
        assert_eq!(meta.display_line_numbers, None);
        assert_eq!(meta.allow_copy, None);
    }

    #[test]
    fn test_parse_attributes_are_independent() {
        let meta = parse_meta(r#"allowCopy="false" title="a" displayLineNumbers="true""#);
        assert_eq!(meta.title, "a");
        assert_eq!(meta.display_line_numbers, Some(true));
        assert_eq!(meta.allow_copy, Some(false));
    }

    #[test]
    fn test_parse_ignores_unknown_tokens() {
        let meta = parse_meta(r#"{1,3} showLineNumbers foo="bar" title="Kept""#);
        assert_eq!(meta.title, "Kept");
        assert_eq!(meta.display_line_numbers, None);
    }

    #[test]
    fn test_parse_unterminated_title_is_ignored() {
        let meta = parse_meta(r#"title="never closed"#);
        assert_eq!(meta.title, "");
    }

    #[test]
    fn test_parse_first_valid_boolean_wins() {
        let meta = parse_meta(r#"displayLineNumbers="maybe" displayLineNumbers="true""#);
        assert_eq!(meta.display_line_numbers, Some(true));
    }

    #[test]
    fn test_parse_leaves_lang_unset() {
        let meta = parse_meta(r#"title="x""#);
        assert_eq!(meta.lang, None);
        assert_eq!(meta.raw_code(), "");
    }

    #[test]
    fn test_split_info_string_with_meta() {
        assert_eq!(
            split_info_string(r#"ts title="Greet"  allowCopy="false""#),
            (Some("ts"), r#"title="Greet"  allowCopy="false""#)
        );
    }

    #[test]
    fn test_split_info_string_whitespace_only() {
        assert_eq!(split_info_string("   "), (None, ""));
    }

    #[test]
    fn test_split_info_string_leading_whitespace() {
        assert_eq!(split_info_string(r#" title="x""#), (None, r#"title="x""#));
    }

    proptest! {
        #[test]
        fn prop_title_is_extracted(prefix in "[a-z ]{0,10}", title in "[^\"]{0,20}", suffix in "[a-z ]{0,10}") {
            let meta = parse_meta(&format!(r#"{prefix} title="{title}" {suffix}"#));
            prop_assert_eq!(meta.title, title);
        }

        #[test]
        fn prop_title_defaults_without_token(s in "[^=]{0,40}") {
            prop_assert_eq!(parse_meta(&s).title, "");
        }

        #[test]
        fn prop_never_panics(s in "\\PC{0,60}") {
            let _ = parse_meta(&s);
        }
    }
}
