//! Final markup for one highlighted code block.
//!
//! ```html
//! <div class="code-block" data-lang="rust">
//! <div class="code-block-header"><span class="code-block-title">main.rs</span><button ...>Copy</button></div>
//! <pre class="code-block-pre line-numbers" style="--hl-light-bg:...;--hl-dark-bg:..."><code class="language-rust">
//! <span class="line has-line-number"><span style="--hl-light:#..;--hl-dark:#..">fn</span>...</span>
//! </code></pre>
//! </div>
//! ```
//!
//! Colors for both theme variants are emitted as CSS custom properties; the
//! stylesheet picks one.

use super::HtmlOptions;
use crate::copy::COPY_LABEL;
use crate::markdown::highlighting::{ColorMode, DualColor, Line, TokenStyle, TokenTree};
use crate::markdown::meta::BlockMeta;
use std::fmt::Write;
use syntect::highlighting::FontStyle;

/// Class on the `<pre>` when line numbers are shown.
pub const LINE_NUMBERS_CLASS: &str = "line-numbers";

/// Class on the copy trigger; the embedded script listens for it.
pub const COPY_BUTTON_CLASS: &str = "copy-button";

/// Renders code blocks, resolving per-block settings against document defaults.
#[derive(Debug, Clone, Copy)]
pub struct BlockComposer {
    line_numbers: bool,
    allow_copy: bool,
}

impl Default for BlockComposer {
    fn default() -> Self {
        Self {
            line_numbers: false,
            allow_copy: true,
        }
    }
}

impl From<&HtmlOptions> for BlockComposer {
    fn from(options: &HtmlOptions) -> Self {
        Self {
            line_numbers: options.line_numbers,
            allow_copy: options.allow_copy,
        }
    }
}

impl BlockComposer {
    /// Creates a composer with explicit defaults for blocks that do not say.
    pub fn new(line_numbers: bool, allow_copy: bool) -> Self {
        Self {
            line_numbers,
            allow_copy,
        }
    }

    /// Whether this block shows line numbers.
    pub fn shows_line_numbers(&self, meta: &BlockMeta) -> bool {
        meta.display_line_numbers.unwrap_or(self.line_numbers)
    }

    /// Whether this block gets a copy button.
    pub fn shows_copy(&self, meta: &BlockMeta) -> bool {
        meta.allow_copy.unwrap_or(self.allow_copy)
    }

    /// Renders the block.
    ///
    /// ## Examples
    ///
    /// ```
    /// use folio_lib::markdown::highlighting::HighlightPipeline;
    /// use folio_lib::markdown::meta::parse_meta;
    /// use folio_lib::markdown::output::BlockComposer;
    ///
    /// let mut meta = parse_meta(r#"title="hi.sh" allowCopy="false""#).with_raw_code("echo hi\n");
    /// let tree = HighlightPipeline::global().highlight(&mut meta, Some("sh"));
    /// let html = BlockComposer::default().compose(&meta, &tree);
    ///
    /// assert!(html.contains("hi.sh"));
    /// assert!(!html.contains("copy-button"));
    /// ```
    pub fn compose(&self, meta: &BlockMeta, tree: &TokenTree) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut out, meta, tree);
        out
    }

    /// Streams the block into any [`std::fmt::Write`].
    pub fn write<W: Write>(&self, out: &mut W, meta: &BlockMeta, tree: &TokenTree) -> std::fmt::Result {
        let lang = meta.resolved_lang();

        writeln!(
            out,
            r#"<div class="code-block" data-lang="{}">"#,
            html_escape::encode_double_quoted_attribute(lang)
        )?;

        write!(
            out,
            r#"<div class="code-block-header"><span class="code-block-title">{}</span>"#,
            html_escape::encode_text(meta.label())
        )?;
        if self.shows_copy(meta) {
            write!(
                out,
                r#"<button type="button" class="{COPY_BUTTON_CLASS}" data-code="{}">{COPY_LABEL}</button>"#,
                html_escape::encode_double_quoted_attribute(meta.raw_code())
            )?;
        }
        out.write_str("</div>\n")?;

        let pre_class = if self.shows_line_numbers(meta) {
            format!("code-block-pre {LINE_NUMBERS_CLASS}")
        } else {
            "code-block-pre".to_string()
        };
        write!(
            out,
            r#"<pre class="{pre_class}" style="{}"><code class="language-{}">"#,
            block_style(tree.background(), tree.foreground()),
            html_escape::encode_double_quoted_attribute(lang)
        )?;

        for (idx, line) in tree.lines().iter().enumerate() {
            if idx > 0 {
                out.write_char('\n')?;
            }
            write_line(out, line)?;
        }
        if tree.trailing_newline {
            out.write_char('\n')?;
        }

        out.write_str("</code></pre>\n</div>\n")
    }
}

fn write_line<W: Write>(out: &mut W, line: &Line) -> std::fmt::Result {
    write!(
        out,
        r#"<span class="{}">"#,
        html_escape::encode_double_quoted_attribute(&line.class_attr())
    )?;
    for token in &line.tokens {
        write!(
            out,
            r#"<span style="{}">{}</span>"#,
            token_style(token.style.light, token.style.dark),
            html_escape::encode_text(&token.text)
        )?;
    }
    out.write_str("</span>")
}

/// Inline custom properties for one token.
pub(crate) fn token_style(light: TokenStyle, dark: TokenStyle) -> String {
    let mut style = format!(
        "--hl-light:{};--hl-dark:{}",
        light.foreground.hex(),
        dark.foreground.hex()
    );
    push_font_style(&mut style, ColorMode::Light, light.font_style);
    push_font_style(&mut style, ColorMode::Dark, dark.font_style);
    style
}

fn push_font_style(style: &mut String, mode: ColorMode, font_style: FontStyle) {
    let variant = mode.css_name();
    if font_style.contains(FontStyle::ITALIC) {
        let _ = write!(style, ";--hl-{variant}-fs:italic");
    }
    if font_style.contains(FontStyle::BOLD) {
        let _ = write!(style, ";--hl-{variant}-fw:bold");
    }
    if font_style.contains(FontStyle::UNDERLINE) {
        let _ = write!(style, ";--hl-{variant}-td:underline");
    }
}

fn block_style(background: DualColor, foreground: DualColor) -> String {
    format!(
        "--hl-light-bg:{};--hl-dark-bg:{};--hl-light-fg:{};--hl-dark-fg:{}",
        background.light.hex(),
        background.dark.hex(),
        foreground.light.hex(),
        foreground.dark.hex()
    )
}
