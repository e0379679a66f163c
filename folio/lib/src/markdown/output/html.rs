//! HTML output with dual-theme syntax highlighting for code blocks and prose.
//!
//! The renderer walks pulldown-cmark events once. Headings, links, images,
//! code blocks and tables are dispatched through [`ElementKind`]; everything
//! else becomes plain prose markup. Raw HTML in the source is escaped.
//!
//! ## Examples
//!
//! ```
//! use folio_lib::markdown::output::{HtmlOptions, HtmlRenderer};
//!
//! let options = HtmlOptions::default();
//! let html = HtmlRenderer::new(&options).render("# Hello\n\nSee [the guide](/guide).\n");
//! assert!(html.contains(r#"<h1 id="hello">"#));
//! assert!(html.contains(r#"class="internal-link""#));
//! ```

use super::{BlockComposer, ElementKind, HeadingComposer, HtmlOptions};
use crate::copy::COPY_SCRIPT;
use crate::markdown::highlighting::{HighlightPipeline, ThemePair};
use crate::markdown::meta::{parse_meta, split_info_string};
use crate::render::link::Link;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use std::fmt::Write;

/// Class applied to every rendered image.
pub const IMAGE_CLASS: &str = "rounded-lg";

/// Markdown extensions the renderer understands.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders Markdown documents to HTML.
///
/// Rendering never fails: a code block whose language cannot be highlighted
/// degrades to plain text without affecting the rest of the document.
#[derive(Debug)]
pub struct HtmlRenderer<'a> {
    options: &'a HtmlOptions,
    pipeline: HighlightPipeline,
    blocks: BlockComposer,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            pipeline: HighlightPipeline::new(options.theme),
            blocks: BlockComposer::from(options),
        }
    }

    /// Renders `content` into a new string.
    pub fn render(&self, content: &str) -> String {
        let mut state = RenderState::default();

        if self.options.include_styles {
            state.doc.push_str(&generate_styles(self.options.theme));
        }

        for event in Parser::new_ext(content, parser_options()) {
            self.handle(&mut state, event);
        }

        if self.options.include_scripts && state.copy_buttons > 0 {
            state.doc.push_str(COPY_SCRIPT);
        }

        tracing::debug!(
            theme = %self.options.theme,
            headings = state.headings,
            code_blocks = state.code_blocks,
            bytes = state.doc.len(),
            "Rendered document"
        );

        state.doc
    }

    /// Renders `content` into any [`std::fmt::Write`].
    pub fn write<W: Write>(&self, content: &str, out: &mut W) -> std::fmt::Result {
        out.write_str(&self.render(content))
    }

    fn handle(&self, state: &mut RenderState, event: Event<'_>) {
        // Image alt text is plain; nested markup, nested images included, is flattened.
        if let Some(image) = state.image.as_mut() {
            match event {
                Event::Start(Tag::Image { .. }) => image.depth += 1,
                Event::End(TagEnd::Image) if image.depth > 0 => image.depth -= 1,
                Event::End(TagEnd::Image) => self.end_element(state, ElementKind::Image),
                Event::Text(text) | Event::Code(text) => image.alt.push_str(&text),
                Event::SoftBreak | Event::HardBreak => image.alt.push(' '),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => match ElementKind::of_tag(&tag) {
                Some(kind) => self.start_element(state, kind, tag),
                None => start_prose(state, &tag),
            },
            Event::End(tag) => match ElementKind::of_end(&tag) {
                Some(kind) => self.end_element(state, kind),
                None => end_prose(state, tag),
            },
            Event::Text(text) => {
                if let Some(code) = state.code.as_mut() {
                    code.source.push_str(&text);
                } else {
                    if let Some(heading) = state.heading.as_mut() {
                        heading.text.push_str(&text);
                    }
                    state.sink().push_str(&html_escape::encode_text(&text));
                }
            }
            Event::Code(text) => {
                if let Some(heading) = state.heading.as_mut() {
                    heading.text.push_str(&text);
                }
                let _ = write!(state.sink(), "<code>{}</code>", html_escape::encode_text(&text));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                // Raw HTML - escape it for safety
                state.sink().push_str(&html_escape::encode_text(&html));
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = state.heading.as_mut() {
                    heading.text.push(' ');
                }
                let markup = if matches!(event, Event::HardBreak) { "<br>\n" } else { "\n" };
                state.sink().push_str(markup);
            }
            Event::Rule => state.sink().push_str("<hr>\n"),
            Event::TaskListMarker(checked) => {
                let checked = if checked { " checked" } else { "" };
                let _ = write!(state.sink(), r#"<input type="checkbox" disabled{checked}> "#);
            }
            _ => {}
        }
    }

    fn start_element(&self, state: &mut RenderState, kind: ElementKind, tag: Tag<'_>) {
        match (kind, tag) {
            (ElementKind::Heading(level), _) => {
                state.heading = Some(HeadingCapture {
                    level,
                    html: String::new(),
                    text: String::new(),
                });
            }
            (ElementKind::Link, Tag::Link { dest_url, title, .. }) => {
                let link = Link::new("", dest_url.to_string()).with_title(title.to_string());
                state.sink().push_str(&link.open_tag());
            }
            (ElementKind::Image, Tag::Image { dest_url, title, .. }) => {
                state.image = Some(ImageCapture {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                    depth: 0,
                });
            }
            (ElementKind::CodeBlock, Tag::CodeBlock(block)) => {
                let info = match block {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                state.code = Some(CodeCapture {
                    info,
                    source: String::new(),
                });
            }
            (ElementKind::Table, Tag::Table(alignments)) => {
                state.table = Some(TableState {
                    alignments,
                    in_head: false,
                    column: 0,
                });
                state.sink().push_str("<table>\n");
            }
            (kind, tag) => {
                tracing::trace!(?kind, ?tag, "Mismatched element start");
            }
        }
    }

    fn end_element(&self, state: &mut RenderState, kind: ElementKind) {
        match kind {
            ElementKind::Heading(_) => {
                if let Some(heading) = state.heading.take() {
                    let html = HeadingComposer.compose(heading.level, &heading.html, &heading.text);
                    state.doc.push_str(&html);
                    state.doc.push('\n');
                    state.headings += 1;
                }
            }
            ElementKind::Link => state.sink().push_str("</a>"),
            ElementKind::Image => {
                if let Some(image) = state.image.take() {
                    let html = render_image(&image);
                    state.sink().push_str(&html);
                }
            }
            ElementKind::CodeBlock => {
                if let Some(code) = state.code.take() {
                    self.render_code_block(state, code);
                }
            }
            ElementKind::Table => {
                state.table = None;
                state.sink().push_str("</tbody>\n</table>\n");
            }
        }
    }

    fn render_code_block(&self, state: &mut RenderState, code: CodeCapture) {
        let (lang, meta_str) = split_info_string(&code.info);
        let mut meta = parse_meta(meta_str).with_raw_code(code.source);
        let tree = self.pipeline.highlight(&mut meta, lang);

        if self.blocks.shows_copy(&meta) {
            state.copy_buttons += 1;
        }
        state.code_blocks += 1;

        let _ = self.blocks.write(state.sink(), &meta, &tree);
    }
}

#[derive(Debug, Default)]
struct RenderState {
    doc: String,
    heading: Option<HeadingCapture>,
    image: Option<ImageCapture>,
    code: Option<CodeCapture>,
    table: Option<TableState>,
    headings: usize,
    code_blocks: usize,
    copy_buttons: usize,
}

impl RenderState {
    /// Where markup currently goes: the open heading, else the document.
    fn sink(&mut self) -> &mut String {
        match self.heading.as_mut() {
            Some(heading) => &mut heading.html,
            None => &mut self.doc,
        }
    }
}

#[derive(Debug)]
struct HeadingCapture {
    level: u8,
    html: String,
    text: String,
}

#[derive(Debug)]
struct ImageCapture {
    src: String,
    title: String,
    alt: String,
    /// Images opened inside this one's alt text.
    depth: usize,
}

#[derive(Debug)]
struct CodeCapture {
    info: String,
    source: String,
}

#[derive(Debug)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    column: usize,
}

fn start_prose(state: &mut RenderState, tag: &Tag<'_>) {
    let markup = match tag {
        Tag::Paragraph => "<p>".to_string(),
        Tag::Strong => "<strong>".to_string(),
        Tag::Emphasis => "<em>".to_string(),
        Tag::Strikethrough => "<del>".to_string(),
        Tag::BlockQuote(_) => "<blockquote>\n".to_string(),
        Tag::List(None) => "<ul>\n".to_string(),
        Tag::List(Some(1)) => "<ol>\n".to_string(),
        Tag::List(Some(start)) => format!("<ol start=\"{start}\">\n"),
        Tag::Item => "<li>".to_string(),
        Tag::TableHead => {
            if let Some(table) = state.table.as_mut() {
                table.in_head = true;
                table.column = 0;
            }
            "<thead>\n<tr>".to_string()
        }
        Tag::TableRow => {
            if let Some(table) = state.table.as_mut() {
                table.column = 0;
            }
            "<tr>".to_string()
        }
        Tag::TableCell => {
            let (cell, align) = match state.table.as_ref() {
                Some(table) => (
                    if table.in_head { "th" } else { "td" },
                    table.alignments.get(table.column).copied().unwrap_or(Alignment::None),
                ),
                None => ("td", Alignment::None),
            };
            match align_style(align) {
                Some(style) => format!(r#"<{cell} style="text-align: {style}">"#),
                None => format!("<{cell}>"),
            }
        }
        _ => return,
    };
    state.sink().push_str(&markup);
}

fn end_prose(state: &mut RenderState, tag: TagEnd) {
    let markup = match tag {
        TagEnd::Paragraph => "</p>\n",
        TagEnd::Strong => "</strong>",
        TagEnd::Emphasis => "</em>",
        TagEnd::Strikethrough => "</del>",
        TagEnd::BlockQuote(_) => "</blockquote>\n",
        TagEnd::List(false) => "</ul>\n",
        TagEnd::List(true) => "</ol>\n",
        TagEnd::Item => "</li>\n",
        TagEnd::TableHead => {
            if let Some(table) = state.table.as_mut() {
                table.in_head = false;
            }
            "</tr>\n</thead>\n<tbody>\n"
        }
        TagEnd::TableRow => "</tr>\n",
        TagEnd::TableCell => match state.table.as_mut() {
            Some(table) => {
                table.column += 1;
                if table.in_head { "</th>" } else { "</td>" }
            }
            None => "</td>",
        },
        _ => return,
    };
    state.sink().push_str(markup);
}

fn align_style(align: Alignment) -> Option<&'static str> {
    match align {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

fn render_image(image: &ImageCapture) -> String {
    let mut html = format!(
        r#"<img class="{IMAGE_CLASS}" src="{}" alt="{}""#,
        html_escape::encode_double_quoted_attribute(&image.src),
        html_escape::encode_double_quoted_attribute(&image.alt)
    );
    if !image.title.is_empty() {
        let _ = write!(
            html,
            r#" title="{}""#,
            html_escape::encode_double_quoted_attribute(&image.title)
        );
    }
    html.push('>');
    html
}

/// Generates the stylesheet for dual-theme code blocks.
///
/// Light colors apply by default. Dark colors apply under
/// `prefers-color-scheme: dark`, and `data-theme="dark"` or
/// `data-theme="light"` on any ancestor overrides the media query.
pub fn generate_styles(theme: ThemePair) -> String {
    format!(
        r##"<style>
/* folio: {theme} */
.code-block {{
    border-radius: 6px;
    margin: 1em 0;
    overflow: hidden;
}}

.code-block-header {{
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 0.4em 1em;
    font-size: 0.85em;
    font-weight: bold;
    border-bottom: 1px solid rgba(127, 127, 127, 0.25);
}}

.code-block-pre {{
    margin: 0;
    padding: 1em;
    overflow-x: auto;
    background-color: var(--hl-light-bg);
    color: var(--hl-light-fg);
}}

.code-block-pre span[style] {{
    color: var(--hl-light);
    font-style: var(--hl-light-fs, normal);
    font-weight: var(--hl-light-fw, normal);
    text-decoration: var(--hl-light-td, none);
}}

@media (prefers-color-scheme: dark) {{
    .code-block-pre {{
        background-color: var(--hl-dark-bg);
        color: var(--hl-dark-fg);
    }}
    .code-block-pre span[style] {{
        color: var(--hl-dark);
        font-style: var(--hl-dark-fs, normal);
        font-weight: var(--hl-dark-fw, normal);
        text-decoration: var(--hl-dark-td, none);
    }}
}}

[data-theme="dark"] .code-block-pre {{
    background-color: var(--hl-dark-bg);
    color: var(--hl-dark-fg);
}}

[data-theme="dark"] .code-block-pre span[style] {{
    color: var(--hl-dark);
    font-style: var(--hl-dark-fs, normal);
    font-weight: var(--hl-dark-fw, normal);
    text-decoration: var(--hl-dark-td, none);
}}

[data-theme="light"] .code-block-pre {{
    background-color: var(--hl-light-bg);
    color: var(--hl-light-fg);
}}

[data-theme="light"] .code-block-pre span[style] {{
    color: var(--hl-light);
    font-style: var(--hl-light-fs, normal);
    font-weight: var(--hl-light-fw, normal);
    text-decoration: var(--hl-light-td, none);
}}

.code-block-pre .line {{
    display: inline-block;
    min-height: 1em;
}}

.code-block-pre.line-numbers code {{
    counter-reset: line;
}}

.code-block-pre.line-numbers .line.has-line-number::before {{
    counter-increment: line;
    content: counter(line);
    display: inline-block;
    width: 2em;
    margin-right: 1em;
    text-align: right;
    opacity: 0.5;
    user-select: none;
}}

.copy-button {{
    cursor: pointer;
    font: inherit;
    font-size: 0.8em;
    padding: 0.2em 0.6em;
    border: 1px solid rgba(127, 127, 127, 0.4);
    border-radius: 4px;
    background: transparent;
    color: inherit;
}}

code {{
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
    font-size: 0.9em;
}}

.anchor {{
    margin-right: 0.25em;
    text-decoration: none;
}}

.anchor::before {{
    content: "#";
    opacity: 0;
}}

h1:hover .anchor::before, h2:hover .anchor::before, h3:hover .anchor::before,
h4:hover .anchor::before, h5:hover .anchor::before, h6:hover .anchor::before {{
    opacity: 0.5;
}}

img.{IMAGE_CLASS} {{
    border-radius: 0.5rem;
    max-width: 100%;
}}

table {{
    border-collapse: collapse;
}}

th, td {{
    border: 1px solid rgba(127, 127, 127, 0.4);
    padding: 0.3em 0.8em;
}}
</style>
"##
    )
}

/// Wraps rendered body markup in a complete HTML document.
pub fn wrap_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
</head>
<body>
{body}</body>
</html>
"#,
        html_escape::encode_text(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_options() -> HtmlOptions {
        let mut options = HtmlOptions::default();
        options.include_styles = false;
        options.include_scripts = false;
        options
    }

    fn render(content: &str) -> String {
        HtmlRenderer::new(&bare_options()).render(content)
    }

    #[test]
    fn test_heading_gets_anchor() {
        let html = render("## Hello & World  Test\n");
        assert!(html.contains(
            r##"<h2 id="hello-and-world-test"><a href="#hello-and-world-test" class="anchor"></a>Hello &amp; World  Test</h2>"##
        ));
    }

    #[test]
    fn test_heading_with_inline_markup() {
        let html = render("# Using `cargo` *fast*\n");
        assert!(html.contains(r#"id="using-cargo-fast""#));
        assert!(html.contains("<code>cargo</code>"));
        assert!(html.contains("<em>fast</em></h1>"));
    }

    #[test]
    fn test_multi_line_setext_heading_slug() {
        let html = render("Getting\nStarted\n=======\n");
        assert!(html.contains(r#"<h1 id="getting-started">"#));
        assert!(html.contains("Getting\nStarted</h1>"));
    }

    #[test]
    fn test_hard_break_in_heading_slug() {
        let html = render("Line one\\\nline two\n---\n");
        assert!(html.contains(r#"<h2 id="line-one-line-two">"#));
        assert!(html.contains("Line one<br>\nline two</h2>"));
    }

    #[test]
    fn test_duplicate_headings_not_deduplicated() {
        let html = render("## Usage\n\n## Usage\n");
        assert_eq!(html.matches(r#"id="usage""#).count(), 2);
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        let html = render("This is **bold**, *italic* and ~~gone~~.\n");
        assert!(html.contains("<p>This is <strong>bold</strong>, <em>italic</em> and <del>gone</del>.</p>"));
    }

    #[test]
    fn test_links_by_kind() {
        let html = render("[a](/docs) [b](#top) [c](https://example.com \"Tip\")\n");
        assert!(html.contains(r#"<a href="/docs" class="internal-link">a</a>"#));
        assert!(html.contains(r##"<a href="#top">b</a>"##));
        assert!(html.contains(
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer" title="Tip">c</a>"#
        ));
    }

    #[test]
    fn test_link_inside_heading() {
        let html = render("## See [docs](/docs)\n");
        assert!(html.contains(r#"id="see-docs""#));
        assert!(html.contains(r#"<a href="/docs" class="internal-link">docs</a></h2>"#));
    }

    #[test]
    fn test_image_markup() {
        let html = render("![A *cat*](/cat.png \"Meow\")\n");
        assert!(html.contains(r#"<img class="rounded-lg" src="/cat.png" alt="A cat" title="Meow">"#));
    }

    #[test]
    fn test_image_without_title() {
        let html = render("![logo](logo.svg)\n");
        assert!(html.contains(r#"<img class="rounded-lg" src="logo.svg" alt="logo">"#));
    }

    #[test]
    fn test_nested_image_stays_in_alt() {
        let html = render("![outer ![inner](a.png) tail](b.png)\n");
        assert!(html.contains(r#"<p><img class="rounded-lg" src="b.png" alt="outer inner tail"></p>"#));
        assert!(!html.contains("a.png"));
    }

    #[test]
    fn test_table_markup() {
        let html = render("| Name | Size |\n|:-----|-----:|\n| a | 1 |\n| b | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains(r#"<thead>
<tr><th style="text-align: left">Name</th><th style="text-align: right">Size</th></tr>
</thead>"#));
        assert!(html.contains(r#"<tr><td style="text-align: left">a</td><td style="text-align: right">1</td></tr>"#));
        assert!(html.contains("</tbody>\n</table>"));
    }

    #[test]
    fn test_lists_and_tasks() {
        let html = render("- [x] done\n- [ ] todo\n\n3. three\n4. four\n");
        assert!(html.contains(r#"<li><input type="checkbox" disabled checked> done</li>"#));
        assert!(html.contains(r#"<li><input type="checkbox" disabled> todo</li>"#));
        assert!(html.contains(r#"<ol start="3">"#));
    }

    #[test]
    fn test_raw_html_escaped() {
        let html = render("<script>alert(1)</script>\n\nInline <b>tag</b>.\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;tag&lt;/b&gt;"));
    }

    #[test]
    fn test_code_block_rendered() {
        let html = render("```rust title=\"main.rs\"\nfn main() {}\n```\n");
        assert!(html.contains(r#"<div class="code-block" data-lang="rust">"#));
        assert!(html.contains("main.rs"));
        assert!(html.contains("copy-button"));
        assert!(html.contains(r#"<span class="line has-line-number">"#));
    }

    #[test]
    fn test_indented_code_block() {
        let html = render("Text\n\n    indented code\n");
        assert!(html.contains(r#"data-lang="txt""#));
        assert!(html.contains("indented code"));
    }

    #[test]
    fn test_code_block_unknown_language_does_not_abort() {
        let html = render("```nonsense\n???\n```\n\n# After\n");
        assert!(html.contains("???"));
        assert!(html.contains(r#"<h1 id="after">"#));
    }

    #[test]
    fn test_styles_included() {
        let html = HtmlRenderer::new(&HtmlOptions::default()).render("text\n");
        assert!(html.starts_with("<style>"));
        assert!(html.contains("prefers-color-scheme: dark"));
        assert!(html.contains(r#"[data-theme="dark"]"#));
    }

    #[test]
    fn test_script_emitted_once() {
        let content = "```sh\na\n```\n\n```sh\nb\n```\n";
        let html = HtmlRenderer::new(&HtmlOptions::default()).render(content);
        assert_eq!(html.matches("<script>").count(), 1);
        assert!(html.trim_end().ends_with("</script>"));
    }

    #[test]
    fn test_script_omitted_without_copy_buttons() {
        let mut options = HtmlOptions::default();
        options.allow_copy = false;
        let html = HtmlRenderer::new(&options).render("```sh\na\n```\n");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_script_omitted_without_code() {
        let html = HtmlRenderer::new(&HtmlOptions::default()).render("# Only prose\n");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_write_matches_render() {
        let options = bare_options();
        let renderer = HtmlRenderer::new(&options);
        let mut out = String::new();
        renderer.write("# Title\n", &mut out).unwrap();
        assert_eq!(out, renderer.render("# Title\n"));
    }

    #[test]
    fn test_generate_styles_names_theme() {
        assert!(generate_styles(ThemePair::Nord).contains("/* folio: nord */"));
    }

    #[test]
    fn test_generate_styles_anchor_marker() {
        let css = generate_styles(ThemePair::Github);
        assert!(css.contains(".anchor::before {\n    content: \"#\";"));
        assert!(css.trim_end().ends_with("</style>"));
    }

    #[test]
    fn test_wrap_document() {
        let doc = wrap_document("A <b> title", "<p>x</p>\n");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>A &lt;b&gt; title</title>"));
        assert!(doc.contains("<body>\n<p>x</p>\n</body>"));
    }
}
