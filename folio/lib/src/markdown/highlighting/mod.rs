//! Syntax highlighting for fenced code blocks.
//!
//! The [`HighlightEngine`] bundles the shared syntax set with the dark and
//! light themes of a [`ThemePair`]. Both are process-wide statics built on
//! first use and read-only afterwards, so engines are cheap to construct and
//! safe to share between concurrent renders.
//!
//! The [`HighlightPipeline`] runs the per-block sequence:
//!
//! 1. transformer `preprocess` hooks (language resolution by default)
//! 2. tokenization into a dual-theme [`TokenTree`]
//! 3. transformer `line` hooks (line-number marker by default)
//!
//! Tokenization never fails. Unknown languages and grammar errors fall back
//! to plain text for the affected block only.
//!
//! ## Examples
//!
//! ```
//! use folio_lib::markdown::highlighting::HighlightPipeline;
//! use folio_lib::markdown::meta::parse_meta;
//!
//! let pipeline = HighlightPipeline::default();
//! let mut meta = parse_meta(r#"title="hello.py""#).with_raw_code("print('hi')\n");
//! let tree = pipeline.highlight(&mut meta, Some("python"));
//!
//! assert_eq!(meta.lang.as_deref(), Some("python"));
//! assert_eq!(tree.plain_text(), meta.raw_code());
//! assert!(tree.lines().iter().all(|l| l.has_class("has-line-number")));
//! ```

mod grammars;
mod themes;
mod tokens;
mod transformers;

pub use themes::{ColorMode, THEME_ENV_VAR, ThemePair, detect_theme};
pub use tokens::{DualColor, DualStyle, LINE_CLASS, Line, Rgb, Token, TokenStyle, TokenTree};
pub use transformers::{
    LINE_NUMBER_CLASS, LanguageResolver, LineNumberMarker, Transformer, decorate_line, preprocess,
};

use crate::markdown::meta::BlockMeta;
use lazy_static::lazy_static;
use syntect::highlighting::{Color, Highlighter, Theme as SyntectTheme};
use syntect::parsing::{ParseState, ParsingError, ScopeError, ScopeStack, SyntaxReference, SyntaxSet};
use thiserror::Error;
use tokens::split_lines;

const FALLBACK_DARK: Color = Color { r: 0x24, g: 0x29, b: 0x2e, a: 0xff };
const FALLBACK_LIGHT: Color = Color { r: 0xff, g: 0xff, b: 0xff, a: 0xff };

lazy_static! {
    /// Pipeline for the default theme pair with the default transformers.
    static ref DEFAULT_PIPELINE: HighlightPipeline = HighlightPipeline::default();
}

/// Grammar failures caught inside the tokenizer.
#[derive(Debug, Error)]
enum TokenizeError {
    #[error("grammar failed to parse line: {0}")]
    Parse(#[from] ParsingError),
    #[error("invalid scope operation: {0}")]
    Scope(#[from] ScopeError),
}

/// Read-only handle on the shared syntax set and a dark/light theme pair.
#[derive(Debug, Clone, Copy)]
pub struct HighlightEngine {
    syntax_set: &'static SyntaxSet,
    dark: &'static SyntectTheme,
    light: &'static SyntectTheme,
    theme_pair: ThemePair,
}

impl HighlightEngine {
    /// Creates an engine for a theme pair.
    ///
    /// The underlying grammars and themes are initialized once per process;
    /// this only borrows them.
    pub fn new(theme_pair: ThemePair) -> Self {
        Self {
            syntax_set: grammars::syntax_set(),
            dark: themes::load_theme(theme_pair, ColorMode::Dark),
            light: themes::load_theme(theme_pair, ColorMode::Light),
            theme_pair,
        }
    }

    /// Returns the shared syntax set.
    pub fn syntax_set(&self) -> &'static SyntaxSet {
        self.syntax_set
    }

    /// Returns the theme used for one color mode.
    pub fn theme(&self, mode: ColorMode) -> &'static SyntectTheme {
        match mode {
            ColorMode::Dark => self.dark,
            ColorMode::Light => self.light,
        }
    }

    /// Returns the theme pair.
    pub fn theme_pair(&self) -> ThemePair {
        self.theme_pair
    }

    /// Default text color for both variants.
    pub fn foreground(&self) -> DualColor {
        DualColor {
            dark: self.dark.settings.foreground.unwrap_or(FALLBACK_LIGHT).into(),
            light: self.light.settings.foreground.unwrap_or(FALLBACK_DARK).into(),
        }
    }

    /// Block background for both variants.
    pub fn background(&self) -> DualColor {
        DualColor {
            dark: self.dark.settings.background.unwrap_or(FALLBACK_DARK).into(),
            light: self.light.settings.background.unwrap_or(FALLBACK_LIGHT).into(),
        }
    }
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new(ThemePair::default())
    }
}

/// Preprocess, tokenize and decorate code blocks.
pub struct HighlightPipeline {
    engine: HighlightEngine,
    transformers: Vec<Box<dyn Transformer>>,
}

impl std::fmt::Debug for HighlightPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightPipeline")
            .field("engine", &self.engine)
            .field(
                "transformers",
                &self.transformers.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for HighlightPipeline {
    fn default() -> Self {
        Self::new(ThemePair::default())
    }
}

impl HighlightPipeline {
    /// Creates a pipeline with the default transformer chain.
    pub fn new(theme_pair: ThemePair) -> Self {
        Self::bare(theme_pair)
            .with_transformer(LanguageResolver)
            .with_transformer(LineNumberMarker)
    }

    /// Creates a pipeline with no transformers at all.
    pub fn bare(theme_pair: ThemePair) -> Self {
        Self {
            engine: HighlightEngine::new(theme_pair),
            transformers: Vec::new(),
        }
    }

    /// Returns the shared pipeline for the default theme pair.
    pub fn global() -> &'static HighlightPipeline {
        &DEFAULT_PIPELINE
    }

    /// Appends a transformer to the chain.
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    /// Returns the engine.
    pub fn engine(&self) -> &HighlightEngine {
        &self.engine
    }

    /// Runs the full per-block sequence and returns the decorated tree.
    ///
    /// `meta.lang` is resolved by the preprocess hooks before tokenization
    /// and left alone afterwards. `meta.raw_code()` is never modified.
    pub fn highlight(&self, meta: &mut BlockMeta, requested_lang: Option<&str>) -> TokenTree {
        for transformer in &self.transformers {
            transformer.preprocess(meta, requested_lang);
        }

        let mut tree = self.tokenize(meta.raw_code(), meta.resolved_lang());

        for (idx, line) in tree.lines.iter_mut().enumerate() {
            for transformer in &self.transformers {
                transformer.line(line, idx + 1);
            }
        }

        tracing::debug!(
            lang = meta.resolved_lang(),
            title = %meta.title,
            syntax = %tree.syntax,
            lines = tree.lines.len(),
            fell_back = tree.fell_back,
            "Highlighted code block"
        );

        tree
    }

    /// Tokenizes code with both themes of the pair.
    ///
    /// Unknown languages and grammar failures degrade to plain text; this
    /// never fails and the tree's [`TokenTree::plain_text`] always equals
    /// `code`.
    pub fn tokenize(&self, code: &str, lang: &str) -> TokenTree {
        let (lines, trailing_newline) = split_lines(code);

        let (syntax, mut fell_back) = match grammars::find_syntax(lang) {
            Some(syntax) => (syntax, false),
            None => {
                tracing::warn!(lang, "Unknown language, highlighting as plain text");
                (grammars::plain_text(), true)
            }
        };

        let (lines, syntax_name) = match self.tokenize_lines(&lines, syntax) {
            Ok(tokenized) => (tokenized, syntax.name.clone()),
            Err(e) => {
                tracing::warn!(lang, syntax = %syntax.name, error = %e, "Grammar failed, highlighting as plain text");
                fell_back = true;
                (self.plain_lines(&lines), grammars::plain_text().name.clone())
            }
        };

        TokenTree {
            lines,
            trailing_newline,
            syntax: syntax_name,
            fell_back,
            foreground: self.engine.foreground(),
            background: self.engine.background(),
        }
    }

    fn tokenize_lines(
        &self,
        lines: &[&str],
        syntax: &SyntaxReference,
    ) -> Result<Vec<Line>, TokenizeError> {
        let dark = Highlighter::new(self.engine.dark);
        let light = Highlighter::new(self.engine.light);
        let mut parse_state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut buffer = String::new();
        let mut out = Vec::with_capacity(lines.len());

        for line in lines {
            // Grammars from the `newlines` syntax set expect a terminated line.
            buffer.clear();
            buffer.push_str(line);
            buffer.push('\n');

            let ops = parse_state.parse_line(&buffer, self.engine.syntax_set)?;
            tracing::trace!(ops = ops.len(), "Parsed line");

            let mut tokens = Vec::new();
            let mut cursor = 0;
            for (pos, op) in &ops {
                let pos = (*pos).min(line.len());
                if pos > cursor {
                    push_token(&mut tokens, &line[cursor..pos], style_for(&stack, &dark, &light));
                    cursor = pos;
                }
                stack.apply(op)?;
            }
            if cursor < line.len() {
                push_token(&mut tokens, &line[cursor..], style_for(&stack, &dark, &light));
            }

            out.push(Line::new(tokens));
        }

        Ok(out)
    }

    fn plain_lines(&self, lines: &[&str]) -> Vec<Line> {
        let style = style_for(
            &ScopeStack::new(),
            &Highlighter::new(self.engine.dark),
            &Highlighter::new(self.engine.light),
        );
        lines
            .iter()
            .map(|line| {
                let mut tokens = Vec::new();
                push_token(&mut tokens, line, style);
                Line::new(tokens)
            })
            .collect()
    }
}

fn style_for(stack: &ScopeStack, dark: &Highlighter<'_>, light: &Highlighter<'_>) -> DualStyle {
    DualStyle {
        dark: dark.style_for_stack(stack.as_slice()).into(),
        light: light.style_for_stack(stack.as_slice()).into(),
    }
}

/// Appends text, merging with the previous token when the style matches.
fn push_token(tokens: &mut Vec<Token>, text: &str, style: DualStyle) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = tokens.last_mut()
        && last.style == style
    {
        last.text.push_str(text);
        return;
    }
    tokens.push(Token {
        text: text.to_string(),
        style,
    });
}
