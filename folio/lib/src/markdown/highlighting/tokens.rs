//! Styled token tree produced by the highlight pipeline.
//!
//! Every token carries a dark and a light style side by side. Consumers pick
//! a variant at display time; nothing here decides which one is shown.

use syntect::highlighting::{Color, FontStyle, Style};

/// Class every line starts with.
pub const LINE_CLASS: &str = "line";

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Formats as `#rrggbb`.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for Rgb {
    fn from(c: Color) -> Self {
        Self { r: c.r, g: c.g, b: c.b }
    }
}

/// Style of a token under a single theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStyle {
    pub foreground: Rgb,
    pub font_style: FontStyle,
}

impl From<Style> for TokenStyle {
    fn from(style: Style) -> Self {
        Self {
            foreground: style.foreground.into(),
            font_style: style.font_style,
        }
    }
}

/// Styles for both theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualStyle {
    pub dark: TokenStyle,
    pub light: TokenStyle,
}

/// A color under both theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualColor {
    pub dark: Rgb,
    pub light: Rgb,
}

/// A run of text sharing one dual style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: DualStyle,
}

/// One rendered line: a class list plus its tokens, without the line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub classes: Vec<String>,
    pub tokens: Vec<Token>,
}

impl Line {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            classes: vec![LINE_CLASS.to_string()],
            tokens,
        }
    }

    /// Appends a class unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    /// Whether the line carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-separated class attribute value.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// Text of the line without styling.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Highlighted representation of one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTree {
    pub(crate) lines: Vec<Line>,
    /// The source ended with a single line break that is not its own line.
    pub(crate) trailing_newline: bool,
    /// Name of the grammar that produced the tokens.
    pub(crate) syntax: String,
    /// Plain-text tokenization was substituted for the requested language.
    pub(crate) fell_back: bool,
    pub(crate) foreground: DualColor,
    pub(crate) background: DualColor,
}

impl TokenTree {
    /// The rendered lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Mutable access for line transformers.
    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// Name of the grammar that produced the tokens.
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// Whether plain text was substituted for the requested language.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    /// Default text color for both variants.
    pub fn foreground(&self) -> DualColor {
        self.foreground
    }

    /// Block background for both variants.
    pub fn background(&self) -> DualColor {
        self.background
    }

    /// Reconstructs the exact source text the tree was built from.
    ///
    /// ## Examples
    ///
    /// ```
    /// use folio_lib::markdown::highlighting::HighlightPipeline;
    ///
    /// let pipeline = HighlightPipeline::default();
    /// let code = "fn main() {\n    println!(\"hi\");\n}\n";
    /// assert_eq!(pipeline.tokenize(code, "rust").plain_text(), code);
    /// ```
    pub fn plain_text(&self) -> String {
        let mut text = self
            .lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

/// Splits source into lines, treating one final line break as a terminator.
///
/// `"a\nb\n"` yields `["a", "b"]` with the trailing flag set; `"a\n\n"`
/// yields `["a", ""]` with the flag set; `""` yields `[""]`.
pub(crate) fn split_lines(code: &str) -> (Vec<&str>, bool) {
    let (body, trailing_newline) = match code.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (code, false),
    };
    (body.split('\n').collect(), trailing_newline)
}
