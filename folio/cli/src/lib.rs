//! # Folio CLI
//!
//! Renders documentation markdown to themed HTML with annotated,
//! syntax-highlighted code blocks and anchored headings.
//!
//! ## Usage
//!
//! ```bash
//! # Render a file to an HTML fragment
//! folio README.md > readme.html
//!
//! # Pipe content from stdin
//! cat README.md | folio
//!
//! # Complete HTML document, or open it in the browser
//! folio README.md --standalone > readme.html
//! folio README.md --show-html
//!
//! # Inspect a document
//! folio README.md --headings
//! folio README.md --blocks --json
//!
//! # Themes and code block defaults
//! folio --list-themes
//! folio README.md --theme nord --line-numbers --no-copy
//!
//! # Anchor id for arbitrary text
//! folio --slug "Install & Run"
//!
//! # Verbose output for debugging
//! folio README.md -v      # INFO level
//! folio README.md -vv     # DEBUG level
//! folio README.md -vvv    # TRACE level
//! ```
//!
//! The theme defaults to the `FOLIO_THEME` environment variable, then `github`.
//!
//! ## Library Usage
//!
//! The rendering functionality is provided by the [`folio_lib`] crate.
//!
//! ```rust,ignore
//! use folio_lib::markdown::Markdown;
//! use folio_lib::markdown::output::HtmlOptions;
//!
//! let md: Markdown = "# Hello\n\nWorld".into();
//! println!("{}", md.as_html(&HtmlOptions::default()));
//! ```

// Re-export the CLI struct for programmatic access
pub use cli::Cli;

mod cli {
    use clap::{ArgGroup, Parser};
    use folio_lib::markdown::highlighting::ThemePair;
    use folio_lib::markdown::output::HtmlOptions;
    use std::path::PathBuf;

    /// Command-line interface for the folio documentation renderer.
    ///
    /// Use `folio --help` to see all available options.
    #[derive(Parser, Debug)]
    #[command(name = "folio", about = "Documentation renderer with highlighted code blocks", version)]
    #[command(group = ArgGroup::new("output-mode")
        .args(["show_html", "headings", "blocks", "list_themes", "slug"])
        .multiple(false))]
    pub struct Cli {
        /// Input file path (reads from stdin if not provided, use "-" for explicit stdin)
        pub input: Option<PathBuf>,

        /// Theme pair for code blocks (kebab-case name)
        #[arg(long, value_parser = super::parse_theme_name)]
        pub theme: Option<ThemePair>,

        /// Show line numbers in blocks that do not set displayLineNumbers
        #[arg(long)]
        pub line_numbers: bool,

        /// Hide copy buttons in blocks that do not set allowCopy
        #[arg(long)]
        pub no_copy: bool,

        /// Omit the generated stylesheet
        #[arg(long)]
        pub no_styles: bool,

        /// Omit the copy-button script
        #[arg(long)]
        pub no_scripts: bool,

        /// Wrap the output in a complete HTML document
        #[arg(long)]
        pub standalone: bool,

        /// Generate a standalone HTML file and open it in the browser
        #[arg(long, group = "output-mode")]
        pub show_html: bool,

        /// List the document's headings with their anchor ids
        #[arg(long, group = "output-mode")]
        pub headings: bool,

        /// List the document's code blocks with their metadata
        #[arg(long, group = "output-mode")]
        pub blocks: bool,

        /// List available themes
        #[arg(long, group = "output-mode")]
        pub list_themes: bool,

        /// Print the anchor id for TEXT and exit
        #[arg(long, group = "output-mode", value_name = "TEXT")]
        pub slug: Option<String>,

        /// Output as JSON (for --headings and --blocks)
        #[arg(long)]
        pub json: bool,

        /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        pub verbose: u8,
    }

    impl Cli {
        /// Maps the rendering flags onto [`HtmlOptions`].
        pub fn html_options(&self, fallback_theme: ThemePair) -> HtmlOptions {
            let mut options = HtmlOptions::default();
            options.theme = self.theme.unwrap_or(fallback_theme);
            options.line_numbers = self.line_numbers;
            options.allow_copy = !self.no_copy;
            options.include_styles = !self.no_styles;
            options.include_scripts = !self.no_scripts;
            options
        }
    }
}

/// Parses a theme name string into ThemePair.
fn parse_theme_name(s: &str) -> Result<folio_lib::markdown::highlighting::ThemePair, String> {
    folio_lib::markdown::highlighting::ThemePair::try_from(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use folio_lib::markdown::highlighting::ThemePair;

    #[test]
    fn test_parse_theme_name() {
        assert_eq!(parse_theme_name("nord"), Ok(ThemePair::Nord));
        assert!(parse_theme_name("nope").unwrap_err().contains("Invalid theme name"));
    }

    #[test]
    fn test_html_options_mapping() {
        let cli = Cli::parse_from([
            "folio",
            "doc.md",
            "--theme",
            "dracula",
            "--line-numbers",
            "--no-copy",
            "--no-scripts",
        ]);
        let options = cli.html_options(ThemePair::Github);
        assert_eq!(options.theme, ThemePair::Dracula);
        assert!(options.line_numbers);
        assert!(!options.allow_copy);
        assert!(options.include_styles);
        assert!(!options.include_scripts);
    }

    #[test]
    fn test_fallback_theme() {
        let cli = Cli::parse_from(["folio"]);
        assert_eq!(cli.html_options(ThemePair::Gruvbox).theme, ThemePair::Gruvbox);
    }

    #[test]
    fn test_output_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["folio", "--headings", "--blocks"]).is_err());
        assert!(Cli::try_parse_from(["folio", "--slug", "x", "--list-themes"]).is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::parse_from(["folio", "-vvv"]);
        assert_eq!(cli.verbose, 3);
    }
}
