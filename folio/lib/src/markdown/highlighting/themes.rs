//! Theme enumeration, pairing, and loading infrastructure.
//!
//! Every rendered block carries both variants of a [`ThemePair`] at once, so
//! a pair always resolves to one dark and one light syntect theme.

use crate::markdown::MarkdownError;
use lazy_static::lazy_static;
use std::collections::HashMap;
use syntect::highlighting::Theme as SyntectTheme;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes};

/// Environment variable consulted by [`detect_theme`].
pub const THEME_ENV_VAR: &str = "FOLIO_THEME";

/// Color mode for theme resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Light color mode.
    Light,
    /// Dark color mode.
    Dark,
}

impl ColorMode {
    /// Name used in CSS custom properties (`--hl-dark`, `--hl-light`).
    pub const fn css_name(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

/// Theme pairs rendered together as dark and light variants.
///
/// ## Examples
///
/// ```
/// use folio_lib::markdown::highlighting::{ThemePair, ColorMode};
///
/// let theme = ThemePair::try_from("one-half").unwrap();
/// assert_eq!(theme, ThemePair::OneHalf);
/// assert!(theme.description(ColorMode::Light).contains("light"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ThemePair {
    /// GitHub theme pair.
    Github,
    /// Base16 Ocean theme pair.
    Base16Ocean,
    /// Gruvbox theme pair.
    Gruvbox,
    /// OneHalf theme pair.
    OneHalf,
    /// Solarized theme pair.
    Solarized,
    /// Monokai theme pair.
    Monokai,
    /// Nord theme pair (dark only).
    Nord,
    /// Dracula theme pair (dark only).
    Dracula,
}

impl Default for ThemePair {
    fn default() -> Self {
        ThemePair::Github
    }
}

impl TryFrom<&str> for ThemePair {
    type Error = MarkdownError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "github" => Ok(ThemePair::Github),
            "base-16-ocean" | "base16-ocean" => Ok(ThemePair::Base16Ocean),
            "gruvbox" => Ok(ThemePair::Gruvbox),
            "one-half" | "onehalf" => Ok(ThemePair::OneHalf),
            "solarized" => Ok(ThemePair::Solarized),
            "monokai" => Ok(ThemePair::Monokai),
            "nord" => Ok(ThemePair::Nord),
            "dracula" => Ok(ThemePair::Dracula),
            _ => Err(MarkdownError::InvalidThemeName(s.to_string())),
        }
    }
}

impl std::fmt::Display for ThemePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kebab_name())
    }
}

impl ThemePair {
    /// Resolves the pair to the concrete theme for one color mode.
    pub(crate) fn resolve(self, mode: ColorMode) -> Theme {
        match (self, mode) {
            (ThemePair::Github, ColorMode::Dark) => Theme::GithubDark,
            (ThemePair::Github, ColorMode::Light) => Theme::GithubLight,
            (ThemePair::Base16Ocean, ColorMode::Dark) => Theme::Base16OceanDark,
            (ThemePair::Base16Ocean, ColorMode::Light) => Theme::Base16OceanLight,
            (ThemePair::Gruvbox, ColorMode::Dark) => Theme::GruvboxDark,
            (ThemePair::Gruvbox, ColorMode::Light) => Theme::GruvboxLight,
            (ThemePair::OneHalf, ColorMode::Dark) => Theme::OneHalfDark,
            (ThemePair::OneHalf, ColorMode::Light) => Theme::OneHalfLight,
            (ThemePair::Solarized, ColorMode::Dark) => Theme::SolarizedDark,
            (ThemePair::Solarized, ColorMode::Light) => Theme::SolarizedLight,
            (ThemePair::Monokai, ColorMode::Dark) => Theme::MonokaiExtended,
            (ThemePair::Monokai, ColorMode::Light) => Theme::MonokaiExtendedLight,
            (ThemePair::Nord, _) => Theme::Nord,
            (ThemePair::Dracula, _) => Theme::Dracula,
        }
    }

    /// Returns the kebab-case name of this theme pair.
    ///
    /// ## Examples
    ///
    /// ```
    /// use folio_lib::markdown::highlighting::ThemePair;
    ///
    /// assert_eq!(ThemePair::Github.kebab_name(), "github");
    /// assert_eq!(ThemePair::Base16Ocean.kebab_name(), "base16-ocean");
    /// ```
    pub const fn kebab_name(self) -> &'static str {
        match self {
            ThemePair::Github => "github",
            ThemePair::Base16Ocean => "base16-ocean",
            ThemePair::Gruvbox => "gruvbox",
            ThemePair::OneHalf => "one-half",
            ThemePair::Solarized => "solarized",
            ThemePair::Monokai => "monokai",
            ThemePair::Nord => "nord",
            ThemePair::Dracula => "dracula",
        }
    }

    /// Returns a human-readable description of the theme for the given mode.
    pub fn description(self, mode: ColorMode) -> &'static str {
        THEME_DESCRIPTIONS
            .get(&self.resolve(mode))
            .copied()
            .unwrap_or("Unknown theme")
    }

    /// Returns all available theme pairs.
    pub fn all() -> &'static [ThemePair] {
        &[
            ThemePair::Github,
            ThemePair::Base16Ocean,
            ThemePair::Gruvbox,
            ThemePair::OneHalf,
            ThemePair::Solarized,
            ThemePair::Monokai,
            ThemePair::Nord,
            ThemePair::Dracula,
        ]
    }
}

/// Individual theme variants. External code uses [`ThemePair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Theme {
    GithubDark,
    GithubLight,
    Base16OceanDark,
    Base16OceanLight,
    GruvboxDark,
    GruvboxLight,
    OneHalfDark,
    OneHalfLight,
    SolarizedDark,
    SolarizedLight,
    MonokaiExtended,
    MonokaiExtendedLight,
    Nord,
    Dracula,
}

impl Theme {
    /// Returns the embedded theme name for two-face loading.
    fn to_embedded_name(self) -> EmbeddedThemeName {
        match self {
            // two-face only ships light GitHub themes; ColdarkDark stands in for the dark side.
            Theme::GithubDark => EmbeddedThemeName::ColdarkDark,
            Theme::GithubLight => EmbeddedThemeName::Github,
            Theme::Base16OceanDark => EmbeddedThemeName::Base16OceanDark,
            Theme::Base16OceanLight => EmbeddedThemeName::Base16OceanLight,
            Theme::GruvboxDark => EmbeddedThemeName::GruvboxDark,
            Theme::GruvboxLight => EmbeddedThemeName::GruvboxLight,
            Theme::OneHalfDark => EmbeddedThemeName::OneHalfDark,
            Theme::OneHalfLight => EmbeddedThemeName::OneHalfLight,
            Theme::SolarizedDark => EmbeddedThemeName::SolarizedDark,
            Theme::SolarizedLight => EmbeddedThemeName::SolarizedLight,
            Theme::MonokaiExtended => EmbeddedThemeName::MonokaiExtended,
            Theme::MonokaiExtendedLight => EmbeddedThemeName::MonokaiExtendedLight,
            Theme::Nord => EmbeddedThemeName::Nord,
            Theme::Dracula => EmbeddedThemeName::Dracula,
        }
    }
}

lazy_static! {
    /// Static lookup table for theme descriptions.
    static ref THEME_DESCRIPTIONS: HashMap<Theme, &'static str> = {
        let mut map = HashMap::new();
        map.insert(Theme::GithubDark, "GitHub dark - Coldark dark palette paired with GitHub light");
        map.insert(Theme::GithubLight, "GitHub light - clean and minimal");
        map.insert(Theme::Base16OceanDark, "Base16 Ocean dark - blue-green palette with excellent contrast");
        map.insert(Theme::Base16OceanLight, "Base16 Ocean light - soft blue-green palette for light backgrounds");
        map.insert(Theme::GruvboxDark, "Gruvbox dark - retro groove warm color palette");
        map.insert(Theme::GruvboxLight, "Gruvbox light - retro groove with cream backgrounds");
        map.insert(Theme::OneHalfDark, "OneHalf dark - balanced palette inspired by Atom's One Dark");
        map.insert(Theme::OneHalfLight, "OneHalf light - soft colors on light backgrounds");
        map.insert(Theme::SolarizedDark, "Solarized dark - precision colors for machines and people");
        map.insert(Theme::SolarizedLight, "Solarized light - precision colors on light backgrounds");
        map.insert(Theme::MonokaiExtended, "Monokai Extended dark - classic editor theme with vibrant colors");
        map.insert(Theme::MonokaiExtendedLight, "Monokai Extended light - vibrant colors on a light background");
        map.insert(Theme::Nord, "Nord - arctic, north-bluish color palette (dark only)");
        map.insert(Theme::Dracula, "Dracula - dark theme with vibrant purple and pink accents (dark only)");
        map
    };

    /// Lazily loaded theme set from two-face.
    static ref THEME_SET: EmbeddedLazyThemeSet = extra_themes();
}

/// Returns the process-wide syntect theme for a pair and color mode.
///
/// Themes are deserialized on first use and shared read-only afterwards.
pub(super) fn load_theme(theme_pair: ThemePair, color_mode: ColorMode) -> &'static SyntectTheme {
    let embedded_name = theme_pair.resolve(color_mode).to_embedded_name();
    THEME_SET.get(embedded_name)
}

/// Reads the theme pair from the `FOLIO_THEME` environment variable.
///
/// Falls back to [`ThemePair::Github`] when the variable is unset or invalid.
pub fn detect_theme() -> ThemePair {
    let env_value = std::env::var(THEME_ENV_VAR).ok();
    let theme = match env_value.as_deref().map(ThemePair::try_from) {
        Some(Ok(theme)) => theme,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Ignoring {}", THEME_ENV_VAR);
            ThemePair::default()
        }
        None => ThemePair::default(),
    };

    tracing::info!(
        theme = %theme.kebab_name(),
        env_var = env_value.as_deref(),
        "Detected theme"
    );

    theme
}
