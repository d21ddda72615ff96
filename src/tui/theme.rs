//! Centralized theme and color scheme for the TUI.
//!
//! Health tiers map to the same green/orange/red progression in every
//! theme so a score reads the same on every tab.

use crate::model::Category;
use crate::score::HealthTier;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Color scheme for the TUI application.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // Health tier colors
    pub healthy: Color,
    pub neutral: Color,
    pub harmful: Color,

    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Text on colored badge backgrounds
    pub badge_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Const dark theme for static initialization
    const fn dark_const() -> Self {
        Self {
            healthy: Color::Green,
            neutral: Color::Rgb(255, 165, 0),
            harmful: Color::Red,

            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(30, 30, 40),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(60, 60, 80),

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            badge_fg: Color::Black,
        }
    }

    #[must_use]
    pub const fn dark() -> Self {
        Self::dark_const()
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            healthy: Color::Rgb(0, 128, 0),
            neutral: Color::Rgb(200, 100, 0),
            harmful: Color::Rgb(180, 0, 0),

            primary: Color::Blue,
            accent: Color::Rgb(150, 80, 0),
            muted: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
            background_alt: Color::Rgb(235, 235, 240),
            text: Color::Black,
            text_muted: Color::DarkGray,
            selection: Color::Rgb(200, 210, 230),

            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(200, 100, 0),
            error: Color::Rgb(180, 0, 0),

            badge_fg: Color::White,
        }
    }

    #[must_use]
    pub const fn high_contrast() -> Self {
        Self {
            healthy: Color::LightGreen,
            neutral: Color::LightYellow,
            harmful: Color::LightRed,

            primary: Color::White,
            accent: Color::LightYellow,
            muted: Color::White,
            border: Color::White,
            border_focused: Color::LightYellow,
            background_alt: Color::Black,
            text: Color::White,
            text_muted: Color::White,
            selection: Color::Blue,

            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,

            badge_fg: Color::Black,
        }
    }

    /// Color of a score's health tier.
    #[must_use]
    pub const fn tier_color(&self, tier: HealthTier) -> Color {
        match tier {
            HealthTier::Healthy => self.healthy,
            HealthTier::Neutral => self.neutral,
            HealthTier::Harmful => self.harmful,
        }
    }

    #[must_use]
    pub const fn score_color(&self, score: u8) -> Color {
        self.tier_color(HealthTier::from_score(score))
    }

    /// Color of a backend-assigned ingredient category.
    #[must_use]
    pub const fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Healthy => self.healthy,
            Category::Neutral => self.neutral,
            Category::Harmful => self.harmful,
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark_const());

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    const fn dark_const() -> Self {
        Self {
            colors: ColorScheme::dark_const(),
            name: "dark",
        }
    }

    #[must_use]
    pub const fn dark() -> Self {
        Self::dark_const()
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    #[must_use]
    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    #[must_use]
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Get the current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Common styles
// ============================================================================

/// Pre-built styles for common UI elements.
pub struct Styles;

impl Styles {
    pub fn section_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn selected() -> Style {
        Style::default().bg(colors().selection).bold()
    }

    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Bold text in the tier color of `score`.
    pub fn score(score: u8) -> Style {
        Style::default().fg(colors().score_color(score)).bold()
    }
}

// ============================================================================
// Footer hints
// ============================================================================

/// Keyboard hints shown in the footer.
pub struct FooterHints;

impl FooterHints {
    /// Hints for a tab, followed by the global ones.
    #[must_use]
    pub fn for_tab(tab: crate::session::TabKind) -> Vec<(&'static str, &'static str)> {
        use crate::session::TabKind;

        let mut hints = match tab {
            TabKind::Scanner => vec![("e", "path"), ("Enter", "scan")],
            TabKind::Details => vec![("↑↓", "scroll")],
            TabKind::Rating => vec![("r", "refresh")],
            TabKind::History => vec![
                ("↑↓", "select"),
                ("Enter", "details"),
                ("/", "search"),
                ("r", "refresh"),
            ],
        };
        hints.extend(Self::global());
        hints
    }

    #[must_use]
    pub fn global() -> Vec<(&'static str, &'static str)> {
        vec![("Tab", "switch"), ("t", "theme"), ("?", "help"), ("q", "quit")]
    }
}

/// Render footer hints as styled spans.
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled(format!(" {desc}"), Styles::shortcut_desc()));
    }
    spans
}
