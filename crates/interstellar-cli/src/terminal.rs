//! Terminal styling and color utilities.
//!
//! ANSI escape codes plus the `NO_COLOR` / `TERM=dumb` detection used when
//! printing audit findings.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse red for error badges.
    pub const TAG_ERROR: &str = "\x1b[1;7;31m";
    /// Bold reverse yellow for warning badges.
    pub const TAG_WARNING: &str = "\x1b[1;7;33m";
    /// Green for the all-clear line.
    pub const GREEN: &str = "\x1b[32m";
    /// Gray for secondary elements (codes, counts).
    pub const GRAY: &str = "\x1b[90m";
}

/// Resolved color codes, either actual ANSI sequences or empty strings when
/// color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_error: &'static str,
    pub tag_warning: &'static str,
    pub green: &'static str,
    pub gray: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_error: colors::TAG_ERROR,
            tag_warning: colors::TAG_WARNING,
            green: colors::GREEN,
            gray: colors::GRAY,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_error: "",
            tag_warning: "",
            green: "",
            gray: "",
        }
    }

    /// Pick a palette based on the current terminal.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

/// Check whether colored output should be used.
///
/// Returns `false` when `NO_COLOR` is set or `TERM` is `dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
