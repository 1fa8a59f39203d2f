//! Terminal styling and color utilities.

/// ANSI escape codes used by the text renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for airport codes.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary details.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for calm weather.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for moderate weather penalties.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for severe weather penalties.
    pub const RED: &str = "\x1b[31m";
}

/// Penalty (percent) from which weather is shown as moderate.
const MODERATE_PENALTY: f64 = 10.0;
/// Penalty (percent) from which weather is shown as severe.
const SEVERE_PENALTY: f64 = 30.0;

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            orange: "",
            red: "",
        }
    }

    /// Palette matching the current terminal's capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Color for a weather penalty in percent.
    #[must_use]
    pub fn penalty(&self, penalty: f64) -> &'static str {
        if penalty >= SEVERE_PENALTY {
            self.red
        } else if penalty >= MODERATE_PENALTY {
            self.orange
        } else {
            self.green
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Honors `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_has_no_escape_codes() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.penalty(45.0).is_empty());
    }

    #[test]
    fn penalty_colors_follow_severity() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.penalty(0.0), colors::GREEN);
        assert_eq!(palette.penalty(20.0), colors::ORANGE);
        assert_eq!(palette.penalty(30.0), colors::RED);
    }
}
