use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::engine::severity::Severity;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_dim: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// Resolve a theme by name: user TOML under the config dir first, then
    /// the built-in light/dark palettes.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("scorecast")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        match name {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            colors: ThemeColors {
                bg: "#f4f6fa".to_string(),
                fg: "#1c2333".to_string(),
                text_dim: "#6b7280".to_string(),
                accent: "#1976d2".to_string(),
                border: "#c4cbd8".to_string(),
                border_focused: "#1976d2".to_string(),
                header_bg: "#dbe4f0".to_string(),
                header_fg: "#1c2333".to_string(),
                bar_empty: "#dbe0ea".to_string(),
                error: "#d32f2f".to_string(),
                warning: "#ed6c02".to_string(),
                success: "#2e7d32".to_string(),
            },
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ThemeColors {
                bg: "#181c24".to_string(),
                fg: "#e3e7ef".to_string(),
                text_dim: "#8b93a7".to_string(),
                accent: "#64a0e8".to_string(),
                border: "#3a4256".to_string(),
                border_focused: "#64a0e8".to_string(),
                header_bg: "#232a3a".to_string(),
                header_fg: "#e3e7ef".to_string(),
                bar_empty: "#2a3040".to_string(),
                error: "#ef5350".to_string(),
                warning: "#ffb74d".to_string(),
                success: "#81c784".to_string(),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }
    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }
    pub fn text_dim(&self) -> Color {
        Self::parse_color(&self.text_dim)
    }
    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }
    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }
    pub fn border_focused(&self) -> Color {
        Self::parse_color(&self.border_focused)
    }
    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }
    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }
    pub fn bar_empty(&self) -> Color {
        Self::parse_color(&self.bar_empty)
    }
    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }
    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }

    /// The one severity-to-color mapping; every score display goes through
    /// here so tiers look the same on the gauge, the result card, and the
    /// history rows.
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Excellent => self.success(),
            Severity::Good => self.accent(),
            Severity::Average => self.warning(),
            Severity::Critical => self.error(),
            Severity::NoData => self.text_dim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_valid_hex() {
        assert_eq!(
            ThemeColors::parse_color("#1976d2"),
            Color::Rgb(0x19, 0x76, 0xd2)
        );
    }

    #[test]
    fn test_parse_color_invalid_falls_back() {
        assert_eq!(ThemeColors::parse_color("blue"), Color::Reset);
        assert_eq!(ThemeColors::parse_color("#12"), Color::Reset);
    }

    #[test]
    fn test_builtin_themes_resolve() {
        assert!(Theme::load("light").is_some());
        assert!(Theme::load("dark").is_some());
        assert!(Theme::load("no-such-theme").is_none());
    }
}
