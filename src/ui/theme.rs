use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub panel_bg: String,
    pub header_bg: String,
    pub header_fg: String,
    pub border: String,
    pub border_focused: String,
    pub accent: String,
    pub accent_dim: String,
    pub text_dim: String,
    pub line_number: String,
    pub placeholder: String,
    pub cursor_fg: String,
    pub cursor_bg: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("deepclone")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    #[allow(dead_code)]
    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("github-dark").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        // The original editor palette: near-black panels, indigo accent.
        Self {
            bg: "#030712".to_string(),
            fg: "#e5e7eb".to_string(),
            panel_bg: "#0d1117".to_string(),
            header_bg: "#111827".to_string(),
            header_fg: "#e5e7eb".to_string(),
            border: "#1f2937".to_string(),
            border_focused: "#6366f1".to_string(),
            accent: "#818cf8".to_string(),
            accent_dim: "#312e81".to_string(),
            text_dim: "#9ca3af".to_string(),
            line_number: "#4b5563".to_string(),
            placeholder: "#6b7280".to_string(),
            cursor_fg: "#030712".to_string(),
            cursor_bg: "#e5e7eb".to_string(),
            success: "#4ade80".to_string(),
            warning: "#facc15".to_string(),
            error: "#f87171".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }
    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }
    pub fn panel_bg(&self) -> Color {
        Self::parse_color(&self.panel_bg)
    }
    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }
    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }
    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }
    pub fn border_focused(&self) -> Color {
        Self::parse_color(&self.border_focused)
    }
    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }
    pub fn accent_dim(&self) -> Color {
        Self::parse_color(&self.accent_dim)
    }
    pub fn text_dim(&self) -> Color {
        Self::parse_color(&self.text_dim)
    }
    pub fn line_number(&self) -> Color {
        Self::parse_color(&self.line_number)
    }
    pub fn placeholder(&self) -> Color {
        Self::parse_color(&self.placeholder)
    }
    pub fn cursor_fg(&self) -> Color {
        Self::parse_color(&self.cursor_fg)
    }
    pub fn cursor_bg(&self) -> Color {
        Self::parse_color(&self.cursor_bg)
    }
    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }
    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }
    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(ThemeColors::parse_color("#0d1117"), Color::Rgb(13, 17, 23));
        assert_eq!(ThemeColors::parse_color("ffffff"), Color::Rgb(255, 255, 255));
        assert_eq!(ThemeColors::parse_color("#zzz"), Color::Reset);
    }

    #[test]
    fn test_bundled_themes_parse() {
        for name in Theme::available_themes() {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to parse");
        }
    }
}
