use coolor::Rgb;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

use super::palette::CategoryPalette;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub title_style: Style,
    pub base_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan")
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let selection_bg = match accent {
            Color::Rgb(r, g, b) => {
                let mut hsl = Rgb::new(r, g, b).to_hsl();
                hsl.l = 0.2;
                hsl.s = 0.3;
                let rgb: Rgb = hsl.to_rgb();
                Color::Rgb(rgb.r, rgb.g, rgb.b)
            }
            _ => Color::DarkGray,
        };

        Self {
            accent,
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            dimmed_style: Style::default().fg(Color::DarkGray),
            title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            base_style: Style::default().fg(Color::Reset),
        }
    }

    /// Palette for a category's styling token.
    #[must_use]
    pub fn category(&self, token: &str) -> CategoryPalette {
        CategoryPalette::from_token(token, self.accent)
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    Color::Cyan
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => {
            let double = |i: usize| channel(&s[i..=i].repeat(2));
            Some((double(0)?, double(1)?, double(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Red"), Color::Red);
        assert_eq!(parse_color("magenta"), Color::Magenta);
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("not-a-color"), Color::Cyan);
    }

    #[test]
    fn test_named_accent_uses_gray_selection() {
        let theme = Theme::new("Yellow");
        assert_eq!(theme.selection_style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn test_category_palette_falls_back_to_accent() {
        let theme = Theme::new("Green");
        assert_eq!(theme.category("unknown").start, Color::Green);
    }
}
