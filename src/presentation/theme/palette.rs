//! Terminal colors for category styling tokens.
//!
//! Tokens are gradient class lists such as `from-blue-500 to-cyan-500`. The
//! `from-` and `to-` stops are looked up by hue name and shaded by weight.

use coolor::{Hsl, Rgb};
use ratatui::style::Color;

/// Start and end colors of a category gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPalette {
    pub start: Color,
    pub end: Color,
}

impl CategoryPalette {
    /// Parses a gradient token, falling back to `fallback` for unknown stops.
    #[must_use]
    pub fn from_token(token: &str, fallback: Color) -> Self {
        let mut start = None;
        let mut end = None;

        for class in token.split_whitespace() {
            if let Some(stop) = class.strip_prefix("from-") {
                start = start.or_else(|| tailwind_color(stop));
            } else if let Some(stop) = class.strip_prefix("to-") {
                end = end.or_else(|| tailwind_color(stop));
            } else if start.is_none() {
                start = class
                    .strip_prefix("bg-")
                    .or(Some(class))
                    .and_then(tailwind_color);
            }
        }

        let start = start.unwrap_or(fallback);
        Self {
            start,
            end: end.unwrap_or(start),
        }
    }

    /// Dark background tint of the start color, for selected cards.
    #[must_use]
    pub fn tint(&self) -> Color {
        let Color::Rgb(r, g, b) = self.start else {
            return Color::DarkGray;
        };
        let mut hsl = Rgb::new(r, g, b).to_hsl();
        hsl.l = 0.15;
        hsl.s = hsl.s.min(0.6);
        to_color(hsl)
    }
}

fn to_color(hsl: Hsl) -> Color {
    let rgb: Rgb = hsl.to_rgb();
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Resolves `<hue>-<weight>` (e.g. `cyan-500`) to a color.
fn tailwind_color(stop: &str) -> Option<Color> {
    let (hue_name, weight) = match stop.rsplit_once('-') {
        Some((hue, weight)) => (hue, weight.parse::<u16>().ok()?),
        None => (stop, 500),
    };
    let (h, s) = hue(hue_name)?;

    // 50 is near white, 950 near black.
    let lightness = (0.97 - f32::from(weight.clamp(50, 950)) / 1000.0 * 0.9).clamp(0.1, 0.95);
    Some(to_color(Hsl::new(h, s, lightness)))
}

fn hue(name: &str) -> Option<(f32, f32)> {
    let hs = match name {
        "red" => (0.0, 0.84),
        "orange" => (25.0, 0.95),
        "amber" => (38.0, 0.92),
        "yellow" => (48.0, 0.96),
        "lime" => (84.0, 0.81),
        "green" => (142.0, 0.71),
        "emerald" => (160.0, 0.84),
        "teal" => (173.0, 0.80),
        "cyan" => (189.0, 0.94),
        "sky" => (199.0, 0.89),
        "blue" => (217.0, 0.91),
        "indigo" => (239.0, 0.84),
        "violet" => (258.0, 0.90),
        "purple" => (271.0, 0.91),
        "fuchsia" => (292.0, 0.84),
        "pink" => (330.0, 0.81),
        "rose" => (350.0, 0.89),
        "slate" | "gray" | "zinc" | "neutral" | "stone" => (215.0, 0.16),
        _ => return None,
    };
    Some(hs)
}
