use ratatui::style::{Color, Modifier};

use crate::config::ColorConfig;

/// Colors resolved once from the config strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub foreground: Color,
    pub background: Color,
    pub border: Color,
    pub accent: Color,
    pub trail: Color,
    pub trail_tail: Color,
    pub glow: Color,
    pub dot: Color,
    pub gauge: Color,
    pub text_result: Color,
    pub gif_result: Color,
    pub error_result: Color,
    pub prompt: Color,
    pub banner: Color,
    pub title_modifier: Modifier,
}

impl Theme {
    pub fn from_config(colors: &ColorConfig) -> Self {
        Self {
            foreground: parse_color(&colors.foreground),
            background: parse_color(&colors.background),
            border: parse_color(&colors.border),
            accent: parse_color(&colors.accent),
            trail: parse_color(&colors.trail),
            trail_tail: parse_color(&colors.trail_tail),
            glow: parse_color(&colors.glow),
            dot: parse_color(&colors.dot),
            gauge: parse_color(&colors.gauge),
            text_result: parse_color(&colors.text_result),
            gif_result: parse_color(&colors.gif_result),
            error_result: parse_color(&colors.error_result),
            prompt: parse_color(&colors.prompt),
            banner: parse_color(&colors.banner),
            title_modifier: parse_modifier(&colors.title_modifier),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}

// ============================================================================
// COLOR PARSING
// ============================================================================

/// Named ANSI color or `#RRGGBB`. Anything else falls back to white.
pub fn parse_color(color_str: &str) -> Color {
    let name = color_str.to_lowercase();
    match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        hex if hex.starts_with('#') => parse_hex(hex).unwrap_or_else(|| {
            tracing::warn!(color = color_str, "invalid hex color, using white");
            Color::White
        }),
        _ => {
            tracing::warn!(color = color_str, "unknown color name, using white");
            Color::White
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn parse_modifier(modifiers: &[String]) -> Modifier {
    modifiers
        .iter()
        .fold(Modifier::empty(), |acc, name| match name.to_lowercase().as_str() {
            "bold" => acc | Modifier::BOLD,
            "italic" => acc | Modifier::ITALIC,
            "underlined" => acc | Modifier::UNDERLINED,
            "slowblink" => acc | Modifier::SLOW_BLINK,
            "rapidblink" => acc | Modifier::RAPID_BLINK,
            "reversed" => acc | Modifier::REVERSED,
            "hidden" => acc | Modifier::HIDDEN,
            "crossedout" => acc | Modifier::CROSSED_OUT,
            _ => {
                tracing::warn!(modifier = %name, "unknown text modifier ignored");
                acc
            }
        })
}

// ============================================================================
// FADING
// ============================================================================

/// Approximate RGB value of a color, using xterm defaults for named colors.
pub fn to_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        _ => (255, 255, 255),
    }
}

/// Blends `color` toward black; `alpha` 1.0 keeps it, 0.0 yields black.
pub fn fade(color: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let (r, g, b) = to_rgb(color);
    let scale = |c: u8| (f64::from(c) * alpha).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Linear interpolation between two colors, `t` in [0, 1].
pub fn mix(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (r1, g1, b1) = to_rgb(from);
    let (r2, g2, b2) = to_rgb(to);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
}
