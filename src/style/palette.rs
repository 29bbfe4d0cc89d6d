//! Named color palettes
//!
//! Qualitative palettes are fixed lists that cycle when more colors are
//! requested than they hold. `hls` and `husl` are generated with evenly
//! spaced hues, so every request gets distinct colors.

use std::str::FromStr;

use palette::{Hsl, Hsluv, IntoColor, Srgb};

use super::error::StyleError;

/// An sRGB color with 8-bit channels
pub type Color = Srgb<u8>;

const DEEP: [&str; 10] = [
    "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3", "#8C8C8C",
    "#CCB974", "#64B5CD",
];

const MUTED: [&str; 10] = [
    "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0", "#797979",
    "#D5BB67", "#82C6E2",
];

const PASTEL: [&str; 10] = [
    "#A1C9F4", "#FFB482", "#8DE5A1", "#FF9F9B", "#D0BBFF", "#DEBB9B", "#FAB0E4", "#CFCFCF",
    "#FFFEA3", "#B9F2F0",
];

const BRIGHT: [&str; 10] = [
    "#023EFF", "#FF7C00", "#1AC938", "#E8000B", "#8B2BE2", "#9F4800", "#F14CC1", "#A3A3A3",
    "#FFC400", "#00D7FF",
];

const DARK: [&str; 10] = [
    "#001C7F", "#B1400D", "#12711C", "#8C0800", "#591E71", "#592F0D", "#A23582", "#3C3C3C",
    "#B8850A", "#006374",
];

const COLORBLIND: [&str; 10] = [
    "#0173B2", "#DE8F05", "#029E73", "#D55E00", "#CC78BC", "#CA9161", "#FBAFE4", "#949494",
    "#ECE133", "#56B4E9",
];

const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Hue offset of generated palettes, as a fraction of the circle
const HUE_START: f32 = 0.01;

/// Names accepted by [`palette_colors`]
pub const PALETTE_NAMES: [&str; 9] = [
    "deep",
    "muted",
    "pastel",
    "bright",
    "dark",
    "colorblind",
    "tab10",
    "hls",
    "husl",
];

fn qualitative(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "deep" => Some(&DEEP),
        "muted" => Some(&MUTED),
        "pastel" => Some(&PASTEL),
        "bright" => Some(&BRIGHT),
        "dark" => Some(&DARK),
        "colorblind" => Some(&COLORBLIND),
        "tab10" => Some(&TAB10),
        _ => None,
    }
}

/// Number of colors a palette yields when no count is requested
pub fn default_size(name: &str) -> Result<usize, StyleError> {
    let name = name.to_ascii_lowercase();
    match qualitative(&name) {
        Some(colors) => Ok(colors.len()),
        None if name == "hls" || name == "husl" => Ok(6),
        None => Err(StyleError::UnknownPalette(name)),
    }
}

/// Sample `n` colors from a named palette
pub fn palette_colors(name: &str, n: usize) -> Result<Vec<Color>, StyleError> {
    let name = name.to_ascii_lowercase();
    if let Some(hexes) = qualitative(&name) {
        return hexes
            .iter()
            .cycle()
            .take(n)
            .map(|hex| parse_color(&name, hex))
            .collect();
    }
    match name.as_str() {
        "hls" => Ok(hls_palette(n)),
        "husl" => Ok(husl_palette(n)),
        _ => Err(StyleError::UnknownPalette(name)),
    }
}

fn hue_fraction(i: usize, n: usize) -> f32 {
    (i as f32 / n as f32 + HUE_START).fract()
}

fn hls_palette(n: usize) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let hsl: Hsl = Hsl::new(hue_fraction(i, n) * 360.0, 0.65, 0.6);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

fn husl_palette(n: usize) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let husl: Hsluv = Hsluv::new(hue_fraction(i, n) * 359.0, 89.1, 64.35);
            let rgb: Srgb = husl.into_color();
            rgb.into_format()
        })
        .collect()
}

/// Parse a `#rrggbb` or `#rgb` color. `name` is only used in the error.
pub fn parse_color(name: &str, value: &str) -> Result<Color, StyleError> {
    Color::from_str(value.trim()).map_err(|_| StyleError::InvalidColor {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Format a color as lowercase `#rrggbb`
pub fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Shorthand for gray levels given as a fraction of white
pub(crate) fn gray(level: f64) -> Color {
    let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::new(v, v, v)
}
