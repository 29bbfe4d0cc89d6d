//! Text styling and Helvetica width estimates

use crate::style::Color;

/// Font weight of a text item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Size, weight and optional color override of a text item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f64,
    pub weight: FontWeight,
    /// `None` uses the axes text color
    pub color: Option<Color>,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

/// A string together with its style
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Estimated advance width in points
    pub fn width(&self) -> f64 {
        text_width(&self.content, self.style.size, self.style.weight)
    }
}

// Advance widths in 1/1000 em for ASCII 32..=126
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, //
];

/// Width used for characters outside the table
const FALLBACK_WIDTH: u16 = 556;

/// Estimate the advance width of `text` set in Helvetica at `size` points
pub fn text_width(text: &str, size: f64, weight: FontWeight) -> f64 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                table[code - 32] as u32
            } else {
                FALLBACK_WIDTH as u32
            }
        })
        .sum();
    units as f64 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert!((text_width("i", 10.0, FontWeight::Normal) - 2.22).abs() < 1e-9);
        assert!((text_width("W", 1000.0, FontWeight::Normal) - 944.0).abs() < 1e-9);
        assert_eq!(text_width("", 12.0, FontWeight::Bold), 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width("Temperature", 10.0, FontWeight::Normal);
        let bold = text_width("Temperature", 10.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_text_style_builder() {
        let style = TextStyle::new(11.0).bold();
        assert!(style.is_bold());
        assert_eq!(style.color, None);
        let text = Text::new("ab", style);
        assert!((text.width() - 11.0 * 1.167).abs() < 1e-9);
    }
}
