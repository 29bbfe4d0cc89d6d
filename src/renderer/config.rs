//! Configuration for saving figures

use crate::style::{gray, Color};

/// Options for writing a rendered figure
#[derive(Debug, Clone, PartialEq)]
pub struct SaveConfig {
    /// Output resolution. Sets the pixel size of SVG output; PDF output is
    /// always sized in points.
    pub dpi: f64,

    /// Crop the output to the drawn content plus `pad_inches`
    pub trim: bool,

    /// Padding kept around the content when trimming
    pub pad_inches: f64,

    /// Page background, `None` for transparent
    pub background: Option<Color>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dpi: 100.0,
            trim: false,
            pad_inches: 0.1,
            background: Some(gray(1.0)),
        }
    }
}

impl SaveConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_pad_inches(mut self, pad: f64) -> Self {
        self.pad_inches = pad;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Leave the background unpainted
    pub fn transparent(mut self) -> Self {
        self.background = None;
        self
    }
}
