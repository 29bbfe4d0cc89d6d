//! Configuration for the grid compositor

/// Configuration options for composing figures onto one page
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Vertical gap added below every row and once more at the page bottom
    pub row_gap: f64,

    /// Label baseline offset from the figure's top-left corner (right, down)
    pub label_offset: (f64, f64),

    /// Label font size in points
    pub label_font_size: f64,

    /// Standard 14 base font used for labels
    pub label_font: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            row_gap: 2.0,
            label_offset: (5.0, 15.0),
            label_font_size: 10.0,
            label_font: "Helvetica-Bold".to_string(),
        }
    }
}

impl ComposeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between rows
    pub fn with_row_gap(mut self, gap: f64) -> Self {
        self.row_gap = gap;
        self
    }

    /// Set the label offset from each figure's top-left corner
    pub fn with_label_offset(mut self, dx: f64, dy: f64) -> Self {
        self.label_offset = (dx, dy);
        self
    }

    /// Set the label font size
    pub fn with_label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    /// Set the label base font
    pub fn with_label_font(mut self, font: impl Into<String>) -> Self {
        self.label_font = font.into();
        self
    }
}
