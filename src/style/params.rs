//! Plotting defaults passed explicitly to figures
//!
//! `PlotParams` is the value a style bundle is applied to. Figures and axes
//! copy what they need from it when they are created, so changing the params
//! afterwards never affects an existing figure.

use std::fmt;
use std::str::FromStr;

use super::error::StyleError;
use super::palette::{gray, palette_colors, Color};

/// Scaling context for line widths, tick sizes and base font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotContext {
    Paper,
    #[default]
    Notebook,
    Talk,
    Poster,
}

impl PlotContext {
    /// Multiplier relative to the notebook context
    pub fn scale(self) -> f64 {
        match self {
            PlotContext::Paper => 0.8,
            PlotContext::Notebook => 1.0,
            PlotContext::Talk => 1.5,
            PlotContext::Poster => 2.0,
        }
    }
}

impl FromStr for PlotContext {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paper" => Ok(PlotContext::Paper),
            "notebook" => Ok(PlotContext::Notebook),
            "talk" => Ok(PlotContext::Talk),
            "poster" => Ok(PlotContext::Poster),
            _ => Err(StyleError::UnknownContext(s.to_string())),
        }
    }
}

impl fmt::Display for PlotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlotContext::Paper => "paper",
            PlotContext::Notebook => "notebook",
            PlotContext::Talk => "talk",
            PlotContext::Poster => "poster",
        };
        f.write_str(name)
    }
}

/// Visual style of the axes background, spines, grid and ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxesStyle {
    #[default]
    White,
    Dark,
    WhiteGrid,
    DarkGrid,
    Ticks,
}

impl FromStr for AxesStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(AxesStyle::White),
            "dark" => Ok(AxesStyle::Dark),
            "whitegrid" => Ok(AxesStyle::WhiteGrid),
            "darkgrid" => Ok(AxesStyle::DarkGrid),
            "ticks" => Ok(AxesStyle::Ticks),
            _ => Err(StyleError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for AxesStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxesStyle::White => "white",
            AxesStyle::Dark => "dark",
            AxesStyle::WhiteGrid => "whitegrid",
            AxesStyle::DarkGrid => "darkgrid",
            AxesStyle::Ticks => "ticks",
        };
        f.write_str(name)
    }
}

/// Plotting defaults consumed by [`Figure`](crate::figure::Figure)
#[derive(Debug, Clone, PartialEq)]
pub struct PlotParams {
    /// Colors assigned to successive series
    pub color_cycle: Vec<Color>,
    pub font_family: String,
    pub font_size: f64,
    pub title_size: f64,
    pub label_size: f64,
    pub xtick_label_size: f64,
    pub ytick_label_size: f64,
    pub legend_font_size: f64,
    pub line_width: f64,
    pub axes_line_width: f64,
    pub marker_size: f64,
    /// Gap between tick marks and tick labels
    pub xtick_pad: f64,
    pub ytick_pad: f64,
    pub tick_size: f64,
    pub tick_width: f64,
    pub show_ticks: bool,
    pub grid: bool,
    pub grid_color: Color,
    pub grid_line_width: f64,
    pub axes_facecolor: Color,
    pub axes_edgecolor: Color,
    pub text_color: Color,
    /// Default figure size in inches
    pub figure_size: (f64, f64),
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            color_cycle: palette_colors("tab10", 10).unwrap_or_default(),
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
            title_size: 12.0,
            label_size: 10.0,
            xtick_label_size: 10.0,
            ytick_label_size: 10.0,
            legend_font_size: 10.0,
            line_width: 1.5,
            axes_line_width: 0.8,
            marker_size: 6.0,
            xtick_pad: 3.5,
            ytick_pad: 3.5,
            tick_size: 3.5,
            tick_width: 0.8,
            show_ticks: true,
            grid: false,
            grid_color: gray(0.69),
            grid_line_width: 0.8,
            axes_facecolor: gray(1.0),
            axes_edgecolor: gray(0.0),
            text_color: gray(0.0),
            figure_size: (6.4, 4.8),
        }
    }
}

impl PlotParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset sizes to the notebook baseline scaled by `context`
    pub fn set_context(&mut self, context: PlotContext) {
        let scale = context.scale();
        self.font_size = 12.0 * scale;
        self.title_size = 12.0 * scale;
        self.label_size = 12.0 * scale;
        self.xtick_label_size = 11.0 * scale;
        self.ytick_label_size = 11.0 * scale;
        self.legend_font_size = 11.0 * scale;
        self.axes_line_width = 1.25 * scale;
        self.grid_line_width = 1.0 * scale;
        self.line_width = 1.5 * scale;
        self.marker_size = 6.0 * scale;
        self.tick_width = 1.25 * scale;
        self.tick_size = 6.0 * scale;
    }

    /// Set background, spine, grid and tick appearance
    pub fn set_style(&mut self, style: AxesStyle) {
        let dark_face = Color::new(0xea, 0xea, 0xf2);
        self.text_color = gray(0.15);
        match style {
            AxesStyle::White | AxesStyle::Ticks => {
                self.axes_facecolor = gray(1.0);
                self.axes_edgecolor = gray(0.15);
                self.grid = false;
                self.grid_color = gray(0.8);
            }
            AxesStyle::Dark => {
                self.axes_facecolor = dark_face;
                self.axes_edgecolor = gray(1.0);
                self.grid = false;
                self.grid_color = gray(1.0);
            }
            AxesStyle::WhiteGrid => {
                self.axes_facecolor = gray(1.0);
                self.axes_edgecolor = gray(0.8);
                self.grid = true;
                self.grid_color = gray(0.8);
            }
            AxesStyle::DarkGrid => {
                self.axes_facecolor = dark_face;
                self.axes_edgecolor = gray(1.0);
                self.grid = true;
                self.grid_color = gray(1.0);
            }
        }
        self.show_ticks = style == AxesStyle::Ticks;
    }

    /// Color for the `index`-th series, cycling through the color cycle
    pub fn cycle_color(&self, index: usize) -> Color {
        if self.color_cycle.is_empty() {
            return self.text_color;
        }
        self.color_cycle[index % self.color_cycle.len()]
    }
}
