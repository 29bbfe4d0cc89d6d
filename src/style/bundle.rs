//! Style bundles for publication figures
//!
//! A [`FigureStyle`] holds presentation settings (palette, context, axes
//! style, font, sizes, DPI) and pushes them into an explicit [`PlotParams`].
//! Bundles can be built in code or loaded from TOML:
//!
//! ```toml
//! [style]
//! palette = "deep"
//! context = "paper"
//! style = "ticks"
//! font = "Arial"
//! font_size = 7
//! dpi = 600
//!
//! [colors]
//! control = "#333333"
//! treated = "#e41a1c"
//! ```

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::figure::{Axes, Figure, Legend, LegendOptions, Text, TextStyle};
use crate::renderer::{save_scene, SaveConfig};

use super::error::StyleError;
use super::palette::{default_size, palette_colors, parse_color, Color};
use super::params::{AxesStyle, PlotContext, PlotParams};

/// Padding kept around trimmed output
const TRIM_PAD_INCHES: f64 = 0.1;

/// A bundle of presentation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    palette: String,
    context: PlotContext,
    style: AxesStyle,
    font_family: String,
    font_size: f64,
    dpi: f64,
    line_width: f64,
    marker_size: f64,
    tick_pad: f64,
    max_width: f64,
    /// Explicit colors, in order; replaces the palette when non-empty
    colors: Vec<(String, Color)>,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            palette: "colorblind".to_string(),
            context: PlotContext::Notebook,
            style: AxesStyle::White,
            font_family: "Helvetica".to_string(),
            font_size: 6.0,
            dpi: 300.0,
            line_width: 0.85,
            marker_size: 1.0,
            tick_pad: 0.0,
            max_width: 7.0,
            colors: Vec::new(),
        }
    }
}

/// TOML structure for deserializing style bundles
#[derive(Deserialize)]
struct TomlStyleFile {
    style: Option<TomlStyle>,
    colors: Option<toml::Table>,
}

#[derive(Deserialize)]
struct TomlStyle {
    palette: Option<String>,
    context: Option<String>,
    style: Option<String>,
    font: Option<String>,
    font_size: Option<f64>,
    dpi: Option<f64>,
    line_width: Option<f64>,
    marker_size: Option<f64>,
    tick_pad: Option<f64>,
    max_width: Option<f64>,
}

impl FigureStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a style bundle from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StyleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a style bundle from a TOML string. Missing fields keep their
    /// defaults.
    pub fn from_str(content: &str) -> Result<Self, StyleError> {
        let parsed: TomlStyleFile = toml::from_str(content)?;
        let mut bundle = Self::default();

        if let Some(style) = parsed.style {
            if let Some(palette) = style.palette {
                default_size(&palette)?;
                bundle.palette = palette;
            }
            if let Some(context) = style.context {
                bundle.context = context.parse()?;
            }
            if let Some(axes_style) = style.style {
                bundle.style = axes_style.parse()?;
            }
            if let Some(font) = style.font {
                bundle.font_family = font;
            }
            bundle.font_size = style.font_size.unwrap_or(bundle.font_size);
            bundle.dpi = style.dpi.unwrap_or(bundle.dpi);
            bundle.line_width = style.line_width.unwrap_or(bundle.line_width);
            bundle.marker_size = style.marker_size.unwrap_or(bundle.marker_size);
            bundle.tick_pad = style.tick_pad.unwrap_or(bundle.tick_pad);
            bundle.max_width = style.max_width.unwrap_or(bundle.max_width);
        }

        for (name, value) in parsed.colors.unwrap_or_default() {
            let color = match value.as_str() {
                Some(hex) => parse_color(&name, hex)?,
                None => {
                    return Err(StyleError::InvalidColor {
                        name,
                        value: value.to_string(),
                    })
                }
            };
            bundle.colors.push((name, color));
        }

        Ok(bundle)
    }

    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_context(mut self, context: PlotContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_style(mut self, style: AxesStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn with_tick_pad(mut self, pad: f64) -> Self {
        self.tick_pad = pad;
        self
    }

    /// Maximum saved figure width in inches
    pub fn with_max_width(mut self, inches: f64) -> Self {
        self.max_width = inches;
        self
    }

    /// Use explicit named colors instead of the palette
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (S, Color)>,
        S: Into<String>,
    {
        self.colors = colors
            .into_iter()
            .map(|(name, color)| (name.into(), color))
            .collect();
        self
    }

    pub fn palette(&self) -> &str {
        &self.palette
    }

    pub fn context(&self) -> PlotContext {
        self.context
    }

    pub fn style(&self) -> AxesStyle {
        self.style
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Size used for titles and axis labels
    pub fn title_size(&self) -> f64 {
        self.font_size + 1.0
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    pub fn colors(&self) -> &[(String, Color)] {
        &self.colors
    }

    /// Write every parameter of the bundle into `params`.
    ///
    /// Context and axes style are applied first, then the explicit sizes
    /// override the context-scaled values. Everything set here replaces what
    /// an earlier `apply` wrote.
    pub fn apply(&self, params: &mut PlotParams) -> Result<(), StyleError> {
        let cycle = if self.colors.is_empty() {
            palette_colors(&self.palette, default_size(&self.palette)?)?
        } else {
            self.colors.iter().map(|(_, color)| *color).collect()
        };

        params.set_context(self.context);
        params.set_style(self.style);

        params.color_cycle = cycle;
        params.font_family = self.font_family.clone();
        params.font_size = self.font_size;
        params.title_size = self.title_size();
        params.label_size = self.font_size;
        params.xtick_label_size = self.font_size;
        params.ytick_label_size = self.font_size;
        params.legend_font_size = self.font_size;
        params.line_width = self.line_width;
        params.axes_line_width = self.line_width;
        params.marker_size = self.marker_size;
        params.xtick_pad = self.tick_pad;
        params.ytick_pad = self.tick_pad;

        debug!(
            "applied style: palette={} context={} style={} font={} {}pt",
            if self.colors.is_empty() {
                self.palette.as_str()
            } else {
                "custom"
            },
            self.context,
            self.style,
            self.font_family,
            self.font_size
        );
        Ok(())
    }

    /// Bold axes title, one point above the base size unless `font_size` is given
    pub fn set_titles(&self, ax: &mut Axes, title: &str, font_size: Option<f64>) {
        let size = font_size.unwrap_or_else(|| self.title_size());
        ax.set_title(title, TextStyle::new(size).bold());
    }

    /// Bold axis labels, one point above the base size
    pub fn set_labels(&self, ax: &mut Axes, xlabel: &str, ylabel: &str) {
        let style = TextStyle::new(self.title_size()).bold();
        ax.set_xlabel(xlabel, style);
        ax.set_ylabel(ylabel, style);
    }

    /// Build a legend from the labelled series of `ax` and format its title.
    ///
    /// The title is `title` when given, otherwise the one from `options`,
    /// set in bold at the base font size. With `clean_handles` underscores in
    /// entry labels become spaces.
    pub fn update_legend_style<'a>(
        &self,
        ax: &'a mut Axes,
        title: Option<&str>,
        clean_handles: bool,
        options: LegendOptions,
    ) -> &'a mut Legend {
        let font_size = self.font_size;
        let legend = ax.legend(options);
        let title = title
            .map(str::to_string)
            .or_else(|| legend.title_text().map(str::to_string))
            .unwrap_or_default();
        legend.set_title(Text::new(title, TextStyle::new(font_size).bold()));
        if clean_handles {
            for entry in &mut legend.entries {
                entry.label = entry.label.replace('_', " ");
            }
        }
        legend
    }

    /// Save `figure` at the bundle DPI.
    ///
    /// Figures wider than the maximum width are scaled down, keeping their
    /// aspect ratio. `trim_margin` crops to the content plus 0.1 in.
    pub fn save(
        &self,
        figure: &mut Figure,
        path: impl AsRef<Path>,
        tight_layout: bool,
        trim_margin: bool,
    ) -> Result<(), StyleError> {
        let config = SaveConfig::new()
            .with_dpi(self.dpi)
            .with_trim(trim_margin)
            .with_pad_inches(TRIM_PAD_INCHES);
        self.save_with(figure, path, tight_layout, &config)
    }

    /// Like [`save`](Self::save) with full control over the output options
    pub fn save_with(
        &self,
        figure: &mut Figure,
        path: impl AsRef<Path>,
        tight_layout: bool,
        config: &SaveConfig,
    ) -> Result<(), StyleError> {
        let (width, height) = figure.size_inches();
        if width > self.max_width {
            let ratio = self.max_width / width;
            figure.set_size_inches(self.max_width, height * ratio);
            debug!(
                "scaled figure from {width} x {height} in to {} x {} in",
                self.max_width,
                height * ratio
            );
        }
        if tight_layout {
            figure.tight_layout();
        }
        save_scene(&figure.scene(), path, config)?;
        Ok(())
    }

    /// `n` colors from the bundle's named palette
    pub fn palette_colors(&self, n: usize) -> Result<Vec<Color>, StyleError> {
        palette_colors(&self.palette, n)
    }
}
