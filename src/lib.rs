//! figure-kit - utilities for publication figures
//!
//! The crate bundles three independent tools:
//!
//! - [`compose`]: combine single-page PDF figures into one labelled grid page
//! - [`style`]: style bundles applied to a small figure model ([`figure`]),
//!   saved as SVG or PDF through [`renderer`]
//! - [`json_reader`]: a JSON config accessor that re-reads the file on demand
//!
//! # Example
//!
//! ```rust
//! use figure_kit::{Figure, FigureStyle, PlotParams};
//!
//! let style = FigureStyle::new().with_font_size(7.0);
//! let mut params = PlotParams::default();
//! style.apply(&mut params).unwrap();
//!
//! let mut figure = Figure::new(&params);
//! let ax = &mut figure.axes_mut()[0];
//! ax.plot(&[0.0, 1.0, 2.0], &[1.0, 3.0, 2.0], Some("control"));
//! style.set_titles(ax, "Response", None);
//!
//! let svg = figure_kit::renderer::render_svg(&figure.scene(), &Default::default());
//! assert!(svg.contains("Response"));
//! ```

pub mod compose;
pub mod figure;
pub mod geometry;
pub mod json_reader;
pub mod pdf;
pub mod renderer;
pub mod style;

pub use compose::{combine_pdf_figures, ComposeConfig, ComposeError, GridLayout};
pub use figure::{Axes, Figure, Legend, LegendLocation, LegendOptions, Scene, TextStyle};
pub use json_reader::{ConfigError, JsonDataReader};
pub use renderer::{save_scene, RenderError, SaveConfig};
pub use style::{AxesStyle, FigureStyle, PlotContext, PlotParams, StyleError};
