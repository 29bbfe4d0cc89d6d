//! Figure style controller
//!
//! Presentation settings live in a [`FigureStyle`] bundle and are applied to
//! an explicit [`PlotParams`] value, which new figures copy from. Nothing
//! here touches global state.

pub mod bundle;
pub mod error;
pub mod palette;
pub mod params;

pub use self::bundle::FigureStyle;
pub use self::error::StyleError;
pub use self::palette::{default_size, palette_colors, parse_color, to_hex, Color, PALETTE_NAMES};
pub use self::params::{AxesStyle, PlotContext, PlotParams};

pub(crate) use self::palette::gray;
