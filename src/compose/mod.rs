//! Grid compositor for single-page PDF figures
//!
//! Figures are consumed in order and packed left to right, top to bottom,
//! following a row specification (figures per row). Every figure keeps its
//! native size and gets a bold label near its top-left corner.
//!
//! ```no_run
//! use figure_kit::compose::{combine_pdf_figures, ComposeConfig};
//!
//! let layout = combine_pdf_figures(
//!     &["a.pdf", "b.pdf", "c.pdf"],
//!     "combined.pdf",
//!     &["a", "b", "c"],
//!     &[2, 1],
//!     &ComposeConfig::default(),
//! )?;
//! assert_eq!(layout.placed_count(), 3);
//! # Ok::<(), figure_kit::compose::ComposeError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod writer;

pub use config::ComposeConfig;
pub use error::ComposeError;
pub use grid::{placed_count, plan_grid, FigureSize, GridLayout, Placement, RowLayout};
pub use writer::FigureSource;

use std::path::Path;

use log::warn;

/// Combine single-page PDF figures into one labelled grid page.
///
/// Only the figures the row specification actually places are opened. Labels
/// are matched to figures by position; a missing label fails with
/// [`ComposeError::MissingLabel`] before anything is written. If nothing is
/// placed, a zero-area page is still written.
pub fn combine_pdf_figures<P, S>(
    sources: &[P],
    output: impl AsRef<Path>,
    labels: &[S],
    row_specification: &[usize],
    config: &ComposeConfig,
) -> Result<GridLayout, ComposeError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    writer::log_modification_times(sources);

    let count = placed_count(sources.len(), row_specification);
    let figures = sources[..count]
        .iter()
        .map(|path| FigureSource::open(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let sizes: Vec<FigureSize> = figures.iter().map(FigureSource::size).collect();

    let layout = plan_grid(&sizes, row_specification, config);
    if layout.is_empty() {
        warn!("no figures placed, writing an empty page");
    }

    writer::write_composite(figures, &layout, labels, output.as_ref(), config)?;
    Ok(layout)
}
