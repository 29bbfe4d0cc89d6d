//! Minimal line-plot figure model
//!
//! A [`Figure`] owns a grid of [`Axes`] and knows its size in inches. It is
//! flattened into a [`Scene`] of primitives for the SVG and PDF renderers.

pub mod axes;
pub mod legend;
pub mod scene;
pub mod text;
pub mod ticks;

pub use axes::{Axes, Series};
pub use legend::{Legend, LegendEntry, LegendLocation, LegendOptions};
pub use scene::{Primitive, Scene, Stroke, TextAnchor};
pub use text::{text_width, FontWeight, Text, TextStyle};

use log::{debug, warn};

use crate::geometry::BoundingBox;
use crate::pdf::POINTS_PER_INCH;
use crate::style::PlotParams;

use axes::Margins;

/// Padding used by [`Figure::tight_layout`], as a multiple of the font size
const TIGHT_PAD: f64 = 1.08;

/// Position of the axes grid as fractions of the figure size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    /// Horizontal gap between axes, as a fraction of the axes width
    pub wspace: f64,
    /// Vertical gap between axes, as a fraction of the axes height
    pub hspace: f64,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

/// A figure with one or more axes laid out in a grid
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width: f64,
    height: f64,
    nrows: usize,
    ncols: usize,
    font_size: f64,
    subplot: SubplotParams,
    axes: Vec<Axes>,
}

impl Figure {
    /// A figure with a single axes, sized from `params`
    pub fn new(params: &PlotParams) -> Self {
        Self::subplots(params, 1, 1)
    }

    /// A figure with an `nrows` by `ncols` grid of axes, stored row by row
    pub fn subplots(params: &PlotParams, nrows: usize, ncols: usize) -> Self {
        let nrows = nrows.max(1);
        let ncols = ncols.max(1);
        let (width, height) = params.figure_size;
        Self {
            width,
            height,
            nrows,
            ncols,
            font_size: params.font_size,
            subplot: SubplotParams::default(),
            axes: (0..nrows * ncols).map(|_| Axes::new(params)).collect(),
        }
    }

    /// Width and height in inches
    pub fn size_inches(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn set_size_inches(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Grid shape as `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    pub fn subplot_params(&self) -> SubplotParams {
        self.subplot
    }

    pub fn set_subplot_params(&mut self, params: SubplotParams) {
        self.subplot = params;
    }

    /// Frame of every axes in points, top-left origin
    pub fn axes_frames(&self) -> Vec<BoundingBox> {
        let width = self.width * POINTS_PER_INCH;
        let height = self.height * POINTS_PER_INCH;
        let s = &self.subplot;
        let ncols = self.ncols as f64;
        let nrows = self.nrows as f64;

        let cell_w = (s.right - s.left) * width / (ncols + s.wspace * (ncols - 1.0));
        let cell_h = (s.top - s.bottom) * height / (nrows + s.hspace * (nrows - 1.0));
        let left = s.left * width;
        let top = (1.0 - s.top) * height;

        (0..self.axes.len())
            .map(|i| {
                let row = (i / self.ncols) as f64;
                let col = (i % self.ncols) as f64;
                BoundingBox::new(
                    left + col * cell_w * (1.0 + s.wspace),
                    top + row * cell_h * (1.0 + s.hspace),
                    cell_w,
                    cell_h,
                )
            })
            .collect()
    }

    /// Adjust the subplot parameters so titles, labels and tick labels fit
    /// inside the figure with a padding of 1.08 font sizes.
    ///
    /// Leaves the layout unchanged when the decorations cannot fit.
    pub fn tight_layout(&mut self) {
        let width = self.width * POINTS_PER_INCH;
        let height = self.height * POINTS_PER_INCH;
        let pad = TIGHT_PAD * self.font_size;
        let margins = self
            .axes
            .iter()
            .map(Axes::margins)
            .fold(Margins::default(), |acc, m| Margins {
                left: acc.left.max(m.left),
                right: acc.right.max(m.right),
                top: acc.top.max(m.top),
                bottom: acc.bottom.max(m.bottom),
            });

        let left = (pad + margins.left) / width;
        let right = 1.0 - (pad + margins.right) / width;
        let bottom = (pad + margins.bottom) / height;
        let top = 1.0 - (pad + margins.top) / height;

        let h_gap = margins.left + margins.right + pad;
        let v_gap = margins.top + margins.bottom + pad;
        let ncols = self.ncols as f64;
        let nrows = self.nrows as f64;
        let cell_w = ((right - left) * width - (ncols - 1.0) * h_gap) / ncols;
        let cell_h = ((top - bottom) * height - (nrows - 1.0) * v_gap) / nrows;

        if !(left < right && bottom < top && cell_w > 0.0 && cell_h > 0.0) {
            warn!("tight layout not applied, decorations do not fit the figure");
            return;
        }

        let mut subplot = SubplotParams {
            left,
            right,
            bottom,
            top,
            ..self.subplot
        };
        if self.ncols > 1 {
            subplot.wspace = h_gap / cell_w;
        }
        if self.nrows > 1 {
            subplot.hspace = v_gap / cell_h;
        }
        debug!("tight layout: {:?}", subplot);
        self.subplot = subplot;
    }

    /// Flatten the figure into drawing primitives
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(
            self.width * POINTS_PER_INCH,
            self.height * POINTS_PER_INCH,
        );
        for (axes, frame) in self.axes.iter().zip(self.axes_frames()) {
            axes.draw(frame, &mut scene);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled_figure(nrows: usize, ncols: usize) -> Figure {
        let mut fig = Figure::subplots(&PlotParams::default(), nrows, ncols);
        for ax in fig.axes_mut() {
            ax.plot(&[0.0, 1.0, 2.0], &[100.0, 2000.0, 35000.0], Some("load"));
            ax.set_title("Throughput", TextStyle::new(13.0).bold());
            ax.set_xlabel("time", TextStyle::new(12.0));
            ax.set_ylabel("requests", TextStyle::new(12.0));
        }
        fig
    }

    #[test]
    fn test_default_figure() {
        let fig = Figure::new(&PlotParams::default());
        assert_eq!(fig.size_inches(), (6.4, 4.8));
        assert_eq!(fig.axes().len(), 1);
        let frame = fig.axes_frames()[0];
        assert!((frame.x - 0.125 * 6.4 * 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_subplots_grid() {
        let fig = Figure::subplots(&PlotParams::default(), 2, 3);
        assert_eq!(fig.shape(), (2, 3));
        let frames = fig.axes_frames();
        assert_eq!(frames.len(), 6);
        assert!(frames[1].x > frames[0].right());
        assert!(frames[3].y > frames[0].bottom());
        assert!((frames[4].x - frames[1].x).abs() < 1e-9);
    }

    #[test]
    fn test_zero_grid_becomes_single_axes() {
        let fig = Figure::subplots(&PlotParams::default(), 0, 0);
        assert_eq!(fig.axes().len(), 1);
    }

    #[test]
    fn test_tight_layout_keeps_decorations_inside() {
        for (rows, cols) in [(1, 1), (2, 2)] {
            let mut fig = labelled_figure(rows, cols);
            fig.tight_layout();
            let scene = fig.scene();
            let bounds = scene.content_bounds().unwrap();
            assert!(bounds.x >= 0.0, "left overflow: {bounds:?}");
            assert!(bounds.y >= 0.0, "top overflow: {bounds:?}");
            assert!(bounds.right() <= scene.width, "right overflow: {bounds:?}");
            assert!(bounds.bottom() <= scene.height, "bottom overflow: {bounds:?}");
        }
    }

    #[test]
    fn test_tight_layout_separates_neighbours() {
        let mut fig = labelled_figure(1, 2);
        fig.tight_layout();
        let frames = fig.axes_frames();
        let margins_right = fig.axes()[0].margins().right;
        let margins_left = fig.axes()[1].margins().left;
        assert!(frames[1].x - frames[0].right() >= margins_right + margins_left);
    }

    #[test]
    fn test_tight_layout_gives_up_on_tiny_figures() {
        let mut fig = labelled_figure(1, 1);
        fig.set_size_inches(0.2, 0.2);
        let before = fig.subplot_params();
        fig.tight_layout();
        assert_eq!(fig.subplot_params(), before);
    }
}
