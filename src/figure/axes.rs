//! A single plotting area: series, labels, ticks and legend

use log::warn;

use crate::geometry::{BoundingBox, Point};
use crate::style::{Color, PlotParams};

use super::legend::{Legend, LegendEntry, LegendOptions};
use super::scene::{Primitive, Scene, Stroke, TextAnchor, ASCENT, DESCENT};
use super::text::{Text, TextStyle};
use super::ticks::{format_tick, nice_step, nice_ticks, padded_range, AUTO_MARGIN};

/// Gap between tick labels and the axis label
const LABEL_PAD: f64 = 4.0;
/// Gap between the top of the axes and the title
const TITLE_PAD: f64 = 6.0;

/// A plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: Option<String>,
    pub color: Color,
    pub line_width: f64,
}

impl Series {
    fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(x, y)| (*x, *y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }

    /// Whether the series should appear in a legend
    fn is_labelled(&self) -> bool {
        matches!(&self.label, Some(label) if !label.is_empty() && !label.starts_with('_'))
    }
}

/// Space needed around the axes frame for its decorations, in points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

struct AxisTicks {
    positions: Vec<f64>,
    labels: Vec<String>,
}

impl AxisTicks {
    fn new((lo, hi): (f64, f64)) -> Self {
        let step = nice_step(lo, hi);
        let positions = nice_ticks(lo, hi);
        let labels = positions.iter().map(|v| format_tick(*v, step)).collect();
        Self { positions, labels }
    }
}

/// Plotting area inside a [`Figure`](super::Figure)
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    params: PlotParams,
    series: Vec<Series>,
    title: Option<Text>,
    xlabel: Option<Text>,
    ylabel: Option<Text>,
    legend: Option<Legend>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
}

impl Axes {
    /// Create empty axes, copying the current plotting defaults
    pub fn new(params: &PlotParams) -> Self {
        Self {
            params: params.clone(),
            series: Vec::new(),
            title: None,
            xlabel: None,
            ylabel: None,
            legend: None,
            xlim: None,
            ylim: None,
        }
    }

    /// Add a line. The color is the next one in the color cycle.
    ///
    /// When `x` and `y` differ in length the longer one is truncated.
    pub fn plot(&mut self, x: &[f64], y: &[f64], label: Option<&str>) -> &mut Series {
        if x.len() != y.len() {
            warn!(
                "plot called with {} x and {} y values, truncating",
                x.len(),
                y.len()
            );
        }
        let n = x.len().min(y.len());
        let color = self.params.cycle_color(self.series.len());
        self.series.push(Series {
            x: x[..n].to_vec(),
            y: y[..n].to_vec(),
            label: label.map(str::to_string),
            color,
            line_width: self.params.line_width,
        });
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_title(&mut self, text: impl Into<String>, style: TextStyle) {
        self.title = Some(Text::new(text, style));
    }

    pub fn set_xlabel(&mut self, text: impl Into<String>, style: TextStyle) {
        self.xlabel = Some(Text::new(text, style));
    }

    pub fn set_ylabel(&mut self, text: impl Into<String>, style: TextStyle) {
        self.ylabel = Some(Text::new(text, style));
    }

    pub fn title(&self) -> Option<&Text> {
        self.title.as_ref()
    }

    pub fn xlabel(&self) -> Option<&Text> {
        self.xlabel.as_ref()
    }

    pub fn ylabel(&self) -> Option<&Text> {
        self.ylabel.as_ref()
    }

    /// Legend entries for every labelled series, in plotting order.
    ///
    /// Labels that are empty or start with `_` are skipped.
    pub fn legend_handles_labels(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .filter(|s| s.is_labelled())
            .map(|s| LegendEntry {
                label: s.label.clone().unwrap_or_default(),
                color: s.color,
                line_width: s.line_width,
            })
            .collect()
    }

    /// Create (or replace) the legend from the labelled series
    pub fn legend(&mut self, options: LegendOptions) -> &mut Legend {
        let legend = Legend::new(
            self.legend_handles_labels(),
            options,
            self.params.legend_font_size,
        );
        self.legend.insert(legend)
    }

    pub fn get_legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn legend_mut(&mut self) -> Option<&mut Legend> {
        self.legend.as_mut()
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.xlim = Some((min, max));
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.ylim = Some((min, max));
    }

    /// Explicit x limits, or the data range with a 5% margin
    pub fn x_limits(&self) -> (f64, f64) {
        self.xlim.unwrap_or_else(|| {
            auto_limits(
                self.series
                    .iter()
                    .flat_map(|s| s.finite_points().map(|(x, _)| x)),
            )
        })
    }

    /// Explicit y limits, or the data range with a 5% margin
    pub fn y_limits(&self) -> (f64, f64) {
        self.ylim.unwrap_or_else(|| {
            auto_limits(
                self.series
                    .iter()
                    .flat_map(|s| s.finite_points().map(|(_, y)| y)),
            )
        })
    }

    /// Base font size the axes were created with
    pub fn font_size(&self) -> f64 {
        self.params.font_size
    }

    fn tick_extent(&self) -> f64 {
        if self.params.show_ticks {
            self.params.tick_size
        } else {
            0.0
        }
    }

    fn text_style_color(&self, style: &TextStyle) -> Color {
        style.color.unwrap_or(self.params.text_color)
    }

    fn widest_label(&self, ticks: &AxisTicks, size: f64) -> f64 {
        ticks
            .labels
            .iter()
            .map(|label| Text::new(label.as_str(), TextStyle::new(size)).width())
            .fold(0.0, f64::max)
    }

    /// Room the title, labels and tick labels take outside the frame
    pub(crate) fn margins(&self) -> Margins {
        let p = &self.params;
        let xticks = AxisTicks::new(self.x_limits());
        let yticks = AxisTicks::new(self.y_limits());
        let ticks = self.tick_extent();

        let mut bottom = ticks + p.xtick_pad + p.xtick_label_size;
        if let Some(label) = &self.xlabel {
            bottom += LABEL_PAD + label.style.size;
        }
        let mut left = ticks + p.ytick_pad + self.widest_label(&yticks, p.ytick_label_size);
        if let Some(label) = &self.ylabel {
            left += LABEL_PAD + label.style.size;
        }
        let mut top = p.ytick_label_size / 2.0;
        if let Some(title) = &self.title {
            top = top.max(TITLE_PAD + title.style.size);
        }
        let right = self.widest_label(&xticks, p.xtick_label_size) / 2.0;

        Margins {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Draw the axes into `scene` with its plotting area at `frame`
    pub(crate) fn draw(&self, frame: BoundingBox, scene: &mut Scene) {
        let p = &self.params;
        let xlim = self.x_limits();
        let ylim = self.y_limits();
        let to_frame = |x: f64, y: f64| {
            Point::new(
                frame.x + (x - xlim.0) / (xlim.1 - xlim.0) * frame.width,
                frame.bottom() - (y - ylim.0) / (ylim.1 - ylim.0) * frame.height,
            )
        };
        let xticks = AxisTicks::new(xlim);
        let yticks = AxisTicks::new(ylim);

        scene.push(Primitive::Rect {
            bounds: frame,
            fill: Some(p.axes_facecolor),
            stroke: None,
        });

        if p.grid {
            let stroke = Stroke::new(p.grid_color, p.grid_line_width);
            for x in &xticks.positions {
                let px = to_frame(*x, ylim.0).x;
                self.push_line(scene, Point::new(px, frame.y), Point::new(px, frame.bottom()), stroke);
            }
            for y in &yticks.positions {
                let py = to_frame(xlim.0, *y).y;
                self.push_line(scene, Point::new(frame.x, py), Point::new(frame.right(), py), stroke);
            }
        }

        let mut data_points = Vec::new();
        for series in &self.series {
            let points: Vec<Point> = series.finite_points().map(|(x, y)| to_frame(x, y)).collect();
            data_points.extend(points.iter().copied());
            if points.len() < 2 {
                continue;
            }
            scene.push(Primitive::Polyline {
                points,
                stroke: Stroke::new(series.color, series.line_width),
                clip: Some(frame),
            });
        }

        scene.push(Primitive::Rect {
            bounds: frame,
            fill: None,
            stroke: Some(Stroke::new(p.axes_edgecolor, p.axes_line_width)),
        });

        let ticks = self.tick_extent();
        let tick_stroke = Stroke::new(p.axes_edgecolor, p.tick_width);
        for (x, label) in xticks.positions.iter().zip(&xticks.labels) {
            let px = to_frame(*x, ylim.0).x;
            if ticks > 0.0 {
                self.push_line(
                    scene,
                    Point::new(px, frame.bottom()),
                    Point::new(px, frame.bottom() + ticks),
                    tick_stroke,
                );
            }
            let baseline = frame.bottom() + ticks + p.xtick_pad + ASCENT * p.xtick_label_size;
            self.push_text(
                scene,
                Point::new(px, baseline),
                label,
                &TextStyle::new(p.xtick_label_size),
                TextAnchor::Middle,
                0.0,
            );
        }
        for (y, label) in yticks.positions.iter().zip(&yticks.labels) {
            let py = to_frame(xlim.0, *y).y;
            if ticks > 0.0 {
                self.push_line(
                    scene,
                    Point::new(frame.x - ticks, py),
                    Point::new(frame.x, py),
                    tick_stroke,
                );
            }
            self.push_text(
                scene,
                Point::new(frame.x - ticks - p.ytick_pad, py + (ASCENT - 0.5) * p.ytick_label_size),
                label,
                &TextStyle::new(p.ytick_label_size),
                TextAnchor::End,
                0.0,
            );
        }

        if let Some(label) = &self.xlabel {
            let baseline = frame.bottom()
                + ticks
                + p.xtick_pad
                + p.xtick_label_size
                + LABEL_PAD
                + ASCENT * label.style.size;
            self.push_text(
                scene,
                Point::new(frame.center().x, baseline),
                &label.content,
                &label.style,
                TextAnchor::Middle,
                0.0,
            );
        }
        if let Some(label) = &self.ylabel {
            let baseline = frame.x
                - ticks
                - p.ytick_pad
                - self.widest_label(&yticks, p.ytick_label_size)
                - LABEL_PAD
                - DESCENT * label.style.size;
            self.push_text(
                scene,
                Point::new(baseline, frame.center().y),
                &label.content,
                &label.style,
                TextAnchor::Middle,
                90.0,
            );
        }
        if let Some(title) = &self.title {
            let baseline = frame.y - TITLE_PAD - DESCENT * title.style.size;
            self.push_text(
                scene,
                Point::new(frame.center().x, baseline),
                &title.content,
                &title.style,
                TextAnchor::Middle,
                0.0,
            );
        }

        if let Some(legend) = &self.legend {
            legend.draw(frame, &data_points, p.text_color, &p.font_family, scene);
        }
    }

    fn push_line(&self, scene: &mut Scene, from: Point, to: Point, stroke: Stroke) {
        scene.push(Primitive::Polyline {
            points: vec![from, to],
            stroke,
            clip: None,
        });
    }

    fn push_text(
        &self,
        scene: &mut Scene,
        position: Point,
        content: &str,
        style: &TextStyle,
        anchor: TextAnchor,
        rotation: f64,
    ) {
        scene.push(Primitive::Text {
            position,
            content: content.to_string(),
            family: self.params.font_family.clone(),
            size: style.size,
            weight: style.weight,
            color: self.text_style_color(style),
            anchor,
            rotation,
        });
    }
}

fn auto_limits(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let range = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        None => Some((v, v)),
    });
    match range {
        Some((lo, hi)) => padded_range(lo, hi, AUTO_MARGIN),
        None => (0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::text::FontWeight;
    use pretty_assertions::assert_eq;

    fn axes() -> Axes {
        Axes::new(&PlotParams::default())
    }

    #[test]
    fn test_plot_cycles_colors() {
        let params = PlotParams::default();
        let mut ax = Axes::new(&params);
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], Some("a"));
        ax.plot(&[0.0, 1.0], &[1.0, 0.0], Some("b"));
        assert_eq!(ax.series()[0].color, params.cycle_color(0));
        assert_eq!(ax.series()[1].color, params.cycle_color(1));
    }

    #[test]
    fn test_plot_truncates_mismatched_lengths() {
        let mut ax = axes();
        let series = ax.plot(&[0.0, 1.0, 2.0], &[5.0, 6.0], None);
        assert_eq!(series.x, vec![0.0, 1.0]);
    }

    #[test]
    fn test_legend_skips_unlabelled_series() {
        let mut ax = axes();
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], Some("mean_speed"));
        ax.plot(&[0.0, 1.0], &[0.0, 2.0], None);
        ax.plot(&[0.0, 1.0], &[0.0, 3.0], Some("_hidden"));
        let legend = ax.legend(LegendOptions::default());
        assert_eq!(legend.labels(), vec!["mean_speed"]);
    }

    #[test]
    fn test_auto_limits_add_margin() {
        let mut ax = axes();
        ax.plot(&[0.0, 10.0], &[-1.0, 1.0], None);
        assert_eq!(ax.x_limits(), (-0.5, 10.5));
        let (lo, hi) = ax.y_limits();
        assert!((lo + 1.1).abs() < 1e-12 && (hi - 1.1).abs() < 1e-12);
        ax.set_xlim(0.0, 5.0);
        assert_eq!(ax.x_limits(), (0.0, 5.0));
    }

    #[test]
    fn test_empty_axes_limits() {
        assert_eq!(axes().x_limits(), (0.0, 1.0));
    }

    #[test]
    fn test_margins_grow_with_labels() {
        let mut ax = axes();
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], None);
        let bare = ax.margins();
        ax.set_xlabel("time", TextStyle::new(11.0).bold());
        ax.set_title("Run", TextStyle::new(11.0).bold());
        let labelled = ax.margins();
        assert!((labelled.bottom - bare.bottom - (LABEL_PAD + 11.0)).abs() < 1e-9);
        assert!(labelled.top > bare.top);
        assert_eq!(labelled.left, bare.left);
    }

    #[test]
    fn test_draw_emits_title_text() {
        let mut ax = axes();
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], None);
        ax.set_title("Velocity", TextStyle::new(12.0).bold());
        let mut scene = Scene::new(400.0, 300.0);
        ax.draw(BoundingBox::new(50.0, 40.0, 300.0, 200.0), &mut scene);
        let title = scene.items().iter().find_map(|item| match item {
            Primitive::Text {
                content, weight, ..
            } if content == "Velocity" => Some(*weight),
            _ => None,
        });
        assert_eq!(title, Some(FontWeight::Bold));
    }
}
