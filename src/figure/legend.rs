//! Axes legends

use crate::geometry::{BoundingBox, Point};
use crate::style::{gray, Color};

use super::scene::{Primitive, Scene, Stroke, TextAnchor, ASCENT};
use super::text::{FontWeight, Text, TextStyle};

// Layout distances, in multiples of the legend font size
const BORDER_PAD: f64 = 0.4;
const BORDER_AXES_PAD: f64 = 0.5;
const HANDLE_LENGTH: f64 = 2.0;
const HANDLE_TEXT_PAD: f64 = 0.8;
const LABEL_SPACING: f64 = 0.5;

/// Where a legend is placed inside its axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLocation {
    /// The corner covering the fewest data points
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

/// User-facing legend settings
#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub location: LegendLocation,
    pub title: Option<String>,
    /// Draw a background box behind the legend
    pub frame: bool,
    /// Overrides the legend font size of the axes
    pub font_size: Option<f64>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            location: LegendLocation::Best,
            title: None,
            frame: true,
            font_size: None,
        }
    }
}

impl LegendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: LegendLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_frame(mut self, frame: bool) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// One legend row: a line sample and its label
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub line_width: f64,
}

/// A legend attached to an axes
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub title: Option<Text>,
    pub options: LegendOptions,
    /// Font size of the entry labels
    pub font_size: f64,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>, options: LegendOptions, default_font_size: f64) -> Self {
        let font_size = options.font_size.unwrap_or(default_font_size);
        let title = options
            .title
            .as_ref()
            .map(|title| Text::new(title.clone(), TextStyle::new(font_size)));
        Self {
            entries,
            title,
            options,
            font_size,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Title text, if any
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(|t| t.content.as_str())
    }

    pub fn set_title(&mut self, title: Text) {
        self.title = Some(title);
    }

    /// Width and height of the legend box in points
    pub(crate) fn size(&self) -> (f64, f64) {
        let fs = self.font_size;
        let label_width = self
            .entries
            .iter()
            .map(|e| Text::new(e.label.as_str(), TextStyle::new(fs)).width())
            .fold(0.0, f64::max);
        let rows_width = if self.entries.is_empty() {
            0.0
        } else {
            (HANDLE_LENGTH + HANDLE_TEXT_PAD) * fs + label_width
        };
        let title_width = self.title.as_ref().map(Text::width).unwrap_or(0.0);

        let n = self.entries.len() as f64;
        let mut height = n * fs + (n - 1.0).max(0.0) * LABEL_SPACING * fs;
        if let Some(title) = &self.title {
            height += title.style.size;
            if !self.entries.is_empty() {
                height += LABEL_SPACING * fs;
            }
        }
        (
            rows_width.max(title_width) + 2.0 * BORDER_PAD * fs,
            height + 2.0 * BORDER_PAD * fs,
        )
    }

    /// Box the legend occupies inside `frame` at a fixed location
    fn placed(&self, frame: BoundingBox, location: LegendLocation) -> BoundingBox {
        let (width, height) = self.size();
        let inset = BORDER_AXES_PAD * self.font_size;
        let left = frame.x + inset;
        let right = frame.right() - inset - width;
        let top = frame.y + inset;
        let bottom = frame.bottom() - inset - height;
        let (x, y) = match location {
            LegendLocation::UpperLeft => (left, top),
            LegendLocation::LowerLeft => (left, bottom),
            LegendLocation::LowerRight => (right, bottom),
            LegendLocation::UpperRight | LegendLocation::Best => (right, top),
        };
        BoundingBox::new(x, y, width, height)
    }

    /// Resolve [`LegendLocation::Best`] against the plotted points
    pub(crate) fn bounds(&self, frame: BoundingBox, data_points: &[Point]) -> BoundingBox {
        if self.options.location != LegendLocation::Best {
            return self.placed(frame, self.options.location);
        }
        [
            LegendLocation::UpperRight,
            LegendLocation::UpperLeft,
            LegendLocation::LowerLeft,
            LegendLocation::LowerRight,
        ]
        .iter()
        .map(|location| self.placed(frame, *location))
        .min_by_key(|candidate| data_points.iter().filter(|p| candidate.contains(**p)).count())
        .unwrap_or_else(|| self.placed(frame, LegendLocation::UpperRight))
    }

    pub(crate) fn draw(
        &self,
        frame: BoundingBox,
        data_points: &[Point],
        text_color: Color,
        family: &str,
        scene: &mut Scene,
    ) {
        let fs = self.font_size;
        let bounds = self.bounds(frame, data_points);
        if self.options.frame {
            scene.push(Primitive::Rect {
                bounds,
                fill: Some(gray(1.0)),
                stroke: Some(Stroke::new(gray(0.8), 0.8)),
            });
        }

        let mut y = bounds.y + BORDER_PAD * fs;
        if let Some(title) = &self.title {
            scene.push(Primitive::Text {
                position: Point::new(bounds.center().x, y + ASCENT * title.style.size),
                content: title.content.clone(),
                family: family.to_string(),
                size: title.style.size,
                weight: title.style.weight,
                color: title.style.color.unwrap_or(text_color),
                anchor: TextAnchor::Middle,
                rotation: 0.0,
            });
            y += title.style.size + LABEL_SPACING * fs;
        }

        let handle_x = bounds.x + BORDER_PAD * fs;
        for entry in &self.entries {
            let middle = y + fs / 2.0;
            scene.push(Primitive::Polyline {
                points: vec![
                    Point::new(handle_x, middle),
                    Point::new(handle_x + HANDLE_LENGTH * fs, middle),
                ],
                stroke: Stroke::new(entry.color, entry.line_width),
                clip: None,
            });
            scene.push(Primitive::Text {
                position: Point::new(
                    handle_x + (HANDLE_LENGTH + HANDLE_TEXT_PAD) * fs,
                    y + ASCENT * fs,
                ),
                content: entry.label.clone(),
                family: family.to_string(),
                size: fs,
                weight: FontWeight::Normal,
                color: text_color,
                anchor: TextAnchor::Start,
                rotation: 0.0,
            });
            y += fs + LABEL_SPACING * fs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str) -> LegendEntry {
        LegendEntry {
            label: label.to_string(),
            color: Color::new(0, 0, 255),
            line_width: 1.5,
        }
    }

    #[test]
    fn test_title_comes_from_options() {
        let legend = Legend::new(
            vec![entry("speed")],
            LegendOptions::new().with_title("Runs"),
            10.0,
        );
        assert_eq!(legend.title_text(), Some("Runs"));
        assert_eq!(legend.labels(), vec!["speed"]);
    }

    #[test]
    fn test_font_size_override() {
        let legend = Legend::new(vec![], LegendOptions::new().with_font_size(7.0), 10.0);
        assert_eq!(legend.font_size, 7.0);
    }

    #[test]
    fn test_best_location_avoids_data() {
        let legend = Legend::new(vec![entry("a")], LegendOptions::default(), 10.0);
        let frame = BoundingBox::new(0.0, 0.0, 200.0, 100.0);
        // Points crowd the upper right corner
        let points: Vec<Point> = (0..10)
            .map(|i| Point::new(190.0 - i as f64, 10.0))
            .collect();
        let bounds = legend.bounds(frame, &points);
        assert_eq!(bounds.x, 5.0);
        assert_eq!(bounds.y, 5.0);
    }

    #[test]
    fn test_fixed_location() {
        let legend = Legend::new(
            vec![entry("a")],
            LegendOptions::new().with_location(LegendLocation::LowerRight),
            10.0,
        );
        let frame = BoundingBox::new(0.0, 0.0, 200.0, 100.0);
        let bounds = legend.bounds(frame, &[]);
        assert!((bounds.right() - 195.0).abs() < 1e-9);
        assert!((bounds.bottom() - 95.0).abs() < 1e-9);
    }
}
