//! Backend-neutral drawing primitives
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! figure and y growing downwards. Both renderers consume a [`Scene`].

use crate::geometry::{BoundingBox, Point};
use crate::style::Color;

use super::text::{text_width, FontWeight};

/// Portion of the font size above the baseline
pub(crate) const ASCENT: f64 = 0.8;
/// Portion of the font size below the baseline
pub(crate) const DESCENT: f64 = 0.2;

/// Horizontal alignment of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Stroke color and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// A single item in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        bounds: BoundingBox,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Open polyline, optionally clipped to a rectangle
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
        clip: Option<BoundingBox>,
    },
    /// Text with its baseline at `position`, rotated counter-clockwise by
    /// `rotation` degrees around that point
    Text {
        position: Point,
        content: String,
        family: String,
        size: f64,
        weight: FontWeight,
        color: Color,
        anchor: TextAnchor,
        rotation: f64,
    },
}

impl Primitive {
    /// Area covered by the primitive, if it covers any
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            Primitive::Rect { bounds, stroke, .. } => {
                let half = stroke.map(|s| s.width / 2.0).unwrap_or(0.0);
                Some(bounds.inflate(half))
            }
            Primitive::Polyline {
                points,
                stroke,
                clip,
            } => {
                let mut iter = points.iter();
                let first = iter.next()?;
                let mut bounds = BoundingBox::new(first.x, first.y, 0.0, 0.0);
                for point in iter {
                    bounds = bounds.union(&BoundingBox::new(point.x, point.y, 0.0, 0.0));
                }
                let bounds = bounds.inflate(stroke.width / 2.0);
                match clip {
                    Some(clip) => intersect(&bounds, clip),
                    None => Some(bounds),
                }
            }
            Primitive::Text {
                position,
                content,
                size,
                weight,
                anchor,
                rotation,
                ..
            } => {
                if content.is_empty() {
                    return None;
                }
                Some(text_bounds(
                    *position,
                    text_width(content, *size, *weight),
                    *size,
                    *anchor,
                    *rotation,
                ))
            }
        }
    }
}

/// Extent of a text run, rotating its box corners around the anchor point
fn text_bounds(
    position: Point,
    width: f64,
    size: f64,
    anchor: TextAnchor,
    rotation: f64,
) -> BoundingBox {
    let start = match anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => -width / 2.0,
        TextAnchor::End => -width,
    };
    let (sin, cos) = rotation.to_radians().sin_cos();
    let corners = [
        (start, -ASCENT * size),
        (start + width, -ASCENT * size),
        (start, DESCENT * size),
        (start + width, DESCENT * size),
    ];
    let rotated: Vec<Point> = corners
        .iter()
        .map(|(dx, dy)| {
            Point::new(
                position.x + dx * cos + dy * sin,
                position.y - dx * sin + dy * cos,
            )
        })
        .collect();
    let min_x = rotated.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = rotated.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = rotated.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = rotated.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    BoundingBox::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y))
}

fn intersect(a: &BoundingBox, b: &BoundingBox) -> Option<BoundingBox> {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    if right < x || bottom < y {
        return None;
    }
    Some(BoundingBox::new(x, y, right - x, bottom - y))
}

/// A full figure flattened into primitives
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Figure width in points
    pub width: f64,
    /// Figure height in points
    pub height: f64,
    items: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: Primitive) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Primitive] {
        &self.items
    }

    /// The whole figure area
    pub fn frame(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Union of everything drawn, or `None` for an empty scene
    pub fn content_bounds(&self) -> Option<BoundingBox> {
        self.items
            .iter()
            .filter_map(Primitive::bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}
