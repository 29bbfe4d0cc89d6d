//! PDF output for figure scenes
//!
//! Scenes are written as a single page using the standard 14 fonts, so no
//! font data is embedded. Coordinates are flipped to PDF's bottom-left origin.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document};

use crate::figure::{text_width, FontWeight, Primitive, Scene, Stroke, TextAnchor};
use crate::geometry::{BoundingBox, Point};
use crate::pdf::{base_font, finish_single_page, font_dictionary, real, text_operations};
use crate::style::Color;

use super::{output_region, RenderError, SaveConfig};

/// Translates scene coordinates into page coordinates
struct PageSpace {
    region: BoundingBox,
}

impl PageSpace {
    fn point(&self, p: Point) -> (f64, f64) {
        (p.x - self.region.x, self.region.height - (p.y - self.region.y))
    }

    /// Lower-left corner and size, as `re` expects
    fn rect(&self, bounds: &BoundingBox) -> Vec<lopdf::Object> {
        let (x, y) = self.point(Point::new(bounds.x, bounds.bottom()));
        vec![real(x), real(y), real(bounds.width), real(bounds.height)]
    }
}

/// Font resources in order of first use
#[derive(Default)]
struct FontTable {
    fonts: Vec<&'static str>,
}

impl FontTable {
    fn resource(&mut self, base: &'static str) -> String {
        let index = match self.fonts.iter().position(|f| *f == base) {
            Some(index) => index,
            None => {
                self.fonts.push(base);
                self.fonts.len() - 1
            }
        };
        format!("F{}", index + 1)
    }

    fn dictionary(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (index, base) in self.fonts.iter().enumerate() {
            fonts.set(format!("F{}", index + 1), font_dictionary(base));
        }
        fonts
    }
}

fn fill_color(color: Color) -> Operation {
    Operation::new("rg", rgb(color))
}

fn stroke_color(color: Color) -> Operation {
    Operation::new("RG", rgb(color))
}

fn rgb(color: Color) -> Vec<lopdf::Object> {
    [color.red, color.green, color.blue]
        .iter()
        .map(|c| real(*c as f64 / 255.0))
        .collect()
}

fn stroke_style(stroke: &Stroke) -> [Operation; 2] {
    [
        stroke_color(stroke.color),
        Operation::new("w", vec![real(stroke.width)]),
    ]
}

/// Render a scene to a one-page PDF document
pub fn render_pdf(scene: &Scene, config: &SaveConfig) -> Result<Document, RenderError> {
    let region = output_region(scene, config);
    let space = PageSpace { region };
    let mut fonts = FontTable::default();
    let mut operations = Vec::new();

    if let Some(background) = config.background {
        operations.push(fill_color(background));
        operations.push(Operation::new("re", space.rect(&region)));
        operations.push(Operation::new("f", vec![]));
    }

    for item in scene.items() {
        match item {
            Primitive::Rect {
                bounds,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    operations.push(fill_color(*fill));
                    operations.push(Operation::new("re", space.rect(bounds)));
                    operations.push(Operation::new("f", vec![]));
                }
                if let Some(stroke) = stroke {
                    operations.extend(stroke_style(stroke));
                    operations.push(Operation::new("re", space.rect(bounds)));
                    operations.push(Operation::new("S", vec![]));
                }
            }
            Primitive::Polyline {
                points,
                stroke,
                clip,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                operations.push(Operation::new("q", vec![]));
                if let Some(clip) = clip {
                    operations.push(Operation::new("re", space.rect(clip)));
                    operations.push(Operation::new("W", vec![]));
                    operations.push(Operation::new("n", vec![]));
                }
                operations.extend(stroke_style(stroke));
                operations.push(Operation::new("j", vec![lopdf::Object::Integer(1)]));
                let (x, y) = space.point(*first);
                operations.push(Operation::new("m", vec![real(x), real(y)]));
                for point in rest {
                    let (x, y) = space.point(*point);
                    operations.push(Operation::new("l", vec![real(x), real(y)]));
                }
                operations.push(Operation::new("S", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            Primitive::Text {
                position,
                content,
                family,
                size,
                weight,
                color,
                anchor,
                rotation,
            } => {
                let bold = *weight == FontWeight::Bold;
                let resource = fonts.resource(base_font(family, bold));
                let width = text_width(content, *size, *weight);
                let shift = match anchor {
                    TextAnchor::Start => 0.0,
                    TextAnchor::Middle => -width / 2.0,
                    TextAnchor::End => -width,
                };
                let (sin, cos) = rotation.to_radians().sin_cos();
                let (x, y) = space.point(*position);
                operations.push(fill_color(*color));
                operations.extend(text_operations(
                    &resource,
                    *size,
                    [cos, sin, -sin, cos, x + shift * cos, y + shift * sin],
                    content,
                ));
            }
        }
    }

    let mut doc = Document::with_version("1.5");
    let resources = dictionary! {
        "Font" => fonts.dictionary(),
    };
    finish_single_page(
        &mut doc,
        region.width,
        region.height,
        Content { operations },
        resources,
    )?;
    Ok(doc)
}
