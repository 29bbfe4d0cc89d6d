//! SVG output for figure scenes

use crate::figure::{FontWeight, Primitive, Scene, Stroke, TextAnchor};
use crate::geometry::{BoundingBox, Point};
use crate::pdf::POINTS_PER_INCH;
use crate::style::{to_hex, Color};

use super::{output_region, SaveConfig};

/// Build SVG elements incrementally
pub struct SvgBuilder {
    defs: Vec<String>,
    elements: Vec<String>,
    clips: Vec<BoundingBox>,
    indent: usize,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new() -> Self {
        Self {
            defs: vec![],
            elements: vec![],
            clips: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        "  ".repeat(self.indent)
    }

    /// Id of the clip path for `bounds`, defining it on first use
    fn clip_id(&mut self, bounds: BoundingBox) -> String {
        let index = match self.clips.iter().position(|b| *b == bounds) {
            Some(index) => index,
            None => {
                self.clips.push(bounds);
                let index = self.clips.len() - 1;
                self.defs.push(format!(
                    r#"<clipPath id="clip{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    index,
                    num(bounds.x),
                    num(bounds.y),
                    num(bounds.width),
                    num(bounds.height)
                ));
                index
            }
        };
        format!("clip{index}")
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, bounds: BoundingBox, fill: Option<Color>, stroke: Option<Stroke>) {
        let fill_attr = match fill {
            Some(color) => format!(r#" fill="{}""#, to_hex(color)),
            None => r#" fill="none""#.to_string(),
        };
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
            self.indent_str(),
            num(bounds.x),
            num(bounds.y),
            num(bounds.width),
            num(bounds.height),
            fill_attr,
            stroke_attrs(stroke)
        ));
    }

    /// Add an open polyline
    pub fn add_polyline(&mut self, points: &[Point], stroke: Stroke, clip: Option<BoundingBox>) {
        let clip_attr = clip
            .map(|bounds| format!(r#" clip-path="url(#{})""#, self.clip_id(bounds)))
            .unwrap_or_default();
        let points_str = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push(format!(
            r#"{}<polyline points="{}" fill="none"{} stroke-linejoin="round"{}/>"#,
            self.indent_str(),
            points_str,
            stroke_attrs(Some(stroke)),
            clip_attr
        ));
    }

    /// Add a text element with its baseline at `position`
    #[allow(clippy::too_many_arguments)]
    pub fn add_text(
        &mut self,
        position: Point,
        text: &str,
        family: &str,
        size: f64,
        weight: FontWeight,
        color: Color,
        anchor: TextAnchor,
        rotation: f64,
    ) {
        let anchor_str = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight_attr = match weight {
            FontWeight::Bold => r#" font-weight="bold""#,
            FontWeight::Normal => "",
        };
        let transform = if rotation != 0.0 {
            format!(
                r#" transform="rotate({} {} {})""#,
                num(-rotation),
                num(position.x),
                num(position.y)
            )
        } else {
            String::new()
        };

        self.elements.push(format!(
            r#"{}<text x="{}" y="{}" font-family="{}" font-size="{}"{} fill="{}" text-anchor="{}"{}>{}</text>"#,
            self.indent_str(),
            num(position.x),
            num(position.y),
            escape_xml(family),
            num(size),
            weight_attr,
            to_hex(color),
            anchor_str,
            transform,
            escape_xml(text)
        ));
    }

    /// Build the final SVG string. `viewbox` is in points, the pixel size
    /// sets the rendered dimensions.
    pub fn build(self, viewbox: BoundingBox, width_px: f64, height_px: f64) -> String {
        let mut svg = String::new();
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            num(width_px),
            num(height_px),
            num(viewbox.x),
            num(viewbox.y),
            num(viewbox.width),
            num(viewbox.height)
        ));
        svg.push('\n');

        if !self.defs.is_empty() {
            svg.push_str("  <defs>\n");
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push('\n');
            }
            svg.push_str("  </defs>\n");
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Render a scene to an SVG document string
pub fn render_svg(scene: &Scene, config: &SaveConfig) -> String {
    let region = output_region(scene, config);
    let mut builder = SvgBuilder::new();

    if let Some(background) = config.background {
        builder.add_rect(region, Some(background), None);
    }

    for item in scene.items() {
        match item {
            Primitive::Rect {
                bounds,
                fill,
                stroke,
            } => builder.add_rect(*bounds, *fill, *stroke),
            Primitive::Polyline {
                points,
                stroke,
                clip,
            } => builder.add_polyline(points, *stroke, *clip),
            Primitive::Text {
                position,
                content,
                family,
                size,
                weight,
                color,
                anchor,
                rotation,
            } => builder.add_text(
                *position, content, family, *size, *weight, *color, *anchor, *rotation,
            ),
        }
    }

    let scale = config.dpi / POINTS_PER_INCH;
    builder.build(region, region.width * scale, region.height * scale)
}

fn stroke_attrs(stroke: Option<Stroke>) -> String {
    match stroke {
        Some(stroke) => format!(
            r#" stroke="{}" stroke-width="{}""#,
            to_hex(stroke.color),
            num(stroke.width)
        ),
        None => String::new(),
    }
}

/// Format a coordinate with at most two decimals
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::gray;

    fn small_scene() -> Scene {
        let mut scene = Scene::new(72.0, 36.0);
        scene.push(Primitive::Rect {
            bounds: BoundingBox::new(10.0, 5.0, 50.0, 20.0),
            fill: None,
            stroke: Some(Stroke::new(gray(0.0), 1.0)),
        });
        scene.push(Primitive::Text {
            position: Point::new(36.0, 32.0),
            content: "a < b".to_string(),
            family: "Helvetica".to_string(),
            size: 8.0,
            weight: FontWeight::Bold,
            color: gray(0.0),
            anchor: TextAnchor::Middle,
            rotation: 0.0,
        });
        scene
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(57.599999999), "57.6");
        assert_eq!(num(72.0), "72");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }

    #[test]
    fn test_render_small_scene() {
        let config = SaveConfig::new().with_dpi(144.0).transparent();
        let svg = render_svg(&small_scene(), &config);
        insta::assert_snapshot!(svg, @r###"
        <?xml version="1.0" encoding="UTF-8"?>
        <svg xmlns="http://www.w3.org/2000/svg" width="144" height="72" viewBox="0 0 72 36">
          <rect x="10" y="5" width="50" height="20" fill="none" stroke="#000000" stroke-width="1"/>
          <text x="36" y="32" font-family="Helvetica" font-size="8" font-weight="bold" fill="#000000" text-anchor="middle">a &lt; b</text>
        </svg>
        "###);
    }

    #[test]
    fn test_clip_paths_are_shared() {
        let clip = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let mut builder = SvgBuilder::new();
        let stroke = Stroke::new(gray(0.5), 1.0);
        let line = [Point::new(0.0, 0.0), Point::new(20.0, 20.0)];
        builder.add_polyline(&line, stroke, Some(clip));
        builder.add_polyline(&line, stroke, Some(clip));
        let svg = builder.build(clip, 10.0, 10.0);
        assert_eq!(svg.matches("<clipPath").count(), 1);
        assert_eq!(svg.matches(r#"clip-path="url(#clip0)""#).count(), 2);
    }

    #[test]
    fn test_trim_shrinks_viewbox() {
        let config = SaveConfig::new().with_trim(true).with_pad_inches(0.0);
        let svg = render_svg(&small_scene(), &config);
        assert!(svg.contains(r#"viewBox="9.5 4.5"#), "{svg}");
    }

    #[test]
    fn test_rotated_text_transform() {
        let mut builder = SvgBuilder::new();
        builder.add_text(
            Point::new(20.0, 50.0),
            "y",
            "Helvetica",
            10.0,
            FontWeight::Normal,
            gray(0.0),
            TextAnchor::Middle,
            90.0,
        );
        let svg = builder.build(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 100.0, 100.0);
        assert!(svg.contains(r#"transform="rotate(-90 20 50)""#));
    }
}
