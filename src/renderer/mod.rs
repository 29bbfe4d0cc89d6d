//! Figure output backends
//!
//! A [`Scene`] is written either as SVG (string building) or as a one-page
//! PDF (lopdf). The format is chosen from the output file extension.

pub mod config;
pub mod error;
pub mod pdf;
pub mod svg;

pub use config::SaveConfig;
pub use error::RenderError;
pub use pdf::render_pdf;
pub use svg::render_svg;

use std::path::Path;

use log::info;

use crate::figure::Scene;
use crate::geometry::BoundingBox;
use crate::pdf::POINTS_PER_INCH;

/// Part of the scene that ends up in the output, in points.
///
/// With trimming enabled this is the drawn content grown by the padding,
/// otherwise the whole figure.
pub fn output_region(scene: &Scene, config: &SaveConfig) -> BoundingBox {
    if config.trim {
        if let Some(content) = scene.content_bounds() {
            return content.inflate(config.pad_inches * POINTS_PER_INCH);
        }
    }
    scene.frame()
}

/// Render `scene` and write it to `path`, picking the format from the
/// extension (`.pdf` or `.svg`, case-insensitive).
pub fn save_scene(
    scene: &Scene,
    path: impl AsRef<Path>,
    config: &SaveConfig,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let bytes = match extension.as_str() {
        "svg" => render_svg(scene, config).into_bytes(),
        "pdf" => {
            let mut document = render_pdf(scene, config)?;
            document.compress();
            let mut buffer = Vec::new();
            document
                .save_to(&mut buffer)
                .map_err(|e| RenderError::Serialize(e.to_string()))?;
            buffer
        }
        _ => return Err(RenderError::UnsupportedFormat(extension)),
    };

    std::fs::write(path, bytes).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("saved figure to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Primitive, Stroke};
    use crate::style::gray;

    fn boxed_scene() -> Scene {
        let mut scene = Scene::new(720.0, 360.0);
        scene.push(Primitive::Rect {
            bounds: BoundingBox::new(100.0, 100.0, 200.0, 100.0),
            fill: Some(gray(0.5)),
            stroke: None,
        });
        scene
    }

    #[test]
    fn test_output_region_full_figure() {
        let region = output_region(&boxed_scene(), &SaveConfig::default());
        assert_eq!(region, BoundingBox::new(0.0, 0.0, 720.0, 360.0));
    }

    #[test]
    fn test_output_region_trimmed_with_padding() {
        let config = SaveConfig::new().with_trim(true);
        let region = output_region(&boxed_scene(), &config);
        assert!((region.x - 92.8).abs() < 1e-9);
        assert!((region.width - 214.4).abs() < 1e-9);
    }

    #[test]
    fn test_trim_on_empty_scene_keeps_frame() {
        let config = SaveConfig::new().with_trim(true);
        let region = output_region(&Scene::new(10.0, 20.0), &config);
        assert_eq!(region, BoundingBox::new(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_save_scene_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("figure.SVG");
        let pdf = dir.path().join("figure.pdf");
        save_scene(&boxed_scene(), &svg, &SaveConfig::default()).unwrap();
        save_scene(&boxed_scene(), &pdf, &SaveConfig::default()).unwrap();

        assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
        let document = lopdf::Document::load(&pdf).unwrap();
        assert_eq!(document.get_pages().len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_scene(
            &boxed_scene(),
            dir.path().join("figure.png"),
            &SaveConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ext) if ext == "png"));
    }

    #[test]
    fn test_stroke_counts_toward_trim() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.push(Primitive::Rect {
            bounds: BoundingBox::new(10.0, 10.0, 10.0, 10.0),
            fill: None,
            stroke: Some(Stroke::new(gray(0.0), 2.0)),
        });
        let config = SaveConfig::new().with_trim(true).with_pad_inches(0.0);
        assert_eq!(
            output_region(&scene, &config),
            BoundingBox::new(9.0, 9.0, 12.0, 12.0)
        );
    }
}
