//! Source import and composite page assembly
//!
//! Each placed source page is copied into the output document as a Form
//! XObject (the page's content stream with its resources, BBox = page box)
//! and drawn with a pure translation, so figures keep their native size.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::pdf::{finish_single_page, font_dictionary, name, number, real, text_operations};

use super::config::ComposeConfig;
use super::error::ComposeError;
use super::grid::{FigureSize, GridLayout};

/// Upper bound on page tree depth when looking up inherited attributes
const MAX_TREE_DEPTH: usize = 32;

const LABEL_FONT_RESOURCE: &str = "FL";

/// A loaded single-page figure, ready to be imported into a composite
pub struct FigureSource {
    path: PathBuf,
    document: Document,
    /// Page box as `[llx, lly, urx, ury]`
    page_box: [f64; 4],
}

impl FigureSource {
    /// Read and parse a figure. The file is read in full and closed.
    pub fn open(path: &Path) -> Result<Self, ComposeError> {
        let bytes = std::fs::read(path).map_err(|source| ComposeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Document::load_mem(&bytes).map_err(|source| ComposeError::Pdf {
            path: path.to_path_buf(),
            source,
        })?;

        let page_count = document.get_pages().len();
        if page_count > 1 {
            warn!(
                "figure '{}' has {} pages, only the first is used",
                path.display(),
                page_count
            );
        }
        let page_id = first_page(&document).ok_or_else(|| ComposeError::EmptyDocument {
            path: path.to_path_buf(),
        })?;
        let page_box = page_box(&document, page_id).ok_or_else(|| ComposeError::MissingPageBox {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
            page_box,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page width and height in points
    pub fn size(&self) -> FigureSize {
        let [llx, lly, urx, ury] = self.page_box;
        FigureSize::new(urx - llx, ury - lly)
    }

    /// Move this figure's page into `out` as a Form XObject and return its id
    fn import_into(self, out: &mut Document) -> Result<ObjectId, ComposeError> {
        let FigureSource {
            path,
            mut document,
            page_box,
        } = self;

        document.renumber_objects_with(out.max_id + 1);
        let page_id = first_page(&document).ok_or_else(|| ComposeError::EmptyDocument {
            path: path.clone(),
        })?;
        let content = document
            .get_page_content(page_id)
            .map_err(|source| ComposeError::Pdf {
                path: path.clone(),
                source,
            })?;
        let resources = inherited_attribute(&document, page_id, b"Resources")
            .cloned()
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let highest = document
            .objects
            .keys()
            .map(|(id, _)| *id)
            .max()
            .unwrap_or(0);
        out.max_id = out.max_id.max(highest);
        out.objects.extend(document.objects);

        let [llx, lly, urx, ury] = page_box;
        let form = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "FormType" => Object::Integer(1),
                "BBox" => vec![real(llx), real(lly), real(urx), real(ury)],
                "Resources" => resources,
            },
            content,
        );
        debug!("imported '{}' as form xobject", path.display());
        Ok(out.add_object(form))
    }
}

/// Log when each source was last modified. Missing files are only reported
/// here; they fail later if the grid actually places them.
pub(crate) fn log_modification_times<P: AsRef<Path>>(sources: &[P]) {
    for path in sources {
        let path = path.as_ref();
        match std::fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(modified) => {
                let modified: DateTime<Local> = modified.into();
                info!(
                    "Last modified at {}: '{}'",
                    modified.format("%Y-%m-%d %H:%M:%S"),
                    path.display()
                );
            }
            Err(_) => warn!("figure '{}' not found", path.display()),
        }
    }
}

/// Assemble the composite page described by `layout` and write it to `output`.
///
/// `figures` must hold the placed sources in placement order.
pub(crate) fn write_composite<S: AsRef<str>>(
    figures: Vec<FigureSource>,
    layout: &GridLayout,
    labels: &[S],
    output: &Path,
    config: &ComposeConfig,
) -> Result<(), ComposeError> {
    let mut out = Document::with_version("1.5");
    let mut xobjects = Dictionary::new();
    let mut operations = Vec::new();

    for (placement, figure) in layout.placements.iter().zip(figures) {
        let label = labels
            .get(placement.figure)
            .ok_or(ComposeError::MissingLabel {
                index: placement.figure,
                available: labels.len(),
            })?;

        let [llx, lly, _, _] = figure.page_box;
        let resource = format!("Fig{}", placement.figure);
        let xobject_id = figure.import_into(&mut out)?;
        xobjects.set(resource.as_str(), Object::Reference(xobject_id));

        // Page space is top-down; PDF user space is bottom-up.
        let bounds = placement.bounds;
        let tx = bounds.x - llx;
        let ty = layout.height - bounds.bottom() - lly;
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![real(1.0), real(0.0), real(0.0), real(1.0), real(tx), real(ty)],
        ));
        operations.push(Operation::new("Do", vec![name(&resource)]));
        operations.push(Operation::new("Q", vec![]));

        let anchor = placement.label_anchor;
        operations.push(Operation::new("g", vec![real(0.0)]));
        operations.extend(text_operations(
            LABEL_FONT_RESOURCE,
            config.label_font_size,
            [1.0, 0.0, 0.0, 1.0, anchor.x, layout.height - anchor.y],
            label.as_ref(),
        ));
    }

    let resources = dictionary! {
        "XObject" => xobjects,
        "Font" => dictionary! {
            LABEL_FONT_RESOURCE => font_dictionary(&config.label_font),
        },
    };
    finish_single_page(
        &mut out,
        layout.width,
        layout.height,
        Content { operations },
        resources,
    )
    .map_err(ComposeError::Assemble)?;

    out.prune_objects();
    out.compress();

    let mut buffer = Vec::new();
    out.save_to(&mut buffer)
        .map_err(|e| ComposeError::Serialize(e.to_string()))?;
    std::fs::write(output, buffer).map_err(|source| ComposeError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        "wrote {} figures to '{}' ({} x {} pt)",
        layout.placed_count(),
        output.display(),
        layout.width,
        layout.height
    );
    Ok(())
}

fn first_page(document: &Document) -> Option<ObjectId> {
    document.get_pages().values().next().copied()
}

/// Look up a page attribute, following `Parent` links for inherited values
fn inherited_attribute<'a>(
    document: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = document.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(resolve(document, value));
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = document.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Visible page box: CropBox when present, MediaBox otherwise
fn page_box(document: &Document, page_id: ObjectId) -> Option<[f64; 4]> {
    [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .iter()
        .find_map(|key| {
            let array = inherited_attribute(document, page_id, key)?.as_array().ok()?;
            if array.len() != 4 {
                return None;
            }
            let mut values = [0.0; 4];
            for (slot, item) in values.iter_mut().zip(array) {
                *slot = number(resolve(document, item))?;
            }
            Some([
                values[0].min(values[2]),
                values[1].min(values[3]),
                values[0].max(values[2]),
                values[1].max(values[3]),
            ])
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_document(media_box: Vec<Object>, crop_box: Option<Vec<Object>>) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        };
        if let Some(crop) = crop_box {
            page.set("CropBox", crop);
        }
        let page_id = doc.add_object(page);
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
                "MediaBox" => media_box,
            }),
        );
        (doc, page_id)
    }

    #[test]
    fn test_media_box_inherited_from_parent() {
        let (doc, page_id) = page_document(
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(200),
                Object::Integer(100),
            ],
            None,
        );
        assert_eq!(page_box(&doc, page_id), Some([0.0, 0.0, 200.0, 100.0]));
    }

    #[test]
    fn test_crop_box_wins_over_media_box() {
        let (doc, page_id) = page_document(
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(200),
                Object::Integer(100),
            ],
            Some(vec![
                Object::Integer(10),
                Object::Integer(20),
                Object::Real(110.0),
                Object::Real(70.0),
            ]),
        );
        assert_eq!(page_box(&doc, page_id), Some([10.0, 20.0, 110.0, 70.0]));
    }

    #[test]
    fn test_malformed_box_is_rejected() {
        let (doc, page_id) = page_document(vec![Object::Integer(0), Object::Integer(0)], None);
        assert_eq!(page_box(&doc, page_id), None);
    }
}
