//! Supplementary technical-solution image block (pass 8).

use std::path::PathBuf;

use crate::doc::{Alignment, Block, Document, Paragraph, Resource, TextRun};

use super::{IMAGE_WIDTH_INCHES, MARKER_COLOR};

/// Reviewer-instruction marker placed after each inserted figure.
pub const FIGURE_MARKER: &str = "[Enter Description of the diagram]";

/// Replace the image-block placeholder with a page break followed by one
/// captioned figure per image: the centered image, a "FIG. n" caption,
/// and a reviewer-instruction marker in the marker color.
///
/// Figure numbers are sequential from 1; an image that fails to load is
/// skipped (with a warning) and does not consume a number. With no
/// images supplied the placeholder is simply cleared.
pub fn insert_solution_images(doc: &mut Document, placeholder: &str, images: &[PathBuf]) {
    let Some(idx) = doc.find_paragraph(|p| p.plain_text().contains(placeholder)) else {
        return;
    };

    if images.is_empty() {
        if let Some(p) = doc.paragraph_at_mut(idx) {
            p.clear();
        }
        return;
    }

    if let Some(p) = doc.paragraph_at_mut(idx) {
        p.clear();
        p.add_page_break();
    }

    let mut anchor = idx;
    let mut fig_no = 1u32;
    for path in images {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("skipping solution image {}: {err}", path.display());
                continue;
            }
        };
        let resource_id = doc.add_image_resource(Resource::image(data));
        anchor = doc.insert_after(
            anchor,
            Block::Image {
                resource_id,
                width_inches: IMAGE_WIDTH_INCHES,
                alignment: Alignment::Center,
            },
        );

        let mut caption = Paragraph::with_text(format!("FIG. {fig_no}"));
        caption.style.alignment = Alignment::Center;
        anchor = doc.insert_after(anchor, Block::Paragraph(caption));

        let mut marker = Paragraph::new();
        marker.style.alignment = Alignment::Center;
        marker.add_run(TextRun::colored(FIGURE_MARKER, MARKER_COLOR));
        anchor = doc.insert_after(anchor, Block::Paragraph(marker));

        fig_no += 1;
    }
}
