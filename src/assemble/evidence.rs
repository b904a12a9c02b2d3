//! Prior-art evidence insertion (pass 2).

use regex::Regex;

use crate::doc::{Alignment, Block, Document, Paragraph, Resource, TextRun};
use crate::model::EvidenceItem;

use super::feature_table::find_feature_table;
use super::{IMAGE_WIDTH_INCHES, MARKER_COLOR};

/// Insert the ordered evidence sequence immediately before the feature
/// table: text items become one paragraph each (the combined-difference
/// narrative rendered in the marker color), image items become centered
/// embedded images at the fixed display width.
///
/// An image that fails to load is skipped with a warning; generation
/// continues.
pub fn insert_evidence(doc: &mut Document, evidence: &[EvidenceItem]) {
    if evidence.is_empty() {
        return;
    }
    let Some(mut table_idx) = find_feature_table(doc) else {
        return;
    };

    let combined_diff = Regex::new(r"(?i)^\s*Combined\s+difference\s+over\b").unwrap();

    for item in evidence {
        match item {
            EvidenceItem::Text { text } => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                let mut p = Paragraph::new();
                if combined_diff.is_match(text) {
                    p.add_run(TextRun::colored(text, MARKER_COLOR));
                } else {
                    p.add_run(TextRun::new(text));
                }
                doc.insert_before(table_idx, Block::Paragraph(p));
                table_idx += 1;
            }
            EvidenceItem::Image { path } => {
                let data = match std::fs::read(path) {
                    Ok(data) => data,
                    Err(err) => {
                        log::warn!("skipping evidence image {}: {err}", path.display());
                        continue;
                    }
                };
                let resource_id = doc.add_image_resource(Resource::image(data));
                doc.insert_before(
                    table_idx,
                    Block::Image {
                        resource_id,
                        width_inches: IMAGE_WIDTH_INCHES,
                        alignment: Alignment::Center,
                    },
                );
                table_idx += 1;
            }
        }
    }
}
