//! Feature-table materialization (pass 1).

use crate::doc::{Block, Document, Table};

use super::{FEATURE_TABLE_HEADER, FEATURE_TABLE_PLACEHOLDER};

/// Ensure the claimed-feature comparison table exists.
///
/// Anchors on a dedicated marker placeholder when present, else on the
/// claim-1 placeholder paragraph, and inserts a 2x2 table immediately
/// after it. Idempotent: a table whose first header cell already reads
/// "Applicant claimed feature" suppresses the insertion.
pub fn ensure_feature_table(doc: &mut Document, claim1_text: &str, disclosure_text: &str, dx_range: &str) {
    let marker_idx = doc.find_paragraph(|p| p.plain_text().contains(FEATURE_TABLE_PLACEHOLDER));
    let claim1_idx = doc.find_paragraph(|p| p.plain_text().contains("{{AMENDED_CLAIM_1}}"));

    let Some(anchor) = marker_idx.or(claim1_idx) else {
        return;
    };

    if find_feature_table(doc).is_some() {
        // Second pass over the same document: nothing to do.
        if let Some(idx) = marker_idx {
            if let Some(p) = doc.paragraph_at_mut(idx) {
                p.clear();
            }
        }
        return;
    }

    let right_header = if dx_range.is_empty() {
        "Disclosed features of the cited prior art".to_string()
    } else {
        format!("{dx_range} disclosed features")
    };

    let mut table = Table::with_size(2, 2);
    table.cell_mut(0, 0).unwrap().set_text(FEATURE_TABLE_HEADER);
    table.cell_mut(0, 1).unwrap().set_text(right_header);
    table.cell_mut(1, 0).unwrap().set_text(claim1_text);
    table.cell_mut(1, 1).unwrap().set_text(disclosure_text);

    doc.insert_after(anchor, Block::Table(table));

    if let Some(idx) = marker_idx {
        if let Some(p) = doc.paragraph_at_mut(idx) {
            p.clear();
        }
    }
}

/// Index of the feature table, identified by its header cell text.
pub(crate) fn find_feature_table(doc: &Document) -> Option<usize> {
    doc.find_table(|t| {
        t.cell_text(0, 0).trim().eq_ignore_ascii_case(FEATURE_TABLE_HEADER)
    })
}
