//! Template mutation passes.
//!
//! The output document is produced by a fixed sequence of order-sensitive
//! passes over the template: table materialization, evidence insertion,
//! block expansion, scalar substitution, marker and heading styling,
//! dead-section pruning, and the supplementary image block. The document
//! is serialized once, after every pass has run; there is no partial
//! save path.

mod evidence;
mod expand;
mod feature_table;
mod images;
mod prune;
mod style;
mod substitute;

pub use evidence::insert_evidence;
pub use expand::expand_block_placeholder;
pub use feature_table::ensure_feature_table;
pub use images::insert_solution_images;
pub use prune::prune_claim_sections;
pub use style::{style_drafter_marker, style_headings};
pub use substitute::substitute_scalars;

use crate::doc::Document;
use crate::error::Result;
use crate::model::{AssemblyDirectives, FieldMap};

/// Header text of the claimed-feature comparison table; also the
/// idempotence key for pass 1.
pub const FEATURE_TABLE_HEADER: &str = "Applicant claimed feature";

/// Marker paragraph placeholder anchoring the feature table.
pub const FEATURE_TABLE_PLACEHOLDER: &str = "{{FEATURE_TABLE}}";

/// Placeholder for the supplementary technical-solution image block.
pub const SOLUTION_IMAGES_PLACEHOLDER: &str = "{{TECH_SOLUTION_IMAGES}}";

/// Distinguishing color for drafter/reviewer instruction text.
pub const MARKER_COLOR: &str = "#FF0000";

/// Fixed display width for embedded images, in inches.
pub const IMAGE_WIDTH_INCHES: f64 = 5.8;

/// Large-text placeholders expanded into one paragraph per block.
const BLOCK_PLACEHOLDERS: &[&str] = &["FORMAL_OBJECTIONS_REPLY", "TECH_EFFECT", "EXTRA_CLAIMS_BLOCK"];

/// Run all mutation passes over the template in order.
pub fn apply(doc: &mut Document, fields: &FieldMap, directives: &AssemblyDirectives) -> Result<()> {
    // Pass 1 runs before substitution so the anchor placeholders still exist.
    let claim1 = {
        let full = fields.get_or_empty("AMENDED_CLAIM_1");
        if full.is_empty() {
            fields.get_or_empty("CLAIM1_FEATURES")
        } else {
            full
        }
    };
    ensure_feature_table(
        doc,
        claim1,
        fields.get_or_empty("D1D2_DISCLOSURE"),
        fields.get_or_empty("DX_RANGE"),
    );

    insert_evidence(doc, &directives.evidence);

    for placeholder in BLOCK_PLACEHOLDERS {
        expand_block_placeholder(doc, &format!("{{{{{placeholder}}}}}"), fields.get_or_empty(placeholder));
    }

    substitute_scalars(doc, fields);
    style_drafter_marker(doc);
    style_headings(doc);
    prune_claim_sections(doc, directives.max_claim);
    insert_solution_images(doc, SOLUTION_IMAGES_PLACEHOLDER, &directives.solution_images);

    Ok(())
}

/// Apply all passes and serialize the finished document.
pub fn assemble_output(
    mut template: Document,
    fields: &FieldMap,
    directives: &AssemblyDirectives,
) -> Result<Vec<u8>> {
    apply(&mut template, fields, directives)?;
    template.to_json_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Block;

    #[test]
    fn test_assemble_output_is_deterministic() {
        let mut fields = FieldMap::new();
        fields.set("APP_NO", "202141012345");
        fields.set("AMENDED_CLAIM_1", "A method comprising a step.");
        let directives = AssemblyDirectives::default();

        let mut template = Document::new();
        template.push_paragraph("Application: {{APP_NO}}");
        template.push_paragraph("{{AMENDED_CLAIM_1}}");

        let a = assemble_output(template.clone(), &fields, &directives).unwrap();
        let b = assemble_output(template, &fields, &directives).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_runs_all_passes() {
        let mut fields = FieldMap::new();
        fields.set("APP_NO", "123");
        fields.set("AMENDED_CLAIM_1", "A device comprising a frame.");
        fields.set("D1D2_DISCLOSURE", "D1: a frame");
        fields.set("DX_RANGE", "D1");
        let directives = AssemblyDirectives {
            max_claim: 1,
            ..Default::default()
        };

        let mut doc = Document::new();
        doc.push_paragraph("No: {{APP_NO}}");
        doc.push_paragraph("{{AMENDED_CLAIM_1}}");
        doc.push_paragraph("Regarding Claim 2:");
        doc.push_paragraph("{{AMENDED_CLAIM_2}}");

        apply(&mut doc, &fields, &directives).unwrap();

        let text = doc.plain_text();
        assert!(text.contains("No: 123"));
        assert!(!text.contains("Regarding Claim 2"));
        assert!(doc.blocks.iter().any(Block::is_table));
    }
}
