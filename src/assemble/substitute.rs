//! Scalar placeholder substitution (pass 4).

use crate::doc::{Document, Inline};
use crate::model::FieldMap;

/// Replace every `{{NAME}}` token in every run of every paragraph,
/// including paragraphs inside table cells.
///
/// Matching happens within a single run: template authors must keep each
/// token unsplit, and values never need to span runs.
pub fn substitute_scalars(doc: &mut Document, fields: &FieldMap) {
    doc.for_each_paragraph_mut(|p| {
        for inline in &mut p.content {
            if let Inline::Run(run) = inline {
                if !run.text.contains("{{") {
                    continue;
                }
                for (name, value) in fields.iter() {
                    let token = format!("{{{{{name}}}}}");
                    if run.text.contains(&token) {
                        run.text = run.text.replace(&token, value);
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Block, Table};

    #[test]
    fn test_substitution_in_paragraphs_and_cells() {
        let mut fields = FieldMap::new();
        fields.set("APP_NO", "202141012345");
        fields.set("CITY", "Chennai");

        let mut doc = Document::new();
        doc.push_paragraph("Application {{APP_NO}} filed at {{CITY}}.");
        let mut table = Table::with_size(1, 1);
        table.cell_mut(0, 0).unwrap().set_text("No: {{APP_NO}}");
        doc.push(Block::Table(table));

        substitute_scalars(&mut doc, &fields);

        assert_eq!(
            doc.paragraph_at(0).unwrap().plain_text(),
            "Application 202141012345 filed at Chennai."
        );
        assert!(doc.plain_text().contains("No: 202141012345"));
    }

    #[test]
    fn test_unknown_tokens_left_alone() {
        let mut doc = Document::new();
        doc.push_paragraph("{{UNKNOWN_TOKEN}}");
        substitute_scalars(&mut doc, &FieldMap::new());
        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "{{UNKNOWN_TOKEN}}");
    }

    #[test]
    fn test_repeated_token_replaced_everywhere() {
        let mut fields = FieldMap::new();
        fields.set("DX_RANGE", "D1-D3");

        let mut doc = Document::new();
        doc.push_paragraph("{{DX_RANGE}} and again {{DX_RANGE}}");
        substitute_scalars(&mut doc, &fields);
        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "D1-D3 and again D1-D3");
    }
}
