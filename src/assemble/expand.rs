//! Multi-paragraph block expansion (pass 3).

use regex::Regex;

use crate::doc::{Block, Document, Paragraph};

/// Replace a placeholder paragraph with one paragraph per blank-line
/// block of the value, preserving the paragraph's style and splicing any
/// literal text around the placeholder into the first/last emitted
/// paragraph.
///
/// An empty value simply removes the placeholder token.
pub fn expand_block_placeholder(doc: &mut Document, placeholder: &str, value: &str) {
    let Some(idx) = doc.find_paragraph(|p| p.plain_text().contains(placeholder)) else {
        return;
    };

    let blank_split = Regex::new(r"\n{2,}").unwrap();
    let blocks: Vec<String> = blank_split
        .split(value)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    let full = doc.paragraph_at(idx).map(|p| p.plain_text()).unwrap_or_default();
    let style = doc
        .paragraph_at(idx)
        .map(|p| p.style.clone())
        .unwrap_or_default();
    let (before, after) = match full.split_once(placeholder) {
        Some((b, a)) => (b.trim().to_string(), a.trim().to_string()),
        None => (String::new(), String::new()),
    };

    if blocks.is_empty() {
        if let Some(p) = doc.paragraph_at_mut(idx) {
            p.set_text(full.replace(placeholder, "").trim().to_string());
        }
        return;
    }

    let first_text = if before.is_empty() {
        blocks[0].clone()
    } else {
        format!("{before}\n{}", blocks[0])
    };
    if let Some(p) = doc.paragraph_at_mut(idx) {
        p.set_text(first_text);
    }

    let mut anchor = idx;
    for block in &blocks[1..] {
        let mut p = Paragraph::with_text(block);
        p.style = style.clone();
        anchor = doc.insert_after(anchor, Block::Paragraph(p));
    }

    if !after.is_empty() {
        let mut p = Paragraph::with_text(after);
        p.style = style;
        doc.insert_after(anchor, Block::Paragraph(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Alignment;

    #[test]
    fn test_single_block_replaces_in_place() {
        let mut doc = Document::new();
        doc.push_paragraph("{{TECH_EFFECT}}");
        expand_block_placeholder(&mut doc, "{{TECH_EFFECT}}", "Latency is halved.");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "Latency is halved.");
    }

    #[test]
    fn test_multiple_blocks_become_paragraphs() {
        let mut doc = Document::new();
        doc.push_paragraph("before");
        doc.push_paragraph("{{TECH_EFFECT}}");
        doc.push_paragraph("after");

        expand_block_placeholder(&mut doc, "{{TECH_EFFECT}}", "First.\n\nSecond.\n\nThird.");

        assert_eq!(doc.len(), 5);
        assert_eq!(doc.paragraph_at(1).unwrap().plain_text(), "First.");
        assert_eq!(doc.paragraph_at(2).unwrap().plain_text(), "Second.");
        assert_eq!(doc.paragraph_at(3).unwrap().plain_text(), "Third.");
        assert_eq!(doc.paragraph_at(4).unwrap().plain_text(), "after");
    }

    #[test]
    fn test_style_preserved_on_emitted_paragraphs() {
        let mut doc = Document::new();
        let mut p = Paragraph::with_text("{{TECH_EFFECT}}");
        p.style.alignment = Alignment::Justify;
        doc.push(Block::Paragraph(p));

        expand_block_placeholder(&mut doc, "{{TECH_EFFECT}}", "One.\n\nTwo.");

        assert_eq!(doc.paragraph_at(0).unwrap().style.alignment, Alignment::Justify);
        assert_eq!(doc.paragraph_at(1).unwrap().style.alignment, Alignment::Justify);
    }

    #[test]
    fn test_leading_and_trailing_literals_spliced() {
        let mut doc = Document::new();
        doc.push_paragraph("Intro: {{TECH_EFFECT}} Outro.");

        expand_block_placeholder(&mut doc, "{{TECH_EFFECT}}", "Body one.\n\nBody two.");

        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "Intro:\nBody one.");
        assert_eq!(doc.paragraph_at(1).unwrap().plain_text(), "Body two.");
        assert_eq!(doc.paragraph_at(2).unwrap().plain_text(), "Outro.");
    }

    #[test]
    fn test_empty_value_clears_placeholder() {
        let mut doc = Document::new();
        doc.push_paragraph("Keep: {{TECH_EFFECT}}");
        expand_block_placeholder(&mut doc, "{{TECH_EFFECT}}", "");
        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "Keep:");
    }

    #[test]
    fn test_missing_placeholder_is_no_op() {
        let mut doc = Document::new();
        doc.push_paragraph("no tokens");
        expand_block_placeholder(&mut doc, "{{TECH_EFFECT}}", "value");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "no tokens");
    }
}
