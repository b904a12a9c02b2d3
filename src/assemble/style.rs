//! Marker and heading styling (passes 5 and 6).

use regex::Regex;

use crate::doc::{Document, Paragraph, TextRun};
use crate::DRAFTER_MARKER;

use super::MARKER_COLOR;

/// Render the literal drafter-instruction marker in the marker color
/// wherever it appears, splitting the enclosing run so surrounding text
/// keeps default styling.
pub fn style_drafter_marker(doc: &mut Document) {
    doc.for_each_paragraph_mut(|p| {
        let full = p.plain_text();
        if !full.contains(DRAFTER_MARKER) {
            return;
        }
        p.clear();
        append_marker_aware(p, &full, false);
    });
}

/// Render heading paragraphs bold and underlined.
///
/// A paragraph is a heading when its text matches the closed heading
/// phrase set or is entirely uppercase. Multi-line paragraphs are styled
/// per embedded line, with explicit line breaks re-inserted.
pub fn style_headings(doc: &mut Document) {
    doc.for_each_paragraph_mut(|p| {
        let full = p.plain_text();
        if full.trim().is_empty() {
            return;
        }

        let lines: Vec<&str> = full.split('\n').collect();
        if lines.len() > 1 {
            if !lines.iter().any(|ln| is_heading_line(ln)) && !full.contains(DRAFTER_MARKER) {
                return;
            }
            p.clear();
            for (i, line) in lines.iter().enumerate() {
                append_marker_aware(p, line, is_heading_line(line));
                if i + 1 < lines.len() {
                    p.add_line_break();
                }
            }
            return;
        }

        if is_heading_line(&full) {
            for inline in &mut p.content {
                if let crate::doc::Inline::Run(run) = inline {
                    if !run.text.trim().is_empty() {
                        run.style.bold = true;
                        run.style.underline = true;
                    }
                }
            }
        }
    });
}

/// Append `text` to the paragraph as runs, coloring any embedded drafter
/// marker and applying heading styling to the rest when requested.
fn append_marker_aware(p: &mut Paragraph, text: &str, heading: bool) {
    let style_run = |seg: &str| {
        if heading {
            TextRun::heading(seg)
        } else {
            TextRun::new(seg)
        }
    };

    if !text.contains(DRAFTER_MARKER) {
        if !text.is_empty() {
            p.add_run(style_run(text));
        }
        return;
    }

    let parts: Vec<&str> = text.split(DRAFTER_MARKER).collect();
    for (i, seg) in parts.iter().enumerate() {
        if !seg.is_empty() {
            p.add_run(style_run(seg));
        }
        if i + 1 < parts.len() {
            p.add_run(TextRun::colored(DRAFTER_MARKER, MARKER_COLOR));
        }
    }
}

/// Closed set of heading phrases plus the all-uppercase rule.
fn is_heading_line(line: &str) -> bool {
    let t = line.split_whitespace().collect::<Vec<_>>().join(" ");
    if t.is_empty() || t.chars().count() > 180 {
        return false;
    }

    let phrases = Regex::new(
        r"(?i)^(?:Applicant Submission|REPLY TO OBJECTION|STATEMENT REGARDING SUBSTANCE OF HEARING|Formal Requirement(?:\(s\)|s)?|Clarity and Conciseness|Definitiveness|Definiteness|Invention\s+u/s\b.*|Other Requirement(?:\(s\)|s)?|Prior Art|Novelty|Inventive Step|NON[\-\s]PATENTABILITY U/S 3|TECHNICAL ADVANCEMENT|TECHNICAL PROBLEM SOLVED BY THE INVENTION|TECHNICAL SOLUTION PROVIDED BY THE INVENTION|Technical Effect|Regarding Claim \d+|Yours faithfully|Enclosure)\s*:?\s*$",
    )
    .unwrap();
    if phrases.is_match(&t) {
        return true;
    }

    t == t.to_uppercase() && t.chars().any(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Inline;

    fn runs(p: &Paragraph) -> Vec<&TextRun> {
        p.content
            .iter()
            .filter_map(|i| match i {
                Inline::Run(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_marker_split_keeps_surrounding_text_plain() {
        let mut doc = Document::new();
        doc.push_paragraph(format!("Reply follows {DRAFTER_MARKER} end."));
        style_drafter_marker(&mut doc);

        let p = doc.paragraph_at(0).unwrap();
        let rs = runs(p);
        assert_eq!(rs.len(), 3);
        assert!(rs[0].style.color.is_none());
        assert_eq!(rs[1].style.color.as_deref(), Some(MARKER_COLOR));
        assert!(rs[2].style.color.is_none());
        assert_eq!(p.plain_text(), format!("Reply follows {DRAFTER_MARKER} end."));
    }

    #[test]
    fn test_heading_phrase_styled() {
        let mut doc = Document::new();
        doc.push_paragraph("Regarding Claim 5:");
        style_headings(&mut doc);

        let p = doc.paragraph_at(0).unwrap();
        let rs = runs(p);
        assert!(rs[0].style.bold && rs[0].style.underline);
    }

    #[test]
    fn test_uppercase_line_styled() {
        let mut doc = Document::new();
        doc.push_paragraph("TECHNICAL EFFECT");
        style_headings(&mut doc);
        let p = doc.paragraph_at(0).unwrap();
        assert!(runs(p)[0].style.bold);
    }

    #[test]
    fn test_body_text_not_styled() {
        let mut doc = Document::new();
        doc.push_paragraph("The invention relates to routing.");
        style_headings(&mut doc);
        let p = doc.paragraph_at(0).unwrap();
        assert!(!runs(p)[0].style.bold);
    }

    #[test]
    fn test_multiline_styles_per_line() {
        let mut doc = Document::new();
        doc.push_paragraph("Novelty\nThe claim is novel over D1.");
        style_headings(&mut doc);

        let p = doc.paragraph_at(0).unwrap();
        let rs = runs(p);
        assert_eq!(rs.len(), 2);
        assert!(rs[0].style.bold && rs[0].style.underline);
        assert!(!rs[1].style.bold);
        // Line break re-inserted between the lines.
        assert_eq!(p.plain_text(), "Novelty\nThe claim is novel over D1.");
    }

    #[test]
    fn test_multiline_without_headings_untouched() {
        let mut doc = Document::new();
        doc.push_paragraph("plain line one\nplain line two");
        style_headings(&mut doc);
        let p = doc.paragraph_at(0).unwrap();
        assert_eq!(runs(p).len(), 1);
    }

    #[test]
    fn test_marker_survives_heading_rebuild() {
        let mut doc = Document::new();
        doc.push_paragraph(format!("Formal Requirements\nFix the margins.\n{DRAFTER_MARKER}"));
        style_drafter_marker(&mut doc);
        style_headings(&mut doc);

        let p = doc.paragraph_at(0).unwrap();
        let marker_run = runs(p)
            .into_iter()
            .find(|r| r.text == DRAFTER_MARKER)
            .expect("marker run present");
        assert_eq!(marker_run.style.color.as_deref(), Some(MARKER_COLOR));
    }
}
