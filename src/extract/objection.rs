//! Objection-section extraction from hearing-notice text.
//!
//! The notice lists outstanding objections under short headings
//! ("Novelty", "Inventive Step", "Formal Requirement(s)", non-patentability
//! under section 3(k)). This module splits the notice at those headings,
//! compacts each chunk back into paragraphs, and separates the 3(k)
//! narrative from the rest.

use regex::Regex;

use crate::DRAFTER_MARKER;

use super::clean;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingKind {
    NonPatentability,
    Section,
}

fn heading_kind(line: &str) -> Option<HeadingKind> {
    let ln = clean(line);
    if ln.is_empty() || ln.chars().count() > 120 {
        return None;
    }

    let nonpat = Regex::new(
        r"(?i)^(?:Non[\-\s]?Patentability(?:\s*u/s\s*3(?:\s*\(k\))?)?|Section\s*3(?:\s*\(k\))?)(?:\s*[:\-].*)?$",
    )
    .unwrap();
    if nonpat.is_match(&ln) {
        // "section 3 of the Act is..." style prose is not a heading.
        let of_the = Regex::new(r"(?i)\bof\s+the\b").unwrap();
        if of_the.is_match(&ln) && !ln.contains(':') {
            return None;
        }
        return Some(HeadingKind::NonPatentability);
    }

    let section = Regex::new(
        r"(?i)^(?:Clarity\s+and\s+Conciseness|Definitiveness|Definiteness|Formal\s+Requirement(?:s)?|Invention\s+u/s\b.*|Other\s+Requirement(?:s)?|Prior\s+Art|Novelty|Inventive\s+Step)\b",
    )
    .unwrap();
    if section.is_match(&ln) {
        return Some(HeadingKind::Section);
    }
    None
}

fn is_notice_noise_line(line: &str) -> bool {
    let ln = line.trim();
    if ln.is_empty() {
        return true;
    }
    let low = ln.to_lowercase();
    if low.contains("(cid:") {
        return true;
    }
    let full: [&str; 4] = [
        r"^\d+\s*/\s*\d+$",
        r"^page\s*\d+(\s*of\s*\d+)?$",
        r"^date\s*[\-:]\s*\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}$",
        r"^\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}$",
    ];
    if full.iter().any(|p| Regex::new(p).unwrap().is_match(&low)) {
        return true;
    }
    if low.contains("assistant controller of patents") {
        return true;
    }
    if low.contains("the following objection(s) are still outstanding") {
        return true;
    }
    ln.chars().filter(|c| !c.is_ascii()).count() > 8
}

fn join_wrapped(lines: &[String]) -> String {
    let Some(first) = lines.first() else {
        return String::new();
    };
    let mut acc = first.clone();
    for ln in &lines[1..] {
        if acc.ends_with('-') {
            acc.pop();
            acc.push_str(ln);
        } else if acc.ends_with('/') || acc.ends_with('(') {
            acc.push_str(ln);
        } else {
            acc.push(' ');
            acc.push_str(ln);
        }
    }
    let acc = Regex::new(r"\s+([,.;:])").unwrap().replace_all(&acc, "$1").to_string();
    let acc = Regex::new(r"\(\s+").unwrap().replace_all(&acc, "(").to_string();
    let acc = Regex::new(r"\s+\)").unwrap().replace_all(&acc, ")").to_string();
    acc.trim().to_string()
}

/// Compact an objection chunk: keep the heading line, re-join wrapped
/// body lines into paragraphs, and give each embedded "Dn:" citation and
/// "Document Dn" clause its own paragraph.
fn compact_chunk(chunk: &str) -> String {
    let raw: Vec<String> = chunk.lines().map(|ln| clean(ln)).collect();
    if raw.is_empty() {
        return String::new();
    }

    let objections_tail = Regex::new(r"(?i)following\s+objections\s*:").unwrap();
    let objections_tail_end = Regex::new(r"(?i)following\s+objections\s*:\s*$").unwrap();
    let dx_split = Regex::new(r"(?i)\s+(D\d+\s*:)").unwrap();
    let document_split = Regex::new(r"(?i)\s+((?:Similarly,\s*)?Document\s+D\d+\b)").unwrap();
    let dx_line = Regex::new(r"(?i)^D\d+\s*:").unwrap();
    let document_line = Regex::new(r"(?i)^(?:Similarly,\s*)?Document\s+D\d+\b").unwrap();
    let numbered_line = Regex::new(r"^\d+\s*[.)]").unwrap();

    let heading = raw[0].clone();
    let body = &raw[1..];
    let mut out: Vec<String> = Vec::new();
    if !heading.is_empty() {
        out.push(heading);
    }

    let mut para_buf: Vec<String> = Vec::new();

    fn flush(para_buf: &mut Vec<String>, out: &mut Vec<String>) {
        if !para_buf.is_empty() {
            out.push(join_wrapped(para_buf));
            para_buf.clear();
        }
    }

    for ln in body {
        if ln.is_empty() {
            flush(&mut para_buf, &mut out);
            if out.last().map(|s| !s.is_empty()).unwrap_or(false) {
                out.push(String::new());
            }
            continue;
        }

        let mut expanded = ln.clone();
        if objections_tail.is_match(&expanded) {
            expanded = dx_split.replace_all(&expanded, "\n$1").to_string();
        }
        expanded = document_split.replace_all(&expanded, "\n$1").to_string();

        for part in expanded.lines().map(str::trim).filter(|p| !p.is_empty()) {
            if para_buf
                .last()
                .map(|last| objections_tail_end.is_match(last))
                .unwrap_or(false)
            {
                flush(&mut para_buf, &mut out);
            }
            if dx_line.is_match(part) {
                flush(&mut para_buf, &mut out);
                out.push(part.to_string());
                continue;
            }
            if document_line.is_match(part) {
                flush(&mut para_buf, &mut out);
            }
            if numbered_line.is_match(part) && !para_buf.is_empty() {
                flush(&mut para_buf, &mut out);
            }
            para_buf.push(part.to_string());
        }
    }
    flush(&mut para_buf, &mut out);

    let text = out.join("\n").trim().to_string();
    Regex::new(r"\n{3,}").unwrap().replace_all(&text, "\n\n").to_string()
}

fn strip_nonpat_heading(chunk: &str) -> String {
    let lines: Vec<&str> = chunk.lines().map(str::trim).filter(|ln| !ln.is_empty()).collect();
    let body = match lines.first() {
        Some(first) if heading_kind(first) == Some(HeadingKind::NonPatentability) => &lines[1..],
        _ => &lines[..],
    };
    body.join("\n").trim().to_string()
}

/// Formal-requirement and clarity chunks end with a drafter-instruction
/// marker so the reply position is visible in the output.
fn inject_drafter_marker(chunk: &str) -> String {
    let lines: Vec<&str> = chunk.lines().collect();
    let Some(first) = lines.first() else {
        return String::new();
    };
    let heading = clean(first);
    let wants_marker =
        Regex::new(r"(?i)^(Formal\s+Requirement(?:s)?|Clarity\s+and\s+Conciseness)\b").unwrap();
    if !wants_marker.is_match(&heading) {
        return chunk.trim().to_string();
    }
    if lines.iter().any(|ln| ln.trim().to_uppercase() == DRAFTER_MARKER) {
        return chunk.trim().to_string();
    }
    format!("{}\n{DRAFTER_MARKER}", chunk.trim())
}

/// Split the notice into objection chunks and return
/// `(formal_objections_block, nonpatentability_block)`.
///
/// Both blocks are empty when the notice carries no recognizable
/// objection headings; the caller treats that as a non-mandatory miss.
pub fn objection_blocks(notice_text: &str) -> (String, String) {
    let text = notice_text.trim();
    if text.is_empty() {
        return (String::new(), String::new());
    }

    let lines: Vec<&str> = text.lines().map(|ln| ln.trim_end()).collect();
    let heading_indices: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, ln)| heading_kind(ln).is_some())
        .map(|(i, _)| i)
        .collect();
    if heading_indices.is_empty() {
        return (String::new(), String::new());
    }

    let mut main_chunks: Vec<String> = Vec::new();
    let mut nonpat_chunks: Vec<String> = Vec::new();

    for (i, &start) in heading_indices.iter().enumerate() {
        let end = heading_indices.get(i + 1).copied().unwrap_or(lines.len());
        let kind = heading_kind(lines[start]);
        let chunk_lines: Vec<&str> = lines[start..end]
            .iter()
            .copied()
            .filter(|ln| !is_notice_noise_line(ln))
            .collect();
        let chunk = compact_chunk(&chunk_lines.join("\n"));
        if chunk.is_empty() {
            continue;
        }
        match kind {
            Some(HeadingKind::NonPatentability) => {
                let stripped = strip_nonpat_heading(&chunk);
                if !stripped.is_empty() {
                    nonpat_chunks.push(stripped);
                }
            }
            _ => main_chunks.push(inject_drafter_marker(&chunk)),
        }
    }

    (main_chunks.join("\n\n").trim().to_string(), nonpat_chunks.join("\n\n").trim().to_string())
}

/// Fallback capture of the examiner's 3(k) reasoning when no
/// non-patentability heading chunk was found.
pub fn reply_3k_fallback(notice_text: &str) -> String {
    let starts = [
        Regex::new(r"(?i)Claims\s+1\s*-\s*\d+\s+are\s+method\s+claims").unwrap(),
        Regex::new(r"(?i)prima\s+facie\s+falls\s+within\s+scope\s+of\s+clause\s*\(k\)").unwrap(),
    ];
    let boundary = Regex::new(r"(?i)Therefore,\s*the\s*claims\b|Therefore,").unwrap();

    for start in &starts {
        let Some(m) = start.find(notice_text) else {
            continue;
        };
        let rest = &notice_text[m.start()..];
        let end = boundary
            .find(&rest[m.len()..])
            .map(|b| m.len() + b.start())
            .unwrap_or(rest.len());
        let window: String = clean(&rest[..end]).chars().take(1800).collect();
        if !window.is_empty() {
            return window;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICE: &str = "\
Novelty
Claim 1 lacks novelty in view of the cited documents. The applicant relies on the following objections: D1: US2010/0123456A1 D2: EP1234567B1
Document D1 discloses the claimed sensor. Similarly, Document D2 discloses the gateway.
Formal Requirements
The claims must be renumbered se-
quentially.
Non-Patentability u/s 3(k):
Claims 1-10 are method claims implemented in software. The alleged invention prima facie falls within scope of clause (k).
";

    #[test]
    fn test_heading_kinds() {
        assert_eq!(heading_kind("Novelty"), Some(HeadingKind::Section));
        assert_eq!(heading_kind("Inventive Step:"), Some(HeadingKind::Section));
        assert_eq!(
            heading_kind("Non-Patentability u/s 3(k)"),
            Some(HeadingKind::NonPatentability)
        );
        assert_eq!(heading_kind("Section 3(k): software per se"), Some(HeadingKind::NonPatentability));
        assert_eq!(heading_kind("ordinary prose line"), None);
        // Prose mentioning section 3 of the Act is not a heading.
        assert_eq!(heading_kind("Section 3 of the Patents Act"), None);
    }

    #[test]
    fn test_objection_blocks_split() {
        let (main, nonpat) = objection_blocks(NOTICE);
        assert!(main.contains("Novelty"));
        assert!(main.contains("Formal Requirements"));
        assert!(!main.contains("Non-Patentability"));
        assert!(nonpat.contains("method claims implemented in software"));
        assert!(!nonpat.contains("Non-Patentability"));
    }

    #[test]
    fn test_dx_citations_get_own_lines() {
        let (main, _) = objection_blocks(NOTICE);
        assert!(main.contains("\nD1: US2010/0123456A1"), "got: {main}");
        assert!(main.contains("\nD2: EP1234567B1"), "got: {main}");
        assert!(main.contains("\nDocument D1 discloses the claimed sensor."), "got: {main}");
    }

    #[test]
    fn test_drafter_marker_injected_for_formal_requirements() {
        let (main, _) = objection_blocks(NOTICE);
        let formal_pos = main.find("Formal Requirements").unwrap();
        assert!(main[formal_pos..].contains(DRAFTER_MARKER));
        // But not injected under Novelty.
        let novelty_section = &main[..formal_pos];
        assert!(!novelty_section.contains(DRAFTER_MARKER));
    }

    #[test]
    fn test_hyphen_wrapped_lines_joined() {
        let (main, _) = objection_blocks(NOTICE);
        assert!(main.contains("renumbered sequentially."), "got: {main}");
    }

    #[test]
    fn test_reply_3k_fallback() {
        let text = "Claims 1-10 are method claims implemented in software. Therefore, the claims 1-10 are not allowable.";
        let out = reply_3k_fallback(text);
        assert!(out.starts_with("Claims 1-10 are method claims"));
        assert!(!out.contains("not allowable"));
    }

    #[test]
    fn test_reply_3k_prima_facie_variant() {
        let text = "The invention prima facie falls within scope of clause (k) of section 3. Therefore, it is excluded.";
        let out = reply_3k_fallback(text);
        assert!(out.starts_with("prima facie falls within scope"));
        assert!(!out.contains("excluded"));
    }

    #[test]
    fn test_empty_notice() {
        assert_eq!(objection_blocks(""), (String::new(), String::new()));
        assert_eq!(reply_3k_fallback("nothing relevant"), "");
    }
}
