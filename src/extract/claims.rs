//! Numbered-claim parsing from specification or amended-claims text.

use regex::Regex;

use crate::model::ClaimMap;

use super::clean;

/// Parse claims out of specification text.
///
/// Scans from the first "claims" heading occurrence (whole text when
/// absent) for `<n>. <text>` paragraphs, capturing up to the next
/// numbered paragraph.
pub fn parse_specification_claims(spec_text: &str) -> ClaimMap {
    let heading = Regex::new(r"(?i)claims").unwrap();
    let tail = match heading.find(spec_text) {
        Some(m) => &spec_text[m.start()..],
        None => spec_text,
    };
    numbered_blocks(tail, 50)
}

/// Parse claims out of an amended-claims document.
///
/// A secondary path handles the "Claim 1 has been amended to recite:"
/// phrasing when claim 1 is not found as a numbered paragraph.
pub fn parse_amended_claims(text: &str) -> ClaimMap {
    if text.trim().is_empty() {
        return ClaimMap::new();
    }

    let mut claims = numbered_blocks(text, 99);

    if claims.get(1).is_none() {
        let recite = Regex::new(r"(?i)Claim\s*1\s+has\s+been\s+amended\s+to\s+recite\s*:").unwrap();
        let stop = Regex::new(r"(?i)\n\s*TECHNICAL\s+ADVANCEMENT\s*:").unwrap();
        if let Some(m) = recite.find(text) {
            let rest = &text[m.end()..];
            let end = stop.find(rest).map(|s| s.start()).unwrap_or(rest.len());
            let body = clean(&rest[..end]);
            if !body.is_empty() {
                claims.insert(1, body);
            }
        }
    }

    claims
}

/// Collect `<n>. <text>` paragraphs up to the next numbered paragraph or
/// end of text, keeping numbers within `1..=ceiling`.
fn numbered_blocks(text: &str, ceiling: u32) -> ClaimMap {
    let heading = Regex::new(r"(?m)^\s*(\d{1,2})\.\s+").unwrap();

    let anchors: Vec<(usize, usize, u32)> = heading
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number: u32 = caps.get(1)?.as_str().parse().ok()?;
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    let mut claims = ClaimMap::new();
    for (i, &(_, body_start, number)) in anchors.iter().enumerate() {
        if number == 0 || number > ceiling {
            continue;
        }
        let body_end = anchors.get(i + 1).map(|a| a.0).unwrap_or(text.len());
        let body = clean(&text[body_start..body_end]);
        if !body.is_empty() {
            claims.insert(number, body);
        }
    }
    claims
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = "\
DETAILED DESCRIPTION
The system uses 1. a sensor (not a claim line).
CLAIMS
1. A method comprising:
   receiving a packet; and
   forwarding the packet.
2. The method of claim 1, wherein the packet is buffered.
5. The method of claim 2, wherein the buffer is bounded.";

    #[test]
    fn test_specification_claims() {
        let claims = parse_specification_claims(SPEC);
        assert_eq!(claims.len(), 3);
        assert!(claims.get(1).unwrap().starts_with("A method comprising:"));
        assert!(claims.get(2).unwrap().contains("buffered"));
        assert!(claims.get(5).unwrap().contains("bounded"));
        assert_eq!(claims.max_number(), 5);
    }

    #[test]
    fn test_claim_text_is_whitespace_normalized() {
        let claims = parse_specification_claims(SPEC);
        assert_eq!(
            claims.get(1).unwrap(),
            "A method comprising: receiving a packet; and forwarding the packet."
        );
    }

    #[test]
    fn test_claims_without_heading_scan_whole_text() {
        let text = "1. A device with a frame.\n2. The device of claim 1.";
        let claims = parse_specification_claims(text);
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn test_amended_claims_numbered() {
        let text = "1. An amended method.\n2. The method of claim 1.";
        let claims = parse_amended_claims(text);
        assert_eq!(claims.get(1), Some("An amended method."));
    }

    #[test]
    fn test_amended_recite_phrasing() {
        let text = "\
The applicant submits amendments.
Claim 1 has been amended to recite: A method of routing
with deadline scheduling.
TECHNICAL ADVANCEMENT:
The routing is faster.";
        let claims = parse_amended_claims(text);
        assert_eq!(
            claims.get(1),
            Some("A method of routing with deadline scheduling.")
        );
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_amended_claims("").is_empty());
        assert!(parse_specification_claims("").is_empty());
    }
}
