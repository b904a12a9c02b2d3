//! Dead claim-section pruning (pass 7).

use regex::Regex;

use crate::doc::Document;

/// Remove "Regarding Claim N" template sections for claims beyond the
/// maximum claim number actually available. Each section is a heading
/// paragraph plus its body paragraph.
///
/// The template carries static sections up to claim 10; with all ten
/// claims present there is nothing to prune.
pub fn prune_claim_sections(doc: &mut Document, max_claim: u32) {
    if max_claim >= 10 {
        return;
    }

    let heading = Regex::new(r"(?i)^\s*Regarding\s+Claim\s+(\d+)\s*:\s*$").unwrap();

    let mut to_remove: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < doc.blocks.len() {
        let claim_no = doc.paragraph_at(i).and_then(|p| {
            let text = p.plain_text();
            heading.captures(&text).and_then(|caps| caps[1].parse::<u32>().ok())
        });
        if let Some(n) = claim_no {
            if n > max_claim {
                to_remove.push(i);
                if doc.paragraph_at(i + 1).is_some() {
                    to_remove.push(i + 1);
                    i += 1;
                }
            }
        }
        i += 1;
    }

    for idx in to_remove.into_iter().rev() {
        doc.remove(idx);
    }
}
