//! Pattern-based field and section extraction over normalized text.
//!
//! Every extractor in this module degrades to an empty value on a miss;
//! none of them fail. Whether an empty field is fatal is decided by the
//! pipeline, not here.

mod abstract_text;
mod claims;
mod meta;
mod objection;
mod section;

pub use abstract_text::{AbstractExtractor, AbstractOptions};
pub use claims::{parse_amended_claims, parse_specification_claims};
pub use meta::{agent_from_drawings, MetaExtractor};
pub use objection::{objection_blocks, reply_3k_fallback};
pub use section::{
    extract_section, figure_descriptions, format_block, technical_advancement, technical_effect,
    technical_problem, technical_solution,
};

use regex::Regex;

/// Numeric date pattern fragment (dd/mm/yyyy with ./- separators).
pub(crate) const NUMERIC_DATE: &str = r"[0-9]{1,2}[./\-][0-9]{1,2}[./\-][0-9]{2,4}";

/// Collapse internal whitespace and trim.
pub(crate) fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a date string to dd/mm/yyyy; empty when no date is present.
pub(crate) fn normalize_date(s: &str) -> String {
    let date_re = Regex::new(r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{2,4})\b").unwrap();
    let cleaned = clean(s);
    let Some(caps) = date_re.captures(&cleaned) else {
        return String::new();
    };
    let day: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let mut year = caps[3].to_string();
    if year.len() == 2 {
        year = format!("20{year}");
    }
    format!("{day:02}/{month:02}/{year}")
}

/// Canonical form of a document number for duplicate detection: uppercase
/// with whitespace and separator punctuation removed.
pub(crate) fn canonical_docno(s: &str) -> String {
    s.to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-' | ';' | ':' | ','))
        .collect()
}

/// Try an ordered list of patterns against the text, returning the first
/// capture group of the first match.
///
/// This is the crate's heuristic-priority-chain primitive: ordering
/// encodes which phrasing is most authoritative, and new variants are
/// added to the end of the list.
pub(crate) fn first_capture(patterns: &[Regex], text: &str) -> String {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return clean(m.as_str());
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("1.2.24"), "01/02/2024");
        assert_eq!(normalize_date("01-02-2024"), "01/02/2024");
        assert_eq!(normalize_date("issued 5/11/2019 here"), "05/11/2019");
        assert_eq!(normalize_date("no date"), "");
    }

    #[test]
    fn test_canonical_docno() {
        assert_eq!(canonical_docno("us 2010/0123456 (a1)"), "US2010/0123456A1");
        assert_eq!(canonical_docno("EP-1 234 567;"), "EP1234567");
    }

    #[test]
    fn test_first_capture_order() {
        let patterns = vec![
            Regex::new(r"(?i)Date\s+of\s+Dispatch\s*:\s*(\S+)").unwrap(),
            Regex::new(r"(?i)Date\s*:\s*(\S+)").unwrap(),
        ];
        let text = "Date: 09/09/2023\nDate of Dispatch: 01/02/2024";
        assert_eq!(first_capture(&patterns, text), "01/02/2024");
    }
}
