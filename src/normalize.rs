//! Page-text normalization pipeline.
//!
//! Turns raw per-page text (as produced by an external page-text reader)
//! into a cleaned, de-duplicated line stream: repeated headers/footers,
//! page markers, office boilerplate, embedded font artifacts and
//! high-noise lines are removed before any field extraction runs.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Options for page-text normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// A line recurring on at least this fraction of pages is a
    /// repeated-header/footer candidate.
    pub repeat_ratio: f64,

    /// Minimum page count for the repeated-line rule.
    pub repeat_min_pages: usize,

    /// Repeated-line candidates longer than this (normalized) are kept.
    pub max_repeated_len: usize,

    /// Number of lines at each page edge checked for office boilerplate.
    pub edge_lines: usize,

    /// Lines with a non-ASCII character ratio above this are dropped.
    pub max_non_ascii_ratio: f64,

    /// Minimum line length for the non-ASCII ratio rule.
    pub non_ascii_min_len: usize,

    /// Normalize Unicode to NFC form.
    pub normalize_unicode: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repeated-line page-fraction threshold.
    pub fn with_repeat_ratio(mut self, ratio: f64) -> Self {
        self.repeat_ratio = ratio;
        self
    }

    /// Set the non-ASCII ratio cutoff.
    pub fn with_max_non_ascii_ratio(mut self, ratio: f64) -> Self {
        self.max_non_ascii_ratio = ratio;
        self
    }

    /// Disable Unicode NFC normalization.
    pub fn without_unicode_normalization(mut self) -> Self {
        self.normalize_unicode = false;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            repeat_ratio: 0.6,
            repeat_min_pages: 2,
            max_repeated_len: 180,
            edge_lines: 3,
            max_non_ascii_ratio: 0.45,
            non_ascii_min_len: 8,
            normalize_unicode: true,
        }
    }
}

/// Page-text normalizer.
///
/// The normalizer never fails: pathological input (no pages, empty pages)
/// yields an empty string, which downstream extraction treats as
/// "no fields found".
pub struct PageNormalizer {
    options: NormalizeOptions,
    page_marker: Vec<Regex>,
    date_token: Regex,
    bare_date_line: Regex,
    date_keyword: Regex,
    edge_boilerplate: Regex,
}

impl PageNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            page_marker: vec![
                Regex::new(r"^[-\u{2013}\u{2014}]?\s*\d{1,4}\s*[-\u{2013}\u{2014}]?$").unwrap(),
                Regex::new(r"^\d+\s*/\s*\d+$").unwrap(),
                Regex::new(r"^(?:p|pg|page)\.?\s*\d+\s*/\s*\d+$").unwrap(),
                Regex::new(r"^page\s*\d+(\s*of\s*\d+)?$").unwrap(),
            ],
            date_token: Regex::new(r"\d{1,2}[./-]\d{1,2}[./-]\d{2,4}").unwrap(),
            bare_date_line: Regex::new(r"^(?:date\s*[:\-]?\s*)?\d{1,2}[./-]\d{1,2}[./-]\d{2,4}$")
                .unwrap(),
            date_keyword: Regex::new(r"\b(date|dated|dispatch|hearing|email)\b").unwrap(),
            edge_boilerplate: Regex::new(
                r"(?i)\bpatent\s+agent\b|\boffice\s+of\s+the\s+controller\s+general\b|\bintellectual\s+property\s+india\b",
            )
            .unwrap(),
        }
    }

    /// Normalize pages into a single cleaned text, collapsing in-line
    /// whitespace.
    pub fn normalize(&self, pages: &[String]) -> String {
        self.run(pages, false)
    }

    /// Normalize pages while preserving in-line spacing and indentation.
    ///
    /// Used where layout carries meaning (claim blocks); the filtering
    /// logic is otherwise identical to [`normalize`](Self::normalize).
    pub fn normalize_preserving_layout(&self, pages: &[String]) -> String {
        self.run(pages, true)
    }

    fn run(&self, pages: &[String], preserve_layout: bool) -> String {
        let pages_lines: Vec<Vec<String>> = pages
            .iter()
            .map(|page| {
                page.lines()
                    .filter(|ln| !ln.trim().is_empty())
                    .map(|ln| {
                        if preserve_layout {
                            ln.trim_end_matches('\r').trim_end().to_string()
                        } else {
                            ln.trim().to_string()
                        }
                    })
                    .collect()
            })
            .collect();

        if pages_lines.is_empty() {
            return String::new();
        }

        let repeated = repeated_line_keys(
            &pages_lines,
            self.options.repeat_ratio,
            self.options.repeat_min_pages,
            self.options.max_repeated_len,
        );

        let mut cleaned_pages: Vec<String> = Vec::with_capacity(pages_lines.len());
        for lines in &pages_lines {
            let total = lines.len();
            let mut cleaned: Vec<&str> = Vec::with_capacity(total);
            for (idx, ln) in lines.iter().enumerate() {
                let key = normalize_line_key(ln);
                if key.is_empty() {
                    continue;
                }
                if repeated.contains(&key) && !self.keep_even_if_repeated(&key) {
                    continue;
                }
                let near_edge = idx <= self.options.edge_lines.saturating_sub(1)
                    || idx + self.options.edge_lines >= total;
                if near_edge && self.is_edge_boilerplate(ln) {
                    continue;
                }
                if self.is_page_marker(ln) {
                    continue;
                }
                if ln.to_lowercase().contains("(cid:") {
                    continue;
                }
                if non_ascii_ratio(ln) > self.options.max_non_ascii_ratio
                    && ln.chars().count() > self.options.non_ascii_min_len
                {
                    continue;
                }
                cleaned.push(ln);
            }
            cleaned_pages.push(cleaned.join("\n"));
        }

        let joined = cleaned_pages
            .iter()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        if self.options.normalize_unicode {
            joined.nfc().collect()
        } else {
            joined
        }
    }

    /// Whether a line is a pure page marker ("12", "3/10", "Page 2 of 9").
    pub fn is_page_marker(&self, line: &str) -> bool {
        let key = normalize_line_key(line);
        if key.is_empty() {
            return true;
        }
        self.page_marker.iter().any(|re| re.is_match(&key))
    }

    /// Repeated date stamps must survive header/footer removal: dispatch
    /// and hearing dates frequently recur on every page of a notice.
    fn keep_even_if_repeated(&self, key: &str) -> bool {
        if key.is_empty() || !self.date_token.is_match(key) {
            return false;
        }
        if self.bare_date_line.is_match(key) {
            return true;
        }
        self.date_keyword.is_match(key)
    }

    fn is_edge_boilerplate(&self, line: &str) -> bool {
        let key = normalize_line_key(line);
        if key.is_empty() || key.chars().count() > 140 {
            return false;
        }
        self.edge_boilerplate.is_match(&key)
    }
}

impl Default for PageNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Case/whitespace-normalized comparison key for a line.
pub(crate) fn normalize_line_key(line: &str) -> String {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Ratio of non-ASCII characters in a line.
pub(crate) fn non_ascii_ratio(line: &str) -> f64 {
    let total = line.chars().count();
    if total == 0 {
        return 0.0;
    }
    let non_ascii = line.chars().filter(|c| !c.is_ascii()).count();
    non_ascii as f64 / total as f64
}

/// Normalized keys of lines recurring on at least
/// `max(min_pages, ratio * page_count)` pages, capped at `max_len` chars.
pub(crate) fn repeated_line_keys(
    pages_lines: &[Vec<String>],
    ratio: f64,
    min_pages: usize,
    max_len: usize,
) -> HashSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for lines in pages_lines {
        let seen: HashSet<String> = lines
            .iter()
            .map(|ln| normalize_line_key(ln))
            .filter(|k| !k.is_empty())
            .collect();
        for key in seen {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let threshold = min_pages.max((pages_lines.len() as f64 * ratio) as usize);
    counts
        .into_iter()
        .filter(|(key, count)| *count >= threshold && key.chars().count() <= max_len)
        .map(|(key, _)| key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        let normalizer = PageNormalizer::default();
        assert_eq!(normalizer.normalize(&[]), "");
        assert_eq!(normalizer.normalize(&pages(&["", "  \n  "])), "");
    }

    #[test]
    fn test_page_markers_removed() {
        let normalizer = PageNormalizer::default();
        let text = normalizer.normalize(&pages(&["Some content\n3/10\nPage 2 of 9\n- 4 -"]));
        assert_eq!(text, "Some content");
    }

    #[test]
    fn test_repeated_header_removed() {
        let normalizer = PageNormalizer::default();
        let input = pages(&[
            "OFFICE COPY\nFirst page body",
            "OFFICE COPY\nSecond page body",
            "OFFICE COPY\nThird page body",
        ]);
        let text = normalizer.normalize(&input);
        assert!(!text.contains("OFFICE COPY"));
        assert!(text.contains("First page body"));
        assert!(text.contains("Third page body"));
    }

    #[test]
    fn test_repeated_date_stamp_survives() {
        let normalizer = PageNormalizer::default();
        let input = pages(&[
            "Date: 01/02/2024\nBody one",
            "Date: 01/02/2024\nBody two",
            "Date: 01/02/2024\nBody three",
        ]);
        let text = normalizer.normalize(&input);
        assert!(text.contains("Date: 01/02/2024"));
    }

    #[test]
    fn test_edge_boilerplate_removed_only_at_edges() {
        let normalizer = PageNormalizer::default();
        let input = pages(&[
            "Intellectual Property India\nLine a\nLine b\nLine c\nLine d\nLine e\nLine f",
        ]);
        let text = normalizer.normalize(&input);
        assert!(!text.contains("Intellectual Property India"));
        assert!(text.contains("Line a"));

        // The same phrase in the page interior is body text and survives.
        let input = pages(&[
            "Line a\nLine b\nLine c\nsee Intellectual Property India records\nLine d\nLine e\nLine f\nLine g",
        ]);
        let text = normalizer.normalize(&input);
        assert!(text.contains("Intellectual Property India"));
    }

    #[test]
    fn test_font_artifacts_removed() {
        let normalizer = PageNormalizer::default();
        let text = normalizer.normalize(&pages(&["Real line\n(cid:123)(cid:45)"]));
        assert_eq!(text, "Real line");
    }

    #[test]
    fn test_non_ascii_noise_removed() {
        let normalizer = PageNormalizer::default();
        let noisy = "\u{0916}\u{0917}\u{0918}\u{0919}\u{091a}\u{091b}\u{091c}\u{091d}\u{091e} ab";
        let text = normalizer.normalize(&pages(&[&format!("Kept line\n{noisy}")]));
        assert_eq!(text, "Kept line");
    }

    #[test]
    fn test_layout_preserving_keeps_indentation() {
        let normalizer = PageNormalizer::default();
        let text =
            normalizer.normalize_preserving_layout(&pages(&["1.  A method comprising:\n     a step"]));
        assert!(text.contains("     a step"));
    }

    #[test]
    fn test_no_output_line_matches_marker_predicate() {
        let normalizer = PageNormalizer::default();
        let input = pages(&[
            "Heading\n12\nbody text one\n2/9",
            "Heading\n13\nbody text two\n3/9",
            "Heading\n14\nbody text three\n4/9",
        ]);
        let text = normalizer.normalize(&input);
        for line in text.lines() {
            assert!(!normalizer.is_page_marker(line), "marker survived: {line}");
        }
    }

    #[test]
    fn test_repeated_line_threshold() {
        // Two pages: max(2, 0.6 * 2) = 2, so a line on both pages is repeated.
        let input = vec![
            vec!["Footer Text".to_string(), "body".to_string()],
            vec!["Footer Text".to_string(), "other".to_string()],
        ];
        let keys = repeated_line_keys(&input, 0.6, 2, 180);
        assert!(keys.contains("footer text"));
        assert!(!keys.contains("body"));
    }
}
