//! Prior-art abstract extraction.
//!
//! Two tiers: a multilingual heading search (including the "[57]
//! ABSTRACT" patent-gazette convention) reading forward to a stop
//! heading, and a statistical fallback that scores blank-line-delimited
//! blocks by word-count band and invention-verb density. Non-English
//! output is routed through the translation collaborator.

use std::sync::Arc;

use regex::Regex;

use crate::normalize::{non_ascii_ratio, normalize_line_key, repeated_line_keys, PageNormalizer};
use crate::translate::{translate_text, NoTranslation, Translate, TranslateOptions};

use super::clean;

/// Multilingual "Abstract" heading variants.
const ABSTRACT_HEADINGS: &[&str] = &[
    "abstract",
    "abstrait",
    "abrege",
    "abrégé",
    "resumen",
    "resumo",
    "riassunto",
    "zusammenfassung",
    "samenvatting",
    "sammanfattning",
    "özet",
    "摘要",
    "要約",
    "概要",
];

/// Headings that terminate an abstract block.
const STOP_HEADINGS: &[&str] = &[
    "claim",
    "claims",
    "what is claimed",
    "field",
    "technical field",
    "background",
    "detailed description",
    "description",
    "brief description",
    "embodiment",
    "drawings",
    "prior art",
    "revendications",
    "reivindicaciones",
    "ansprüche",
    "权利要求",
];

/// Options for abstract extraction.
#[derive(Debug, Clone)]
pub struct AbstractOptions {
    /// Pages inspected from the front of the document.
    pub max_pages: usize,

    /// Word cap; longer abstracts are truncated at a sentence boundary.
    pub max_words: usize,

    /// Translation pass configuration.
    pub translate: TranslateOptions,
}

impl AbstractOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the word cap.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_words = words;
        self
    }

    /// Set the translation options.
    pub fn with_translate(mut self, translate: TranslateOptions) -> Self {
        self.translate = translate;
        self
    }
}

impl Default for AbstractOptions {
    fn default() -> Self {
        Self {
            max_pages: 5,
            max_words: 900,
            translate: TranslateOptions::default(),
        }
    }
}

/// Extracts the most likely abstract text from prior-art page text.
pub struct AbstractExtractor {
    options: AbstractOptions,
    translator: Arc<dyn Translate>,
}

impl AbstractExtractor {
    /// Create an extractor with an explicit translation collaborator.
    pub fn new(options: AbstractOptions, translator: Arc<dyn Translate>) -> Self {
        Self { options, translator }
    }

    /// Extractor without an external lookup: non-English abstracts are
    /// returned untranslated.
    pub fn without_translation() -> Self {
        Self::new(
            AbstractOptions::new().with_translate(TranslateOptions::disabled()),
            Arc::new(NoTranslation),
        )
    }

    /// Extract the abstract from per-page text of a prior-art document.
    pub fn extract_from_pages(&self, pages: &[String]) -> String {
        let lines = self.prepare_lines(pages);

        let mut abstract_text = extract_by_heading(&lines);
        if abstract_text.is_empty() {
            abstract_text = extract_by_scoring(&lines);
        }
        if abstract_text.is_empty() {
            // Last resort: the general normalizer's view of the full text.
            let full = PageNormalizer::default().normalize(pages);
            let full_lines: Vec<String> = full.lines().map(|ln| ln.to_string()).collect();
            abstract_text = extract_by_scoring(&full_lines);
        }

        let mut abstract_text = clean_abstract_text(&abstract_text);
        if !abstract_text.is_empty() && looks_non_english(&abstract_text) {
            abstract_text = clean_abstract_text(&translate_text(
                &abstract_text,
                &self.translator,
                &self.options.translate,
            ));
        }
        trim_at_sentence_boundary(&abstract_text, self.options.max_words)
    }

    /// Per-page line preparation: blank lines are kept as paragraph
    /// markers, noise is dropped, and repeated page-edge lines (threshold
    /// 0.65) are removed unless they carry the abstract heading itself.
    fn prepare_lines(&self, pages: &[String]) -> Vec<String> {
        let mut pages_lines: Vec<Vec<String>> = Vec::new();
        for page in pages.iter().take(self.options.max_pages.max(1)) {
            let mut page_lines: Vec<String> = Vec::new();
            for raw in page.lines() {
                let line = clean(raw);
                if line.is_empty() {
                    page_lines.push(String::new());
                    continue;
                }
                if is_header_footer_noise(&line) {
                    continue;
                }
                if line.to_lowercase().contains("(cid:") {
                    continue;
                }
                page_lines.push(line);
            }
            pages_lines.push(page_lines);
        }
        if pages_lines.is_empty() {
            return Vec::new();
        }

        let non_blank: Vec<Vec<String>> = pages_lines
            .iter()
            .map(|lines| lines.iter().filter(|ln| !ln.is_empty()).cloned().collect())
            .collect();
        let repeated = repeated_line_keys(&non_blank, 0.65, 2, 180);
        let abstract_heading =
            Regex::new(r"(?i)\babstract\b|^\s*\[?\s*57\s*\]?\s*abstract\b").unwrap();

        let mut out: Vec<String> = Vec::new();
        let mut prev_blank = false;
        for page_lines in &pages_lines {
            for ln in page_lines {
                if ln.is_empty() {
                    if !out.is_empty() && !prev_blank {
                        out.push(String::new());
                    }
                    prev_blank = true;
                    continue;
                }
                let key = normalize_line_key(ln);
                if repeated.contains(&key) && !abstract_heading.is_match(&key) {
                    continue;
                }
                out.push(ln.clone());
                prev_blank = false;
            }
        }
        out
    }
}

/// Heading-anchored extraction: find an abstract heading, then read
/// forward with word-count-gated stop rules.
fn extract_by_heading(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let gazette = Regex::new(r"(?i)^\[?\s*57\s*\]?\s*abstract\b\s*[:\-]?\s*(.*)$").unwrap();
    let gazette_bare = Regex::new(r"(?i)^\[?\s*57\s*\]?\s*abstract\b\s*:?\s*$").unwrap();

    for (i, line) in lines.iter().enumerate() {
        let x = clean(line);
        if x.is_empty() {
            continue;
        }
        let low = x.to_lowercase();

        let mut inline = String::new();
        if let Some(caps) = gazette.captures(&x) {
            inline = clean(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
        } else {
            for heading in ABSTRACT_HEADINGS {
                let re =
                    Regex::new(&format!(r"(?i)^\s*{}\b\s*[:\-]?\s*(.*)$", regex::escape(heading)))
                        .unwrap();
                if let Some(caps) = re.captures(&x) {
                    inline = clean(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
                    break;
                }
            }
        }

        let bare_heading = ABSTRACT_HEADINGS
            .iter()
            .any(|h| low == *h || low == format!("{h}:"))
            || gazette_bare.is_match(&low);
        if inline.is_empty() && !bare_heading {
            continue;
        }

        let mut picked: Vec<String> = Vec::new();
        let mut word_count = 0usize;
        if !inline.is_empty() {
            word_count += inline.split_whitespace().count();
            picked.push(inline);
        }

        let mut blank_streak = 0usize;
        for ln in &lines[i + 1..] {
            let ln = clean(ln);
            if ln.is_empty() {
                blank_streak += 1;
                // Layout extraction introduces spurious blank lines; only
                // stop once enough content has accumulated.
                if word_count >= 140 && blank_streak >= 2 {
                    break;
                }
                continue;
            }
            blank_streak = 0;
            if is_header_footer_noise(&ln) {
                if word_count >= 120 {
                    break;
                }
                continue;
            }
            if looks_like_stop_heading(&ln) && word_count >= 90 {
                break;
            }
            if is_metadata_line(&ln) {
                if word_count < 20 {
                    continue;
                }
                if word_count >= 120 {
                    break;
                }
            }
            word_count += ln.split_whitespace().count();
            picked.push(ln);
            if word_count >= 750 {
                break;
            }
        }

        let candidate = clean_abstract_text(&picked.join("\n"));
        if candidate.split_whitespace().count() >= 20 {
            return candidate;
        }
    }
    String::new()
}

/// Scoring fallback over blank-line-delimited blocks: prefer blocks in
/// the 45-280 word band with invention-descriptive verbs and low digit
/// density, penalize claim-flavored text. The best of the first 14
/// blocks wins.
fn extract_by_scoring(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut blocks: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for ln in lines {
        let x = clean(ln);
        if x.is_empty() || is_metadata_line(&x) {
            if !current.is_empty() {
                blocks.push(current.join(" "));
                current.clear();
            }
            continue;
        }
        current.push(x);
    }
    if !current.is_empty() {
        blocks.push(current.join(" "));
    }
    if blocks.is_empty() {
        return String::new();
    }

    let invention_verbs = Regex::new(
        r"(?i)\b(the present invention|discloses|relates to|provides|method|apparatus|system|device|implemented)\b",
    )
    .unwrap();
    let claim_flavor = Regex::new(r"(?i)\bclaims?\b").unwrap();

    let score = |block: &str| -> f64 {
        let text = clean(block);
        let words = text.split_whitespace().count();
        if words < 25 {
            return -100.0;
        }
        let mut s = 0.0;
        if (45..=280).contains(&words) {
            s += 5.0;
        }
        if invention_verbs.is_match(&text) {
            s += 2.0;
        }
        if claim_flavor.is_match(&text) {
            s -= 2.5;
        }
        let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
        let digit_ratio = digits as f64 / text.chars().count().max(1) as f64;
        if digit_ratio > 0.12 {
            s -= 1.5;
        }
        s
    };

    // First maximal block wins on ties.
    let mut best: Option<(&String, f64)> = None;
    for block in blocks.iter().take(14) {
        let s = score(block);
        if best.map(|(_, prev)| s > prev).unwrap_or(true) {
            best = Some((block, s));
        }
    }
    let best = best.map(|(block, _)| block.clone()).unwrap_or_default();
    clean_abstract_text(&best)
}

/// Whether a line is metadata (codes, IPC classes, filing dates) rather
/// than abstract prose.
fn is_metadata_line(line: &str) -> bool {
    let x = clean(line);
    if x.is_empty() {
        return true;
    }
    let low = x.to_lowercase();
    if Regex::new(r"^[0-9\W_]+$").unwrap().is_match(&x) {
        return true;
    }
    if Regex::new(r"^[a-z]?\d{2,}[a-z0-9/\-]*$").unwrap().is_match(&low) {
        return true;
    }
    Regex::new(
        r"(?i)\b(application|publication|applicant|inventor|priority|filing|date|int\.?cl|ipc|cpc|attorney|agent)\b",
    )
    .unwrap()
    .is_match(&low)
}

/// Whether a line looks like a section heading that should terminate an
/// abstract: a known stop phrase, a trailing colon, or mostly-uppercase
/// words.
fn looks_like_stop_heading(line: &str) -> bool {
    let x = clean(line);
    if x.is_empty() || x.chars().count() > 140 {
        return false;
    }
    let low = x.to_lowercase();
    let low = low.trim_end_matches(':');
    if STOP_HEADINGS.iter().any(|h| low.contains(h)) {
        return true;
    }
    if x.ends_with(':') {
        return true;
    }
    let word_re = Regex::new(r"[A-Za-z0-9\u{00C0}-\u{024F}]+").unwrap();
    let words: Vec<&str> = word_re.find_iter(&x).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return false;
    }
    let upper_words = words
        .iter()
        .filter(|w| w.chars().count() > 1 && **w == w.to_uppercase())
        .count();
    upper_words >= 2.max((words.len() as f64 * 0.65) as usize)
}

/// Header/footer noise specific to prior-art captures: page markers,
/// office boilerplate, URLs, patent-portal footers, copyright lines and
/// date stamps.
fn is_header_footer_noise(line: &str) -> bool {
    let x = clean(line);
    if x.is_empty() {
        return true;
    }
    let low = normalize_line_key(&x);
    if low.is_empty() {
        return true;
    }

    let page_markers = [
        r"^[-\u{2013}\u{2014}]?\s*\d{1,4}\s*[-\u{2013}\u{2014}]?$",
        r"^\d+\s*/\s*\d+$",
        r"^(?:p|pg|page)\.?\s*\d+\s*/\s*\d+$",
        r"^page\s*\d+(\s*of\s*\d+)?$",
        r"^(?:page|pg)\s*\d+\s*(?:of|/)\s*\d+$",
        r"^(?:date\s*[:\-]\s*)?\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}$",
    ];
    if page_markers.iter().any(|p| Regex::new(p).unwrap().is_match(&low)) {
        return true;
    }
    if Regex::new(
        r"(?i)\bpatent\s+agent\b|\boffice\s+of\s+the\s+controller\s+general\b|\bintellectual\s+property\s+india\b",
    )
    .unwrap()
    .is_match(&low)
        && x.chars().count() <= 140
    {
        return true;
    }
    if Regex::new(r"(?:https?://|www\.)\S+").unwrap().is_match(&low) {
        return true;
    }
    if Regex::new(r"\b(?:google\s+patents|patentscope|espacenet|patent\s+images|lens\.org|wipo)\b")
        .unwrap()
        .is_match(&low)
    {
        return true;
    }
    Regex::new(r"\b(?:copyright|all rights reserved)\b").unwrap().is_match(&low)
}

/// Collapse an abstract into clean paragraphs: hyphenated line breaks
/// re-joined, in-paragraph newlines flattened, punctuation spacing fixed.
pub(crate) fn clean_abstract_text(text: &str) -> String {
    let text = text.replace('\r', "\n");
    let mut collapsed: Vec<&str> = Vec::new();
    let mut prev_blank = false;
    for ln in text.lines().map(str::trim) {
        if ln.is_empty() {
            if !collapsed.is_empty() && !prev_blank {
                collapsed.push("");
            }
            prev_blank = true;
        } else {
            collapsed.push(ln);
            prev_blank = false;
        }
    }

    let joined = collapsed.join("\n");
    let hyphen_break = Regex::new(r"-\s*\n\s*").unwrap();
    let inner_newline = Regex::new(r"\s*\n\s*").unwrap();
    let space_punct = Regex::new(r"\s+([,.;:])").unwrap();
    let open_paren = Regex::new(r"\(\s+").unwrap();
    let close_paren = Regex::new(r"\s+\)").unwrap();

    let mut paras: Vec<String> = Vec::new();
    for para in joined.split("\n\n") {
        if para.trim().is_empty() {
            continue;
        }
        let p = hyphen_break.replace_all(para, "");
        let p = inner_newline.replace_all(&p, " ");
        let p = space_punct.replace_all(&p, "$1");
        let p = open_paren.replace_all(&p, "(");
        let p = close_paren.replace_all(&p, ")");
        let p = clean(&p);
        if !p.is_empty() {
            paras.push(p);
        }
    }
    paras.join("\n\n").trim().to_string()
}

/// Truncate to the word cap without ever cutting mid-sentence: the crop
/// retreats to the last sentence boundary at or beyond 60% of the cap.
pub(crate) fn trim_at_sentence_boundary(text: &str, max_words: usize) -> String {
    let cleaned = clean_abstract_text(text);
    if cleaned.is_empty() {
        return String::new();
    }
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() <= max_words {
        return cleaned;
    }
    let cropped = words[..max_words].join(" ");
    let last_punct = [". ", "; ", "? ", "! "]
        .iter()
        .filter_map(|sep| cropped.rfind(sep))
        .max();
    match last_punct {
        Some(pos) if pos >= (cropped.len() as f64 * 0.6) as usize => {
            cropped[..=pos].trim().to_string()
        }
        _ => cropped.trim().to_string(),
    }
}

/// Heuristic non-English detection: CJK density, then ASCII-letter ratio
/// combined with absence of common English invention vocabulary.
pub(crate) fn looks_non_english(text: &str) -> bool {
    let txt = clean(text);
    if txt.is_empty() {
        return false;
    }

    let cjk = txt
        .chars()
        .filter(|&c| {
            ('\u{4e00}'..='\u{9fff}').contains(&c)
                || ('\u{3040}'..='\u{30ff}').contains(&c)
                || ('\u{ac00}'..='\u{d7af}').contains(&c)
        })
        .count();
    if cjk >= 8 {
        return true;
    }

    let alpha: Vec<char> = txt.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.is_empty() {
        return false;
    }
    let ascii_alpha = alpha.iter().filter(|c| c.is_ascii_alphabetic()).count();
    if (ascii_alpha as f64 / alpha.len() as f64) < 0.45 {
        return true;
    }

    if non_ascii_ratio(&txt) <= 0.25 {
        return false;
    }
    let english = Regex::new(
        r"(?i)\b(the|and|of|to|for|with|method|system|apparatus|device|invention)\b",
    )
    .unwrap();
    !english.is_match(&txt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn test_heading_anchored_extraction() {
        let text = "\
US 2010/0123456 A1
ABSTRACT
A method for routing packets in a constrained network is disclosed. \
The method assigns deadlines to packets and schedules transmission \
opportunities so that latency-sensitive traffic is forwarded ahead of \
bulk transfers while starvation of low-priority flows is avoided. \
Each node maintains a compact table of per-flow deadlines and exchanges \
summaries with its neighbours, so the schedule converges without any \
central coordinator being present in the network. Simulation results \
show that the approach sustains high link utilisation while bounding \
queueing delay for the deadline-bearing traffic class under a wide \
range of offered load conditions in realistic mesh topologies.
CLAIMS
1. A method comprising routing.";
        let extractor = AbstractExtractor::without_translation();
        let out = extractor.extract_from_pages(&page(text));
        assert!(out.starts_with("A method for routing packets"));
        assert!(!out.contains("CLAIMS"));
        assert!(!out.to_lowercase().contains("abstract"));
    }

    #[test]
    fn test_gazette_convention_heading() {
        let text = "\
[57] ABSTRACT: An apparatus is provided that monitors a machine tool \
using vibration signatures and reports anomalies to an operator console, \
reducing unplanned downtime in production lines by allowing maintenance \
to be scheduled before failures occur in the installed equipment base.";
        let extractor = AbstractExtractor::without_translation();
        let out = extractor.extract_from_pages(&page(text));
        assert!(out.starts_with("An apparatus is provided"));
    }

    #[test]
    fn test_scoring_fallback_when_no_heading() {
        let prose = "The present invention relates to a cooling assembly for electric \
motors. A coolant channel is arranged around the stator and a pump circulates \
fluid through the channel, which provides improved heat dissipation and allows \
higher continuous torque output from the same motor frame size.";
        let text = format!("US1234567\nB60K 1/00\n\n{prose}\n\nInventor: A. Person");
        let extractor = AbstractExtractor::without_translation();
        let out = extractor.extract_from_pages(&[text]);
        assert!(out.contains("cooling assembly"), "got: {out}");
        assert!(!out.contains("B60K"));
    }

    #[test]
    fn test_truncation_never_ends_mid_sentence() {
        let sentence = "This sentence has exactly eight words in it. ";
        let long_text = sentence.repeat(40);
        let out = trim_at_sentence_boundary(&long_text, 100);
        assert!(out.split_whitespace().count() <= 100);
        assert!(out.ends_with('.'), "got tail: {}", &out[out.len().saturating_sub(30)..]);
    }

    #[test]
    fn test_truncation_noop_when_under_cap() {
        let out = trim_at_sentence_boundary("Short abstract text.", 900);
        assert_eq!(out, "Short abstract text.");
    }

    #[test]
    fn test_looks_non_english() {
        assert!(looks_non_english("本発明は、通信ネットワークにおけるパケット転送方法に関する。"));
        assert!(!looks_non_english("The invention relates to a packet forwarding method."));
        assert!(!looks_non_english(""));
    }

    #[test]
    fn test_clean_abstract_text_rewraps() {
        let raw = "A control sys-\ntem is described .\nIt has ( several ) parts.\n\nSecond paragraph.";
        let out = clean_abstract_text(raw);
        assert_eq!(
            out,
            "A control system is described. It has (several) parts.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_portal_footers_dropped() {
        let text = "\
ABSTRACT
A sensor assembly is described that measures rotational speed of a shaft \
using a magnetic encoder ring and compensates temperature drift with an \
integrated reference coil so that calibration remains stable over the \
operating range of industrial gearboxes and similar machinery installations.
https://patents.example.com/page
Google Patents";
        let extractor = AbstractExtractor::without_translation();
        let out = extractor.extract_from_pages(&page(text));
        assert!(!out.contains("https://"));
        assert!(!out.contains("Google Patents"));
        assert!(out.contains("sensor assembly"));
    }
}
