//! Heading-anchored section extraction from specification text.
//!
//! Sections are located by scanning lines for a start-heading variant
//! (inline remainder text on the heading line is kept), collecting until
//! an end-heading or end of document, and filtering noise. Justified-text
//! line-numbering artifacts are re-wrapped back into flowing prose.

use std::collections::BTreeMap;

use regex::Regex;

use super::clean;

/// Extract the block between the first start-heading match and the next
/// end-heading match (or end of document).
///
/// Heading variants are regex fragments matched against a whole line with
/// an optional trailing colon; the remainder of the heading line, if any,
/// opens the block. Returns an empty string when no start heading is
/// found.
pub fn extract_section(text: &str, start_headings: &[&str], end_headings: &[&str]) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let start_res = compile_headings(start_headings);
    let end_res = compile_headings(end_headings);

    let lines: Vec<&str> = text.lines().map(|ln| ln.trim_end()).collect();

    let mut start_idx = None;
    let mut start_tail = String::new();
    for (i, ln) in lines.iter().enumerate() {
        if let Some(tail) = heading_remainder(ln, &start_res) {
            start_idx = Some(i);
            start_tail = tail;
            break;
        }
    }
    let Some(start_idx) = start_idx else {
        return String::new();
    };

    let mut end_idx = lines.len();
    for (j, ln) in lines.iter().enumerate().skip(start_idx + 1) {
        if heading_remainder(ln, &end_res).is_some() {
            end_idx = j;
            break;
        }
    }

    let leading_number = Regex::new(r"^\s*\d{1,3}\s+([A-Za-z\[\(])").unwrap();
    let mut cleaned: Vec<String> = Vec::new();
    let mut prev_blank = false;
    let mut block_lines: Vec<&str> = Vec::new();
    if !start_tail.is_empty() {
        block_lines.push(&start_tail);
    }
    block_lines.extend(&lines[start_idx + 1..end_idx]);

    for ln in block_lines {
        if ln.trim().is_empty() {
            if !cleaned.is_empty() && !prev_blank {
                cleaned.push(String::new());
            }
            prev_blank = true;
            continue;
        }
        if is_noise_line(ln) {
            continue;
        }
        let norm = clean(ln);
        let norm = leading_number.replace(&norm, "$1").to_string();
        if norm.is_empty() {
            continue;
        }
        cleaned.push(norm);
        prev_blank = false;
    }

    strip_line_number_artifacts(cleaned.join("\n").trim())
}

fn compile_headings(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pat| Regex::new(&format!(r"(?i)^(?:{pat})\s*:?\s*(.*)$")).unwrap())
        .collect()
}

/// Match a line against heading variants, returning the inline remainder
/// (possibly empty) on a hit.
fn heading_remainder(line: &str, patterns: &[Regex]) -> Option<String> {
    let ln = clean(line);
    if ln.is_empty() {
        return None;
    }
    for pattern in patterns {
        if let Some(caps) = pattern.captures(&ln) {
            return Some(caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default());
        }
    }
    None
}

/// Noise lines inside specification sections: page fractions, page-N
/// markers, date-only footers, font artifacts.
fn is_noise_line(line: &str) -> bool {
    let ln = clean(line);
    if ln.is_empty() {
        return true;
    }
    let low = ln.to_lowercase();
    if low.contains("(cid:") {
        return true;
    }
    let full: [&Regex; 4] = [
        &Regex::new(r"^\d+\s*/\s*\d+$").unwrap(),
        &Regex::new(r"^page\s*\d+(\s*of\s*\d+)?$").unwrap(),
        &Regex::new(r"^date\s*[:\-]\s*\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}$").unwrap(),
        &Regex::new(r"^\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}$").unwrap(),
    ];
    full.iter().any(|re| re.is_match(&low))
}

/// Remove line-numbering artifacts: standalone numeric lines, numeric
/// tokens leading a text line, and interior tokens at multiples of 5
/// that justified extraction injects into prose.
pub(crate) fn strip_line_number_artifacts(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut t = Regex::new(r"(?m)^\s*\d{1,3}\s*$")
        .unwrap()
        .replace_all(text, "")
        .to_string();
    t = Regex::new(r"(?m)^\s*\d{1,3}\s+([A-Za-z\[\(])")
        .unwrap()
        .replace_all(&t, "$1")
        .to_string();

    let interior = Regex::new(r"([A-Za-z\)])\s+(\d{1,3})\s+([A-Za-z\(\[])").unwrap();
    let drop_multiple_of_five = |caps: &regex::Captures| -> String {
        let n: u32 = caps[2].parse().unwrap_or(0);
        if (1..=400).contains(&n) && n % 5 == 0 {
            format!("{} {}", &caps[1], &caps[3])
        } else {
            caps[0].to_string()
        }
    };
    // Two passes: a consumed boundary letter can hide an adjacent token.
    t = interior.replace_all(&t, drop_multiple_of_five).to_string();
    t = interior.replace_all(&t, drop_multiple_of_five).to_string();

    t = Regex::new(r"[ \t]{2,}").unwrap().replace_all(&t, " ").to_string();
    t = Regex::new(r"\n{3,}").unwrap().replace_all(&t, "\n\n").to_string();
    t.trim().to_string()
}

/// Re-wrap an extracted block into clean paragraphs: blank lines and
/// `[0031]`-style markers delimit paragraphs, hyphenated line breaks are
/// joined, and spacing around punctuation is repaired.
pub fn format_block(block: &str) -> String {
    let text = strip_line_number_artifacts(block);
    if text.is_empty() {
        return String::new();
    }

    let para_marker = Regex::new(r"^\[\d{4}\]").unwrap();
    let space_before_punct = Regex::new(r"\s+([,.;:])").unwrap();
    let open_paren = Regex::new(r"\(\s+").unwrap();
    let close_paren = Regex::new(r"\s+\)").unwrap();

    let mut paras: Vec<String> = Vec::new();
    let mut cur = String::new();

    let mut flush = |cur: &mut String, paras: &mut Vec<String>| {
        if !cur.is_empty() {
            let mut p = cur.trim().to_string();
            p = space_before_punct.replace_all(&p, "$1").to_string();
            p = open_paren.replace_all(&p, "(").to_string();
            p = close_paren.replace_all(&p, ")").to_string();
            if !p.is_empty() {
                paras.push(p);
            }
            cur.clear();
        }
    };

    for raw in text.lines() {
        let ln = clean(raw);
        if ln.is_empty() {
            flush(&mut cur, &mut paras);
            continue;
        }
        if para_marker.is_match(&ln) {
            flush(&mut cur, &mut paras);
            cur = ln;
            continue;
        }
        if cur.is_empty() {
            cur = ln;
        } else if cur.ends_with('-') {
            cur.pop();
            cur.push_str(&ln);
        } else {
            cur.push(' ');
            cur.push_str(&ln);
        }
    }
    flush(&mut cur, &mut paras);

    paras.join("\n\n").trim().to_string()
}

/// Technical problem: the background section, verbatim.
pub fn technical_problem(spec_text: &str) -> String {
    let block = extract_section(
        spec_text,
        &[
            r"BACKGROUND\s+OF\s+THE\s+INVENTION",
            r"BACKGROUND\s+OF\s+INVENTION",
            r"BACKGROUND",
        ],
        &[
            r"SUMMARY\s+OF\s+THE\s+INVENTION",
            r"SUMMARY",
            r"BRIEF\s+SUMMARY",
            r"OBJECTIVE\s+OF\s+THE\s+INVENTION",
            r"OBJECT\s+OF\s+INVENTION",
            r"DETAILED\s+DESCRIPTION(?:\s+OF\s+THE\s+INVENTION|\s+OF\s+INVENTION)?",
            r"BRIEF\s+DESCRIPTION(?:\s+OF\s+DRAWINGS?)?",
            r"CLAIMS?",
        ],
    );
    format_block(&block)
}

/// Technical solution: the summary section, verbatim.
pub fn technical_solution(spec_text: &str) -> String {
    let block = extract_section(
        spec_text,
        &[r"SUMMARY\s+OF\s+THE\s+INVENTION", r"SUMMARY", r"BRIEF\s+SUMMARY"],
        &[
            r"BRIEF\s+DESCRIPTION(?:\s+OF\s+DRAWINGS?)?",
            r"DETAILED\s+DESCRIPTION(?:\s+OF\s+THE\s+INVENTION|\s+OF\s+INVENTION)?",
            r"CLAIMS?",
        ],
    );
    format_block(&block)
}

/// Technical effect: explicit heading first, then a keyword-scored pick
/// over numbered paragraphs, then the solution block as a last resort.
pub fn technical_effect(spec_text: &str) -> String {
    let text = spec_text.trim();
    if text.is_empty() {
        return String::new();
    }

    let explicit = extract_section(
        text,
        &[
            r"TECHNICAL\s+EFFECTS?",
            r"TECHNICAL\s+ADVANTAGES?",
            r"ADVANTAGES?\s+OF\s+THE\s+INVENTION",
            r"TECHNICAL\s+CONTRIBUTION",
            r"EFFECTS?\s+OF\s+THE\s+INVENTION",
        ],
        &[
            r"BRIEF\s+DESCRIPTION(?:\s+OF\s+DRAWINGS?)?",
            r"DETAILED\s+DESCRIPTION(?:\s+OF\s+THE\s+INVENTION|\s+OF\s+INVENTION)?",
            r"CLAIMS?",
        ],
    );
    let explicit = format_block(&explicit);
    if !explicit.is_empty() {
        return explicit;
    }

    let effect_kw = Regex::new(
        r"(?i)\b(reduce|reduces|reduced|decrease|lower|minimi|save|faster|speed|latency|delay|time|cost|power|memory|bandwidth|overhead|complexity|errors?|noise|loss|improv|improves|improved|enhanc|enhances|enhanced|efficient|efficiency|accurac|reliab|robust|secure|security|stability|throughput|performance|thereby|thus|hence|as\s+a\s+result|results?\s+in|leads?\s+to|enables?|facilitates?|achieves?)\w*\b",
    )
    .unwrap();
    let trailing_heads =
        Regex::new(r"(?i)(?:\s|\n)*(?:CLAIMS?|ABSTRACT|WE CLAIM|WHAT IS CLAIMED IS)\s*$").unwrap();

    let mut picked: Vec<String> = Vec::new();
    for para in numbered_paragraphs(text) {
        let formatted = format_block(&para);
        let formatted = trailing_heads.replace(&formatted, "").trim().to_string();
        if formatted.is_empty() {
            continue;
        }
        if effect_kw.is_match(&formatted) {
            picked.push(formatted);
        }
        if picked.len() >= 4 {
            break;
        }
    }
    if !picked.is_empty() {
        return picked.join("\n\n").trim().to_string();
    }

    technical_solution(spec_text)
}

/// Detailed-description narrative ("technical advancement"): heading
/// search first, else bracket-numbered paragraphs from index 30 onward
/// (earlier paragraphs restate background captured elsewhere), else a
/// plain blank-line split.
pub fn technical_advancement(spec_text: &str) -> String {
    let text = spec_text.trim();
    if text.is_empty() {
        return String::new();
    }

    let section = extract_section(
        text,
        &[
            r"DETAILED\s+DESCRIPTION\s+OF\s+THE\s+INVENTION",
            r"DETAILED\s+DESCRIPTION\s+OF\s+INVENTION",
            r"DETAILED\s+DESCRIPTION",
        ],
        &[r"CLAIMS", r"ABSTRACT", r"WE\s+CLAIM", r"WHAT\s+IS\s+CLAIMED\s+IS"],
    );

    if section.is_empty() {
        let numbered = numbered_paragraphs(text);
        if numbered.is_empty() {
            return String::new();
        }
        let cleaned: Vec<String> = numbered
            .iter()
            .map(|p| format_block(p))
            .filter(|p| !p.is_empty())
            .collect();
        let preferred: Vec<String> = cleaned
            .iter()
            .filter(|p| paragraph_index(p).is_some_and(|n| n >= 30))
            .cloned()
            .collect();
        let pick = if preferred.is_empty() { cleaned } else { preferred };
        return strip_line_number_artifacts(&pick.into_iter().take(4).collect::<Vec<_>>().join("\n\n"));
    }

    let numbered = numbered_paragraphs(&section);
    if !numbered.is_empty() {
        let cleaned: Vec<String> = numbered
            .iter()
            .map(|p| format_block(p))
            .filter(|p| !p.is_empty())
            .take(4)
            .collect();
        return strip_line_number_artifacts(&cleaned.join("\n\n"));
    }

    let blocks: Vec<String> = section
        .split("\n\n")
        .map(format_block)
        .filter(|p| !p.is_empty())
        .take(4)
        .collect();
    strip_line_number_artifacts(&blocks.join("\n\n"))
}

/// Figure-number to description map from "FIG. n is/shows/..." lines.
/// The longest captured description per figure wins, capped at 300 chars.
pub fn figure_descriptions(spec_text: &str) -> BTreeMap<u32, String> {
    let fig_re = Regex::new(
        r"(?i)\bFIG\.?\s*(\d+)[A-Z]?\b\s*(?:is|illustrates|shows|depicts|represents)?\s*[:\-]?\s*(.*)$",
    )
    .unwrap();

    let mut out: BTreeMap<u32, String> = BTreeMap::new();
    for raw in spec_text.lines() {
        let ln = clean(raw);
        let Some(caps) = fig_re.captures(&ln) else {
            continue;
        };
        let Ok(num) = caps[1].parse::<u32>() else {
            continue;
        };
        let desc = caps
            .get(2)
            .map(|m| m.as_str().trim().trim_matches(';').trim().to_string())
            .unwrap_or_default();
        if desc.is_empty() {
            continue;
        }
        let desc: String = desc.chars().take(300).collect();
        let longer = out.get(&num).map(|prev| desc.len() > prev.len()).unwrap_or(true);
        if longer {
            out.insert(num, desc);
        }
    }
    out
}

/// Split text into `[0031]`-style bracket-numbered paragraphs. A paragraph
/// starts at a line whose first token is the bracket marker and runs to
/// the next marker line.
pub(crate) fn numbered_paragraphs(text: &str) -> Vec<String> {
    let marker = Regex::new(r"^\s*\[\d{4}\]").unwrap();
    let mut paras: Vec<String> = Vec::new();
    let mut cur: Vec<&str> = Vec::new();

    for ln in text.lines() {
        if marker.is_match(ln) {
            if !cur.is_empty() {
                paras.push(cur.join("\n"));
            }
            cur = vec![ln];
        } else if !cur.is_empty() {
            cur.push(ln);
        }
    }
    if !cur.is_empty() {
        paras.push(cur.join("\n"));
    }
    paras
}

fn paragraph_index(para: &str) -> Option<u32> {
    let re = Regex::new(r"^\[(\d{4})\]").unwrap();
    re.captures(para.trim()).and_then(|c| c[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_round_trip() {
        let text = "SUMMARY\nThe invention provides a method.\nCLAIMS";
        let block = extract_section(text, &["SUMMARY"], &["CLAIMS"]);
        assert_eq!(block, "The invention provides a method.");
    }

    #[test]
    fn test_section_inline_remainder() {
        let text = "SUMMARY: A compact overview.\nMore detail here.\nCLAIMS";
        let block = extract_section(text, &["SUMMARY"], &["CLAIMS"]);
        assert_eq!(block, "A compact overview.\nMore detail here.");
    }

    #[test]
    fn test_section_missing_heading() {
        assert_eq!(extract_section("no headings here", &["SUMMARY"], &["CLAIMS"]), "");
    }

    #[test]
    fn test_section_noise_filtered() {
        let text = "SUMMARY\nGood line.\n3/12\nPage 4 of 12\n01/02/2024\nAnother good line.\nCLAIMS";
        let block = extract_section(text, &["SUMMARY"], &["CLAIMS"]);
        assert_eq!(block, "Good line.\nAnother good line.");
    }

    #[test]
    fn test_strip_line_number_artifacts() {
        let text = "5\nThe system 10 has a sensor 15 attached to a frame.\n120 The numbering continues.";
        let out = strip_line_number_artifacts(text);
        assert!(!out.contains("\n5\n"));
        assert!(out.contains("sensor attached"), "got: {out}");
        // "10" is interior but a reference numeral position: multiples of 5 are dropped.
        assert!(out.contains("system has"), "got: {out}");
        assert!(out.contains("The numbering continues"));
    }

    #[test]
    fn test_strip_keeps_non_multiples_of_five() {
        let out = strip_line_number_artifacts("a value 7 units wide");
        assert!(out.contains("value 7 units"));
    }

    #[test]
    fn test_format_block_hyphen_join() {
        let block = "The infor-\nmation is com-\nplete .";
        assert_eq!(format_block(block), "The information is complete.");
    }

    #[test]
    fn test_format_block_numbered_paragraphs() {
        let block = "[0031] First paragraph\ncontinues here.\n[0032] Second paragraph.";
        let out = format_block(block);
        assert_eq!(
            out,
            "[0031] First paragraph continues here.\n\n[0032] Second paragraph."
        );
    }

    #[test]
    fn test_technical_problem_and_solution() {
        let spec = "\
BACKGROUND OF THE INVENTION
Existing systems are slow.
SUMMARY OF THE INVENTION
The invention provides a faster pipeline.
BRIEF DESCRIPTION OF DRAWINGS
FIG. 1 shows the pipeline.
CLAIMS
1. A method.";
        assert_eq!(technical_problem(spec), "Existing systems are slow.");
        assert_eq!(technical_solution(spec), "The invention provides a faster pipeline.");
    }

    #[test]
    fn test_technical_effect_explicit_heading() {
        let spec = "TECHNICAL EFFECT\nLatency is reduced by half.\nCLAIMS";
        assert_eq!(technical_effect(spec), "Latency is reduced by half.");
    }

    #[test]
    fn test_technical_effect_scored_fallback() {
        let spec = "\
[0040] The housing is made of aluminium.
[0041] The arrangement thereby reduces power consumption.
[0042] A hinge couples the lid.";
        let out = technical_effect(spec);
        assert!(out.contains("[0041]"));
        assert!(out.contains("reduces power consumption"));
    }

    #[test]
    fn test_technical_advancement_prefers_late_paragraphs() {
        let spec = "\
[0010] Background restated.
[0031] The controller schedules packets.
[0032] The scheduler drops stale entries.";
        let out = technical_advancement(spec);
        assert!(out.contains("[0031]"));
        assert!(!out.contains("[0010]"));
    }

    #[test]
    fn test_figure_descriptions() {
        let spec = "\
FIG. 1 shows a block diagram of the system;
FIG. 2 illustrates the scheduler;
FIG. 1 shows a block diagram of the system with additional detail;
FIG.3 depicts a flowchart.";
        let figs = figure_descriptions(spec);
        assert_eq!(figs.len(), 3);
        assert!(figs[&1].contains("additional detail"));
        assert_eq!(figs[&2], "the scheduler");
        assert_eq!(figs[&3], "a flowchart.");
    }
}
