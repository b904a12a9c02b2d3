//! Case-metadata extraction from hearing-notice text.
//!
//! Scalar fields are located with ordered candidate-pattern lists tried
//! first-match-wins: an explicit "Date of Dispatch" label outranks a bare
//! date near the top of the document. New phrasing variants are added to
//! the end of the relevant list.

use std::collections::BTreeMap;

use regex::Regex;

use crate::model::{CaseMeta, PriorArtRef};

use super::{canonical_docno, clean, first_capture, normalize_date, NUMERIC_DATE};

/// Extracts [`CaseMeta`] from normalized notice text.
pub struct MetaExtractor {
    app_no: Vec<Regex>,
    filed_on: Vec<Regex>,
    applicant: Vec<Regex>,
    applicant_continuation: Regex,
    applicant_continuation_stop: Regex,
    controller_block: Regex,
    controller_labelled: Regex,
    agent: Vec<Regex>,
    fer_dispatch: Vec<Regex>,
    hn_dispatch_labelled: Vec<Regex>,
    hn_notice_dated: Vec<Regex>,
    hn_dispatch_generic: Vec<Regex>,
    hearing_location: Regex,
    hearing_date_time: Regex,
    clock_time: Regex,
    duration_phrase: Vec<Regex>,
    duration_labelled: Vec<Regex>,
    time_range: Regex,
    fer_dated: Regex,
    fer_reply: Regex,
    date_label_line: Regex,
    numeric_date: Regex,
    numeric_date_full: Regex,
    skip_hn_line: Regex,
    dx_head: Regex,
    dx_stop: Regex,
    publication_date: Regex,
    paren_date: Regex,
    whole_document: Regex,
}

impl MetaExtractor {
    /// Create an extractor with the built-in pattern chains.
    pub fn new() -> Self {
        let date = NUMERIC_DATE;
        Self {
            app_no: vec![
                Regex::new(r"(?i)Indian\s+Patent\s+Application\s+No\.?\s*[:\-]?\s*([0-9][0-9A-Z/\-]*)")
                    .unwrap(),
                Regex::new(r"(?i)Application\s+Number\s*[:\-]?\s*([0-9][0-9A-Z/\-]*)").unwrap(),
                Regex::new(r"(?i)Application\s*No\.?\s*[/:\-]?\s*([0-9][0-9A-Z/\-]*)").unwrap(),
                Regex::new(r"(?i)POD/Application\s*No\s*/\s*([0-9][0-9A-Z/\-]*)").unwrap(),
            ],
            filed_on: vec![
                Regex::new(&format!(r"(?i)Date\s+of\s+Filing\s*[:\-]?\s*({date})")).unwrap(),
                Regex::new(&format!(r"(?i)Filed\s*on\s*[:\-]?\s*({date})")).unwrap(),
            ],
            applicant: vec![
                Regex::new(r"(?i)Name\s+of\s+the\s+Applicant\s*[:\-]?\s*(.+)").unwrap(),
                Regex::new(r"(?i)\bApplicant\s*[:\-]?\s*(.+)").unwrap(),
            ],
            applicant_continuation: Regex::new(r"^\s*\n\s*([^\n:]{4,})\n").unwrap(),
            applicant_continuation_stop: Regex::new(
                r"(?i)\b(controller|address|date|application|hearing|ref)\b",
            )
            .unwrap(),
            controller_block: Regex::new(
                r"(?i)\n\s*([A-Za-z][A-Za-z .]{2,})\s*\n\s*((?:Assistant|Deputy|Joint|Senior\s+Joint|Controller)\s+Controller\s+of\s+(?:Patents?\s*&\s*Designs|Patents?\s+and\s+Designs|Patents?))\b",
            )
            .unwrap(),
            controller_labelled: Regex::new(r"(?i)Controller\s+Name\s*[:\-]?\s*(.+)").unwrap(),
            agent: vec![
                Regex::new(r"(?i)Agent\s+for\s+the\s+Applicant\s*[:\-]?\s*(.+)").unwrap(),
                Regex::new(r"(?i)Registered\s+Address\s+For\s+Service\s*:?\s*([^\n,]{4,})").unwrap(),
            ],
            fer_dispatch: vec![
                Regex::new(&format!(r"(?is)Date\s+of\s+Dispatch/Email.*?:\s*({date})")).unwrap(),
                Regex::new(&format!(r"(?is)Date\s+of\s+Dispatch.*?:\s*({date})")).unwrap(),
            ],
            hn_dispatch_labelled: vec![
                Regex::new(&format!(
                    r"(?i)date\s+of\s+dispatch(?:\s*/\s*email)?\s*[:\-]?\s*({date})"
                ))
                .unwrap(),
                Regex::new(&format!(r"(?i)dispatch\s+date\s*[:\-]?\s*({date})")).unwrap(),
                Regex::new(&format!(r"(?i)\bdispatch(?:ed)?\s+on\s*[:\-]?\s*({date})")).unwrap(),
            ],
            hn_notice_dated: vec![
                Regex::new(&format!(
                    r"(?i)hearing\s+notice\s+(?:is\s+)?(?:dated|date)\s*[:\-]?\s*({date})"
                ))
                .unwrap(),
                Regex::new(&format!(r"(?i)\bnotice\s+dated\s*[:\-]?\s*({date})")).unwrap(),
            ],
            hn_dispatch_generic: vec![
                Regex::new(&format!(r"(?i)Date\s+of\s+Dispatch\s*:?\s*({date})")).unwrap(),
                Regex::new(&format!(r"(?i)Date\s+of\s+Dispatch/Email\s*:?\s*({date})")).unwrap(),
                Regex::new(&format!(r"(?i)hearing\s+notice\s+dated\s*({date})")).unwrap(),
                Regex::new(&format!(r"(?i)\bDate\s*[\-:]\s*({date})\b")).unwrap(),
            ],
            hearing_location: Regex::new(r"(?i)Hearing\s+Location\s*:\s*(.+)").unwrap(),
            hearing_date_time: Regex::new(&format!(
                r"(?i)Hearing\s+Date\s*&\s*Time\s*:\s*({date})\s*/\s*([^\n]+)"
            ))
            .unwrap(),
            clock_time: Regex::new(r"(\d{1,2}:\d{2})").unwrap(),
            duration_phrase: vec![
                Regex::new(r"(?i)\bfor\s*\(?\s*([0-9]{1,3}\s*(?:minutes?|mins?|hours?|hrs?))\s*\)?")
                    .unwrap(),
                Regex::new(
                    r"(?i)\bduration\s*(?:of)?\s*[:\-]?\s*\(?\s*([0-9]{1,3}\s*(?:minutes?|mins?|hours?|hrs?))\s*\)?",
                )
                .unwrap(),
            ],
            duration_labelled: vec![
                Regex::new(r"(?i)Hearing\s+Duration\s*[:\-]\s*([^\n]+)").unwrap(),
                Regex::new(
                    r"(?i)\bDuration\s*[:\-]\s*([0-9]{1,3}\s*(?:minutes?|mins?|hours?|hrs?)(?:\s*[0-9]{1,2}\s*(?:minutes?|mins?))?)",
                )
                .unwrap(),
            ],
            time_range: Regex::new(
                r"(?i)(\d{1,2}:\d{2})\s*(?:HRS|IST|AM|PM)?\s*(?:to|\-|\u{2013}|\u{2014})\s*(\d{1,2}:\d{2})",
            )
            .unwrap(),
            fer_dated: Regex::new(&format!(r"(?i)FER\s+dated\s*({date})")).unwrap(),
            fer_reply: Regex::new(&format!(
                r"(?i)reply\s+of\s+the\s+applicant\s+dated\s*({date})"
            ))
            .unwrap(),
            date_label_line: Regex::new(r"(?i)^date\s*[:\-]").unwrap(),
            numeric_date: Regex::new(NUMERIC_DATE).unwrap(),
            numeric_date_full: Regex::new(&format!(r"^{date}$")).unwrap(),
            skip_hn_line: Regex::new(r"(?i)hearing date|date & time|time").unwrap(),
            dx_head: Regex::new(r"(?i)^\s*(D\d+)\s*[:\-]?\s*(.*)$").unwrap(),
            dx_stop: Regex::new(
                r"(?i)^\s*(FORMAL\s+REQUIREMENT|REPLY\s+TO\s+OBJECTION|NOVELTY|INVENTIVE|NON[\-\s]*PATENT|CLAIM|HEARING|NAME\s+OF\s+THE\s+CONTROLLER)\b",
            )
            .unwrap(),
            publication_date: Regex::new(
                r"(?i)Publication\s*Date\s*[:\-]*\s*([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4})",
            )
            .unwrap(),
            paren_date: Regex::new(r"\(([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4})\)").unwrap(),
            whole_document: Regex::new(r"(?i)\s*\(?\s*\bwhole\s+doc(?:ument)?\b.*$").unwrap(),
        }
    }

    /// Run every field chain over the notice text.
    pub fn extract(&self, text: &str) -> CaseMeta {
        let mut meta = CaseMeta::new();

        meta.app_no = first_capture(&self.app_no, text);
        meta.filed_on = first_capture(&self.filed_on, text);
        meta.applicant = self.applicant(text);
        meta.controller = self.controller(text);
        meta.agents = first_capture(&self.agent, text);

        meta.fer_dispatch_date = first_capture(&self.fer_dispatch, text);
        meta.hn_dispatch_date = {
            let primary = self.hn_dispatch_date(text);
            if primary.is_empty() {
                first_capture(&self.hn_dispatch_generic, text)
            } else {
                primary
            }
        };

        if let Some(caps) = self.hearing_location.captures(text) {
            meta.hearing_mode = clean(&caps[1]);
        }
        if let Some(caps) = self.hearing_date_time.captures(text) {
            meta.hearing_date = clean(&caps[1]);
            let time_blob = clean(&caps[2]);
            meta.hearing_time = self
                .clock_time
                .captures(&time_blob)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| time_blob.clone());
            meta.hearing_duration = {
                let from_phrase = first_capture(&self.duration_phrase, &time_blob);
                if from_phrase.is_empty() {
                    self.duration_from_time_range(&time_blob)
                } else {
                    from_phrase
                }
            };
        }
        if meta.hearing_duration.is_empty() {
            meta.hearing_duration = self.hearing_duration(text);
        }

        meta.fer_date = {
            let dated = first_capture(&[self.fer_dated.clone()], text);
            if dated.is_empty() {
                meta.fer_dispatch_date.clone()
            } else {
                dated
            }
        };
        meta.fer_reply_date = first_capture(&[self.fer_reply.clone()], text);

        meta.prior_arts = self.parse_prior_arts(text);
        meta.disclosures = self.extract_disclosures(text, &meta.prior_arts);

        meta
    }

    /// Dedicated hearing-notice dispatch-date chain, layered from most to
    /// least authoritative phrasing.
    pub fn hn_dispatch_date(&self, text: &str) -> String {
        let labelled = first_capture(&self.hn_dispatch_labelled, text);
        if !labelled.is_empty() {
            return labelled;
        }

        let lines: Vec<&str> = text
            .lines()
            .map(|ln| ln.trim())
            .filter(|ln| !ln.is_empty())
            .collect();

        // Common top-header format: a bare "Date: dd/mm/yyyy" line that is
        // not the hearing date itself.
        for ln in lines.iter().take(40) {
            if self.skip_hn_line.is_match(ln) {
                continue;
            }
            if self.date_label_line.is_match(ln) {
                if let Some(m) = self.numeric_date.find(ln) {
                    return clean(m.as_str());
                }
            }
            if self.numeric_date_full.is_match(ln) {
                return clean(ln);
            }
        }

        let dated = first_capture(&self.hn_notice_dated, text);
        if !dated.is_empty() {
            return dated;
        }

        for ln in lines.iter().take(120) {
            if ln.to_lowercase().contains("dispatch") {
                if let Some(m) = self.numeric_date.find(ln) {
                    return clean(m.as_str());
                }
            }
        }

        String::new()
    }

    /// Dedicated hearing-duration chain: explicit phrase, labelled field,
    /// then time-range arithmetic.
    pub fn hearing_duration(&self, text: &str) -> String {
        let phrase = first_capture(&self.duration_phrase, text);
        if !phrase.is_empty() {
            return phrase;
        }
        let labelled = first_capture(&self.duration_labelled, text);
        if !labelled.is_empty() {
            return labelled;
        }
        self.duration_from_time_range(text)
    }

    fn duration_from_time_range(&self, text: &str) -> String {
        let Some(caps) = self.time_range.captures(text) else {
            return String::new();
        };
        let (Some(start), Some(end)) = (parse_clock(&caps[1]), parse_clock(&caps[2])) else {
            return String::new();
        };
        let mut end = end;
        if end < start {
            end += 24 * 60;
        }
        let mins = end - start;
        if mins == 0 {
            return String::new();
        }
        if mins % 60 == 0 {
            let hrs = mins / 60;
            if hrs == 1 {
                "1 hour".to_string()
            } else {
                format!("{hrs} hours")
            }
        } else {
            format!("{mins} minutes")
        }
    }

    fn applicant(&self, text: &str) -> String {
        for pattern in &self.applicant {
            if let Some(caps) = pattern.captures(text) {
                let m = caps.get(1).unwrap();
                let first = clean(m.as_str());
                // The name often wraps onto the following line.
                let after = &text[m.end()..];
                let continuation = self
                    .applicant_continuation
                    .captures(after)
                    .map(|c| clean(&c[1]))
                    .filter(|cand| {
                        !cand.is_empty() && !self.applicant_continuation_stop.is_match(cand)
                    })
                    .unwrap_or_default();
                let joined = [first, continuation]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                return clean(&joined);
            }
        }
        String::new()
    }

    fn controller(&self, text: &str) -> String {
        if let Some(caps) = self.controller_block.captures(text) {
            let name = title_case(&clean(&caps[1]));
            let designation = clean(&caps[2]);
            return format!("{name} ({designation})");
        }
        first_capture(&[self.controller_labelled.clone()], text)
    }

    /// Parse D1..Dn cited references and de-duplicate them.
    fn parse_prior_arts(&self, text: &str) -> Vec<PriorArtRef> {
        let lines: Vec<&str> = text.lines().collect();
        let mut arts: Vec<PriorArtRef> = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let Some(caps) = self.dx_head.captures(lines[i]) else {
                i += 1;
                continue;
            };
            let label = clean(&caps[1]).to_uppercase();
            let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

            let mut block_parts: Vec<String> = Vec::new();
            if !rest.is_empty() {
                block_parts.push(rest.to_string());
            }
            let mut j = i + 1;
            while j < lines.len() && block_parts.len() < 6 {
                let next = lines[j];
                if self.dx_head.is_match(next) || self.dx_stop.is_match(next) {
                    break;
                }
                let cleaned = clean(next);
                if !cleaned.is_empty() {
                    block_parts.push(cleaned);
                }
                j += 1;
            }
            let block = clean(&block_parts.join(" "));

            // Date: explicit label, then parenthesized, then bare pattern.
            let mut date = self
                .publication_date
                .captures(&block)
                .map(|c| normalize_date(&c[1]))
                .unwrap_or_default();
            if date.is_empty() {
                date = self
                    .paren_date
                    .captures(&block)
                    .map(|c| normalize_date(&c[1]))
                    .unwrap_or_default();
            }
            if date.is_empty() {
                date = normalize_date(&block);
            }

            let mut docno = block.clone();
            if !date.is_empty() {
                let date_start = self.numeric_date.find(&docno).map(|m| m.start());
                if let Some(start) = date_start {
                    docno.truncate(start);
                }
                docno = Regex::new(r"(?i)Publication\s*Date\s*[:\-]*\s*$")
                    .unwrap()
                    .replace(&docno, "")
                    .trim()
                    .to_string();
            }
            docno = self.whole_document.replace(&docno, "").trim().to_string();
            docno = docno
                .trim_matches(&[' ', ';', ','][..])
                .trim_end_matches(&['(', ' '][..])
                .to_string();

            if !docno.is_empty() {
                arts.push(PriorArtRef { label, docno, date });
            }

            i = j.max(i + 1);
        }

        dedup_prior_arts(arts)
    }

    /// Per-label "Dx ... discloses <text>" windows, clipped to 900 chars.
    ///
    /// Anchored on a label occurrence (or the document number as a
    /// fallback) whose following verb is not claimed by a later citation:
    /// another D-label between anchor and verb disqualifies the
    /// occurrence. The window runs to the next label, a concluding
    /// connective, or end of text.
    fn extract_disclosures(
        &self,
        text: &str,
        prior_arts: &[PriorArtRef],
    ) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        let boundary = Regex::new(
            r"(?i)(?:\bdocument\s+)?\bD\d+\b|\btherefore\b|\bthus\b|\bhence\b|\bin\s+view\b",
        )
        .unwrap();
        let verb =
            Regex::new(r"(?i)\b(?:discloses|describes|teaches|is\s+related\s+to)\b").unwrap();
        let any_label = Regex::new(r"(?i)\bD\d+\b").unwrap();

        for pa in prior_arts {
            let label = pa.label.to_uppercase();
            let label_re =
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&label))).unwrap();

            let mut anchors: Vec<usize> =
                label_re.find_iter(text).map(|m| m.end()).collect();
            if !pa.docno.is_empty() {
                let docno_re = Regex::new(&regex::escape(&pa.docno)).unwrap();
                anchors.extend(docno_re.find_iter(text).map(|m| m.end()));
            }

            for anchor in anchors {
                let after = &text[anchor..];
                let Some(v) = verb.find(after) else { continue };
                let gap = &after[..v.start()];
                let crosses_other_label = any_label
                    .find_iter(gap)
                    .any(|g| !g.as_str().eq_ignore_ascii_case(&label));
                if crosses_other_label {
                    continue;
                }
                let rest = &after[v.end()..];
                let end = boundary.find(rest).map(|b| b.start()).unwrap_or(rest.len());
                let window: String = clean(&rest[..end]).chars().take(900).collect();
                if !window.is_empty() {
                    out.insert(label.clone(), window);
                    break;
                }
            }
        }

        out
    }
}

impl Default for MetaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Recover the agent name from a drawings sheet, where the signature block
/// reads "<name>\nPatent Agent".
pub fn agent_from_drawings(text: &str) -> String {
    let re = Regex::new(r"\n\s*([A-Z][A-Za-z ]+?)\s*\n\s*Patent\s+Agent").unwrap();
    re.captures(text).map(|c| clean(&c[1])).unwrap_or_default()
}

fn parse_clock(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    Some(h * 60 + m)
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merge duplicate (label, canonical docno) pairs, preferring the variant
/// carrying a date, then the longer document-number string. Output is in
/// numeric label order.
fn dedup_prior_arts(arts: Vec<PriorArtRef>) -> Vec<PriorArtRef> {
    let mut merged: Vec<(String, PriorArtRef)> = Vec::new();
    for pa in arts {
        let key = format!("{}\u{1}{}", pa.label.to_uppercase(), canonical_docno(&pa.docno));
        match merged.iter_mut().find(|(k, _)| *k == key) {
            None => merged.push((key, pa)),
            Some((_, prev)) => {
                if prev.date.is_empty() && !pa.date.is_empty() {
                    *prev = pa;
                } else if prev.date == pa.date && pa.docno.len() > prev.docno.len() {
                    *prev = pa;
                }
            }
        }
    }
    let mut out: Vec<PriorArtRef> = merged.into_iter().map(|(_, pa)| pa).collect();
    out.sort_by_key(|pa| pa.label_number());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICE: &str = "\
Intellectual Property India
Application Number: 202141012345
Date of Filing: 15/03/2021
Name of the Applicant: Acme Devices
Private Limited
Date of Dispatch: 01/02/2024
Hearing Date & Time : 10-04-2024 / 11:30 HRS IST for (30 Minutes)
Hearing Location: Video Conferencing

D1: US2010/0123456A1 Publication Date: 12/08/2010
D2: EP1234567B1 (05/11/2013) (whole document)

Document D1 discloses a sensor array coupled to a controller. Therefore, the claims lack novelty.
Document D2 describes a network gateway with buffering. Thus, claim 1 is obvious.

Saroj Kumar
Deputy Controller of Patents & Designs
";

    #[test]
    fn test_app_no_variants() {
        let ex = MetaExtractor::new();
        assert_eq!(
            ex.extract("Application Number: 202141012345").app_no,
            "202141012345"
        );
        assert_eq!(
            ex.extract("Indian Patent Application No: 202247001122").app_no,
            "202247001122"
        );
        assert_eq!(ex.extract("Application No.- 1234/DEL/2015").app_no, "1234/DEL/2015");
    }

    #[test]
    fn test_full_notice_extraction() {
        let ex = MetaExtractor::new();
        let meta = ex.extract(NOTICE);

        assert_eq!(meta.app_no, "202141012345");
        assert_eq!(meta.filed_on, "15/03/2021");
        assert_eq!(meta.applicant, "Acme Devices Private Limited");
        assert_eq!(meta.hn_dispatch_date, "01/02/2024");
        assert_eq!(meta.hearing_date, "10-04-2024");
        assert_eq!(meta.hearing_time, "11:30");
        assert_eq!(meta.hearing_duration, "30 Minutes");
        assert_eq!(meta.hearing_mode, "Video Conferencing");
        assert_eq!(
            meta.controller,
            "Saroj Kumar (Deputy Controller of Patents & Designs)"
        );
    }

    #[test]
    fn test_prior_art_parse_and_dates() {
        let ex = MetaExtractor::new();
        let meta = ex.extract(NOTICE);
        assert_eq!(meta.prior_arts.len(), 2);
        assert_eq!(meta.prior_arts[0].label, "D1");
        assert_eq!(meta.prior_arts[0].docno, "US2010/0123456A1");
        assert_eq!(meta.prior_arts[0].date, "12/08/2010");
        assert_eq!(meta.prior_arts[1].label, "D2");
        assert_eq!(meta.prior_arts[1].docno, "EP1234567B1");
        assert_eq!(meta.prior_arts[1].date, "05/11/2013");
    }

    #[test]
    fn test_prior_art_dedup_prefers_dated_then_longer() {
        let arts = vec![
            PriorArtRef::new("D1", "US123456"),
            PriorArtRef {
                label: "D1".into(),
                docno: "US 123 456".into(),
                date: "01/01/2020".into(),
            },
            PriorArtRef {
                label: "D1".into(),
                docno: "US-123-456-A1x".into(),
                date: String::new(),
            },
        ];
        let out = dedup_prior_arts(arts);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date, "01/01/2020");
    }

    #[test]
    fn test_disclosures() {
        let ex = MetaExtractor::new();
        let meta = ex.extract(NOTICE);
        let d1 = meta.disclosure("D1").unwrap();
        assert!(d1.starts_with("a sensor array"));
        assert!(!d1.contains("Therefore"));
        let d2 = meta.disclosure("D2").unwrap();
        assert!(d2.starts_with("a network gateway"));
        assert!(!d2.contains("Thus"));
    }

    #[test]
    fn test_hn_dispatch_top_header_date() {
        let ex = MetaExtractor::new();
        let text = "To whom it may concern\nDate: 09/09/2023\nHearing Date & Time : 01-10-2023 / 10:00";
        assert_eq!(ex.hn_dispatch_date(text), "09/09/2023");
    }

    #[test]
    fn test_duration_from_time_range() {
        let ex = MetaExtractor::new();
        assert_eq!(
            ex.hearing_duration("scheduled from 10:00 HRS to 10:45"),
            "45 minutes"
        );
        assert_eq!(ex.hearing_duration("between 14:00 - 16:00 IST"), "2 hours");
        assert_eq!(ex.hearing_duration("at 11:00 sharp"), "");
    }

    #[test]
    fn test_agent_from_drawings() {
        let text = "sheet 1 of 3\n\nRavi Menon\nPatent Agent IN/PA 1234";
        assert_eq!(agent_from_drawings(text), "Ravi Menon");
    }
}
