//! Request orchestration: extraction, precedence policies, derived
//! fields, and mandatory-field validation.
//!
//! The assembler runs the extractors over the input documents, reconciles
//! conflicting sources with a first-non-empty precedence policy, derives
//! the composite fields (claim-1 feature decomposition, D-label strings,
//! combined-difference narrative, evidence sequence), and produces the
//! final [`FieldMap`] plus [`AssemblyDirectives`]. Validation happens
//! before any document mutation begins.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::error::{Error, MandatoryField, Result};
use crate::extract::{
    agent_from_drawings, figure_descriptions, objection_blocks, parse_amended_claims,
    parse_specification_claims, reply_3k_fallback, technical_advancement, technical_effect,
    technical_problem, technical_solution, MetaExtractor,
};
use crate::model::{
    normalize_entries, AssemblyDirectives, ClaimMap, EvidenceItem, FieldMap, PriorArtEntry,
};
use crate::normalize::{NormalizeOptions, PageNormalizer};

/// Amended-claims input: the collaborator may deliver page text or a
/// plain text body.
#[derive(Debug, Clone)]
pub enum AmendedClaims {
    /// Per-page extracted text.
    Pages(Vec<String>),
    /// Already-joined plain text.
    Text(String),
}

/// One generation request: the input documents and user-supplied data.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Hearing-notice page text (required).
    pub notice_pages: Vec<String>,

    /// Specification page text (required).
    pub specification_pages: Vec<String>,

    /// User-supplied prior-art entries (at least one must survive
    /// normalization).
    pub prior_art_entries: Vec<PriorArtEntry>,

    /// Optional amended-claims document.
    pub amended_claims: Option<AmendedClaims>,

    /// Optional drawings page text, used only to recover an agent name.
    pub drawings_pages: Vec<String>,

    /// Technical-solution diagram images.
    pub solution_images: Vec<PathBuf>,

    /// Patent-office city.
    pub city: String,

    /// Filed-on date override; the notice value is used when absent.
    pub filed_on: Option<String>,

    /// Agent-name override.
    pub agent_name: Option<String>,

    /// Generation date override; today's date when absent. Pinning this
    /// makes reruns byte-identical.
    pub generated_on: Option<NaiveDate>,
}

impl GenerateRequest {
    /// Create a request with the required inputs and defaults elsewhere.
    pub fn new(
        notice_pages: Vec<String>,
        specification_pages: Vec<String>,
        prior_art_entries: Vec<PriorArtEntry>,
    ) -> Self {
        Self {
            notice_pages,
            specification_pages,
            prior_art_entries,
            amended_claims: None,
            drawings_pages: Vec::new(),
            solution_images: Vec::new(),
            city: "Chennai".to_string(),
            filed_on: None,
            agent_name: None,
            generated_on: None,
        }
    }

    /// Set the amended-claims input.
    pub fn with_amended_claims(mut self, claims: AmendedClaims) -> Self {
        self.amended_claims = Some(claims);
        self
    }

    /// Set the patent-office city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Pin the generation date.
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }
}

/// Builds the field map and assembly directives from a request.
pub struct FieldAssembler {
    normalizer: PageNormalizer,
    meta: MetaExtractor,
}

impl FieldAssembler {
    /// Create an assembler with default normalization.
    pub fn new() -> Self {
        Self::with_options(NormalizeOptions::default())
    }

    /// Create an assembler with explicit normalization options.
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self {
            normalizer: PageNormalizer::new(options),
            meta: MetaExtractor::new(),
        }
    }

    /// Run the full extraction-and-derivation pass.
    ///
    /// Fails with a [`Error::MissingField`] naming the first unmet
    /// mandatory requirement, in the order: prior-art entries,
    /// application number, controller name, applicant name, dispatch
    /// date, claims.
    pub fn assemble(&self, request: &GenerateRequest) -> Result<(FieldMap, AssemblyDirectives)> {
        let prior_arts = normalize_entries(request.prior_art_entries.clone());
        if prior_arts.is_empty() {
            return Err(Error::MissingField(MandatoryField::PriorArtEntries));
        }

        let hn_text = self.normalizer.normalize(&request.notice_pages);
        let meta = self.meta.extract(&hn_text);
        let (formal_objections, nonpat_objection) = objection_blocks(&hn_text);

        let spec_text = self.normalizer.normalize(&request.specification_pages);

        let app_no = meta.app_no.clone();
        if app_no.is_empty() {
            return Err(Error::MissingField(MandatoryField::ApplicationNumber));
        }
        let controller = meta.controller.clone();
        if controller.is_empty() {
            return Err(Error::MissingField(MandatoryField::ControllerName));
        }
        let applicant = meta.applicant.clone();
        if applicant.is_empty() {
            return Err(Error::MissingField(MandatoryField::ApplicantName));
        }

        // First non-empty of [primary extraction, dedicated fallback pass].
        let hn_dispatch = first_nonempty(&[&meta.hn_dispatch_date, &self.meta.hn_dispatch_date(&hn_text)]);
        if hn_dispatch.is_empty() {
            return Err(Error::MissingField(MandatoryField::DispatchDate));
        }

        let claims = self.resolve_claims(request, &spec_text);
        if claims.is_empty() {
            return Err(Error::MissingField(MandatoryField::Claims));
        }
        if claims.get(1).is_none() {
            return Err(Error::MissingField(MandatoryField::ClaimOne));
        }

        let hearing_duration =
            first_nonempty(&[&meta.hearing_duration, &self.meta.hearing_duration(&hn_text)]);
        let reply_3k = first_nonempty(&[&nonpat_objection, &reply_3k_fallback(&hn_text)]);

        let agents = first_nonempty(&[
            request.agent_name.as_deref().unwrap_or(""),
            &agent_from_drawings(&self.normalizer.normalize(&request.drawings_pages)),
            &meta.agents,
        ]);

        let dx_labels: Vec<String> = prior_arts.iter().map(|e| e.label.clone()).collect();
        let dx_range = dx_range_string(&dx_labels);
        let dx_and = dx_and_string(&dx_labels);

        let claim1_text = claims.text_or_empty(1).to_string();
        let claim1_features = build_claim1_features(&claim1_text);
        let claim_basis = if claim1_features.is_empty() {
            claim1_text.clone()
        } else {
            claim1_features.clone()
        };
        let evidence = build_evidence(&prior_arts, &claim_basis, &dx_range);

        let hearing_time_fmt = format_hearing_time(&meta.hearing_time);
        let mut hearing_dt_parts: Vec<String> = [meta.hearing_date.clone(), hearing_time_fmt]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !hearing_duration.is_empty() {
            hearing_dt_parts.push(format!("Duration: {hearing_duration}"));
        }
        let hearing_dt = hearing_dt_parts.join(" / ");

        let participants = if agents.is_empty() {
            format!("1. {controller}")
        } else {
            format!("1. {controller}\n2. {agents}")
        };

        let ws_date = request
            .generated_on
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%d-%m-%Y")
            .to_string();

        let fig_map = figure_descriptions(&spec_text);
        let fig_descriptions = fig_map
            .iter()
            .map(|(n, desc)| format!("FIG. {n}: {desc}"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut fields = FieldMap::new();
        fields.set("WS_DATE", ws_date);
        fields.set("APP_NO", app_no.as_str());
        fields.set(
            "FILED_ON",
            first_nonempty(&[request.filed_on.as_deref().unwrap_or(""), &meta.filed_on]),
        );
        fields.set("APPLICANT_NAME", applicant);
        fields.set("CONTROLLER_NAME", controller);
        fields.set("AGENT_NAMES", agents);
        fields.set("DEAR_SALUTATION", "Sir");
        fields.set("CITY", request.city.as_str());
        fields.set("HN_DISPATCH_DATE", hn_dispatch);
        fields.set("HEARING_DATE", meta.hearing_date.as_str());
        fields.set("HEARING_MODE", first_nonempty(&[&meta.hearing_mode, "Video Conferencing"]));
        fields.set("HEARING_DATE_TIME", hearing_dt);
        fields.set("PARTICIPANTS", participants);
        fields.set("FER_REPLY_DATE", meta.fer_reply_date.as_str());
        fields.set(
            "FER_DATE",
            first_nonempty(&[&meta.fer_date, &meta.fer_dispatch_date]),
        );
        fields.set("PRIOR_ARTS_LIST", prior_arts_list(&prior_arts));
        fields.set("DX_RANGE", dx_range.as_str());
        fields.set("DX_AND", dx_and);
        fields.set("CLAIMS_RANGE", claims.range_string());
        for n in 1..=10u32 {
            fields.set(format!("AMENDED_CLAIM_{n}"), claims.text_or_empty(n));
        }
        fields.set("EXTRA_CLAIMS_BLOCK", extra_claims_block(&claims, &dx_range));
        fields.set("CLAIM1_FEATURES", claim1_features);
        fields.set("D1D2_DISCLOSURE", disclosure_text(&prior_arts));
        fields.set("TECHNICAL_ADVANCEMENT", technical_advancement(&spec_text));
        fields.set("REPLY_3K", reply_3k);
        fields.set("TECH_PROBLEM", technical_problem(&spec_text));
        fields.set("TECH_SOLUTION", technical_solution(&spec_text));
        fields.set("TECH_EFFECT", technical_effect(&spec_text));
        fields.set("FORMAL_OBJECTIONS_REPLY", formal_objections);
        fields.set("FIG_DESCRIPTIONS", fig_descriptions);

        let directives = AssemblyDirectives {
            evidence,
            max_claim: claims.max_number(),
            solution_images: request.solution_images.clone(),
        };

        Ok((fields, directives))
    }

    /// Claims precedence: the amended-claims parse wins wholesale when it
    /// yields any claim; otherwise the specification parse is used. No
    /// per-claim merge.
    fn resolve_claims(&self, request: &GenerateRequest, spec_text: &str) -> ClaimMap {
        if let Some(source) = &request.amended_claims {
            let text = match source {
                AmendedClaims::Pages(pages) => self.normalizer.normalize(pages),
                AmendedClaims::Text(text) => text.clone(),
            };
            let amended = parse_amended_claims(&text);
            if !amended.is_empty() {
                return amended;
            }
        }
        parse_specification_claims(spec_text)
    }
}

impl Default for FieldAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-empty (after trimming) of the candidates, or empty string.
pub(crate) fn first_nonempty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
}

/// D-range string: "D1-D3" for a contiguous run of two or more, a lone
/// label for one, "D1, D3" otherwise.
pub fn dx_range_string(labels: &[String]) -> String {
    let nums = label_numbers(labels);
    if nums.is_empty() {
        return String::new();
    }
    if nums.len() == 1 {
        return format!("D{}", nums[0]);
    }
    let contiguous = nums.windows(2).all(|w| w[1] == w[0] + 1);
    if contiguous {
        format!("D{}-D{}", nums[0], nums[nums.len() - 1])
    } else {
        nums.iter().map(|n| format!("D{n}")).collect::<Vec<_>>().join(", ")
    }
}

/// D-conjunction string: "D1", "D1 and D2", "D1, D2 and D3".
pub fn dx_and_string(labels: &[String]) -> String {
    let nums = label_numbers(labels);
    let ds: Vec<String> = nums.iter().map(|n| format!("D{n}")).collect();
    match ds.len() {
        0 => String::new(),
        1 => ds[0].clone(),
        2 => format!("{} and {}", ds[0], ds[1]),
        _ => format!("{} and {}", ds[..ds.len() - 1].join(", "), ds[ds.len() - 1]),
    }
}

fn label_numbers(labels: &[String]) -> Vec<u32> {
    let mut nums: Vec<u32> = labels
        .iter()
        .filter_map(|d| {
            let digits: String = d.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .collect();
    nums.sort_unstable();
    nums.dedup();
    nums
}

/// Decompose claim 1 into a preamble plus enumerated feature clauses for
/// the comparison table's left column.
///
/// Best-effort legal-drafting heuristic: split on the "comprising"
/// transition, then on "wherein" clauses and comma/and/having separators,
/// keeping at most four head features and four wherein clauses,
/// de-duplicated by normalized key. Atypical claim phrasing falls back to
/// the full claim text.
pub fn build_claim1_features(claim1_text: &str) -> String {
    let txt = claim1_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let txt = txt.trim().trim_end_matches('.').to_string();
    if txt.is_empty() {
        return String::new();
    }

    let comprising = Regex::new(r"(?i)^(.*?\bcomprising\b\s*:?)\s*(.*)$").unwrap();
    let Some(caps) = comprising.captures(&txt) else {
        return format!("{txt}.");
    };
    let preamble = caps[1].trim().to_string();
    let rest = caps[2].trim().to_string();
    if rest.chars().count() < 120 {
        return format!("{preamble}\n{rest}.");
    }

    // Split off each "wherein" clause.
    let wherein = Regex::new(r"(?i)\bwherein\b").unwrap();
    let mut seg_starts: Vec<usize> = vec![0];
    for m in wherein.find_iter(&rest) {
        if m.start() > 0 {
            seg_starts.push(m.start());
        }
    }
    let mut segments: Vec<&str> = Vec::new();
    for (i, &start) in seg_starts.iter().enumerate() {
        let end = seg_starts.get(i + 1).copied().unwrap_or(rest.len());
        segments.push(rest[start..end].trim());
    }
    let head = segments[0].trim_matches(&[' ', ';', ','][..]).to_string();
    let wherein_clauses: Vec<String> = segments[1..]
        .iter()
        .map(|s| s.trim_matches(&[' ', ';', ','][..]).to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let head_split = Regex::new(r"(?i)\s*,\s*|\s+\band\b\s+|\s+\bhaving\b\s+").unwrap();
    let mut features: Vec<String> = head_split
        .split(&head)
        .map(str::trim)
        .filter(|p| p.chars().count() > 8)
        .take(4)
        .map(str::to_string)
        .collect();
    features.extend(wherein_clauses.into_iter().take(4));

    let mut seen: Vec<String> = Vec::new();
    let mut cleaned: Vec<String> = Vec::new();
    for feature in features {
        let key: String = feature
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if !key.is_empty() && !seen.contains(&key) {
            seen.push(key);
            cleaned.push(feature);
        }
    }

    if cleaned.is_empty() {
        return format!("{preamble}.");
    }
    format!("{preamble}\n{}.", cleaned.join("\n"))
}

/// Ordered evidence sequence: abstract, diagram, summary per entry, then
/// the combined-difference narrative.
pub fn build_evidence(
    entries: &[PriorArtEntry],
    claim_basis: &str,
    dx_range: &str,
) -> Vec<EvidenceItem> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut sequence: Vec<EvidenceItem> = Vec::new();
    for entry in entries {
        let abstract_text = clip_chars(&entry.abstract_text, 1200);
        if !abstract_text.is_empty() {
            sequence.push(EvidenceItem::text(abstract_text));
        }
        if let Some(diagram) = &entry.diagram {
            sequence.push(EvidenceItem::image(diagram.clone()));
        }
        let summary = clip_chars(&entry.summary, 1200);
        if !summary.is_empty() {
            sequence.push(EvidenceItem::text(summary));
        }
    }

    let claim_basis = clip_chars(claim_basis, 1400);
    let focus_bits: Vec<String> = entries
        .iter()
        .filter(|e| !e.summary.trim().is_empty())
        .map(|e| format!("{} focuses on {}", e.label, clip_chars(&e.summary, 260)))
        .collect();
    let prior_focus = focus_bits.join("; ");
    let prior_set = if dx_range.is_empty() {
        entries.iter().map(|e| e.label.clone()).collect::<Vec<_>>().join(", ")
    } else {
        dx_range.to_string()
    };

    let diff_text = if !claim_basis.is_empty() && !prior_focus.is_empty() {
        format!(
            "Combined difference over {prior_set}: The claimed invention requires the combined \
             feature set of Claim 1 ({claim_basis}). In contrast, {prior_focus}. Accordingly, \
             {prior_set} do not individually or in combination disclose the complete claimed \
             combination."
        )
    } else if !claim_basis.is_empty() {
        format!(
            "Combined difference over {prior_set}: The claimed invention requires the combined \
             feature set of Claim 1 ({claim_basis}), which is not disclosed by the cited prior \
             arts individually or in combination."
        )
    } else {
        String::new()
    };

    if !diff_text.is_empty() {
        sequence.push(EvidenceItem::text(diff_text));
    }
    sequence
}

/// "D1: <summary-or-abstract>" list for the prior-arts placeholder.
fn prior_arts_list(entries: &[PriorArtEntry]) -> String {
    entries
        .iter()
        .filter_map(|e| {
            let desc = first_nonempty(&[&e.summary, &e.abstract_text]);
            if desc.is_empty() {
                None
            } else {
                Some(format!("{}: {desc}", e.label))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Right-column disclosure text of the comparison table.
fn disclosure_text(entries: &[PriorArtEntry]) -> String {
    entries
        .iter()
        .filter_map(|e| {
            let disclosure = clip_chars(&first_nonempty(&[&e.summary, &e.abstract_text]), 900);
            if disclosure.is_empty() {
                None
            } else {
                Some(format!("{}: {disclosure}", e.label))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Synthesized "Regarding Claim N" blocks for claims beyond the static
/// template range (N > 10).
fn extra_claims_block(claims: &ClaimMap, dx_range: &str) -> String {
    let range = if dx_range.is_empty() { "D1" } else { dx_range };
    let mut out = String::new();
    for (n, text) in claims.iter() {
        if n <= 10 || text.trim().is_empty() {
            continue;
        }
        let text = text.trim();
        out.push_str(&format!(
            "\n\nRegarding Claim {n}:\n\
             Applicant has reviewed the entire application of {range} and found that nowhere in \
             the entire applications does {range} describe or reasonably suggest the following \
             features \"{text}\". Apart from the above, Applicant believes that dependent claim \
             {n} is allowable not only by virtue of their dependency from patentable independent \
             claim 1, respectively, but also by virtue of the additional features of the \
             invention they define. The dependent claims describe various embodiments of the \
             invention that can be combined to form the invention. The subject matter described \
             in the instant application are different from {range} so as the features described \
             in dependent claim {n}."
        ));
    }
    out.trim().to_string()
}

fn format_hearing_time(time: &str) -> String {
    let time = time.trim();
    if Regex::new(r"^\d{1,2}:\d{2}$").unwrap().is_match(time) {
        format!("{time} HRS (IST)")
    } else {
        time.to_string()
    }
}

fn clip_chars(s: &str, max: usize) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize the application number into a filesystem-safe stem.
pub fn sanitize_filename(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\n' | '\r' | '\t' => '_',
            other => other,
        })
        .collect();
    let joined = replaced.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        "UNKNOWN".to_string()
    } else {
        joined
    }
}

/// Output filename derived from the application number.
pub fn output_filename(app_no: &str) -> String {
    format!("Written_Submission_{}.json", sanitize_filename(app_no))
}
