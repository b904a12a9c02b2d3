//! Case metadata extracted from the hearing notice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A cited prior-art reference parsed from notice/report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorArtRef {
    /// Sequential label ("D1", "D2", ...), uppercase.
    pub label: String,

    /// Document number string, date and trailing annotations stripped.
    pub docno: String,

    /// Publication date in dd/mm/yyyy form, empty when not found.
    #[serde(default)]
    pub date: String,
}

impl PriorArtRef {
    /// Create a reference without a date.
    pub fn new(label: impl Into<String>, docno: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            docno: docno.into(),
            date: String::new(),
        }
    }

    /// Numeric part of the label, used for ordering. Unparseable labels
    /// sort last.
    pub fn label_number(&self) -> u32 {
        label_number(&self.label)
    }
}

/// Numeric part of a D-label ("D12" -> 12); unparseable labels sort last.
pub(crate) fn label_number(label: &str) -> u32 {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(u32::MAX)
}

/// Scalar case fields extracted from the hearing notice, plus cited
/// prior-art references and their per-label disclosure sentences.
///
/// Absent fields are empty strings; the extractor never fails on a miss.
/// Which empty fields are fatal is the pipeline's decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseMeta {
    /// Application number.
    pub app_no: String,

    /// Date of filing.
    pub filed_on: String,

    /// Applicant name.
    pub applicant: String,

    /// Controller name with designation.
    pub controller: String,

    /// Agent name(s) on record.
    pub agents: String,

    /// FER dispatch/email date from the top of the document.
    pub fer_dispatch_date: String,

    /// Hearing-notice dispatch date.
    pub hn_dispatch_date: String,

    /// Hearing date.
    pub hearing_date: String,

    /// Hearing time.
    pub hearing_time: String,

    /// Hearing duration ("30 minutes", "1 hour").
    pub hearing_duration: String,

    /// Hearing mode/location.
    pub hearing_mode: String,

    /// FER date (sometimes equal to the FER dispatch date).
    pub fer_date: String,

    /// Date of the applicant's FER reply.
    pub fer_reply_date: String,

    /// Cited prior-art references in numeric label order.
    pub prior_arts: Vec<PriorArtRef>,

    /// Short disclosure sentence per D-label.
    pub disclosures: BTreeMap<String, String>,
}

impl CaseMeta {
    /// Create empty metadata with the default hearing mode.
    pub fn new() -> Self {
        Self {
            hearing_mode: "Video Conferencing".to_string(),
            ..Default::default()
        }
    }

    /// Disclosure sentence for a label, if extracted.
    pub fn disclosure(&self, label: &str) -> Option<&str> {
        self.disclosures.get(&label.to_uppercase()).map(|s| s.as_str())
    }

    /// Render the cited references as a "D1: <docno> (<date>)" list.
    pub fn prior_arts_list(&self) -> String {
        self.prior_arts
            .iter()
            .map(|pa| {
                if pa.date.is_empty() {
                    format!("{}: {}", pa.label, pa.docno)
                } else {
                    format!("{}: {} ({})", pa.label, pa.docno, pa.date)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
