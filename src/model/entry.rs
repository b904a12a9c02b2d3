//! User-supplied prior-art entries and D-label assignment.

use std::collections::BTreeSet;
use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::case::label_number;

/// A user-supplied prior-art entry: an abstract and/or summary text with
/// an optional diagram image.
///
/// Distinct from [`PriorArtRef`](super::PriorArtRef), which is what the
/// notice itself cites; entries are what the drafter hands the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorArtEntry {
    /// D-label. May be absent or malformed on input; label assignment
    /// repairs it.
    #[serde(default)]
    pub label: String,

    /// Abstract text of the reference.
    #[serde(default)]
    pub abstract_text: String,

    /// Drafter-written summary of the reference.
    #[serde(default)]
    pub summary: String,

    /// Path to a diagram image, if one was supplied.
    #[serde(default)]
    pub diagram: Option<PathBuf>,
}

impl PriorArtEntry {
    /// Create an entry with an abstract only.
    pub fn with_abstract(label: impl Into<String>, abstract_text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            abstract_text: abstract_text.into(),
            ..Default::default()
        }
    }

    /// Whether the entry carries any usable content.
    pub fn has_content(&self) -> bool {
        !self.abstract_text.trim().is_empty()
            || !self.summary.trim().is_empty()
            || self.diagram.is_some()
    }
}

/// Normalize entries: collapse whitespace, drop content-free entries, and
/// assign stable unique D-labels.
///
/// A well-formed supplied label ("D3") is preserved unless already taken;
/// anything else gets the lowest unused positive integer. The result is
/// sorted by numeric label.
pub fn normalize_entries(entries: Vec<PriorArtEntry>) -> Vec<PriorArtEntry> {
    let label_re = Regex::new(r"^D(\d+)$").unwrap();

    let mut used: BTreeSet<u32> = BTreeSet::new();
    let mut normalized: Vec<PriorArtEntry> = Vec::with_capacity(entries.len());

    for raw in entries {
        let supplied = raw.label.trim().to_uppercase();
        let mut num = label_re
            .captures(&supplied)
            .and_then(|c| c[1].parse::<u32>().ok())
            .unwrap_or(0);
        if num == 0 || used.contains(&num) {
            let mut candidate = 1;
            while used.contains(&candidate) {
                candidate += 1;
            }
            num = candidate;
        }
        used.insert(num);

        let entry = PriorArtEntry {
            label: format!("D{num}"),
            abstract_text: collapse_ws(&raw.abstract_text),
            summary: collapse_ws(&raw.summary),
            diagram: raw.diagram,
        };
        if entry.has_content() {
            normalized.push(entry);
        }
    }

    normalized.sort_by_key(|e| label_number(&e.label));
    normalized
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_preserved_when_well_formed() {
        let entries = vec![
            PriorArtEntry::with_abstract("D2", "second"),
            PriorArtEntry::with_abstract("D1", "first"),
        ];
        let out = normalize_entries(entries);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label, "D1");
        assert_eq!(out[1].label, "D2");
    }

    #[test]
    fn test_duplicate_and_malformed_labels_repaired() {
        let entries = vec![
            PriorArtEntry::with_abstract("D1", "a"),
            PriorArtEntry::with_abstract("D1", "b"),
            PriorArtEntry::with_abstract("", "c"),
            PriorArtEntry::with_abstract("d-x", "d"),
        ];
        let out = normalize_entries(entries);
        let labels: Vec<&str> = out.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["D1", "D2", "D3", "D4"]);
    }

    #[test]
    fn test_gap_is_filled_first() {
        let entries = vec![
            PriorArtEntry::with_abstract("D3", "third"),
            PriorArtEntry::with_abstract("", "fills one"),
        ];
        let out = normalize_entries(entries);
        let labels: Vec<&str> = out.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["D1", "D3"]);
    }

    #[test]
    fn test_content_free_entries_dropped() {
        let entries = vec![
            PriorArtEntry::with_abstract("D1", "   "),
            PriorArtEntry::with_abstract("D2", "kept"),
        ];
        let out = normalize_entries(entries);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].abstract_text, "kept");
    }

    #[test]
    fn test_no_two_entries_share_a_label() {
        let entries = vec![
            PriorArtEntry::with_abstract("D5", "a"),
            PriorArtEntry::with_abstract("D5", "b"),
            PriorArtEntry::with_abstract("D5", "c"),
        ];
        let out = normalize_entries(entries);
        let mut labels: Vec<&str> = out.iter().map(|e| e.label.as_str()).collect();
        let before = labels.len();
        labels.dedup();
        assert_eq!(labels.len(), before);
    }
}
