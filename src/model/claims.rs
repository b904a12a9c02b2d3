//! Claim-number to claim-text mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from claim number to whitespace-normalized claim text.
///
/// Built once per request from a single winning source: the amended
/// claims when they yield any claim, else the specification. Numbers
/// need not be contiguous, but claim 1 must exist for generation to
/// proceed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimMap {
    claims: BTreeMap<u32, String>,
}

impl ClaimMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a claim.
    pub fn insert(&mut self, number: u32, text: impl Into<String>) {
        self.claims.insert(number, text.into());
    }

    /// Claim text by number.
    pub fn get(&self, number: u32) -> Option<&str> {
        self.claims.get(&number).map(|s| s.as_str())
    }

    /// Claim text by number, or empty string.
    pub fn text_or_empty(&self, number: u32) -> &str {
        self.get(number).unwrap_or("")
    }

    /// Whether no claims were parsed.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Claim numbers in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.claims.keys().copied()
    }

    /// Highest claim number, 0 when empty.
    pub fn max_number(&self) -> u32 {
        self.claims.keys().next_back().copied().unwrap_or(0)
    }

    /// "1-N" range string, or "1" for a single claim.
    pub fn range_string(&self) -> String {
        match self.max_number() {
            0 | 1 => "1".to_string(),
            n => format!("1-{n}"),
        }
    }

    /// Iterate over (number, text) pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.claims.iter().map(|(n, t)| (*n, t.as_str()))
    }
}
