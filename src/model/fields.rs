//! The extraction-to-assembly contract: field map and assembly directives.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Placeholder-name to value mapping.
///
/// Keys are bare placeholder names ("APP_NO"); the template carries them
/// as `{{APP_NO}}` tokens. Values are scalar strings or multi-paragraph
/// strings with paragraphs separated by blank lines. The map owns no
/// document references and is serializable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldMap {
    fields: BTreeMap<String, String>,
}

impl FieldMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Field value by name, or empty string.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One item of the ordered prior-art evidence sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceItem {
    /// A paragraph of evidence text.
    Text {
        /// The paragraph text.
        text: String,
    },

    /// A diagram image to embed.
    Image {
        /// Path to the raster image.
        path: PathBuf,
    },
}

impl EvidenceItem {
    /// Create a text item.
    pub fn text(text: impl Into<String>) -> Self {
        EvidenceItem::Text { text: text.into() }
    }

    /// Create an image item.
    pub fn image(path: impl Into<PathBuf>) -> Self {
        EvidenceItem::Image { path: path.into() }
    }
}

/// Out-of-band structural instructions for the template mutator.
///
/// Kept separate from [`FieldMap`] so substitution values stay uniformly
/// typed: the mutator alone consumes the evidence sequence, the image
/// list and the claim ceiling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyDirectives {
    /// Ordered prior-art evidence sequence inserted ahead of the
    /// comparison table.
    pub evidence: Vec<EvidenceItem>,

    /// Highest claim number actually available; "Regarding Claim N"
    /// sections beyond it are pruned.
    pub max_claim: u32,

    /// Technical-solution diagram images for the supplementary block.
    pub solution_images: Vec<PathBuf>,
}
