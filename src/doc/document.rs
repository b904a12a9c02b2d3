//! Document-level block sequence and positional mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Alignment, Paragraph, Resource, Table};

/// A content block in the output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text.
    Paragraph(Paragraph),

    /// A table.
    Table(Table),

    /// An embedded image at a fixed display width.
    Image {
        /// Key into the document's resource map.
        resource_id: String,
        /// Display width in inches.
        width_inches: f64,
        /// Block alignment.
        alignment: Alignment,
    },
}

impl Block {
    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph::with_text(text))
    }

    /// Whether this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Whether this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}

/// The mutable output document: an ordered block sequence plus embedded
/// resources.
///
/// Insert operations address blocks by index and return the index of the
/// inserted block, so mutation passes can chain positions without any
/// ambient cursor state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in document order.
    pub blocks: Vec<Block>,

    /// Embedded resources, keyed by deterministic sequential IDs.
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from template JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to deterministic pretty JSON bytes (the output artifact).
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Append a block, returning its index.
    pub fn push(&mut self, block: Block) -> usize {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    /// Append a paragraph with text.
    pub fn push_paragraph(&mut self, text: impl Into<String>) -> usize {
        self.push(Block::paragraph(text))
    }

    /// Insert a block before `index`, returning the new block's index.
    pub fn insert_before(&mut self, index: usize, block: Block) -> usize {
        let at = index.min(self.blocks.len());
        self.blocks.insert(at, block);
        at
    }

    /// Insert a block after `index`, returning the new block's index.
    pub fn insert_after(&mut self, index: usize, block: Block) -> usize {
        let at = (index + 1).min(self.blocks.len());
        self.blocks.insert(at, block);
        at
    }

    /// Remove the block at `index`.
    pub fn remove(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.blocks.remove(index);
        }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The paragraph at `index`, if that block is a paragraph.
    pub fn paragraph_at(&self, index: usize) -> Option<&Paragraph> {
        match self.blocks.get(index) {
            Some(Block::Paragraph(p)) => Some(p),
            _ => None,
        }
    }

    /// Mutable paragraph at `index`, if that block is a paragraph.
    pub fn paragraph_at_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        match self.blocks.get_mut(index) {
            Some(Block::Paragraph(p)) => Some(p),
            _ => None,
        }
    }

    /// Index of the first top-level paragraph matching the predicate.
    pub fn find_paragraph(&self, mut pred: impl FnMut(&Paragraph) -> bool) -> Option<usize> {
        self.blocks.iter().position(|b| match b {
            Block::Paragraph(p) => pred(p),
            _ => false,
        })
    }

    /// Index of the first table matching the predicate.
    pub fn find_table(&self, mut pred: impl FnMut(&Table) -> bool) -> Option<usize> {
        self.blocks.iter().position(|b| match b {
            Block::Table(t) => pred(t),
            _ => false,
        })
    }

    /// Visit every paragraph in the document, including paragraphs inside
    /// table cells, in document order.
    pub fn for_each_paragraph_mut(&mut self, mut f: impl FnMut(&mut Paragraph)) {
        for block in &mut self.blocks {
            match block {
                Block::Paragraph(p) => f(p),
                Block::Table(t) => {
                    for row in &mut t.rows {
                        for cell in &mut row.cells {
                            for p in &mut cell.content {
                                f(p);
                            }
                        }
                    }
                }
                Block::Image { .. } => {}
            }
        }
    }

    /// Register an image resource, returning its deterministic ID.
    pub fn add_image_resource(&mut self, resource: Resource) -> String {
        let id = format!("img{}", self.resources.len() + 1);
        self.resources.insert(id.clone(), resource);
        id
    }

    /// Plain text of the whole document, blocks separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p.plain_text()),
                Block::Table(t) => Some(
                    t.rows
                        .iter()
                        .map(|r| {
                            r.cells
                                .iter()
                                .map(|c| c.plain_text())
                                .collect::<Vec<_>>()
                                .join("\t")
                        })
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
                Block::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_after() {
        let mut doc = Document::new();
        doc.push_paragraph("first");
        doc.push_paragraph("third");

        let idx = doc.insert_after(0, Block::paragraph("second"));
        assert_eq!(idx, 1);
        assert_eq!(doc.paragraph_at(1).unwrap().plain_text(), "second");

        let idx = doc.insert_before(0, Block::paragraph("zeroth"));
        assert_eq!(idx, 0);
        assert_eq!(doc.paragraph_at(0).unwrap().plain_text(), "zeroth");
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_find_paragraph() {
        let mut doc = Document::new();
        doc.push_paragraph("alpha");
        doc.push_paragraph("needle here");
        let idx = doc.find_paragraph(|p| p.plain_text().contains("needle"));
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn test_for_each_paragraph_includes_table_cells() {
        let mut doc = Document::new();
        doc.push_paragraph("{{TOKEN}}");
        let mut table = Table::with_size(1, 1);
        table.cell_mut(0, 0).unwrap().set_text("{{TOKEN}}");
        doc.push(Block::Table(table));

        let mut count = 0;
        doc.for_each_paragraph_mut(|p| {
            if p.plain_text().contains("{{TOKEN}}") {
                count += 1;
            }
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_json_roundtrip_is_deterministic() {
        let mut doc = Document::new();
        doc.push_paragraph("content");
        doc.add_image_resource(Resource::image(vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A,
        ]));

        let a = doc.to_json_bytes().unwrap();
        let b = doc.to_json_bytes().unwrap();
        assert_eq!(a, b);

        let parsed = Document::from_json(std::str::from_utf8(&a).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_resource_ids_sequential() {
        let mut doc = Document::new();
        let id1 = doc.add_image_resource(Resource::image(vec![0xFF, 0xD8, 0xFF, 0, 0, 0, 0, 0]));
        let id2 = doc.add_image_resource(Resource::image(vec![0xFF, 0xD8, 0xFF, 0, 0, 0, 0, 0]));
        assert_eq!(id1, "img1");
        assert_eq!(id2, "img2");
    }
}
