//! Output-document block model.
//!
//! The output artifact is an ordered, indexable sequence of block nodes
//! (paragraph, table, image) with explicit insert-before/insert-after
//! operations. The template mutation passes address blocks by index, so
//! each pass is independently testable against the resulting sequence.
//! Serialization is deterministic: ordered collections only.

mod document;
mod paragraph;
mod resource;
mod table;

pub use document::{Block, Document};
pub use paragraph::{Alignment, Inline, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use resource::Resource;
pub use table::{Table, TableCell, TableRow};
