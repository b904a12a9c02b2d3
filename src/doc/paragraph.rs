//! Paragraph and text-run types for the output document.

use serde::{Deserialize, Serialize};

/// A paragraph of styled text runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in document order.
    pub content: Vec<Inline>,

    /// Paragraph style.
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single plain-text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Add a text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(Inline::Run(run));
    }

    /// Add an explicit line break.
    pub fn add_line_break(&mut self) {
        self.content.push(Inline::LineBreak);
    }

    /// Add a page break.
    pub fn add_page_break(&mut self) {
        self.content.push(Inline::PageBreak);
    }

    /// Plain text of the paragraph; line breaks render as `\n`.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|inline| match inline {
                Inline::Run(run) => run.text.as_str(),
                Inline::LineBreak => "\n",
                Inline::PageBreak => "",
            })
            .collect()
    }

    /// Replace all content with a single default-styled run, keeping the
    /// paragraph style.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = vec![Inline::Run(TextRun::new(text))];
    }

    /// Remove all content, keeping the paragraph style.
    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Whether the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A styled text run.
    Run(TextRun),

    /// An explicit line break within the paragraph.
    LineBreak,

    /// A page break.
    PageBreak,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content.
    pub text: String,

    /// Run styling.
    pub style: TextStyle,
}

impl TextRun {
    /// Create a run with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold, underlined run (heading styling).
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                underline: true,
                ..Default::default()
            },
        }
    }

    /// Create a colored run ("#RRGGBB").
    pub fn colored(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                color: Some(color.into()),
                ..Default::default()
            },
        }
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text.
    #[serde(default)]
    pub bold: bool,

    /// Underlined text.
    #[serde(default)]
    pub underline: bool,

    /// Text color in "#RRGGBB" hex form.
    #[serde(default)]
    pub color: Option<String>,
}

impl TextStyle {
    /// Whether any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.underline || self.color.is_some()
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Named style carried over from the template.
    #[serde(default)]
    pub style_name: Option<String>,

    /// Text alignment.
    #[serde(default)]
    pub alignment: Alignment,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default).
    #[default]
    Left,
    /// Center alignment.
    Center,
    /// Right alignment.
    Right,
    /// Justified alignment.
    Justify,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_with_breaks() {
        let mut p = Paragraph::with_text("Heading");
        p.add_line_break();
        p.add_run(TextRun::new("body"));
        assert_eq!(p.plain_text(), "Heading\nbody");
    }

    #[test]
    fn test_set_text_preserves_style() {
        let mut p = Paragraph::with_text("old");
        p.style.alignment = Alignment::Center;
        p.style.style_name = Some("Body".to_string());
        p.set_text("new");
        assert_eq!(p.plain_text(), "new");
        assert_eq!(p.style.alignment, Alignment::Center);
        assert_eq!(p.style.style_name.as_deref(), Some("Body"));
    }

    #[test]
    fn test_run_constructors() {
        let heading = TextRun::heading("TITLE");
        assert!(heading.style.bold && heading.style.underline);

        let red = TextRun::colored("marker", "#FF0000");
        assert_eq!(red.style.color.as_deref(), Some("#FF0000"));
        assert!(red.style.has_styling());
    }

    #[test]
    fn test_is_empty() {
        assert!(Paragraph::new().is_empty());
        assert!(Paragraph::with_text("   ").is_empty());
        assert!(!Paragraph::with_text("x").is_empty());
    }
}
