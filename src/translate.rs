//! External machine-translation collaborator.
//!
//! Translation is a black-box string-to-string service with bounded
//! latency. Every call goes through a timeout guard, and every failure
//! mode (timeout, transport error, malformed response, disabled switch)
//! degrades to the untranslated source text. Nothing here ever aborts a
//! generation.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::bounded;

use crate::error::Result;

/// A string-to-string translation capability.
///
/// Implementations wrap whatever lookup the host provides; the library
/// only ever calls it through [`translate_text`], which imposes the
/// timeout and fallback policy.
pub trait Translate: Send + Sync {
    /// Translate `text` to English.
    fn translate(&self, text: &str) -> Result<String>;
}

/// Identity translator: returns input unchanged.
///
/// Used where no external lookup is wired in; combined with the enable
/// switch this makes the degrade path trivially testable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translate for NoTranslation {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Options for the translation pass.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Whether translation is attempted at all. When disabled, source
    /// text passes through unchanged.
    pub enabled: bool,

    /// Upper bound on a single lookup.
    pub timeout: Duration,

    /// Chunk size limit in characters; longer paragraphs are split on
    /// word boundaries.
    pub max_chunk_chars: usize,
}

impl TranslateOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable translation.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the chunk size limit.
    pub fn with_max_chunk_chars(mut self, chars: usize) -> Self {
        self.max_chunk_chars = chars;
        self
    }
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(8),
            max_chunk_chars: 2800,
        }
    }
}

/// Translate multi-paragraph text, paragraph by paragraph, chunked under
/// the character limit. Returns the source text whenever translation is
/// disabled or every chunk fails.
pub fn translate_text(
    text: &str,
    translator: &Arc<dyn Translate>,
    options: &TranslateOptions,
) -> String {
    let src = text.trim();
    if src.is_empty() {
        return String::new();
    }
    if !options.enabled {
        return src.to_string();
    }

    let paras: Vec<&str> = src
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let paras = if paras.is_empty() { vec![src] } else { paras };

    let mut out: Vec<String> = Vec::new();
    for para in paras {
        for chunk in split_chunks(para, options.max_chunk_chars) {
            let translated = translate_with_timeout(translator, &chunk, options.timeout)
                .unwrap_or_else(|| chunk.clone());
            if !translated.is_empty() {
                out.push(translated);
            }
        }
    }

    let joined = out.join("\n\n");
    if joined.trim().is_empty() {
        src.to_string()
    } else {
        joined
    }
}

/// Split a paragraph into word-boundary chunks not exceeding `max_chars`.
fn split_chunks(para: &str, max_chars: usize) -> Vec<String> {
    if para.chars().count() <= max_chars {
        return vec![para.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;
    for word in para.split_whitespace() {
        let add_len = word.chars().count() + 1;
        if !current.is_empty() && current_len + add_len > max_chars {
            chunks.push(current.join(" "));
            current = vec![word];
            current_len = word.chars().count();
        } else {
            current.push(word);
            current_len += add_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}

/// Run one lookup on a worker thread, bounded by `timeout`.
fn translate_with_timeout(
    translator: &Arc<dyn Translate>,
    chunk: &str,
    timeout: Duration,
) -> Option<String> {
    let (tx, rx) = bounded(1);
    let worker = Arc::clone(translator);
    let text = chunk.to_string();
    std::thread::spawn(move || {
        let _ = tx.send(worker.translate(&text));
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(translated)) if !translated.trim().is_empty() => Some(translated),
        Ok(Ok(_)) => None,
        Ok(Err(err)) => {
            log::warn!("translation failed, keeping source text: {err}");
            None
        }
        Err(_) => {
            log::warn!("translation timed out after {timeout:?}, keeping source text");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Uppercase;
    impl Translate for Uppercase {
        fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct Failing;
    impl Translate for Failing {
        fn translate(&self, _text: &str) -> Result<String> {
            Err(Error::Translate("backend unavailable".into()))
        }
    }

    struct Hanging;
    impl Translate for Hanging {
        fn translate(&self, _text: &str) -> Result<String> {
            std::thread::sleep(Duration::from_secs(5));
            Ok(String::new())
        }
    }

    #[test]
    fn test_translate_paragraphs() {
        let translator: Arc<dyn Translate> = Arc::new(Uppercase);
        let out = translate_text("first para\n\nsecond para", &translator, &TranslateOptions::new());
        assert_eq!(out, "FIRST PARA\n\nSECOND PARA");
    }

    #[test]
    fn test_disabled_passes_through() {
        let translator: Arc<dyn Translate> = Arc::new(Uppercase);
        let out = translate_text("keep as is", &translator, &TranslateOptions::disabled());
        assert_eq!(out, "keep as is");
    }

    #[test]
    fn test_failure_falls_back_to_source() {
        let translator: Arc<dyn Translate> = Arc::new(Failing);
        let out = translate_text("source text", &translator, &TranslateOptions::new());
        assert_eq!(out, "source text");
    }

    #[test]
    fn test_timeout_falls_back_to_source() {
        let translator: Arc<dyn Translate> = Arc::new(Hanging);
        let options = TranslateOptions::new().with_timeout(Duration::from_millis(50));
        let out = translate_text("slow text", &translator, &options);
        assert_eq!(out, "slow text");
    }

    #[test]
    fn test_chunking_respects_word_boundaries() {
        let para = "alpha beta gamma delta epsilon";
        let chunks = split_chunks(para, 12);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 12, "oversized chunk: {chunk}");
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
        assert_eq!(chunks.join(" "), para);
    }

    #[test]
    fn test_long_paragraph_translated_in_chunks() {
        let translator: Arc<dyn Translate> = Arc::new(Uppercase);
        let options = TranslateOptions::new().with_max_chunk_chars(12);
        let out = translate_text("alpha beta gamma delta", &translator, &options);
        assert!(out.contains("ALPHA"));
        assert!(out.contains("DELTA"));
    }
}
