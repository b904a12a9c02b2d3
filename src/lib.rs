//! # wsgen
//!
//! Extraction of patent-hearing case data from noisy page text and
//! assembly of a written-submission document by template mutation.
//!
//! The pipeline runs in three stages: the [`normalize`] module turns raw
//! per-page text into a cleaned line stream, the [`extract`] module
//! locates named fields, sections and claims in it, and the [`assemble`]
//! module mutates an output template (placeholder substitution, table
//! materialization, evidence insertion, conditional section pruning)
//! into the final document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wsgen::{generate, GenerateRequest, PriorArtEntry};
//!
//! fn main() -> wsgen::Result<()> {
//!     let request = GenerateRequest::new(
//!         vec!["...hearing notice page text...".to_string()],
//!         vec!["...specification page text...".to_string()],
//!         vec![PriorArtEntry::with_abstract("D1", "A method is disclosed...")],
//!     );
//!     let submission = generate(&request, wsgen::template::master_template())?;
//!     std::fs::write(&submission.filename, &submission.bytes)?;
//!     Ok(())
//! }
//! ```

pub mod assemble;
pub mod doc;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod template;
pub mod translate;

// Re-export commonly used types
pub use error::{Error, MandatoryField, Result};
pub use extract::{AbstractExtractor, AbstractOptions, MetaExtractor};
pub use model::{
    AssemblyDirectives, CaseMeta, ClaimMap, EvidenceItem, FieldMap, PriorArtEntry, PriorArtRef,
};
pub use normalize::{NormalizeOptions, PageNormalizer};
pub use pipeline::{output_filename, AmendedClaims, FieldAssembler, GenerateRequest};
pub use translate::{NoTranslation, Translate, TranslateOptions};

use std::sync::Arc;

/// Literal drafter-instruction marker rendered in a distinguishing color
/// wherever it appears in the output.
pub const DRAFTER_MARKER: &str = "[REPLY BY DRAFTER]";

/// A finished submission: output bytes plus the derived filename.
#[derive(Debug)]
pub struct GeneratedSubmission {
    /// Serialized output document.
    pub bytes: Vec<u8>,

    /// Filename derived from the sanitized application number.
    pub filename: String,

    /// The field map the document was assembled from.
    pub fields: FieldMap,
}

/// Builder for configuring and running generations.
///
/// # Example
///
/// ```no_run
/// use wsgen::{Generator, GenerateRequest, TranslateOptions};
/// # let request: GenerateRequest = unimplemented!();
///
/// let submission = Generator::new()
///     .with_translate_options(TranslateOptions::disabled())
///     .generate(&request, wsgen::template::master_template())?;
/// # Ok::<(), wsgen::Error>(())
/// ```
pub struct Generator {
    normalize_options: NormalizeOptions,
    translate_options: TranslateOptions,
    translator: Arc<dyn Translate>,
}

impl Generator {
    /// Create a generator with default options and no external
    /// translation lookup.
    pub fn new() -> Self {
        Self {
            normalize_options: NormalizeOptions::default(),
            translate_options: TranslateOptions::default(),
            translator: Arc::new(NoTranslation),
        }
    }

    /// Set normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize_options = options;
        self
    }

    /// Set translation options.
    pub fn with_translate_options(mut self, options: TranslateOptions) -> Self {
        self.translate_options = options;
        self
    }

    /// Wire in an external translation lookup.
    pub fn with_translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.translator = translator;
        self
    }

    /// Run the full pipeline over a request and template.
    pub fn generate(
        &self,
        request: &GenerateRequest,
        template: doc::Document,
    ) -> Result<GeneratedSubmission> {
        let assembler = FieldAssembler::with_options(self.normalize_options.clone());
        let (fields, directives) = assembler.assemble(request)?;
        let bytes = assemble::assemble_output(template, &fields, &directives)?;
        let filename = output_filename(fields.get_or_empty("APP_NO"));
        Ok(GeneratedSubmission {
            bytes,
            filename,
            fields,
        })
    }

    /// Extract an abstract from prior-art page text, translating
    /// non-English text per this generator's translation options.
    pub fn extract_prior_art_abstract(&self, pages: &[String]) -> String {
        let extractor = AbstractExtractor::new(
            AbstractOptions::new().with_translate(self.translate_options.clone()),
            Arc::clone(&self.translator),
        );
        extractor.extract_from_pages(pages)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a submission with default options.
pub fn generate(request: &GenerateRequest, template: doc::Document) -> Result<GeneratedSubmission> {
    Generator::new().generate(request, template)
}
