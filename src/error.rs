//! Error types for the wsgen library.

use std::io;
use thiserror::Error;

/// Result type alias for wsgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A mandatory field whose absence aborts generation.
///
/// Variants are listed in validation priority order: the first unmet
/// requirement is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MandatoryField {
    /// At least one usable prior-art entry.
    PriorArtEntries,
    /// Application number from the hearing notice.
    ApplicationNumber,
    /// Controller name from the hearing notice.
    ControllerName,
    /// Applicant name from the hearing notice.
    ApplicantName,
    /// Dispatch date of the hearing notice.
    DispatchDate,
    /// At least one parsed claim.
    Claims,
    /// Claim 1 specifically (the independent claim).
    ClaimOne,
}

impl std::fmt::Display for MandatoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MandatoryField::PriorArtEntries => {
                write!(f, "At least one prior-art entry (D1..Dn) is required")
            }
            MandatoryField::ApplicationNumber => {
                write!(f, "Application number not found in hearing notice")
            }
            MandatoryField::ControllerName => {
                write!(f, "Controller name not found in hearing notice")
            }
            MandatoryField::ApplicantName => {
                write!(f, "Applicant name not found in hearing notice")
            }
            MandatoryField::DispatchDate => {
                write!(f, "Hearing notice dispatch date not found in hearing notice")
            }
            MandatoryField::Claims => {
                write!(f, "No claims could be parsed from amended claims or specification")
            }
            MandatoryField::ClaimOne => {
                write!(f, "Claim 1 not found in amended claims or specification")
            }
        }
    }
}

/// Error types that can occur during extraction and assembly.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input document could not be read or parsed.
    #[error("Malformed input document: {0}")]
    MalformedInput(String),

    /// A structured payload (prior-art entries, template JSON) is invalid.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A mandatory field could not be extracted.
    #[error("{0}")]
    MissingField(MandatoryField),

    /// The output template is unusable (missing anchors, bad structure).
    #[error("Template error: {0}")]
    Template(String),

    /// Error while assembling the output document.
    #[error("Assembly error: {0}")]
    Assembly(String),

    /// The external translation collaborator failed.
    ///
    /// Callers recover from this by falling back to the source text; it is
    /// never propagated out of the extraction layer.
    #[error("Translation error: {0}")]
    Translate(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = Error::MissingField(MandatoryField::ApplicationNumber);
        assert_eq!(
            err.to_string(),
            "Application number not found in hearing notice"
        );

        let err = Error::MissingField(MandatoryField::PriorArtEntries);
        assert_eq!(
            err.to_string(),
            "At least one prior-art entry (D1..Dn) is required"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
