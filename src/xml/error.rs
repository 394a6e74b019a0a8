//! Error types for XML envelopes.

use thiserror::Error;

/// Errors that can occur while reading an XML envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// Not well formed, or a required field is missing or not a number
    #[error("malformed XML body: {0}")]
    Malformed(String),

    /// Document root is not the expected element
    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },
}

impl From<quick_xml::Error> for XmlError {
    fn from(e: quick_xml::Error) -> Self {
        XmlError::Malformed(e.to_string())
    }
}

impl From<quick_xml::de::DeError> for XmlError {
    fn from(e: quick_xml::de::DeError) -> Self {
        XmlError::Malformed(e.to_string())
    }
}
