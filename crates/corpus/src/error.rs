//! Error types produced by the corpus crate.
//!
//! All errors are typed, cloneable and comparable so tests can match on the
//! exact failure.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`DimensionMismatch`](CorpusError::DimensionMismatch) | Validation | Vector length differs from the dataset's `L` |
//! | [`DuplicateDocument`](CorpusError::DuplicateDocument) | Validation | Same document id inserted twice |
//! | [`Io`](CorpusError::Io) | Loading | Dataset file could not be read |
//! | [`Parse`](CorpusError::Parse) | Loading | Dataset file is not valid dataset JSON |

use thiserror::Error;

/// Errors that can occur while building or loading a dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorpusError {
    #[error("document '{doc_id}' has {found} features; dataset dimension is {expected}")]
    DimensionMismatch {
        doc_id: String,
        expected: usize,
        found: usize,
    },

    #[error("document '{0}' appears more than once")]
    DuplicateDocument(String),

    #[error("failed to read dataset file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("failed to parse dataset JSON: {0}")]
    Parse(String),
}
