//! Error taxonomy for the export pipeline
//!
//! Every failure is fatal: the tool either completes the whole conversion
//! or aborts without writing any output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// A referenced material library or texture file is missing or unreadable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A geometry record that cannot be accepted: a face declared before any
    /// `usemtl`, an attribute index outside its pool, or a short/unparseable
    /// record.
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A single face references more distinct attribute tuples than one
    /// output mesh may hold, so no partitioning can place it.
    #[error(
        "material '{material}': a single face references {tuples} distinct \
         attribute tuples, exceeding the per-mesh budget of {budget}"
    )]
    Capacity {
        material: String,
        tuples: usize,
        budget: usize,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
