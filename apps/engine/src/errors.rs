use thiserror::Error;

/// Engine-level error type.
///
/// Unknown role/level ids are the only hard-failure class surfaced to the
/// caller of a scoring run; everything about the document itself degrades to
/// neutral values or findings instead of erroring.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown role id: {0}")]
    UnknownRole(String),

    #[error("Unknown level id: {0}")]
    UnknownLevel(String),

    #[error("Unknown criterion id: {0}")]
    UnknownCriterion(String),

    #[error("Reference data error: {0}")]
    Reference(String),

    #[error("Criterion '{criterion}' failed: {message}")]
    Criterion { criterion: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
