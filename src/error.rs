/// Error type for makefile conversion and storage operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A tab-indented recipe line with no target or variable to attach to.
    ///
    /// Line numbers are 1-based.
    #[error("line {line}: recipe line has no preceding target or variable")]
    OrphanRecipe { line: usize },

    /// An `if`/`define` block that is never closed by `endif`/`endef`.
    #[error("line {line}: code block is never closed")]
    UnterminatedBlock { line: usize },

    /// Unknown entry kind tag.
    #[error("unknown entry kind: {0}")]
    UnknownKind(String),

    /// Unknown entry template name.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Filesystem error while reading or writing stored makefiles.
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed saved-makefile JSON.
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

/// Result type for makefile-generator operations.
pub type Result<T> = std::result::Result<T, Error>;
