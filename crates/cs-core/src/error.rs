use std::path::PathBuf;

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur while loading game content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A content file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A content file is not valid JSON for its collection.
    #[error("malformed {file}: {source}")]
    Parse {
        /// File name, e.g. `dialogues.json`.
        file: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
