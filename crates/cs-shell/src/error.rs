//! Error types for the game shell.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Result type for save encoding and storage.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while driving the game shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Navigation to a view that does not exist.
    #[error("unknown view: {0}")]
    UnknownView(String),

    /// No location with this id.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// No hidden object with this id at the location.
    #[error("unknown object '{object}' at {location}")]
    UnknownObject {
        /// Location searched.
        location: String,
        /// Object requested.
        object: String,
    },

    /// The location has no market or the market has no such good.
    #[error("unknown good '{good}' at {location}")]
    UnknownGood {
        /// Location searched.
        location: String,
        /// Good requested.
        good: String,
    },

    /// A choice was made with no dialogue open.
    #[error("no active dialogue")]
    NoActiveDialogue,

    /// The choice index is not on screen.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// A choice was made while a puzzle is still awaiting its result.
    #[error("puzzle {0} is still open")]
    PuzzlePending(String),

    /// Saving or loading without a save store.
    #[error("no save store attached")]
    NoSaveStore,

    /// Content loading failed.
    #[error(transparent)]
    Content(#[from] cs_core::ContentError),

    /// Save encoding or storage failed.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Errors that can occur while encoding, decoding, or storing saves.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The save slot could not be read or written.
    #[error("save slot {}: {source}", path.display())]
    Io {
        /// Slot file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The save text is not valid hex.
    #[error("save data is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The save data is too short to hold a checksum.
    #[error("save data is truncated")]
    Truncated,

    /// The checksum does not match; the save was corrupted or edited.
    #[error("save checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch {
        /// Checksum stored with the data.
        stored: u32,
        /// Checksum of the data as read.
        computed: u32,
    },

    /// The decoded save is not a valid game save.
    #[error("save data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
