use std::{io, path::PathBuf};

use thiserror::Error;

use super::ValueType;

/// Errors that can occur during environment store operations.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The backing file could not be opened.
    ///
    /// Returned from the initial load and from reloads; the store keeps
    /// its previous contents when a background reload fails this way.
    #[error("failed to open env file '{}': {source}", .path.display())]
    FileOpen {
        /// Path of the file that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred while scanning the backing file.
    #[error("failed to read env file '{}': {source}", .path.display())]
    FileRead {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The key is absent, or present with a tag the requested coercion
    /// disallows, and no default was supplied.
    ///
    /// The two causes are deliberately indistinguishable; callers that
    /// need a value either way pass a default.
    #[error("variable not found or type mismatch and no default value provided")]
    NotFoundOrMismatch,

    /// A raw value on the write path did not parse as the requested type.
    ///
    /// The backing file is not touched when this is returned.
    #[error("invalid {value_type} value: '{raw}'")]
    InvalidValue {
        /// The type the value was supposed to parse as.
        value_type: ValueType,
        /// The raw string that failed to parse.
        raw: String,
    },

    /// Appending to the backing file failed.
    ///
    /// The in-memory store was already updated when this is returned.
    #[error("failed to write to env file '{}': {source}", .path.display())]
    FileWrite {
        /// Path of the file being appended to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file system watcher could not be created.
    #[error("failed to initialize file watcher: {details}")]
    WatcherInit {
        /// Watcher initialization error details.
        details: String,
    },

    /// A watch could not be installed on the backing file.
    #[error("failed to watch '{}': {details}", .path.display())]
    Watch {
        /// Path the watch was being installed on.
        path: PathBuf,
        /// Watch installation error details.
        details: String,
    },

    /// The process-wide store handle was already initialized.
    #[error("environment store already initialized")]
    AlreadyInitialized,
}
