//! Domain errors
//!
//! The `Display` text of the user-facing variants is exactly what the
//! command loop prints, so handlers can report `err.to_string()` directly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`Notebook`](super::notebook::Notebook) and
/// [`Note`](super::note::Note) operations.
#[derive(Error, Debug)]
pub enum NotebookError {
    /// Another note already uses this name (case-insensitive)
    #[error("A note with this name already exists. Please choose a different name.")]
    AlreadyExists { name: String },

    /// No note matches the requested name
    #[error("Note not found.")]
    NotFound { name: String },

    /// Name cannot be used as a file stem
    #[error("Invalid note name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Reading, writing, renaming or removing a note file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Editor process could not be started
    #[error("Could not launch editor '{command}': {source}")]
    EditorLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Editor ran but reported failure
    #[error("Editor '{command}' exited with {status}")]
    EditorExit { command: String, status: String },

    /// Reading an answer from the user failed
    #[error("Prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl NotebookError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the loop can keep going after reporting this error.
    ///
    /// Everything except a broken prompt is recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Prompt(_))
    }
}

pub type Result<T, E = NotebookError> = std::result::Result<T, E>;
