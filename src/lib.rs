//! notebook - plain-text notes from the terminal
//!
//! Lists, creates, edits, renames and deletes notes stored one per file in a
//! folder. Editing is delegated to an external editor.
//!
//! # Architecture
//!
//! - [`core`]: notes, the notebook owning them, the table listing, and the
//!   prompt/editor seams
//! - [`cli`]: argv parsing, command decoding, the processor and the
//!   interactive loop
//! - [`config`]: TOML configuration
//!
//! ## Key Concepts
//!
//! - **One file per note**: `<notes>/<name>.txt`, raw text, no metadata
//! - **Case-insensitive names**: `Foo` and `foo` are the same note
//! - **Write-through**: the in-memory notebook is authoritative while running;
//!   each mutation is written to disk immediately

pub mod cli;
pub mod config;
pub mod core;

pub use crate::config::Config;
pub use crate::core::error::NotebookError;
pub use crate::core::note::Note;
pub use crate::core::notebook::{DeleteOutcome, Notebook};
