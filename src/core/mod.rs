//! Core module - Business logic
//!
//! Notes, the notebook that owns them, and the seams to the outside world
//! (prompting the user, launching an editor).

pub mod editor;
pub mod error;
pub mod listing;
pub mod note;
pub mod notebook;
pub mod prompt;
