//! Notebook - the collection of notes in one folder
//!
//! The in-memory collection is the source of truth while the program runs;
//! every mutation is written through to the folder immediately.
//!
//! # Invariants
//! - No two notes share a name under case-insensitive comparison
//! - Each note's file is `<folder>/<name>.<extension>`, extension matched exactly
//! - Order is file-name order at load time, then append order
//! - Skipped files are never written: their names stay taken

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::editor::Launcher;
use super::error::{NotebookError, Result};
use super::listing::{self, ListingStyle};
use super::note::{note_path, same_name, Note};
use super::prompt::Prompt;

/// Default text extension (without the dot)
pub const DEFAULT_EXTENSION: &str = "txt";

/// Result of [`Notebook::delete_note`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// File and entry removed
    Deleted,
    /// User answered no
    Declined,
    /// No such note
    NotFound,
}

impl DeleteOutcome {
    pub fn is_deleted(self) -> bool {
        self == DeleteOutcome::Deleted
    }
}

/// All notes of one folder
#[derive(Debug)]
pub struct Notebook {
    folder: PathBuf,
    extension: String,
    notes: Vec<Note>,
    skipped: Vec<PathBuf>,
    /// Lower-cased stems of skipped files
    reserved: Vec<String>,
}

impl Notebook {
    /// Load every `*.<extension>` file in `folder`.
    ///
    /// Other files are ignored. Files that cannot be read, or whose content is
    /// not valid UTF-8, are skipped (see [`skipped`](Notebook::skipped)) and
    /// never touched. Their names cannot be used by new or renamed notes.
    pub fn load(folder: impl Into<PathBuf>, extension: &str) -> Result<Self> {
        let folder = folder.into();
        let extension = extension.trim_start_matches('.').to_string();

        let entries = fs::read_dir(&folder).map_err(|e| NotebookError::io(&folder, e))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_extension(path, &extension))
            .collect();
        paths.sort();

        let mut notes = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        let mut reserved = Vec::new();
        let mut skip = |path: PathBuf| {
            if let Some(stem) = path.file_stem() {
                reserved.push(stem.to_string_lossy().to_lowercase());
            }
            skipped.push(path);
        };

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                warn!(path = %path.display(), "skipping note with non UTF-8 file name");
                skip(path);
                continue;
            };

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable note");
                    skip(path);
                    continue;
                }
            };
            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(_) => {
                    warn!(path = %path.display(), "skipping note with non UTF-8 content");
                    skip(path);
                    continue;
                }
            };

            if notes.iter().any(|n: &Note| n.is_named(&name)) {
                warn!(path = %path.display(), "skipping note whose name differs only by case");
                skip(path);
                continue;
            }

            let edited_time = modified_time(&path);
            notes.push(Note::loaded(name, content, edited_time, path));
        }

        info!(
            folder = %folder.display(),
            notes = notes.len(),
            skipped = skipped.len(),
            "loaded notebook"
        );

        Ok(Self {
            folder,
            extension,
            notes,
            skipped,
            reserved,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Files with the text extension that could not be loaded
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Case-insensitive membership test
    pub fn note_exists(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Case-insensitive lookup
    pub fn get_note(&self, name: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.is_named(name))
    }

    pub fn get_note_mut(&mut self, name: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.is_named(name))
    }

    /// Ask for content and create the note.
    ///
    /// Name checks happen before the user is asked anything.
    pub fn create_note(&mut self, name: &str, prompt: &mut dyn Prompt) -> Result<&Note> {
        self.check_new_name(name)?;
        let content = prompt
            .input("Enter the content of your note (press Enter to finish)")
            .map_err(NotebookError::Prompt)?;
        self.insert_note(name, content)
    }

    /// Create a note with known content, append it and write its file.
    ///
    /// Fails with [`NotebookError::AlreadyExists`] if the file is already on
    /// disk, even when the notebook never loaded it.
    pub fn insert_note(&mut self, name: &str, content: impl Into<String>) -> Result<&Note> {
        self.check_new_name(name)?;

        let mut note = Note::new(&self.folder, &self.extension, name, content);
        note.create_file()?;
        debug!(note = name, "created note");

        self.notes.push(note);
        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Open a note in the editor, reload it and save it again
    pub fn edit_note(
        &mut self,
        name: &str,
        editor: &dyn Launcher,
        prompt: &mut dyn Prompt,
    ) -> Result<&Note> {
        let note = self
            .get_note_mut(name)
            .ok_or_else(|| NotebookError::NotFound {
                name: name.to_string(),
            })?;

        note.edit(editor, prompt)?;
        note.save()?;
        debug!(note = note.name(), "edited note");
        Ok(&*note)
    }

    /// Rename a note and its file.
    ///
    /// Changing only the case of a name is allowed, unless a skipped file
    /// holds that name.
    pub fn rename_note(&mut self, old_name: &str, new_name: &str) -> Result<&Note> {
        validate_name(new_name)?;

        let taken = self.is_reserved(new_name)
            || (!same_name(old_name, new_name)
                && (self.note_exists(new_name)
                    || note_path(&self.folder, &self.extension, new_name).exists()));
        if taken {
            return Err(NotebookError::AlreadyExists {
                name: new_name.to_string(),
            });
        }

        let idx = self.position(old_name).ok_or_else(|| NotebookError::NotFound {
            name: old_name.to_string(),
        })?;

        let extension = self.extension.clone();
        let note = &mut self.notes[idx];
        note.rename_to(new_name, &extension)?;
        Ok(&*note)
    }

    /// Delete a note after the user confirms.
    ///
    /// A backing file that has already disappeared does not block removing
    /// the entry.
    pub fn delete_note(&mut self, name: &str, prompt: &mut dyn Prompt) -> Result<DeleteOutcome> {
        let Some(idx) = self.position(name) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let question = format!("Are you sure you want to delete the note '{}'?", name);
        if !prompt.confirm(&question).map_err(NotebookError::Prompt)? {
            debug!(note = name, "deletion declined");
            return Ok(DeleteOutcome::Declined);
        }

        let path = self.notes[idx].filepath().to_path_buf();
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "note file already gone");
            }
            Err(e) => return Err(NotebookError::io(path, e)),
        }

        let note = self.notes.remove(idx);
        debug!(note = note.name(), "deleted note");
        Ok(DeleteOutcome::Deleted)
    }

    /// The notes table
    pub fn display_notes(&self, style: &ListingStyle) -> String {
        listing::render(listing::rows(&self.notes, style))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.is_named(name))
    }

    fn is_reserved(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.reserved.iter().any(|stem| *stem == lower)
    }

    fn check_new_name(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.note_exists(name) || self.is_reserved(name) {
            return Err(NotebookError::AlreadyExists {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Reject names that cannot be a plain file stem inside the notes folder
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(NotebookError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.trim().is_empty() {
        return invalid("name cannot be empty");
    }
    if name.contains(['/', '\\']) {
        return invalid("name cannot contain path separators");
    }
    if name.starts_with('.') {
        return invalid("name cannot start with '.'");
    }
    if name.chars().any(char::is_control) {
        return invalid("name cannot contain control characters");
    }

    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == extension)
        .unwrap_or(false)
}

fn modified_time(path: &Path) -> DateTime<Local> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now())
}
