//! Note - Core data structure
//!
//! A note is one named piece of text backed by exactly one file.
//!
//! # Key Properties
//! - **name**: file stem, unique across the notebook (case-insensitive)
//! - **content**: raw file text, no header or metadata
//! - **edited_time**: last save (file mtime when loaded from disk)
//! - **filepath**: always `<folder>/<name>.<extension>`

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use super::editor::Launcher;
use super::error::{NotebookError, Result};
use super::prompt::Prompt;

/// Marker appended to truncated previews
pub const ELLIPSIS: &str = "...";

/// A note
#[derive(Debug, Clone)]
pub struct Note {
    name: String,
    content: String,
    edited_time: DateTime<Local>,
    filepath: PathBuf,
}

impl Note {
    /// Create a new in-memory note. Nothing is written until [`save`](Note::save).
    pub fn new(
        folder: &Path,
        extension: &str,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            filepath: note_path(folder, extension, &name),
            name,
            content: content.into(),
            edited_time: Local::now(),
        }
    }

    /// Note read back from an existing file
    pub(crate) fn loaded(
        name: String,
        content: String,
        edited_time: DateTime<Local>,
        filepath: PathBuf,
    ) -> Self {
        Self {
            name,
            content,
            edited_time,
            filepath,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn edited_time(&self) -> DateTime<Local> {
        self.edited_time
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Name as shown to the user: underscores become spaces
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }

    /// Content cut to `limit` characters, with [`ELLIPSIS`] when cut.
    ///
    /// Line breaks are shown as spaces so a preview stays on one row.
    pub fn preview(&self, limit: usize) -> String {
        let flat: String = self
            .content
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        if flat.chars().count() > limit {
            let mut cut: String = flat.chars().take(limit).collect();
            cut.push_str(ELLIPSIS);
            cut
        } else {
            flat
        }
    }

    /// Write content to `filepath`, overwriting, and stamp `edited_time`
    pub fn save(&mut self) -> Result<()> {
        fs::write(&self.filepath, &self.content)
            .map_err(|e| NotebookError::io(&self.filepath, e))?;
        self.edited_time = Local::now();
        debug!(note = %self.name, path = %self.filepath.display(), "saved note");
        Ok(())
    }

    /// Write a brand new file, refusing to replace anything already on disk
    pub(crate) fn create_file(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.filepath);

        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(NotebookError::AlreadyExists {
                    name: self.name.clone(),
                });
            }
            Err(e) => return Err(NotebookError::io(&self.filepath, e)),
        };

        file.write_all(self.content.as_bytes())
            .map_err(|e| NotebookError::io(&self.filepath, e))?;
        self.edited_time = Local::now();
        debug!(note = %self.name, path = %self.filepath.display(), "created note file");
        Ok(())
    }

    /// Replace in-memory content with what is on disk
    pub fn load_content(&mut self) -> Result<()> {
        self.content =
            fs::read_to_string(&self.filepath).map_err(|e| NotebookError::io(&self.filepath, e))?;
        Ok(())
    }

    /// Open the note in an external editor and pick up the result.
    ///
    /// Recreates a missing backing file first. Unless the launcher waits for
    /// the editor to exit, blocks on `prompt.pause` until the user says they
    /// are done. Content is reloaded from disk afterwards; a failed launch
    /// leaves the note untouched.
    pub fn edit(&mut self, editor: &dyn Launcher, prompt: &mut dyn Prompt) -> Result<()> {
        if !self.filepath.exists() {
            prompt.notify("The note file does not exist. Creating a new file.");
            self.save()?;
        }

        editor.open(&self.filepath)?;

        if !editor.waits() {
            prompt.notify(
                "Note is opened in the text editor. Please save your changes and close the editor.",
            );
            prompt
                .pause("Press Enter when you are done editing...")
                .map_err(NotebookError::Prompt)?;
        }

        self.load_content()
    }

    /// Move the backing file, then update name and path, then re-save.
    ///
    /// The in-memory note only changes once the file rename succeeded.
    pub(crate) fn rename_to(&mut self, new_name: &str, extension: &str) -> Result<()> {
        let folder = self
            .filepath
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let new_path = note_path(&folder, extension, new_name);

        fs::rename(&self.filepath, &new_path).map_err(|e| NotebookError::io(&self.filepath, e))?;
        debug!(from = %self.name, to = new_name, "renamed note file");

        self.name = new_name.to_string();
        self.filepath = new_path;
        self.save()
    }
}

/// `<folder>/<name>.<extension>`
pub fn note_path(folder: &Path, extension: &str, name: &str) -> PathBuf {
    folder.join(format!("{}.{}", name, extension))
}

/// Names are compared case-insensitively everywhere
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeEditor {
        writes: &'static str,
        waits: bool,
        opened: Cell<usize>,
    }

    impl Launcher for FakeEditor {
        fn open(&self, path: &Path) -> Result<()> {
            self.opened.set(self.opened.get() + 1);
            fs::write(path, self.writes).map_err(|e| NotebookError::io(path, e))
        }

        fn waits(&self) -> bool {
            self.waits
        }
    }

    struct BrokenEditor;

    impl Launcher for BrokenEditor {
        fn open(&self, _path: &Path) -> Result<()> {
            Err(NotebookError::EditorLaunch {
                command: "nope".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
            })
        }

        fn waits(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct Recorder {
        pauses: usize,
        notes: Vec<String>,
    }

    impl Prompt for Recorder {
        fn input(&mut self, _message: &str) -> io::Result<String> {
            Ok(String::new())
        }

        fn confirm(&mut self, _message: &str) -> io::Result<bool> {
            Ok(false)
        }

        fn pause(&mut self, _message: &str) -> io::Result<()> {
            self.pauses += 1;
            Ok(())
        }

        fn notify(&mut self, message: &str) {
            self.notes.push(message.to_string());
        }
    }

    #[test]
    fn test_new_note_path() {
        let note = Note::new(Path::new("notes"), "txt", "shopping_list", "eggs");
        assert_eq!(note.filepath(), Path::new("notes").join("shopping_list.txt"));
        assert_eq!(note.display_name(), "shopping list");
        assert_eq!(note.content(), "eggs");
    }

    #[test]
    fn test_preview_truncates_at_50() {
        let content = "a".repeat(60);
        let note = Note::new(Path::new("."), "txt", "long", content);
        let preview = note.preview(50);
        assert_eq!(preview, format!("{}{}", "a".repeat(50), ELLIPSIS));
    }

    #[test]
    fn test_preview_short_content_unchanged() {
        let content = "b".repeat(40);
        let note = Note::new(Path::new("."), "txt", "short", content.clone());
        assert_eq!(note.preview(50), content);

        let exact = Note::new(Path::new("."), "txt", "exact", "c".repeat(50));
        assert_eq!(exact.preview(50), "c".repeat(50));
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let note = Note::new(Path::new("."), "txt", "emoji", "é".repeat(51));
        assert_eq!(note.preview(50), format!("{}{}", "é".repeat(50), ELLIPSIS));
    }

    #[test]
    fn test_preview_flattens_lines() {
        let note = Note::new(Path::new("."), "txt", "lines", "one\ntwo\r\nthree");
        assert_eq!(note.preview(50), "one two  three");
    }

    #[test]
    fn test_is_named_ignores_case() {
        let note = Note::new(Path::new("."), "txt", "Foo", "");
        assert!(note.is_named("foo"));
        assert!(note.is_named("FOO"));
        assert!(!note.is_named("foobar"));
    }

    #[test]
    fn test_save_writes_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "todo", "buy milk");
        let before = note.edited_time();
        note.save()?;

        assert_eq!(fs::read_to_string(dir.path().join("todo.txt")).unwrap(), "buy milk");
        assert!(note.edited_time() >= before);
        Ok(())
    }

    #[test]
    fn test_edit_reloads_after_pause() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "todo", "old");
        note.save()?;

        let editor = FakeEditor {
            writes: "new text",
            waits: false,
            opened: Cell::new(0),
        };
        let mut prompt = Recorder::default();
        note.edit(&editor, &mut prompt)?;

        assert_eq!(editor.opened.get(), 1);
        assert_eq!(prompt.pauses, 1);
        assert_eq!(note.content(), "new text");
        Ok(())
    }

    #[test]
    fn test_edit_with_waiting_editor_skips_pause() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "todo", "old");
        note.save()?;

        let editor = FakeEditor {
            writes: "waited",
            waits: true,
            opened: Cell::new(0),
        };
        let mut prompt = Recorder::default();
        note.edit(&editor, &mut prompt)?;

        assert_eq!(prompt.pauses, 0);
        assert_eq!(note.content(), "waited");
        Ok(())
    }

    #[test]
    fn test_edit_recreates_missing_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "gone", "kept");

        let editor = FakeEditor {
            writes: "rewritten",
            waits: true,
            opened: Cell::new(0),
        };
        let mut prompt = Recorder::default();
        note.edit(&editor, &mut prompt)?;

        assert!(prompt.notes[0].contains("does not exist"));
        assert_eq!(note.content(), "rewritten");
        Ok(())
    }

    #[test]
    fn test_edit_launch_failure_keeps_content() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "todo", "unchanged");
        note.save()?;

        let mut prompt = Recorder::default();
        let err = note.edit(&BrokenEditor, &mut prompt).unwrap_err();

        assert!(matches!(err, NotebookError::EditorLaunch { .. }));
        assert_eq!(prompt.pauses, 0);
        assert_eq!(note.content(), "unchanged");
        Ok(())
    }

    #[test]
    fn test_create_file_never_overwrites() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("todo.txt"), "already here").unwrap();

        let mut note = Note::new(dir.path(), "txt", "todo", "new text");
        let err = note.create_file().unwrap_err();

        assert!(matches!(err, NotebookError::AlreadyExists { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("todo.txt")).unwrap(),
            "already here"
        );

        let mut fresh = Note::new(dir.path(), "txt", "fresh", "hello");
        fresh.create_file()?;
        assert_eq!(fs::read_to_string(dir.path().join("fresh.txt")).unwrap(), "hello");
        Ok(())
    }

    #[test]
    fn test_rename_to_moves_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "a", "content");
        note.save()?;

        note.rename_to("b", "txt")?;

        assert_eq!(note.name(), "b");
        assert_eq!(note.filepath(), dir.path().join("b.txt"));
        assert!(!dir.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "content");
        Ok(())
    }

    #[test]
    fn test_rename_to_missing_file_keeps_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut note = Note::new(dir.path(), "txt", "a", "never saved");

        let err = note.rename_to("b", "txt").unwrap_err();
        assert!(matches!(err, NotebookError::Io { .. }));
        assert_eq!(note.name(), "a");
        assert_eq!(note.filepath(), dir.path().join("a.txt"));
    }
}
