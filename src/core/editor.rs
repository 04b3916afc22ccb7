//! Editor - launching an external text editor on a note file
//!
//! # Resolution order
//! 1. `editor.command` from config (or `--editor`)
//! 2. `$VISUAL`
//! 3. `$EDITOR`
//! 4. Platform launcher: `open -t` (macOS), `notepad` (Windows), `xdg-open`
//!
//! Commands are split on whitespace and the note path is appended as the
//! last argument.
//!
//! Editors are not waited on unless `editor.wait = true`: the user confirms
//! with Enter when they are done. Children started that way are reaped on
//! the next launch and when the editor is dropped.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::process::{Child, Command};

use tracing::debug;

use super::error::{NotebookError, Result};

/// Something that can open a file for editing
pub trait Launcher {
    /// Open `path` in the editor
    fn open(&self, path: &Path) -> Result<()>;

    /// True when [`open`](Launcher::open) only returns after the editor exits,
    /// so no manual "done" prompt is needed.
    fn waits(&self) -> bool;
}

/// Editor started as a child process
#[derive(Debug)]
pub struct SystemEditor {
    program: String,
    args: Vec<String>,
    wait: bool,
    /// Spawned without waiting and not yet known to have exited
    children: RefCell<Vec<Child>>,
}

impl SystemEditor {
    /// Build from a command line such as `code --wait`.
    ///
    /// Returns `None` for a blank command.
    pub fn from_command(command: &str, wait: bool) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            wait,
            children: RefCell::default(),
        })
    }

    /// Pick the editor to use.
    ///
    /// Waiting for exit only happens when `wait` is `Some(true)`, whatever
    /// the editor's source.
    pub fn resolve(configured: Option<&str>, wait: Option<bool>) -> Self {
        let wait = wait.unwrap_or(false);
        let named = configured
            .map(str::to_string)
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .and_then(|cmd| Self::from_command(&cmd, wait));

        named.unwrap_or_else(|| {
            let mut editor = Self::platform_default();
            editor.wait = wait;
            editor
        })
    }

    /// The desktop's "open with text editor" launcher
    pub fn platform_default() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &["-t"])
        } else if cfg!(windows) {
            ("notepad", &[])
        } else {
            ("xdg-open", &[])
        };

        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            wait: false,
            children: RefCell::default(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Collect spawned editors that have exited
    pub fn reap(&self) {
        self.children.borrow_mut().retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "editor exited");
                false
            }
            Err(e) => {
                debug!(pid = child.id(), error = %e, "lost track of editor");
                false
            }
        });
    }

    /// Spawned editors still running as of the last [`reap`](SystemEditor::reap)
    pub fn pending(&self) -> usize {
        self.children.borrow().len()
    }
}

impl Drop for SystemEditor {
    fn drop(&mut self) {
        self.reap();
    }
}

impl fmt::Display for SystemEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl Launcher for SystemEditor {
    fn open(&self, path: &Path) -> Result<()> {
        self.reap();

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(path);
        debug!(editor = %self, path = %path.display(), wait = self.wait, "launching editor");

        let launch_error = |source| NotebookError::EditorLaunch {
            command: self.to_string(),
            source,
        };

        if self.wait {
            let status = command.status().map_err(launch_error)?;
            if !status.success() {
                return Err(NotebookError::EditorExit {
                    command: self.to_string(),
                    status: status.to_string(),
                });
            }
        } else {
            let child = command.spawn().map_err(launch_error)?;
            self.children.borrow_mut().push(child);
        }

        Ok(())
    }

    fn waits(&self) -> bool {
        self.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_splits_args() {
        let editor = SystemEditor::from_command("code --wait --new-window", true).unwrap();
        assert_eq!(editor.program(), "code");
        assert_eq!(editor.args(), &["--wait", "--new-window"]);
        assert!(editor.waits());
        assert_eq!(editor.to_string(), "code --wait --new-window");
    }

    #[test]
    fn test_from_command_blank() {
        assert!(SystemEditor::from_command("   ", true).is_none());
    }

    #[test]
    fn test_configured_command_wins() {
        let editor = SystemEditor::resolve(Some("nano"), Some(true));
        assert_eq!(editor.program(), "nano");
        assert!(editor.waits());

        let editor = SystemEditor::resolve(Some("gedit"), Some(false));
        assert_eq!(editor.program(), "gedit");
        assert!(!editor.waits());
    }

    #[test]
    fn test_waiting_is_opt_in() {
        // whichever source supplies the editor, there is a manual continue prompt
        let editor = SystemEditor::resolve(Some("vi"), None);
        assert!(!editor.waits());

        let editor = SystemEditor::resolve(None, None);
        assert!(!editor.waits());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_editor_is_reaped() {
        let editor = SystemEditor::from_command("true", false).unwrap();
        editor.open(Path::new("note.txt")).unwrap();
        assert_eq!(editor.pending(), 1);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while editor.pending() > 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
            editor.reap();
        }
        assert_eq!(editor.pending(), 0);
    }

    #[test]
    fn test_platform_default_does_not_wait() {
        let editor = SystemEditor::platform_default();
        assert!(!editor.waits());
        assert!(!editor.program().is_empty());
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let editor =
            SystemEditor::from_command("definitely-not-an-editor-7f3a", true).unwrap();
        let err = editor.open(Path::new("note.txt")).unwrap_err();
        assert!(matches!(err, NotebookError::EditorLaunch { .. }));
        assert!(err.is_recoverable());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor_is_exit_error() {
        let editor = SystemEditor::from_command("false", true).unwrap();
        let err = editor.open(Path::new("note.txt")).unwrap_err();
        assert!(matches!(err, NotebookError::EditorExit { .. }));
    }
}
