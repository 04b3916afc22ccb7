//! Command processor
//!
//! Decodes one line of input and runs it against the notebook. User errors
//! and environment errors are printed and the loop keeps going; only a
//! broken prompt is returned to the caller.

use tracing::debug;

use crate::core::editor::Launcher;
use crate::core::error::NotebookError;
use crate::core::listing::ListingStyle;
use crate::core::notebook::{DeleteOutcome, Notebook};

use super::command::Command;
use super::terminal::Console;

const LOGO: &str = r"
 _   _  ___ _____ _____ ____   ___   ___  _  __
| \ | |/ _ \_   _| ____| __ ) / _ \ / _ \| |/ /
|  \| | | | || | |  _| |  _ \| | | | | | | ' /
| |\  | |_| || | | |___| |_) | |_| | |_| | . \
|_| \_|\___/ |_| |_____|____/ \___/ \___/|_|\_\
";

pub const HELP: &str = "
    Available commands:
    - home: Display the list of notes.
    - create <name>: Create a new note with the specified name.
    - edit <name>: Edit the note with the specified name.
    - delete <name>: Delete the note with the specified name.
    - rename <old_name> <new_name>: Rename a note.
    - help: Display this help message.
    - exit | quit | q: Exit the program.
";

/// What the loop should do after a line was processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Dispatches commands to the notebook
pub struct CommandProcessor<L> {
    notebook: Notebook,
    editor: L,
    style: ListingStyle,
}

impl<L: Launcher> CommandProcessor<L> {
    pub fn new(notebook: Notebook, editor: L, style: ListingStyle) -> Self {
        Self {
            notebook,
            editor,
            style,
        }
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    /// Process one line of input
    pub fn process<C: Console>(
        &mut self,
        line: &str,
        console: &mut C,
    ) -> Result<Flow, NotebookError> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                console.warn(&e.to_string());
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "dispatching");

        let result = match command {
            Command::Home => {
                self.reset_screen(console);
                Ok(())
            }
            Command::Create { name } => self.create(&name, console),
            Command::Edit { name } => self.edit(&name, console),
            Command::Delete { name } => self.delete(&name, console),
            Command::Rename { old, new } => self.rename(&old, &new, console),
            Command::Help => {
                console.print(HELP);
                Ok(())
            }
            Command::Exit => return Ok(Flow::Exit),
        };

        match result {
            Ok(()) => Ok(Flow::Continue),
            Err(e) if e.is_recoverable() => {
                console.warn(&e.to_string());
                Ok(Flow::Continue)
            }
            Err(e) => Err(e),
        }
    }

    /// Clear the screen and draw logo, hint and notes table
    pub fn reset_screen<C: Console>(&self, console: &mut C) {
        console.clear();
        console.print(LOGO);
        console.print("\nType 'help' to see the list of commands\n");
        console.print(&self.notebook.display_notes(&self.style));
        console.print("\n");
    }

    fn create<C: Console>(&mut self, name: &str, console: &mut C) -> Result<(), NotebookError> {
        self.notebook.create_note(name, console)?;
        self.reset_screen(console);
        Ok(())
    }

    fn edit<C: Console>(&mut self, name: &str, console: &mut C) -> Result<(), NotebookError> {
        let result = self
            .notebook
            .edit_note(name, &self.editor, console)
            .map(|_| ());

        match result {
            Ok(()) => {
                self.reset_screen(console);
                Ok(())
            }
            Err(e @ NotebookError::NotFound { .. }) => Err(e),
            Err(e) if e.is_recoverable() => {
                console.warn(&format!("An error occurred: {}", e));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn delete<C: Console>(&mut self, name: &str, console: &mut C) -> Result<(), NotebookError> {
        match self.notebook.delete_note(name, console)? {
            DeleteOutcome::Deleted => {
                self.reset_screen(console);
                console.success("Note deleted successfully.");
            }
            DeleteOutcome::Declined => console.warn("Deletion cancelled."),
            DeleteOutcome::NotFound => {
                self.reset_screen(console);
                console.warn("Note not found.");
            }
        }
        Ok(())
    }

    fn rename<C: Console>(
        &mut self,
        old: &str,
        new: &str,
        console: &mut C,
    ) -> Result<(), NotebookError> {
        let result = self.notebook.rename_note(old, new).map(|_| ());

        match result {
            Ok(()) => {
                self.reset_screen(console);
                console.success("Note renamed successfully.");
                Ok(())
            }
            Err(e @ NotebookError::NotFound { .. }) => {
                self.reset_screen(console);
                console.warn(&e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
