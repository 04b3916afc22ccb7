//! CLI module - Argument parsing, command decoding and the interactive loop

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

pub mod command;
pub mod processor;
pub mod repl;
pub mod terminal;

/// notebook - plain-text notes in a folder
///
/// Starts an interactive session. Type `help` at the `Notebook>` prompt for
/// the list of commands.
#[derive(Parser, Debug)]
#[command(name = "notebook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (to stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, env = "NOTEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Folder holding the notes (overrides notes.dir)
    #[arg(short = 'd', long, env = "NOTEBOOK_DIR")]
    pub notes_dir: Option<PathBuf>,

    /// Editor command (overrides editor.command)
    #[arg(short, long)]
    pub editor: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.notes_dir {
            config.notes.dir = dir.clone();
        }
        if let Some(editor) = &self.editor {
            config.editor.command = Some(editor.clone());
        }
    }
}
