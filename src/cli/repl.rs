//! Interactive loop
//!
//! Draws the home screen, then reads `Notebook> ` lines until an exit
//! command or end of input.

use std::fs;
use std::io;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::core::editor::Launcher;
use crate::core::error::NotebookError;
use crate::core::notebook::Notebook;

use super::processor::{CommandProcessor, Flow};
use super::terminal::{Console, Terminal};

pub const PROMPT: &str = "Notebook> ";

/// Open the notebook described by `config` and run the loop on the terminal
pub fn start(config: &Config) -> Result<()> {
    let folder = &config.notes.dir;
    if !folder.exists() {
        fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create notes folder {}", folder.display()))?;
        info!(folder = %folder.display(), "created notes folder");
    }

    let notebook = Notebook::load(folder, &config.notes.extension)
        .with_context(|| format!("Failed to load notes from {}", folder.display()))?;
    let editor = config.editor();
    debug!(editor = %editor, "resolved editor");

    let mut processor = CommandProcessor::new(notebook, editor, config.listing_style());
    let mut terminal = Terminal::new(config.display.clear_screen);
    run(&mut processor, &mut terminal)
}

/// Run the loop until exit or end of input
pub fn run<L: Launcher, C: Console>(
    processor: &mut CommandProcessor<L>,
    console: &mut C,
) -> Result<()> {
    processor.reset_screen(console);
    for path in processor.notebook().skipped() {
        console.warn(&format!(
            "Skipped {}: not readable as a text note",
            path.display()
        ));
    }

    loop {
        let Some(line) = console.read_command(PROMPT).context("Failed to read command")? else {
            debug!("end of input");
            break;
        };

        match processor.process(&line, console) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(NotebookError::Prompt(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed while prompting");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
