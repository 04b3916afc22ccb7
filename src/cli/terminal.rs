//! Terminal console
//!
//! With a user at the keyboard, content and confirmation prompts go through
//! `dialoguer`. When stdin is piped every prompt reads one line, so scripted
//! sessions (`notebook < commands.txt`) work the same way.

use std::io::{self, Write};

use colored::Colorize;
use console::Term;
use dialoguer::{Confirm, Input};

use crate::core::prompt::{is_affirmative, Prompt};

/// Everything the command loop needs from the screen and keyboard
pub trait Console: Prompt {
    /// Read the next command line; `None` at end of input
    fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Wipe the screen before redrawing the home view
    fn clear(&mut self);

    fn print(&mut self, text: &str);

    fn success(&mut self, text: &str);

    fn warn(&mut self, text: &str);
}

/// Console on stdin/stdout
pub struct Terminal {
    term: Term,
    interactive: bool,
    clear_screen: bool,
}

impl Terminal {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            term: Term::stdout(),
            interactive: console::user_attended(),
            clear_screen,
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn require_line(&mut self, prompt: &str) -> io::Result<String> {
        self.read_line(prompt)?
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}

fn dialog_error(err: dialoguer::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

impl Prompt for Terminal {
    fn input(&mut self, message: &str) -> io::Result<String> {
        if self.interactive {
            Input::<String>::new()
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
                .map_err(dialog_error)
        } else {
            self.require_line(&format!("{}: ", message))
        }
    }

    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        if self.interactive {
            Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
                .map_err(dialog_error)
        } else {
            let answer = self.require_line(&format!("{} (yes/no): ", message))?;
            Ok(is_affirmative(&answer))
        }
    }

    fn pause(&mut self, message: &str) -> io::Result<()> {
        self.require_line(message).map(|_| ())
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

impl Console for Terminal {
    fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read_line(prompt)
    }

    fn clear(&mut self) {
        if self.clear_screen && self.term.is_term() {
            // Failing to clear only leaves old output on screen
            let _ = self.term.clear_screen();
        }
    }

    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, text: &str) {
        println!("{}", text.green());
    }

    fn warn(&mut self, text: &str) {
        println!("{}", text.yellow());
    }
}
