//! Prompt - questions the domain asks the user
//!
//! Creating a note needs its content, deleting needs a confirmation and
//! editing needs a "done" signal. The domain only sees this trait; the
//! terminal implementation lives in `cli::terminal`.

use std::io;

/// Interactive input supplied by the caller
pub trait Prompt {
    /// Ask for a single line of free text
    fn input(&mut self, message: &str) -> io::Result<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> io::Result<bool>;

    /// Block until the user signals they are ready to continue
    fn pause(&mut self, message: &str) -> io::Result<()>;

    /// Show an informational line while an operation is in progress
    fn notify(&mut self, message: &str);
}

/// Interpret a typed answer to a yes/no question.
///
/// Accepts `yes` and `y` in any case; everything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("  YES\n"));
        assert!(is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yess"));
    }
}
