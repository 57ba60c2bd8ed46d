//! Terminal prompts for confirmations and notices.

use std::io::{BufRead, Write};

use pharmadb_ui::Prompter;

/// Prompter backed by stdin/stdout. With `assume_yes` every confirmation
/// is accepted without reading input.
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
