//! Terminal adapters and utility functions for chatsweep.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use chatsweep_protocols::Prompter;
use tracing::warn;

/// Get the .chatsweep directory path.
pub(crate) fn chatsweep_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".chatsweep"))
        .unwrap_or_else(|| PathBuf::from(".chatsweep"))
}

/// `true` for answers that mean yes.
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompter reading answers from stdin.
pub(crate) struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    async fn read_line(prompt: String) -> Option<String> {
        let result = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match result {
            Ok(Ok(line)) => Some(line),
            Ok(Err(e)) => {
                warn!("Failed to read from terminal: {}", e);
                None
            }
            Err(e) => {
                warn!("Terminal prompt task failed: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::read_line(format!("{} [y/N] ", message))
            .await
            .is_some_and(|answer| is_affirmative(&answer))
    }

    async fn inform(&self, message: &str) {
        println!("{}", message);
    }

    async fn ask(&self, message: &str) -> Option<String> {
        let answer = Self::read_line(format!("{} ", message)).await?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }

    #[tokio::test]
    async fn test_assume_yes_skips_terminal() {
        let prompter = TerminalPrompter::new(true);
        assert!(prompter.confirm("Delete 3 conversation(s)?").await);
    }

    #[test]
    fn test_chatsweep_dir_name() {
        assert!(chatsweep_dir().ends_with(".chatsweep"));
    }
}
