// Line-based prompter for running in a terminal.
// Reads answers from `input`, writes questions to `output`.

use super::{NoticeLevel, Prompter, format_choices, parse_choice};
use crate::selection::Choice;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr so stdout stays clean for command output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask and read one line. `None` on EOF or read error.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn choose_one(&mut self, title: &str, items: &[String]) -> Choice<String> {
        let _ = writeln!(self.output, "{}\n{}", title, format_choices(items));

        loop {
            let Some(answer) = self.ask("Enter a number (empty or q to cancel): ") else {
                return Choice::Cancelled;
            };
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Choice::Cancelled;
            }
            match parse_choice(&answer, items) {
                Some(item) => return Choice::Selected(item),
                None => {
                    let _ = writeln!(self.output, "Invalid selection: {}", answer);
                }
            }
        }
    }

    fn pick_directory(&mut self, title: &str) -> Choice<PathBuf> {
        match self.ask(&format!("{} (empty to cancel): ", title)) {
            Some(path) if !path.is_empty() => Choice::Selected(PathBuf::from(path)),
            _ => Choice::Cancelled,
        }
    }

    fn confirm(&mut self, title: &str, question: &str) -> bool {
        let answer = self.ask(&format!("{}: {} [y/N] ", title, question));
        matches!(answer.as_deref().map(str::to_ascii_lowercase).as_deref(), Some("y" | "yes"))
    }

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
        let tag = match level {
            NoticeLevel::Info => "",
            NoticeLevel::Error => "error: ",
        };
        let _ = writeln!(self.output, "{}{}: {}", tag, title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn items() -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string()]
    }

    #[test]
    fn choose_by_number() {
        let mut p = prompter("2\n");
        assert_eq!(p.choose_one("Select Friend", &items()), Choice::Selected("bob".into()));
        let shown = String::from_utf8(p.output.clone()).unwrap();
        assert!(shown.contains("Select Friend"));
        assert!(shown.contains("  1. alice"));
    }

    #[test]
    fn choose_reprompts_after_invalid_input() {
        let mut p = prompter("9\nalice\n");
        assert_eq!(p.choose_one("Select Friend", &items()), Choice::Selected("alice".into()));
        let shown = String::from_utf8(p.output.clone()).unwrap();
        assert!(shown.contains("Invalid selection: 9"));
    }

    #[test]
    fn choose_cancel_on_empty_q_or_eof() {
        assert_eq!(prompter("\n").choose_one("t", &items()), Choice::Cancelled);
        assert_eq!(prompter("Q\n").choose_one("t", &items()), Choice::Cancelled);
        assert_eq!(prompter("").choose_one("t", &items()), Choice::Cancelled);
    }

    #[test]
    fn pick_directory_reads_path() {
        let mut p = prompter("/mnt/dropbox/s1\n");
        assert_eq!(
            p.pick_directory("Select a shared folder"),
            Choice::Selected(PathBuf::from("/mnt/dropbox/s1"))
        );
        assert_eq!(prompter("\n").pick_directory("x"), Choice::Cancelled);
    }

    #[test]
    fn confirm_accepts_only_yes() {
        assert!(prompter("y\n").confirm("Backup", "Backup first?"));
        assert!(prompter("YES\n").confirm("Backup", "Backup first?"));
        assert!(!prompter("n\n").confirm("Backup", "Backup first?"));
        assert!(!prompter("\n").confirm("Backup", "Backup first?"));
        assert!(!prompter("").confirm("Backup", "Backup first?"));
    }

    #[test]
    fn notify_marks_errors() {
        let mut p = prompter("");
        p.notify(NoticeLevel::Error, "Error", "boom");
        p.notify(NoticeLevel::Info, "Backup", "done");
        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown, "error: Error: boom\nBackup: done\n");
    }
}
