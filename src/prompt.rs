// User interaction capability: list choice, directory picker, yes/no and
// notifications. Implemented for a terminal and for desktop dialogs.

mod desktop;
#[cfg(test)]
pub mod scripted;
mod terminal;

pub use desktop::DesktopPrompter;
pub use terminal::TerminalPrompter;

use crate::selection::Choice;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

pub trait Prompter {
    /// Ask the user to pick one of `items`.
    fn choose_one(&mut self, title: &str, items: &[String]) -> Choice<String>;

    /// Ask the user for a directory.
    fn pick_directory(&mut self, title: &str) -> Choice<PathBuf>;

    /// Yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, title: &str, question: &str) -> bool;

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str);
}

/// Numbered list, one item per line, starting at 1.
pub fn format_choices(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{:>3}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Interpret an answer to a numbered list: a 1-based index or an exact item name.
pub fn parse_choice(input: &str, items: &[String]) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| items.get(i)).cloned();
    }
    items.iter().find(|item| item.as_str() == input).cloned()
}
