// Desktop dialogs: zenity/kdialog through `dialog`, native folder picker through `rfd`.

use super::{NoticeLevel, Prompter, format_choices, parse_choice};
use crate::selection::Choice;

use dialog::DialogBox;
use rfd::FileDialog;
use std::path::PathBuf;

pub struct DesktopPrompter {
    start_dir: PathBuf,
}

impl DesktopPrompter {
    pub fn new(start_dir: PathBuf) -> Self {
        Self { start_dir }
    }
}

impl Prompter for DesktopPrompter {
    fn choose_one(&mut self, title: &str, items: &[String]) -> Choice<String> {
        let mut text = format!("{}\n\nEnter the number of your choice:", format_choices(items));
        loop {
            let answer = match dialog::Input::new(&text).title(title).show() {
                Ok(Some(answer)) if !answer.trim().is_empty() => answer,
                _ => return Choice::Cancelled,
            };
            match parse_choice(&answer, items) {
                Some(item) => return Choice::Selected(item),
                None => {
                    text = format!(
                        "Invalid selection: {}\n\n{}\n\nEnter the number of your choice:",
                        answer.trim(),
                        format_choices(items)
                    );
                }
            }
        }
    }

    fn pick_directory(&mut self, title: &str) -> Choice<PathBuf> {
        match FileDialog::new()
            .set_title(title)
            .set_directory(&self.start_dir)
            .pick_folder()
        {
            Some(dir) => Choice::Selected(dir),
            None => Choice::Cancelled,
        }
    }

    fn confirm(&mut self, title: &str, question: &str) -> bool {
        matches!(
            dialog::Question::new(question).title(title).show(),
            Ok(dialog::Choice::Yes)
        )
    }

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
        let title = match level {
            NoticeLevel::Info => title.to_string(),
            NoticeLevel::Error => format!("Error: {}", title),
        };
        let _ = dialog::Message::new(message).title(title).show();
    }
}
