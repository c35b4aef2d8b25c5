// In-memory prompter for tests: answers come from queues, calls are recorded.
// Empty queues answer "cancel" / "no".

use super::{NoticeLevel, Prompter};
use crate::selection::Choice;

use std::collections::VecDeque;
use std::path::PathBuf;

#[derive(Default)]
pub struct ScriptedPrompter {
    choices: VecDeque<Choice<String>>,
    dirs: VecDeque<Choice<PathBuf>>,
    answers: VecDeque<bool>,
    choose_calls: usize,
    last_choices: Option<Vec<String>>,
    questions: Vec<String>,
    notices: Vec<(NoticeLevel, String, String)>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(mut self, item: &str) -> Self {
        self.choices.push_back(Choice::Selected(item.to_string()));
        self
    }

    pub fn cancel_choice(mut self) -> Self {
        self.choices.push_back(Choice::Cancelled);
        self
    }

    pub fn pick_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push_back(Choice::Selected(dir.into()));
        self
    }

    pub fn answer(mut self, yes: bool) -> Self {
        self.answers.push_back(yes);
        self
    }

    pub fn choose_calls(&self) -> usize {
        self.choose_calls
    }

    pub fn last_choices(&self) -> Option<Vec<String>> {
        self.last_choices.clone()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn notices(&self) -> &[(NoticeLevel, String, String)] {
        &self.notices
    }
}

impl Prompter for ScriptedPrompter {
    fn choose_one(&mut self, _title: &str, items: &[String]) -> Choice<String> {
        self.choose_calls += 1;
        self.last_choices = Some(items.to_vec());
        self.choices.pop_front().unwrap_or(Choice::Cancelled)
    }

    fn pick_directory(&mut self, _title: &str) -> Choice<PathBuf> {
        self.dirs.pop_front().unwrap_or(Choice::Cancelled)
    }

    fn confirm(&mut self, _title: &str, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
        self.notices.push((level, title.to_string(), message.to_string()));
    }
}
