// Narrowing ambiguous candidate sets (user folders, friends, save slots)
// down to the one entry an operation acts on.

use crate::error::SyncError;
use crate::prompt::Prompter;

/// Outcome of anything that can be cancelled by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Selected(T),
    Cancelled,
}

impl<T> Choice<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Choice<U> {
        match self {
            Choice::Selected(v) => Choice::Selected(f(v)),
            Choice::Cancelled => Choice::Cancelled,
        }
    }

    pub fn selected(self) -> Option<T> {
        match self {
            Choice::Selected(v) => Some(v),
            Choice::Cancelled => None,
        }
    }
}

/// Resolve `candidates` to a single entry.
///
/// One candidate is selected without asking. Several candidates are handed to
/// the prompter once and its answer is returned as-is.
pub fn resolve(
    title: &str,
    candidates: &[String],
    prompter: &mut dyn Prompter,
) -> Result<Choice<String>, SyncError> {
    match candidates {
        [] => Err(SyncError::NoCandidates),
        [only] => {
            tracing::debug!(title, selected = %only, "single candidate, auto-selected");
            Ok(Choice::Selected(only.clone()))
        }
        _ => {
            let choice = prompter.choose_one(title, candidates);
            if choice == Choice::Cancelled {
                tracing::debug!(title, "selection cancelled");
            }
            Ok(choice)
        }
    }
}

/// Resolve, but report an empty candidate list as `empty_err` instead of
/// the generic [`SyncError::NoCandidates`].
pub fn resolve_or(
    title: &str,
    candidates: &[String],
    prompter: &mut dyn Prompter,
    empty_err: impl FnOnce() -> SyncError,
) -> Result<Choice<String>, SyncError> {
    if candidates.is_empty() {
        return Err(empty_err());
    }
    resolve(title, candidates, prompter)
}
