//! The edit operation: read a file, drive the replacement cascade, show the
//! resulting diff for confirmation, and persist the new content.
//!
//! The diff shown and the content written come from the same in-memory
//! snapshot; the file is never re-read between them, and nothing is written
//! until the confirmation resolves positively.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::edit::confirm::{Confirm, ConsoleConfirm};
use crate::edit::diff::unified_diff;
use crate::edit::driver::{self, ReplaceError};
use crate::edit::replacer::search_lines;
use crate::file::access::{self, ReadTextError};
use crate::file::find::find_closest_match;

#[derive(Debug, Clone, Serialize)]
pub struct EditResult {
    pub title: String,
    pub output: String,
    pub metadata: EditMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditMetadata {
    pub replacements: usize,
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("old_string and new_string are identical; no change would be made")]
    NoChange,

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("path is a directory, not a file: {path}")]
    IsDirectory { path: String },

    #[error("{path} does not look like a text file and will not be edited")]
    BinaryRefused { path: String },

    #[error("{message}")]
    MatchNotFound { message: String },

    #[error(
        "old_string matches more than one region of {path}; add surrounding context to make it unique, or set replace_all"
    )]
    Ambiguous { path: String },

    #[error("edit declined; {path} was left unchanged")]
    UserCancelled { path: String },

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Applies a single localized replacement to a file on disk.
///
/// Holds no cross-call state; the confirmation collaborator is the only
/// injected dependency.
pub struct Editor {
    confirmer: Box<dyn Confirm>,
}

impl Editor {
    pub fn new(confirmer: Box<dyn Confirm>) -> Self {
        Self { confirmer }
    }

    /// An editor that prompts for each edit on the terminal.
    pub fn interactive() -> Self {
        Self::new(Box::new(ConsoleConfirm))
    }

    /// Replace `old_string` with `new_string` in the file at `file_path`.
    ///
    /// Relative paths resolve against the process working directory. On any
    /// failure the file's on-disk bytes are unchanged.
    pub async fn edit(
        &self,
        file_path: &str,
        old_string: &str,
        new_string: &str,
        replace_all: bool,
    ) -> Result<EditResult, EditError> {
        if old_string == new_string {
            return Err(EditError::NoChange);
        }

        let path = Path::new(file_path);
        if !access::exists(path).await {
            return Err(EditError::FileNotFound {
                path: file_path.to_string(),
            });
        }
        if access::is_directory(path).await {
            return Err(EditError::IsDirectory {
                path: file_path.to_string(),
            });
        }

        let content = access::read_text(path).await.map_err(|e| match e {
            ReadTextError::Binary => EditError::BinaryRefused {
                path: file_path.to_string(),
            },
            ReadTextError::Io(source) => EditError::Io(source),
        })?;

        let replacement = driver::replace(&content, old_string, new_string, replace_all)
            .map_err(|e| self.replace_error(e, file_path, &content, old_string))?;

        let diff = unified_diff(&content, &replacement.content, file_path);

        let approved = match self.confirmer.confirm(&diff, file_path).await {
            Ok(approved) => approved,
            Err(error) => {
                tracing::warn!(path = file_path, ?error, "confirmation failed, declining edit");
                false
            }
        };
        if !approved {
            tracing::info!(path = file_path, "edit declined");
            return Err(EditError::UserCancelled {
                path: file_path.to_string(),
            });
        }

        access::write_text(path, &replacement.content).await?;
        tracing::info!(
            path = file_path,
            replacements = replacement.replacements,
            strategy = replacement.strategy,
            "applied edit"
        );

        Ok(EditResult {
            title: file_path.to_string(),
            output: "Edit applied successfully.".to_string(),
            metadata: EditMetadata {
                replacements: replacement.replacements,
            },
        })
    }

    fn replace_error(
        &self,
        error: ReplaceError,
        file_path: &str,
        content: &str,
        old_string: &str,
    ) -> EditError {
        match error {
            ReplaceError::NoChange => EditError::NoChange,
            ReplaceError::Ambiguous => EditError::Ambiguous {
                path: file_path.to_string(),
            },
            ReplaceError::NotFound => {
                tracing::warn!(path = file_path, "no strategy matched the search text");
                EditError::MatchNotFound {
                    message: not_found_message(file_path, content, old_string),
                }
            }
        }
    }
}

/// Summarize the failed search without echoing the fragment back: models
/// asked "do not repeat X" reliably repeat X, so point at the file's
/// closest region instead.
fn not_found_message(file_path: &str, content: &str, old_string: &str) -> String {
    let content_lines: Vec<&str> = content.split('\n').collect();
    let search = search_lines(old_string);

    let feedback = find_closest_match(&content_lines, &search)
        .and_then(|closest| closest.correction_feedback());

    match feedback {
        Some(feedback) => format!(
            "Failed to find the {}-line old_string in {file_path}. {feedback}",
            search.len()
        ),
        None => format!(
            "Failed to find the {}-line old_string in {file_path}. Reread the file to see its current content.",
            search.len()
        ),
    }
}
