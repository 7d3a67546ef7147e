use std::path::PathBuf;
use tokio::sync::oneshot;

use crate::export::ExportFormat;
use crate::models::{HistoryRecord, TagFilter};

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Clone)]
pub enum ActorError {
    /// The actor task is gone and can no longer receive messages.
    #[error("Actor mailbox closed: {0}")]
    Closed(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Result of submitting a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// The question was answered and stored.
    Answered(HistoryRecord),
    /// The responder failed; the store is unchanged.
    Failed(String),
}

/// Result of an export or snapshot request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// History was empty, so no file was produced.
    Empty,
}

/// Result of a clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared { removed: usize },
    /// The user did not confirm; history is untouched.
    NotConfirmed,
}

/// Messages that can be sent to the controller actor.
#[derive(Debug)]
pub enum ControllerMessage {
    /// Run the ask flow for a raw input line.
    Ask {
        question: String,
        responder: oneshot::Sender<AskOutcome>,
    },
    /// Change the sidebar filter selection.
    SetFilter {
        filter: TagFilter,
        responder: oneshot::Sender<()>,
    },
    /// Repaint the sidebar with the current filter.
    RefreshSidebar { responder: oneshot::Sender<()> },
    /// Put a past question back into the input field.
    ViewRecord {
        id: i64,
        responder: oneshot::Sender<Option<String>>,
    },
    /// Copy a record's answer to the clipboard.
    CopyAnswer {
        id: i64,
        responder: oneshot::Sender<Result<(), AppError>>,
    },
    /// Empty the history. Only honoured when `confirmed` is set.
    ClearHistory {
        confirmed: bool,
        responder: oneshot::Sender<ClearOutcome>,
    },
    /// Write the history to a file.
    Export {
        format: ExportFormat,
        responder: oneshot::Sender<Result<ExportOutcome, AppError>>,
    },
    /// Write an HTML rendering of both views.
    Snapshot {
        responder: oneshot::Sender<Result<ExportOutcome, AppError>>,
    },
    /// Read-only copy of the history, newest first.
    Records {
        responder: oneshot::Sender<Vec<HistoryRecord>>,
    },
    /// A command to shut down the controller.
    Shutdown,
}
