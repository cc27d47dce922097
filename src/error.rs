//! Error types shared by the dialog layer.

use thiserror::Error;

/// Failure modes of dialog and workflow calls.
///
/// Cancellation is deliberately an error variant rather than a success case:
/// a dialog dismissed without an affirmative result aborts the rest of its
/// workflow chain, and modelling that as `Err` lets `?` do the aborting.
#[derive(Debug, Error)]
pub enum DialogError {
    /// The user dismissed the dialog without an affirmative result.
    #[error("dialog cancelled")]
    Cancelled,

    /// The native file surface reported a change with an empty path.
    #[error("no file selected")]
    NoFileSelected,

    /// The dialog view dropped its close handle without ever signalling.
    #[error("dialog closed without signalling")]
    Abandoned,

    /// The remote authentication collaborator refused the credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A programming or configuration defect, e.g. a schema key with no
    /// matching live input. Fail fast, never silently drop the field.
    #[error("dialog configuration error: {0}")]
    Config(String),

    /// Settings persistence failed.
    #[error("failed to persist settings: {0}")]
    Persist(#[from] std::io::Error),

    /// A dialog closed with a payload of the wrong shape for its kind.
    #[error("unexpected dialog result, expected {expected}")]
    UnexpectedResult { expected: &'static str },
}

impl DialogError {
    /// Whether this failure is a plain user cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, DialogError::Cancelled)
    }
}
