use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the tracker.
///
/// The first three are input mistakes the menu recovers from; the file errors
/// are fatal and propagate out of `main`.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Invalid selection {input:?}: enter a number between 1 and {max}.")]
    InvalidSelection { input: String, max: usize },

    #[error("Invalid outcome {0:?}.")]
    InvalidOutcome(String),

    #[error("Invalid choice {0:?}.")]
    InvalidMenuChoice(String),

    #[error("{} is not a valid workbook: {reason}", path.display())]
    FileFormat { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrackerError {
    /// Whether the interactive loop can report this and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TrackerError::InvalidSelection { .. }
                | TrackerError::InvalidOutcome(_)
                | TrackerError::InvalidMenuChoice(_)
        )
    }
}
