use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a compression run.
///
/// All variants are fatal to the operation they occur in; the only
/// degraded-but-successful outcome ("target not reached, but a usable
/// output was produced") is reported through
/// [`CompressionResult::reached_target`](crate::CompressionResult), never
/// as an error.
#[derive(Debug, Error)]
pub enum SqueezeError {
    /// Malformed tolerance, quality range, target, or iteration cap.
    /// Detected before any codec invocation.
    #[error("invalid size budget: {0}")]
    InvalidBudget(String),

    /// The source document does not exist.
    #[error("input document not found: {0:?}")]
    InputNotFound(PathBuf),

    /// A recompression trial errored. Treated as a structural problem with
    /// the input document, not a transient condition: the whole search
    /// aborts and no output is produced.
    #[error("codec failed at quality {quality}")]
    CodecFailure {
        quality: u8,
        #[source]
        source: anyhow::Error,
    },

    /// The search loop finished without retaining a single candidate.
    /// Unreachable for any valid budget: at least one trial always runs
    /// and lands in one of the two ledger slots.
    #[error("search produced no candidate to promote")]
    NoCandidateProduced,

    /// Scratch-file or promotion I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
