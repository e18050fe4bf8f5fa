use std::io;
use std::path::Path;

use crate::artifact::Artifact;

/// One trial's result: the transformed document and its observed size at a
/// specific quality level.
///
/// Owns its artifact exclusively. Dropping a `Candidate` releases the
/// backing storage; only the candidate selected at finalization survives,
/// by having its artifact persisted to the caller's output path.
#[derive(Debug)]
pub struct Candidate {
    pub quality: u8,
    pub size_bytes: u64,
    pub artifact: Artifact,
}

impl Candidate {
    /// Wrap a freshly written artifact, recording its on-disk size.
    pub fn from_artifact(quality: u8, artifact: Artifact) -> io::Result<Self> {
        let size_bytes = artifact.size_bytes()?;
        Ok(Self {
            quality,
            size_bytes,
            artifact,
        })
    }
}

/// The recompression transform the search probes, seen as a black box.
///
/// Each invocation takes the *original* document and a quality level in
/// `1..=100` and produces a complete transformed artifact; trials are
/// independent, never incremental. The only observable the search acts on
/// is the candidate's size in bytes.
///
/// The quality→size relationship is assumed monotonic non-decreasing.
/// Implementations are not required to guarantee this and the search never
/// verifies it; see the crate's search documentation for the consequence.
pub trait QualityCodec: Send + Sync {
    /// Human-readable codec name for CLI display.
    fn name(&self) -> &'static str;

    /// Recompress `input` at `quality` into a fresh scratch artifact.
    ///
    /// Any error here aborts the entire search: a failing transform is
    /// treated as a structural problem with the document, not a condition
    /// worth retrying at a different quality.
    fn recompress(&self, input: &Path, quality: u8) -> anyhow::Result<Candidate>;
}
