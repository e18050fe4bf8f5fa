use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::budget::SizeBudget;
use crate::codec::QualityCodec;
use crate::error::SqueezeError;
use crate::ledger::CandidateLedger;

/// Outcome of a finished compression run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressionResult {
    pub output_path: PathBuf,
    pub final_size_bytes: u64,
    /// True iff the promoted candidate's size is at or below the exact
    /// target. Stricter than the tolerance ceiling: a result inside the
    /// tolerance band but above the target reports `false`.
    pub reached_target: bool,
}

/// What one trial observed, reported to the caller's diagnostics sink.
#[derive(Debug, Clone, Copy)]
pub struct TrialOutcome {
    /// 1-based trial count.
    pub iteration: u32,
    pub quality: u8,
    pub size_bytes: u64,
    /// Whether the trial landed under the tolerance ceiling.
    pub within_ceiling: bool,
}

/// Explicit, passed-in diagnostics sink; the search owns no process-wide
/// logger. Notified once per codec trial. The copy-through short circuit
/// reports no trials.
pub trait SearchObserver {
    fn on_trial(&mut self, trial: &TrialOutcome);
}

/// Observer that ignores every trial.
pub struct QuietObserver;

impl SearchObserver for QuietObserver {
    fn on_trial(&mut self, _trial: &TrialOutcome) {}
}

/// Bounded binary search for the highest codec quality whose output still
/// fits the budget's tolerance ceiling.
///
/// The search narrows a shrinking quality interval, one full codec pass per
/// trial, and never runs more than `max_iterations` trials: each trial
/// costs a transform proportional to the document size, so both the
/// interval and the cap are deliberate bounds. Once a passing trial is
/// found the search only ever narrows upward: the goal is not to match the
/// target exactly but to maximize quality subject to the ceiling, a
/// one-sided feasibility search over an assumed-monotonic quality→size
/// mapping. If a document's mapping is not monotonic (real codecs mix size
/// contributions from images, fonts, and structure) the search can prune a
/// half-interval that contained a better answer; monotonicity is never
/// checked at runtime, so that outcome goes undetected.
pub struct TargetSearch<'a> {
    budget: &'a SizeBudget,
    codec: &'a dyn QualityCodec,
}

impl<'a> TargetSearch<'a> {
    pub fn new(budget: &'a SizeBudget, codec: &'a dyn QualityCodec) -> Self {
        Self { budget, codec }
    }

    /// Compress `input` into `output`, returning the promoted result.
    ///
    /// On any error, including a codec failure mid-search, nothing is
    /// written to `output` and every retained scratch artifact is released
    /// before this returns.
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        observer: &mut dyn SearchObserver,
    ) -> Result<CompressionResult, SqueezeError> {
        if !input.exists() {
            return Err(SqueezeError::InputNotFound(input.to_path_buf()));
        }

        // Copy-through short circuit: nothing to compress, no codec pass.
        let input_size = fs::metadata(input)?.len();
        if self.budget.meets_target(input_size) {
            debug!(
                input_size,
                target = self.budget.target_bytes(),
                "input already fits the target, copying through"
            );
            fs::copy(input, output)?;
            return Ok(CompressionResult {
                output_path: output.to_path_buf(),
                final_size_bytes: input_size,
                reached_target: true,
            });
        }

        let mut ledger = CandidateLedger::new();
        let (min_quality, max_quality) = self.budget.quality_range();
        let mut low = i32::from(min_quality);
        let mut high = i32::from(max_quality);
        let mut iterations = 0u32;

        while low <= high && iterations < self.budget.max_iterations() {
            iterations += 1;
            let quality = ((low + high) / 2) as u8;

            let candidate = self
                .codec
                .recompress(input, quality)
                .map_err(|source| SqueezeError::CodecFailure { quality, source })?;
            let size_bytes = candidate.size_bytes;
            let within_ceiling = self.budget.within_ceiling(size_bytes);

            debug!(
                iteration = iterations,
                quality, size_bytes, within_ceiling, "trial finished"
            );
            observer.on_trial(&TrialOutcome {
                iteration: iterations,
                quality,
                size_bytes,
                within_ceiling,
            });

            if within_ceiling {
                // Keep probing for an even higher acceptable quality.
                ledger.offer_passing(candidate);
                low = i32::from(quality) + 1;
            } else {
                ledger.offer_failing(candidate);
                high = i32::from(quality) - 1;
            }
        }

        self.finalize(ledger, output)
    }

    /// Promote the ledger's winner to `output` and release everything else.
    fn finalize(
        &self,
        ledger: CandidateLedger,
        output: &Path,
    ) -> Result<CompressionResult, SqueezeError> {
        let winner = ledger
            .into_winner()
            .ok_or(SqueezeError::NoCandidateProduced)?;
        let reached_target = self.budget.meets_target(winner.size_bytes);
        debug!(
            quality = winner.quality,
            size_bytes = winner.size_bytes,
            reached_target,
            "promoting winning candidate"
        );
        let final_size_bytes = winner.size_bytes;
        winner.artifact.persist(output)?;
        Ok(CompressionResult {
            output_path: output.to_path_buf(),
            final_size_bytes,
            reached_target,
        })
    }
}
