pub mod artifact;
pub mod budget;
pub mod codec;
pub mod error;
pub mod ledger;
pub mod search;

pub use artifact::Artifact;
pub use budget::{
    SizeBudget, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_QUALITY, DEFAULT_MIN_QUALITY,
    DEFAULT_TOLERANCE,
};
pub use codec::{Candidate, QualityCodec};
pub use error::SqueezeError;
pub use ledger::CandidateLedger;
pub use search::{CompressionResult, QuietObserver, SearchObserver, TargetSearch, TrialOutcome};
