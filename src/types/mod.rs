//! Shared data structures for the two dashboard pipelines
//!
//! - Approach feed: RawApproachPayload -> CloseApproachDisplayRecord -> ApproachTable
//! - Inference: OrbitalFeatureVector -> FeatureArray -> PredictionResult

mod approach;
mod orbital;

pub use approach::*;
pub use orbital::*;
