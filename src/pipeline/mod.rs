//! Request orchestration.
//!
//! Resolves the measurement window, obtains measurements (with fallback),
//! and runs the landscape compositor and the synthesizer for each request.

mod generator;
mod request;

pub use generator::{
    ArtifactPaths, EncodedArtifacts, GeneratedArtifacts, GenerationSummary, Soundscape,
};
pub use request::{GenerationRequest, DEFAULT_LOOKBACK_MONTHS};
