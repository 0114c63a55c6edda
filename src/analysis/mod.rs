//! Estimation core.
//!
//! Statistical primitives, the mediator-adjusted estimator, the pairwise
//! engine and the ranking helpers that turn its output into a profile.

pub mod engine;
pub mod estimator;
pub mod narrative;
pub mod profile;
pub mod ranker;
pub mod stats;

pub use engine::{validate_records, EffectEngine, EngineSettings};
pub use profile::build_profile;
pub use ranker::*;
