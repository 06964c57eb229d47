//! Deterministic fixture generation for the brf-fixtures framework.
//!
//! This crate provides the seeded random source, the batching/validation/
//! progress orchestration engine, weighted categorical distributions, and
//! the BRF domain producers (cooperatives, members, apartments, financial
//! records).
//!
//! # Architecture
//!
//! ```text
//! GenerationOptions
//!        │
//!        ▼
//! ┌───────────────────┐     produce(rng, index)     ┌──────────────────┐
//! │  GenerationEngine │ ──────────────────────────▶ │  EntityProducer  │
//! │                   │                             │  (cooperative,   │
//! │  - SeededRng      │ ◀────────────────────────── │   member, ...)   │
//! │  - validator      │         entity / fault      └──────────────────┘
//! │  - progress sink  │
//! └─────────┬─────────┘
//!           │
//!           ▼
//!   GenerationResult<T> { success, data, errors, statistics, metadata }
//! ```
//!
//! # Determinism
//!
//! The same seed string and options produce field-by-field identical `data`
//! sequences on any machine. Nothing in the value path reads the wall clock
//! or ambient entropy; error/metadata timestamps are informational only.
//!
//! # Example
//!
//! ```rust
//! use fixture_core::GenerationOptions;
//! use fixture_generator::producers::CooperativeGenerator;
//! use fixture_generator::GenerationEngine;
//!
//! # tokio_test::block_on(async {
//! let mut engine = GenerationEngine::new(CooperativeGenerator::brf_default(), "demo");
//! let options = GenerationOptions::with_count(10);
//! let result = engine.generate(&options).await.unwrap();
//! assert_eq!(result.data.len(), 10);
//! # });
//! ```

pub mod distribution;
pub mod engine;
pub mod producers;
pub mod rng;
pub mod swedish;

// Re-exports for convenience
pub use distribution::{Distribution, DistributionError};
pub use engine::{EngineError, EntityProducer, GenerationEngine, ProduceError};
pub use rng::SeededRng;
