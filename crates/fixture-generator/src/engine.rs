//! The generation engine.
//!
//! All batching, validation integration, duplicate skipping and progress/
//! statistics bookkeeping lives here, shared by every domain producer. A
//! producer only answers "what does one entity look like"; the engine owns
//! "how generation is executed safely at scale".

use crate::rng::SeededRng;
use chrono::Utc;
use fixture_core::{
    EntityValidator, EnvironmentInfo, GenerationError, GenerationMetadata, GenerationOptions,
    GenerationResult, GenerationStatistics, OptionsError, Phase, ProgressEvent, ProgressSink,
};
use std::collections::HashSet;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// A fault raised by an entity producer for one item.
///
/// Captured by the engine as a `generation`-type error; it never aborts the
/// batch.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProduceError(String);

impl ProduceError {
    /// Create a produce fault with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Error type for engine invocation.
///
/// The engine aborts synchronously only for caller misuse of options;
/// per-item faults accumulate inside the result instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid generation options
    #[error("invalid options: {0}")]
    Options(#[from] OptionsError),
}

/// The one hook a domain generator supplies.
///
/// `produce` must be a pure function of the random-source state and the
/// invocation index: no I/O, no wall clock, no ambient entropy. Everything
/// else (batching, validation, bookkeeping) is the engine's job.
pub trait EntityProducer {
    /// The entity type this producer emits.
    type Entity;

    /// Produce the entity for logical index `index`.
    fn produce(&self, rng: &mut SeededRng, index: u64) -> Result<Self::Entity, ProduceError>;

    /// Producer identity recorded in result metadata.
    fn kind(&self) -> &'static str;

    /// Uniqueness key for duplicate skipping, if this entity type declares
    /// one. Default: no uniqueness constraint.
    fn unique_key(&self, _entity: &Self::Entity) -> Option<String> {
        None
    }
}

/// Orchestrates batched, validated, progress-reported generation.
///
/// A single engine's random-source state is mutated by every `produce`
/// call, so concurrent `generate` calls on the same instance must be
/// serialized (the `&mut self` receiver enforces this in safe code).
/// Without a per-call seed override, RNG state and the item index persist
/// across calls for incremental generation.
pub struct GenerationEngine<P: EntityProducer> {
    producer: P,
    rng: SeededRng,
    next_index: u64,
    validator: Option<Box<dyn EntityValidator<P::Entity> + Send + Sync>>,
    progress: Option<ProgressSink>,
}

impl<P: EntityProducer> GenerationEngine<P> {
    /// Create an engine keyed by `seed`.
    pub fn new(producer: P, seed: &str) -> Self {
        Self {
            producer,
            rng: SeededRng::new(seed),
            next_index: 0,
            validator: None,
            progress: None,
        }
    }

    /// Attach an entity validator, used when `options.validate_data` is set.
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: EntityValidator<P::Entity> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Attach a progress sink, invoked synchronously between batches.
    pub fn with_progress<F>(mut self, sink: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(sink));
        self
    }

    /// The logical index the next produced item will get.
    pub fn current_index(&self) -> u64 {
        self.next_index
    }

    /// Access the wrapped producer.
    pub fn producer(&self) -> &P {
        &self.producer
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(sink) = &self.progress {
            sink(&event);
        }
    }

    /// Generate `options.count` entities in batches of `options.batch_size`.
    ///
    /// Per-item faults never abort the call: producer faults and validation
    /// rejections accumulate as errors while surviving items land in `data`
    /// in logical generation order. The call returns `Err` only for caller
    /// misuse of the options.
    pub async fn generate(
        &mut self,
        options: &GenerationOptions,
    ) -> Result<GenerationResult<P::Entity>, EngineError> {
        options.validate()?;

        let started = Instant::now();
        if let Some(seed) = &options.seed {
            self.rng = SeededRng::new(seed);
            self.next_index = 0;
        }
        let seed = self.rng.seed().to_string();

        info!(
            generator = self.producer.kind(),
            count = options.count,
            batch_size = options.batch_size,
            seed = %seed,
            "starting generation"
        );

        let count = options.count;
        let mut data: Vec<P::Entity> = Vec::with_capacity(count as usize);
        let mut errors: Vec<GenerationError> = Vec::new();
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut produce_nanos: u128 = 0;

        self.emit(ProgressEvent::new(Phase::Initialization, 0, count));

        let mut done = 0u64;
        let mut batch_no = 0u64;
        while done < count {
            let batch = (count - done).min(options.batch_size);
            batch_no += 1;

            for _ in 0..batch {
                let index = self.next_index;
                self.next_index += 1;

                let produce_started = Instant::now();
                let produced = self.producer.produce(&mut self.rng, index);
                produce_nanos += produce_started.elapsed().as_nanos();

                let entity = match produced {
                    Ok(entity) => entity,
                    Err(fault) => {
                        errors.push(GenerationError::generation(fault.to_string(), index));
                        continue;
                    }
                };

                let entity = if options.validate_data {
                    match &self.validator {
                        Some(validator) => {
                            let report = validator.validate(&entity);
                            if !report.is_valid {
                                for message in report.errors {
                                    errors.push(GenerationError::validation(message, index));
                                }
                                continue;
                            }
                            validator.sanitize(entity)
                        }
                        None => entity,
                    }
                } else {
                    entity
                };

                if options.skip_duplicates {
                    if let Some(key) = self.producer.unique_key(&entity) {
                        // Expected filtering outcome, not a fault: no error
                        // is recorded for the dropped item.
                        if !seen_keys.insert(key) {
                            continue;
                        }
                    }
                }

                data.push(entity);
            }

            done += batch;
            debug!(batch = batch_no, done, count, "batch complete");
            self.emit(ProgressEvent::new(Phase::Generation, done, count));

            // Batches run strictly in sequence; yielding here only lets the
            // caller interleave unrelated work.
            tokio::task::yield_now().await;
        }

        let execution = started.elapsed();
        let statistics = GenerationStatistics {
            total_requested: count,
            total_generated: data.len() as u64,
            total_errors: errors.len() as u64,
            execution_time_ms: execution.as_millis() as u64,
            average_generation_time_ms: produce_nanos as f64 / 1_000_000.0 / count as f64,
            memory_usage_mb: (data.len() * std::mem::size_of::<P::Entity>()) as f64
                / (1024.0 * 1024.0),
        };

        self.emit(ProgressEvent::new(Phase::Complete, count, count));

        info!(
            generator = self.producer.kind(),
            generated = statistics.total_generated,
            errors = statistics.total_errors,
            elapsed_ms = statistics.execution_time_ms,
            "generation complete"
        );

        let metadata = GenerationMetadata {
            seed,
            generator: self.producer.kind().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            options: options.clone(),
            environment: EnvironmentInfo::capture(),
        };

        Ok(GenerationResult {
            success: errors.is_empty(),
            data,
            errors,
            statistics,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::{ErrorType, ValidationResult};
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        name: String,
        value: i64,
        category: String,
    }

    struct SampleProducer;

    impl EntityProducer for SampleProducer {
        type Entity = Sample;

        fn produce(&self, rng: &mut SeededRng, index: u64) -> Result<Sample, ProduceError> {
            let category = *rng.random_choice(&["alpha", "beta", "gamma"]);
            Ok(Sample {
                id: rng.next_id(),
                name: format!("sample_{index}"),
                value: rng.random_int(0, 1000),
                category: category.to_string(),
            })
        }

        fn kind(&self) -> &'static str {
            "sample"
        }

        fn unique_key(&self, entity: &Sample) -> Option<String> {
            Some(entity.category.clone())
        }
    }

    /// Fails every third call (indices 0, 3, 6, ...).
    struct FlakyProducer;

    impl EntityProducer for FlakyProducer {
        type Entity = Sample;

        fn produce(&self, rng: &mut SeededRng, index: u64) -> Result<Sample, ProduceError> {
            if index % 3 == 0 {
                return Err(ProduceError::new(format!("synthetic fault at {index}")));
            }
            SampleProducer.produce(rng, index)
        }

        fn kind(&self) -> &'static str {
            "flaky"
        }
    }

    struct ValueCapValidator {
        cap: i64,
    }

    impl EntityValidator<Sample> for ValueCapValidator {
        fn validate(&self, entity: &Sample) -> ValidationResult {
            let mut report = ValidationResult::ok();
            if entity.value > self.cap {
                report.push_error(format!("value {} exceeds cap {}", entity.value, self.cap));
            }
            if entity.name.trim().is_empty() {
                report.push_error("name is empty");
            }
            report
        }

        fn sanitize(&self, mut entity: Sample) -> Sample {
            entity.name = entity.name.trim().to_string();
            entity
        }
    }

    fn options(count: u64, batch_size: u64) -> GenerationOptions {
        GenerationOptions {
            count,
            batch_size,
            validate_data: false,
            seed: None,
            skip_duplicates: false,
        }
    }

    #[tokio::test]
    async fn test_scenario_five_items_batches_of_two() {
        let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_events = Arc::clone(&events);

        let mut engine = GenerationEngine::new(SampleProducer, "demo")
            .with_progress(move |event| sink_events.lock().unwrap().push(event.clone()));

        let result = engine.generate(&options(5, 2)).await.unwrap();

        assert!(result.success);
        assert_eq!(result.data.len(), 5);
        assert_eq!(result.statistics.total_generated, 5);
        assert_eq!(result.statistics.total_requested, 5);

        let events = events.lock().unwrap();
        let phases: Vec<Phase> = events.iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Initialization,
                Phase::Generation,
                Phase::Generation,
                Phase::Generation,
                Phase::Complete,
            ]
        );
        // Batch partitioning [2, 2, 1] shows in the items_done steps.
        let done: Vec<u64> = events.iter().map(|e| e.items_done).collect();
        assert_eq!(done, vec![0, 2, 4, 5, 5]);
        assert_eq!(events.last().unwrap().percentage, 100.0);
    }

    #[tokio::test]
    async fn test_determinism_across_fresh_engines() {
        let mut a = GenerationEngine::new(SampleProducer, "determinism");
        let mut b = GenerationEngine::new(SampleProducer, "determinism");

        let opts = options(50, 7);
        let run_a = a.generate(&opts).await.unwrap();
        let run_b = b.generate(&opts).await.unwrap();

        assert_eq!(run_a.data, run_b.data);
        assert_eq!(run_a.metadata.seed, "determinism");
    }

    #[tokio::test]
    async fn test_seed_override_resets_stream() {
        let mut engine = GenerationEngine::new(SampleProducer, "base");
        let first = engine.generate(&options(10, 10)).await.unwrap();

        let mut opts = options(10, 10);
        opts.seed = Some("base".to_string());
        let second = engine.generate(&opts).await.unwrap();

        assert_eq!(first.data, second.data);
        assert_eq!(second.metadata.seed, "base");
    }

    #[tokio::test]
    async fn test_incremental_indices_without_override() {
        let mut engine = GenerationEngine::new(SampleProducer, "incremental");
        engine.generate(&options(5, 5)).await.unwrap();
        assert_eq!(engine.current_index(), 5);

        let second = engine.generate(&options(3, 3)).await.unwrap();
        assert_eq!(second.data[0].name, "sample_5");
        assert_eq!(engine.current_index(), 8);
    }

    #[tokio::test]
    async fn test_rejects_misused_options() {
        let mut engine = GenerationEngine::new(SampleProducer, "misuse");
        let result = engine.generate(&options(0, 10)).await;
        assert!(matches!(
            result,
            Err(EngineError::Options(OptionsError::NonPositiveCount))
        ));

        let result = engine.generate(&options(10, 0)).await;
        assert!(matches!(
            result,
            Err(EngineError::Options(OptionsError::NonPositiveBatchSize))
        ));
    }

    #[tokio::test]
    async fn test_partial_failure_never_aborts() {
        let mut engine = GenerationEngine::new(FlakyProducer, "flaky");
        let result = engine.generate(&options(10, 4)).await.unwrap();

        // Indices 0, 3, 6, 9 fault.
        assert!(!result.success);
        assert_eq!(result.data.len(), 6);
        assert_eq!(result.errors.len(), 4);
        for error in &result.errors {
            assert_eq!(error.error_type, ErrorType::Generation);
            assert_eq!(error.phase, Phase::Generation);
        }
        let fault_indices: Vec<u64> = result.errors.iter().filter_map(|e| e.index).collect();
        assert_eq!(fault_indices, vec![0, 3, 6, 9]);
    }

    #[tokio::test]
    async fn test_validation_balance() {
        let mut engine = GenerationEngine::new(SampleProducer, "validate")
            .with_validator(ValueCapValidator { cap: 500 });

        let mut opts = options(100, 25);
        opts.validate_data = true;
        let result = engine.generate(&opts).await.unwrap();

        let rejected = result.errors.len();
        assert!(rejected > 0, "cap should reject roughly half the items");
        assert_eq!(result.data.len() + rejected, 100);
        for error in &result.errors {
            assert_eq!(error.error_type, ErrorType::Validation);
            assert_eq!(error.phase, Phase::Validation);
        }
        for item in &result.data {
            assert!(item.value <= 500);
        }
    }

    #[tokio::test]
    async fn test_validator_ignored_when_flag_unset() {
        let mut engine = GenerationEngine::new(SampleProducer, "novalidate")
            .with_validator(ValueCapValidator { cap: -1 });

        let result = engine.generate(&options(20, 20)).await.unwrap();
        assert!(result.success);
        assert_eq!(result.data.len(), 20);
    }

    #[tokio::test]
    async fn test_skip_duplicates_drops_silently() {
        // SampleProducer's unique key is its 3-value category, so at most
        // three items can survive.
        let mut opts = options(50, 10);
        opts.skip_duplicates = true;

        let mut engine = GenerationEngine::new(SampleProducer, "dupes");
        let result = engine.generate(&opts).await.unwrap();

        assert!(result.success, "duplicate drops are not errors");
        assert!(result.data.len() <= 3);
        assert!(result.errors.is_empty());
        assert_eq!(result.statistics.total_generated, result.data.len() as u64);
    }

    #[tokio::test]
    async fn test_metadata_snapshot() {
        let mut engine = GenerationEngine::new(SampleProducer, "meta");
        let opts = options(3, 2);
        let result = engine.generate(&opts).await.unwrap();

        assert_eq!(result.metadata.generator, "sample");
        assert_eq!(result.metadata.options.count, 3);
        assert_eq!(result.metadata.options.batch_size, 2);
        assert!(!result.metadata.version.is_empty());
        assert!(!result.metadata.environment.os.is_empty());
    }

    #[tokio::test]
    async fn test_id_uniqueness_at_scale() {
        let mut engine = GenerationEngine::new(SampleProducer, "scale");
        let result = engine.generate(&options(20_000, 1_000)).await.unwrap();

        let ids: std::collections::HashSet<&str> =
            result.data.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 20_000);
    }
}
