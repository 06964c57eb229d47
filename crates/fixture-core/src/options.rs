//! Caller-supplied generation options.

use crate::error::OptionsError;
use serde::{Deserialize, Serialize};

/// Options for one `generate` call.
///
/// The options are snapshotted into [`crate::GenerationMetadata`], so they
/// carry only serializable data. The progress sink is engine-side
/// configuration, not part of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Number of entities to generate.
    pub count: u64,

    /// Entities per batch. Bounds peak memory and sets the progress
    /// reporting granularity.
    pub batch_size: u64,

    /// Run each produced item through the entity validator, recording one
    /// validation error per violated rule and sanitizing accepted items.
    pub validate_data: bool,

    /// Per-call seed override. When set, the engine reseeds its random
    /// source before generating.
    pub seed: Option<String>,

    /// Silently drop items whose declared uniqueness key was already seen
    /// in this call. Dropped items are not recorded as errors.
    pub skip_duplicates: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            count: 100,
            batch_size: 50,
            validate_data: true,
            seed: None,
            skip_duplicates: false,
        }
    }
}

impl GenerationOptions {
    /// Create options for `count` entities, other fields at their defaults.
    pub fn with_count(count: u64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Check the caller-misuse contract. Fails synchronously on
    /// non-positive `count` or `batch_size`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.count == 0 {
            return Err(OptionsError::NonPositiveCount);
        }
        if self.batch_size == 0 {
            return Err(OptionsError::NonPositiveBatchSize);
        }
        Ok(())
    }

    /// Number of batches this call will be partitioned into.
    pub fn batch_count(&self) -> u64 {
        self.count.div_ceil(self.batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.count, 100);
        assert_eq!(opts.batch_size, 50);
        assert!(opts.validate_data);
        assert!(!opts.skip_duplicates);
        assert!(opts.seed.is_none());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_count() {
        let opts = GenerationOptions {
            count: 0,
            ..Default::default()
        };
        assert_eq!(opts.validate(), Err(OptionsError::NonPositiveCount));
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let opts = GenerationOptions {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(opts.validate(), Err(OptionsError::NonPositiveBatchSize));
    }

    #[test]
    fn test_batch_count_partitioning() {
        let opts = GenerationOptions {
            count: 5,
            batch_size: 2,
            ..Default::default()
        };
        assert_eq!(opts.batch_count(), 3);

        let exact = GenerationOptions {
            count: 100,
            batch_size: 50,
            ..Default::default()
        };
        assert_eq!(exact.batch_count(), 2);
    }

    #[test]
    fn test_options_roundtrip_serde() {
        let opts = GenerationOptions {
            count: 7,
            batch_size: 3,
            validate_data: false,
            seed: Some("demo".to_string()),
            skip_duplicates: true,
        };
        let json = serde_json::to_string(&opts).unwrap();
        let parsed: GenerationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.count, 7);
        assert_eq!(parsed.seed.as_deref(), Some("demo"));
        assert!(parsed.skip_duplicates);
    }
}
