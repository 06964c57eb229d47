//! Caller-declared weighted categorical distributions.

use crate::rng::SeededRng;
use thiserror::Error;

/// Error type for distribution construction.
#[derive(Debug, Error, PartialEq)]
pub enum DistributionError {
    /// A distribution needs at least one category
    #[error("distribution has no categories")]
    Empty,

    /// Every weight must lie in [0, 1]
    #[error("weight {weight} for category index {index} is outside [0, 1]")]
    InvalidWeight { index: usize, weight: f64 },

    /// Weights must sum to 1.0
    #[error("weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },
}

/// Tolerance for the weights-sum-to-one check.
const SUM_TOLERANCE: f64 = 1e-6;

/// A probability distribution over a finite category set.
///
/// Weights are enforced at construction: each must lie in `[0, 1]` and they
/// must sum to 1.0 within a small tolerance. This is a hard constraint, not
/// a hint. Sampling walks the cumulative weights against a single
/// `next_float` draw (inverse CDF), so a category's aggregate frequency
/// over a large sample honors its declared weight.
#[derive(Debug, Clone)]
pub struct Distribution<C> {
    entries: Vec<(C, f64)>,
}

impl<C> Distribution<C> {
    /// Build a distribution from `(category, weight)` pairs.
    pub fn new(entries: Vec<(C, f64)>) -> Result<Self, DistributionError> {
        if entries.is_empty() {
            return Err(DistributionError::Empty);
        }
        for (index, (_, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                return Err(DistributionError::InvalidWeight {
                    index,
                    weight: *weight,
                });
            }
        }
        let sum: f64 = entries.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DistributionError::WeightSum { sum });
        }
        Ok(Self { entries })
    }

    /// Build a uniform distribution over `categories`.
    pub fn uniform(categories: Vec<C>) -> Result<Self, DistributionError> {
        if categories.is_empty() {
            return Err(DistributionError::Empty);
        }
        let weight = 1.0 / categories.len() as f64;
        Ok(Self {
            entries: categories.into_iter().map(|c| (c, weight)).collect(),
        })
    }

    /// Sample one category by inverse-CDF walk.
    pub fn sample(&self, rng: &mut SeededRng) -> &C {
        let draw = rng.next_float();
        let mut cumulative = 0.0;
        for (category, weight) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                return category;
            }
        }
        // Rounding can leave the cumulative sum a hair under 1.0.
        &self.entries[self.entries.len() - 1].0
    }

    /// The declared categories, in order.
    pub fn categories(&self) -> impl Iterator<Item = &C> {
        self.entries.iter().map(|(c, _)| c)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution has no categories (never true post-construction).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
