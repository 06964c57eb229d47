//! The validation and sanitization contract.

use serde::{Deserialize, Serialize};

/// Outcome of validating one entity.
///
/// Errors reject the entity; warnings flag best-effort plausibility issues
/// without rejecting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no rule was violated.
    pub is_valid: bool,

    /// One message per violated rule.
    pub errors: Vec<String>,

    /// Non-fatal plausibility findings.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no findings.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a violated rule, marking the result invalid.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    /// Record a non-fatal finding.
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Business-rule contract for one entity type, independent of how the
/// entity was produced.
///
/// Both operations are pure: `validate` never panics on malformed input
/// (it returns structured findings instead), and `sanitize` is an
/// idempotent normalization (trim, case-fold, clamp) applied to items
/// destined for a result's `data`.
pub trait EntityValidator<T> {
    /// Check the entity against every rule, collecting all findings.
    fn validate(&self, entity: &T) -> ValidationResult;

    /// Normalize an accepted entity. Default is the identity.
    fn sanitize(&self, entity: T) -> T {
        entity
    }
}
