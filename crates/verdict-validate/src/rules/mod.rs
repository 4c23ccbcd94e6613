//! Declarative field rules.
//!
//! Each rule validates a single value and reports a [`RuleError`] whose code
//! is the rule's tag. Which values a rule accepts is decided by the
//! capability traits in this module rather than by concrete types.

mod builtin;
mod capability;

pub use builtin::*;
pub use capability::{Length, Measure, Presence, Text};

use crate::error::RuleError;
use std::fmt::Debug;

/// Trait for individual validation rules.
///
/// ## Example
///
/// ```rust
/// use verdict_validate::rules::ValidationRule;
/// use verdict_validate::RuleError;
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl ValidationRule<i64> for Even {
///     fn validate(&self, value: &i64) -> Result<(), RuleError> {
///         if value % 2 == 0 {
///             Ok(())
///         } else {
///             Err(RuleError::new("even", "Value must be even"))
///         }
///     }
/// }
///
/// assert!(Even.validate(&4).is_ok());
/// ```
pub trait ValidationRule<T: ?Sized>: Debug + Send + Sync {
    /// Validate the value against this rule.
    fn validate(&self, value: &T) -> Result<(), RuleError>;
}
