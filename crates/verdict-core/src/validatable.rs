//! The custom validation capability.

use crate::context::Context;
use async_trait::async_trait;
use verdict_validate::{Schema, ValidationResult};

/// Error type for failures custom validation cannot classify, such as a
/// dependency being unavailable. Callers treat it as a server fault.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Schemas that run validation beyond their declarative field rules.
///
/// Custom validation only runs after structural validation succeeded. The
/// returned [`ValidationResult`] is the client-facing outcome; `Err` is
/// reserved for unexpected failures.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl Validatable for Signup {
///     async fn validate(&self, ctx: &Context) -> Result<ValidationResult, BoxError> {
///         if self.users.email_taken(ctx, &self.email).await? {
///             return Ok(ValidationResult::fields_failure([
///                 FieldError::coded("email", ErrorCode::NOT_UNIQUE),
///             ]));
///         }
///         Ok(ValidationResult::success())
///     }
/// }
/// ```
#[async_trait]
pub trait Validatable: Schema + Send + Sync {
    async fn validate(&self, ctx: &Context) -> Result<ValidationResult, BoxError>;
}

/// Opt into [`Validatable`] with a custom step that always succeeds.
///
/// For schemas whose field rules say everything there is to say:
///
/// ```rust,ignore
/// #[derive(Deserialize, Schema)]
/// struct Pagination { /* ... */ }
///
/// impl FieldsOnly for Pagination {}
/// ```
pub trait FieldsOnly: Schema + Send + Sync {}

#[async_trait]
impl<T: FieldsOnly> Validatable for T {
    async fn validate(&self, _ctx: &Context) -> Result<ValidationResult, BoxError> {
        Ok(ValidationResult::success())
    }
}
