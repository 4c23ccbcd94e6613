//! The bind-and-validate pipeline
//!
//! Every request goes through up to three stages, in this order:
//!
//! 1. **Bind** - decode the JSON body (or the query string) into the schema.
//! 2. **Field validation** - run the schema's declarative rules.
//! 3. **Custom validation** - run [`Validatable::validate`].
//!
//! The first unsuccessful stage ends the pipeline; later stages never run.
//! Errors are only accumulated within a stage.
//!
//! ```rust,ignore
//! let binder = Binder::new(BinderConfig::from_env()?);
//!
//! // Either drive the stages yourself...
//! let mut signup = Signup::default();
//! let result = binder.bind_and_validate(&ctx, &mut req, &mut signup).await?;
//!
//! // ...or extract a validated value.
//! let signup: Signup = binder.json(&ctx, &mut req).await?;
//! ```

use crate::body::{BodyFields, FromBody};
use crate::config::BinderConfig;
use crate::context::Context;
use crate::query::{FromQuery, QueryError, QueryParams};
use crate::rejection::Rejection;
use crate::request::Request;
use crate::validatable::{BoxError, Validatable};
use tracing::{debug, trace};
use verdict_validate::{
    translate, ErrorCode, FieldError, Schema, SchemaError, ValidationResult, Validator,
};

/// Runs the pipeline with one immutable configuration.
///
/// Cheap to copy; build it once at startup and share it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder {
    config: BinderConfig,
    validator: Validator,
}

impl Binder {
    pub fn new(config: BinderConfig) -> Self {
        Self {
            config,
            validator: Validator::new(config.name_policy),
        }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Decode the JSON body into `target`.
    ///
    /// Only the members present in the body are assigned; every other field
    /// of `target`, including fields skipped for deserialization, keeps its
    /// value. A body that is missing, too large, not a JSON object or has a
    /// member that does not fit its field yields a schema failure with a
    /// single `malformed` error, and `target` is left unchanged.
    pub fn bind<T>(&self, req: &mut Request, target: &mut T) -> ValidationResult
    where
        T: FromBody,
    {
        let Some(body) = req.take_body() else {
            debug!(path = %req.path(), "request body already consumed");
            return ValidationResult::schema_failure([SchemaError::malformed()
                .with_message("request body already consumed")]);
        };

        if body.len() > self.config.body_limit {
            debug!(
                path = %req.path(),
                size = body.len(),
                limit = self.config.body_limit,
                "request body too large"
            );
            return ValidationResult::schema_failure([SchemaError::malformed().with_message(
                format!("request body exceeds {} bytes", self.config.body_limit),
            )]);
        }

        let decoded = BodyFields::parse(&body).and_then(|mut fields| {
            target.decode_body(&mut fields)?;
            if !fields.is_empty() {
                trace!(path = %req.path(), ignored = fields.len(), "unknown body members ignored");
            }
            Ok(())
        });

        match decoded {
            Ok(()) => {
                trace!(path = %req.path(), "request body bound");
                ValidationResult::success()
            }
            Err(e) => {
                debug!(path = %req.path(), error = %e, "malformed request body");
                ValidationResult::malformed()
            }
        }
    }

    /// Decode the query string into `target`.
    ///
    /// Each parameter that fails to convert yields a field error named after
    /// the parameter with code `malformed`; all such errors are reported
    /// together. Parameters that did convert are applied even then. A query
    /// string that cannot be decoded at all is a `malformed` schema failure.
    pub fn bind_query<T>(&self, req: &Request, target: &mut T) -> ValidationResult
    where
        T: FromQuery,
    {
        let decoded = QueryParams::parse(req.query_string().unwrap_or_default())
            .and_then(|params| target.decode_query(&params));

        match decoded {
            Ok(()) => {
                trace!(path = %req.path(), "query bound");
                ValidationResult::success()
            }
            Err(QueryError::Conversion(errors)) => {
                debug!(
                    path = %req.path(),
                    count = errors.len(),
                    "query parameters failed to convert"
                );
                ValidationResult::fields_failure(
                    errors
                        .into_iter()
                        .map(|e| FieldError::coded(e.key, ErrorCode::MALFORMED)),
                )
            }
            Err(QueryError::Malformed(message)) => {
                debug!(path = %req.path(), error = %message, "malformed query string");
                ValidationResult::malformed()
            }
        }
    }

    /// Run the schema's declarative field rules.
    pub fn validate_fields<S: Schema>(&self, schema: &S) -> ValidationResult {
        match self.validator.validate(schema) {
            Ok(()) => {
                trace!(schema = S::schema_name(), "field validation passed");
                ValidationResult::success()
            }
            Err(violations) => {
                for violation in &violations {
                    debug!(
                        namespace = violation.namespace(),
                        tag = violation.tag(),
                        message = violation.message(),
                        params = ?violation.params(),
                        "rule violated"
                    );
                }
                let result = translate::fields_failure(&violations);
                debug!(
                    schema = S::schema_name(),
                    count = violations.len(),
                    codes = ?result.codes().map(ErrorCode::as_str).collect::<Vec<_>>(),
                    "field validation failed"
                );
                result
            }
        }
    }

    /// Field rules, then custom validation if they passed.
    ///
    /// A custom step's outcome, including an unexpected error, is returned
    /// as is.
    pub async fn validate<V: Validatable>(
        &self,
        ctx: &Context,
        schema: &V,
    ) -> Result<ValidationResult, BoxError> {
        let fields = self.validate_fields(schema);
        if !fields.is_success() {
            return Ok(fields);
        }

        let outcome = Validatable::validate(schema, ctx).await;
        match &outcome {
            Ok(result) if result.is_success() => {
                trace!(schema = V::schema_name(), "custom validation passed")
            }
            Ok(result) => debug!(
                schema = V::schema_name(),
                field_errors = result.field_errors().len(),
                schema_errors = result.schema_errors().len(),
                "custom validation failed"
            ),
            Err(e) => debug!(schema = V::schema_name(), error = %e, "custom validation errored"),
        }
        outcome
    }

    /// [`bind`](Self::bind) then [`validate`](Self::validate).
    pub async fn bind_and_validate<V>(
        &self,
        ctx: &Context,
        req: &mut Request,
        schema: &mut V,
    ) -> Result<ValidationResult, BoxError>
    where
        V: Validatable + FromBody,
    {
        let bound = self.bind(req, schema);
        if !bound.is_success() {
            return Ok(bound);
        }
        self.validate(ctx, schema).await
    }

    /// [`bind_query`](Self::bind_query) then [`validate`](Self::validate).
    pub async fn bind_query_and_validate<V>(
        &self,
        ctx: &Context,
        req: &Request,
        schema: &mut V,
    ) -> Result<ValidationResult, BoxError>
    where
        V: Validatable + FromQuery,
    {
        let bound = self.bind_query(req, schema);
        if !bound.is_success() {
            return Ok(bound);
        }
        self.validate(ctx, schema).await
    }

    /// Extract a validated `T` from the JSON body.
    ///
    /// Starts from `T::default()` and runs the full pipeline.
    pub async fn json<T>(&self, ctx: &Context, req: &mut Request) -> Result<T, Rejection>
    where
        T: Validatable + FromBody + Default,
    {
        let mut value = T::default();
        let result = self.bind_and_validate(ctx, req, &mut value).await?;
        finish(value, result)
    }

    /// Extract a validated `T` from the query string.
    pub async fn query<T>(&self, ctx: &Context, req: &Request) -> Result<T, Rejection>
    where
        T: Validatable + FromQuery + Default,
    {
        let mut value = T::default();
        let result = self.bind_query_and_validate(ctx, req, &mut value).await?;
        finish(value, result)
    }
}

fn finish<T>(value: T, result: ValidationResult) -> Result<T, Rejection> {
    if result.is_success() {
        Ok(value)
    } else {
        Err(Rejection::Invalid(result))
    }
}
