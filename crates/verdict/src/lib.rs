//! # Verdict
//!
//! Bind HTTP request payloads into typed schemas, validate them and report
//! the outcome in one uniform, client-facing shape.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! #[derive(Debug, Default, Deserialize, Schema)]
//! #[serde(default)]
//! struct Address {
//!     #[validate(required)]
//!     street: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize, Schema, FromBody)]
//! struct Signup {
//!     #[serde(rename = "first_name")]
//!     #[validate(required, length(max = 50))]
//!     name: String,
//!
//!     #[validate(required, dive)]
//!     addresses: Vec<Address>,
//! }
//!
//! impl FieldsOnly for Signup {}
//!
//! async fn create(binder: &Binder, mut req: Request) -> Response {
//!     match binder.json::<Signup>(&Context::background(), &mut req).await {
//!         Ok(_signup) => StatusCode::NO_CONTENT.into_response(),
//!         Err(rejection) => rejection.into_response(),
//!     }
//! }
//! ```
//!
//! A missing street is reported as:
//!
//! ```json
//! {
//!   "success": false,
//!   "field_errors": [{"field": "addresses[0].street", "code": "required"}],
//!   "schema_errors": []
//! }
//! ```
//!
//! ## Pipeline
//!
//! Binding decodes into the value you pass in: body members and query
//! parameters that are present are assigned, everything else keeps its
//! value.
//!
//! [`Binder`] runs bind, field validation and custom validation
//! ([`Validatable`]) in that order and stops at the first stage that fails.
//! Malformed input becomes a `malformed` schema error; rule violations become
//! field errors coded with the rule's tag; only custom validation can return
//! an unexpected error ([`BoxError`]).

// Re-export core functionality
pub use verdict_core::*;

// Re-export validation
pub use verdict_validate::{
    rules, translate, ErrorCode, FieldCheck, FieldError, FieldName, NamePolicy, RuleError, Schema,
    SchemaError, UnknownNamePolicy, ValidationResult, Validator, Violation, Violations, Walker,
};

// Re-export macros
pub use verdict_macros::*;

// Re-exported so `#[async_trait]` impls of `Validatable` need no extra dependency.
pub use async_trait::async_trait;

/// Prelude module - import everything you need with `use verdict::prelude::*`
pub mod prelude {
    pub use crate::render;
    pub use verdict_core::{
        Binder, BinderConfig, BoxError, Context, FieldsOnly, FromBody, FromQuery, IntoResponse,
        Rejection, Request, Response, StatusCode, Validatable,
    };
    pub use verdict_macros::{FromBody, FromQuery, Schema};
    pub use verdict_validate::{
        ErrorCode, FieldError, NamePolicy, Schema, SchemaError, ValidationResult,
    };

    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, trace, warn};
}
