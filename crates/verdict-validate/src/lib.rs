//! # Verdict Validation
//!
//! The validation outcome model and the structural validation engine used
//! by Verdict.
//!
//! - [`ValidationResult`], [`FieldError`], [`SchemaError`] and
//!   [`ErrorCode`] form the uniform, serializable outcome every pipeline
//!   stage returns.
//! - [`Schema`], [`Walker`] and [`Validator`] run declarative field rules
//!   (see [`rules`]) and report [`Violations`] with namespaced paths.
//! - [`translate`] turns violations into client-facing field errors.
//!
//! ## Error Format
//!
//! ```json
//! {
//!   "success": false,
//!   "field_errors": [
//!     {"field": "first_name", "code": "required"},
//!     {"field": "addresses[0].street", "code": "required"}
//!   ],
//!   "schema_errors": []
//! }
//! ```

mod code;
mod engine;
mod error;
mod name;
mod result;
pub mod rules;
pub mod translate;

pub use code::ErrorCode;
pub use engine::{FieldCheck, Schema, Validator, Walker};
pub use error::{RuleError, Violation, Violations};
pub use name::{FieldName, NamePolicy, UnknownNamePolicy};
pub use result::{FieldError, SchemaError, ValidationResult};

/// Prelude module for validation
pub mod prelude {
    pub use crate::code::ErrorCode;
    pub use crate::engine::{Schema, Validator};
    pub use crate::result::{FieldError, SchemaError, ValidationResult};
}
