//! The validation outcome model.
//!
//! A [`ValidationResult`] is what every stage of the bind-and-validate
//! pipeline hands back. It serializes to the wire format clients consume:
//!
//! ```json
//! {
//!   "success": false,
//!   "field_errors": [{"field": "addresses[0].street", "code": "required"}],
//!   "schema_errors": []
//! }
//! ```

use crate::code::ErrorCode;
use serde::{Deserialize, Serialize};

/// A failure scoped to exactly one addressable field.
///
/// `field` is the externally visible name, using dotted/bracketed notation
/// for nested paths such as `addresses[0].street`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldError {
    /// Create a field error with neither code nor message.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: None,
            message: None,
        }
    }

    /// Create a field error carrying a code.
    pub fn coded(field: impl Into<String>, code: impl Into<ErrorCode>) -> Self {
        Self::new(field).with_code(code)
    }

    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A failure scoped to the whole schema or to several fields jointly.
///
/// Also used for failures that happen before any field could be examined,
/// such as a body that is not valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaError {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SchemaError {
    pub fn new() -> Self {
        Self::default()
    }

    /// A schema error with the `malformed` code and nothing else.
    pub fn malformed() -> Self {
        Self::new().with_code(ErrorCode::MALFORMED)
    }

    /// Name the fields that jointly caused this error.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Outcome of decoding and validating a request payload.
///
/// Built through [`success`](Self::success),
/// [`fields_failure`](Self::fields_failure) or
/// [`schema_failure`](Self::schema_failure) and never mutated afterwards.
/// The constructors do not inspect their arguments: an empty
/// `fields_failure` yields an unsuccessful result with no errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    success: bool,
    #[serde(default)]
    field_errors: Vec<FieldError>,
    #[serde(default)]
    schema_errors: Vec<SchemaError>,
}

impl ValidationResult {
    /// A successful result with no errors.
    pub fn success() -> Self {
        Self {
            success: true,
            field_errors: Vec::new(),
            schema_errors: Vec::new(),
        }
    }

    /// A failed result carrying field errors in the given order.
    pub fn fields_failure(errors: impl IntoIterator<Item = FieldError>) -> Self {
        Self {
            success: false,
            field_errors: errors.into_iter().collect(),
            schema_errors: Vec::new(),
        }
    }

    /// A failed result carrying schema errors in the given order.
    pub fn schema_failure(errors: impl IntoIterator<Item = SchemaError>) -> Self {
        Self {
            success: false,
            field_errors: Vec::new(),
            schema_errors: errors.into_iter().collect(),
        }
    }

    /// Shortcut for a schema failure with a single `malformed` error.
    pub fn malformed() -> Self {
        Self::schema_failure([SchemaError::malformed()])
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn schema_errors(&self) -> &[SchemaError] {
        &self.schema_errors
    }

    /// Codes of every error in this result, field errors first.
    pub fn codes(&self) -> impl Iterator<Item = &ErrorCode> {
        self.field_errors
            .iter()
            .filter_map(|e| e.code.as_ref())
            .chain(self.schema_errors.iter().filter_map(|e| e.code.as_ref()))
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
