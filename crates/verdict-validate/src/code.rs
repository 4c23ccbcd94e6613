//! Stable, client-parsable error codes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Machine-readable discriminator attached to field and schema errors.
///
/// The well-known codes are exposed as associated constants, but the set is
/// open: custom validators and rule tags (e.g. `max`) produce codes of their
/// own. Serializes as a bare string.
///
/// ```rust
/// use verdict_validate::ErrorCode;
///
/// assert_eq!(ErrorCode::REQUIRED, "required");
/// assert_eq!(ErrorCode::new("max").as_str(), "max");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(Cow<'static, str>);

impl ErrorCode {
    /// A required value was missing or empty.
    pub const REQUIRED: ErrorCode = ErrorCode::from_static("required");
    /// A value that must be unique already exists.
    pub const NOT_UNIQUE: ErrorCode = ErrorCode::from_static("not_unique");
    /// Input could not be decoded or converted.
    pub const MALFORMED: ErrorCode = ErrorCode::from_static("malformed");
    /// A referenced resource does not exist.
    pub const NOT_FOUND: ErrorCode = ErrorCode::from_static("not_found");

    /// Create a code from a static string without allocating.
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Create a code from any string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ErrorCode {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl AsRef<str> for ErrorCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ErrorCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ErrorCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_codes() {
        let cases = [
            (ErrorCode::REQUIRED, "required"),
            (ErrorCode::NOT_UNIQUE, "not_unique"),
            (ErrorCode::MALFORMED, "malformed"),
            (ErrorCode::NOT_FOUND, "not_found"),
        ];

        for (code, expected) in cases {
            assert_eq!(code.as_str(), expected);
        }
    }

    #[test]
    fn owned_and_static_codes_compare_equal() {
        assert_eq!(ErrorCode::new("required"), ErrorCode::REQUIRED);
        assert_eq!(ErrorCode::from("max"), ErrorCode::new(String::from("max")));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ErrorCode::MALFORMED).unwrap();
        assert_eq!(json, "\"malformed\"");

        let code: ErrorCode = serde_json::from_str("\"not_found\"").unwrap();
        assert_eq!(code, ErrorCode::NOT_FOUND);
    }
}
