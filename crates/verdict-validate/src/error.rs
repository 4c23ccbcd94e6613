//! Error types produced by the structural validation engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Error from a single validation rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleError {
    /// The rule tag (e.g. "required", "max")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Rule parameters, e.g. the violated bound
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl RuleError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a parameter. Values that fail to serialize are dropped.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RuleError {}

/// A rule failure located within a schema.
///
/// The namespace starts with the schema's root name and continues through
/// nested structs and collection indices, e.g. `Signup.addresses[0].street`.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub(crate) namespace: String,
    pub(crate) error: RuleError,
}

impl Violation {
    pub fn new(namespace: impl Into<String>, error: RuleError) -> Self {
        Self {
            namespace: namespace.into(),
            error,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The violated rule's tag.
    pub fn tag(&self) -> &str {
        &self.error.code
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }

    pub fn params(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.error.params
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.namespace, self.error)
    }
}

/// Every violation found by one validation run, in traversal order.
#[derive(Debug, Clone, PartialEq, Default, thiserror::Error)]
#[error("structural validation failed: {} violation(s)", .0.len())]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_error_params() {
        let error = RuleError::new("max", "Value must be at most 2")
            .param("max", 2.0)
            .param("actual", 3.0);

        assert_eq!(error.code, "max");
        assert_eq!(error.params["max"], serde_json::json!(2.0));
        assert_eq!(error.to_string(), "[max] Value must be at most 2");
    }

    #[test]
    fn violation_display_includes_namespace() {
        let violation = Violation::new(
            "Signup.first_name",
            RuleError::new("required", "This field is required"),
        );
        assert_eq!(violation.tag(), "required");
        assert_eq!(
            violation.to_string(),
            "Signup.first_name: [required] This field is required"
        );
    }

    #[test]
    fn violations_display_counts() {
        let violations = Violations::new(vec![
            Violation::new("A.x", RuleError::new("required", "missing")),
            Violation::new("A.y", RuleError::new("max", "too big")),
        ]);
        assert_eq!(
            violations.to_string(),
            "structural validation failed: 2 violation(s)"
        );
    }
}
