//! Translation of engine violations into client-facing field errors.

use crate::code::ErrorCode;
use crate::error::{Violation, Violations};
use crate::result::{FieldError, ValidationResult};

/// Convert violations into field errors, keeping the engine's order.
///
/// The root segment of each namespace names the top-level schema and is
/// stripped; the remainder is used verbatim as the field. The code is the
/// violated rule's tag. No message is set.
///
/// # Panics
///
/// Panics if a namespace has no segment after the root. The engine always
/// attaches violations to a field, so this only happens for violations
/// constructed by hand.
pub fn field_errors<'a, I>(violations: I) -> Vec<FieldError>
where
    I: IntoIterator<Item = &'a Violation>,
{
    violations
        .into_iter()
        .map(|violation| {
            let field = match violation.namespace().split_once('.') {
                Some((_root, field)) => field,
                None => panic!(
                    "violation namespace `{}` has no field segment",
                    violation.namespace()
                ),
            };
            FieldError::coded(field, ErrorCode::new(violation.tag()))
        })
        .collect()
}

/// Wrap translated violations in a fields failure.
pub fn fields_failure(violations: &Violations) -> ValidationResult {
    ValidationResult::fields_failure(field_errors(violations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;

    fn violation(namespace: &str, tag: &str) -> Violation {
        Violation::new(namespace, RuleError::new(tag, "failed"))
    }

    #[test]
    fn strips_root_segment() {
        let errors = field_errors(&[violation("Signup.first_name", "required")]);
        assert_eq!(errors, [FieldError::coded("first_name", ErrorCode::REQUIRED)]);
    }

    #[test]
    fn keeps_nested_path_verbatim() {
        let errors = field_errors(&[violation("Signup.addresses[0].street", "required")]);
        assert_eq!(errors[0].field, "addresses[0].street");
        assert!(errors[0].message.is_none());
    }

    #[test]
    fn preserves_engine_order() {
        let violations = Violations::new(vec![
            violation("A.zeta", "max"),
            violation("A.alpha", "required"),
        ]);
        let result = fields_failure(&violations);
        let fields: Vec<_> = result.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["zeta", "alpha"]);
        assert_eq!(result.field_errors()[0].code, Some(ErrorCode::new("max")));
    }

    #[test]
    fn hidden_segment_becomes_empty_field() {
        let errors = field_errors(&[violation("A.", "required")]);
        assert_eq!(errors[0].field, "");
    }

    #[test]
    #[should_panic(expected = "has no field segment")]
    fn rootless_namespace_is_a_contract_violation() {
        field_errors(&[violation("A", "required")]);
    }
}
