//! The structural validation engine.
//!
//! A [`Schema`] describes its fields through a static name table and walks
//! them in declaration order, running each field's rules through a
//! [`Walker`]. The [`Validator`] owns the naming policy and collects the
//! resulting [`Violations`].
//!
//! Within a field, rules run in the order they are declared and the first
//! failure ends that field: each field reports at most one violation.
//! Nested structs and collection elements are walked depth-first.

use crate::error::{Violation, Violations};
use crate::name::{FieldName, NamePolicy};
use crate::rules::ValidationRule;

/// A struct whose fields can be structurally validated.
///
/// Usually derived with `#[derive(Schema)]`, but the table is simple enough
/// to write by hand:
///
/// ```rust
/// use verdict_validate::{FieldName, Schema, Validator, Walker};
/// use verdict_validate::rules::RequiredRule;
///
/// struct Signup {
///     name: String,
/// }
///
/// impl Schema for Signup {
///     fn schema_name() -> &'static str {
///         "Signup"
///     }
///
///     fn field_names() -> &'static [FieldName] {
///         const FIELDS: &[FieldName] = &[FieldName::renamed("name", "first_name")];
///         FIELDS
///     }
///
///     fn check_fields(&self, walker: &mut Walker<'_>) {
///         let fields = Self::field_names();
///         walker.field(&fields[0]).rule(&self.name, &RequiredRule::new());
///     }
/// }
///
/// let violations = Validator::default()
///     .validate(&Signup { name: String::new() })
///     .unwrap_err();
/// assert_eq!(violations.as_slice()[0].namespace(), "Signup.first_name");
/// ```
pub trait Schema {
    /// Root segment of every namespace reported for this schema.
    fn schema_name() -> &'static str;

    /// The static name table, in declaration order.
    fn field_names() -> &'static [FieldName];

    /// Run the declared rules of every field.
    fn check_fields(&self, walker: &mut Walker<'_>);
}

/// Cursor over one struct level during a validation run.
pub struct Walker<'a> {
    policy: NamePolicy,
    namespace: String,
    violations: &'a mut Vec<Violation>,
}

impl<'a> Walker<'a> {
    fn new(policy: NamePolicy, namespace: String, violations: &'a mut Vec<Violation>) -> Self {
        Self {
            policy,
            namespace,
            violations,
        }
    }

    /// Begin checking one field of the current struct.
    pub fn field(&mut self, name: &FieldName) -> FieldCheck<'_> {
        let segment = self.policy.resolve(name);
        FieldCheck {
            policy: self.policy,
            namespace: format!("{}.{}", self.namespace, segment),
            violations: &mut *self.violations,
            failed: false,
        }
    }
}

/// Rule runner for a single field.
pub struct FieldCheck<'w> {
    policy: NamePolicy,
    namespace: String,
    violations: &'w mut Vec<Violation>,
    failed: bool,
}

impl FieldCheck<'_> {
    /// Run a rule unless an earlier rule on this field already failed.
    pub fn rule<T, R>(&mut self, value: &T, rule: &R) -> &mut Self
    where
        T: ?Sized,
        R: ValidationRule<T>,
    {
        if self.failed {
            return self;
        }
        if let Err(error) = rule.validate(value) {
            self.failed = true;
            self.violations
                .push(Violation::new(self.namespace.clone(), error));
        }
        self
    }

    /// Walk a nested struct under this field's namespace.
    pub fn nested<S: Schema>(&mut self, value: &S) -> &mut Self {
        if self.failed {
            return self;
        }
        let mut walker = Walker::new(self.policy, self.namespace.clone(), &mut *self.violations);
        value.check_fields(&mut walker);
        self
    }

    /// Walk every element of a collection, naming each `field[idx]`.
    pub fn dive<'v, S, I>(&mut self, items: I) -> &mut Self
    where
        S: Schema + 'v,
        I: IntoIterator<Item = &'v S>,
    {
        if self.failed {
            return self;
        }
        for (idx, item) in items.into_iter().enumerate() {
            let namespace = format!("{}[{}]", self.namespace, idx);
            let mut walker = Walker::new(self.policy, namespace, &mut *self.violations);
            item.check_fields(&mut walker);
        }
        self
    }
}

/// The configured structural validation engine.
///
/// Immutable once built; copy it into every component that validates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    policy: NamePolicy,
}

impl Validator {
    pub fn new(policy: NamePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// Validate every declared rule of `value`.
    pub fn validate<S: Schema>(&self, value: &S) -> Result<(), Violations> {
        let mut violations = Vec::new();
        let mut walker = Walker::new(self.policy, S::schema_name().to_string(), &mut violations);
        value.check_fields(&mut walker);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations::new(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MaxRule, RequiredRule};

    struct Address {
        street: String,
    }

    impl Schema for Address {
        fn schema_name() -> &'static str {
            "Address"
        }

        fn field_names() -> &'static [FieldName] {
            const FIELDS: &[FieldName] = &[FieldName::new("street")];
            FIELDS
        }

        fn check_fields(&self, walker: &mut Walker<'_>) {
            let fields = Self::field_names();
            walker.field(&fields[0]).rule(&self.street, &RequiredRule::new());
        }
    }

    struct Person {
        name: String,
        age: u32,
        secret: String,
        home: Address,
        addresses: Vec<Address>,
    }

    impl Schema for Person {
        fn schema_name() -> &'static str {
            "Person"
        }

        fn field_names() -> &'static [FieldName] {
            const FIELDS: &[FieldName] = &[
                FieldName::renamed("name", "first_name"),
                FieldName::new("age"),
                FieldName::hidden("secret"),
                FieldName::new("home"),
                FieldName::new("addresses"),
            ];
            FIELDS
        }

        fn check_fields(&self, walker: &mut Walker<'_>) {
            let fields = Self::field_names();
            walker.field(&fields[0]).rule(&self.name, &RequiredRule::new());
            walker
                .field(&fields[1])
                .rule(&self.age, &RequiredRule::new())
                .rule(&self.age, &MaxRule::new(150.0));
            walker.field(&fields[2]).rule(&self.secret, &RequiredRule::new());
            walker.field(&fields[3]).nested(&self.home);
            walker
                .field(&fields[4])
                .rule(&self.addresses, &RequiredRule::new())
                .dive(&self.addresses);
        }
    }

    fn person() -> Person {
        Person {
            name: "Ada".into(),
            age: 36,
            secret: "x".into(),
            home: Address {
                street: "Main".into(),
            },
            addresses: vec![Address {
                street: "Elm".into(),
            }],
        }
    }

    fn namespaces(violations: &Violations) -> Vec<(&str, &str)> {
        violations.iter().map(|v| (v.namespace(), v.tag())).collect()
    }

    #[test]
    fn valid_struct_passes() {
        assert!(Validator::default().validate(&person()).is_ok());
    }

    #[test]
    fn reports_in_declaration_order_depth_first() {
        let mut p = person();
        p.name.clear();
        p.age = 200;
        p.home.street.clear();
        p.addresses.push(Address {
            street: String::new(),
        });

        let violations = Validator::default().validate(&p).unwrap_err();
        assert_eq!(
            namespaces(&violations),
            [
                ("Person.first_name", "required"),
                ("Person.age", "max"),
                ("Person.home.street", "required"),
                ("Person.addresses[1].street", "required"),
            ]
        );
    }

    #[test]
    fn first_failing_rule_ends_the_field() {
        let mut p = person();
        p.age = 0;
        let violations = Validator::default().validate(&p).unwrap_err();
        assert_eq!(namespaces(&violations), [("Person.age", "required")]);
    }

    #[test]
    fn failed_collection_rule_skips_dive() {
        let mut p = person();
        p.addresses.clear();
        let violations = Validator::default().validate(&p).unwrap_err();
        assert_eq!(namespaces(&violations), [("Person.addresses", "required")]);
    }

    #[test]
    fn hidden_field_contributes_empty_segment() {
        let mut p = person();
        p.secret.clear();
        let violations = Validator::default().validate(&p).unwrap_err();
        assert_eq!(namespaces(&violations), [("Person.", "required")]);
    }

    #[test]
    fn ident_policy_uses_field_identifiers() {
        let mut p = person();
        p.name.clear();
        p.secret.clear();
        let violations = Validator::new(NamePolicy::Ident).validate(&p).unwrap_err();
        assert_eq!(
            namespaces(&violations),
            [("Person.name", "required"), ("Person.secret", "required")]
        );
    }
}
