//! Field naming: the static name table and the policy that resolves it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of a schema's static name table.
///
/// Maps the internal field identifier to the name the field carries on the
/// wire. `serialized` is `None` when the field is hidden from serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldName {
    pub ident: &'static str,
    pub serialized: Option<&'static str>,
}

impl FieldName {
    /// A field serialized under its own identifier.
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            serialized: Some(ident),
        }
    }

    /// A field serialized under a different name.
    pub const fn renamed(ident: &'static str, serialized: &'static str) -> Self {
        Self {
            ident,
            serialized: Some(serialized),
        }
    }

    /// A field excluded from serialization.
    pub const fn hidden(ident: &'static str) -> Self {
        Self {
            ident,
            serialized: None,
        }
    }
}

/// How namespace segments are named when reporting violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Use the serialization name; hidden fields resolve to an empty string.
    #[default]
    Serde,
    /// Use the internal field identifier.
    Ident,
}

impl NamePolicy {
    pub fn resolve(self, name: &FieldName) -> &'static str {
        match self {
            NamePolicy::Serde => name.serialized.unwrap_or(""),
            NamePolicy::Ident => name.ident,
        }
    }
}

impl fmt::Display for NamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePolicy::Serde => f.write_str("serde"),
            NamePolicy::Ident => f.write_str("ident"),
        }
    }
}

/// Error returned when parsing an unknown [`NamePolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name policy `{0}`, expected `serde` or `ident`")]
pub struct UnknownNamePolicy(pub String);

impl FromStr for NamePolicy {
    type Err = UnknownNamePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serde" | "json" => Ok(NamePolicy::Serde),
            "ident" | "field" => Ok(NamePolicy::Ident),
            _ => Err(UnknownNamePolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_policy_prefers_serialized_name() {
        let name = FieldName::renamed("name", "first_name");
        assert_eq!(NamePolicy::Serde.resolve(&name), "first_name");
        assert_eq!(NamePolicy::Ident.resolve(&name), "name");
    }

    #[test]
    fn hidden_field_resolves_to_empty_segment() {
        let name = FieldName::hidden("secret");
        assert_eq!(NamePolicy::Serde.resolve(&name), "");
        assert_eq!(NamePolicy::Ident.resolve(&name), "secret");
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("serde".parse::<NamePolicy>().unwrap(), NamePolicy::Serde);
        assert_eq!(" Ident ".parse::<NamePolicy>().unwrap(), NamePolicy::Ident);
        assert!("reflect".parse::<NamePolicy>().is_err());
    }
}
