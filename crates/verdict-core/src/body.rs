//! JSON body decoding into an existing value
//!
//! [`BodyFields`] holds the top-level members of a JSON object body.
//! [`FromBody`] (usually derived) takes the members it knows by their serde
//! names and assigns them into a pre-allocated target. Members the body does
//! not mention leave the matching fields as they were, and members the target
//! does not know are ignored.
//!
//! ```rust,ignore
//! #[derive(Default, FromBody)]
//! struct Signup {
//!     #[serde(rename = "first_name")]
//!     name: String,
//!     page_size: u32,
//! }
//!
//! let mut signup = Signup { page_size: 20, ..Default::default() };
//! signup.decode_body(&mut BodyFields::parse(br#"{"first_name": "ada"}"#)?)?;
//! assert_eq!(signup.page_size, 20);
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Top-level members of a JSON object body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyFields {
    members: Map<String, Value>,
}

impl BodyFields {
    /// Parse a request body.
    ///
    /// The body must be a JSON object; `null` is accepted as an object with
    /// no members.
    pub fn parse(body: &[u8]) -> Result<Self, BodyError> {
        match serde_json::from_slice::<Value>(body).map_err(BodyError::Syntax)? {
            Value::Object(members) => Ok(Self { members }),
            Value::Null => Ok(Self::default()),
            _ => Err(BodyError::NotAnObject),
        }
    }

    /// Remove the member `key` and decode it as `T`.
    ///
    /// `Ok(None)` when the body has no such member.
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, BodyError> {
        match self.members.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| BodyError::Field {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Body decoding failure.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("request body is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("request body is not a JSON object")]
    NotAnObject,

    /// A member is present but does not decode into its field's type.
    #[error("field `{key}`: {source}")]
    Field {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Types that can be populated in place from a JSON object body.
///
/// Usually derived with `#[derive(FromBody)]`, which looks each field up by
/// its serde name.
pub trait FromBody {
    /// Assign every member of `body` that `self` knows.
    ///
    /// On error `self` is left as it was.
    fn decode_body(&mut self, body: &mut BodyFields) -> Result<(), BodyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Listing {
        title: String,
        page_size: u32,
        tags: Vec<String>,
    }

    impl FromBody for Listing {
        fn decode_body(&mut self, body: &mut BodyFields) -> Result<(), BodyError> {
            let title = body.take("title")?;
            let page_size = body.take("page_size")?;
            let tags = body.take("tags")?;

            if let Some(title) = title {
                self.title = title;
            }
            if let Some(page_size) = page_size {
                self.page_size = page_size;
            }
            if let Some(tags) = tags {
                self.tags = tags;
            }
            Ok(())
        }
    }

    fn listing() -> Listing {
        Listing {
            title: "quests".into(),
            page_size: 20,
            tags: vec!["open".into()],
        }
    }

    #[test]
    fn present_members_are_assigned() {
        let mut target = listing();
        let mut body = BodyFields::parse(br#"{"title": "grail", "tags": []}"#).unwrap();
        target.decode_body(&mut body).unwrap();

        assert_eq!(
            target,
            Listing {
                title: "grail".into(),
                page_size: 20,
                tags: Vec::new(),
            }
        );
        assert!(body.is_empty());
    }

    #[test]
    fn unknown_members_are_left_over() {
        let mut target = listing();
        let mut body = BodyFields::parse(br#"{"colour": "red"}"#).unwrap();
        target.decode_body(&mut body).unwrap();

        assert_eq!(target, listing());
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn null_body_has_no_members() {
        assert!(BodyFields::parse(b"null").unwrap().is_empty());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(matches!(BodyFields::parse(b"[1, 2]"), Err(BodyError::NotAnObject)));
        assert!(matches!(BodyFields::parse(b"\"ada\""), Err(BodyError::NotAnObject)));
        assert!(matches!(BodyFields::parse(b"{\"title\":"), Err(BodyError::Syntax(_))));
    }

    #[test]
    fn type_mismatch_names_the_member_and_changes_nothing() {
        let mut target = listing();
        let mut body = BodyFields::parse(br#"{"title": "grail", "page_size": "twenty"}"#).unwrap();
        let err = target.decode_body(&mut body).unwrap_err();

        match err {
            BodyError::Field { key, .. } => assert_eq!(key, "page_size"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(target, listing());
    }

    #[test]
    fn duplicate_members_keep_the_last_value() {
        let mut target = listing();
        let mut body = BodyFields::parse(br#"{"page_size": 1, "page_size": 2}"#).unwrap();
        target.decode_body(&mut body).unwrap();
        assert_eq!(target.page_size, 2);
    }
}
