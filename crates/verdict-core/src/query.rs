//! Query string decoding
//!
//! [`QueryParams`] holds the parsed parameters in request order.
//! [`FromQuery`] (usually derived) assigns them into a pre-allocated target
//! through [`FromParam`], collecting one [`ConversionError`] per parameter
//! that fails to convert.
//!
//! ```rust,ignore
//! #[derive(Default, FromQuery)]
//! struct Pagination {
//!     page_number: i64,
//!     tags: Vec<String>,
//! }
//!
//! let params = QueryParams::parse("page_number=2&tags=a&tags=b")?;
//! let mut page = Pagination::default();
//! page.decode_query(&params)?;
//! ```

use std::fmt;
use thiserror::Error;

/// Parsed query parameters, in the order they appear in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    ///
    /// Percent-encoding and `+` are decoded. A query that cannot be decoded
    /// is reported as [`QueryError::Malformed`].
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map_err(|e| QueryError::Malformed(e.to_string()))?;
        Ok(Self { pairs })
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Convert the values for `key` into `slot`.
    ///
    /// Leaves `slot` untouched when `key` is absent or conversion fails; a
    /// failure is pushed onto `errors`.
    pub fn assign<T: FromParam>(&self, key: &str, slot: &mut T, errors: &mut Vec<ConversionError>) {
        let values = self.get_all(key);
        if values.is_empty() {
            return;
        }
        match T::from_params(&values) {
            Ok(value) => *slot = value,
            Err(message) => errors.push(ConversionError::new(key, message)),
        }
    }
}

/// A single query parameter that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    pub key: String,
    pub message: String,
}

impl ConversionError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Query decoding failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query string itself could not be decoded.
    #[error("malformed query string: {0}")]
    Malformed(String),

    /// One or more parameters failed to convert.
    #[error("{} query parameter(s) failed to convert", .0.len())]
    Conversion(Vec<ConversionError>),
}

impl QueryError {
    /// `Ok(())` when nothing failed, otherwise [`QueryError::Conversion`].
    pub fn from_conversions(errors: Vec<ConversionError>) -> Result<(), QueryError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(QueryError::Conversion(errors))
        }
    }
}

/// Conversion from the raw values of one query parameter.
///
/// `values` is never empty. Scalars use the first value; `Vec<T>` converts
/// every value.
pub trait FromParam: Sized {
    fn from_params(values: &[&str]) -> Result<Self, String>;
}

macro_rules! from_param_via_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromParam for $t {
                fn from_params(values: &[&str]) -> Result<Self, String> {
                    let raw = values.first().copied().unwrap_or_default();
                    raw.parse::<$t>().map_err(|e| format!("invalid value `{raw}`: {e}"))
                }
            }
        )*
    };
}

from_param_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl FromParam for String {
    fn from_params(values: &[&str]) -> Result<Self, String> {
        Ok(values.first().copied().unwrap_or_default().to_string())
    }
}

impl<T: FromParam> FromParam for Option<T> {
    fn from_params(values: &[&str]) -> Result<Self, String> {
        T::from_params(values).map(Some)
    }
}

impl<T: FromParam> FromParam for Vec<T> {
    fn from_params(values: &[&str]) -> Result<Self, String> {
        values
            .iter()
            .map(|value| T::from_params(std::slice::from_ref(value)))
            .collect()
    }
}

/// Types that can be populated from query parameters.
///
/// Usually derived with `#[derive(FromQuery)]`, which looks each field up by
/// its serde name.
pub trait FromQuery {
    /// Assign every present parameter into `self`.
    ///
    /// Conversion failures are accumulated across fields. Fields that did
    /// convert are applied even when others fail.
    fn decode_query(&mut self, params: &QueryParams) -> Result<(), QueryError>;
}
