//! Built-in rules, one per tag.

use super::capability::{Length, Measure, Presence, Text};
use super::ValidationRule;
use crate::error::RuleError;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322, simplified
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern is valid")
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").expect("url pattern is valid")
    })
}

/// Formats a bound without a trailing `.0` for whole numbers.
fn bound(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// `required`: the value must not be its zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredRule {
    pub message: Option<String>,
}

impl RequiredRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl<T: Presence + ?Sized> ValidationRule<T> for RequiredRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        if value.is_present() {
            return Ok(());
        }
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "This field is required".to_string());
        Err(RuleError::new("required", message))
    }
}

/// `min`: value (or length) must be at least `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinRule {
    pub min: f64,
    pub message: Option<String>,
}

impl MinRule {
    pub fn new(min: f64) -> Self {
        Self { min, message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Measure + ?Sized> ValidationRule<T> for MinRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        match value.measure() {
            Some(actual) if actual < self.min => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Must be at least {}", bound(self.min)));
                Err(RuleError::new("min", message)
                    .param("min", self.min)
                    .param("actual", actual))
            }
            _ => Ok(()),
        }
    }
}

/// `max`: value (or length) must be at most `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxRule {
    pub max: f64,
    pub message: Option<String>,
}

impl MaxRule {
    pub fn new(max: f64) -> Self {
        Self { max, message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Measure + ?Sized> ValidationRule<T> for MaxRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        match value.measure() {
            Some(actual) if actual > self.max => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Must be at most {}", bound(self.max)));
                Err(RuleError::new("max", message)
                    .param("max", self.max)
                    .param("actual", actual))
            }
            _ => Ok(()),
        }
    }
}

/// `range`: value must fall within the inclusive bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub message: Option<String>,
}

impl RangeRule {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn error(&self, default: String, actual: f64) -> RuleError {
        let message = self.message.clone().unwrap_or(default);
        RuleError::new("range", message)
            .param("min", self.min)
            .param("max", self.max)
            .param("actual", actual)
    }
}

impl<T: Measure + ?Sized> ValidationRule<T> for RangeRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        let Some(actual) = value.measure() else {
            return Ok(());
        };

        if let Some(min) = self.min {
            if actual < min {
                return Err(self.error(format!("Value must be at least {}", bound(min)), actual));
            }
        }

        if let Some(max) = self.max {
            if actual > max {
                return Err(self.error(format!("Value must be at most {}", bound(max)), actual));
            }
        }

        Ok(())
    }
}

/// `length`: string or collection length within inclusive bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthRule {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub message: Option<String>,
}

impl LengthRule {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Length + ?Sized> ValidationRule<T> for LengthRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        let Some(len) = value.length() else {
            return Ok(());
        };

        let default = match (self.min, self.max) {
            (Some(min), _) if len < min => format!("Length must be at least {min}"),
            (_, Some(max)) if len > max => format!("Length must be at most {max}"),
            _ => return Ok(()),
        };

        let message = self.message.clone().unwrap_or(default);
        Err(RuleError::new("length", message)
            .param("min", self.min)
            .param("max", self.max)
            .param("actual", len))
    }
}

/// `email`: RFC 5322 (simplified) address format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailRule {
    pub message: Option<String>,
}

impl EmailRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl<T: Text + ?Sized> ValidationRule<T> for EmailRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        match value.text() {
            Some(text) if !email_regex().is_match(text) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid email format".to_string());
                Err(RuleError::new("email", message))
            }
            _ => Ok(()),
        }
    }
}

/// `url`: absolute http, https or ftp URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlRule {
    pub message: Option<String>,
}

impl UrlRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl<T: Text + ?Sized> ValidationRule<T> for UrlRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        match value.text() {
            Some(text) if !url_regex().is_match(text) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid URL format".to_string());
                Err(RuleError::new("url", message))
            }
            _ => Ok(()),
        }
    }
}

/// `regex`: the value must match a pattern.
///
/// The pattern compiles lazily on first use; an invalid pattern fails every
/// value with a `regex` error naming the pattern.
#[derive(Debug)]
pub struct RegexRule {
    pub pattern: String,
    pub message: Option<String>,
    compiled: OnceLock<Result<Regex, String>>,
}

impl RegexRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: None,
            compiled: OnceLock::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn regex(&self) -> Result<&Regex, RuleError> {
        self.compiled
            .get_or_init(|| Regex::new(&self.pattern).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| {
                RuleError::new("regex", format!("Invalid regex pattern: {}", self.pattern))
                    .param("error", e)
            })
    }
}

impl Clone for RegexRule {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            message: self.message.clone(),
            compiled: OnceLock::new(),
        }
    }
}

impl PartialEq for RegexRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.message == other.message
    }
}

impl<T: Text + ?Sized> ValidationRule<T> for RegexRule {
    fn validate(&self, value: &T) -> Result<(), RuleError> {
        let Some(text) = value.text() else {
            return Ok(());
        };

        if self.regex()?.is_match(text) {
            Ok(())
        } else {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("Value does not match pattern {}", self.pattern));
            Err(RuleError::new("regex", message).param("pattern", &self.pattern))
        }
    }
}
