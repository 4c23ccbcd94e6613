//! # Verdict Core
//!
//! The bind-and-validate pipeline: request decoding, structural and custom
//! validation, and response rendering.
//!
//! This crate is not meant to be used directly. Use `verdict` instead.

mod binder;
pub mod body;
mod config;
mod context;
pub mod query;
mod rejection;
pub mod render;
mod request;
mod validatable;

// Public API
pub use binder::Binder;
pub use body::{BodyError, BodyFields, FromBody};
pub use config::{BinderConfig, ConfigError, DEFAULT_BODY_LIMIT};
pub use context::{Context, ContextError};
pub use query::{ConversionError, FromParam, FromQuery, QueryError, QueryParams};
pub use rejection::Rejection;
pub use render::{IntoResponse, RenderError, Response};
pub use request::Request;
pub use validatable::{BoxError, FieldsOnly, Validatable};

// Re-export commonly used external types
pub use http::StatusCode;
