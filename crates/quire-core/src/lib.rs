mod error;
pub use error::{Error, IntoError};

pub mod logic;

pub mod pipeline;
pub use pipeline::{Operation, Outcome, Pipeline};

pub mod schema;
pub use schema::{Field, FieldModel, Fields};

pub mod value;

/// A Result type alias that uses Quire's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
pub use serde_json::Value;
