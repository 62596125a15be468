//! The built-in field model catalogue.
//!
//! Each constructor returns a fresh [`FieldModel`]; wrap it in an `Arc` to
//! share it between fields, or go through [`ModelRegistry`](super::ModelRegistry).

mod bigint;
pub use bigint::bigint;

mod boolean;
pub use boolean::boolean;

mod json;
pub use json::json;

mod number;
pub use number::number;

mod repeater;
pub use repeater::repeater;

mod text;
pub use text::text;

