//! Field models, fields and field sets.

mod data_type;
pub use data_type::DataType;

mod definition;
pub use definition::FieldDef;

mod field;
pub use field::Field;

mod field_model;
pub use field_model::{Builder, Converter, FieldModel, Populator, Sanitizer, Validator};

mod fields;
pub use fields::Fields;

mod message;
pub use message::{English, Message, Translator};

pub mod models;

mod options;
pub use options::Options;

mod registry;
pub use registry::ModelRegistry;

pub mod sanitizers;

pub mod validators;
