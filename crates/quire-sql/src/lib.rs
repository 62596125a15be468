pub mod dialect;
pub use dialect::Dialect;

pub mod params;
pub use params::{Bindings, Params, Placeholder};

pub mod prepare;
pub use prepare::{prepare, PreparedQuery, Preparer};
