//! Conditional logic: declarative predicates that decide whether a field is
//! active, and the resolver that maps every field path of a record to the
//! predicate that applies there.

mod condition;
pub use condition::Condition;

mod path;
pub use path::{FieldPath, Reference, Segment};

mod predicate;
pub use predicate::Predicate;

mod resolver;
pub use resolver::{ConditionalLogicResolver, ResolvedPathMap};
