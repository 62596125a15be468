mod collection;
pub use collection::Collection;

pub use quire_core::{
    async_trait, bail, err,
    logic::{self, Condition, ConditionalLogicResolver, ResolvedPathMap},
    pipeline::{self, populate_record, Context, FieldErrors, PopulateContext},
    schema::{self, models, DataType, FieldDef, ModelRegistry, Options, Populator},
    Error, Field, FieldModel, Fields, Operation, Outcome, Pipeline, Result, Value,
};

pub use quire_sql::{prepare, Dialect, Params, PreparedQuery, Preparer};
