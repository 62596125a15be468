use super::Operation;
use crate::logic::ConditionalLogicResolver;
use crate::schema::{Field, Message, Options, Translator};

use serde_json::Value;

/// What a validator gets to see besides the value itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// The field being validated
    pub definition: &'a Field,

    /// Fully-qualified path of the value, e.g. `blocks.1.title`
    pub path: &'a str,

    pub operation: Operation,

    /// Read-only access to the resolved conditional logic of the record
    pub resolver: ConditionalLogicResolver<'a>,

    /// True inside a repeater entry
    pub is_subfield: bool,

    pub translator: &'a dyn Translator,
}

impl Context<'_> {
    /// The field's options, model defaults included.
    pub fn options(&self) -> &Options {
        &self.definition.options
    }

    /// Returns `true` if the field at this context's path is active.
    pub fn is_active(&self) -> bool {
        self.resolver.is_active(self.path)
    }

    pub fn translate(&self, message: &Message) -> String {
        self.translator.translate(message)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("field", &self.definition.name)
            .field("path", &self.path)
            .field("operation", &self.operation)
            .field("is_subfield", &self.is_subfield)
            .finish()
    }
}

/// What a populator gets to see besides the value itself.
#[derive(Debug, Clone, Copy)]
pub struct PopulateContext<'a> {
    pub definition: &'a Field,

    pub path: &'a str,

    /// The whole record being read, before population
    pub record: &'a Value,

    pub is_subfield: bool,
}

impl PopulateContext<'_> {
    pub fn options(&self) -> &Options {
        &self.definition.options
    }
}
