use super::{Condition, FieldPath};
use crate::schema::Fields;

use indexmap::IndexMap;
use serde_json::Value;

/// Flat map from fully-qualified field path to the conditional logic that
/// applies there.
///
/// `None` means the field is always active. Repeater entries expand into
/// indexed paths (`blocks.0.title`) whose conditions have their relative
/// references rewritten to absolute ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPathMap {
    paths: IndexMap<String, Option<Condition>>,
}

impl ResolvedPathMap {
    pub fn resolve(fields: &Fields, record: &Value) -> ResolvedPathMap {
        let paths = resolve_level(fields, record, &[FieldPath::root()])
            .into_iter()
            .map(|(path, condition)| (path.to_string(), condition))
            .collect();

        ResolvedPathMap { paths }
    }

    /// The condition at `path`. The outer `Option` is `None` when the path
    /// was not resolved at all.
    pub fn get(&self, path: &str) -> Option<Option<&Condition>> {
        self.paths.get(path).map(Option::as_ref)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Condition>)> {
        self.paths
            .iter()
            .map(|(path, condition)| (path.as_str(), condition.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Resolves one record level. `scopes` holds the paths of the enclosing
/// records, the last one being the record `fields` describe.
fn resolve_level(
    fields: &Fields,
    record: &Value,
    scopes: &[FieldPath],
) -> Vec<(FieldPath, Option<Condition>)> {
    let Some(base) = scopes.last() else {
        return vec![];
    };

    let mut ret = vec![];

    for field in fields {
        let path = base.child(&field.name);
        let condition = field
            .conditional_logic
            .as_ref()
            .map(|condition| condition.rewrite(scopes));

        ret.push((path.clone(), condition));

        let Some(subfields) = &field.subfields else {
            continue;
        };

        let Some(Value::Array(entries)) = record.get(&field.name) else {
            continue;
        };

        for (i, entry) in entries.iter().enumerate() {
            let mut nested = scopes.to_vec();
            nested.push(path.index(i));

            ret.extend(resolve_level(subfields, entry, &nested));
        }
    }

    ret
}

/// Read-only view over a [`ResolvedPathMap`] and the record it was resolved
/// from, answering whether a path is active.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalLogicResolver<'a> {
    map: &'a ResolvedPathMap,
    record: &'a Value,
}

impl<'a> ConditionalLogicResolver<'a> {
    pub fn new(map: &'a ResolvedPathMap, record: &'a Value) -> Self {
        Self { map, record }
    }

    pub fn map(&self) -> &'a ResolvedPathMap {
        self.map
    }

    pub fn record(&self) -> &'a Value {
        self.record
    }

    /// Returns `true` if the field at `path` is active.
    ///
    /// A path is active when its own condition and the condition of every
    /// ancestor path hold. Paths without a condition, or missing from the
    /// map, do not restrict activity.
    pub fn is_active(&self, path: &str) -> bool {
        let path = FieldPath::parse(path);

        path.ancestors()
            .chain(std::iter::once(path))
            .all(|path| match self.map.get(&path.to_string()) {
                Some(Some(condition)) => condition.evaluate(self.record),
                _ => true,
            })
    }
}
