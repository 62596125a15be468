use super::PopulateContext;
use crate::logic::FieldPath;
use crate::schema::{Field, Fields};
use crate::{Error, Result};

use futures_util::future::try_join_all;
use serde_json::Value;

/// Runs every configured populator of a record being read.
///
/// Populators of independent fields, including those inside repeater
/// entries, run concurrently; all of them complete before the populated
/// record is returned. The first failure aborts the read.
pub async fn populate_record(fields: &Fields, record: Value) -> Result<Value> {
    let mut targets = vec![];
    collect_targets(fields, &record, &FieldPath::root(), false, &mut targets);

    if targets.is_empty() {
        return Ok(record);
    }

    let paths: Vec<String> = targets.iter().map(|target| target.path.to_string()).collect();

    let populated = try_join_all(targets.iter().zip(&paths).map(|(target, path)| {
        let value = target.path.lookup(&record).cloned().unwrap_or(Value::Null);
        let cx = PopulateContext {
            definition: target.field,
            path,
            record: &record,
            is_subfield: target.is_subfield,
        };

        async move {
            log::trace!("populating {path}");
            target
                .field
                .model
                .populate(value, &cx)
                .await
                .map_err(|err| err.context(Error::populate_failed(path.as_str())))
        }
    }))
    .await?;

    let mut record = record;

    for (target, value) in targets.iter().zip(populated) {
        if let Some(slot) = target.path.lookup_mut(&mut record) {
            *slot = value;
        }
    }

    Ok(record)
}

struct Target<'a> {
    path: FieldPath,
    field: &'a Field,
    is_subfield: bool,
}

fn collect_targets<'a>(
    fields: &'a Fields,
    record: &Value,
    base: &FieldPath,
    is_subfield: bool,
    out: &mut Vec<Target<'a>>,
) {
    for field in fields {
        let Some(value) = record.get(&field.name) else {
            continue;
        };

        let path = base.child(&field.name);

        // Parents come first so populated entries are written into the
        // populated parent.
        if field.model.has_populator() {
            out.push(Target {
                path: path.clone(),
                field,
                is_subfield,
            });
        }

        if let (Some(subfields), Value::Array(entries)) = (&field.subfields, value) {
            for (i, entry) in entries.iter().enumerate() {
                collect_targets(subfields, entry, &path.index(i), true, out);
            }
        }
    }
}
