//! JAQueL query compilation.
//!
//! The entry points here turn a JSON query document into a
//! protocol-exact select statement:
//!
//! ```text
//! JAQueL (JSON) → target entity → conditions → projection/order/group
//!              → SelectStatement + column lookup
//! ```
//!
//! The compiler is pure: it reads the application model through a
//! [`ModelIndex`] and builds a fresh statement per call. Concurrent
//! compilations against the same model need no synchronization.
//!
//! # Example
//!
//! ```ignore
//! use jaquel::compile::jaquel_to_ods_str;
//!
//! let (entity, statement) = jaquel_to_ods_str(
//!     &model,
//!     r#"{"AoUnit": {"name": "m"}, "$attributes": {"name": 1, "factor": 1}}"#,
//! )?;
//! ```

pub mod error;

mod conditions;
mod keywords;
mod path;
mod projection;
mod values;

pub use error::{CompileError, CompileResult};
pub use path::{resolve_path, ResolvedPath};

use serde_json::Value;

use crate::model::{Entity, Model, ModelIndex};
use crate::ods::{Aggregate, Operator, SelectStatement};

use conditions::ConditionScope;

/// Identifies one compiled column for mapping result columns back to
/// the query.
///
/// Result columns come back from the server under schema names, not
/// under the paths the query used; `path` preserves the original
/// dotted JAQueL path for that mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// aid of the entity the column belongs to.
    pub aid: i64,
    /// Resolved application attribute name, `*` for a wildcard.
    pub name: String,
    /// Aggregate applied to the column.
    pub aggregate: Aggregate,
    /// The dotted path exactly as written in the query.
    pub path: String,
}

impl Column {
    /// Render the column name as it appears in a result frame.
    ///
    /// For wildcard columns the server reports concrete attribute
    /// names; `asterisk_name` replaces the `*` so the caller can build
    /// one name per returned column.
    pub fn column_name(&self, separator: &str, asterisk_name: &str) -> String {
        let full_path = if self.name == "*" {
            match self.path.rsplit_once('.') {
                Some((base, _)) => format!("{}.{}", base, asterisk_name),
                None => asterisk_name.to_string(),
            }
        } else {
            self.path.clone()
        };
        if separator == "." {
            full_path
        } else {
            full_path.replace('.', separator)
        }
    }
}

/// Everything a conversion produces: the target entity, the statement
/// and the column lookup, in compiled column order.
#[derive(Debug)]
pub struct ConversionResult<'m> {
    pub entity: &'m Entity,
    pub select_statement: SelectStatement,
    pub column_lookup: Vec<Column>,
}

impl ConversionResult<'_> {
    /// Find the compiled column matching a returned result column. A
    /// wildcard column of the same aid and aggregate is the fallback
    /// when no exact name matches.
    pub fn lookup(&self, aid: i64, name: &str, aggregate: Aggregate) -> Option<&Column> {
        let mut wildcard = None;
        for column in &self.column_lookup {
            if column.aid == aid && column.aggregate == aggregate {
                if column.name == name {
                    return Some(column);
                }
                if column.name == "*" {
                    wildcard = Some(column);
                }
            }
        }
        wildcard
    }
}

/// Convert a JAQueL document into a select statement, entity and
/// column lookup.
pub fn convert<'m>(model: &'m Model, query: &Value) -> CompileResult<ConversionResult<'m>> {
    let index = ModelIndex::new(model);
    convert_with_index(&index, query)
}

/// Like [`convert`], for a JSON text query.
pub fn convert_str<'m>(model: &'m Model, query: &str) -> CompileResult<ConversionResult<'m>> {
    let document: Value = serde_json::from_str(query)?;
    convert(model, &document)
}

/// Convert a JAQueL document into its target entity and select
/// statement.
pub fn jaquel_to_ods<'m>(
    model: &'m Model,
    query: &Value,
) -> CompileResult<(&'m Entity, SelectStatement)> {
    let result = convert(model, query)?;
    Ok((result.entity, result.select_statement))
}

/// Like [`jaquel_to_ods`], for a JSON text query.
pub fn jaquel_to_ods_str<'m>(
    model: &'m Model,
    query: &str,
) -> CompileResult<(&'m Entity, SelectStatement)> {
    let document: Value = serde_json::from_str(query)?;
    jaquel_to_ods(model, &document)
}

/// Shared with `$nested` compilation, which reuses the caller's index.
pub(crate) fn convert_with_index<'m>(
    index: &ModelIndex<'m>,
    query: &Value,
) -> CompileResult<ConversionResult<'m>> {
    let Value::Object(document) = query else {
        return Err(CompileError::NoTargetEntity);
    };

    let mut builder = crate::ods::SelectBuilder::new();
    let mut columns: Vec<Column> = Vec::new();
    let mut target: Option<&'m Entity> = None;

    // First pass: the single non-$ key names the target entity and
    // carries either its condition document or a direct id value.
    for (key, value) in document {
        if key.starts_with('$') {
            continue;
        }
        if target.is_some() {
            return Err(CompileError::MultipleTargetEntities { key: key.clone() });
        }
        let entity = index.entity(key)?;
        target = Some(entity);

        match value {
            Value::Object(conditions) => {
                let mut scope = ConditionScope::default();
                conditions::compile_conditions(
                    index,
                    entity,
                    conditions,
                    &mut scope,
                    &mut builder,
                )?;
            }
            other => {
                let id = id_shorthand(other)?;
                conditions::add_condition(
                    index,
                    entity,
                    "id",
                    Operator::OpEq,
                    &Value::from(id),
                    0,
                    "",
                    &mut builder,
                )?;
            }
        }
    }

    let Some(entity) = target else {
        return Err(CompileError::NoTargetEntity);
    };

    // Second pass: the $ sections, in document order.
    for (key, value) in document {
        if !key.starts_with('$') {
            continue;
        }
        match key.as_str() {
            "$attributes" => {
                projection::compile_attributes(index, entity, value, &mut builder, &mut columns)?;
            }
            "$orderby" => projection::compile_orderby(index, entity, value, &mut builder)?,
            "$groupby" => projection::compile_groupby(index, entity, value, &mut builder)?,
            "$options" => projection::compile_options(value, &mut builder)?,
            unknown => {
                return Err(CompileError::UnknownTopLevelKey {
                    key: unknown.to_string(),
                    suggestion: keywords::suggestion(unknown),
                });
            }
        }
    }

    // A query without $attributes selects everything on the target.
    if !builder.has_columns() {
        builder.add_column(entity.aid, "*", 0, Aggregate::AgNone);
        columns.push(Column {
            aid: entity.aid,
            name: "*".to_string(),
            aggregate: Aggregate::AgNone,
            path: String::new(),
        });
    }

    let select_statement = builder.finish();
    log::debug!(
        "compiled query on '{}': {} columns, {} joins, {} where items",
        entity.name,
        select_statement.columns.len(),
        select_statement.joins.len(),
        select_statement.where_clause.len()
    );

    Ok(ConversionResult {
        entity,
        select_statement,
        column_lookup: columns,
    })
}

/// A scalar assigned directly to the entity key is an id equality.
fn id_shorthand(value: &Value) -> CompileResult<i64> {
    let id = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) => {
            text.parse::<i64>().ok()
        }
        _ => None,
    };
    id.ok_or_else(|| CompileError::InvalidIdShorthand {
        value: match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    })
}
