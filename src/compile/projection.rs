//! Projection, ordering, grouping and statement options.
//!
//! `$attributes`, `$orderby` and `$groupby` share the same recursive
//! shape: nested objects extend the attribute path, leaves close it.
//! Arrays are rejected everywhere in these sub-documents.

use serde_json::{Map, Value};

use crate::model::{Entity, ModelIndex};
use crate::ods::{Aggregate, Order, SelectBuilder};

use super::conditions::unit_value;
use super::error::{CompileError, CompileResult};
use super::keywords;
use super::Column;

/// Context for the `$attributes` walk.
#[derive(Debug, Clone, Default)]
struct AttributeScope {
    path: String,
    aggregate: Aggregate,
    unit_id: i64,
}

impl AttributeScope {
    fn with_segment(&self, segment: &str) -> Self {
        let mut scope = self.clone();
        if !scope.path.is_empty() {
            scope.path.push('.');
        }
        scope.path.push_str(segment);
        scope
    }
}

pub(crate) fn compile_attributes<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    value: &Value,
    builder: &mut SelectBuilder,
    columns: &mut Vec<Column>,
) -> CompileResult<()> {
    let object = expect_object(value, "$attributes")?;
    walk_attributes(
        index,
        entity,
        object,
        &AttributeScope::default(),
        builder,
        columns,
    )
}

fn walk_attributes<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    object: &Map<String, Value>,
    scope: &AttributeScope,
    builder: &mut SelectBuilder,
    columns: &mut Vec<Column>,
) -> CompileResult<()> {
    let level_unit = match object.get("$unit") {
        None => None,
        Some(value) => Some(unit_value(value).ok_or_else(|| CompileError::InvalidOptionValue {
            option: "$unit".to_string(),
            value: value.to_string(),
        })?),
    };

    for (key, value) in object {
        let mut elem = scope.clone();
        if let Some(unit_id) = level_unit {
            elem.unit_id = unit_id;
        }

        if key.starts_with('$') {
            if let Some(aggregate) = keywords::aggregate(key) {
                elem.aggregate = aggregate;
            } else {
                match key.as_str() {
                    "$unit" => continue,
                    "$calculated" => return Err(CompileError::CalculatedNotSupported),
                    "$options" => return Err(CompileError::AttributeOptionsNotAllowed),
                    unknown => {
                        return Err(CompileError::UnknownAggregate {
                            key: unknown.to_string(),
                            suggestion: keywords::suggestion(unknown),
                        });
                    }
                }
            }
        } else {
            elem = elem.with_segment(key);
        }

        match value {
            Value::Object(inner) => {
                walk_attributes(index, entity, inner, &elem, builder, columns)?;
            }
            Value::Array(_) => {
                return Err(CompileError::ArrayNotAllowed {
                    section: "$attributes".to_string(),
                });
            }
            _ => {
                let resolved = super::path::resolve_path(index, entity, &elem.path, builder)?;
                if resolved.attribute == "*" {
                    builder.add_column(resolved.entity.aid, "*", 0, Aggregate::AgNone);
                    columns.push(Column {
                        aid: resolved.entity.aid,
                        name: "*".to_string(),
                        aggregate: Aggregate::AgNone,
                        path: elem.path.clone(),
                    });
                } else {
                    builder.add_column(
                        resolved.entity.aid,
                        &resolved.attribute,
                        elem.unit_id,
                        elem.aggregate,
                    );
                    columns.push(Column {
                        aid: resolved.entity.aid,
                        name: resolved.attribute,
                        aggregate: elem.aggregate,
                        path: elem.path.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn compile_orderby<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    value: &Value,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    let object = expect_object(value, "$orderby")?;
    walk_orderby(index, entity, object, "", builder)
}

fn walk_orderby<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    object: &Map<String, Value>,
    prefix: &str,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    for (key, value) in object {
        if key.starts_with('$') {
            return Err(CompileError::PredefinedElementNotAllowed {
                key: key.clone(),
                section: "$orderby".to_string(),
            });
        }
        let path = join_path(prefix, key);
        match value {
            Value::Object(inner) => walk_orderby(index, entity, inner, &path, builder)?,
            Value::Array(_) => {
                return Err(CompileError::ArrayNotAllowed {
                    section: "$orderby".to_string(),
                });
            }
            leaf => {
                let order = match leaf.as_i64() {
                    Some(0) => Order::OdDescending,
                    Some(1) => Order::OdAscending,
                    _ => {
                        return Err(CompileError::InvalidOrderValue {
                            value: leaf.to_string(),
                        });
                    }
                };
                let resolved = super::path::resolve_path(index, entity, &path, builder)?;
                builder.add_order_by(resolved.entity.aid, &resolved.attribute, order);
            }
        }
    }
    Ok(())
}

pub(crate) fn compile_groupby<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    value: &Value,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    let object = expect_object(value, "$groupby")?;
    walk_groupby(index, entity, object, "", builder)
}

fn walk_groupby<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    object: &Map<String, Value>,
    prefix: &str,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    for (key, value) in object {
        if key.starts_with('$') {
            return Err(CompileError::PredefinedElementNotAllowed {
                key: key.clone(),
                section: "$groupby".to_string(),
            });
        }
        let path = join_path(prefix, key);
        match value {
            Value::Object(inner) => walk_groupby(index, entity, inner, &path, builder)?,
            Value::Array(_) => {
                return Err(CompileError::ArrayNotAllowed {
                    section: "$groupby".to_string(),
                });
            }
            leaf => {
                if leaf.as_i64() != Some(1) {
                    return Err(CompileError::InvalidGroupValue {
                        value: leaf.to_string(),
                    });
                }
                let resolved = super::path::resolve_path(index, entity, &path, builder)?;
                builder.add_group_by(resolved.entity.aid, &resolved.attribute);
            }
        }
    }
    Ok(())
}

/// `$options`: the four statement pagination knobs.
pub(crate) fn compile_options(value: &Value, builder: &mut SelectBuilder) -> CompileResult<()> {
    let object = expect_object(value, "$options")?;
    for (key, value) in object {
        let number = unit_value(value).ok_or_else(|| CompileError::InvalidOptionValue {
            option: key.clone(),
            value: value.to_string(),
        });
        match key.as_str() {
            "$rowlimit" => builder.set_row_limit(number?),
            "$rowskip" => builder.set_row_start(number?),
            "$seqlimit" => builder.set_values_limit(number?),
            "$seqskip" => builder.set_values_start(number?),
            unknown => {
                return Err(CompileError::UnknownOption {
                    key: unknown.to_string(),
                    suggestion: keywords::suggestion(unknown),
                });
            }
        }
    }
    Ok(())
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn expect_object<'v>(value: &'v Value, section: &str) -> CompileResult<&'v Map<String, Value>> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Array(_) => Err(CompileError::ArrayNotAllowed {
            section: section.to_string(),
        }),
        _ => Err(CompileError::MalformedSection {
            section: section.to_string(),
        }),
    }
}
