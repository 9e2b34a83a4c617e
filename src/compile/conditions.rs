//! Condition tree compilation.
//!
//! Walks the nested condition document and emits the flattened where
//! sequence. Sibling keys at one level are joined by the level's
//! conjunction (AND unless inside an `$or` branch), `$and`/`$or`
//! groups are explicitly bracketed and `$not` negates one bracketed
//! sub-document. Everything that is not a `$` keyword extends the
//! attribute path.

use serde_json::{Map, Value};

use crate::model::{Entity, ModelIndex};
use crate::ods::{Condition, Conjunction, DataType, Operand, Operator, SelectBuilder};

use super::error::{CompileError, CompileResult};
use super::keywords;
use super::path::resolve_path;
use super::values;

/// Per-level compilation context. Branching a level copies the record;
/// the emission counter is the only part a level mutates in place.
#[derive(Debug, Clone)]
pub(crate) struct ConditionScope {
    /// Dot-joined attribute path accumulated so far.
    path: String,
    /// Active comparison operator for leaves below this level.
    operator: Operator,
    /// Active `$options` letters, `"i"` requests case insensitivity.
    options: String,
    /// Active `$unit` annotation.
    unit_id: i64,
    /// Conjunction inserted between sibling emissions at this level.
    conjunction: Conjunction,
    /// Number of condition units emitted at this level so far.
    emitted: usize,
}

impl Default for ConditionScope {
    fn default() -> Self {
        Self {
            path: String::new(),
            operator: Operator::OpEq,
            options: String::new(),
            unit_id: 0,
            conjunction: Conjunction::CoAnd,
            emitted: 0,
        }
    }
}

impl ConditionScope {
    /// Copy for one key of the current level.
    fn branch(&self) -> Self {
        self.clone()
    }

    /// Copy for a `$and`/`$or`/`$not` branch: path, operator and unit
    /// annotation survive, conjunction state and options reset.
    fn group_branch(&self) -> Self {
        Self {
            path: self.path.clone(),
            operator: self.operator,
            options: String::new(),
            unit_id: self.unit_id,
            conjunction: Conjunction::CoAnd,
            emitted: 0,
        }
    }

    fn push_segment(&mut self, segment: &str) {
        if !self.path.is_empty() {
            self.path.push('.');
        }
        self.path.push_str(segment);
    }
}

/// Compile one condition object at the given scope level.
pub(crate) fn compile_conditions<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    object: &Map<String, Value>,
    scope: &mut ConditionScope,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    let level_options = level_options(object)?;
    let level_unit = level_unit(object)?;

    for (key, value) in object {
        let mut elem = scope.branch();
        if let Some(options) = &level_options {
            elem.options = options.clone();
        }
        if let Some(unit_id) = level_unit {
            elem.unit_id = unit_id;
        }

        if key.starts_with('$') {
            if let Some(operator) = keywords::operator(key) {
                elem.operator = operator;
            } else {
                match key.as_str() {
                    "$unit" | "$options" => continue,
                    "$and" => {
                        compile_group(index, entity, value, Conjunction::CoAnd, scope, builder)?;
                        scope.emitted += 1;
                        continue;
                    }
                    "$or" => {
                        compile_group(index, entity, value, Conjunction::CoOr, scope, builder)?;
                        scope.emitted += 1;
                        continue;
                    }
                    "$not" => {
                        compile_negation(index, entity, value, scope, builder)?;
                        scope.emitted += 1;
                        continue;
                    }
                    "$nested" => {
                        compile_nested(index, entity, value, &elem, scope, builder)?;
                        continue;
                    }
                    unknown => {
                        return Err(CompileError::UnknownOperator {
                            key: unknown.to_string(),
                            suggestion: keywords::suggestion(unknown),
                        });
                    }
                }
            }
        } else {
            elem.push_segment(key);
        }

        match value {
            Value::Object(inner) => {
                let mut child = elem;
                child.emitted = scope.emitted;
                let before = child.emitted;
                compile_conditions(index, entity, inner, &mut child, builder)?;
                if child.emitted != before {
                    scope.emitted += 1;
                }
            }
            leaf => {
                if scope.emitted != 0 {
                    builder.push_conjunction(elem.conjunction);
                }
                add_condition(
                    index,
                    entity,
                    &elem.path,
                    elem.operator,
                    leaf,
                    elem.unit_id,
                    &elem.options,
                    builder,
                )?;
                scope.emitted += 1;
            }
        }
    }
    Ok(())
}

/// Resolve the path, pick the effective operator and append one leaf
/// condition with its coerced operand. Shared with the orchestrator's
/// direct id shorthand.
#[allow(clippy::too_many_arguments)]
pub(crate) fn add_condition<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    path: &str,
    operator: Operator,
    value: &Value,
    unit_id: i64,
    options: &str,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    let resolved = resolve_path(index, entity, path, builder)?;
    let operator = effective_operator(resolved.data_type, operator, options);
    let operand = if operator.is_null_check() {
        None
    } else {
        Some(values::coerce(index, &resolved, value)?)
    };
    builder.push_condition(Condition {
        aid: resolved.entity.aid,
        attribute: resolved.attribute,
        operator,
        unit_id,
        operand,
    });
    Ok(())
}

/// `$and` / `$or`: a bracketed group of condition sub-documents.
fn compile_group<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    value: &Value,
    conjunction: Conjunction,
    scope: &mut ConditionScope,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    let Value::Array(branches) = value else {
        return Err(CompileError::MalformedConjunction);
    };
    if branches.is_empty() {
        return Err(CompileError::MalformedConjunction);
    }

    if scope.emitted > 0 {
        builder.push_conjunction(scope.conjunction);
    }
    let wrap = branches.len() > 1;
    if wrap {
        builder.push_conjunction(Conjunction::CoOpen);
    }
    for (position, branch) in branches.iter().enumerate() {
        let Value::Object(object) = branch else {
            return Err(CompileError::MalformedConjunction);
        };
        if position > 0 {
            builder.push_conjunction(conjunction);
        }
        builder.push_conjunction(Conjunction::CoOpen);
        let mut child = scope.group_branch();
        compile_conditions(index, entity, object, &mut child, builder)?;
        builder.push_conjunction(Conjunction::CoClose);
    }
    if wrap {
        builder.push_conjunction(Conjunction::CoClose);
    }
    Ok(())
}

/// `$not`: negation of one bracketed condition sub-document.
fn compile_negation<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    value: &Value,
    scope: &mut ConditionScope,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    let Value::Object(object) = value else {
        return Err(CompileError::MalformedNegation);
    };

    if scope.emitted > 0 {
        builder.push_conjunction(scope.conjunction);
    }
    builder.push_conjunction(Conjunction::CoNot);
    builder.push_conjunction(Conjunction::CoOpen);
    let mut child = scope.group_branch();
    compile_conditions(index, entity, object, &mut child, builder)?;
    builder.push_conjunction(Conjunction::CoClose);
    Ok(())
}

/// `$nested`: the operand is itself a full query document, compiled
/// through the orchestrator and embedded as a subquery.
fn compile_nested<'m>(
    index: &ModelIndex<'m>,
    entity: &'m Entity,
    value: &Value,
    elem: &ConditionScope,
    scope: &mut ConditionScope,
    builder: &mut SelectBuilder,
) -> CompileResult<()> {
    if elem.operator.is_null_check() {
        return Err(CompileError::IncompatibleNestedOperator);
    }

    let nested = super::convert_with_index(index, value)?;

    if scope.emitted != 0 {
        builder.push_conjunction(elem.conjunction);
    }
    let resolved = resolve_path(index, entity, &elem.path, builder)?;
    let operator = effective_operator(resolved.data_type, elem.operator, &elem.options);
    builder.push_condition(Condition {
        aid: resolved.entity.aid,
        attribute: resolved.attribute,
        operator,
        unit_id: elem.unit_id,
        operand: Some(Operand::nested(nested.select_statement)),
    });
    scope.emitted += 1;
    Ok(())
}

/// Remap to the case insensitive operator variant when `$options`
/// requested it and the attribute is a string type.
fn effective_operator(data_type: DataType, operator: Operator, options: &str) -> Operator {
    if data_type.is_string() && options.contains('i') {
        keywords::case_insensitive(operator)
    } else {
        operator
    }
}

fn level_options(object: &Map<String, Value>) -> CompileResult<Option<String>> {
    match object.get("$options") {
        None => Ok(None),
        Some(Value::String(options)) => Ok(Some(options.clone())),
        Some(other) => Err(CompileError::InvalidOptionValue {
            option: "$options".to_string(),
            value: other.to_string(),
        }),
    }
}

fn level_unit(object: &Map<String, Value>) -> CompileResult<Option<i64>> {
    match object.get("$unit") {
        None => Ok(None),
        Some(value) => match unit_value(value) {
            Some(unit_id) => Ok(Some(unit_id)),
            None => Err(CompileError::InvalidOptionValue {
                option: "$unit".to_string(),
                value: value.to_string(),
            }),
        },
    }
}

pub(crate) fn unit_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}
