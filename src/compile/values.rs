//! Type-directed coercion of JSON operand values into the typed
//! arrays of a condition.

use chrono::{NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::model::ModelIndex;
use crate::ods::{DataType, Operand};

use super::error::{CompileError, CompileResult};
use super::path::ResolvedPath;

/// ISO-8601 timestamps accepted for date attributes: seconds are
/// required, the fraction and the `Z` are optional. Anything else is
/// passed through as an already formatted ASAM date string.
static ISO_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z?$")
        .expect("hardcoded pattern compiles")
});

/// Coerce `value` (scalar or array) into the operand matching the
/// resolved attribute's declared type.
pub(crate) fn coerce(
    index: &ModelIndex<'_>,
    resolved: &ResolvedPath<'_>,
    value: &Value,
) -> CompileResult<Operand> {
    let items: &[Value] = match value {
        Value::Array(values) => values.as_slice(),
        single => std::slice::from_ref(single),
    };

    match resolved.data_type {
        DataType::DtByte | DataType::DsByte => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let number = as_integer(item).ok_or_else(|| operand_error(resolved, item))?;
                let byte =
                    u8::try_from(number).map_err(|_| operand_error(resolved, item))?;
                values.push(byte);
            }
            Ok(Operand::bytes(values))
        }
        DataType::DtBoolean | DataType::DsBoolean => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(as_boolean(item).ok_or_else(|| operand_error(resolved, item))?);
            }
            Ok(Operand::booleans(values))
        }
        DataType::DtShort | DataType::DsShort | DataType::DtLong | DataType::DsLong => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let number = as_integer(item).ok_or_else(|| operand_error(resolved, item))?;
                let long =
                    i32::try_from(number).map_err(|_| operand_error(resolved, item))?;
                values.push(long);
            }
            Ok(Operand::longs(values))
        }
        DataType::DtLonglong | DataType::DsLonglong => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(as_integer(item).ok_or_else(|| operand_error(resolved, item))?);
            }
            Ok(Operand::longlongs(values))
        }
        DataType::DtFloat | DataType::DsFloat | DataType::DtComplex | DataType::DsComplex => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let number = as_float(item).ok_or_else(|| operand_error(resolved, item))?;
                values.push(number as f32);
            }
            Ok(Operand::floats(values))
        }
        DataType::DtDouble | DataType::DsDouble | DataType::DtDcomplex | DataType::DsDcomplex => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(as_float(item).ok_or_else(|| operand_error(resolved, item))?);
            }
            Ok(Operand::doubles(values))
        }
        DataType::DtDate | DataType::DsDate => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let text = item.as_str().ok_or_else(|| operand_error(resolved, item))?;
                values.push(
                    normalize_date(text).ok_or_else(|| operand_error(resolved, item))?,
                );
            }
            Ok(Operand::strings(values))
        }
        DataType::DtString
        | DataType::DsString
        | DataType::DtExternalreference
        | DataType::DsExternalreference => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(as_text(item).ok_or_else(|| operand_error(resolved, item))?);
            }
            Ok(Operand::strings(values))
        }
        DataType::DtEnum | DataType::DsEnum => {
            let attribute = index
                .attribute(resolved.entity, &resolved.attribute)
                .ok_or_else(|| operand_error(resolved, value))?;
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let number = match item {
                    Value::String(key) => {
                        index.enum_value(resolved.entity, attribute, key)?
                    }
                    other => {
                        let wide =
                            as_integer(other).ok_or_else(|| operand_error(resolved, other))?;
                        i32::try_from(wide).map_err(|_| operand_error(resolved, other))?
                    }
                };
                values.push(number);
            }
            Ok(Operand::longs(values))
        }
        unsupported => Err(CompileError::UnsupportedAttributeType {
            data_type: unsupported,
        }),
    }
}

fn operand_error(resolved: &ResolvedPath<'_>, value: &Value) -> CompileError {
    CompileError::InvalidOperandValue {
        value: display_value(value),
        data_type: resolved.data_type,
        attribute: resolved.attribute.clone(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Normalize a date operand to the compact ASAM form.
///
/// ISO-8601 input is re-rendered as `YYYYMMDDHHMMSS` plus the
/// significant fraction digits, trailing zeros collapsed; a zero
/// fraction renders with no fractional digits at all. A string that
/// does not look like ISO-8601 passes through untouched; one that
/// looks like it but holds an impossible date is rejected (`None`).
pub(crate) fn normalize_date(text: &str) -> Option<String> {
    if !ISO_DATETIME.is_match(text) {
        return Some(text.to_string());
    }

    let trimmed = text.strip_suffix('Z').unwrap_or(text);
    let parsed = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").ok()?;

    let mut rendered = parsed.format("%Y%m%d%H%M%S").to_string();
    let nanos = parsed.nanosecond();
    if nanos != 0 {
        let fraction = format!("{:09}", nanos);
        rendered.push_str(fraction.trim_end_matches('0'));
    }
    Some(rendered)
}
