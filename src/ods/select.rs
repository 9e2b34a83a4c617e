//! The `SelectStatement` message family.

use serde::{Deserialize, Serialize};

use super::types::{Aggregate, Conjunction, JoinType, Operator, Order};

/// A compiled, protocol-exact query.
///
/// `where_clause` is a flattened boolean expression: leaf conditions
/// interleaved with explicit AND/OR/NOT/OPEN/CLOSE markers, with no
/// implicit operator precedence. All lists are order preserving and
/// their order is significant for the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectStatement {
    pub columns: Vec<AttributeItem>,
    #[serde(rename = "where")]
    pub where_clause: Vec<ConditionItem>,
    pub joins: Vec<JoinItem>,
    pub order_by: Vec<OrderByItem>,
    pub group_by: Vec<GroupByItem>,
    pub row_limit: i64,
    pub row_start: i64,
    pub values_limit: i64,
    pub values_start: i64,
}

/// A projected column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeItem {
    pub aid: i64,
    pub attribute: String,
    pub unit_id: i64,
    pub aggregate: Aggregate,
}

/// A join directive. The triple `(aid_from, aid_to, relation)` is
/// unique within a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinItem {
    pub aid_from: i64,
    pub aid_to: i64,
    pub relation: String,
    pub join_type: JoinType,
}

/// A sort directive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderByItem {
    pub aid: i64,
    pub attribute: String,
    pub order: Order,
}

/// A grouping directive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupByItem {
    pub aid: i64,
    pub attribute: String,
}

/// One element of the flattened where sequence: either a leaf
/// condition or a structural marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionItem {
    Condition(Condition),
    Conjunction(Conjunction),
}

impl ConditionItem {
    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            ConditionItem::Condition(condition) => Some(condition),
            ConditionItem::Conjunction(_) => None,
        }
    }

    pub fn as_conjunction(&self) -> Option<Conjunction> {
        match self {
            ConditionItem::Conjunction(conjunction) => Some(*conjunction),
            ConditionItem::Condition(_) => None,
        }
    }
}

/// A leaf comparison against one attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    pub aid: i64,
    pub attribute: String,
    pub operator: Operator,
    pub unit_id: i64,
    /// Typed operand, absent for `OP_IS_NULL`/`OP_IS_NOT_NULL`.
    #[serde(flatten)]
    pub operand: Option<Operand>,
}

/// The typed operand of a condition, one of the protobuf array
/// wrappers or an embedded subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operand {
    StringArray(StringArray),
    LongArray(LongArray),
    LonglongArray(LonglongArray),
    BooleanArray(BooleanArray),
    ByteArray(ByteArray),
    FloatArray(FloatArray),
    DoubleArray(DoubleArray),
    NestedStatement(Box<SelectStatement>),
}

impl Operand {
    pub fn strings(values: Vec<String>) -> Self {
        Operand::StringArray(StringArray { values })
    }

    pub fn longs(values: Vec<i32>) -> Self {
        Operand::LongArray(LongArray { values })
    }

    pub fn longlongs(values: Vec<i64>) -> Self {
        Operand::LonglongArray(LonglongArray { values })
    }

    pub fn booleans(values: Vec<bool>) -> Self {
        Operand::BooleanArray(BooleanArray { values })
    }

    pub fn bytes(values: Vec<u8>) -> Self {
        Operand::ByteArray(ByteArray { values })
    }

    pub fn floats(values: Vec<f32>) -> Self {
        Operand::FloatArray(FloatArray { values })
    }

    pub fn doubles(values: Vec<f64>) -> Self {
        Operand::DoubleArray(DoubleArray { values })
    }

    pub fn nested(statement: SelectStatement) -> Self {
        Operand::NestedStatement(Box::new(statement))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringArray {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongArray {
    pub values: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LonglongArray {
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanArray {
    pub values: Vec<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByteArray {
    pub values: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatArray {
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubleArray {
    pub values: Vec<f64>,
}
