//! Wire enums shared between the application model and select
//! statements. The numeric values are the ODS protobuf values and must
//! not be reordered.

use serde::{Deserialize, Serialize};

/// ODS data types. `Dt*` are scalar, `Ds*` are sequence variants of
/// the same value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum DataType {
    #[default]
    DtUnknown = 0,
    DtString = 1,
    DtShort = 2,
    DtFloat = 3,
    DtBoolean = 4,
    DtByte = 5,
    DtLong = 6,
    DtDouble = 7,
    DtLonglong = 8,
    DtId = 9,
    DtDate = 10,
    DtBytestr = 11,
    DtBlob = 12,
    DtComplex = 13,
    DtDcomplex = 14,
    DsString = 15,
    DsShort = 16,
    DsFloat = 17,
    DsBoolean = 18,
    DsByte = 19,
    DsLong = 20,
    DsDouble = 21,
    DsLonglong = 22,
    DsComplex = 23,
    DsDcomplex = 24,
    DsId = 25,
    DsDate = 26,
    DsBytestr = 27,
    DtExternalreference = 28,
    DsExternalreference = 29,
    DtEnum = 30,
    DsEnum = 31,
}

impl DataType {
    pub fn value(self) -> i32 {
        self as i32
    }

    /// The protobuf enum name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            DataType::DtUnknown => "DT_UNKNOWN",
            DataType::DtString => "DT_STRING",
            DataType::DtShort => "DT_SHORT",
            DataType::DtFloat => "DT_FLOAT",
            DataType::DtBoolean => "DT_BOOLEAN",
            DataType::DtByte => "DT_BYTE",
            DataType::DtLong => "DT_LONG",
            DataType::DtDouble => "DT_DOUBLE",
            DataType::DtLonglong => "DT_LONGLONG",
            DataType::DtId => "DT_ID",
            DataType::DtDate => "DT_DATE",
            DataType::DtBytestr => "DT_BYTESTR",
            DataType::DtBlob => "DT_BLOB",
            DataType::DtComplex => "DT_COMPLEX",
            DataType::DtDcomplex => "DT_DCOMPLEX",
            DataType::DsString => "DS_STRING",
            DataType::DsShort => "DS_SHORT",
            DataType::DsFloat => "DS_FLOAT",
            DataType::DsBoolean => "DS_BOOLEAN",
            DataType::DsByte => "DS_BYTE",
            DataType::DsLong => "DS_LONG",
            DataType::DsDouble => "DS_DOUBLE",
            DataType::DsLonglong => "DS_LONGLONG",
            DataType::DsComplex => "DS_COMPLEX",
            DataType::DsDcomplex => "DS_DCOMPLEX",
            DataType::DsId => "DS_ID",
            DataType::DsDate => "DS_DATE",
            DataType::DsBytestr => "DS_BYTESTR",
            DataType::DtExternalreference => "DT_EXTERNALREFERENCE",
            DataType::DsExternalreference => "DS_EXTERNALREFERENCE",
            DataType::DtEnum => "DT_ENUM",
            DataType::DsEnum => "DS_ENUM",
        }
    }

    pub fn is_string(self) -> bool {
        matches!(self, DataType::DtString | DataType::DsString)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column aggregate functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum Aggregate {
    #[default]
    AgNone = 0,
    AgCount = 1,
    AgDcount = 2,
    AgMin = 3,
    AgMax = 4,
    AgAvg = 5,
    AgStddev = 6,
    AgSum = 7,
    AgDistinct = 8,
    AgValuesPoint = 9,
    AgInstanceAttribute = 10,
}

impl Aggregate {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Condition comparison operators. The `Ci*` variants are the case
/// insensitive forms used for string attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum Operator {
    #[default]
    OpEq = 0,
    OpNeq = 1,
    OpLt = 2,
    OpGt = 3,
    OpLte = 4,
    OpGte = 5,
    OpInset = 6,
    OpNotinset = 7,
    OpLike = 8,
    OpCiEq = 9,
    OpCiNeq = 10,
    OpCiLt = 11,
    OpCiGt = 12,
    OpCiLte = 13,
    OpCiGte = 14,
    OpCiInset = 15,
    OpCiNotinset = 16,
    OpCiLike = 17,
    OpIsNull = 18,
    OpIsNotNull = 19,
    OpNotlike = 20,
    OpCiNotlike = 21,
    OpBetween = 22,
}

impl Operator {
    pub fn value(self) -> i32 {
        self as i32
    }

    /// True for the operators that take no operand value.
    pub fn is_null_check(self) -> bool {
        matches!(self, Operator::OpIsNull | Operator::OpIsNotNull)
    }
}

/// Structural markers in the flattened where sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum Conjunction {
    #[default]
    CoAnd = 0,
    CoOr = 1,
    CoNot = 2,
    CoOpen = 3,
    CoClose = 4,
}

impl Conjunction {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Join flavor of a single join directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum JoinType {
    #[default]
    JtDefault = 0,
    JtOuter = 1,
}

/// Sort direction of an order-by item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum Order {
    #[default]
    OdAscending = 0,
    OdDescending = 1,
}
