//! Protocol-exact ASAM ODS query structures.
//!
//! The types in this module mirror the `ods.SelectStatement` protobuf
//! message family consumed by the server's query engine. Enum values
//! and field shapes are a fixed external contract; the compiler fills
//! them, a downstream transport serializes them.

pub mod builder;
mod select;
mod types;

pub use builder::SelectBuilder;
pub use select::{
    AttributeItem, BooleanArray, ByteArray, Condition, ConditionItem, DoubleArray, FloatArray,
    GroupByItem, JoinItem, LongArray, LonglongArray, Operand, OrderByItem, SelectStatement,
    StringArray,
};
pub use types::{Aggregate, Conjunction, DataType, JoinType, Operator, Order};
