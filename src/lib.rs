//! # jaquel
//!
//! A compiler from JAQueL, a compact MongoDB-style JSON query
//! language, to protocol-exact ASAM ODS `SelectStatement`s.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 JAQueL document (JSON)                   │
//! │   {"AoMeasurement": {...}, "$attributes": {...}, ...}    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │   target entity · conditions · projection · ordering     │
//! │        (paths resolved against the ModelIndex,           │
//! │         joins inferred and deduplicated per hop)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ods]
//! ┌─────────────────────────────────────────────────────────┐
//! │        SelectStatement + column lookup (protocol)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The application model (entities, attributes, relations and
//! enumerations) is fetched from an ODS server elsewhere and passed in
//! read-only. Compilation is synchronous, allocation-local and safe to
//! run concurrently against a shared model.
//!
//! ## Example
//!
//! ```ignore
//! use jaquel::prelude::*;
//!
//! let model: Model = serde_json::from_str(&model_json)?;
//! let result = convert_str(
//!     &model,
//!     r#"{"AoUnit": {"name": {"$like": "k*"}}, "$attributes": {"name": 1}}"#,
//! )?;
//! println!("{} columns", result.select_statement.columns.len());
//! ```

pub mod asam_time;
pub mod compile;
pub mod model;
pub mod ods;

pub use compile::{convert, convert_str, jaquel_to_ods, jaquel_to_ods_str};
pub use compile::{Column, CompileError, CompileResult, ConversionResult};
pub use model::{Model, ModelIndex};
pub use ods::{SelectBuilder, SelectStatement};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{
        convert, convert_str, jaquel_to_ods, jaquel_to_ods_str, Column, CompileError,
        CompileResult, ConversionResult,
    };
    pub use crate::model::{Attribute, Entity, Enumeration, Model, ModelIndex, Relation};
    pub use crate::ods::{
        Aggregate, Condition, ConditionItem, Conjunction, DataType, JoinType, Operand, Operator,
        Order, SelectBuilder, SelectStatement,
    };
}
