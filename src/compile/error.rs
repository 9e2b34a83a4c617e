//! Compiler fault taxonomy.
//!
//! Every failure is fatal at the point of detection and carries a
//! message meant to be shown to the query author unchanged. Lookup
//! failures fold a fuzzy suggestion clause into the message when a
//! close enough candidate exists.

use thiserror::Error;

use crate::model::ModelError;
use crate::ods::DataType;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    /// The query string is not valid JSON. Carries the parser's own
    /// diagnostic including the position.
    #[error("Query is not valid JSON: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// Entity or enumeration lookup failure.
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Does not define a target entity.")]
    NoTargetEntity,

    #[error("Only one start point allowed '{key}'.")]
    MultipleTargetEntities { key: String },

    #[error("'{segment}' is no relation of entity '{entity}'.{suggestion}")]
    NoSuchRelation {
        segment: String,
        entity: String,
        suggestion: String,
    },

    #[error("'{segment}' is neither attribute nor relation of entity '{entity}'.{suggestion}")]
    NoSuchMember {
        segment: String,
        entity: String,
        suggestion: String,
    },

    #[error("Unknown operator '{key}'.{suggestion}")]
    UnknownOperator { key: String, suggestion: String },

    #[error("Unknown aggregate '{key}'.{suggestion}")]
    UnknownAggregate { key: String, suggestion: String },

    #[error("Unknown option '{key}'.{suggestion}")]
    UnknownOption { key: String, suggestion: String },

    #[error("Unknown first level define '{key}'.{suggestion}")]
    UnknownTopLevelKey { key: String, suggestion: String },

    #[error("$and and $or must always contain a non-empty array of objects.")]
    MalformedConjunction,

    #[error("$not must always contain an object.")]
    MalformedNegation,

    #[error("'{section}' is not allowed to contain arrays.")]
    ArrayNotAllowed { section: String },

    #[error("'{section}' must contain an object.")]
    MalformedSection { section: String },

    #[error("No predefined element '{key}' defined in {section}.")]
    PredefinedElementNotAllowed { key: String, section: String },

    #[error("'{value}' is not supported in $orderby. Use 1 for ascending or 0 for descending.")]
    InvalidOrderValue { value: String },

    #[error("'{value}' is not supported in $groupby. Only 1 is allowed.")]
    InvalidGroupValue { value: String },

    #[error("Only id value can be assigned directly. But '{value}' was assigned.")]
    InvalidIdShorthand { value: String },

    #[error("$nested cannot be used with $null or $notnull operators.")]
    IncompatibleNestedOperator,

    /// The attribute's declared type has no condition-operand
    /// representation. This marks a gap in the closed coercion table,
    /// not bad query data.
    #[error("Attribute type {data_type} is not supported as condition operand.")]
    UnsupportedAttributeType { data_type: DataType },

    #[error("Cannot use '{value}' as {data_type} operand for attribute '{attribute}'.")]
    InvalidOperandValue {
        value: String,
        data_type: DataType,
        attribute: String,
    },

    #[error("'{value}' is not a valid value for '{option}'.")]
    InvalidOptionValue { option: String, value: String },

    #[error("'$calculated' is currently not supported.")]
    CalculatedNotSupported,

    #[error("No $options defined for attributes.")]
    AttributeOptionsNotAllowed,
}
