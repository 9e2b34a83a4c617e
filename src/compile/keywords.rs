//! The `$`-keyword tables of the query language.

use crate::model::suggest;
use crate::ods::{Aggregate, Operator};

/// Map a comparison operator keyword to its wire operator.
pub(crate) fn operator(key: &str) -> Option<Operator> {
    Some(match key {
        "$eq" => Operator::OpEq,
        "$neq" => Operator::OpNeq,
        "$lt" => Operator::OpLt,
        "$gt" => Operator::OpGt,
        "$lte" => Operator::OpLte,
        "$gte" => Operator::OpGte,
        "$in" => Operator::OpInset,
        "$notinset" => Operator::OpNotinset,
        "$like" => Operator::OpLike,
        "$notlike" => Operator::OpNotlike,
        "$null" => Operator::OpIsNull,
        "$notnull" => Operator::OpIsNotNull,
        "$between" => Operator::OpBetween,
        _ => return None,
    })
}

/// Map an aggregate keyword to its wire aggregate.
pub(crate) fn aggregate(key: &str) -> Option<Aggregate> {
    Some(match key {
        "$none" => Aggregate::AgNone,
        "$count" => Aggregate::AgCount,
        "$dcount" => Aggregate::AgDcount,
        "$min" => Aggregate::AgMin,
        "$max" => Aggregate::AgMax,
        "$avg" => Aggregate::AgAvg,
        "$sum" => Aggregate::AgSum,
        "$distinct" => Aggregate::AgDistinct,
        "$point" => Aggregate::AgValuesPoint,
        "$ia" => Aggregate::AgInstanceAttribute,
        _ => return None,
    })
}

/// Remap an operator to its case insensitive variant. Identity for
/// operators without one.
pub(crate) fn case_insensitive(operator: Operator) -> Operator {
    match operator {
        Operator::OpEq => Operator::OpCiEq,
        Operator::OpNeq => Operator::OpCiNeq,
        Operator::OpLt => Operator::OpCiLt,
        Operator::OpGt => Operator::OpCiGt,
        Operator::OpLte => Operator::OpCiLte,
        Operator::OpGte => Operator::OpCiGte,
        Operator::OpInset => Operator::OpCiInset,
        Operator::OpNotinset => Operator::OpCiNotinset,
        Operator::OpLike => Operator::OpCiLike,
        Operator::OpNotlike => Operator::OpCiNotlike,
        other => other,
    }
}

/// Every `$` keyword the language knows, in one pool. Suggestions for
/// a mistyped `$` key draw from the whole pool on purpose: a typo in
/// an aggregate position may well be meant as `$nested` or `$stddev`.
pub(crate) const VOCABULARY: &[&str] = &[
    "$eq",
    "$neq",
    "$lt",
    "$gt",
    "$lte",
    "$gte",
    "$in",
    "$notinset",
    "$like",
    "$notlike",
    "$null",
    "$notnull",
    "$between",
    "$and",
    "$or",
    "$not",
    "$nested",
    "$unit",
    "$options",
    "$calculated",
    "$none",
    "$count",
    "$dcount",
    "$min",
    "$max",
    "$avg",
    "$sum",
    "$stddev",
    "$distinct",
    "$point",
    "$ia",
    "$attributes",
    "$orderby",
    "$groupby",
    "$rowlimit",
    "$rowskip",
    "$seqlimit",
    "$seqskip",
];

/// Suggestion clause for a mistyped `$` keyword.
pub(crate) fn suggestion(key: &str) -> String {
    suggest::did_you_mean(key, VOCABULARY.iter().copied())
}
