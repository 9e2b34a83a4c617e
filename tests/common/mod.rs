//! Shared helpers for the integration tests.

use jaquel::model::Model;
use jaquel::ods::{Condition, ConditionItem, Conjunction, SelectStatement};

/// Load the test application model, a small but realistic ODS base
/// model slice around tests, measurements and units.
pub fn test_model() -> Model {
    let json = include_str!("../data/application_model.json");
    serde_json::from_str(json).expect("fixture model parses")
}

/// The leaf conditions of a statement, in sequence order.
#[allow(dead_code)]
pub fn leaf_conditions(statement: &SelectStatement) -> Vec<&Condition> {
    statement
        .where_clause
        .iter()
        .filter_map(ConditionItem::as_condition)
        .collect()
}

/// The structural shape of the where sequence: `(`, `)`, `&`, `|`,
/// `!` for markers and `c` for leaf conditions.
#[allow(dead_code)]
pub fn where_shape(statement: &SelectStatement) -> String {
    statement
        .where_clause
        .iter()
        .map(|item| match item {
            ConditionItem::Condition(_) => 'c',
            ConditionItem::Conjunction(Conjunction::CoAnd) => '&',
            ConditionItem::Conjunction(Conjunction::CoOr) => '|',
            ConditionItem::Conjunction(Conjunction::CoNot) => '!',
            ConditionItem::Conjunction(Conjunction::CoOpen) => '(',
            ConditionItem::Conjunction(Conjunction::CoClose) => ')',
        })
        .collect()
}
