//! Append-only accumulator for [`SelectStatement`]s.
//!
//! The builder owns the two ordering invariants the compiler relies
//! on: join directives are deduplicated on their identifying triple
//! with the first occurrence winning, and every list keeps insertion
//! order.

use super::select::{
    AttributeItem, Condition, ConditionItem, GroupByItem, JoinItem, OrderByItem, SelectStatement,
};
use super::types::{Aggregate, Conjunction, JoinType, Order};

#[derive(Debug, Default)]
pub struct SelectBuilder {
    statement: SelectStatement,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a projected column.
    pub fn add_column(&mut self, aid: i64, attribute: &str, unit_id: i64, aggregate: Aggregate) {
        self.statement.columns.push(AttributeItem {
            aid,
            attribute: attribute.to_string(),
            unit_id,
            aggregate,
        });
    }

    pub fn has_columns(&self) -> bool {
        !self.statement.columns.is_empty()
    }

    /// Append a join unless the identical `(aid_from, aid_to,
    /// relation)` triple is already present. A repeat visit never
    /// changes the join type of the first occurrence.
    pub fn add_join(&mut self, aid_from: i64, aid_to: i64, relation: &str, join_type: JoinType) {
        let present = self
            .statement
            .joins
            .iter()
            .any(|j| j.aid_from == aid_from && j.aid_to == aid_to && j.relation == relation);
        if present {
            return;
        }
        log::trace!("join {} -> {} via '{}'", aid_from, aid_to, relation);
        self.statement.joins.push(JoinItem {
            aid_from,
            aid_to,
            relation: relation.to_string(),
            join_type,
        });
    }

    /// Append a structural marker to the where sequence.
    pub fn push_conjunction(&mut self, conjunction: Conjunction) {
        self.statement
            .where_clause
            .push(ConditionItem::Conjunction(conjunction));
    }

    /// Append a leaf condition to the where sequence.
    pub fn push_condition(&mut self, condition: Condition) {
        self.statement
            .where_clause
            .push(ConditionItem::Condition(condition));
    }

    pub fn add_order_by(&mut self, aid: i64, attribute: &str, order: Order) {
        self.statement.order_by.push(OrderByItem {
            aid,
            attribute: attribute.to_string(),
            order,
        });
    }

    pub fn add_group_by(&mut self, aid: i64, attribute: &str) {
        self.statement.group_by.push(GroupByItem {
            aid,
            attribute: attribute.to_string(),
        });
    }

    pub fn set_row_limit(&mut self, value: i64) {
        self.statement.row_limit = value;
    }

    pub fn set_row_start(&mut self, value: i64) {
        self.statement.row_start = value;
    }

    pub fn set_values_limit(&mut self, value: i64) {
        self.statement.values_limit = value;
    }

    pub fn set_values_start(&mut self, value: i64) {
        self.statement.values_start = value;
    }

    pub fn finish(self) -> SelectStatement {
        self.statement
    }
}
