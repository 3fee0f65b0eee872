//! User-authored filter rules.
//!
//! A [`FilterRule`] is one predicate: a column, an operator, and a value.
//! [`FilterSet`] keeps rules in creation order and hands out sequential
//! [`RuleId`]s. A row passes the set only if it passes every rule.
//!
//! Rules degrade instead of failing: a rule whose column is unknown, not
//! field-backed, or not filterable is satisfied by every row, and so is a
//! rule with an empty value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::ColumnSet;
use crate::op::FilterOp;
use crate::record::Record;

/// Handle for a rule inside a [`FilterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub u64);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule-{}", self.0)
    }
}

/// A single filter predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// Handle assigned by the owning [`FilterSet`].
    pub id: RuleId,
    /// Id of the column the rule reads.
    pub column_id: String,
    /// How to compare.
    pub op: FilterOp,
    /// What to compare against.
    pub value: String,
}

impl FilterRule {
    /// Evaluates this rule against a row.
    pub fn matches<T: Record>(&self, columns: &ColumnSet<T>, row: &T) -> bool {
        if self.value.is_empty() {
            return true;
        }
        let Some(column) = columns.get(&self.column_id).filter(|c| c.is_filterable()) else {
            return true;
        };
        let field = column.raw_value(row).to_text().to_lowercase();
        self.op.eval(&field, &self.value.to_lowercase())
    }
}

/// Ordered rule list with arena-style ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    rules: Vec<FilterRule>,
    next_id: u64,
}

impl FilterSet {
    /// Creates an empty set. An empty set lets every row through.
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Adds a rule and returns its handle.
    ///
    /// Without an explicit `column`, the rule targets the first filterable
    /// column in declared order. Returns `None` if no such column exists.
    pub fn add<T>(
        &mut self,
        columns: &ColumnSet<T>,
        column: Option<&str>,
        op: FilterOp,
        value: impl Into<String>,
    ) -> Option<RuleId> {
        let column_id = match column {
            Some(id) => id.to_string(),
            None => match columns.first_filterable() {
                Some(col) => col.id().to_string(),
                None => {
                    log::debug!("no filterable column to attach a new rule to");
                    return None;
                }
            },
        };

        let id = RuleId(self.next_id);
        self.next_id += 1;
        self.rules.push(FilterRule {
            id,
            column_id,
            op,
            value: value.into(),
        });
        Some(id)
    }

    /// Removes a rule. Returns `false` if the handle is unknown.
    pub fn remove(&mut self, id: RuleId) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        self.rules.len() != before
    }

    /// Removes every rule. Handles are not reused afterwards.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Retargets a rule to another column.
    pub fn update_column(&mut self, id: RuleId, column_id: impl Into<String>) -> bool {
        self.with_rule(id, |r| r.column_id = column_id.into())
    }

    /// Changes a rule's operator.
    pub fn update_operator(&mut self, id: RuleId, op: FilterOp) -> bool {
        self.with_rule(id, |r| r.op = op)
    }

    /// Changes a rule's comparison value.
    pub fn update_value(&mut self, id: RuleId, value: impl Into<String>) -> bool {
        self.with_rule(id, |r| r.value = value.into())
    }

    fn with_rule(&mut self, id: RuleId, f: impl FnOnce(&mut FilterRule)) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                f(rule);
                true
            }
            None => false,
        }
    }

    /// Looks up a rule.
    pub fn get(&self, id: RuleId) -> Option<&FilterRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Rules in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tests a row against every rule (logical AND).
    pub fn matches<T: Record>(&self, columns: &ColumnSet<T>, row: &T) -> bool {
        self.rules.iter().all(|rule| rule.matches(columns, row))
    }

    /// Keeps the rows passing every rule, preserving order.
    pub fn apply<'r, T: Record>(&self, columns: &ColumnSet<T>, rows: Vec<&'r T>) -> Vec<&'r T> {
        if self.rules.is_empty() {
            return rows;
        }
        rows.into_iter()
            .filter(|row| self.matches(columns, *row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::value::Value;

    struct Entry {
        status: &'static str,
        department: &'static str,
    }

    impl Record for Entry {
        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "status" => Value::str(self.status),
                "department" => Value::str(self.department),
                _ => Value::None,
            }
        }
    }

    fn columns() -> ColumnSet<Entry> {
        ColumnSet::new(vec![
            Column::computed("badge", "Badge", |e: &Entry| e.status.to_string()),
            Column::field("status", "Status", "status"),
            Column::field("department", "Department", "department"),
        ])
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                status: "Late",
                department: "Human Resources",
            },
            Entry {
                status: "Present",
                department: "Human Resources",
            },
            Entry {
                status: "Late",
                department: "Engineering",
            },
        ]
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let cols = columns();
        let mut set = FilterSet::new();
        let a = set.add(&cols, None, FilterOp::Contains, "x").unwrap();
        let b = set.add(&cols, None, FilterOp::Contains, "y").unwrap();
        assert_eq!((a, b), (RuleId(0), RuleId(1)));

        set.clear();
        let c = set.add(&cols, None, FilterOp::Contains, "z").unwrap();
        assert_eq!(c, RuleId(2));
    }

    #[test]
    fn default_column_is_first_filterable() {
        let cols = columns();
        let mut set = FilterSet::new();
        let id = set.add(&cols, None, FilterOp::Equals, "late").unwrap();
        assert_eq!(set.get(id).unwrap().column_id, "status");
    }

    #[test]
    fn no_filterable_columns_means_no_rule() {
        let cols: ColumnSet<Entry> = ColumnSet::new(vec![Column::blank("actions", "")]);
        let mut set = FilterSet::new();
        assert_eq!(set.add(&cols, None, FilterOp::Contains, "x"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn rules_combine_with_and() {
        let cols = columns();
        let rows = entries();
        let mut set = FilterSet::new();
        set.add(&cols, Some("status"), FilterOp::Equals, "LATE");
        set.add(&cols, Some("department"), FilterOp::Contains, "human");

        let out = set.apply(&cols, rows.iter().collect());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].department, "Human Resources");
        assert_eq!(out[0].status, "Late");
    }

    #[test]
    fn empty_value_matches_everything() {
        let cols = columns();
        let rows = entries();
        let mut set = FilterSet::new();
        for op in FilterOp::ALL {
            set.add(&cols, Some("status"), op, "");
        }
        assert_eq!(set.apply(&cols, rows.iter().collect()).len(), 3);
    }

    #[test]
    fn dangling_and_computed_targets_are_no_ops() {
        let cols = columns();
        let rows = entries();
        let mut set = FilterSet::new();
        set.add(&cols, Some("removed"), FilterOp::Equals, "nothing");
        set.add(&cols, Some("badge"), FilterOp::Equals, "nothing");
        assert_eq!(set.apply(&cols, rows.iter().collect()).len(), 3);
    }

    #[test]
    fn updates_and_removal() {
        let cols = columns();
        let rows = entries();
        let mut set = FilterSet::new();
        let id = set.add(&cols, None, FilterOp::Contains, "pres").unwrap();
        assert_eq!(set.apply(&cols, rows.iter().collect()).len(), 1);

        assert!(set.update_operator(id, FilterOp::StartsWith));
        assert!(set.update_value(id, "la"));
        assert_eq!(set.apply(&cols, rows.iter().collect()).len(), 2);

        assert!(set.update_column(id, "department"));
        assert!(set.update_value(id, "eng"));
        assert_eq!(set.apply(&cols, rows.iter().collect()).len(), 1);

        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert!(!set.update_value(id, "x"));
        assert_eq!(set.apply(&cols, rows.iter().collect()).len(), 3);
    }
}
