//! Filter rule operators.
//!
//! Every operator compares text, case-insensitively, against the string form
//! of a field value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Comparison operator for a filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    /// Field contains the value.
    #[default]
    Contains,
    /// Field equals the value.
    Equals,
    /// Field starts with the value.
    StartsWith,
    /// Field ends with the value.
    EndsWith,
}

impl FilterOp {
    /// All operators, in menu order.
    pub const ALL: [FilterOp; 4] = [
        FilterOp::Contains,
        FilterOp::Equals,
        FilterOp::StartsWith,
        FilterOp::EndsWith,
    ];

    /// Applies the operator to already-lowercased operands.
    pub fn eval(self, field: &str, value: &str) -> bool {
        match self {
            FilterOp::Contains => field.contains(value),
            FilterOp::Equals => field == value,
            FilterOp::StartsWith => field.starts_with(value),
            FilterOp::EndsWith => field.ends_with(value),
        }
    }

    /// Returns the wire name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Contains => "contains",
            FilterOp::Equals => "equals",
            FilterOp::StartsWith => "startsWith",
            FilterOp::EndsWith => "endsWith",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FilterOp::Contains => "contains",
            FilterOp::Equals => "equals",
            FilterOp::StartsWith => "starts with",
            FilterOp::EndsWith => "ends with",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = TableError;

    /// Accepts the wire names and a few spellings (`starts-with`, `eq`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "contains" | "has" => Ok(FilterOp::Contains),
            "equals" | "eq" | "is" => Ok(FilterOp::Equals),
            "startswith" | "prefix" => Ok(FilterOp::StartsWith),
            "endswith" | "suffix" => Ok(FilterOp::EndsWith),
            _ => Err(TableError::InvalidOperator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_operators() {
        assert!(FilterOp::Contains.eval("human resources", "man"));
        assert!(!FilterOp::Contains.eval("finance", "man"));
        assert!(FilterOp::Equals.eval("late", "late"));
        assert!(!FilterOp::Equals.eval("late", "lat"));
        assert!(FilterOp::StartsWith.eval("engineering", "eng"));
        assert!(FilterOp::EndsWith.eval("engineering", "ring"));
    }

    #[test]
    fn parse_names() {
        assert_eq!("contains".parse::<FilterOp>().unwrap(), FilterOp::Contains);
        assert_eq!("startsWith".parse::<FilterOp>().unwrap(), FilterOp::StartsWith);
        assert_eq!("ends-with".parse::<FilterOp>().unwrap(), FilterOp::EndsWith);
        assert_eq!("EQ".parse::<FilterOp>().unwrap(), FilterOp::Equals);
        assert!("regex".parse::<FilterOp>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for op in FilterOp::ALL {
            assert_eq!(op.to_string().parse::<FilterOp>().unwrap(), op);
        }
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&FilterOp::StartsWith).unwrap();
        assert_eq!(json, r#""startsWith""#);
    }
}
