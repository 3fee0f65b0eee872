//! Sort state and the sort stage.
//!
//! Sorting is single-column. The column's sort value is compared with
//! [`locale_compare`] on its text form unless the column carries an explicit
//! comparator. Missing values always go last, in either direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collate::locale_compare;
use crate::column::{Column, ColumnSet};
use crate::record::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// The opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which column the rows are ordered by, if any.
///
/// Without a column, input order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    /// Sorted column id.
    pub column_id: Option<String>,
    /// Direction, meaningful only with a column.
    pub direction: Dir,
}

impl SortState {
    /// Unsorted.
    pub fn none() -> Self {
        SortState::default()
    }

    /// Sorted by `column_id` in `direction`.
    pub fn by(column_id: impl Into<String>, direction: Dir) -> Self {
        SortState {
            column_id: Some(column_id.into()),
            direction,
        }
    }

    /// Returns `true` if `column_id` is the sorted column.
    pub fn is_sorted_by(&self, column_id: &str) -> bool {
        self.column_id.as_deref() == Some(column_id)
    }

    /// Direction shown on `column_id`'s header, if it is the sorted column.
    pub fn direction_of(&self, column_id: &str) -> Option<Dir> {
        self.is_sorted_by(column_id).then_some(self.direction)
    }

    /// The state after a header click on `column_id`.
    ///
    /// Clicking the sorted column while ascending switches to descending;
    /// any other click sorts that column ascending.
    pub fn clicked(&self, column_id: &str) -> SortState {
        let direction = if self.is_sorted_by(column_id) && self.direction.is_asc() {
            Dir::Desc
        } else {
            Dir::Asc
        };
        SortState::by(column_id, direction)
    }
}

/// Compares two sort values: missing last, then the column's comparator or
/// locale text order, with `dir` applied only to defined values.
pub fn compare_sort_values<T>(column: &Column<T>, a: &Value<'_>, b: &Value<'_>, dir: Dir) -> Ordering {
    match (a.is_none(), b.is_none()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let base = match column.comparator() {
                Some(compare) => compare(a, b),
                None => locale_compare(&a.to_text(), &b.to_text()),
            };
            dir.apply(base)
        }
    }
}

/// Typed comparison for use with [`Column::compare_with`].
///
/// Numbers compare numerically, booleans `false < true`, strings by locale;
/// mismatched kinds fall back to comparing their text.
pub fn compare_typed(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.compare(*y).unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => locale_compare(&a.to_text(), &b.to_text()),
    }
}

/// Stable-sorts rows by the state's column.
///
/// An unset, unknown, or non-sortable column leaves the order untouched.
pub fn sort_rows<'r, T: Record>(columns: &ColumnSet<T>, rows: &mut [&'r T], state: &SortState) {
    let Some(column_id) = state.column_id.as_deref() else {
        return;
    };
    let Some(column) = columns.get(column_id) else {
        log::warn!("sort column '{}' is not in the column set", column_id);
        return;
    };
    if !column.is_sortable() {
        return;
    }

    // Extract each key once; the comparator runs O(n log n) times.
    let mut keyed: Vec<(Value<'r>, &'r T)> = rows
        .iter()
        .map(|row| (column.sort_value(*row), *row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_sort_values(column, a, b, state.direction));

    for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
        *slot = row;
    }
}
