//! The derivation pipeline: search, then filters, then sort.
//!
//! Every stage is a pure function of its inputs, so a [`Pipeline`] can be
//! rebuilt on every render. Stage order is fixed. The search+filter output is
//! kept alongside the sorted output because exports read the former.

use crate::column::ColumnSet;
use crate::filter::FilterSet;
use crate::ordering::{sort_rows, SortState};
use crate::record::Record;
use crate::search::{search_rows, SearchQuery};

/// Stage inputs for one derivation pass. An absent stage is skipped.
#[derive(Debug)]
pub struct Pipeline<'p, T> {
    columns: &'p ColumnSet<T>,
    search: Option<&'p SearchQuery>,
    filters: Option<&'p FilterSet>,
    sort: Option<&'p SortState>,
}

impl<T> Clone for Pipeline<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Pipeline<'_, T> {}

/// The result of one pass.
#[derive(Debug)]
pub struct Derived<'r, T> {
    /// Rows surviving search and filters, in input order.
    pub filtered: Vec<&'r T>,
    /// `filtered`, sorted.
    pub sorted: Vec<&'r T>,
}

impl<'p, T: Record> Pipeline<'p, T> {
    /// A pipeline with every stage skipped.
    pub fn new(columns: &'p ColumnSet<T>) -> Self {
        Pipeline {
            columns,
            search: None,
            filters: None,
            sort: None,
        }
    }

    pub fn search(mut self, query: Option<&'p SearchQuery>) -> Self {
        self.search = query;
        self
    }

    pub fn filters(mut self, filters: Option<&'p FilterSet>) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, sort: Option<&'p SortState>) -> Self {
        self.sort = sort;
        self
    }

    /// Search and filter stages only.
    pub fn filter<'r>(&self, rows: &'r [T]) -> Vec<&'r T> {
        let mut out: Vec<&'r T> = rows.iter().collect();
        if let Some(query) = self.search {
            out = search_rows(self.columns, out, query);
        }
        if let Some(filters) = self.filters {
            out = filters.apply(self.columns, out);
        }
        out
    }

    /// Runs every stage.
    pub fn run<'r>(&self, rows: &'r [T]) -> Derived<'r, T> {
        let filtered = self.filter(rows);
        let mut sorted = filtered.clone();
        if let Some(sort) = self.sort {
            sort_rows(self.columns, &mut sorted, sort);
        }
        Derived { filtered, sorted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::op::FilterOp;
    use crate::ordering::Dir;
    use crate::value::Value;

    struct Item(&'static str, &'static str);

    impl Record for Item {
        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "name" => Value::str(self.0),
                "team" => Value::str(self.1),
                _ => Value::None,
            }
        }
    }

    fn columns() -> ColumnSet<Item> {
        ColumnSet::new(vec![
            Column::field("name", "Name", "name").sortable(),
            Column::field("team", "Team", "team"),
        ])
    }

    fn items() -> Vec<Item> {
        vec![
            Item("carol", "ops"),
            Item("alice", "dev"),
            Item("bob", "dev"),
            Item("dave", "ops"),
        ]
    }

    fn names(rows: &[&Item]) -> Vec<&'static str> {
        rows.iter().map(|i| i.0).collect()
    }

    #[test]
    fn stages_compose_in_order() {
        let cols = columns();
        let data = items();
        let query = SearchQuery::new("a");
        let mut filters = FilterSet::new();
        filters.add(&cols, Some("team"), FilterOp::Equals, "ops");
        let sort = SortState::by("name", Dir::Desc);

        let out = Pipeline::new(&cols)
            .search(Some(&query))
            .filters(Some(&filters))
            .sort(Some(&sort))
            .run(&data);

        assert_eq!(names(&out.filtered), vec!["carol", "dave"]);
        assert_eq!(names(&out.sorted), vec!["dave", "carol"]);
    }

    #[test]
    fn skipped_stages_pass_through() {
        let cols = columns();
        let data = items();
        let out = Pipeline::new(&cols).run(&data);
        assert_eq!(names(&out.sorted), vec!["carol", "alice", "bob", "dave"]);
    }

    #[test]
    fn repeated_runs_agree() {
        let cols = columns();
        let data = items();
        let sort = SortState::by("name", Dir::Asc);
        let p = Pipeline::new(&cols).sort(Some(&sort));
        assert_eq!(names(&p.run(&data).sorted), names(&p.run(&data).sorted));
    }
}
