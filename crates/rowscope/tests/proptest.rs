//! Property-based tests for the derivation pipeline using proptest.

use proptest::prelude::*;
use rowscope::{
    build_csv, Column, ColumnSet, DataTable, Dir, FilterOp, FilterSet, Number, PageWindow, Pipeline, Record,
    SearchQuery, SortState, TableOptions, Value, Visibility,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    name: String,
    dept: String,
    hours: Option<i64>,
}

impl Record for TestItem {
    fn field(&self, name: &str) -> Value<'_> {
        match name {
            "name" => Value::str(&self.name),
            "dept" => Value::str(&self.dept),
            "hours" => self.hours.map(Number::I64).into(),
            _ => Value::None,
        }
    }
}

fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (
        "[a-dA-D]{1,6}",
        prop::sample::select(vec!["ops", "dev", "Human Resources", "design"]),
        prop::option::of(0i64..24),
    )
        .prop_map(|(name, dept, hours)| TestItem {
            name,
            dept: dept.to_string(),
            hours,
        })
}

fn op_strategy() -> impl Strategy<Value = FilterOp> {
    prop::sample::select(FilterOp::ALL.to_vec())
}

fn columns() -> ColumnSet<TestItem> {
    ColumnSet::new(vec![
        Column::field("name", "Name", "name").sortable(),
        Column::field("dept", "Dept", "dept").sortable(),
        Column::field("hours", "Hours", "hours").sortable(),
        Column::computed("initial", "Initial", |t: &TestItem| t.name.chars().take(1).collect()),
    ])
}

fn ptrs<T>(rows: &[&T]) -> Vec<*const T> {
    rows.iter().map(|r| *r as *const T).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Re-running the pipeline with unchanged inputs gives the same rows in
    /// the same order.
    #[test]
    fn derivation_is_deterministic(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        query in "[a-d ]{0,3}",
        column in prop::sample::select(vec!["name", "dept", "hours", "initial"]),
        desc in any::<bool>(),
    ) {
        let cols = columns();
        let q = SearchQuery::new(&query);
        let sort = SortState::by(column, if desc { Dir::Desc } else { Dir::Asc });
        let pipeline = Pipeline::new(&cols).search(Some(&q)).sort(Some(&sort));

        let first = pipeline.run(&items);
        let second = pipeline.run(&items);
        prop_assert_eq!(ptrs(&first.sorted), ptrs(&second.sorted));
        prop_assert_eq!(ptrs(&first.filtered), ptrs(&second.filtered));
    }

    /// Several rules select exactly the rows every single rule selects.
    #[test]
    fn rules_intersect(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        rules in prop::collection::vec(
            (prop::sample::select(vec!["name", "dept", "hours"]), op_strategy(), "[a-dA-D0-9]{0,2}"),
            2..4,
        ),
    ) {
        let cols = columns();
        let mut all = FilterSet::new();
        for (column, op, value) in &rules {
            all.add(&cols, Some(*column), *op, value.clone());
        }
        let combined = all.apply(&cols, items.iter().collect());

        let mut expected: Vec<&TestItem> = items.iter().collect();
        for (column, op, value) in &rules {
            let mut single = FilterSet::new();
            single.add(&cols, Some(*column), *op, value.clone());
            let passing = ptrs(&single.apply(&cols, items.iter().collect()));
            expected.retain(|row| passing.contains(&(*row as *const TestItem)));
        }
        prop_assert_eq!(ptrs(&combined), ptrs(&expected));
    }

    /// Clicking the same header twice more returns to ascending; another
    /// column always starts ascending.
    #[test]
    fn header_clicks_toggle(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        first in prop::sample::select(vec!["name", "dept", "hours"]),
        second in prop::sample::select(vec!["name", "dept", "hours"]),
        extra_clicks in 0usize..4,
    ) {
        let mut table = DataTable::builder(columns()).options(TableOptions {
            page_size: 100,
            ..TableOptions::default()
        }).build();

        table.request_sort(first);
        let ascending = ptrs(&table.view(&items).rows.iter().map(|r| r.item).collect::<Vec<_>>());
        table.request_sort(first);
        table.request_sort(first);
        prop_assert_eq!(table.sort(), &SortState::by(first, Dir::Asc));
        let again = ptrs(&table.view(&items).rows.iter().map(|r| r.item).collect::<Vec<_>>());
        prop_assert_eq!(ascending, again);

        for _ in 0..extra_clicks {
            table.request_sort(first);
        }
        if first != second {
            table.request_sort(second);
            prop_assert_eq!(table.sort(), &SortState::by(second, Dir::Asc));
        }
    }

    /// Missing values come after every defined value in both directions.
    #[test]
    fn missing_values_sort_last(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        desc in any::<bool>(),
    ) {
        let cols = columns();
        let sort = SortState::by("hours", if desc { Dir::Desc } else { Dir::Asc });
        let out = Pipeline::new(&cols).sort(Some(&sort)).run(&items);

        let defined = out.sorted.iter().take_while(|r| r.hours.is_some()).count();
        prop_assert!(out.sorted[defined..].iter().all(|r| r.hours.is_none()));
        prop_assert_eq!(defined, items.iter().filter(|r| r.hours.is_some()).count());
    }

    /// Any requested page lands in range and there is always a page.
    #[test]
    fn pages_are_clamped(
        total in 0usize..500,
        size in 1usize..60,
        requested in 0usize..1000,
    ) {
        let w = PageWindow::new(requested, size, total);
        prop_assert!(w.total_pages() >= 1);
        prop_assert!(w.page() >= 1 && w.page() <= w.total_pages());
        prop_assert!(w.from() <= w.to() || total == 0);
        prop_assert!(w.to() <= total);
        prop_assert_eq!(w.range().len(), if total == 0 { 0 } else { w.to() - w.from() + 1 });
    }

    /// No sequence of toggles hides every column.
    #[test]
    fn visibility_never_empties(
        ops in prop::collection::vec((0usize..6, any::<bool>()), 0..60),
    ) {
        let ids = ["a", "b", "c", "d", "e"];
        let mut v = Visibility::new(ids);
        for (i, toggle_all) in ops {
            if toggle_all {
                v.hide_all_but_first();
            } else {
                v.toggle(ids.get(i).copied().unwrap_or("unknown"));
            }
            prop_assert!(v.visible_count() >= 1);
        }
    }

    /// An export has one line per filtered row plus the header, and one
    /// column per visible field-backed column.
    #[test]
    fn export_matches_filtered_rows(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        query in "[a-d]{0,2}",
        hide in prop::sample::select(vec!["name", "dept", "hours", "initial"]),
        page_size in 1usize..10,
    ) {
        let mut table = DataTable::builder(columns()).options(TableOptions {
            page_size,
            ..TableOptions::default()
        }).build();
        table.set_search(query.clone());
        table.toggle_column(hide);
        table.view(&items);
        table.last_page();

        let export = table.export_csv(&items).unwrap().unwrap();
        let q = SearchQuery::new(&query);
        let expected_rows = items.iter().filter(|i| q.matches_row(table.columns(), *i)).count();
        let expected_cols = if hide == "initial" { 3 } else { 2 };

        prop_assert_eq!(export.rows, expected_rows);
        prop_assert_eq!(export.columns, expected_cols);
        prop_assert_eq!(export.content.split('\n').count(), expected_rows + 1);
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn empty_collection_derives_empty() {
    let cols = columns();
    let out = Pipeline::new(&cols).run(&[]);
    assert!(out.sorted.is_empty());
    assert!(out.filtered.is_empty());
}

#[test]
fn export_of_nothing_is_header_only() {
    let cols = columns();
    let col_refs: Vec<&Column<TestItem>> = cols.iter().filter(|c| c.source_field().is_some()).collect();
    let export = build_csv::<TestItem>(Some("empty"), &col_refs, &[]).unwrap();
    assert_eq!(export.content, "\"Name\",\"Dept\",\"Hours\"");
}
