//! Ownership of table state, untyped JSON rows, and the card list.

use std::sync::{Arc, Mutex};

use rowscope::{
    Column, Control, DataTable, Dir, EntityCardList, FilterOp, Number, Record, SortState, TableOptions, Value,
    ViewState,
};
use serde_json::json;

#[derive(Debug)]
struct Task {
    title: &'static str,
    owner: &'static str,
    points: u32,
}

impl Record for Task {
    fn field(&self, name: &str) -> Value<'_> {
        match name {
            "title" => Value::str(self.title),
            "owner" => Value::str(self.owner),
            "points" => Value::Number(Number::from(self.points)),
            _ => Value::None,
        }
    }
}

fn tasks() -> Vec<Task> {
    (0..12)
        .map(|i| Task {
            title: ["alpha", "beta", "gamma", "delta"][i % 4],
            owner: if i < 6 { "mira" } else { "otto" },
            points: i as u32,
        })
        .collect()
}

fn columns() -> Vec<Column<Task>> {
    vec![
        Column::field("title", "Title", "title").sortable(),
        Column::field("owner", "Owner", "owner"),
        Column::field("points", "Points", "points")
            .sortable()
            .compare_with(rowscope::compare_typed),
    ]
}

type Log<T> = Arc<Mutex<Vec<T>>>;

fn recorder<T: Clone + Send + 'static>() -> (Log<T>, impl FnMut(&T) + Send + 'static) {
    let log: Log<T> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |v: &T| sink.lock().unwrap().push(v.clone()))
}

// ============================================================================
// Controlled vs uncontrolled
// ============================================================================

#[test]
fn controlled_sort_emits_and_waits() {
    let rows = tasks();
    let (events, on_change) = recorder::<SortState>();
    let mut table = DataTable::builder(columns())
        .controlled_sort(SortState::none(), on_change)
        .build();

    table.request_sort("points");
    assert_eq!(*events.lock().unwrap(), vec![SortState::by("points", Dir::Asc)]);
    assert_eq!(table.sort(), &SortState::none());

    // The caller re-renders with the new state.
    table.sync_sort(SortState::by("points", Dir::Asc));
    table.request_sort("points");
    assert_eq!(events.lock().unwrap()[1], SortState::by("points", Dir::Desc));

    table.sync_sort(SortState::by("points", Dir::Desc));
    let view = table.view(&rows);
    assert_eq!(view.rows[0].item.points, 11);
    assert_eq!(view.rows[1].item.points, 10);
}

#[test]
fn controlled_search_is_not_applied_twice() {
    let rows = tasks();
    let (events, on_change) = recorder::<String>();
    let mut table = DataTable::builder(columns())
        .controlled_search("", on_change)
        .build();

    table.set_search("otto");
    assert_eq!(*events.lock().unwrap(), vec!["otto".to_string()]);
    assert_eq!(table.search(), "");

    // The caller owns search, so it hands over rows it already searched.
    table.sync_search("otto");
    let searched: Vec<Task> = tasks().into_iter().filter(|t| t.owner == "otto").collect();
    let view = table.view(&searched);
    assert_eq!(view.window.total(), 6);
    assert_eq!(view.search, "otto");

    // Unsearched rows pass straight through too.
    assert_eq!(table.view(&rows).window.total(), 12);
}

#[test]
fn controlled_page_size_emits_size_then_first_page() {
    let rows = tasks();
    let order = Arc::new(Mutex::new(Vec::new()));
    let (a, b) = (Arc::clone(&order), Arc::clone(&order));
    let mut table = DataTable::builder(columns())
        .controlled_page(2, move |p: &usize| a.lock().unwrap().push(format!("page:{}", p)))
        .controlled_page_size(5, move |s: &usize| b.lock().unwrap().push(format!("size:{}", s)))
        .build();

    table.view(&rows);
    table.set_page_size(10);
    assert_eq!(*order.lock().unwrap(), vec!["size:10", "page:1"]);
    assert_eq!((table.page(), table.page_size()), (2, 5));
}

#[test]
fn controlled_page_is_clamped_but_not_written() {
    let rows = tasks();
    let (events, on_change) = recorder::<usize>();
    let mut table = DataTable::builder(columns())
        .controlled_page(9, on_change)
        .build();

    let view = table.view(&rows);
    assert_eq!(view.window.page(), 2);
    assert_eq!(table.page(), 9);

    table.go_to_page(0);
    table.next_page();
    assert_eq!(*events.lock().unwrap(), vec![1, 2]);
}

#[test]
fn owned_page_follows_search_but_controlled_page_does_not() {
    let rows = tasks();
    let options = TableOptions {
        page_size: 5,
        ..TableOptions::default()
    };

    let mut owned = DataTable::builder(columns()).options(options.clone()).build();
    owned.view(&rows);
    owned.go_to_page(3);
    owned.set_search("a");
    assert_eq!(owned.page(), 1);

    let (events, on_change) = recorder::<usize>();
    let mut controlled = DataTable::builder(columns())
        .options(options)
        .controlled_page(3, on_change)
        .build();
    controlled.set_search("a");
    assert_eq!(controlled.page(), 3);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn concerns_are_independent() {
    let rows = tasks();
    let (_events, on_change) = recorder::<String>();
    let mut table = DataTable::builder(columns())
        .controlled_search("", on_change)
        .build();

    table.request_sort("title");
    assert_eq!(table.sort(), &SortState::by("title", Dir::Asc));
    assert_eq!(table.view(&rows).rows[0].item.title, "alpha");
}

#[test]
fn control_debug_hides_callback() {
    let c: Control<u8> = Control::external(3, |_: &u8| {});
    assert_eq!(format!("{:?}", c), "External { value: 3, .. }");
}

// ============================================================================
// Typed comparator vs locale order
// ============================================================================

#[test]
fn numeric_comparator_differs_from_text_order() {
    let rows = tasks();
    let mut typed = DataTable::builder(columns()).build();
    typed.sort_change("points", Dir::Desc);
    assert_eq!(typed.view(&rows).rows[0].item.points, 11);

    let mut text = DataTable::builder(vec![Column::field("points", "Points", "points").sortable()]).build();
    text.sort_change("points", Dir::Desc);
    // "9" sorts after "11" as text.
    assert_eq!(text.view(&rows).rows[0].item.points, 9);
}

// ============================================================================
// JSON rows
// ============================================================================

#[test]
fn json_objects_are_records() {
    let rows = vec![
        json!({"name": "Harini Rao", "status": "Present", "totalHours": 8.9}),
        json!({"name": "Aarav Mehta", "status": "Late", "totalHours": 8.5}),
        json!({"name": "Nisha Gupta", "status": "Absent", "totalHours": null}),
    ];
    let mut table = DataTable::builder(vec![
        Column::field("name", "Name", "name"),
        Column::field("hours", "Hours", "totalHours").sortable(),
    ])
    .build();

    table.sort_change("hours", Dir::Asc);
    let view = table.view(&rows);
    let order: Vec<&str> = view.rows.iter().map(|r| r.cells[0].as_str()).collect();
    assert_eq!(order, vec!["Aarav Mehta", "Harini Rao", "Nisha Gupta"]);
    assert_eq!(view.rows[2].cells[1], "");

    table.add_filter(None, FilterOp::EndsWith, "rao");
    assert_eq!(table.view(&rows).rows.len(), 1);
}

#[test]
fn options_from_yaml_drive_the_table() {
    let options = TableOptions::from_yaml(
        "enableFilters: false\nemptyMessage: Nothing here\npageSize: 4\n",
    )
    .unwrap();
    let rows = tasks();
    let mut table = DataTable::builder(columns()).options(options).build();
    assert!(table.add_filter(None, FilterOp::Contains, "x").is_none());
    assert_eq!(table.view(&rows).rows.len(), 4);

    table.set_search("nobody");
    assert_eq!(table.view(&rows).state, ViewState::Empty("Nothing here".into()));
}

// ============================================================================
// Card list
// ============================================================================

#[test]
fn card_list_over_tasks() {
    let rows = tasks();
    let (clicks, mut on_click) = recorder::<u32>();
    let mut list = EntityCardList::new(|t: &Task| t.points.to_string())
        .search_text(|t: &Task| format!("{} {}", t.title, t.owner))
        .is_favorite(|t: &Task| t.points % 5 == 0)
        .on_card_click(move |t: &Task| on_click(&t.points));

    list.set_search("DELTA");
    let view = list.view(&rows);
    let ids: Vec<&str> = view.cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "7", "11"]);

    list.clear_search();
    let view = list.view(&rows);
    let ids: Vec<&str> = view.cards.iter().take(4).map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "5", "10", "1"]);
    assert!(view.cards[0].favorite && !view.cards[3].favorite);
    assert!(!view.cards[0].can_favorite);

    list.click(&rows[4]);
    assert_eq!(*clicks.lock().unwrap(), vec![4]);
}
