//! Rowscope - search, filter, sort, paginate and export typed record
//! collections for table and card views.
//!
//! Rowscope is the data side of a table widget. The caller owns the rows and
//! describes the columns; rowscope derives what to show and keeps the state
//! that survives between renders. It does no rendering and no I/O of its own
//! beyond handing export artifacts to a [`Host`].
//!
//! # Quick Start
//!
//! ```rust
//! use rowscope::{Column, DataTable, FilterOp, Record};
//!
//! #[derive(Record)]
//! struct Attendance {
//!     #[field(String)]
//!     name: String,
//!     #[field(String)]
//!     status: String,
//!     #[field(Number, rename = "totalHours")]
//!     total_hours: Option<f64>,
//! }
//!
//! let rows = vec![
//!     Attendance { name: "Aarav Mehta".into(), status: "Present".into(), total_hours: Some(8.9) },
//!     Attendance { name: "Diya Sharma".into(), status: "Late".into(), total_hours: None },
//!     Attendance { name: "Kabir Rao".into(), status: "Late".into(), total_hours: Some(8.4) },
//! ];
//!
//! let mut table = DataTable::builder(vec![
//!     Column::field("name", "Name", Attendance::NAME).sortable(),
//!     Column::field("status", "Status", Attendance::STATUS),
//!     Column::field("hours", "Total Hours", Attendance::TOTAL_HOURS).sortable(),
//! ])
//! .build();
//!
//! table.add_filter(Some("status"), FilterOp::Equals, "late");
//! table.request_sort("hours");
//!
//! let view = table.view(&rows);
//! let names: Vec<&str> = view.rows.iter().map(|r| r.item.name.as_str()).collect();
//! assert_eq!(names, vec!["Kabir Rao", "Diya Sharma"]);
//! assert_eq!(view.summary(), "Showing 1-2 of 2");
//! ```
//!
//! # Derivation Order
//!
//! Each render runs a fixed pipeline:
//!
//! ```text
//! rows -> search -> filters -> sort -> page
//!                          \
//!                           +-> export / print (unsorted, unpaginated)
//! ```
//!
//! - **Search**: case-insensitive substring over every filterable column.
//! - **Filters**: user rules, all of which must match.
//! - **Sort**: one column, locale text order, missing values always last.
//! - **Page**: 1-based, clamped into range.
//!
//! # Degrading Instead of Failing
//!
//! Duplicate column ids, rules pointing at unknown columns, sorts on
//! unsortable columns and attempts to hide the last visible column are all
//! ignored rather than reported. Export failures are logged and swallowed.

mod card_list;
pub mod collate;
mod column;
mod config;
mod control;
mod error;
mod export;
mod filter;
mod op;
mod ordering;
mod overlay;
mod pagination;
mod pipeline;
mod record;
mod search;
mod table;
mod value;
mod visibility;

// Allows the derive macro's `::rowscope::` paths to resolve inside this crate's tests.
extern crate self as rowscope;

pub use card_list::{CardListView, CardView, EntityCardList, EMPTY_CARDS_MESSAGE};
pub use column::{Align, CellFn, Column, ColumnSet, ColumnSource, CompareFn, ResponsiveHide, Viewport};
pub use config::{Density, TableOptions, DEFAULT_SEARCH_PLACEHOLDER};
pub use control::{Control, OnChange};
pub use error::{HostError, Result, TableError};
pub use export::{
    build_csv, build_print_view, csv_file_name, CsvExport, DirectoryHost, Host, MemoryHost, PrintView,
    CSV_MIME, DEFAULT_EXPORT_NAME,
};
pub use filter::{FilterRule, FilterSet, RuleId};
pub use op::FilterOp;
pub use ordering::{compare_sort_values, compare_typed, sort_rows, Dir, SortState};
pub use overlay::Overlay;
pub use pagination::{clamp_page, total_pages, PageWindow, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
pub use pipeline::{Derived, Pipeline};
pub use record::Record;
pub use search::{search_rows, SearchQuery};
pub use table::{DataTable, DataTableBuilder, HeaderView, RowIdFn, RowView, TableView, ViewState};
pub use value::{Number, Value};
pub use visibility::Visibility;

#[cfg(feature = "derive")]
pub use rowscope_macros::Record;
