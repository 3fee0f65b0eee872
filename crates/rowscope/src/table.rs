//! The data table: every stage wired together for one table instance.
//!
//! A [`DataTable`] holds the state that survives between renders (filter
//! rules, column visibility, the open overlay, and whichever of search, sort,
//! page and page size it owns) and derives a [`TableView`] from the caller's
//! rows on each [`DataTable::view`] call.
//!
//! Ownership is decided per concern when the table is built. Supplying a
//! `controlled_*` value and callback hands that concern to the caller: the
//! table then forwards requests to the callback and renders whatever the
//! caller delivers through the matching `sync_*` method.
//!
//! ```rust
//! use rowscope::{Column, DataTable, Dir, FilterOp, Number, Record, Value};
//!
//! struct Shift {
//!     name: &'static str,
//!     hours: f64,
//! }
//!
//! impl Record for Shift {
//!     fn field(&self, name: &str) -> Value<'_> {
//!         match name {
//!             "name" => Value::str(self.name),
//!             "hours" => Value::Number(Number::F64(self.hours)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let rows = vec![
//!     Shift { name: "Aarav", hours: 8.5 },
//!     Shift { name: "Diya", hours: 9.0 },
//!     Shift { name: "Kabir", hours: 7.5 },
//! ];
//!
//! let mut table = DataTable::builder(vec![
//!     Column::field("name", "Name", "name").sortable(),
//!     Column::field("hours", "Hours", "hours").sortable(),
//! ])
//! .build();
//!
//! table.request_sort("hours");
//! table.request_sort("hours");
//! table.add_filter(Some("name"), FilterOp::Contains, "a");
//!
//! let view = table.view(&rows);
//! let names: Vec<&str> = view.rows.iter().map(|r| r.item.name).collect();
//! assert_eq!(names, vec!["Diya", "Aarav", "Kabir"]);
//! assert_eq!(table.sort().direction, Dir::Desc);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::column::{Align, Column, ColumnSet, ResponsiveHide, Viewport};
use crate::config::{Density, TableOptions};
use crate::control::Control;
use crate::error::Result;
use crate::export::{build_csv, build_print_view, CsvExport, Host, PrintView};
use crate::filter::{FilterSet, RuleId};
use crate::op::FilterOp;
use crate::ordering::{Dir, SortState};
use crate::overlay::Overlay;
use crate::pagination::{clamp_page, total_pages, PageWindow};
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::search::SearchQuery;
use crate::visibility::Visibility;

/// Row id projection. Receives the row and its index on the page.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

type RowCallback<T> = Box<dyn FnMut(&T) + Send>;

/// What the table body should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    /// No rows survived; carries the configured empty message.
    Empty(String),
    Rows,
}

/// A rendered column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub id: String,
    pub label: String,
    pub align: Align,
    pub sortable: bool,
    pub filterable: bool,
    /// Direction indicator when this is the sorted column.
    pub sorted: Option<Dir>,
    pub responsive: ResponsiveHide,
}

/// A rendered row.
#[derive(Debug)]
pub struct RowView<'r, T> {
    pub id: String,
    pub item: &'r T,
    /// One display string per column of the view.
    pub cells: Vec<String>,
}

/// Everything needed to draw one render of a table.
#[derive(Debug)]
pub struct TableView<'r, T> {
    pub title: Option<String>,
    pub state: ViewState,
    pub columns: Vec<HeaderView>,
    pub rows: Vec<RowView<'r, T>>,
    pub window: PageWindow,
    pub page_size_options: Vec<usize>,
    pub search: String,
    pub search_placeholder: String,
    pub density: Density,
    pub overlay: Overlay,
    pub active_filters: usize,
}

impl<T> TableView<'_, T> {
    /// The "Showing X-Y of N" footer line.
    pub fn summary(&self) -> String {
        self.window.summary()
    }
}

/// Builder for [`DataTable`].
pub struct DataTableBuilder<T> {
    columns: ColumnSet<T>,
    options: TableOptions,
    title: Option<String>,
    search: Option<Control<String>>,
    sort: Option<Control<SortState>>,
    page: Option<Control<usize>>,
    page_size: Option<Control<usize>>,
    on_row_click: Option<RowCallback<T>>,
    row_id: Option<RowIdFn<T>>,
    remote_total: Option<usize>,
    loading: bool,
}

impl<T> DataTableBuilder<T> {
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Hands search to the caller.
    pub fn controlled_search(
        mut self,
        query: impl Into<String>,
        on_change: impl FnMut(&String) + Send + 'static,
    ) -> Self {
        self.search = Some(Control::external(query.into(), on_change));
        self
    }

    /// Starts table-owned search at `query`.
    pub fn initial_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(Control::internal(query.into()));
        self
    }

    /// Hands sorting to the caller.
    pub fn controlled_sort(
        mut self,
        state: SortState,
        on_change: impl FnMut(&SortState) + Send + 'static,
    ) -> Self {
        self.sort = Some(Control::external(state, on_change));
        self
    }

    /// Starts table-owned sorting at `state`.
    pub fn initial_sort(mut self, state: SortState) -> Self {
        self.sort = Some(Control::internal(state));
        self
    }

    /// Hands the current page to the caller.
    pub fn controlled_page(mut self, page: usize, on_change: impl FnMut(&usize) + Send + 'static) -> Self {
        self.page = Some(Control::external(page, on_change));
        self
    }

    /// Hands the page size to the caller.
    pub fn controlled_page_size(
        mut self,
        size: usize,
        on_change: impl FnMut(&usize) + Send + 'static,
    ) -> Self {
        self.page_size = Some(Control::external(size, on_change));
        self
    }

    pub fn on_row_click(mut self, f: impl FnMut(&T) + Send + 'static) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    /// Row ids for rendering. Without it, a row's id is its index on the page.
    pub fn row_id(mut self, f: impl Fn(&T, usize) -> String + Send + Sync + 'static) -> Self {
        self.row_id = Some(Arc::new(f));
        self
    }

    /// Declares that rows arrive already paginated, with `total` rows overall.
    pub fn remote_total(mut self, total: usize) -> Self {
        self.remote_total = Some(total);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn build(self) -> DataTable<T> {
        let visibility = Visibility::new(self.columns.ids());
        let page_size = self
            .page_size
            .unwrap_or_else(|| Control::internal(self.options.page_size.max(1)));
        DataTable {
            columns: self.columns,
            visibility,
            filters: FilterSet::new(),
            overlay: Overlay::None,
            search: self.search.unwrap_or_default(),
            sort: self.sort.unwrap_or_default(),
            page: self.page.unwrap_or_else(|| Control::internal(1)),
            page_size,
            options: self.options,
            title: self.title,
            on_row_click: self.on_row_click,
            row_id: self.row_id,
            remote_total: self.remote_total,
            loading: self.loading,
            viewport: Viewport::Wide,
            last_total: 0,
        }
    }
}

/// A table instance.
pub struct DataTable<T> {
    columns: ColumnSet<T>,
    visibility: Visibility,
    filters: FilterSet,
    overlay: Overlay,
    search: Control<String>,
    sort: Control<SortState>,
    page: Control<usize>,
    page_size: Control<usize>,
    options: TableOptions,
    title: Option<String>,
    on_row_click: Option<RowCallback<T>>,
    row_id: Option<RowIdFn<T>>,
    remote_total: Option<usize>,
    loading: bool,
    viewport: Viewport,
    last_total: usize,
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns.ids().collect::<Vec<_>>())
            .field("visibility", &self.visibility)
            .field("filters", &self.filters)
            .field("overlay", &self.overlay)
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<T> DataTable<T> {
    /// Starts building a table over `columns`.
    pub fn builder(columns: impl Into<ColumnSet<T>>) -> DataTableBuilder<T> {
        DataTableBuilder {
            columns: columns.into(),
            options: TableOptions::default(),
            title: None,
            search: None,
            sort: None,
            page: None,
            page_size: None,
            on_row_click: None,
            row_id: None,
            remote_total: None,
            loading: false,
        }
    }

    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn search(&self) -> &str {
        self.search.get()
    }

    pub fn sort(&self) -> &SortState {
        self.sort.get()
    }

    pub fn page(&self) -> usize {
        *self.page.get()
    }

    pub fn page_size(&self) -> usize {
        *self.page_size.get()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_remote_total(&mut self, total: Option<usize>) {
        self.remote_total = total;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replaces the column set. Visibility starts over with every column
    /// shown, filter rules are dropped and any open overlay closes. Sort and
    /// page return to their defaults when the table owns them.
    pub fn set_columns(&mut self, columns: impl Into<ColumnSet<T>>) {
        self.columns = columns.into();
        self.visibility.reset(self.columns.ids());
        self.filters.clear();
        self.overlay = Overlay::None;
        if let Control::Internal(sort) = &mut self.sort {
            *sort = SortState::none();
        }
        self.reset_owned_page();
    }

    // -- controlled state delivery --

    /// Delivers the caller's search query.
    pub fn sync_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if *self.search.get() != query {
            self.reset_owned_page();
        }
        self.search.sync(query);
    }

    pub fn sync_sort(&mut self, state: SortState) {
        self.sort.sync(state);
    }

    pub fn sync_page(&mut self, page: usize) {
        self.page.sync(page);
    }

    pub fn sync_page_size(&mut self, size: usize) {
        self.page_size.sync(size);
    }

    // -- search --

    /// Search input changed.
    pub fn set_search(&mut self, query: impl Into<String>) {
        if !self.options.enable_global_search {
            log::debug!("global search is disabled");
            return;
        }
        let query = query.into();
        if *self.search.get() == query {
            return;
        }
        self.search.request(query);
        self.reset_owned_page();
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    // -- sort --

    /// Header click: sorts `column_id` ascending, or flips it if it is
    /// already sorted ascending.
    pub fn request_sort(&mut self, column_id: &str) {
        if !self.is_sortable(column_id) {
            return;
        }
        let next = self.sort.get().clicked(column_id);
        self.sort.request(next);
    }

    /// Explicit sort change. Ignored unless the column is sortable.
    pub fn sort_change(&mut self, column_id: &str, direction: Dir) {
        if !self.is_sortable(column_id) {
            return;
        }
        self.sort.request(SortState::by(column_id, direction));
    }

    /// Restores input order.
    pub fn clear_sort(&mut self) {
        if self.sort.get().column_id.is_some() {
            self.sort.request(SortState::none());
        }
    }

    fn is_sortable(&self, column_id: &str) -> bool {
        match self.columns.get(column_id) {
            Some(col) if col.is_sortable() => true,
            Some(_) => {
                log::debug!("column '{}' is not sortable", column_id);
                false
            }
            None => {
                log::debug!("sort requested for unknown column '{}'", column_id);
                false
            }
        }
    }

    // -- pagination --

    /// Page count for the declared remote total, or for the row count of
    /// the last [`view`](Self::view).
    pub fn total_pages(&self) -> usize {
        total_pages(self.remote_total.unwrap_or(self.last_total), self.page_size())
    }

    /// Moves to page `n`, clamped into range. Returns the page requested.
    ///
    /// Without a remote total the range comes from the last `view`, so a
    /// search or filter change made since then is not reflected until the
    /// next render. The next `view` clamps a table-owned page again.
    pub fn go_to_page(&mut self, n: usize) -> usize {
        let page = clamp_page(n, self.total_pages());
        if page != self.page() || self.page.is_controlled() {
            self.page.request(page);
        }
        page
    }

    pub fn first_page(&mut self) -> usize {
        self.go_to_page(1)
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.page().saturating_sub(1))
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page().saturating_add(1))
    }

    pub fn last_page(&mut self) -> usize {
        self.go_to_page(self.total_pages())
    }

    /// Changes rows per page and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        let size = if size == 0 {
            log::warn!("page size 0 is invalid, using 1");
            1
        } else {
            size
        };
        if !self.options.page_size_options.contains(&size) {
            log::debug!("page size {} is not one of the offered options", size);
        }
        self.page_size.request(size);
        self.page.request(1);
    }

    fn reset_owned_page(&mut self) {
        if let Control::Internal(page) = &mut self.page {
            *page = 1;
        }
    }

    // -- rows --

    /// Emits a row click.
    pub fn click_row(&mut self, row: &T) {
        if let Some(cb) = self.on_row_click.as_mut() {
            cb(row);
        }
    }

    // -- visibility --

    /// Shows or hides one column. The last visible column cannot be hidden.
    pub fn toggle_column(&mut self, column_id: &str) -> bool {
        if !self.options.enable_column_visibility {
            log::debug!("column visibility is disabled");
            return false;
        }
        self.visibility.toggle(column_id)
    }

    pub fn show_all_columns(&mut self) {
        if self.options.enable_column_visibility {
            self.visibility.show_all();
        }
    }

    /// The "toggle all" menu entry.
    pub fn toggle_all_columns(&mut self) {
        if self.options.enable_column_visibility {
            self.visibility.hide_all_but_first();
        }
    }

    /// Columns currently shown, in declared order.
    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns
            .iter()
            .filter(|c| !self.options.enable_column_visibility || self.visibility.is_visible(c.id()))
            .collect()
    }

    /// Visible columns that have a source field.
    pub fn export_columns(&self) -> Vec<&Column<T>> {
        self.visible_columns()
            .into_iter()
            .filter(|c| c.source_field().is_some())
            .collect()
    }

    // -- filters --

    /// Adds a rule, targeting the first filterable column when `column_id`
    /// is `None`.
    pub fn add_filter(&mut self, column_id: Option<&str>, op: FilterOp, value: impl Into<String>) -> Option<RuleId> {
        if !self.options.enable_filters {
            log::debug!("filters are disabled");
            return None;
        }
        let id = self.filters.add(&self.columns, column_id, op, value)?;
        self.reset_owned_page();
        Some(id)
    }

    pub fn update_filter_value(&mut self, id: RuleId, value: impl Into<String>) -> bool {
        let changed = self.options.enable_filters && self.filters.update_value(id, value);
        self.after_filter_edit(changed)
    }

    pub fn update_filter_operator(&mut self, id: RuleId, op: FilterOp) -> bool {
        let changed = self.options.enable_filters && self.filters.update_operator(id, op);
        self.after_filter_edit(changed)
    }

    pub fn update_filter_column(&mut self, id: RuleId, column_id: impl Into<String>) -> bool {
        let changed = self.options.enable_filters && self.filters.update_column(id, column_id);
        self.after_filter_edit(changed)
    }

    pub fn remove_filter(&mut self, id: RuleId) -> bool {
        let changed = self.options.enable_filters && self.filters.remove(id);
        self.after_filter_edit(changed)
    }

    pub fn clear_filters(&mut self) {
        if self.options.enable_filters && !self.filters.is_empty() {
            self.filters.clear();
            self.reset_owned_page();
        }
    }

    fn after_filter_edit(&mut self, changed: bool) -> bool {
        if changed {
            self.reset_owned_page();
        }
        changed
    }

    // -- overlays --

    /// Opens `overlay`, closing whatever was open.
    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    /// Opens `overlay`, or closes it if it is already open.
    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        self.overlay = self.overlay.toggled(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }
}

impl<T: Record> DataTable<T> {
    fn search_query(&self) -> Option<SearchQuery> {
        // Caller-owned search means the rows are already searched.
        (self.options.enable_global_search && !self.search.is_controlled())
            .then(|| SearchQuery::new(self.search.get()))
    }

    fn active_filters(&self) -> Option<&FilterSet> {
        self.options.enable_filters.then_some(&self.filters)
    }

    /// Rows an export covers: searched and filtered, unsorted, unpaginated.
    pub fn filtered_rows<'r>(&self, rows: &'r [T]) -> Vec<&'r T> {
        let query = self.search_query();
        Pipeline::new(&self.columns)
            .search(query.as_ref())
            .filters(self.active_filters())
            .filter(rows)
    }

    /// Derives one render from `rows`.
    ///
    /// Also records the total row count used to clamp later page requests,
    /// and clamps a table-owned page into range.
    pub fn view<'r>(&mut self, rows: &'r [T]) -> TableView<'r, T> {
        let query = self.search_query();
        let derived = Pipeline::new(&self.columns)
            .search(query.as_ref())
            .filters(self.active_filters())
            .sort(Some(self.sort.get()))
            .run(rows);

        let total = self.remote_total.unwrap_or(derived.sorted.len());
        let window = PageWindow::new(self.page(), self.page_size(), total);
        self.last_total = total;
        if let Control::Internal(page) = &mut self.page {
            *page = window.page();
        }

        let page_rows: &[&'r T] = if self.remote_total.is_some() {
            &derived.sorted
        } else {
            window.slice(&derived.sorted)
        };

        let columns: Vec<&Column<T>> = self
            .visible_columns()
            .into_iter()
            .filter(|c| c.responsive().shown_at(self.viewport))
            .collect();

        let headers = columns
            .iter()
            .map(|c| HeaderView {
                id: c.id().to_string(),
                label: c.label().to_string(),
                align: c.alignment(),
                sortable: c.is_sortable(),
                filterable: c.is_filterable(),
                sorted: self.sort.get().direction_of(c.id()),
                responsive: c.responsive(),
            })
            .collect();

        let rows_out: Vec<RowView<'r, T>> = page_rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowView {
                id: match &self.row_id {
                    Some(f) => f(row, index),
                    None => index.to_string(),
                },
                item: *row,
                cells: columns.iter().map(|c| c.render_cell(row)).collect(),
            })
            .collect();

        let state = if self.loading {
            ViewState::Loading
        } else if rows_out.is_empty() {
            ViewState::Empty(self.options.empty_message.clone())
        } else {
            ViewState::Rows
        };

        TableView {
            title: self.title.clone(),
            state,
            columns: headers,
            rows: rows_out,
            window,
            page_size_options: self.options.page_size_options.clone(),
            search: self.search.get().clone(),
            search_placeholder: self.options.search_placeholder.clone(),
            density: self.options.density,
            overlay: self.overlay.clone(),
            active_filters: self.active_filters().map_or(0, FilterSet::len),
        }
    }

    /// Builds the CSV export, or `None` when export is disabled.
    pub fn export_csv(&self, rows: &[T]) -> Result<Option<CsvExport>> {
        if !self.options.enable_export {
            log::debug!("export is disabled");
            return Ok(None);
        }
        let filtered = self.filtered_rows(rows);
        let export = build_csv(self.options.export_name.as_deref(), &self.export_columns(), &filtered)?;
        Ok(Some(export))
    }

    /// Builds the print projection, or `None` when export is disabled.
    pub fn print_view(&self, rows: &[T]) -> Option<PrintView> {
        if !self.options.enable_export {
            return None;
        }
        let filtered = self.filtered_rows(rows);
        let title = self.title.as_deref().unwrap_or_default();
        Some(build_print_view(title, &self.export_columns(), &filtered))
    }

    /// Builds the CSV export and hands it to `host`.
    ///
    /// Failures are logged and swallowed; the return value only says
    /// whether the host accepted the file. The export menu closes either way.
    pub fn download_csv(&mut self, rows: &[T], host: &mut dyn Host) -> bool {
        self.close_export_menu();
        let export = match self.export_csv(rows) {
            Ok(Some(export)) => export,
            Ok(None) => return false,
            Err(e) => {
                log::error!("building CSV export failed: {}", e);
                return false;
            }
        };
        match host.download(&export) {
            Ok(()) => true,
            Err(e) => {
                log::error!("download of {} failed: {}", export.file_name, e);
                false
            }
        }
    }

    /// Hands the print projection to `host`. Failures are logged and swallowed.
    pub fn print(&mut self, rows: &[T], host: &mut dyn Host) -> bool {
        self.close_export_menu();
        let Some(view) = self.print_view(rows) else {
            return false;
        };
        match host.print(&view) {
            Ok(()) => true,
            Err(e) => {
                log::error!("print failed: {}", e);
                false
            }
        }
    }

    fn close_export_menu(&mut self) {
        if self.overlay == Overlay::ExportMenu {
            self.overlay = Overlay::None;
        }
    }
}
